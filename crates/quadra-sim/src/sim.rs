//! A field of moving shapes kept in sync with a quadtree.

use std::time::{Duration, Instant};

use glam::Vec2;
use quadra_common::{Circle, ElementId, LineSegment, QuadraResult, Rect, Shape, SpatialElement, Triangle};
use quadra_index::{MoveReport, QuadTree, QuadTreeStats};
use tracing::{debug, info};

use crate::config::SimConfig;

/// A moving element.
#[derive(Debug, Clone)]
pub struct Body {
    id: ElementId,
    shape: Shape,
    velocity: Vec2,
    tracked: bool,
}

impl SpatialElement for Body {
    type Key = ElementId;

    fn key(&self) -> ElementId {
        self.id
    }

    fn shape(&self) -> Shape {
        self.shape
    }
}

/// Totals gathered over a run.
#[derive(Debug, Clone, Default)]
pub struct SimSummary {
    /// Ticks simulated.
    pub ticks: u32,
    /// Elements the tree accepted at spawn.
    pub spawned: usize,
    /// Combined movement outcomes.
    pub moves: MoveReport,
    /// Elements matched by region queries.
    pub region_hits: usize,
    /// Elements matched by segment queries.
    pub segment_hits: usize,
    /// Tree shape at the end of the run.
    pub stats: QuadTreeStats,
    /// Wall-clock time spent ticking.
    pub elapsed: Duration,
}

impl SimSummary {
    /// Writes the summary to the log.
    pub fn log(&self) {
        info!(
            "Simulated {} ticks over {} elements in {:.2?}",
            self.ticks, self.spawned, self.elapsed
        );
        info!(
            "Moves: {} processed, {} unchanged, {} descended, {} relocated, {} dropped",
            self.moves.processed,
            self.moves.unchanged,
            self.moves.descended,
            self.moves.relocated,
            self.moves.dropped
        );
        info!(
            "Queries: {} region hits, {} segment hits",
            self.region_hits, self.segment_hits
        );
        info!(
            "Tree: {} nodes ({} leaves), depth {}, {} elements ({} straddling)",
            self.stats.node_count,
            self.stats.leaf_count,
            self.stats.max_depth,
            self.stats.element_count,
            self.stats.straddling_count
        );
    }
}

/// Bodies plus the index over them.
pub struct Simulation {
    config: SimConfig,
    tree: QuadTree<ElementId>,
    bodies: Vec<Body>,
    rng: fastrand::Rng,
}

impl Simulation {
    /// Builds the tree and spawns the initial population.
    pub fn new(config: &SimConfig) -> QuadraResult<Self> {
        let tree = QuadTree::from_config(&config.tree)?;
        let rng = config.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        let mut simulation = Self {
            config: config.clone(),
            tree,
            bodies: Vec::with_capacity(config.element_count),
            rng,
        };
        for index in 0..config.element_count {
            let mut body = simulation.spawn(index);
            body.tracked = simulation.tree.add(&body);
            simulation.bodies.push(body);
        }

        info!(
            "Spawned {} elements into a {}x{} world",
            simulation.tracked_count(),
            config.tree.width,
            config.tree.height
        );
        Ok(simulation)
    }

    /// Number of bodies the tree still tracks.
    pub fn tracked_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.tracked).count()
    }

    /// Runs every configured tick.
    pub fn run(&mut self) -> SimSummary {
        let mut summary = SimSummary {
            spawned: self.tracked_count(),
            ..SimSummary::default()
        };

        let start = Instant::now();
        for tick in 0..self.config.ticks {
            summary.moves += self.step();
            let (region_hits, segment_hits) = self.probe();
            summary.region_hits += region_hits;
            summary.segment_hits += segment_hits;
            summary.ticks += 1;

            if tick % 100 == 0 {
                debug!("Tick {}: {} elements tracked", tick, self.tree.len());
            }
        }
        summary.elapsed = start.elapsed();
        summary.stats = self.tree.stats();
        summary
    }

    /// Advances every body and reports the moves to the tree.
    fn step(&mut self) -> MoveReport {
        let world = *self.tree.bounds();
        let notifier = self.tree.move_notifier();
        let mut report = MoveReport::default();

        for body in self.bodies.iter_mut().filter(|b| b.tracked) {
            let ahead = body.shape.translated(body.velocity).bounds();
            if ahead.x < world.x || ahead.right() > world.right() {
                body.velocity.x = -body.velocity.x;
            }
            if ahead.y < world.y || ahead.bottom() > world.bottom() {
                body.velocity.y = -body.velocity.y;
            }
            body.shape = body.shape.translated(body.velocity);

            if self.config.use_move_queue {
                notifier.notify_element(&*body);
            } else {
                report.record(self.tree.position_changed(&*body));
            }
        }

        if self.config.use_move_queue {
            report += self.tree.apply_pending_moves();
        }

        if report.dropped > 0 {
            for body in &mut self.bodies {
                body.tracked = body.tracked && self.tree.contains_element(body.id);
            }
        }
        report
    }

    /// Issues the per-tick queries and returns (region, segment) hit counts.
    fn probe(&mut self) -> (usize, usize) {
        let world = *self.tree.bounds();
        let mut region_hits = 0;
        for _ in 0..self.config.queries_per_tick {
            let center = self.random_point(&world);
            let region = Shape::from(Circle::new(center.x, center.y, self.config.query_radius));
            region_hits += self.tree.get_elements_within_region(&region).len();
        }

        let from = self.random_point(&world);
        let to = self.random_point(&world);
        let sight = LineSegment::new(from.x, from.y, to.x, to.y);
        let segment_hits = self.tree.get_elements_intersecting_line_segment(&sight).len();

        (region_hits, segment_hits)
    }

    fn spawn(&mut self, index: usize) -> Body {
        let world = *self.tree.bounds();
        let size = 1.0 + self.rng.f32() * (self.config.max_element_size - 1.0);
        let half = size / 2.0;
        let center = Vec2::new(
            half + self.rng.f32() * (world.width - size),
            half + self.rng.f32() * (world.height - size),
        );

        let shape = match index % 4 {
            0 => Shape::from(Circle::new(center.x, center.y, half)),
            1 => Shape::from(Rect::from_center(center.x, center.y, size, size * 0.6)),
            2 => Shape::from(Triangle::new(
                center + Vec2::new(-half, half),
                center + Vec2::new(half, half),
                center + Vec2::new(0.0, -half),
            )),
            _ => Shape::from(LineSegment::new(
                center.x - half,
                center.y,
                center.x + half,
                center.y + half / 2.0,
            )),
        };

        let speed = self.config.max_speed;
        let velocity = Vec2::new(
            (self.rng.f32() * 2.0 - 1.0) * speed,
            (self.rng.f32() * 2.0 - 1.0) * speed,
        );

        Body {
            id: ElementId::new(),
            shape,
            velocity,
            tracked: false,
        }
    }

    fn random_point(&mut self, world: &Rect) -> Vec2 {
        Vec2::new(
            world.x + self.rng.f32() * world.width,
            world.y + self.rng.f32() * world.height,
        )
    }
}
