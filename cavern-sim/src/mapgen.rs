//! Random cavern generation.
//!
//! A grid is carved with random walks from its centre, then every carved
//! cell becomes a node and 4-adjacent carved cells are joined by edges of
//! random length. The carve keeps every cell connected to the centre, so the
//! resulting graph is connected.

use cavern_core::{Cavern, NodeId, Point, Range, Tile};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::error::{Result, SimError};

/// Trait for choosing a random neighbor during random-walk carving.
pub trait RandomWalker {
    /// Given a position `p`, return a random neighbor using `rng`.
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point;
}

/// A simple 4-directional random walker.
pub struct FourDirectionWalker;

impl RandomWalker for FourDirectionWalker {
    fn neighbor(&self, p: Point, rng: &mut impl Rng) -> Point {
        p.neighbors_4()[rng.random_range(0..4usize)]
    }
}

/// A generated cavern and its points of interest.
#[derive(Clone, Debug)]
pub struct Layout {
    pub cavern: Cavern,
    /// Where the search for the orb starts (the carve origin).
    pub entrance: NodeId,
    pub orb: NodeId,
    pub exit: NodeId,
    /// Seed the layout was generated from.
    pub seed: u64,
}

/// Open/closed cell mask over a grid rectangle.
pub struct MapGen<R: Rng> {
    pub rng: R,
    bounds: Range,
    open: Vec<bool>,
}

impl<R: Rng> MapGen<R> {
    /// Create a generator over `bounds` with every cell closed.
    pub fn new(bounds: Range, rng: R) -> Self {
        Self {
            rng,
            bounds,
            open: vec![false; bounds.len()],
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let q = p - self.bounds.min;
        Some(q.y as usize * self.bounds.width() as usize + q.x as usize)
    }

    /// Whether `p` has been carved.
    pub fn is_open(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.open[i])
    }

    /// Number of carved cells.
    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    /// Carve a cave using random walks.
    ///
    /// Starting from the centre of the grid, perform up to `walks` random
    /// walks until the carved proportion reaches `fill_pct` of the area.
    /// Returns the number of cells carved.
    pub fn random_walk_cave(&mut self, walker: &impl RandomWalker, fill_pct: f64, walks: usize) -> usize {
        let total = self.bounds.len();
        let target = ((total as f64 * fill_pct) as usize).max(1);
        let start = self.bounds.center();
        let mut carved = 0usize;

        for _ in 0..walks {
            let mut pos = start;
            let step_limit = total * 4; // safety limit per walk

            for _ in 0..step_limit {
                if carved >= target {
                    return carved;
                }

                if let Some(i) = self.idx(pos) {
                    if !self.open[i] {
                        self.open[i] = true;
                        carved += 1;
                    }
                }

                // Walk to a neighbor, clamped to bounds.
                let next = walker.neighbor(pos, &mut self.rng);
                if self.bounds.contains(next) {
                    pos = next;
                }
            }
        }

        carved
    }

    /// Turn the carved cells into a graph: one node per cell, one edge per
    /// pair of 4-adjacent cells with a length drawn from
    /// `1..=max_edge_length`. Returns the cavern and the per-cell node ids.
    pub fn build(&mut self, max_edge_length: u32) -> Result<(Cavern, Vec<Option<NodeId>>)> {
        let mut cavern = Cavern::with_capacity(self.open_count());
        let mut ids = vec![None; self.open.len()];

        for (i, slot) in ids.iter_mut().enumerate() {
            if self.open[i] {
                *slot = Some(cavern.add_node(Tile::new(self.point(i), 0)));
            }
        }

        for i in 0..ids.len() {
            let Some(a) = ids[i] else {
                continue;
            };
            let p = self.point(i);
            for q in [p.shift(1, 0), p.shift(0, 1)] {
                if let Some(b) = self.idx(q).and_then(|j| ids[j]) {
                    let length = self.rng.random_range(1..=max_edge_length);
                    cavern.connect(a, b, length)?;
                }
            }
        }

        Ok((cavern, ids))
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32) + self.bounds.min
    }
}

/// Generate a cavern as described by `config`.
///
/// The entrance is the carve origin; the orb and the exit are distinct
/// random tiles other than the entrance. Gold is scattered with probability
/// `gold_chance` over every tile but the orb, where the escape starts, and
/// the exit, where it ends.
pub fn generate(config: &SimConfig) -> Result<Layout> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("generating a {}x{} cavern with seed {seed}", config.width, config.height);

    let bounds = Range::new(0, 0, config.width, config.height);
    let mut mapgen = MapGen::new(bounds, StdRng::seed_from_u64(seed));
    let carved = mapgen.random_walk_cave(&FourDirectionWalker, config.fill, config.walks);
    if carved < 3 {
        return Err(SimError::TooSmall { carved });
    }

    let (mut cavern, ids) = mapgen.build(config.max_edge_length)?;
    let entrance = mapgen
        .idx(bounds.center())
        .and_then(|i| ids[i])
        .ok_or(SimError::TooSmall { carved })?;

    let others: Vec<NodeId> = cavern.nodes().filter(|&n| n != entrance).collect();
    let rng = &mut mapgen.rng;
    let orb = others[rng.random_range(0..others.len())];
    let exit = loop {
        let n = others[rng.random_range(0..others.len())];
        if n != orb {
            break n;
        }
    };

    for &n in &others {
        if n != exit && n != orb && rng.random_bool(config.gold_chance) {
            cavern.set_gold(n, rng.random_range(1..=config.max_gold))?;
        }
    }

    debug!(
        "{} tiles, {} edges, {} gold; entrance {entrance}, orb {orb}, exit {exit}",
        cavern.len(),
        cavern.edge_count(),
        cavern.total_gold()
    );

    Ok(Layout {
        cavern,
        entrance,
        orb,
        exit,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_paths::dijkstra;

    fn seeded(seed: u64) -> SimConfig {
        SimConfig {
            width: 24,
            height: 12,
            seed: Some(seed),
            ..SimConfig::default()
        }
    }

    #[test]
    fn random_walk_carves_cells() {
        let mut mg = MapGen::new(Range::new(0, 0, 20, 20), StdRng::seed_from_u64(1));
        let carved = mg.random_walk_cave(&FourDirectionWalker, 0.4, 10);
        assert!(carved > 0);
        assert_eq!(mg.open_count(), carved);
        assert!(mg.is_open(Point::new(10, 10)));
        assert!(!mg.is_open(Point::new(-1, 0)));
    }

    #[test]
    fn offset_bounds_map_cells_back_to_points() {
        let mut mg = MapGen::new(Range::new(-3, 5, 2, 9), StdRng::seed_from_u64(2));
        mg.random_walk_cave(&FourDirectionWalker, 1.0, 200);
        let (cavern, _) = mg.build(1).unwrap();
        assert_eq!(cavern.len(), 20);
        for n in cavern.nodes() {
            let pos = cavern.tile(n).unwrap().pos;
            assert!(Range::new(-3, 5, 2, 9).contains(pos), "{pos}");
            assert!(mg.is_open(pos));
        }
        assert!(!mg.is_open(Point::new(2, 5)));
    }

    #[test]
    fn build_joins_adjacent_cells() {
        let mut mg = MapGen::new(Range::new(0, 0, 3, 1), StdRng::seed_from_u64(5));
        mg.random_walk_cave(&FourDirectionWalker, 1.0, 50);
        let (cavern, ids) = mg.build(3).unwrap();
        assert_eq!(cavern.len(), 3);
        assert_eq!(cavern.edge_count(), 2);
        let (a, b) = (ids[0].unwrap(), ids[1].unwrap());
        let length = cavern.edge(a, b).unwrap().length;
        assert!((1..=3).contains(&length));
    }

    #[test]
    fn generated_cavern_is_connected() {
        for seed in 0..8 {
            let layout = generate(&seeded(seed)).unwrap();
            let ledger = dijkstra(&layout.cavern, layout.entrance, None);
            assert_eq!(ledger.len(), layout.cavern.len(), "seed {seed}");
        }
    }

    #[test]
    fn points_of_interest_are_distinct() {
        for seed in 0..8 {
            let layout = generate(&seeded(seed)).unwrap();
            assert_ne!(layout.entrance, layout.orb);
            assert_ne!(layout.entrance, layout.exit);
            assert_ne!(layout.orb, layout.exit);
            assert_eq!(layout.cavern.tile(layout.exit).map(|t| t.gold), Some(0));
        }
    }

    #[test]
    fn no_gold_where_the_escape_starts() {
        let config = SimConfig {
            gold_chance: 1.0,
            ..seeded(0)
        };
        for seed in 0..8 {
            let layout = generate(&SimConfig {
                seed: Some(seed),
                ..config.clone()
            })
            .unwrap();
            assert_eq!(layout.cavern.tile(layout.orb).map(|t| t.gold), Some(0));
            assert!(layout.cavern.total_gold() > 0);
        }
    }

    #[test]
    fn same_seed_same_cavern() {
        let a = generate(&seeded(42)).unwrap();
        let b = generate(&seeded(42)).unwrap();
        assert_eq!(a.seed, 42);
        assert_eq!(a.cavern.len(), b.cavern.len());
        assert_eq!(a.cavern.total_gold(), b.cavern.total_gold());
        assert_eq!((a.orb, a.exit), (b.orb, b.exit));
        for n in a.cavern.nodes() {
            assert_eq!(a.cavern.exits(n), b.cavern.exits(n));
        }
    }

    #[test]
    fn tiny_fill_is_too_small() {
        let config = SimConfig {
            width: 2,
            height: 2,
            fill: 0.25,
            seed: Some(1),
            ..SimConfig::default()
        };
        assert!(matches!(generate(&config), Err(SimError::TooSmall { carved: 1 })));
    }
}
