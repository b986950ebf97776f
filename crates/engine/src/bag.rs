//! Color-bag generator for the tsumo queue.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tsumo_core::{Cell, ColorPair};

use crate::config::OpeningRule;

/// Copies of each color per refill.
const COPIES_PER_COLOR: usize = 2;

/// Deals pairs from a shuffled bag holding every palette color twice.
/// The opening pairs ignore the bag and draw from the reduced color subset.
#[derive(Clone, Debug)]
pub struct TsumoBag {
    rng: StdRng,
    palette: u8,
    opening: OpeningRule,
    pool: Vec<Cell>,
    dealt: u32,
}

impl TsumoBag {
    pub fn new(palette: u8, opening: OpeningRule, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            palette,
            opening,
            pool: Vec::with_capacity(palette as usize * COPIES_PER_COLOR),
            dealt: 0,
        }
    }

    pub fn next_pair(&mut self) -> ColorPair {
        let pair = if self.dealt < self.opening.pairs {
            let colors = self.opening.colors;
            ColorPair::new(
                self.rng.gen_range(1..=colors),
                self.rng.gen_range(1..=colors),
            )
        } else {
            let pivot = self.draw();
            let satellite = self.draw();
            ColorPair { pivot, satellite }
        };
        self.dealt += 1;
        pair
    }

    /// Pairs dealt so far.
    pub fn dealt(&self) -> u32 {
        self.dealt
    }

    fn draw(&mut self) -> Cell {
        if self.pool.is_empty() {
            self.refill();
        }
        self.pool.pop().unwrap_or(Cell::new(1))
    }

    fn refill(&mut self) {
        self.pool.clear();
        for id in 1..=self.palette {
            for _ in 0..COPIES_PER_COLOR {
                self.pool.push(Cell::new(id));
            }
        }
        self.pool.shuffle(&mut self.rng);
    }
}
