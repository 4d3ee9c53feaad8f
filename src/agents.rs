//! Agents: pluggable set finders (random self-play, or a human selecting cards
//! through some frontend).
//!
//! An agent only proposes a triple; the driver validates and applies it
//! through [`SetEngine`], so frontends stay thin.

use crate::cards::Card;
use crate::detector::{is_set, Triple};
use crate::engine::SetEngine;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait SetAgent {
    /// Propose a set to take from the current table, if the agent has one.
    fn choose(&mut self, engine: &dyn SetEngine) -> Option<Triple>;
}

/// Picks one of the sets showing, uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SetAgent for RandomAgent {
    fn choose(&mut self, engine: &dyn SetEngine) -> Option<Triple> {
        let sets = engine.sets();
        if sets.is_empty() {
            return None;
        }
        Some(sets[self.rng.random_range(0..sets.len())])
    }
}

/// Accumulates cards a player marks on the table. Once three are marked the
/// selection is cleared and, if the three form a set, offered as a move.
#[derive(Debug, Clone, Default)]
pub struct SelectionAgent {
    marked: Vec<Card>,
    pending: Option<Triple>,
}

impl SelectionAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marked(&self) -> &[Card] {
        &self.marked
    }

    /// Mark or unmark a card. Returns `Some(true)` when the third mark
    /// completed a set, `Some(false)` when it did not, `None` otherwise.
    pub fn toggle(&mut self, card: Card) -> Option<bool> {
        if let Some(pos) = self.marked.iter().position(|&c| c == card) {
            self.marked.remove(pos);
            return None;
        }
        self.marked.push(card);
        let &[a, b, c] = self.marked.as_slice() else {
            return None;
        };
        self.marked.clear();
        let triple = [a, b, c];
        if is_set(&triple) {
            self.pending = Some(triple);
            Some(true)
        } else {
            Some(false)
        }
    }
}

impl SetAgent for SelectionAgent {
    fn choose(&mut self, engine: &dyn SetEngine) -> Option<Triple> {
        let triple = self.pending.take()?;
        triple.iter().all(|c| engine.table().contains(c)).then_some(triple)
    }
}
