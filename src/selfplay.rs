//! Self-play driver that checks the table invariants after every move.
//!
//! Violations are diagnostics for engine bugs: they are logged and collected
//! in the report, never returned as errors.

use crate::agents::{RandomAgent, SetAgent};
use crate::cards::Card;
use crate::deck::{DECK_SIZE, SET_SIZE};
use crate::detector::{find_sets, has_set, Triple};
use crate::engine::SetEngine;
use crate::game::{GameState, MoveError, TakeOutcome, TABLE_MIN};
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// A game can never need more takes than this.
pub const MAX_TAKES: usize = DECK_SIZE / SET_SIZE;

const PAUSE_SLICE: Duration = Duration::from_millis(10);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Violation {
    #[error("deck holds {0} cards, not a multiple of 3")]
    DeckLength(usize),
    #[error("table holds {0} cards, not a multiple of 3")]
    TableLength(usize),
    #[error("table holds {0} cards while the deck is not empty")]
    TableTooSmall(usize),
    #[error("no set on the table while the deck is not empty")]
    NoSetWithDeck,
    #[error("reported sets differ from the sets on the table")]
    StaleSets,
    #[error("expected {expected:?} after take, got {actual:?}")]
    Outcome { expected: TakeOutcome, actual: TakeOutcome },
    #[error("slot {0} was not refilled with a new card")]
    SlotNotRefilled(usize),
    #[error("slot {0} changed although its card was not taken")]
    SlotDisturbed(usize),
    #[error("cards dealt although a set remained: table {before} -> {after}")]
    RedundantDeal { before: usize, after: usize },
    #[error("move rejected: {0}")]
    Rejected(MoveError),
    #[error("agent had no move while sets were showing")]
    NoChoice,
    #[error("game not finished after {0} takes")]
    TooManyTakes(usize),
}

/// Summary of one self-play run.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct SelfPlayReport {
    /// Sets taken.
    pub takes: usize,
    /// Manual three-card deals.
    pub added: usize,
    pub finished: bool,
    pub cancelled: bool,
    /// Violations with the number of takes made when each was found.
    pub violations: Vec<(usize, Violation)>,
    pub final_state: String,
}

impl SelfPlayReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Drives an agent through whole games.
///
/// ```
/// use set_rs::config::Settings;
/// use set_rs::game::Game;
/// use set_rs::selfplay::SelfPlay;
/// use std::sync::atomic::AtomicBool;
///
/// let mut game = Game::new(Settings::default().with_seed(1));
/// let report = SelfPlay::random(Some(1)).run(&mut game, &AtomicBool::new(false));
/// assert!(report.finished);
/// assert!(report.is_clean());
/// ```
pub struct SelfPlay<A: SetAgent> {
    agent: A,
    move_delay: Duration,
}

impl SelfPlay<RandomAgent> {
    pub fn random(seed: Option<u64>) -> Self {
        Self::new(RandomAgent::new(seed))
    }
}

impl<A: SetAgent> SelfPlay<A> {
    pub fn new(agent: A) -> Self {
        Self { agent, move_delay: Duration::ZERO }
    }

    /// Pause between moves so a renderer can show intermediate tables.
    pub fn with_move_delay(mut self, delay: Duration) -> Self {
        self.move_delay = delay;
        self
    }

    /// Play until the game finishes or `stop` is raised. `stop` is checked
    /// between moves and while pausing; a move in progress always completes.
    pub fn run(&mut self, engine: &mut dyn SetEngine, stop: &AtomicBool) -> SelfPlayReport {
        let mut report = SelfPlayReport::default();
        record(&mut report, check_invariants(engine));
        loop {
            if stop.load(Ordering::Relaxed) {
                info!("self-play cancelled after {} takes", report.takes);
                report.cancelled = true;
                break;
            }
            if matches!(engine.state(), GameState::Finished | GameState::Empty) {
                break;
            }
            if report.takes >= MAX_TAKES {
                let takes = report.takes;
                record(&mut report, vec![Violation::TooManyTakes(takes)]);
                break;
            }
            if !self.step(engine, &mut report) {
                break;
            }
            if engine.state() != GameState::Finished {
                self.pause(stop);
            }
        }
        report.finished = matches!(engine.state(), GameState::Finished);
        report.final_state = engine.dump();
        if report.finished {
            info!(
                "self-play finished: {} takes, {} cards left, {} violations",
                report.takes,
                engine.table().len(),
                report.violations.len()
            );
        }
        report
    }

    /// Wait out the move delay in short slices, returning early once `stop`
    /// is raised.
    fn pause(&self, stop: &AtomicBool) {
        let mut left = self.move_delay;
        while !left.is_zero() && !stop.load(Ordering::Relaxed) {
            let slice = left.min(PAUSE_SLICE);
            thread::sleep(slice);
            left -= slice;
        }
    }

    /// One move: a manual deal when no set shows, otherwise a take.
    /// Returns false when play cannot continue.
    fn step(&mut self, engine: &mut dyn SetEngine, report: &mut SelfPlayReport) -> bool {
        if engine.sets().is_empty() {
            return match engine.add_three() {
                Ok(true) => {
                    report.added += 1;
                    record(report, check_invariants(engine));
                    true
                }
                Ok(false) => false,
                Err(e) => {
                    record(report, vec![Violation::Rejected(e)]);
                    false
                }
            };
        }
        let Some(triple) = self.agent.choose(engine) else {
            record(report, vec![Violation::NoChoice]);
            return false;
        };
        let before = engine.table().to_vec();
        let deck_before = engine.deck_len();
        match engine.take_set(triple) {
            Ok(outcome) => {
                report.takes += 1;
                debug!("take {}: {outcome:?}, table {}", report.takes, engine.table().len());
                let mut found = check_take(&before, deck_before, &triple, outcome, engine);
                found.extend(check_invariants(engine));
                record(report, found);
                true
            }
            Err(e) => {
                record(report, vec![Violation::Rejected(e)]);
                false
            }
        }
    }
}

fn record(report: &mut SelfPlayReport, found: Vec<Violation>) {
    for v in found {
        error!("invariant violated after {} takes: {v}", report.takes);
        report.violations.push((report.takes, v));
    }
}

/// Invariants that hold between any two moves.
pub fn check_invariants(engine: &dyn SetEngine) -> Vec<Violation> {
    let mut found = Vec::new();
    let deck_len = engine.deck_len();
    let table = engine.table();
    if deck_len % SET_SIZE != 0 {
        found.push(Violation::DeckLength(deck_len));
    }
    if table.len() % SET_SIZE != 0 {
        found.push(Violation::TableLength(table.len()));
    }
    if deck_len > 0 && table.len() < TABLE_MIN {
        found.push(Violation::TableTooSmall(table.len()));
    }
    if deck_len > 0 && engine.settings().auto_deal && engine.sets().is_empty() {
        found.push(Violation::NoSetWithDeck);
    }
    if find_sets(table) != engine.sets() {
        found.push(Violation::StaleSets);
    }
    found
}

/// Check how the taken slots were handled against the table before the move.
pub fn check_take(
    before: &[Card],
    deck_before: usize,
    taken: &Triple,
    outcome: TakeOutcome,
    engine: &dyn SetEngine,
) -> Vec<Violation> {
    let mut found = Vec::new();
    let after = engine.table();
    let remaining: Vec<Card> = before.iter().copied().filter(|c| !taken.contains(c)).collect();
    let remaining_has_set = has_set(&remaining);
    let expected = if deck_before > 0 && (before.len() <= TABLE_MIN || !remaining_has_set) {
        TakeOutcome::Replaced
    } else {
        TakeOutcome::Removed
    };
    if expected != outcome {
        found.push(Violation::Outcome { expected, actual: outcome });
        return found;
    }
    match outcome {
        TakeOutcome::Replaced => {
            let fresh = engine.fresh_slots();
            for (slot, card) in before.iter().enumerate() {
                let now = after.get(slot);
                if taken.contains(card) {
                    let refilled = now.is_some_and(|c| !before.contains(c));
                    if !refilled || !fresh.contains(&slot) {
                        found.push(Violation::SlotNotRefilled(slot));
                    }
                } else if now != Some(card) {
                    found.push(Violation::SlotDisturbed(slot));
                }
            }
        }
        TakeOutcome::Removed => {
            let moved = (0..remaining.len()).find(|&i| after.get(i) != Some(&remaining[i]));
            if let Some(slot) = moved {
                found.push(Violation::SlotDisturbed(slot));
            }
            if before.len() > TABLE_MIN && remaining_has_set && after.len() > remaining.len() {
                found.push(Violation::RedundantDeal { before: before.len(), after: after.len() });
            }
        }
    }
    found
}
