// Game engine API boundary. Renderers and agents drive a game through this
// trait so they never touch deck or table internals. Implemented for the core
// `Game` type.

use crate::cards::Card;
use crate::config::Settings;
use crate::detector::Triple;
use crate::game::{Game, GameState, Hint, MoveError, Snapshot, TakeOutcome};

pub trait SetEngine {
    // Lifecycle
    fn new_game(&mut self);

    // Moves
    fn deal(&mut self) -> usize;
    fn take_set(&mut self, cards: Triple) -> Result<TakeOutcome, MoveError>;
    fn add_three(&mut self) -> Result<bool, MoveError>;
    fn hint(&mut self, marked: &[Card]) -> Result<Hint, MoveError>;

    // Queries
    fn state(&self) -> GameState;
    fn deck_len(&self) -> usize;
    fn table(&self) -> &[Card];
    fn fresh_slots(&self) -> Vec<usize>;
    fn sets(&self) -> &[Triple];
    fn settings(&self) -> &Settings;
    fn snapshot(&self) -> Snapshot;
    fn dump(&self) -> String;
}

impl SetEngine for Game {
    fn new_game(&mut self) {
        self.new_game();
    }

    fn deal(&mut self) -> usize {
        self.deal()
    }
    fn take_set(&mut self, cards: Triple) -> Result<TakeOutcome, MoveError> {
        self.take_set(cards)
    }
    fn add_three(&mut self) -> Result<bool, MoveError> {
        self.add_three()
    }
    fn hint(&mut self, marked: &[Card]) -> Result<Hint, MoveError> {
        self.hint(marked)
    }

    fn state(&self) -> GameState {
        self.state()
    }
    fn deck_len(&self) -> usize {
        self.deck().len()
    }
    fn table(&self) -> &[Card] {
        Game::table(self).as_slice()
    }
    fn fresh_slots(&self) -> Vec<usize> {
        Game::table(self).fresh_slots()
    }
    fn sets(&self) -> &[Triple] {
        self.sets()
    }
    fn settings(&self) -> &Settings {
        self.settings()
    }
    fn snapshot(&self) -> Snapshot {
        self.snapshot()
    }
    fn dump(&self) -> String {
        self.dump()
    }
}
