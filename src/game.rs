use crate::cards::Card;
use crate::codec;
use crate::config::Settings;
use crate::deck::{Deck, DECK_SIZE};
use crate::detector::{find_sets, has_set, is_set, Triple};
use crate::table::Table;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The table is topped up to at least this many cards while the deck lasts.
pub const TABLE_MIN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameState {
    /// No deck loaded yet.
    Empty,
    /// Below the minimum, or no set showing, with cards left to deal.
    Dealing,
    /// A set is showing on a full table, or the deck is used up.
    Stable,
    /// Deck exhausted and no set left on the table.
    Finished,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MoveError {
    #[error("no game in progress")]
    NotStarted,
    #[error("game is finished")]
    Finished,
    #[error("cards do not form a set")]
    NotASet,
    #[error("card {0} is not on the table")]
    NotOnTable(Card),
    #[error("card {0} appears more than once")]
    RepeatedCard(Card),
    #[error("a set is available; dealing more cards is not allowed")]
    SetAvailable,
    #[error("too many marked cards: {0}")]
    TooManyMarked(usize),
    #[error("hints are disabled")]
    HintsDisabled,
}

/// How the slots of a taken set were handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TakeOutcome {
    /// Each taken card was replaced from the deck in its own slot.
    Replaced,
    /// The taken cards were removed and the table shrank by three.
    Removed,
}

/// Result of a hint request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Hint {
    /// A card that, together with the marked cards, belongs to a set.
    Card(Card),
    /// No set was showing, so three more cards were dealt.
    Dealt,
    /// The marked cards are not part of any set on the table.
    NoMatch,
    /// No set on the table and nothing left to deal.
    NoSet,
}

/// Read-only view of a game for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Snapshot {
    pub deck_len: usize,
    pub table: Vec<Card>,
    /// Slots filled by the most recent move.
    pub fresh: Vec<usize>,
    pub sets: Vec<Triple>,
    pub finished: bool,
}

impl Snapshot {
    /// Cards no longer in the deck, out of 81.
    pub fn progress(&self) -> usize {
        DECK_SIZE - self.deck_len
    }
}

/// A single game session: the deck, the table and the sets showing on it.
///
/// ```
/// use set_rs::config::Settings;
/// use set_rs::game::{Game, GameState, TABLE_MIN};
///
/// let game = Game::new(Settings::default().with_seed(3));
/// assert_eq!(game.state(), GameState::Stable);
/// assert!(game.table().len() >= TABLE_MIN);
/// assert!(!game.sets().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    rng: ChaCha8Rng,
    deck: Deck,
    table: Table,
    sets: Vec<Triple>,
    loaded: bool,
}

impl Game {
    /// A session with no deck loaded. Call [`Game::new_game`] to start.
    pub fn empty(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            settings,
            rng: ChaCha8Rng::seed_from_u64(seed),
            deck: Deck::from_cards(Vec::new()),
            table: Table::default(),
            sets: Vec::new(),
            loaded: false,
        }
    }

    /// A fresh shuffled game, dealt.
    pub fn new(settings: Settings) -> Self {
        let mut game = Self::empty(settings);
        game.new_game();
        game
    }

    /// Resume from a saved deck and table, dealing if the table needs it.
    pub fn restore(deck: Deck, table: Table, settings: Settings) -> Self {
        let mut game = Self::empty(settings);
        game.deck = deck;
        game.table = table;
        game.loaded = true;
        game.refill();
        debug!("restored game: deck {} table {}", game.deck.len(), game.table.len());
        game
    }

    /// Discard the current game and start over with a full shuffled deck.
    pub fn new_game(&mut self) {
        self.deck = Deck::full(&mut self.rng);
        self.table.clear();
        self.sets.clear();
        self.loaded = true;
        info!("new game");
        self.refill();
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap settings; takes effect on the next deal.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Sets currently showing, in table order.
    pub fn sets(&self) -> &[Triple] {
        &self.sets
    }

    pub fn state(&self) -> GameState {
        if !self.loaded {
            return GameState::Empty;
        }
        if self.deck.is_empty() && self.sets.is_empty() {
            return GameState::Finished;
        }
        if self.deck.is_empty() || (self.table.len() >= TABLE_MIN && !self.sets.is_empty()) {
            GameState::Stable
        } else {
            GameState::Dealing
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state(), GameState::Finished)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            deck_len: self.deck.len(),
            table: self.table.as_slice().to_vec(),
            fresh: self.table.fresh_slots(),
            sets: self.sets.clone(),
            finished: self.is_finished(),
        }
    }

    /// The serialized `(deck, table)` pair.
    pub fn dump(&self) -> String {
        codec::dump(&self.deck, &self.table)
    }

    /// Deal threes until the table holds the minimum and, with auto-deal on,
    /// shows a set. Returns the number of cards dealt.
    pub fn deal(&mut self) -> usize {
        if !self.loaded {
            return 0;
        }
        self.table.clear_fresh();
        self.refill()
    }

    fn refill(&mut self) -> usize {
        let mut dealt = 0;
        self.sets = find_sets(self.table.as_slice());
        while self.needs_cards() {
            let Some(three) = self.deck.draw_three() else {
                break;
            };
            self.table.extend_fresh(three);
            self.sets = find_sets(self.table.as_slice());
            dealt += three.len();
        }
        if dealt > 0 {
            debug!(
                "dealt {dealt}: table {} deck {} sets {}",
                self.table.len(),
                self.deck.len(),
                self.sets.len()
            );
        }
        dealt
    }

    fn needs_cards(&self) -> bool {
        !self.deck.is_empty()
            && (self.table.len() < TABLE_MIN || (self.settings.auto_deal && self.sets.is_empty()))
    }

    fn ensure_playable(&self) -> Result<(), MoveError> {
        match self.state() {
            GameState::Empty => Err(MoveError::NotStarted),
            GameState::Finished => Err(MoveError::Finished),
            _ => Ok(()),
        }
    }

    /// Check that `cards` is a set of three distinct cards lying on the table.
    pub fn validate_take(&self, cards: &Triple) -> Result<(), MoveError> {
        self.ensure_playable()?;
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(MoveError::RepeatedCard(*card));
            }
            if !self.table.contains(card) {
                return Err(MoveError::NotOnTable(*card));
            }
        }
        if !is_set(cards) {
            return Err(MoveError::NotASet);
        }
        Ok(())
    }

    /// Take a set off the table.
    ///
    /// While the deck lasts, the taken cards are replaced in their own slots
    /// if the table is at the minimum or nothing would be left to find;
    /// otherwise the table shrinks by three. The table is then topped up.
    /// A rejected move leaves the game untouched.
    pub fn take_set(&mut self, cards: Triple) -> Result<TakeOutcome, MoveError> {
        self.validate_take(&cards)?;
        let remaining = self.table.without(&cards);
        let replace = !self.deck.is_empty()
            && (self.table.len() <= TABLE_MIN || !has_set(&remaining));

        let mut slots = [0; 3];
        for (slot, card) in slots.iter_mut().zip(&cards) {
            *slot = self.table.position(card).ok_or(MoveError::NotOnTable(*card))?;
        }

        self.table.clear_fresh();
        let drawn = if replace { self.deck.draw_three() } else { None };
        let outcome = match drawn {
            Some(drawn) => {
                for (slot, new) in slots.into_iter().zip(drawn) {
                    self.table.replace(slot, new);
                }
                TakeOutcome::Replaced
            }
            None => {
                self.table.remove_all(&cards);
                TakeOutcome::Removed
            }
        };
        debug!("took {} {} {}: {outcome:?}", cards[0], cards[1], cards[2]);
        self.refill();
        if self.is_finished() {
            info!("game finished with {} cards on the table", self.table.len());
        }
        Ok(outcome)
    }

    /// Manually deal three more cards.
    ///
    /// A no-op returning `Ok(false)` when the deck is empty. Refused with
    /// [`MoveError::SetAvailable`] when the table is at the minimum and a set
    /// is already showing.
    pub fn add_three(&mut self) -> Result<bool, MoveError> {
        if !self.loaded {
            return Err(MoveError::NotStarted);
        }
        if self.deck.is_empty() {
            return Ok(false);
        }
        if self.table.len() >= TABLE_MIN && !self.sets.is_empty() {
            return Err(MoveError::SetAvailable);
        }
        let Some(three) = self.deck.draw_three() else {
            return Ok(false);
        };
        self.table.clear_fresh();
        self.table.extend_fresh(three);
        self.sets = find_sets(self.table.as_slice());
        debug!("added three: table {} sets {}", self.table.len(), self.sets.len());
        Ok(true)
    }

    /// Point at one more card of a set containing every `marked` card.
    ///
    /// With auto-deal off and no set showing, deals three cards instead.
    pub fn hint(&mut self, marked: &[Card]) -> Result<Hint, MoveError> {
        if !self.settings.hints {
            return Err(MoveError::HintsDisabled);
        }
        if marked.len() >= 3 {
            return Err(MoveError::TooManyMarked(marked.len()));
        }
        self.ensure_playable()?;
        if self.sets.is_empty() {
            if !self.settings.auto_deal && self.add_three()? {
                return Ok(Hint::Dealt);
            }
            return Ok(Hint::NoSet);
        }
        let candidates: Vec<&Triple> =
            self.sets.iter().filter(|set| marked.iter().all(|m| set.contains(m))).collect();
        if candidates.is_empty() {
            return Ok(Hint::NoMatch);
        }
        let set = candidates[self.rng.random_range(0..candidates.len())];
        let unmarked: Vec<Card> = set.iter().copied().filter(|c| !marked.contains(c)).collect();
        Ok(Hint::Card(unmarked[self.rng.random_range(0..unmarked.len())]))
    }
}
