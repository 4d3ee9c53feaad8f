//! Compact state strings for storage and share links.
//!
//! Format: `<base64(deck bytes)>_<base64(table bytes)>`, one byte per card in
//! the packed layout of [`Card::to_byte`]. Standard base64 never produces `_`,
//! so the separator is unambiguous.

use crate::cards::{Card, CardError};
use crate::deck::{Deck, DECK_SIZE, SET_SIZE};
use crate::table::Table;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashSet;

pub const SEPARATOR: char = '_';

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("expected 2 parts separated by '_', got {0}")]
    Parts(usize),
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("{part} holds {len} cards, not a multiple of 3")]
    Length { part: &'static str, len: usize },
    #[error("deck holds {0} cards, more than 81")]
    TooManyCards(usize),
    #[error("card {0} appears more than once")]
    Duplicate(Card),
}

fn encode(cards: &[Card]) -> String {
    let bytes: Vec<u8> = cards.iter().map(|c| c.to_byte()).collect();
    STANDARD.encode(bytes)
}

fn decode(part: &'static str, text: &str) -> Result<Vec<Card>, StateError> {
    let bytes = STANDARD.decode(text)?;
    let cards = bytes.into_iter().map(Card::from_byte).collect::<Result<Vec<_>, _>>()?;
    if cards.len() % SET_SIZE != 0 {
        return Err(StateError::Length { part, len: cards.len() });
    }
    Ok(cards)
}

/// Serialize a deck and table.
///
/// ```
/// use set_rs::codec::{dump, load};
/// use set_rs::deck::Deck;
/// use set_rs::table::Table;
///
/// let deck = Deck::ordered();
/// let state = dump(&deck, &Table::default());
/// let (back, table) = load(&state).unwrap();
/// assert_eq!(back, deck);
/// assert!(table.is_empty());
/// ```
pub fn dump(deck: &Deck, table: &Table) -> String {
    format!("{}{SEPARATOR}{}", encode(deck.as_slice()), encode(table.as_slice()))
}

/// Parse a state string produced by [`dump`].
pub fn load(state: &str) -> Result<(Deck, Table), StateError> {
    let parts: Vec<&str> = state.trim().split(SEPARATOR).collect();
    let &[deck_part, table_part] = parts.as_slice() else {
        return Err(StateError::Parts(parts.len()));
    };
    let deck = decode("deck", deck_part)?;
    let table = decode("table", table_part)?;
    if deck.len() > DECK_SIZE {
        return Err(StateError::TooManyCards(deck.len()));
    }
    let mut seen = HashSet::with_capacity(deck.len() + table.len());
    for card in deck.iter().chain(&table) {
        if !seen.insert(*card) {
            return Err(StateError::Duplicate(*card));
        }
    }
    Ok((Deck::from_cards(deck), Table::new(table)))
}
