use crate::cards::{Card, Color, Count, Shading, Shape};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of distinct cards: three values for each of four attributes.
pub const DECK_SIZE: usize = 81;

/// Cards are dealt and taken in groups of this size.
pub const SET_SIZE: usize = 3;

/// The face-down draw pile. Cards are drawn from the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 81 cards in enumeration order (count, shading, color, shape), unshuffled.
    ///
    /// ```
    /// use set_rs::deck::Deck;
    ///
    /// let deck = Deck::ordered();
    /// assert_eq!(deck.len(), 81);
    /// assert_eq!(deck.as_slice()[0].to_string(), "1srd");
    /// ```
    pub fn ordered() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &count in &Count::ALL {
            for &shading in &Shading::ALL {
                for &color in &Color::ALL {
                    for &shape in &Shape::ALL {
                        cards.push(Card::new(count, shading, color, shape));
                    }
                }
            }
        }
        Self { cards }
    }

    /// A full deck in uniformly random order.
    pub fn full<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.shuffle_with(rng);
        deck
    }

    /// Wrap cards as-is; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Rebuild the order by inserting each card at a uniformly chosen position
    /// among the cards placed so far. Card `i` has `i + 1` possible slots, so
    /// every permutation is equally likely.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut shuffled: Vec<Card> = Vec::with_capacity(self.cards.len());
        for card in self.cards.drain(..) {
            let pos = rng.random_range(0..=shuffled.len());
            shuffled.insert(pos, card);
        }
        self.cards = shuffled;
    }

    /// Draw a group of three. Returns `None` and leaves the deck untouched
    /// when fewer than three cards remain.
    pub fn draw_three(&mut self) -> Option<[Card; 3]> {
        if self.cards.len() < SET_SIZE {
            return None;
        }
        let c = self.cards.pop()?;
        let b = self.cards.pop()?;
        let a = self.cards.pop()?;
        Some([a, b, c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ordered_deck_has_81_distinct_cards() {
        let d = Deck::ordered();
        assert_eq!(d.len(), DECK_SIZE);
        let unique: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn ordered_deck_enumerates_shape_fastest() {
        let d = Deck::ordered();
        let first: Vec<String> = d.as_slice()[..4].iter().map(|c| c.to_string()).collect();
        assert_eq!(first, ["1srd", "1srs", "1sro", "1spd"]);
        assert_eq!(d.as_slice()[80].to_string(), "3bgo");
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::ordered();
        let mut d2 = Deck::ordered();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1.cards, Deck::ordered().cards);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let mut d = Deck::ordered();
        d.shuffle_seeded(7);
        let mut sorted = d.cards.clone();
        sorted.sort();
        let mut expected = Deck::ordered().cards;
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn shuffle_puts_first_card_anywhere() {
        // Over many seeds the first enumerated card should land in every third of the deck.
        let target = Deck::ordered().cards[0];
        let mut buckets = [0usize; 3];
        for seed in 0..300 {
            let mut d = Deck::ordered();
            d.shuffle_seeded(seed);
            let pos = d.cards.iter().position(|&c| c == target).unwrap();
            buckets[pos * 3 / DECK_SIZE] += 1;
        }
        assert!(buckets.iter().all(|&n| n > 50), "skewed buckets: {buckets:?}");
    }

    #[test]
    fn draw_three_takes_from_the_end() {
        let mut d = Deck::ordered();
        let tail: Vec<Card> = d.as_slice()[78..].to_vec();
        let drawn = d.draw_three().unwrap();
        assert_eq!(drawn.to_vec(), tail);
        assert_eq!(d.len(), 78);
    }

    #[test]
    fn drawing_keeps_deck_a_multiple_of_three() {
        let mut d = Deck::ordered();
        let mut groups = 0;
        while d.draw_three().is_some() {
            groups += 1;
            assert_eq!(d.len() % SET_SIZE, 0);
        }
        assert_eq!(groups, DECK_SIZE / SET_SIZE);
        assert!(d.is_empty());
    }

    #[test]
    fn draw_three_on_short_deck_is_none() {
        let mut d = Deck::from_cards(Deck::ordered().cards[..2].to_vec());
        assert!(d.draw_three().is_none());
        assert_eq!(d.len(), 2);
    }
}
