use crate::cards::Card;

/// Face-up cards in slot order.
///
/// Each slot carries a flag telling whether its card arrived with the most
/// recent move, so a renderer can highlight new cards in place.
///
/// ```
/// use set_rs::cards::parse_cards;
/// use set_rs::table::Table;
///
/// let table = Table::new(parse_cards("1srd 2srd 3srd").unwrap());
/// assert_eq!(table.len(), 3);
/// assert!(table.fresh_slots().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    cards: Vec<Card>,
    fresh: Vec<bool>,
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl Eq for Table {}

impl Table {
    pub fn new(cards: Vec<Card>) -> Self {
        let fresh = vec![false; cards.len()];
        Self { cards, fresh }
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

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn position(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|c| c == card)
    }

    pub fn is_fresh(&self, slot: usize) -> bool {
        self.fresh.get(slot).copied().unwrap_or(false)
    }

    /// Slots whose card was placed by the most recent move.
    pub fn fresh_slots(&self) -> Vec<usize> {
        self.fresh.iter().enumerate().filter(|(_, &f)| f).map(|(i, _)| i).collect()
    }

    /// The table's cards with `taken` removed, order kept.
    pub fn without(&self, taken: &[Card]) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| !taken.contains(c)).collect()
    }

    pub(crate) fn clear_fresh(&mut self) {
        self.fresh.iter_mut().for_each(|f| *f = false);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.fresh.clear();
    }

    pub(crate) fn extend_fresh<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        for card in cards {
            self.cards.push(card);
            self.fresh.push(true);
        }
    }

    /// Put `card` into `slot`, keeping every other slot where it is.
    pub(crate) fn replace(&mut self, slot: usize, card: Card) -> Option<Card> {
        let old = std::mem::replace(self.cards.get_mut(slot)?, card);
        self.fresh[slot] = true;
        Some(old)
    }

    pub(crate) fn remove_all(&mut self, taken: &[Card]) {
        let mut kept = Vec::with_capacity(self.cards.len());
        let mut kept_fresh = Vec::with_capacity(self.cards.len());
        for (card, fresh) in self.cards.iter().zip(&self.fresh) {
            if !taken.contains(card) {
                kept.push(*card);
                kept_fresh.push(*fresh);
            }
        }
        self.cards = kept;
        self.fresh = kept_fresh;
    }
}
