//! Set detection: the rule check for a single triple and the search over a table.

pub mod combinations;

pub use combinations::{combinations, Combinations3};

use crate::cards::{Card, Color, Count, Shading, Shape};

/// Three cards proposed or found as a set.
pub type Triple = [Card; 3];

fn attribute_ok(a: u8, b: u8, c: u8) -> bool {
    let all_same = a == b && b == c;
    let all_different = a != b && b != c && a != c;
    all_same || all_different
}

/// Whether three cards form a set: every attribute is either shared by all
/// three or different on each.
///
/// ```
/// use set_rs::cards::parse_cards;
/// use set_rs::detector::is_set;
///
/// let xs = parse_cards("1srd 2pgs 3bpo").unwrap();
/// assert!(is_set(&[xs[0], xs[1], xs[2]]));
/// ```
pub fn is_set(cards: &Triple) -> bool {
    let [a, b, c] = (*cards).map(Card::indices);
    (0..4).all(|i| attribute_ok(a[i], b[i], c[i]))
}

/// Every set among `cards`, each triple in table order.
pub fn find_sets(cards: &[Card]) -> Vec<Triple> {
    Combinations3::new(cards.len())
        .map(|[i, j, k]| [cards[i], cards[j], cards[k]])
        .filter(is_set)
        .collect()
}

/// Whether any set exists among `cards`; stops at the first one found.
pub fn has_set(cards: &[Card]) -> bool {
    Combinations3::new(cards.len()).any(|[i, j, k]| is_set(&[cards[i], cards[j], cards[k]]))
}

/// The unique card that completes a set with `a` and `b`.
///
/// Per attribute: equal values stay equal, different values take the third.
pub fn third_card(a: Card, b: Card) -> Card {
    let (x, y) = (a.indices(), b.indices());
    let pick = |i: usize| usize::from(if x[i] == y[i] { x[i] } else { 3 - x[i] - y[i] });
    Card::new(Count::ALL[pick(0)], Shading::ALL[pick(1)], Color::ALL[pick(2)], Shape::ALL[pick(3)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::deck::Deck;

    fn triple(s: &str) -> Triple {
        let xs = parse_cards(s).unwrap();
        [xs[0], xs[1], xs[2]]
    }

    #[test]
    fn all_same_but_one_attribute_is_a_set() {
        assert!(is_set(&triple("1srd 2srd 3srd")));
        assert!(is_set(&triple("1srd 1spd 1sgd")));
    }

    #[test]
    fn all_different_is_a_set() {
        assert!(is_set(&triple("1srd 2pps 3bgo")));
    }

    #[test]
    fn two_of_a_kind_is_not_a_set() {
        assert!(!is_set(&triple("1srd 1srd 2srd")));
        assert!(!is_set(&triple("1srd 2srd 3srs")));
        assert!(!is_set(&triple("1srd 2pps 3bgs")));
    }

    #[test]
    fn find_sets_single_hit() {
        let cards = parse_cards("1srd 2srd 3srd 1ppo").unwrap();
        let sets = find_sets(&cards);
        assert_eq!(sets, vec![[cards[0], cards[1], cards[2]]]);
    }

    #[test]
    fn find_sets_empty_when_only_two_values() {
        let cards = parse_cards("1srd 1srd 2srd").unwrap();
        assert!(find_sets(&cards).is_empty());
        assert!(!has_set(&cards));
    }

    #[test]
    fn find_sets_short_inputs() {
        assert!(find_sets(&[]).is_empty());
        let cards = parse_cards("1srd 2srd").unwrap();
        assert!(find_sets(&cards).is_empty());
    }

    #[test]
    fn find_sets_agrees_with_recursive_combinations() {
        let mut deck = Deck::ordered();
        deck.shuffle_seeded(11);
        let table = &deck.as_slice()[..15];
        let expected: Vec<Triple> = combinations(table, 3)
            .into_iter()
            .map(|v| [v[0], v[1], v[2]])
            .filter(is_set)
            .collect();
        assert_eq!(find_sets(table), expected);
        assert_eq!(has_set(table), !expected.is_empty());
    }

    #[test]
    fn third_card_takes_the_missing_value() {
        let xs = parse_cards("1srd 2pgs 3bpo 1srs").unwrap();
        assert_eq!(third_card(xs[0], xs[1]), xs[2]);
        assert_eq!(third_card(xs[0], xs[3]).to_string(), "1sro");
    }

    #[test]
    fn third_card_completes_every_pair() {
        let deck = Deck::ordered();
        let cards = deck.as_slice();
        for (i, &a) in cards.iter().enumerate() {
            for &b in &cards[i + 1..] {
                let c = third_card(a, b);
                assert_ne!(c, a);
                assert_ne!(c, b);
                assert!(is_set(&[a, b, c]));
            }
        }
    }

    #[test]
    fn full_deck_has_1080_sets() {
        assert_eq!(find_sets(Deck::ordered().as_slice()).len(), 1080);
    }
}
