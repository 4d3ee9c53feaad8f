use set_rs::cards::{Card, CardError};
use set_rs::deck::Deck;
use set_rs::detector::{find_sets, is_set};
use proptest::prelude::*;
use std::str::FromStr;

fn any_card() -> impl Strategy<Value = Card> {
    (0u8..3, 0u8..3, 0u8..3, 0u8..3)
        .prop_map(|(a, b, c, d)| Card::from_indices([a, b, c, d]).unwrap())
}

/// All-same or all-different per attribute, via the sum of indices mod 3.
fn set_by_sum(cards: &[Card; 3]) -> bool {
    let [a, b, c] = (*cards).map(Card::indices);
    (0..4).all(|i| (a[i] + b[i] + c[i]) % 3 == 0)
}

#[test]
fn every_card_round_trips_through_byte_and_text() {
    for &card in Deck::ordered().as_slice() {
        assert_eq!(Card::from_byte(card.to_byte()).unwrap(), card);
        assert_eq!(Card::from_str(&card.to_string()).unwrap(), card);
    }
}

#[test]
fn bytes_are_distinct_and_below_0xab() {
    let mut bytes: Vec<u8> = Deck::ordered().as_slice().iter().map(|c| c.to_byte()).collect();
    bytes.sort_unstable();
    bytes.dedup();
    assert_eq!(bytes.len(), 81);
    assert_eq!(bytes.last().copied(), Some(0b10_10_10_10));
}

#[test]
fn only_in_range_bytes_decode() {
    let valid = (0u16..=255).filter(|&b| Card::from_byte(b as u8).is_ok()).count();
    assert_eq!(valid, 81);
    assert!(matches!(Card::from_byte(0xFF), Err(CardError::Index { .. })));
}

#[test]
fn four_card_example_has_one_set() {
    let cards = set_rs::cards::parse_cards("1srd 2srd 3srd 1ppo").unwrap();
    assert_eq!(find_sets(&cards), vec![[cards[0], cards[1], cards[2]]]);
}

#[test]
fn two_distinct_counts_is_not_a_set() {
    let cards = set_rs::cards::parse_cards("1srd 1srd 2srd").unwrap();
    assert!(find_sets(&cards).is_empty());
}

proptest! {
    #[test]
    fn byte_round_trip(card in any_card()) {
        prop_assert_eq!(Card::from_byte(card.to_byte()).unwrap(), card);
    }

    #[test]
    fn text_round_trip(card in any_card()) {
        let text = card.to_string();
        prop_assert_eq!(text.len(), 4);
        prop_assert_eq!(Card::from_str(&text).unwrap(), card);
    }

    #[test]
    fn set_rule_matches_sum_rule(a in any_card(), b in any_card(), c in any_card()) {
        prop_assume!(a != b && b != c && a != c);
        prop_assert_eq!(is_set(&[a, b, c]), set_by_sum(&[a, b, c]));
    }

    #[test]
    fn set_rule_ignores_order(a in any_card(), b in any_card(), c in any_card()) {
        let base = is_set(&[a, b, c]);
        prop_assert_eq!(base, is_set(&[b, c, a]));
        prop_assert_eq!(base, is_set(&[c, a, b]));
        prop_assert_eq!(base, is_set(&[b, a, c]));
    }
}
