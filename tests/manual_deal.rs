use set_rs::cards::Card;
use set_rs::config::Settings;
use set_rs::deck::Deck;
use set_rs::game::{Game, GameState, Hint, MoveError, TABLE_MIN};
use set_rs::table::Table;

fn manual() -> Settings {
    Settings::default().with_auto_deal(false).with_seed(5)
}

fn restore(table: Vec<Card>, settings: Settings) -> Game {
    let deck: Vec<Card> =
        Deck::ordered().as_slice().iter().copied().filter(|c| !table.contains(c)).collect();
    Game::restore(Deck::from_cards(deck), Table::new(table), settings)
}

fn set_free_twelve() -> Vec<Card> {
    Deck::ordered()
        .as_slice()
        .iter()
        .copied()
        .filter(|c| c.indices().iter().all(|&i| i < 2))
        .take(12)
        .collect()
}

#[test]
fn adding_while_a_set_shows_is_a_foul() {
    let mut g = restore(Deck::ordered().as_slice()[..12].to_vec(), manual());
    let before = g.dump();
    assert_eq!(g.add_three(), Err(MoveError::SetAvailable));
    assert_eq!(g.dump(), before);
}

#[test]
fn adding_without_a_set_grows_the_table() {
    let mut g = restore(set_free_twelve(), manual());
    assert_eq!(g.state(), GameState::Dealing);
    assert!(g.sets().is_empty());
    assert_eq!(g.add_three(), Ok(true));
    assert_eq!(g.table().len(), TABLE_MIN + 3);
    assert_eq!(g.deck().len(), 81 - 15);
}

#[test]
fn manual_deal_tops_up_to_twelve_only() {
    let mut g = Game::new(manual());
    assert_eq!(g.table().len(), TABLE_MIN);
    // Whatever the deal, nothing is added past twelve without a request.
    assert_eq!(g.deal(), 0);
    assert_eq!(g.table().len(), TABLE_MIN);
}

#[test]
fn hint_deals_when_no_set_in_manual_mode() {
    let mut g = restore(set_free_twelve(), manual());
    assert_eq!(g.hint(&[]), Ok(Hint::Dealt));
    assert_eq!(g.table().len(), 15);
}

#[test]
fn hint_reports_marked_cards_outside_any_set() {
    let mut g = restore(Deck::ordered().as_slice()[..12].to_vec(), manual());
    let sets = g.sets().to_vec();
    let lonely = g.table().as_slice().iter().copied().find(|c| !sets.iter().any(|s| s.contains(c)));
    if let Some(card) = lonely {
        assert_eq!(g.hint(&[card]), Ok(Hint::NoMatch));
    }
    let set = sets[0];
    assert_eq!(g.hint(&[set[0], set[1]]), Ok(Hint::Card(set[2])));
}

#[test]
fn switching_auto_deal_on_takes_effect_on_next_deal() {
    let mut g = restore(set_free_twelve(), manual());
    assert!(g.sets().is_empty());
    g.set_settings(manual().with_auto_deal(true));
    assert!(g.deal() >= 3);
    assert!(!g.sets().is_empty());
}
