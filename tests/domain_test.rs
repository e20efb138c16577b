//! Тесты доменного слоя: карты, колода, фишки, места, конфиг стола.

use std::collections::HashSet;

use holdem_engine::domain::{
    parse_cards, Card, CardParseError, Chips, ConfigError, Deck, DeckError, Rank, Seat, SeatStatus,
    Suit, Table, TableConfig, TableStakes,
};
use holdem_engine::infra::RngSeed;
use holdem_engine::time_ctrl::{TimeProfile, TimeRules};

//
// ====================== КАРТЫ ======================
//

#[test]
fn card_parses_and_displays() {
    let card: Card = "Ah".parse().unwrap();
    assert_eq!(card, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(card.to_string(), "Ah");

    let ten: Card = "td".parse().unwrap();
    assert_eq!(ten, Card::new(Rank::Ten, Suit::Diamonds));
    assert_eq!(ten.to_string(), "Td");
}

#[test]
fn card_parse_errors() {
    assert!(matches!("A".parse::<Card>(), Err(CardParseError::BadLength(_))));
    assert!(matches!("Ahh".parse::<Card>(), Err(CardParseError::BadLength(_))));
    assert_eq!("1h".parse::<Card>(), Err(CardParseError::BadRank('1')));
    assert_eq!("Ax".parse::<Card>(), Err(CardParseError::BadSuit('x')));
}

#[test]
fn parse_cards_list() {
    let cards = parse_cards("As Kd 7c").unwrap();
    assert_eq!(
        cards,
        vec![
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Diamonds),
            Card::new(Rank::Seven, Suit::Clubs),
        ]
    );
}

#[test]
fn rank_values_roundtrip() {
    for rank in Rank::ALL {
        assert_eq!(Rank::from_value(rank.value()), Some(rank));
    }
    assert_eq!(Rank::from_value(1), None);
    assert_eq!(Rank::from_value(15), None);
    assert!(Rank::Ace > Rank::King);
}

//
// ====================== КОЛОДА ======================
//

#[test]
fn standard_deck_has_52_unique_cards() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let mut seen = HashSet::new();
    while let Ok(card) = deck.draw() {
        assert!(seen.insert(card), "карта {card} сдана дважды");
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn deck_is_empty_after_52_draws() {
    let mut deck = Deck::new_shuffled(&RngSeed::from_u64(7));
    deck.draw_n(52).unwrap();

    assert!(deck.is_empty());
    assert_eq!(deck.drawn_count(), 52);
    assert_eq!(deck.draw(), Err(DeckError::EmptyDeck));
    assert_eq!(deck.burn(), Err(DeckError::EmptyDeck));
}

#[test]
fn draw_n_is_all_or_nothing() {
    let mut deck = Deck::standard_52();
    deck.draw_n(50).unwrap();

    assert_eq!(deck.draw_n(3), Err(DeckError::EmptyDeck));
    assert_eq!(deck.len(), 2, "неудачный draw_n не снимает карты");
}

#[test]
fn same_seed_gives_same_order() {
    let seed = RngSeed::from_u64(42);
    let mut a = Deck::new_shuffled(&seed);
    let mut b = Deck::new_shuffled(&seed);
    assert_eq!(a.draw_n(52).unwrap(), b.draw_n(52).unwrap());

    let mut c = Deck::new_shuffled(&RngSeed::from_u64(43));
    let mut a = Deck::new_shuffled(&seed);
    assert_ne!(a.draw_n(52).unwrap(), c.draw_n(52).unwrap());
}

#[test]
fn stacked_deck_deals_in_given_order() {
    let order = parse_cards("Ah Kd 2c").unwrap();
    let mut deck = Deck::stacked(&order);

    assert_eq!(deck.len(), 52);
    assert_eq!(deck.draw_n(3).unwrap(), order);

    let rest = deck.draw_n(49).unwrap();
    assert!(rest.iter().all(|c| !order.contains(c)));
}

//
// ====================== ФИШКИ И МЕСТА ======================
//

#[test]
fn chips_arithmetic_saturates() {
    assert_eq!(Chips(10) - Chips(30), Chips::ZERO);
    assert_eq!(Chips(10).checked_sub(Chips(30)), None);
    assert_eq!(Chips(125).split(2), (Chips(62), Chips(1)));
    assert_eq!(Chips(25).times(3), Chips(75));
    assert_eq!([Chips(1), Chips(2), Chips(3)].iter().sum::<Chips>(), Chips(6));
}

#[test]
fn seat_commit_caps_at_stack_and_goes_all_in() {
    let mut seat = Seat::new(1, Chips(80));

    assert_eq!(seat.commit(Chips(50)), Chips(50));
    assert_eq!(seat.status, SeatStatus::Active);

    assert_eq!(seat.commit(Chips(100)), Chips(30));
    assert_eq!(seat.stack, Chips::ZERO);
    assert_eq!(seat.street_bet, Chips(80));
    assert_eq!(seat.status, SeatStatus::AllIn);
    assert!(seat.is_in_hand());
    assert!(!seat.can_act());
}

#[test]
fn ante_does_not_count_as_street_bet() {
    let mut seat = Seat::new(1, Chips(100));
    assert_eq!(seat.commit_dead(Chips(10)), Chips(10));
    assert_eq!(seat.street_bet, Chips::ZERO);
    assert_eq!(seat.stack, Chips(90));
}

#[test]
fn busted_seat_sits_out_on_reset() {
    let mut seat = Seat::new(1, Chips(100));
    seat.commit(Chips(100));
    seat.reset_for_hand();
    assert_eq!(seat.status, SeatStatus::SittingOut);

    let mut folded = Seat::new(2, Chips(100));
    folded.status = SeatStatus::Folded;
    folded.reset_for_hand();
    assert_eq!(folded.status, SeatStatus::Active);
}

#[test]
fn sit_in_requires_chips() {
    let mut table = Table::new(1, "t", TableConfig::default());
    table.seats[0] = Some(Seat::new(10, Chips::ZERO));
    table.seats[1] = Some(Seat::new(11, Chips(500)));
    table.seat_mut(0).unwrap().status = SeatStatus::SittingOut;
    table.seat_mut(1).unwrap().status = SeatStatus::SittingOut;

    assert!(!table.sit_in(0));
    assert!(table.sit_in(1));
    assert_eq!(table.seat(1).unwrap().status, SeatStatus::Active);
    assert_eq!(table.ready_count(), 1);
    assert_eq!(table.seated_count(), 2);
    assert_eq!(table.total_stacks(), Chips(500));
}

//
// ====================== КОНФИГ ======================
//

#[test]
fn default_config_is_valid() {
    let config = TableConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.max_seats, 6);
    assert_eq!(config.time, TimeRules::standard());
}

#[test]
fn config_validation_errors() {
    let mut config = TableConfig::default();
    config.max_seats = 1;
    assert!(matches!(config.validate(), Err(ConfigError::BadSeatCount(1))));

    config.max_seats = 11;
    assert!(matches!(config.validate(), Err(ConfigError::BadSeatCount(11))));

    let mut config = TableConfig::default();
    config.stakes = TableStakes::new(Chips(200), Chips(100), Chips::ZERO);
    assert!(matches!(config.validate(), Err(ConfigError::BadBlinds { .. })));

    config.stakes = TableStakes::new(Chips::ZERO, Chips(100), Chips::ZERO);
    assert!(matches!(config.validate(), Err(ConfigError::BadBlinds { .. })));

    config.stakes = TableStakes::new(Chips(50), Chips(100), Chips(150));
    assert!(matches!(config.validate(), Err(ConfigError::AnteTooLarge { .. })));

    let mut config = TableConfig::default();
    config.time = TimeRules::new(0);
    assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
}

#[test]
fn config_from_json() {
    let json = r#"{
        "max_seats": 9,
        "stakes": { "small_blind": 25, "big_blind": 50 }
    }"#;
    let config = TableConfig::from_json(json).unwrap();
    assert_eq!(config.max_seats, 9);
    assert_eq!(config.stakes.ante, Chips::ZERO);
    assert_eq!(config.time, TimeRules::standard());

    let turbo = r#"{
        "max_seats": 2,
        "stakes": { "small_blind": 5, "big_blind": 10, "ante": 1 },
        "time": { "action_timeout_secs": 15 }
    }"#;
    let config = TableConfig::from_json(turbo).unwrap();
    assert_eq!(config.time, TimeRules::from_profile(TimeProfile::Turbo));

    assert!(matches!(TableConfig::from_json("{"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        TableConfig::from_json(r#"{"max_seats": 12, "stakes": {"small_blind": 1, "big_blind": 2}}"#),
        Err(ConfigError::BadSeatCount(12))
    ));
}
