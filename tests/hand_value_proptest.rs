//! Property-based tests for hand totals and dealing.

use bjtable::deck::{create_deck, deal_initial, is_complete_deck, ordered_deck};
use bjtable::hand;
use bjtable::{Card, DECK_SIZE};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Distinct cards drawn from one deck, in shuffled order.
fn cards_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence(ordered_deck(), min..=max).prop_shuffle()
}

// Total with every ace counted as 1.
fn hard_total(cards: &[Card]) -> u8 {
    cards
        .iter()
        .map(|card| if card.is_ace() { 1 } else { card.value() })
        .sum()
}

proptest! {
    #[test]
    fn total_is_hard_or_one_soft_ace(cards in cards_strategy(1, 11)) {
        let value = hand::value(&cards);
        let hard = hard_total(&cards);

        if hand::is_soft(&cards) {
            prop_assert_eq!(value, hard + 10);
            prop_assert!(value <= 21);
        } else {
            prop_assert_eq!(value, hard);
        }
        prop_assert_eq!(hand::is_bust(&cards), value > 21);
    }

    #[test]
    fn blackjack_needs_exactly_two_cards(cards in cards_strategy(2, 5)) {
        let expected = cards.len() == 2
            && cards.iter().any(|card| card.is_ace())
            && cards.iter().any(|card| card.value() == 10);
        prop_assert_eq!(hand::is_blackjack(&cards), expected);
    }

    #[test]
    fn shuffled_deck_is_always_complete(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = create_deck(&mut rng);
        prop_assert_eq!(deck.len(), DECK_SIZE);
        prop_assert!(is_complete_deck(&deck));
    }

    #[test]
    fn shuffled_deck_has_the_standard_values(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut counts = [0usize; 12];
        for card in create_deck(&mut rng) {
            counts[usize::from(card.value())] += 1;
        }

        prop_assert_eq!(counts[11], 4);
        prop_assert_eq!(counts[10], 16);
        for value in 2..=9 {
            prop_assert_eq!(counts[value], 4);
        }
        prop_assert_eq!(counts[0] + counts[1], 0);
    }

    #[test]
    fn initial_deal_partitions_the_deck(seed in any::<u64>(), players in 1usize..=7) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deal = deal_initial(create_deck(&mut rng), players).unwrap();

        prop_assert_eq!(deal.players.len(), players);
        prop_assert_eq!(deal.deck.len(), DECK_SIZE - 2 * players - 2);

        let mut cards = deal.deck.clone();
        cards.extend(deal.dealer);
        for pair in &deal.players {
            cards.extend(pair);
        }
        prop_assert!(is_complete_deck(&cards));
    }
}
