//! Deck construction, shuffling and dealing.
//!
//! The deck is a plain `Vec<Card>` drawn from the back, so the last card of
//! the vector is the next card dealt.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::Error;

/// Cards dealt at the start of a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialDeal {
    /// Two cards per player, in seat order.
    pub players: Vec<[Card; 2]>,
    /// The dealer's two cards; the first one is the hole card.
    pub dealer: [Card; 2],
    /// Cards left after the deal.
    pub deck: Vec<Card>,
}

/// Builds an ordered, unshuffled 52-card deck.
#[must_use]
pub fn ordered_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Builds a 52-card deck and shuffles it uniformly (Fisher–Yates).
pub fn create_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut cards = ordered_deck();
    cards.shuffle(rng);
    cards
}

/// Returns whether `cards` is a complete deck with no repeated card.
#[must_use]
pub fn is_complete_deck(cards: &[Card]) -> bool {
    if cards.len() != DECK_SIZE {
        return false;
    }
    let mut seen = [false; DECK_SIZE];
    for card in cards {
        let index = card.suit as usize * Rank::ALL.len() + card.rank as usize;
        if seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

/// Removes and returns the next card.
///
/// # Errors
///
/// Returns [`Error::DeckExhausted`] if the deck is empty. With a single deck
/// and the seat cap this is an internal invariant violation, never a normal
/// game outcome.
pub fn draw(deck: &mut Vec<Card>) -> Result<Card, Error> {
    deck.pop().ok_or_else(|| {
        log::error!("deck exhausted mid-hand");
        Error::DeckExhausted
    })
}

/// Deals the opening cards: two rounds of one card per player in seat order,
/// each round followed by one card to the dealer.
///
/// # Errors
///
/// Returns [`Error::DeckExhausted`] if the deck runs out.
pub fn deal_initial(mut deck: Vec<Card>, player_count: usize) -> Result<InitialDeal, Error> {
    let mut first_round = Vec::with_capacity(player_count);
    for _ in 0..player_count {
        first_round.push(draw(&mut deck)?);
    }
    let dealer_first = draw(&mut deck)?;

    let mut players = Vec::with_capacity(player_count);
    for first in first_round {
        players.push([first, draw(&mut deck)?]);
    }
    let dealer_second = draw(&mut deck)?;

    Ok(InitialDeal {
        players,
        dealer: [dealer_first, dealer_second],
        deck,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_order_is_round_robin_then_dealer() {
        let deck = ordered_deck();
        // Ordered deck ends with the clubs, so draws come K♣, Q♣, J♣, ...
        let deal = deal_initial(deck, 2).unwrap();

        assert_eq!(deal.players[0][0].rank, Rank::King);
        assert_eq!(deal.players[1][0].rank, Rank::Queen);
        assert_eq!(deal.dealer[0].rank, Rank::Jack);
        assert_eq!(deal.players[0][1].rank, Rank::Ten);
        assert_eq!(deal.players[1][1].rank, Rank::Nine);
        assert_eq!(deal.dealer[1].rank, Rank::Eight);
        assert_eq!(deal.deck.len(), DECK_SIZE - 6);
    }

    #[test]
    fn draw_from_empty_deck_fails() {
        let mut deck = Vec::new();
        assert_eq!(draw(&mut deck), Err(Error::DeckExhausted));
    }

    #[test]
    fn complete_deck_detection() {
        let mut deck = ordered_deck();
        assert!(is_complete_deck(&deck));

        deck[0] = deck[1];
        assert!(!is_complete_deck(&deck));

        deck.pop();
        assert!(!is_complete_deck(&deck));
    }
}
