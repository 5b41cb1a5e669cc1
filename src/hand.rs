//! Hand scoring and the per-player hand record.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::id::{HandId, HandPlayerId, PlayerId};
use crate::result::HandOutcome;

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// Calculates the best total of `cards`.
///
/// Aces count as 11 and are reduced to 1, one at a time, while the total is
/// over 21.
#[must_use]
pub fn value(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Returns whether the total still counts an ace as 11.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_cards(cards).1
}

/// Returns whether `cards` is exactly two cards totalling 21.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && value(cards) == 21
}

/// Returns whether `cards` totals more than 21.
#[must_use]
pub fn is_bust(cards: &[Card]) -> bool {
    value(cards) > 21
}

/// Status of a player's hand during the player turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum HandPlayerStatus {
    /// Hand can still take actions.
    Active,
    /// Player has stood.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a natural blackjack.
    Blackjack,
}

/// One player's participating hand within a [`Hand`](crate::game::state::Hand).
///
/// A player holds two of these after a split. The card list is private so
/// that the hand value, which is always derived from it, can never go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandPlayer {
    /// Record id.
    pub id: HandPlayerId,
    /// Owning hand.
    pub hand_id: HandId,
    /// Seated player.
    pub player_id: PlayerId,
    /// Amount wagered on this hand.
    pub bet_amount: u64,
    cards: Vec<Card>,
    /// Turn status.
    pub status: HandPlayerStatus,
    /// Settled outcome, written once when the dealer plays.
    pub result: Option<HandOutcome>,
    /// Net balance change from settlement.
    pub money_change: i64,
    /// Amount returned to the player at settlement.
    pub payout: u64,
}

impl HandPlayer {
    /// Creates an unsettled hand holding `cards`.
    ///
    /// The status is [`HandPlayerStatus::Blackjack`] for a natural two-card
    /// 21 and [`HandPlayerStatus::Active`] otherwise.
    #[must_use]
    pub fn new(
        id: HandPlayerId,
        hand_id: HandId,
        player_id: PlayerId,
        bet_amount: u64,
        cards: Vec<Card>,
    ) -> Self {
        let status = if is_blackjack(&cards) {
            HandPlayerStatus::Blackjack
        } else {
            HandPlayerStatus::Active
        };
        Self {
            id,
            hand_id,
            player_id,
            bet_amount,
            cards,
            status,
            result: None,
            money_change: 0,
            payout: 0,
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Appends a card and marks the hand bust if it went over 21.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        if is_bust(&self.cards) {
            self.status = HandPlayerStatus::Bust;
        }
    }

    /// Current hand value.
    #[must_use]
    pub fn hand_value(&self) -> u8 {
        value(&self.cards)
    }

    /// Returns whether the hand is exactly two cards totalling 21.
    ///
    /// This holds for a two-card 21 made after a split as well.
    #[must_use]
    pub fn has_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is a pair that may be split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Removes and returns the second card of a pair.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.can_split() {
            self.cards.pop()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&rank| Card::new(rank, Suit::Hearts)).collect()
    }

    #[test]
    fn values_reduce_aces_one_at_a_time() {
        assert_eq!(value(&cards(&[Rank::Five, Rank::Six])), 11);
        assert_eq!(value(&cards(&[Rank::Ace, Rank::King])), 21);
        assert_eq!(value(&cards(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
        assert_eq!(
            value(&cards(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Eight])),
            21
        );
        assert_eq!(value(&cards(&[Rank::King, Rank::Queen, Rank::Two])), 22);
        assert_eq!(value(&[]), 0);
    }

    #[test]
    fn soft_totals() {
        assert!(is_soft(&cards(&[Rank::Ace, Rank::Six])));
        assert!(!is_soft(&cards(&[Rank::Ace, Rank::Six, Rank::King])));
    }

    #[test]
    fn blackjack_needs_exactly_two_cards() {
        assert!(is_blackjack(&cards(&[Rank::Ace, Rank::Jack])));
        assert!(!is_blackjack(&cards(&[Rank::Seven, Rank::Seven, Rank::Seven])));
        assert!(is_bust(&cards(&[Rank::Ten, Rank::Nine, Rank::Five])));
    }

    #[test]
    fn split_twenty_one_counts_as_blackjack() {
        let mut hand = HandPlayer::new(
            HandPlayerId(1),
            HandId(1),
            PlayerId(1),
            10,
            cards(&[Rank::Ace, Rank::Ace]),
        );
        assert!(hand.can_split());
        assert!(hand.take_split_card().is_some());
        hand.add_card(Card::new(Rank::King, Suit::Spades));

        assert_eq!(hand.hand_value(), 21);
        assert!(hand.has_blackjack());
        // Status is only set to Blackjack on the opening deal.
        assert_eq!(hand.status, HandPlayerStatus::Active);
    }
}
