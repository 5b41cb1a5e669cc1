//! Caller-facing projections of hand state.
//!
//! Field names match the ones existing table clients read.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::game::state::{Hand, HandStatus};
use crate::hand::{self, HandPlayer, HandPlayerStatus};
use crate::id::{HandId, HandPlayerId, PlayerId, TableId};
use crate::result::HandOutcome;

/// A dealer card as shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardView {
    /// The face-down hole card.
    Hidden,
    /// A face-up card.
    Shown(Card),
}

/// Projection of one player's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandPlayerView {
    /// Hand player record id.
    pub hand_player_id: HandPlayerId,
    /// Seated player.
    pub player_id: PlayerId,
    /// Current wager.
    pub bet_amount: u64,
    /// Cards held.
    pub cards: Vec<Card>,
    /// Current total.
    pub hand_value: u8,
    /// Turn status.
    pub status: HandPlayerStatus,
    /// Settled outcome, if the hand is finished.
    pub result: Option<HandOutcome>,
    /// Net balance change from settlement.
    pub money_change: i64,
    /// Amount returned at settlement.
    pub payout: u64,
}

impl From<&HandPlayer> for HandPlayerView {
    fn from(player: &HandPlayer) -> Self {
        Self {
            hand_player_id: player.id,
            player_id: player.player_id,
            bet_amount: player.bet_amount,
            cards: player.cards().to_vec(),
            hand_value: player.hand_value(),
            status: player.status,
            result: player.result,
            money_change: player.money_change,
            payout: player.payout,
        }
    }
}

/// Projection of a hand and every player in it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandView {
    /// Hand id.
    pub hand_id: HandId,
    /// Table the hand is played at.
    pub table_id: TableId,
    /// Lifecycle status.
    pub status: HandStatus,
    /// Dealer cards, with the hole card hidden until it is revealed.
    pub dealer_cards: Vec<CardView>,
    /// Dealer total, once every dealer card is visible.
    pub dealer_value: Option<u8>,
    /// Whether the dealer busted, once every dealer card is visible.
    pub dealer_busted: Option<bool>,
    /// Player hands in creation order.
    pub players: Vec<HandPlayerView>,
    /// Start time in Unix milliseconds.
    pub start_time: u64,
    /// End time in Unix milliseconds.
    pub end_time: Option<u64>,
}

impl HandView {
    /// Builds the projection of `hand` and its players.
    #[must_use]
    pub fn new(hand: &Hand, players: &[HandPlayer]) -> Self {
        let hidden = hand.hole_card_hidden();
        let dealer_cards = hand
            .dealer_cards
            .iter()
            .enumerate()
            .map(|(index, &card)| {
                if hidden && index == 0 {
                    CardView::Hidden
                } else {
                    CardView::Shown(card)
                }
            })
            .collect();
        let dealer_value = (!hidden).then(|| hand::value(&hand.dealer_cards));

        Self {
            hand_id: hand.id,
            table_id: hand.table_id,
            status: hand.status,
            dealer_cards,
            dealer_value,
            dealer_busted: dealer_value.map(|value| value > 21),
            players: players.iter().map(HandPlayerView::from).collect(),
            start_time: hand.start_time,
            end_time: hand.end_time,
        }
    }

    /// Returns the projection of one hand player.
    #[must_use]
    pub fn player(&self, id: HandPlayerId) -> Option<&HandPlayerView> {
        self.players.iter().find(|player| player.hand_player_id == id)
    }
}
