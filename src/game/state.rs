//! Hand lifecycle types.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck;
use crate::error::Error;
use crate::hand;
use crate::id::{HandId, PlayerId, TableId};

/// Hand lifecycle status.
///
/// `Waiting -> Active -> DealerTurn -> Finished`; `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum HandStatus {
    /// Created but not yet dealt.
    Waiting,
    /// Players are acting.
    Active,
    /// Dealer is completing the hand.
    DealerTurn,
    /// Settled.
    Finished,
}

/// An action applied to a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Deal a new hand.
    Start,
    /// Draw one card.
    Hit,
    /// End the turn.
    Stand,
    /// Double the bet, draw one card and stand.
    DoubleDown,
    /// Split a pair into two hands.
    Split,
    /// Play out the dealer and settle.
    DealerPlay,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::DoubleDown => "double down",
            Self::Split => "split",
            Self::DealerPlay => "play dealer",
        })
    }
}

/// One round of play at a table.
///
/// Together with its hand players, `dealer_cards` and `deck` always partition
/// a single 52-card deck.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hand {
    /// Hand id.
    pub id: HandId,
    /// Table the hand is played at.
    pub table_id: TableId,
    /// Lifecycle status.
    pub status: HandStatus,
    /// Start time in Unix milliseconds.
    pub start_time: u64,
    /// End time in Unix milliseconds, set when the hand finishes.
    pub end_time: Option<u64>,
    /// Undealt cards; the last card is drawn next.
    pub deck: Vec<Card>,
    /// Dealer cards; the first is the hole card.
    pub dealer_cards: Vec<Card>,
    /// Whether the hole card is still face down.
    pub dealer_hidden: bool,
    /// Seated players, in seat order.
    pub player_ids: Vec<PlayerId>,
}

impl Hand {
    /// Draws the next card from the hand's deck.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeckExhausted`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, Error> {
        deck::draw(&mut self.deck)
    }

    /// Current dealer total, hole card included.
    #[must_use]
    pub fn dealer_value(&self) -> u8 {
        hand::value(&self.dealer_cards)
    }

    /// Whether projections must hide the hole card.
    #[must_use]
    pub fn hole_card_hidden(&self) -> bool {
        self.dealer_hidden && self.status != HandStatus::Finished
    }

    /// Whether the hand is settled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == HandStatus::Finished
    }

    /// Length of the hand in whole seconds, once finished.
    #[must_use]
    pub fn duration_secs(&self) -> Option<u64> {
        self.end_time
            .map(|end| end.saturating_sub(self.start_time).saturating_add(500) / 1000)
    }
}
