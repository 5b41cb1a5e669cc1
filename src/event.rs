//! Table events relayed to observers.
//!
//! Delivery is best-effort: the engine publishes after a transition has been
//! committed and only logs a sink failure.

extern crate alloc;

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::state::Action;
use crate::hand::HandPlayerStatus;
use crate::id::{HandId, HandPlayerId, PlayerId, TableId};
use crate::view::HandView;

/// An event observed at a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "kebab-case"))]
pub enum TableEvent {
    /// A new hand was dealt.
    HandStarted {
        /// Table of the hand.
        table_id: TableId,
        /// The opening state, hole card hidden.
        hand: HandView,
    },
    /// A player action was applied.
    PlayerAction {
        /// Table of the hand.
        table_id: TableId,
        /// The hand acted on.
        hand_id: HandId,
        /// The hand player that acted.
        hand_player_id: HandPlayerId,
        /// The action taken.
        action: Action,
        /// Status after the action.
        status: HandPlayerStatus,
        /// Hand value after the action.
        hand_value: u8,
    },
    /// The dealer played and every hand was settled.
    HandFinished {
        /// Table of the hand.
        table_id: TableId,
        /// The settled state.
        hand: HandView,
    },
    /// A chat line.
    ChatMessage {
        /// Table the message was sent to.
        table_id: TableId,
        /// Sender.
        player_id: PlayerId,
        /// Sender's display name.
        player_name: String,
        /// Message text.
        message: String,
        /// Send time in Unix milliseconds.
        timestamp: u64,
    },
    /// A player sat down.
    PlayerJoined {
        /// Table joined.
        table_id: TableId,
        /// The player.
        player_id: PlayerId,
        /// Display name.
        player_name: String,
    },
    /// A player left.
    PlayerLeft {
        /// Table left.
        table_id: TableId,
        /// The player.
        player_id: PlayerId,
        /// Display name.
        player_name: String,
    },
}

impl TableEvent {
    /// Returns the table the event belongs to.
    #[must_use]
    pub const fn table_id(&self) -> TableId {
        match self {
            Self::HandStarted { table_id, .. }
            | Self::PlayerAction { table_id, .. }
            | Self::HandFinished { table_id, .. }
            | Self::ChatMessage { table_id, .. }
            | Self::PlayerJoined { table_id, .. }
            | Self::PlayerLeft { table_id, .. } => *table_id,
        }
    }
}

/// Errors a sink may report; the engine never propagates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The sink is full.
    #[error("event sink is full")]
    Full,
    /// Nobody is listening any more.
    #[error("event sink is closed")]
    Closed,
}

/// Receives table events for relay to observers.
///
/// Implementations must not block.
pub trait EventSink {
    /// Publishes one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event could not be queued.
    fn publish(&self, event: TableEvent) -> Result<(), PublishError>;
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn publish(&self, _event: TableEvent) -> Result<(), PublishError> {
        Ok(())
    }
}

impl<E: EventSink + ?Sized> EventSink for &E {
    fn publish(&self, event: TableEvent) -> Result<(), PublishError> {
        (**self).publish(event)
    }
}

/// Sink feeding a bounded channel without ever waiting for room.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct ChannelSink(std::sync::mpsc::SyncSender<TableEvent>);

#[cfg(feature = "std")]
impl ChannelSink {
    /// Creates a sink and the receiving end of its channel.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, std::sync::mpsc::Receiver<TableEvent>) {
        let (sender, receiver) = std::sync::mpsc::sync_channel(capacity);
        (Self(sender), receiver)
    }
}

#[cfg(feature = "std")]
impl EventSink for ChannelSink {
    fn publish(&self, event: TableEvent) -> Result<(), PublishError> {
        self.0.try_send(event).map_err(|err| match err {
            std::sync::mpsc::TrySendError::Full(_) => PublishError::Full,
            std::sync::mpsc::TrySendError::Disconnected(_) => PublishError::Closed,
        })
    }
}
