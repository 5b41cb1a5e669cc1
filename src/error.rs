//! Error types for table operations.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::game::state::{Action, HandStatus};
use crate::hand::HandPlayerStatus;
use crate::id::{Entity, HandId, PlayerId};

/// The state that made an action invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// The hand is in a status that does not allow the action.
    Hand(HandStatus),
    /// The player's hand is no longer active.
    Player(HandPlayerStatus),
    /// The player's hand holds the wrong number of cards.
    CardCount(usize),
    /// The two cards are not a pair.
    Unpaired,
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hand(status) => write!(f, "hand is {status:?}"),
            Self::Player(status) => write!(f, "player hand is {status:?}"),
            Self::CardCount(count) => write!(f, "hand holds {count} cards"),
            Self::Unpaired => f.write_str("cards are not a pair"),
        }
    }
}

/// Errors reported by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend failed.
    #[error("storage backend failed: {0}")]
    Backend(String),
    /// A record referenced by a commit does not exist.
    #[error("{entity} {id} is missing from the store")]
    Missing {
        /// Kind of record.
        entity: Entity,
        /// Raw id of the record.
        id: u64,
    },
    /// Settlement for this hand and player was already applied.
    #[error("hand {hand} was already settled for player {player}")]
    DuplicateSettlement {
        /// The settled hand.
        hand: HandId,
        /// The settled player.
        player: PlayerId,
    },
}

/// Errors returned by table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A referenced record does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record.
        entity: Entity,
        /// Raw id of the record.
        id: u64,
    },
    /// Malformed or missing action input.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Offending input field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The player cannot cover the required amount.
    #[error("player {player} needs a balance of at least {required}")]
    InsufficientBalance {
        /// The player short of funds.
        player: PlayerId,
        /// Amount the balance must cover.
        required: u64,
    },
    /// The action is not allowed in the current state.
    #[error("cannot {action}: {state}")]
    InvalidAction {
        /// The rejected action.
        action: Action,
        /// Why it was rejected.
        state: ActionState,
    },
    /// The hand has already been settled.
    #[error("hand {0} is already finished")]
    AlreadyFinished(HandId),
    /// The deck ran out of cards mid-hand.
    #[error("deck exhausted")]
    DeckExhausted,
    /// The persistence backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub(crate) const fn not_found(entity: Entity, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    pub(crate) const fn invalid(action: Action, state: ActionState) -> Self {
        Self::InvalidAction { action, state }
    }
}
