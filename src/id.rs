//! Record identifiers.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

record_id!(
    /// Identifies a table.
    TableId
);
record_id!(
    /// Identifies a registered player.
    PlayerId
);
record_id!(
    /// Identifies one round of play.
    HandId
);
record_id!(
    /// Identifies one player's hand within a round.
    HandPlayerId
);

/// Kind of record referenced by a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A [`Hand`](crate::game::state::Hand).
    Hand,
    /// A [`HandPlayer`](crate::hand::HandPlayer).
    HandPlayer,
    /// A [`Player`](crate::store::Player).
    Player,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hand => "hand",
            Self::HandPlayer => "hand player",
            Self::Player => "player",
        })
    }
}
