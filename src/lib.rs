//! A blackjack table engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that deals hands, applies player
//! actions (hit, stand, double down, split), plays the dealer and settles
//! bets. Records live behind the [`Store`] trait and table events are handed
//! to an [`EventSink`].
//!
//! # Example
//!
//! ```
//! use bjtable::{Game, GameOptions, HandStatus, InMemoryStore, ManualClock, NoopSink, TableId};
//!
//! let store = InMemoryStore::new();
//! let ada = store.insert_player("ada", 1_000);
//! let game = Game::new(store, NoopSink, ManualClock::new(0), GameOptions::default(), 42);
//!
//! let hand = game.start(TableId(1), &[ada], &[100]).unwrap();
//! let finished = game.dealer_play(hand.hand_id).unwrap();
//! assert_eq!(finished.status, HandStatus::Finished);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod clock;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod id;
pub mod options;
pub mod result;
pub mod store;
mod sync;
pub mod view;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use error::{ActionState, Error, StoreError};
#[cfg(feature = "std")]
pub use event::ChannelSink;
pub use event::{EventSink, NoopSink, PublishError, TableEvent};
pub use game::{Action, DEALER_STANDS_ON, Game, Hand, HandStatus, dealer_should_draw};
pub use hand::{HandPlayer, HandPlayerStatus};
pub use id::{Entity, HandId, HandPlayerId, PlayerId, TableId};
pub use options::{GameOptions, RoundingMode};
pub use result::{HandOutcome, Settlement};
pub use store::{BalanceChange, Commit, InMemoryStore, Player, Store};
pub use view::{CardView, HandPlayerView, HandView};
