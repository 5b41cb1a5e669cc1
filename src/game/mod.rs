//! Table engine: validates actions and drives hands through their lifecycle.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clock::Clock;
use crate::error::Error;
use crate::event::{EventSink, TableEvent};
use crate::hand::HandPlayer;
use crate::id::{Entity, HandId, HandPlayerId, PlayerId};
use crate::options::GameOptions;
use crate::store::{Player, Store};
use crate::sync::{HandLocks, Mutex};
use crate::view::HandView;

mod actions;
mod deal;
mod dealer;
mod presence;
pub mod state;

pub use dealer::{DEALER_STANDS_ON, dealer_should_draw};
pub use state::{Action, Hand, HandStatus};

/// A blackjack table engine.
///
/// Every operation loads its records from the [`Store`], checks existence and
/// preconditions before touching anything, applies one transition and saves
/// it with a single commit. Mutations of the same hand are serialized;
/// different hands proceed in parallel. Events go to the [`EventSink`] after
/// the commit and never affect the outcome of an operation.
pub struct Game<S, E, C> {
    store: S,
    events: E,
    clock: C,
    /// Table options.
    pub options: GameOptions,
    rng: Mutex<ChaCha8Rng>,
    locks: HandLocks,
}

impl<S: Store, E: EventSink, C: Clock> Game<S, E, C> {
    /// Creates an engine whose shuffles are driven by `seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Game, GameOptions, InMemoryStore, ManualClock, NoopSink};
    ///
    /// let game = Game::new(
    ///     InMemoryStore::new(),
    ///     NoopSink,
    ///     ManualClock::new(0),
    ///     GameOptions::default(),
    ///     42,
    /// );
    /// assert_eq!(game.options.max_players, 7);
    /// ```
    #[must_use]
    pub fn new(store: S, events: E, clock: C, options: GameOptions, seed: u64) -> Self {
        Self {
            store,
            events,
            clock,
            options,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            locks: HandLocks::new(),
        }
    }

    /// Returns the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the current projection of a hand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the hand does not exist, or a store
    /// error.
    pub fn status(&self, hand_id: HandId) -> Result<HandView, Error> {
        self.with_hand_lock(hand_id, || {
            let hand = self.hand_record(hand_id)?;
            self.view_of(&hand)
        })
    }

    /// Runs `f` under the lock of `hand_id`.
    ///
    /// Only hands still in play hold a lock entry. No action can change a
    /// missing or finished hand, so `f` runs without one, and the entry of a
    /// hand that finished is dropped once `f` returns.
    fn with_hand_lock<T>(
        &self,
        hand_id: HandId,
        f: impl FnOnce() -> Result<T, Error>,
    ) -> Result<T, Error> {
        if !self.is_live(hand_id)? {
            return f();
        }

        let result = self.locks.with(hand_id, f);
        if !self.is_live(hand_id)? {
            self.locks.release(hand_id);
        }
        result
    }

    fn is_live(&self, hand_id: HandId) -> Result<bool, Error> {
        Ok(self
            .store
            .hand(hand_id)?
            .is_some_and(|hand| !hand.is_finished()))
    }

    fn hand_record(&self, id: HandId) -> Result<Hand, Error> {
        self.store
            .hand(id)?
            .ok_or(Error::not_found(Entity::Hand, id.0))
    }

    fn hand_player_record(&self, id: HandPlayerId) -> Result<HandPlayer, Error> {
        self.store
            .hand_player(id)?
            .ok_or(Error::not_found(Entity::HandPlayer, id.0))
    }

    fn player_record(&self, id: PlayerId) -> Result<Player, Error> {
        self.store
            .player(id)?
            .ok_or(Error::not_found(Entity::Player, id.0))
    }

    fn view_of(&self, hand: &Hand) -> Result<HandView, Error> {
        let players = self.store.hand_players(hand.id)?;
        Ok(HandView::new(hand, &players))
    }

    fn publish(&self, event: TableEvent) {
        let table_id = event.table_id();
        if let Err(err) = self.events.publish(event) {
            log::warn!("table {table_id}: dropping event: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::event::NoopSink;
    use crate::id::TableId;
    use crate::store::InMemoryStore;

    #[test]
    fn settled_hands_hold_no_lock_entry() {
        let store = InMemoryStore::new();
        let ada = store.insert_player("ada", 1_000);
        let game = Game::new(store, NoopSink, ManualClock::new(0), GameOptions::default(), 5);

        let view = game.start(TableId(1), &[ada], &[100]).unwrap();
        game.status(view.hand_id).unwrap();
        assert_eq!(game.locks.entries(), 1);

        game.dealer_play(view.hand_id).unwrap();
        assert_eq!(game.locks.entries(), 0);

        for _ in 0..100 {
            game.status(view.hand_id).unwrap();
            assert!(game.status(HandId(404)).is_err());
            assert!(game.dealer_play(view.hand_id).is_err());
            assert!(game.hit(view.players[0].hand_player_id).is_err());
        }
        assert_eq!(game.locks.entries(), 0);
    }
}
