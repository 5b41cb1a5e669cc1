//! Persistence collaborator.
//!
//! The engine reads records through [`Store`] and writes every transition as
//! a single [`Commit`], which a store must apply atomically.

extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::StoreError;
use crate::game::state::Hand;
use crate::hand::HandPlayer;
use crate::id::{Entity, HandId, HandPlayerId, PlayerId};
use crate::sync::Mutex;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    /// Player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current balance. Settlement may take it below zero after a double
    /// or split that was covered only by the pre-action balance.
    pub balance: i64,
    /// Hands settled.
    pub total_hands_played: u32,
    /// Hands won, blackjacks included.
    pub total_hands_won: u32,
    /// Hands lost, busts included.
    pub total_hands_lost: u32,
}

impl Player {
    /// Creates a player with no history.
    #[must_use]
    pub const fn new(id: PlayerId, name: String, balance: i64) -> Self {
        Self {
            id,
            name,
            balance,
            total_hands_played: 0,
            total_hands_won: 0,
            total_hands_lost: 0,
        }
    }

    /// Returns whether the balance covers `amount`.
    #[must_use]
    pub fn can_cover(&self, amount: u64) -> bool {
        u64::try_from(self.balance).is_ok_and(|balance| balance >= amount)
    }

    /// Percentage of settled hands won, 0 when none were played.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_hands_played == 0 {
            return 0.0;
        }
        f64::from(self.total_hands_won) / f64::from(self.total_hands_played) * 100.0
    }
}

/// Settlement of one player for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    /// Player to credit or debit.
    pub player_id: PlayerId,
    /// Net change, summed over all of the player's hands.
    pub amount: i64,
    /// Hands settled for the player.
    pub played: u32,
    /// Hands won.
    pub won: u32,
    /// Hands lost.
    pub lost: u32,
}

/// Writes produced by one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// Hand to save.
    pub hand: Option<Hand>,
    /// Hand players to save, new or updated.
    pub hand_players: Vec<HandPlayer>,
    /// Balance updates; at most one per player, keyed to `hand`.
    pub settlements: Vec<BalanceChange>,
}

impl Commit {
    /// A commit saving `hand` and `hand_players`.
    #[must_use]
    pub const fn new(hand: Hand, hand_players: Vec<HandPlayer>) -> Self {
        Self {
            hand: Some(hand),
            hand_players,
            settlements: Vec::new(),
        }
    }
}

/// Storage used by the engine.
pub trait Store {
    /// Loads a hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn hand(&self, id: HandId) -> Result<Option<Hand>, StoreError>;

    /// Loads a hand player.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn hand_player(&self, id: HandPlayerId) -> Result<Option<HandPlayer>, StoreError>;

    /// Loads every hand player of a hand, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn hand_players(&self, hand_id: HandId) -> Result<Vec<HandPlayer>, StoreError>;

    /// Loads a player.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn player(&self, id: PlayerId) -> Result<Option<Player>, StoreError>;

    /// Reserves a fresh hand id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn next_hand_id(&self) -> Result<HandId, StoreError>;

    /// Reserves a fresh hand player id. Ids must increase with creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn next_hand_player_id(&self) -> Result<HandPlayerId, StoreError>;

    /// Applies every write in `commit`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateSettlement`] if a settlement for the
    /// same hand and player was already applied, [`StoreError::Missing`] if a
    /// settled player does not exist, or a backend error.
    fn commit(&self, commit: Commit) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Tables {
    hands: HashMap<HandId, Hand>,
    hand_players: BTreeMap<HandPlayerId, HandPlayer>,
    players: BTreeMap<PlayerId, Player>,
    settled: BTreeSet<(HandId, PlayerId)>,
}

/// Process-local store.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    next_hand: AtomicU64,
    next_hand_player: AtomicU64,
    next_player: AtomicU64,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player and returns its id.
    pub fn insert_player(&self, name: impl Into<String>, balance: i64) -> PlayerId {
        let id = PlayerId(self.next_player.fetch_add(1, Ordering::SeqCst) + 1);
        self.tables
            .lock()
            .players
            .insert(id, Player::new(id, name.into(), balance));
        id
    }

    /// Returns every registered player.
    pub fn players(&self) -> Vec<Player> {
        self.tables.lock().players.values().cloned().collect()
    }
}

impl Store for InMemoryStore {
    fn hand(&self, id: HandId) -> Result<Option<Hand>, StoreError> {
        Ok(self.tables.lock().hands.get(&id).cloned())
    }

    fn hand_player(&self, id: HandPlayerId) -> Result<Option<HandPlayer>, StoreError> {
        Ok(self.tables.lock().hand_players.get(&id).cloned())
    }

    fn hand_players(&self, hand_id: HandId) -> Result<Vec<HandPlayer>, StoreError> {
        Ok(self
            .tables
            .lock()
            .hand_players
            .values()
            .filter(|player| player.hand_id == hand_id)
            .cloned()
            .collect())
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        Ok(self.tables.lock().players.get(&id).cloned())
    }

    fn next_hand_id(&self) -> Result<HandId, StoreError> {
        Ok(HandId(self.next_hand.fetch_add(1, Ordering::SeqCst) + 1))
    }

    fn next_hand_player_id(&self) -> Result<HandPlayerId, StoreError> {
        Ok(HandPlayerId(
            self.next_hand_player.fetch_add(1, Ordering::SeqCst) + 1,
        ))
    }

    fn commit(&self, commit: Commit) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();

        if !commit.settlements.is_empty() {
            let hand_id = commit.hand.as_ref().map_or(HandId(0), |hand| hand.id);
            for change in &commit.settlements {
                if !tables.players.contains_key(&change.player_id) {
                    return Err(StoreError::Missing {
                        entity: Entity::Player,
                        id: change.player_id.0,
                    });
                }
                if tables.settled.contains(&(hand_id, change.player_id)) {
                    return Err(StoreError::DuplicateSettlement {
                        hand: hand_id,
                        player: change.player_id,
                    });
                }
            }
            for change in &commit.settlements {
                tables.settled.insert((hand_id, change.player_id));
                if let Some(player) = tables.players.get_mut(&change.player_id) {
                    player.balance = player.balance.saturating_add(change.amount);
                    player.total_hands_played =
                        player.total_hands_played.saturating_add(change.played);
                    player.total_hands_won = player.total_hands_won.saturating_add(change.won);
                    player.total_hands_lost = player.total_hands_lost.saturating_add(change.lost);
                }
            }
        }

        if let Some(hand) = commit.hand {
            tables.hands.insert(hand.id, hand);
        }
        for player in commit.hand_players {
            tables.hand_players.insert(player.id, player);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_is_derived() {
        let mut player = Player::new(PlayerId(1), String::from("ada"), 100);
        assert!(player.win_rate().abs() < f64::EPSILON);

        player.total_hands_played = 4;
        player.total_hands_won = 1;
        assert!((player.win_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn settlement_is_applied_once_per_hand_and_player() {
        let store = InMemoryStore::new();
        let player_id = store.insert_player("ada", 100);
        let change = BalanceChange {
            player_id,
            amount: 50,
            played: 1,
            won: 1,
            lost: 0,
        };
        let commit = Commit {
            hand: None,
            hand_players: Vec::new(),
            settlements: alloc::vec![change],
        };

        store.commit(commit.clone()).unwrap();
        assert_eq!(
            store.commit(commit),
            Err(StoreError::DuplicateSettlement {
                hand: HandId(0),
                player: player_id,
            })
        );

        let player = store.player(player_id).unwrap().unwrap();
        assert_eq!(player.balance, 150);
        assert_eq!(player.total_hands_won, 1);
        assert_eq!(store.players(), alloc::vec![player]);
    }

    #[test]
    fn balance_saturates_instead_of_overflowing() {
        let store = InMemoryStore::new();
        let rich = store.insert_player("rich", i64::MAX - 5);
        let poor = store.insert_player("poor", i64::MIN + 5);
        let change = |player_id, amount| BalanceChange {
            player_id,
            amount,
            played: 1,
            won: 0,
            lost: 0,
        };
        let commit = Commit {
            hand: None,
            hand_players: Vec::new(),
            settlements: alloc::vec![change(rich, 100), change(poor, -100)],
        };

        store.commit(commit).unwrap();
        assert_eq!(store.player(rich).unwrap().unwrap().balance, i64::MAX);
        assert_eq!(store.player(poor).unwrap().unwrap().balance, i64::MIN);
    }

    #[test]
    fn settlement_for_unknown_player_changes_nothing() {
        let store = InMemoryStore::new();
        let known = store.insert_player("ada", 100);
        let commit = Commit {
            hand: None,
            hand_players: Vec::new(),
            settlements: alloc::vec![
                BalanceChange {
                    player_id: known,
                    amount: 10,
                    played: 1,
                    won: 1,
                    lost: 0,
                },
                BalanceChange {
                    player_id: PlayerId(99),
                    amount: 10,
                    played: 1,
                    won: 1,
                    lost: 0,
                },
            ],
        };

        assert!(matches!(
            store.commit(commit),
            Err(StoreError::Missing { id: 99, .. })
        ));
        assert_eq!(store.player(known).unwrap().unwrap().balance, 100);
    }
}
