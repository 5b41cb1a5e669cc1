extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::clock::Clock;
use crate::deck;
use crate::error::Error;
use crate::event::{EventSink, TableEvent};
use crate::hand::HandPlayer;
use crate::id::{PlayerId, TableId};
use crate::store::{Commit, Store};
use crate::view::HandView;

use super::{Game, Hand, HandStatus};

impl<S: Store, E: EventSink, C: Clock> Game<S, E, C> {
    /// Starts a hand with a freshly shuffled deck.
    ///
    /// Each player receives two cards and the dealer two, the first of which
    /// stays face down. A player dealt a natural is marked
    /// [`Blackjack`](crate::HandPlayerStatus::Blackjack) right away.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an empty or duplicated seat list, a
    /// bet list of the wrong length or more players than seats,
    /// [`Error::NotFound`] for an unknown player,
    /// [`Error::InsufficientBalance`] naming the first player whose balance
    /// is below their bet, or a store error.
    pub fn start(
        &self,
        table_id: TableId,
        player_ids: &[PlayerId],
        bet_amounts: &[u64],
    ) -> Result<HandView, Error> {
        self.check_seats(player_ids, bet_amounts)?;
        let deck = deck::create_deck(&mut *self.rng.lock());
        self.deal(table_id, player_ids, bet_amounts, deck)
    }

    /// Starts a hand from a prepared deck, drawn from the back.
    ///
    /// Used to replay a recorded shoe.
    ///
    /// # Errors
    ///
    /// As [`Game::start`], plus [`Error::Validation`] if `deck` is not one
    /// complete 52-card deck.
    pub fn start_with_deck(
        &self,
        table_id: TableId,
        player_ids: &[PlayerId],
        bet_amounts: &[u64],
        deck: Vec<Card>,
    ) -> Result<HandView, Error> {
        if !deck::is_complete_deck(&deck) {
            return Err(Error::Validation {
                field: "deck",
                reason: "must be one complete 52-card deck",
            });
        }
        self.check_seats(player_ids, bet_amounts)?;
        self.deal(table_id, player_ids, bet_amounts, deck)
    }

    fn check_seats(&self, player_ids: &[PlayerId], bet_amounts: &[u64]) -> Result<(), Error> {
        if player_ids.is_empty() {
            return Err(Error::Validation {
                field: "player_ids",
                reason: "at least one player is required",
            });
        }
        if bet_amounts.len() != player_ids.len() {
            return Err(Error::Validation {
                field: "bet_amounts",
                reason: "must hold one bet per player",
            });
        }
        if player_ids.len() > usize::from(self.options.max_players) {
            return Err(Error::Validation {
                field: "player_ids",
                reason: "more players than seats",
            });
        }
        for (index, id) in player_ids.iter().enumerate() {
            if player_ids[..index].contains(id) {
                return Err(Error::Validation {
                    field: "player_ids",
                    reason: "a player may only be seated once",
                });
            }
        }

        let players = player_ids
            .iter()
            .map(|&id| self.player_record(id))
            .collect::<Result<Vec<_>, _>>()?;

        for (player, &bet) in players.iter().zip(bet_amounts) {
            if !player.can_cover(bet) {
                return Err(Error::InsufficientBalance {
                    player: player.id,
                    required: bet,
                });
            }
        }

        Ok(())
    }

    fn deal(
        &self,
        table_id: TableId,
        player_ids: &[PlayerId],
        bet_amounts: &[u64],
        deck: Vec<Card>,
    ) -> Result<HandView, Error> {
        let hand_id = self.store.next_hand_id()?;

        // The id is fresh, so nothing else can reach the hand before this commit.
        let dealt = deck::deal_initial(deck, player_ids.len())?;

        let hand = Hand {
            id: hand_id,
            table_id,
            status: HandStatus::Active,
            start_time: self.clock.now_millis(),
            end_time: None,
            deck: dealt.deck,
            dealer_cards: dealt.dealer.to_vec(),
            dealer_hidden: true,
            player_ids: player_ids.to_vec(),
        };

        let mut players = Vec::with_capacity(player_ids.len());
        for ((&player_id, &bet), cards) in player_ids.iter().zip(bet_amounts).zip(dealt.players) {
            let id = self.store.next_hand_player_id()?;
            players.push(HandPlayer::new(id, hand_id, player_id, bet, cards.to_vec()));
        }

        let view = HandView::new(&hand, &players);
        self.store.commit(Commit::new(hand, players))?;

        log::info!(
            "table {table_id}: hand {hand_id} started with {} players",
            player_ids.len()
        );
        self.publish(TableEvent::HandStarted {
            table_id,
            hand: view.clone(),
        });
        Ok(view)
    }
}
