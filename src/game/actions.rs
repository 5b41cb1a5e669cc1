extern crate alloc;

use alloc::vec;

use crate::clock::Clock;
use crate::error::{ActionState, Error};
use crate::event::{EventSink, TableEvent};
use crate::hand::{HandPlayer, HandPlayerStatus};
use crate::id::HandPlayerId;
use crate::store::{Commit, Store};
use crate::view::HandView;

use super::{Action, Game, Hand, HandStatus};

fn ensure_turn(hand: &Hand, player: &HandPlayer, action: Action) -> Result<(), Error> {
    match hand.status {
        HandStatus::Active => {}
        HandStatus::Finished => return Err(Error::AlreadyFinished(hand.id)),
        status => return Err(Error::invalid(action, ActionState::Hand(status))),
    }

    if player.status != HandPlayerStatus::Active {
        return Err(Error::invalid(action, ActionState::Player(player.status)));
    }

    Ok(())
}

impl<S: Store, E: EventSink, C: Clock> Game<S, E, C> {
    /// Applies one player action under the hand lock.
    ///
    /// `apply` works on copies of the records; nothing is saved unless it
    /// succeeds. It may return a second hand created by a split.
    fn act<F>(&self, hand_player_id: HandPlayerId, action: Action, apply: F) -> Result<HandView, Error>
    where
        F: FnOnce(&mut Hand, &mut HandPlayer) -> Result<Option<HandPlayer>, Error>,
    {
        let hand_id = self.hand_player_record(hand_player_id)?.hand_id;

        let (view, event) = self.with_hand_lock(hand_id, || {
            let mut player = self.hand_player_record(hand_player_id)?;
            let mut hand = self.hand_record(hand_id)?;
            ensure_turn(&hand, &player, action)?;

            let split = apply(&mut hand, &mut player)?;

            log::debug!(
                "hand {hand_id}: {action} by hand player {hand_player_id} -> {:?} ({})",
                player.status,
                player.hand_value()
            );
            let event = TableEvent::PlayerAction {
                table_id: hand.table_id,
                hand_id,
                hand_player_id,
                action,
                status: player.status,
                hand_value: player.hand_value(),
            };

            let mut updated = vec![player];
            updated.extend(split);
            self.store.commit(Commit::new(hand.clone(), updated))?;

            Ok::<_, Error>((self.view_of(&hand)?, event))
        })?;

        self.publish(event);
        Ok(view)
    }

    fn ensure_covers(&self, player: &HandPlayer) -> Result<(), Error> {
        let owner = self.player_record(player.player_id)?;
        if owner.can_cover(player.bet_amount) {
            Ok(())
        } else {
            Err(Error::InsufficientBalance {
                player: owner.id,
                required: player.bet_amount,
            })
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// The hand goes bust if the new total is over 21.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown hand player,
    /// [`Error::AlreadyFinished`] if the hand was settled,
    /// [`Error::InvalidAction`] if the hand player is not active,
    /// [`Error::DeckExhausted`] if no cards remain, or a store error.
    pub fn hit(&self, hand_player_id: HandPlayerId) -> Result<HandView, Error> {
        self.act(hand_player_id, Action::Hit, |hand, player| {
            player.add_card(hand.draw()?);
            Ok(None)
        })
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown hand player,
    /// [`Error::AlreadyFinished`] if the hand was settled,
    /// [`Error::InvalidAction`] if the hand player is not active, or a store
    /// error.
    pub fn stand(&self, hand_player_id: HandPlayerId) -> Result<HandView, Error> {
        self.act(hand_player_id, Action::Stand, |_, player| {
            player.status = HandPlayerStatus::Stand;
            Ok(None)
        })
    }

    /// Player action: Double down (double bet, receive one card, then stand).
    ///
    /// The hand always ends its turn: it stands, or busts on the new card.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] unless the hand player is active with
    /// exactly two cards, [`Error::InsufficientBalance`] if the player's
    /// balance is below the current bet, [`Error::DeckExhausted`] if no cards
    /// remain, and the lookup errors of [`Game::hit`].
    pub fn double_down(&self, hand_player_id: HandPlayerId) -> Result<HandView, Error> {
        self.act(hand_player_id, Action::DoubleDown, |hand, player| {
            let count = player.cards().len();
            if count != 2 {
                return Err(Error::invalid(
                    Action::DoubleDown,
                    ActionState::CardCount(count),
                ));
            }
            self.ensure_covers(player)?;

            player.bet_amount = player.bet_amount.saturating_mul(2);
            player.add_card(hand.draw()?);
            if player.status == HandPlayerStatus::Active {
                player.status = HandPlayerStatus::Stand;
            }
            Ok(None)
        })
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The second card moves to a new hand player with the same bet, then
    /// each hand is dealt one card. Both hands stay active and may act again,
    /// including another split. A two-card 21 after a split settles as a
    /// blackjack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] unless the hand player is active and
    /// holds exactly one pair, [`Error::InsufficientBalance`] if the player's
    /// balance is below the bet, [`Error::DeckExhausted`] if no cards remain,
    /// and the lookup errors of [`Game::hit`].
    pub fn split(&self, hand_player_id: HandPlayerId) -> Result<HandView, Error> {
        self.act(hand_player_id, Action::Split, |hand, player| {
            let count = player.cards().len();
            if count != 2 {
                return Err(Error::invalid(Action::Split, ActionState::CardCount(count)));
            }
            if !player.can_split() {
                return Err(Error::invalid(Action::Split, ActionState::Unpaired));
            }
            self.ensure_covers(player)?;

            let split_card = player
                .take_split_card()
                .ok_or(Error::invalid(Action::Split, ActionState::Unpaired))?;
            let mut second = HandPlayer::new(
                self.store.next_hand_player_id()?,
                player.hand_id,
                player.player_id,
                player.bet_amount,
                vec![split_card],
            );

            player.add_card(hand.draw()?);
            second.add_card(hand.draw()?);
            Ok(Some(second))
        })
    }
}
