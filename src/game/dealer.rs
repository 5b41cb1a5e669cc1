extern crate alloc;

use alloc::vec::Vec;

use crate::clock::Clock;
use crate::error::Error;
use crate::event::{EventSink, TableEvent};
use crate::id::HandId;
use crate::result;
use crate::store::{BalanceChange, Commit, Store};
use crate::view::HandView;

use super::{Game, HandStatus};

/// The dealer stands on any total of at least this value, soft or hard.
pub const DEALER_STANDS_ON: u8 = 17;

/// Returns whether the dealer must draw on `value`.
#[must_use]
pub const fn dealer_should_draw(value: u8) -> bool {
    value < DEALER_STANDS_ON
}

impl<S: Store, E: EventSink, C: Clock> Game<S, E, C> {
    /// Dealer plays their hand and every hand player is settled.
    ///
    /// The hole card is revealed and the dealer draws while the total is
    /// below 17. Each hand player is then resolved against the dealer, the
    /// players' balances move by their `money_change` and the hand finishes.
    /// Hand players still active at this point are settled on their current
    /// total.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the hand does not exist,
    /// [`Error::AlreadyFinished`] unless it is active or in the dealer's turn,
    /// [`Error::DeckExhausted`] if the dealer runs out of cards, or a store
    /// error. Balances are untouched on error.
    pub fn dealer_play(&self, hand_id: HandId) -> Result<HandView, Error> {
        let view = self.with_hand_lock(hand_id, || {
            let mut hand = self.hand_record(hand_id)?;
            if !matches!(hand.status, HandStatus::Active | HandStatus::DealerTurn) {
                return Err(Error::AlreadyFinished(hand_id));
            }

            hand.status = HandStatus::DealerTurn;
            hand.dealer_hidden = false;
            while dealer_should_draw(hand.dealer_value()) {
                let card = hand.draw()?;
                hand.dealer_cards.push(card);
            }

            let mut players = self.store.hand_players(hand_id)?;
            let mut changes: Vec<BalanceChange> = Vec::new();
            for player in &mut players {
                let settled = result::settle(player, &hand.dealer_cards, &self.options);
                player.result = Some(settled.outcome);
                player.payout = settled.payout;
                player.money_change = settled.money_change;

                // Split hands share one balance change per player.
                let existing = changes
                    .iter()
                    .position(|change| change.player_id == player.player_id);
                let index = if let Some(index) = existing {
                    index
                } else {
                    changes.push(BalanceChange {
                        player_id: player.player_id,
                        amount: 0,
                        played: 0,
                        won: 0,
                        lost: 0,
                    });
                    changes.len() - 1
                };
                let change = &mut changes[index];
                change.amount = change.amount.saturating_add(settled.money_change);
                change.played = change.played.saturating_add(1);
                change.won = change.won.saturating_add(u32::from(settled.outcome.is_win()));
                change.lost = change.lost.saturating_add(u32::from(settled.outcome.is_loss()));
            }

            hand.status = HandStatus::Finished;
            hand.end_time = Some(self.clock.now_millis());

            let view = HandView::new(&hand, &players);
            self.store.commit(Commit {
                hand: Some(hand),
                hand_players: players,
                settlements: changes,
            })?;
            Ok(view)
        })?;

        log::info!(
            "table {}: hand {hand_id} finished, dealer {}",
            view.table_id,
            view.dealer_value.unwrap_or_default()
        );
        self.publish(TableEvent::HandFinished {
            table_id: view.table_id,
            hand: view.clone(),
        });
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealer_hits_sixteen_and_stands_on_seventeen() {
        assert!(dealer_should_draw(16));
        assert!(!dealer_should_draw(17));
        assert!(!dealer_should_draw(22));
    }
}
