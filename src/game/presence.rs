extern crate alloc;

use alloc::string::String;

use crate::clock::Clock;
use crate::error::Error;
use crate::event::{EventSink, TableEvent};
use crate::id::{PlayerId, TableId};
use crate::store::Store;

use super::Game;

impl<S: Store, E: EventSink, C: Clock> Game<S, E, C> {
    /// Announces that a player sat down at a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown player, or a store error.
    pub fn join_table(&self, table_id: TableId, player_id: PlayerId) -> Result<(), Error> {
        let player = self.player_record(player_id)?;
        log::debug!("table {table_id}: player {player_id} joined");
        self.publish(TableEvent::PlayerJoined {
            table_id,
            player_id,
            player_name: player.name,
        });
        Ok(())
    }

    /// Announces that a player left a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown player, or a store error.
    pub fn leave_table(&self, table_id: TableId, player_id: PlayerId) -> Result<(), Error> {
        let player = self.player_record(player_id)?;
        log::debug!("table {table_id}: player {player_id} left");
        self.publish(TableEvent::PlayerLeft {
            table_id,
            player_id,
            player_name: player.name,
        });
        Ok(())
    }

    /// Relays a chat line to a table.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank message or one longer than
    /// `max_chat_length` characters, [`Error::NotFound`] for an unknown
    /// player, or a store error.
    pub fn chat(&self, table_id: TableId, player_id: PlayerId, message: &str) -> Result<(), Error> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::Validation {
                field: "message",
                reason: "must not be blank",
            });
        }
        if message.chars().count() > self.options.max_chat_length {
            return Err(Error::Validation {
                field: "message",
                reason: "too long",
            });
        }

        let player = self.player_record(player_id)?;
        self.publish(TableEvent::ChatMessage {
            table_id,
            player_id,
            player_name: player.name,
            message: String::from(message),
            timestamp: self.clock.now_millis(),
        });
        Ok(())
    }
}
