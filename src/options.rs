//! Table configuration options.

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves away from zero.
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_blackjack_pays(1.5)
///     .with_max_players(5);
/// assert_eq!(options.max_players, 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Blackjack profit ratio (typically 1.5, paying 2.5× the bet in total).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Maximum number of seated players per hand.
    pub max_players: u8,
    /// Maximum length of a chat message, in characters.
    pub max_chat_length: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Nearest,
            max_players: 7,
            max_chat_length: 500,
        }
    }
}

impl GameOptions {
    /// Sets the blackjack profit ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the seat cap.
    ///
    /// A single deck cannot serve more than seven seats safely, so values
    /// above seven are clamped.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// assert_eq!(GameOptions::default().with_max_players(9).max_players, 7);
    /// ```
    #[must_use]
    pub const fn with_max_players(mut self, players: u8) -> Self {
        self.max_players = if players > 7 { 7 } else { players };
        self
    }

    /// Sets the maximum chat message length.
    #[must_use]
    pub const fn with_max_chat_length(mut self, length: usize) -> Self {
        self.max_chat_length = length;
        self
    }
}
