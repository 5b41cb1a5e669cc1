//! Card types.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Suit {
    /// Spades.
    #[cfg_attr(feature = "serde", serde(rename = "♠"))]
    Spades,
    /// Hearts.
    #[cfg_attr(feature = "serde", serde(rename = "♥"))]
    Hearts,
    /// Diamonds.
    #[cfg_attr(feature = "serde", serde(rename = "♦"))]
    Diamonds,
    /// Clubs.
    #[cfg_attr(feature = "serde", serde(rename = "♣"))]
    Clubs,
}

impl Suit {
    /// All suits in deck-building order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Returns the suit symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rank {
    /// Ace, counted as 11 unless that would bust the hand.
    #[cfg_attr(feature = "serde", serde(rename = "A"))]
    Ace,
    /// Two.
    #[cfg_attr(feature = "serde", serde(rename = "2"))]
    Two,
    /// Three.
    #[cfg_attr(feature = "serde", serde(rename = "3"))]
    Three,
    /// Four.
    #[cfg_attr(feature = "serde", serde(rename = "4"))]
    Four,
    /// Five.
    #[cfg_attr(feature = "serde", serde(rename = "5"))]
    Five,
    /// Six.
    #[cfg_attr(feature = "serde", serde(rename = "6"))]
    Six,
    /// Seven.
    #[cfg_attr(feature = "serde", serde(rename = "7"))]
    Seven,
    /// Eight.
    #[cfg_attr(feature = "serde", serde(rename = "8"))]
    Eight,
    /// Nine.
    #[cfg_attr(feature = "serde", serde(rename = "9"))]
    Nine,
    /// Ten.
    #[cfg_attr(feature = "serde", serde(rename = "10"))]
    Ten,
    /// Jack.
    #[cfg_attr(feature = "serde", serde(rename = "J"))]
    Jack,
    /// Queen.
    #[cfg_attr(feature = "serde", serde(rename = "Q"))]
    Queen,
    /// King.
    #[cfg_attr(feature = "serde", serde(rename = "K"))]
    King,
}

impl Rank {
    /// All ranks in deck-building order.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the nominal blackjack value of the rank (Ace = 11, faces = 10).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Ace => 11,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }

    /// Returns the rank label printed on the card.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A playing card. Cards are immutable once drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Card {
    /// The rank of the card.
    pub rank: Rank,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Returns the nominal value of the card (2..=11).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        matches!(self.rank, Rank::Ace)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
