//! Settlement outcomes and payout calculation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::hand::{self, HandPlayer, HandPlayerStatus};
use crate::options::{GameOptions, RoundingMode};

/// Result of a single hand after the dealer has played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum HandOutcome {
    /// Player beats the dealer or the dealer busts.
    Win,
    /// Dealer beats the player.
    Lose,
    /// Tie; the bet is returned.
    Push,
    /// Player has a natural the dealer does not match.
    Blackjack,
    /// Player went over 21.
    Bust,
}

impl HandOutcome {
    /// Whether the outcome counts as a win in player statistics.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }

    /// Whether the outcome counts as a loss in player statistics.
    #[must_use]
    pub const fn is_loss(self) -> bool {
        matches!(self, Self::Lose | Self::Bust)
    }
}

/// Settled amounts for one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Amount returned to the player, stake included.
    pub payout: u64,
    /// Net change to the player's balance.
    pub money_change: i64,
}

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => amount.ceil() as u64,
        RoundingMode::Down => amount.floor() as u64,
        RoundingMode::Nearest => amount.round() as u64,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as u64,
        RoundingMode::Down => libm::floor(amount) as u64,
        RoundingMode::Nearest => libm::round(amount) as u64,
    }
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

/// Returns the amount paid back on `bet` for `outcome`, stake included.
///
/// Blackjack pays `1 + blackjack_pays` times the bet (2.5× by default), a
/// win pays 2×, a push returns the bet and a loss or bust pays nothing.
#[must_use]
pub fn payout(bet: u64, outcome: HandOutcome, options: &GameOptions) -> u64 {
    match outcome {
        HandOutcome::Blackjack => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for monetary values"
            )]
            let amount = bet as f64 * (1.0 + options.blackjack_pays);
            round_amount(amount, options.rounding_blackjack)
        }
        HandOutcome::Win => bet.saturating_mul(2),
        HandOutcome::Push => bet,
        HandOutcome::Lose | HandOutcome::Bust => 0,
    }
}

/// Decides the outcome of `player` against the final dealer cards.
#[must_use]
pub fn outcome(player: &HandPlayer, dealer_cards: &[Card]) -> HandOutcome {
    if player.status == HandPlayerStatus::Bust {
        return HandOutcome::Bust;
    }

    let dealer_blackjack = hand::is_blackjack(dealer_cards);
    if player.has_blackjack() {
        return if dealer_blackjack {
            HandOutcome::Push
        } else {
            HandOutcome::Blackjack
        };
    }

    let player_value = player.hand_value();
    let dealer_value = hand::value(dealer_cards);
    if dealer_value > 21 || player_value > dealer_value {
        HandOutcome::Win
    } else if player_value < dealer_value {
        HandOutcome::Lose
    } else {
        HandOutcome::Push
    }
}

/// Resolves `player` against the final dealer cards.
#[must_use]
pub fn settle(player: &HandPlayer, dealer_cards: &[Card], options: &GameOptions) -> Settlement {
    let outcome = outcome(player, dealer_cards);
    let payout = payout(player.bet_amount, outcome, options);
    Settlement {
        outcome,
        payout,
        money_change: signed(payout) - signed(player.bet_amount),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::card::{Rank, Suit};
    use crate::id::{HandId, HandPlayerId, PlayerId};

    fn cards(ranks: &[Rank]) -> Vec<Card> {
        ranks.iter().map(|&rank| Card::new(rank, Suit::Clubs)).collect()
    }

    fn player(ranks: &[Rank], bet: u64) -> HandPlayer {
        HandPlayer::new(HandPlayerId(1), HandId(1), PlayerId(1), bet, cards(ranks))
    }

    #[test]
    fn payout_table_for_a_hundred() {
        let options = GameOptions::default();
        let dealer = cards(&[Rank::Ten, Rank::Eight]);

        let win = settle(&player(&[Rank::Ten, Rank::Nine], 100), &dealer, &options);
        assert_eq!(win.outcome, HandOutcome::Win);
        assert_eq!((win.payout, win.money_change), (200, 100));

        let natural = settle(&player(&[Rank::Ace, Rank::Queen], 100), &dealer, &options);
        assert_eq!(natural.outcome, HandOutcome::Blackjack);
        assert_eq!((natural.payout, natural.money_change), (250, 150));

        let push = settle(&player(&[Rank::Ten, Rank::Eight], 100), &dealer, &options);
        assert_eq!(push.outcome, HandOutcome::Push);
        assert_eq!((push.payout, push.money_change), (100, 0));

        let lose = settle(&player(&[Rank::Ten, Rank::Seven], 100), &dealer, &options);
        assert_eq!(lose.outcome, HandOutcome::Lose);
        assert_eq!((lose.payout, lose.money_change), (0, -100));

        let mut busted = player(&[Rank::Ten, Rank::Six], 100);
        busted.add_card(Card::new(Rank::King, Suit::Hearts));
        let bust = settle(&busted, &dealer, &options);
        assert_eq!(bust.outcome, HandOutcome::Bust);
        assert_eq!((bust.payout, bust.money_change), (0, -100));
    }

    #[test]
    fn natural_against_dealer_natural_pushes() {
        let dealer = cards(&[Rank::Ace, Rank::King]);
        let result = settle(
            &player(&[Rank::Ace, Rank::Jack], 40),
            &dealer,
            &GameOptions::default(),
        );
        assert_eq!(result.outcome, HandOutcome::Push);
        assert_eq!(result.payout, 40);
    }

    #[test]
    fn dealer_bust_pays_every_standing_hand() {
        let dealer = cards(&[Rank::Ten, Rank::Six, Rank::Nine]);
        assert_eq!(
            outcome(&player(&[Rank::Two, Rank::Three], 10), &dealer),
            HandOutcome::Win
        );
    }

    #[test]
    fn blackjack_payout_rounds_to_nearest() {
        let options = GameOptions::default();
        assert_eq!(payout(15, HandOutcome::Blackjack, &options), 38);
        let down = options.with_rounding_blackjack(RoundingMode::Down);
        assert_eq!(payout(15, HandOutcome::Blackjack, &down), 37);
    }
}
