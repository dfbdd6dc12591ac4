// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! It provides a [HandValue::eval] method that enumerates every 5 cards subset
//! of a 5, 6, or 7 cards hand, scores each one, and keeps the best. The value
//! retains the five cards that make the best hand, useful to show a winning
//! hand at showdown.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use sitgo_cards::Card;

use crate::combinations::Combinations;

/// Evaluator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The hand has fewer than 5 cards.
    #[error("need at least 5 cards to evaluate a hand, got {0}")]
    InsufficientCards(usize),
}

/// A hand category, ordered from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pair.
    HighCard = 1,
    /// One pair.
    Pair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// A straight of the same suit.
    StraightFlush,
    /// An ace high straight flush.
    RoyalFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HandRank::HighCard => "High Card",
            HandRank::Pair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        write!(f, "{label}")
    }
}

/// The value of a hand.
///
/// Values compare by rank first and then element-wise by the tiebreakers, two
/// values with equal rank and tiebreakers are an exact tie whatever the suits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandValue {
    rank: HandRank,
    tiebreakers: Vec<u8>,
    hand: [Card; 5],
}

impl HandValue {
    /// Evaluates the best 5 cards hand out of the given cards.
    pub fn eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        if cards.len() < 5 {
            return Err(EvalError::InsufficientCards(cards.len()));
        }

        let best = Combinations::<5>::new(cards.len())
            .map(|idx| Self::eval_five(idx.map(|i| cards[i])))
            .max()
            .ok_or(EvalError::InsufficientCards(cards.len()))?;

        Ok(best)
    }

    /// Compares two hands values.
    pub fn compare(a: &HandValue, b: &HandValue) -> Ordering {
        a.cmp(b)
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The ranks values used to break ties within a category.
    pub fn tiebreakers(&self) -> &[u8] {
        &self.tiebreakers
    }

    /// The five cards making this hand.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    fn eval_five(hand: [Card; 5]) -> HandValue {
        let mut ranks = hand.map(|c| c.rank().value());
        ranks.sort_unstable_by(|a, b| b.cmp(a));

        let is_flush = hand.iter().all(|c| c.suit() == hand[0].suit());
        let mut is_straight = ranks.windows(2).all(|w| w[0] == w[1] + 1);

        // The wheel, the ace plays low.
        if ranks == [14, 5, 4, 3, 2] {
            is_straight = true;
            ranks = [5, 4, 3, 2, 1];
        }

        // Distinct ranks with their multiplicity by (count desc, rank desc).
        let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
        for &r in &ranks {
            match groups.iter_mut().find(|(rank, _)| *rank == r) {
                Some((_, count)) => *count += 1,
                None => groups.push((r, 1)),
            }
        }
        groups.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        let counts = groups.iter().map(|g| g.1).collect::<Vec<_>>();
        let grouped = || groups.iter().map(|g| g.0).collect::<Vec<_>>();

        let (rank, tiebreakers) = if is_straight && is_flush {
            if ranks[0] == 14 {
                (HandRank::RoyalFlush, ranks.to_vec())
            } else {
                (HandRank::StraightFlush, ranks.to_vec())
            }
        } else {
            match counts.as_slice() {
                [4, 1] => (HandRank::FourOfAKind, grouped()),
                [3, 2] => (HandRank::FullHouse, grouped()),
                _ if is_flush => (HandRank::Flush, ranks.to_vec()),
                _ if is_straight => (HandRank::Straight, ranks.to_vec()),
                [3, 1, 1] => (HandRank::ThreeOfAKind, grouped()),
                [2, 2, 1] => (HandRank::TwoPair, grouped()),
                [2, 1, 1, 1] => (HandRank::Pair, grouped()),
                _ => (HandRank::HighCard, ranks.to_vec()),
            }
        };

        HandValue {
            rank,
            tiebreakers,
            hand,
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.tiebreakers.cmp(&other.tiebreakers))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for card in &self.hand {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}
