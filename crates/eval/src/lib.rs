// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sitgo Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands. The evaluator scores every
//! 5 cards subset of a hand and keeps the best one, a [HandValue] is ordered by
//! hand category first and by the category tiebreakers after.
//!
//! ```
//! # use sitgo_eval::*;
//! let cards = |s: &str| {
//!     s.split_whitespace()
//!         .map(|c| c.parse::<Card>().unwrap())
//!         .collect::<Vec<_>>()
//! };
//!
//! let v1 = HandValue::eval(&cards("AS AH KD KC 2C")).unwrap();
//! let v2 = HandValue::eval(&cards("7S 6S 5S 4S 3S 2D 2H")).unwrap();
//! assert_eq!(v1.rank(), HandRank::TwoPair);
//! assert_eq!(v2.rank(), HandRank::StraightFlush);
//! assert!(v2 > v1);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod combinations;
pub mod eval;
pub use eval::{EvalError, HandRank, HandValue};

// Reexport cards types.
pub use sitgo_cards::{Card, Deck, Rank, Suit};
