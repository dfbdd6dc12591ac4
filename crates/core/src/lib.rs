// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sitgo Poker core types.
//!
//! A [Tournament](tournament::Tournament) owns the players and the blinds
//! schedule and starts hands, each hand is driven by a [PokerGame](game::PokerGame)
//! that borrows the tournament players for the duration of the hand so that
//! chips movements are immediately visible to the tournament.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod event;
pub mod game;
pub mod game_state;
pub mod player;
pub mod poker;
pub mod tournament;

pub use error::{ConfigError, GameError};
