// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine error types.
use crate::poker::{Chips, PlayerAction};

/// Errors from the hand engine and the tournament.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The action or its amount is not in the player legal actions.
    #[error("illegal action {action} {amount} for player {player}")]
    IllegalAction {
        /// The player who tried the action.
        player: String,
        /// The action.
        action: PlayerAction,
        /// The action amount.
        amount: Chips,
    },
    /// There are not enough players to start a hand.
    #[error("not enough players to start a hand")]
    NotEnoughPlayers,
    /// There is no player at the given seat.
    #[error("no player at seat {0}")]
    UnknownSeat(usize),
    /// The tournament has already a winner.
    #[error("the tournament is complete")]
    TournamentComplete,
}

/// Tournament configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A tournament needs at least two players.
    #[error("a tournament needs at least 2 players, got {0}")]
    TooFewPlayers(usize),
    /// Players names must be unique.
    #[error("duplicate player name '{0}'")]
    DuplicateName(String),
    /// The blinds schedule has no levels.
    #[error("the blind structure is empty")]
    EmptyBlindStructure,
    /// Players must start with some chips.
    #[error("starting chips must be greater than zero")]
    NoStartingChips,
}
