// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tournament events.
//!
//! The engine reports what happens at the table through an [EventSink], the
//! sink decides what to do with them, a UI would render them, a logger would
//! write them out. Sinks are called synchronously and must not block.
use serde::{Deserialize, Serialize};

use crate::{
    poker::{Card, Chips, PlayerAction, Stage},
    tournament::{HandResult, TournamentResult},
};

/// A player name with its stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStack {
    /// The player name.
    pub name: String,
    /// The player chips.
    pub chips: Chips,
}

impl PlayerStack {
    /// Creates a new player stack.
    pub fn new(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
        }
    }
}

/// The free text a decision maker attached to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commentary {
    /// Why the action was taken.
    pub reasoning: String,
    /// The player private thoughts.
    pub inner_thoughts: Option<String>,
    /// A message for the other players.
    pub trash_talk: Option<String>,
}

/// Information about a hand that has just been dealt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandStart {
    /// The hand number, starting from 1.
    pub hand_number: u32,
    /// The players dealt into the hand.
    pub players: Vec<PlayerStack>,
    /// The blind level number, starting from 1.
    pub level: usize,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// The ante.
    pub ante: Chips,
    /// The player on the button.
    pub button: String,
    /// The player who posted the small blind.
    pub small_blind_player: String,
    /// The player who posted the big blind.
    pub big_blind_player: String,
    /// The preflop acting order.
    pub acting_order: Vec<String>,
}

/// A tournament event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The tournament has started.
    TournamentStart {
        /// The players with their starting stacks.
        players: Vec<PlayerStack>,
        /// The first level small blind.
        small_blind: Chips,
        /// The first level big blind.
        big_blind: Chips,
    },
    /// A new hand has been dealt.
    HandStart(HandStart),
    /// A player acted.
    Action {
        /// The player who acted.
        player: String,
        /// The action.
        action: PlayerAction,
        /// The chips the player put in the pot.
        amount: Chips,
        /// The pot after the action.
        pot: Chips,
        /// All the players stacks after the action.
        stacks: Vec<PlayerStack>,
        /// What the player said about the action.
        commentary: Commentary,
    },
    /// Community cards have been dealt.
    CommunityCards {
        /// The new stage.
        stage: Stage,
        /// All the community cards.
        cards: Vec<Card>,
    },
    /// A hand has been settled.
    HandResult(HandResult),
    /// A player lost all its chips.
    Elimination {
        /// The eliminated player.
        player: String,
        /// The player finishing place.
        place: usize,
    },
    /// The blinds went up.
    LevelUp {
        /// The new level number, starting from 1.
        level: usize,
        /// The new small blind.
        small_blind: Chips,
        /// The new big blind.
        big_blind: Chips,
        /// The new ante.
        ante: Chips,
    },
    /// The tournament is over.
    TournamentEnd(TournamentResult),
}

/// A consumer of tournament events.
pub trait EventSink {
    /// Handles an event.
    fn send(&mut self, event: Event);
}

/// Collects events in memory.
impl EventSink for Vec<Event> {
    fn send(&mut self, event: Event) {
        self.push(event);
    }
}

/// A sink that drops all the events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn send(&mut self, _event: Event) {}
}
