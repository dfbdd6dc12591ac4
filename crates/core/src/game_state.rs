// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand state snapshots handed out to decision makers and observers.
use serde::{Deserialize, Serialize};

use crate::poker::{Card, Chips, PlayerAction, Stage};

/// An entry in the hand actions log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: String,
    /// The action.
    pub action: PlayerAction,
    /// The chips the player put in the pot with this action.
    pub amount: Chips,
    /// The stage the action was taken in.
    pub stage: Stage,
}

/// A legal action with the range of chips allowed for it.
///
/// Amounts are the chips the player adds to the pot with the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    /// The action.
    pub action: PlayerAction,
    /// The minimum amount.
    pub min: Chips,
    /// The maximum amount.
    pub max: Chips,
}

impl LegalAction {
    /// Creates a new legal action.
    pub fn new(action: PlayerAction, min: Chips, max: Chips) -> Self {
        Self { action, min, max }
    }

    /// Clamps an amount to this action range.
    pub fn clamp(&self, amount: Chips) -> Chips {
        amount.clamp(self.min, self.max)
    }

    /// Checks if the amount is in this action range.
    pub fn allows(&self, amount: Chips) -> bool {
        self.min <= amount && amount <= self.max
    }
}

/// What a player can see of an opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentView {
    /// The opponent name.
    pub name: String,
    /// The opponent chips.
    pub chips: Chips,
    /// The opponent bet in this betting round.
    pub bet: Chips,
    /// The opponent folded.
    pub folded: bool,
    /// The opponent is all in.
    pub all_in: bool,
}

/// The game state from a player point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    /// The player name.
    pub name: String,
    /// The player hole cards.
    pub hole_cards: Vec<Card>,
    /// The player chips.
    pub chips: Chips,
    /// The player bet in this betting round.
    pub bet: Chips,
    /// The chips in the pot.
    pub pot: Chips,
    /// The community cards.
    pub board: Vec<Card>,
    /// The bet to match in this betting round.
    pub current_bet: Chips,
    /// The chips this player must add to call.
    pub to_call: Chips,
    /// The minimum raise increment.
    pub min_raise: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
    /// The hand stage.
    pub stage: Stage,
    /// The other players still in the tournament.
    pub opponents: Vec<OpponentView>,
    /// The most recent actions in this hand.
    pub history: Vec<ActionRecord>,
}

/// A summary of a completed hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSummary {
    /// The hand number.
    pub hand_number: u32,
    /// The pot before it was paid to the winners.
    pub pot: Chips,
    /// The community cards.
    pub board: Vec<Card>,
    /// All the hand actions.
    pub actions: Vec<ActionRecord>,
    /// The last stage reached.
    pub stage: Stage,
    /// The players who won chips.
    pub winners: Vec<String>,
}
