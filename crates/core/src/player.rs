// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tournament player types.
use serde::{Deserialize, Serialize};

use crate::poker::{Chips, PlayerCards};

/// A tournament player state.
///
/// The tournament fields survive across hands, the hand fields are reset by
/// [Player::start_hand].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// The player name, unique in a tournament.
    pub name: String,
    /// This player chips.
    pub chips: Chips,
    /// The player is still in the tournament.
    pub is_active: bool,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The player bet in the current betting round.
    pub bet: Chips,
    /// The chips this player put in the pot during this hand.
    pub contributed: Chips,
    /// The player folded this hand.
    pub folded: bool,
    /// The player has no chips left to bet this hand.
    pub all_in: bool,
    /// The player acted in the current betting round.
    pub has_acted: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
            is_active: chips > Chips::ZERO,
            hole_cards: PlayerCards::None,
            bet: Chips::ZERO,
            contributed: Chips::ZERO,
            folded: false,
            all_in: false,
            has_acted: false,
        }
    }

    /// The player is still contesting the pot.
    pub fn is_in_hand(&self) -> bool {
        self.is_active && !self.folded
    }

    /// The player is in the hand and has chips to bet.
    pub fn can_act(&self) -> bool {
        self.is_in_hand() && !self.all_in
    }

    /// How much this player has to add to match the given bet.
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet - self.bet
    }

    /// Moves chips from the stack to the pot without counting them as a bet.
    ///
    /// The amount is clamped to the player stack, returns the chips paid.
    pub fn pay(&mut self, chips: Chips) -> Chips {
        let paid = chips.min(self.chips);
        self.chips -= paid;
        self.contributed += paid;

        if self.chips == Chips::ZERO {
            self.all_in = true;
        }

        paid
    }

    /// Adds chips to this player bet, the player goes all in if the stack is
    /// not enough, returns the chips added.
    pub fn commit(&mut self, chips: Chips) -> Chips {
        let paid = self.pay(chips);
        self.bet += paid;
        paid
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.folded = true;
        self.hole_cards = PlayerCards::None;
    }

    /// Reset state for a new hand.
    pub fn start_hand(&mut self) {
        self.is_active = self.is_active && self.chips > Chips::ZERO;
        self.hole_cards = PlayerCards::None;
        self.bet = Chips::ZERO;
        self.contributed = Chips::ZERO;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
    }

    /// Reset state for a new betting round.
    pub fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        self.has_acted = false;
    }
}
