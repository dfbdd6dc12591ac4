// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Decision makers interface.
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

use sitgo_core::{
    event::Commentary,
    game_state::{HandSummary, LegalAction, PlayerView},
    poker::{Chips, PlayerAction},
};

/// Errors from a decision maker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    /// The decision maker didn't answer in time.
    #[error("no decision after {0:?}")]
    Timeout(Duration),
    /// The decision maker failed.
    #[error("decision failure: {0}")]
    Failure(String),
    /// The decision maker answer could not be parsed.
    #[error("malformed decision: {0}")]
    Malformed(String),
}

/// Something a player said to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTalk {
    /// The player who spoke.
    pub speaker: String,
    /// What was said.
    pub message: String,
    /// The hand it was said in.
    pub hand_number: u32,
}

/// A request for a decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The hand number.
    pub hand_number: u32,
    /// The game from the acting player point of view.
    pub view: PlayerView,
    /// The legal actions.
    pub legal: Vec<LegalAction>,
    /// The acting player notes.
    pub notes: String,
    /// Recent talk from the other players.
    pub table_talk: Vec<TableTalk>,
}

impl DecisionRequest {
    /// Finds the legal action of the given kind.
    pub fn find(&self, action: PlayerAction) -> Option<&LegalAction> {
        self.legal.iter().find(|la| la.action == action)
    }

    /// Checks if the player can check.
    pub fn can_check(&self) -> bool {
        self.find(PlayerAction::Check).is_some()
    }

    /// Checks if the player can call.
    pub fn can_call(&self) -> bool {
        self.find(PlayerAction::Call).is_some()
    }
}

/// A player decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// The action.
    pub action: PlayerAction,
    /// The chips to add for bets and raises.
    pub amount: Chips,
    /// What the player said about it.
    pub commentary: Commentary,
}

impl Decision {
    /// Creates a decision with a reasoning.
    pub fn new(action: PlayerAction, amount: Chips, reasoning: impl Into<String>) -> Self {
        Self {
            action,
            amount,
            commentary: Commentary {
                reasoning: reasoning.into(),
                ..Default::default()
            },
        }
    }

    /// Parses a decision from a free text answer.
    ///
    /// The answer must contain a JSON object with an `action` field and
    /// optional `amount`, `reasoning`, `inner_thoughts`, and `trash_talk`
    /// fields, any text around the object is ignored.
    pub fn parse(text: &str) -> Result<Self, DecisionError> {
        let malformed = |msg: &str| DecisionError::Malformed(msg.to_string());

        let start = text.find('{').ok_or_else(|| malformed("no JSON object"))?;

        // The first value ends the object, the text after it is ignored.
        let raw = serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<RawDecision>()
            .next()
            .ok_or_else(|| malformed("unterminated JSON object"))?
            .map_err(|e| DecisionError::Malformed(e.to_string()))?;

        let action = raw
            .action
            .parse::<PlayerAction>()
            .map_err(|e| DecisionError::Malformed(e.to_string()))?;

        // Negative or fractional amounts from sloppy answers.
        let amount = Chips::new(raw.amount.max(0.0) as u32);

        Ok(Self {
            action,
            amount,
            commentary: Commentary {
                reasoning: raw.reasoning,
                inner_thoughts: raw.inner_thoughts.filter(|s| !s.trim().is_empty()),
                trash_talk: raw.trash_talk.filter(|s| !s.trim().is_empty()),
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawDecision {
    action: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    inner_thoughts: Option<String>,
    #[serde(default)]
    trash_talk: Option<String>,
}

/// How a hand went for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandOutcome {
    /// The player won chips.
    Won,
    /// The player lost at showdown or was outlasted.
    Lost,
    /// The player folded.
    Folded,
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self {
            HandOutcome::Won => "won",
            HandOutcome::Lost => "lost",
            HandOutcome::Folded => "folded",
        };

        write!(f, "{outcome}")
    }
}

/// A request to reflect on a completed hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionRequest {
    /// The player reflecting.
    pub player: String,
    /// The completed hand.
    pub summary: HandSummary,
    /// How the hand went for this player.
    pub outcome: HandOutcome,
    /// The player notes.
    pub notes: String,
}

/// A poker decision maker.
pub trait Agent: Send {
    /// The player name.
    fn name(&self) -> &str;

    /// Chooses an action.
    fn decide<'a>(
        &'a mut self,
        request: &'a DecisionRequest,
    ) -> BoxFuture<'a, Result<Decision, DecisionError>>;

    /// Reflects on a completed hand, returns a note to remember.
    fn reflect<'a>(
        &'a mut self,
        request: &'a ReflectionRequest,
    ) -> BoxFuture<'a, Result<String, DecisionError>>;
}
