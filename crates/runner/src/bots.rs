// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Built in agents.
use futures_util::{FutureExt, future::BoxFuture};
use rand::{SeedableRng, prelude::*, rngs::StdRng};

use sitgo_core::poker::{Chips, PlayerAction};

use crate::{
    agent::{Agent, Decision, DecisionError, DecisionRequest, HandOutcome, ReflectionRequest},
    prompt,
};

/// An agent that always calls or checks.
#[derive(Debug, Clone)]
pub struct CallingAgent {
    name: String,
}

impl CallingAgent {
    /// Creates a new calling agent.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn choose(req: &DecisionRequest) -> Decision {
        if req.can_call() {
            Decision::new(PlayerAction::Call, Chips::ZERO, "Calling station")
        } else if req.can_check() {
            Decision::new(PlayerAction::Check, Chips::ZERO, "Free card")
        } else if req.find(PlayerAction::AllIn).is_some() {
            Decision::new(PlayerAction::AllIn, Chips::ZERO, "Pot committed")
        } else {
            Decision::new(PlayerAction::Fold, Chips::ZERO, "Nothing to call with")
        }
    }
}

impl Agent for CallingAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide<'a>(
        &'a mut self,
        request: &'a DecisionRequest,
    ) -> BoxFuture<'a, Result<Decision, DecisionError>> {
        let decision = Self::choose(request);
        async move { Ok(decision) }.boxed()
    }

    fn reflect<'a>(
        &'a mut self,
        _request: &'a ReflectionRequest,
    ) -> BoxFuture<'a, Result<String, DecisionError>> {
        async { Ok(String::new()) }.boxed()
    }
}

/// An agent that picks random legal actions.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Creates a random agent.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rng(name, StdRng::from_os_rng())
    }

    /// Creates a random agent with a seed.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(name, StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: impl Into<String>, rng: StdRng) -> Self {
        Self {
            name: name.into(),
            rng,
        }
    }

    fn choose(&mut self, req: &DecisionRequest) -> Decision {
        let Some(choice) = req
            .legal
            .choose_weighted(&mut self.rng, |la| match la.action {
                // Fold less when checking is free.
                PlayerAction::Fold if req.can_check() => 1,
                PlayerAction::Fold => 15,
                PlayerAction::Check | PlayerAction::Call => 60,
                PlayerAction::Bet | PlayerAction::Raise => 20,
                PlayerAction::AllIn => 5,
            })
            .ok()
            .copied()
        else {
            return Decision::new(PlayerAction::Fold, Chips::ZERO, "No legal actions");
        };

        // Mostly small bets, the range max is the whole stack.
        let amount = match choice.action {
            PlayerAction::Bet | PlayerAction::Raise => {
                let max = choice.min + (choice.max - choice.min) / 4;
                Chips::new(self.rng.random_range(choice.min.amount()..=max.amount()))
            }
            _ => choice.min,
        };

        Decision::new(choice.action, amount, "Feeling lucky")
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide<'a>(
        &'a mut self,
        request: &'a DecisionRequest,
    ) -> BoxFuture<'a, Result<Decision, DecisionError>> {
        let decision = self.choose(request);
        async move { Ok(decision) }.boxed()
    }

    fn reflect<'a>(
        &'a mut self,
        request: &'a ReflectionRequest,
    ) -> BoxFuture<'a, Result<String, DecisionError>> {
        let note = match request.outcome {
            HandOutcome::Won => format!(
                "Won hand #{} pot {}",
                request.summary.hand_number, request.summary.pot
            ),
            _ => String::new(),
        };

        async move { Ok(note) }.boxed()
    }
}

/// A text completion service, such as a language model.
pub trait Completion: Send {
    /// Completes a prompt.
    fn complete(&mut self, prompt: String) -> BoxFuture<'_, Result<String, DecisionError>>;
}

/// An agent that renders requests as text prompts and parses the answers.
#[derive(Debug)]
pub struct TextAgent<C> {
    name: String,
    personality: Option<String>,
    completion: C,
}

impl<C: Completion> TextAgent<C> {
    /// Creates a new agent backed by the given completion.
    pub fn new(name: impl Into<String>, completion: C) -> Self {
        Self {
            name: name.into(),
            personality: None,
            completion,
        }
    }

    /// Sets a personality prepended to every prompt.
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = Some(personality.into());
        self
    }

    fn with_personality_hint(&self, prompt: String) -> String {
        match &self.personality {
            Some(personality) => format!("[Your personality: {personality}]\n\n{prompt}"),
            None => prompt,
        }
    }
}

impl<C: Completion> Agent for TextAgent<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide<'a>(
        &'a mut self,
        request: &'a DecisionRequest,
    ) -> BoxFuture<'a, Result<Decision, DecisionError>> {
        let prompt = self.with_personality_hint(prompt::decision(&self.name, request));
        async move {
            let answer = self.completion.complete(prompt).await?;
            Decision::parse(&answer)
        }
        .boxed()
    }

    fn reflect<'a>(
        &'a mut self,
        request: &'a ReflectionRequest,
    ) -> BoxFuture<'a, Result<String, DecisionError>> {
        let prompt = self.with_personality_hint(prompt::reflection(request));
        async move {
            let answer = self.completion.complete(prompt).await?;
            Ok(answer.trim().to_string())
        }
        .boxed()
    }
}
