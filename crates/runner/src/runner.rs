// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tournament driver.
use anyhow::{Result, bail};
use futures_util::future::join_all;
use log::{error, warn};
use std::time::Duration;
use tokio::time;

use sitgo_core::{
    GameError,
    event::{Event, EventSink},
    game::PokerGame,
    game_state::HandSummary,
    poker::Stage,
    tournament::{HandResult, Tournament, TournamentResult},
};

use crate::{
    agent::{Agent, HandOutcome, ReflectionRequest},
    notes::Notes,
    orchestrator::{BettingRoundOrchestrator, Seat, TalkLog},
};

/// Plays a tournament with a decision maker for each player.
pub struct TournamentRunner {
    tournament: Tournament,
    seats: Vec<Seat>,
    talk: TalkLog,
    sink: Box<dyn EventSink + Send>,
    decision_timeout: Duration,
    reflection_timeout: Duration,
}

impl TournamentRunner {
    /// The default time a player has to decide.
    pub const DECISION_TIMEOUT: Duration = Duration::from_secs(30);

    /// The default time a player has to update its notes after a hand.
    pub const REFLECTION_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a runner, agents are in the tournament players order.
    pub fn new(
        tournament: Tournament,
        agents: Vec<Box<dyn Agent>>,
        sink: impl EventSink + Send + 'static,
    ) -> Result<Self> {
        let players = tournament.players();
        if players.len() != agents.len() {
            bail!("{} agents for {} players", agents.len(), players.len());
        }

        let seats = players
            .iter()
            .zip(agents)
            .map(|(player, agent)| Seat::new(player.name.clone(), agent))
            .collect();

        Ok(Self {
            tournament,
            seats,
            talk: TalkLog::default(),
            sink: Box::new(sink),
            decision_timeout: Self::DECISION_TIMEOUT,
            reflection_timeout: Self::REFLECTION_TIMEOUT,
        })
    }

    /// Sets the decisions and reflections timeouts.
    pub fn with_timeouts(mut self, decision: Duration, reflection: Duration) -> Self {
        self.decision_timeout = decision;
        self.reflection_timeout = reflection;
        self
    }

    /// The tournament.
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    /// A player notes.
    pub fn notes(&self, player: &str) -> Option<&Notes> {
        self.seats
            .iter()
            .find(|s| s.name == player)
            .map(|s| &s.notes)
    }

    /// Replaces a player notes, returns false if there is no such player.
    pub fn set_notes(&mut self, player: &str, notes: Notes) -> bool {
        match self.seats.iter_mut().find(|s| s.name == player) {
            Some(seat) => {
                seat.notes = notes;
                true
            }
            None => false,
        }
    }

    /// All players notes as (player, text) pairs.
    pub fn all_notes(&self) -> Vec<(String, String)> {
        self.seats
            .iter()
            .map(|s| (s.name.clone(), s.notes.as_str().to_string()))
            .collect()
    }

    /// Plays hands until there is a winner.
    pub async fn run_tournament(&mut self) -> TournamentResult {
        self.tournament.start_tournament(self.sink.as_mut());

        while !self.tournament.is_complete() {
            if let Err(err) = self.run_hand().await {
                error!("Hand failed {err}");
                break;
            }
        }

        self.tournament.end_tournament(self.sink.as_mut())
    }

    /// Plays a single hand.
    pub async fn run_hand(&mut self) -> Result<HandResult, GameError> {
        let hand_number = self.tournament.hand_number() + 1;
        let sink = self.sink.as_mut();

        let mut game = self.tournament.start_hand(sink)?;
        let mut orchestrator = BettingRoundOrchestrator::new(
            &mut self.seats,
            &mut self.talk,
            self.decision_timeout,
            hand_number,
        );

        orchestrator.run(&mut game, sink).await;

        while game.players_in_hand() > 1
            && game.players_able_to_act() > 1
            && game.stage() < Stage::River
        {
            deal_street(&mut game, sink);
            game.reset_betting_round();
            orchestrator.run(&mut game, sink).await;
        }

        // Nobody left to bet, run out the board.
        while game.players_in_hand() > 1 && game.stage() < Stage::River {
            deal_street(&mut game, sink);
        }

        let settlement = game.determine_winners();

        let outcomes = game
            .players()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active)
            .map(|(seat, p)| {
                let outcome = if settlement.winners().any(|w| w == p.name) {
                    HandOutcome::Won
                } else if p.folded {
                    HandOutcome::Folded
                } else {
                    HandOutcome::Lost
                };
                (seat, outcome)
            })
            .collect::<Vec<_>>();

        drop(game);

        let summary = settlement.summary(hand_number);
        let result = self.tournament.complete_hand(settlement, sink);

        self.reflect(&summary, &outcomes).await;

        Ok(result)
    }

    // Lets the hand players update their notes, all at the same time.
    async fn reflect(&mut self, summary: &HandSummary, outcomes: &[(usize, HandOutcome)]) {
        let timeout = self.reflection_timeout;

        let tasks = self
            .seats
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, seat)| {
                let (_, outcome) = outcomes.iter().find(|(seat, _)| *seat == idx)?;
                Some((seat, *outcome))
            })
            .map(move |(seat, outcome)| async move {
                let request = ReflectionRequest {
                    player: seat.name.clone(),
                    summary: summary.clone(),
                    outcome,
                    notes: seat.notes.as_str().to_string(),
                };

                match time::timeout(timeout, seat.agent.reflect(&request)).await {
                    Ok(Ok(note)) => seat.notes.append_observation(&note),
                    Ok(Err(err)) => warn!("{} reflection failed {err}", seat.name),
                    Err(_) => warn!("{} reflection timed out after {timeout:?}", seat.name),
                }
            });

        join_all(tasks).await;
    }
}

fn deal_street(game: &mut PokerGame<'_>, events: &mut dyn EventSink) {
    let cards = game.deal_community().to_vec();
    events.send(Event::CommunityCards {
        stage: game.stage(),
        cards,
    });
}
