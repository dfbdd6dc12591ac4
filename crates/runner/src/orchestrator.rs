// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Betting rounds driver.
use log::{info, warn};
use std::{collections::VecDeque, time::Duration};
use tokio::time;

use sitgo_core::{
    event::{Event, EventSink, PlayerStack},
    game::PokerGame,
    game_state::LegalAction,
    poker::{Chips, PlayerAction},
};

use crate::{
    agent::{Agent, Decision, DecisionError, DecisionRequest, TableTalk},
    notes::Notes,
};

/// A table seat with its decision maker.
pub struct Seat {
    /// The player name.
    pub name: String,
    /// The player decision maker.
    pub agent: Box<dyn Agent>,
    /// The player notes.
    pub notes: Notes,
}

impl Seat {
    /// Creates a seat with empty notes.
    pub fn new(name: impl Into<String>, agent: Box<dyn Agent>) -> Self {
        let name = name.into();
        Self {
            notes: Notes::new(&name),
            name,
            agent,
        }
    }
}

/// The most recent table talk.
#[derive(Debug, Default, Clone)]
pub struct TalkLog {
    entries: VecDeque<TableTalk>,
}

impl TalkLog {
    const MAX_ENTRIES: usize = 10;

    /// Records something said at the table.
    pub fn push(&mut self, talk: TableTalk) {
        if self.entries.len() == Self::MAX_ENTRIES {
            self.entries.pop_front();
        }

        self.entries.push_back(talk);
    }

    /// Up to `count` most recent entries from speakers other than `player`,
    /// oldest first.
    pub fn recent_for(&self, player: &str, count: usize) -> Vec<TableTalk> {
        let mut talk = self
            .entries
            .iter()
            .rev()
            .filter(|t| t.speaker != player)
            .take(count)
            .cloned()
            .collect::<Vec<_>>();
        talk.reverse();
        talk
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if nothing has been said.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Drives a betting round to completion with the seats agents.
pub struct BettingRoundOrchestrator<'a> {
    seats: &'a mut [Seat],
    talk: &'a mut TalkLog,
    decision_timeout: Duration,
    hand_number: u32,
}

impl<'a> BettingRoundOrchestrator<'a> {
    const TALK_IN_REQUEST: usize = 5;

    /// Creates an orchestrator for the given hand, seats are in the game
    /// players order.
    pub fn new(
        seats: &'a mut [Seat],
        talk: &'a mut TalkLog,
        decision_timeout: Duration,
        hand_number: u32,
    ) -> Self {
        Self {
            seats,
            talk,
            decision_timeout,
            hand_number,
        }
    }

    /// Runs the current betting round until it is complete.
    pub async fn run(&mut self, game: &mut PokerGame<'_>, events: &mut dyn EventSink) {
        let max_iterations = Self::max_iterations(game);
        let mut iterations = 0;
        let mut last_seat = game.action_anchor();

        while !game.is_betting_complete() {
            iterations += 1;
            if iterations > max_iterations {
                warn!(
                    "Hand #{} betting round stopped after {max_iterations} actions",
                    self.hand_number
                );
                self.fold_owing(game, events);
                break;
            }

            let Some(seat) = game.next_to_act(last_seat) else {
                break;
            };

            last_seat = seat;

            let legal = game.get_valid_actions(seat);
            let decision = self.request_decision(game, seat, &legal).await;
            let (action, amount) = resolve_action(&legal, &decision);

            let (action, paid) = match game.apply_action(seat, action, amount) {
                Ok(paid) => (action, paid),
                Err(err) => {
                    warn!("{err}, folding");
                    match game.apply_action(seat, PlayerAction::Fold, Chips::ZERO) {
                        Ok(paid) => (PlayerAction::Fold, paid),
                        Err(err) => {
                            warn!("Cannot fold {err}");
                            break;
                        }
                    }
                }
            };

            self.record_action(game, seat, action, paid, decision, events);
        }
    }

    // An upper bound on the actions of a round with legal betting.
    //
    // A full raise adds at least a big blind to the bet, a short all in
    // happens at most once per player, and between raises each player acts
    // at most once.
    fn max_iterations(game: &PokerGame<'_>) -> usize {
        let players = game.players();
        let total = players.iter().map(|p| p.chips + p.bet).sum::<Chips>();
        let big_blind = game.big_blind().amount().max(1);
        let raises = (total.amount() / big_blind) as usize + players.len() + 1;
        raises.saturating_mul(players.len())
    }

    // Folds the players that still owe chips to the pot.
    fn fold_owing(&mut self, game: &mut PokerGame<'_>, events: &mut dyn EventSink) {
        let current_bet = game.state().current_bet;
        let owing = game
            .players()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.can_act() && p.to_call(current_bet) > Chips::ZERO)
            .map(|(seat, _)| seat)
            .collect::<Vec<_>>();

        for seat in owing {
            if game.is_betting_complete() {
                break;
            }

            let decision = fallback_action(&game.get_valid_actions(seat));
            match game.apply_action(seat, decision.action, Chips::ZERO) {
                Ok(paid) => self.record_action(game, seat, decision.action, paid, decision, events),
                Err(err) => warn!("Cannot fold {err}"),
            }
        }
    }

    fn record_action(
        &mut self,
        game: &PokerGame<'_>,
        seat: usize,
        action: PlayerAction,
        paid: Chips,
        decision: Decision,
        events: &mut dyn EventSink,
    ) {
        let stacks = game
            .players()
            .iter()
            .filter(|p| p.is_active)
            .map(|p| PlayerStack::new(p.name.clone(), p.chips))
            .collect();

        let name = self.seats[seat].name.clone();
        if let Some(message) = &decision.commentary.trash_talk {
            self.talk.push(TableTalk {
                speaker: name.clone(),
                message: message.clone(),
                hand_number: self.hand_number,
            });
        }

        events.send(Event::Action {
            player: name,
            action,
            amount: paid,
            pot: game.pot(),
            stacks,
            commentary: decision.commentary,
        });
    }

    // Asks the seat agent for a decision, failures become the fallback action.
    async fn request_decision(
        &mut self,
        game: &PokerGame<'_>,
        seat: usize,
        legal: &[LegalAction],
    ) -> Decision {
        let view = match game.view_for(seat) {
            Ok(view) => view,
            Err(err) => {
                warn!("{err}");
                return fallback_action(legal);
            }
        };

        let Some(player) = self.seats.get_mut(seat) else {
            return fallback_action(legal);
        };

        let request = DecisionRequest {
            hand_number: self.hand_number,
            view,
            legal: legal.to_vec(),
            notes: player.notes.as_str().to_string(),
            table_talk: self.talk.recent_for(&player.name, Self::TALK_IN_REQUEST),
        };

        let res = match time::timeout(self.decision_timeout, player.agent.decide(&request)).await {
            Ok(res) => res,
            Err(_) => Err(DecisionError::Timeout(self.decision_timeout)),
        };

        match res {
            Ok(decision) => decision,
            Err(err) => {
                warn!("{} {err}", player.name);
                let decision = fallback_action(legal);
                info!("{} defaults to {}", player.name, decision.action);
                decision
            }
        }
    }
}

/// The safe default when a decision is missing, check if possible else fold.
pub fn fallback_action(legal: &[LegalAction]) -> Decision {
    let action = if legal.iter().any(|la| la.action == PlayerAction::Check) {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    };

    Decision::new(action, Chips::ZERO, "No decision")
}

/// Maps a decision to a legal action and amount.
///
/// Bets and raises are interchangeable and their amounts are clamped to the
/// legal range, a call with not enough chips becomes an all in, and a call
/// with nothing to call becomes a check. Other illegal choices get the
/// fallback action.
pub fn resolve_action(legal: &[LegalAction], decision: &Decision) -> (PlayerAction, Chips) {
    let find = |action: PlayerAction| legal.iter().find(|la| la.action == action);

    let candidates: &[PlayerAction] = match decision.action {
        PlayerAction::AllIn => &[
            PlayerAction::AllIn,
            PlayerAction::Raise,
            PlayerAction::Bet,
            PlayerAction::Call,
        ],
        PlayerAction::Bet => &[PlayerAction::Bet, PlayerAction::Raise],
        PlayerAction::Raise => &[PlayerAction::Raise, PlayerAction::Bet],
        PlayerAction::Call => &[PlayerAction::Call, PlayerAction::AllIn, PlayerAction::Check],
        PlayerAction::Check => &[PlayerAction::Check],
        PlayerAction::Fold => &[PlayerAction::Fold],
    };

    let chosen = candidates.iter().find_map(|&action| find(action));

    match chosen {
        Some(la) if la.action == PlayerAction::Bet || la.action == PlayerAction::Raise => {
            // All in as a bet or raise is the whole stack.
            let amount = if decision.action == PlayerAction::AllIn {
                la.max
            } else {
                la.clamp(decision.amount)
            };
            (la.action, amount)
        }
        Some(la) => (la.action, la.min),
        None => {
            let fallback = fallback_action(legal);
            (fallback.action, Chips::ZERO)
        }
    }
}
