// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sit and Go tournament.
use ahash::AHashSet;
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::{
    error::{ConfigError, GameError},
    event::{Event, EventSink, HandStart, PlayerStack},
    game::{Payout, PokerGame, Settlement, ShowdownHand},
    player::Player,
    poker::{Card, Chips},
};

/// A blinds level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindLevel {
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// The ante paid by every player.
    pub ante: Chips,
    /// The level ends after this number of hands.
    pub duration_hands: u32,
    /// The level ends after this number of minutes.
    pub duration_minutes: u32,
}

impl BlindLevel {
    /// Creates a new level.
    pub const fn new(
        small_blind: u32,
        big_blind: u32,
        ante: u32,
        duration_hands: u32,
        duration_minutes: u32,
    ) -> Self {
        Self {
            small_blind: Chips::new(small_blind),
            big_blind: Chips::new(big_blind),
            ante: Chips::new(ante),
            duration_hands,
            duration_minutes,
        }
    }

    /// The level wall clock duration.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_minutes) * 60)
    }
}

/// The default blinds schedule.
pub const DEFAULT_BLIND_STRUCTURE: [BlindLevel; 12] = [
    BlindLevel::new(100, 200, 0, 10, 5),
    BlindLevel::new(150, 300, 0, 10, 5),
    BlindLevel::new(200, 400, 50, 10, 5),
    BlindLevel::new(300, 600, 75, 10, 5),
    BlindLevel::new(400, 800, 100, 10, 5),
    BlindLevel::new(600, 1200, 150, 10, 5),
    BlindLevel::new(800, 1600, 200, 10, 5),
    BlindLevel::new(1000, 2000, 250, 10, 5),
    BlindLevel::new(1500, 3000, 400, 10, 5),
    BlindLevel::new(2000, 4000, 500, 10, 5),
    BlindLevel::new(3000, 6000, 750, 10, 5),
    BlindLevel::new(4000, 8000, 1000, 10, 5),
];

/// The tournament configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// The chips each player starts with.
    pub starting_chips: Chips,
    /// The blinds schedule.
    pub blind_structure: Vec<BlindLevel>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            starting_chips: Chips::new(10_000),
            blind_structure: DEFAULT_BLIND_STRUCTURE.to_vec(),
        }
    }
}

/// The result of a completed hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandResult {
    /// The hand number.
    pub hand_number: u32,
    /// The players who won chips.
    pub winners: Vec<String>,
    /// The chips paid to each winner.
    pub payouts: Vec<Payout>,
    /// The pot.
    pub pot: Chips,
    /// The players eliminated in this hand.
    pub eliminations: Vec<String>,
    /// The hand went to showdown.
    pub showdown: bool,
    /// The hands shown at showdown, empty if the hand ended with folds.
    pub showdown_hands: Vec<ShowdownHand>,
    /// The community cards.
    pub final_board: Vec<Card>,
    /// A one line description of the hand.
    pub summary: String,
}

/// A player finishing position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// The player name.
    pub name: String,
    /// The finishing place, starting from 1.
    pub place: usize,
    /// The chips at the end of the tournament.
    pub chips: Chips,
}

/// The final tournament result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResult {
    /// The tournament winner.
    pub winner: Option<String>,
    /// The players standings by place.
    pub standings: Vec<Standing>,
    /// The number of hands played.
    pub total_hands: u32,
    /// How long the tournament took.
    pub duration: Duration,
    /// All the hands results.
    pub hand_history: Vec<HandResult>,
}

/// A tournament state snapshot for displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    /// The number of hands started.
    pub hand_number: u32,
    /// The blind level number, starting from 1.
    pub level: usize,
    /// The current blinds.
    pub blinds: BlindLevel,
    /// The number of players with chips.
    pub players_remaining: usize,
    /// The players chips.
    pub chip_counts: Vec<PlayerStack>,
    /// The eliminated players in elimination order.
    pub eliminations: Vec<String>,
    /// Time since the tournament started.
    pub elapsed: Duration,
}

/// A single table Sit and Go tournament.
#[derive(Debug)]
pub struct Tournament {
    config: TournamentConfig,
    players: Vec<Player>,
    current_level: usize,
    hands_at_level: u32,
    level_start: Instant,
    start_time: Option<Instant>,
    hand_number: u32,
    button: usize,
    eliminations: Vec<String>,
    history: Vec<HandResult>,
    rng: StdRng,
}

impl Tournament {
    /// Creates a new tournament with the given players in seat order.
    pub fn new<S>(
        names: impl IntoIterator<Item = S>,
        config: TournamentConfig,
    ) -> Result<Self, ConfigError>
    where
        S: Into<String>,
    {
        Self::with_rng(names, config, StdRng::from_os_rng())
    }

    /// Creates a tournament with a seeded random generator for replays.
    pub fn with_seed<S>(
        names: impl IntoIterator<Item = S>,
        config: TournamentConfig,
        seed: u64,
    ) -> Result<Self, ConfigError>
    where
        S: Into<String>,
    {
        Self::with_rng(names, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng<S>(
        names: impl IntoIterator<Item = S>,
        config: TournamentConfig,
        rng: StdRng,
    ) -> Result<Self, ConfigError>
    where
        S: Into<String>,
    {
        if config.blind_structure.is_empty() {
            return Err(ConfigError::EmptyBlindStructure);
        }

        if config.starting_chips == Chips::ZERO {
            return Err(ConfigError::NoStartingChips);
        }

        let mut seen = AHashSet::default();
        let mut players = Vec::new();
        for name in names {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateName(name));
            }

            players.push(Player::new(name, config.starting_chips));
        }

        if players.len() < 2 {
            return Err(ConfigError::TooFewPlayers(players.len()));
        }

        Ok(Self {
            config,
            players,
            current_level: 0,
            hands_at_level: 0,
            level_start: Instant::now(),
            start_time: None,
            hand_number: 0,
            button: 0,
            eliminations: Vec::new(),
            history: Vec::new(),
            rng,
        })
    }

    /// Starts the tournament clock.
    pub fn start_tournament(&mut self, events: &mut dyn EventSink) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.level_start = now;

        let blinds = self.current_blinds();
        info!(
            "Tournament started with {} players blinds {}/{}",
            self.players.len(),
            blinds.small_blind,
            blinds.big_blind
        );

        events.send(Event::TournamentStart {
            players: self.chip_counts(),
            small_blind: blinds.small_blind,
            big_blind: blinds.big_blind,
        });
    }

    /// The tournament configuration.
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// All the players in seat order, including the eliminated ones.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The players still in the tournament.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active)
    }

    /// The current blinds, the last level if the schedule is exhausted.
    pub fn current_blinds(&self) -> BlindLevel {
        let last = self.config.blind_structure.len().saturating_sub(1);
        self.config.blind_structure[self.current_level.min(last)]
    }

    /// The current level index.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// The number of hands started.
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    /// The button seat for the next hand.
    pub fn button(&self) -> usize {
        self.button
    }

    /// The eliminated players in elimination order.
    pub fn eliminations(&self) -> &[String] {
        &self.eliminations
    }

    /// The completed hands.
    pub fn history(&self) -> &[HandResult] {
        &self.history
    }

    /// Checks if the tournament has a winner.
    pub fn is_complete(&self) -> bool {
        self.active_players().count() <= 1
    }

    /// Moves to the next blind level if the current one is over.
    ///
    /// A level ends after its number of hands or its duration, whichever comes
    /// first. The last level never ends. Returns true if the level changed.
    pub fn check_level_up(&mut self, now: Instant, events: &mut dyn EventSink) -> bool {
        let blinds = self.current_blinds();
        let elapsed = now.saturating_duration_since(self.level_start);
        let is_over =
            self.hands_at_level >= blinds.duration_hands || elapsed >= blinds.duration();

        if !is_over || self.current_level + 1 >= self.config.blind_structure.len() {
            return false;
        }

        self.current_level += 1;
        self.hands_at_level = 0;
        self.level_start = now;

        let blinds = self.current_blinds();
        info!(
            "Level {} blinds {}/{} ante {}",
            self.current_level + 1,
            blinds.small_blind,
            blinds.big_blind,
            blinds.ante
        );

        events.send(Event::LevelUp {
            level: self.current_level + 1,
            small_blind: blinds.small_blind,
            big_blind: blinds.big_blind,
            ante: blinds.ante,
        });

        true
    }

    /// Starts a new hand with the current blinds.
    ///
    /// The returned game borrows the tournament players, once the hand is over
    /// pass its settlement to [Tournament::complete_hand].
    pub fn start_hand(&mut self, events: &mut dyn EventSink) -> Result<PokerGame<'_>, GameError> {
        if self.is_complete() {
            return Err(GameError::TournamentComplete);
        }

        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }

        self.check_level_up(Instant::now(), events);
        self.hand_number += 1;
        self.hands_at_level += 1;

        if !self.players[self.button].is_active {
            self.button = self.next_active(self.button);
        }

        let blinds = self.current_blinds();
        let level = self.current_level + 1;
        let hand_number = self.hand_number;

        let mut game = PokerGame::new(&mut self.players, &blinds, self.button);
        game.start_hand(&mut self.rng)?;

        let players = game.players();
        let start = HandStart {
            hand_number,
            players: players
                .iter()
                .filter(|p| p.is_active)
                .map(|p| PlayerStack::new(p.name.clone(), p.chips))
                .collect(),
            level,
            small_blind: blinds.small_blind,
            big_blind: blinds.big_blind,
            ante: blinds.ante,
            button: players[game.button()].name.clone(),
            small_blind_player: players[game.small_blind_seat()].name.clone(),
            big_blind_player: players[game.big_blind_seat()].name.clone(),
            acting_order: game.acting_order(),
        };

        info!(
            "Hand #{hand_number} button {} blinds {}/{}",
            start.button, blinds.small_blind, blinds.big_blind
        );
        events.send(Event::HandStart(start));

        Ok(game)
    }

    /// Records a completed hand, eliminates busted players, and moves the
    /// button.
    pub fn complete_hand(
        &mut self,
        settlement: Settlement,
        events: &mut dyn EventSink,
    ) -> HandResult {
        let total = self.players.len();
        let mut eliminated = Vec::new();

        for player in self.players.iter_mut() {
            if player.is_active && player.chips == Chips::ZERO {
                player.is_active = false;
                self.eliminations.push(player.name.clone());
                eliminated.push(player.name.clone());

                let place = total - self.eliminations.len() + 1;
                info!("{} eliminated in place {place}", player.name);
                events.send(Event::Elimination {
                    player: player.name.clone(),
                    place,
                });
            }
        }

        let result = HandResult {
            hand_number: self.hand_number,
            winners: settlement.winners().map(String::from).collect(),
            summary: self.hand_summary(&settlement, &eliminated),
            payouts: settlement.payouts,
            pot: settlement.pot,
            eliminations: eliminated,
            showdown: !settlement.showdown.is_empty(),
            showdown_hands: settlement.showdown,
            final_board: settlement.board,
        };

        self.button = self.next_active(self.button);
        self.history.push(result.clone());

        info!("{}", result.summary);
        events.send(Event::HandResult(result.clone()));

        result
    }

    /// The final standings, survivors by chips and then eliminated players in
    /// reverse elimination order.
    pub fn get_final_results(&self) -> TournamentResult {
        let mut survivors = self.active_players().collect::<Vec<_>>();
        survivors.sort_by(|a, b| b.chips.cmp(&a.chips));

        let busted = self.eliminations.iter().rev().map(|name| {
            let chips = self
                .players
                .iter()
                .find(|p| &p.name == name)
                .map(|p| p.chips)
                .unwrap_or_default();
            (name.clone(), chips)
        });

        let standings = survivors
            .into_iter()
            .map(|p| (p.name.clone(), p.chips))
            .chain(busted)
            .enumerate()
            .map(|(idx, (name, chips))| Standing {
                name,
                place: idx + 1,
                chips,
            })
            .collect::<Vec<_>>();

        TournamentResult {
            winner: standings.first().map(|s| s.name.clone()),
            standings,
            total_hands: self.hand_number,
            duration: self.start_time.map(|t| t.elapsed()).unwrap_or_default(),
            hand_history: self.history.clone(),
        }
    }

    /// Builds the final results and tells the sink the tournament is over.
    pub fn end_tournament(&mut self, events: &mut dyn EventSink) -> TournamentResult {
        let result = self.get_final_results();
        info!(
            "Tournament won by {} after {} hands",
            result.winner.as_deref().unwrap_or("nobody"),
            result.total_hands
        );

        events.send(Event::TournamentEnd(result.clone()));
        result
    }

    /// The players chips in seat order.
    pub fn chip_counts(&self) -> Vec<PlayerStack> {
        self.players
            .iter()
            .map(|p| PlayerStack::new(p.name.clone(), p.chips))
            .collect()
    }

    /// A snapshot of the tournament state.
    pub fn snapshot(&self) -> TournamentSnapshot {
        TournamentSnapshot {
            hand_number: self.hand_number,
            level: self.current_level + 1,
            blinds: self.current_blinds(),
            players_remaining: self.active_players().count(),
            chip_counts: self.chip_counts(),
            eliminations: self.eliminations.clone(),
            elapsed: self.start_time.map(|t| t.elapsed()).unwrap_or_default(),
        }
    }

    fn hand_summary(&self, settlement: &Settlement, eliminated: &[String]) -> String {
        let mut parts = vec![format!("Hand #{}", self.hand_number)];

        match settlement.payouts.as_slice() {
            [] => parts.push("No winner".to_string()),
            [payout] => parts.push(format!("{} wins {}", payout.player, payout.chips)),
            payouts => {
                let names = payouts
                    .iter()
                    .map(|p| p.player.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                parts.push(format!("Split pot: {names}"));
            }
        }

        if !settlement.board.is_empty() {
            let board = settlement
                .board
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            parts.push(format!("Board: {board}"));
        }

        for name in eliminated {
            parts.push(format!("{name} ELIMINATED!"));
        }

        parts.join(" | ")
    }

    fn next_active(&self, seat: usize) -> usize {
        let count = self.players.len();
        (1..=count)
            .map(|offset| (seat + offset) % count)
            .find(|&s| self.players[s].is_active)
            .unwrap_or(seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::NullSink,
        poker::{HandValue, Stage},
    };

    fn new_tournament(names: &[&str]) -> Tournament {
        Tournament::with_seed(names.iter().copied(), TournamentConfig::default(), 7).unwrap()
    }

    fn empty_settlement() -> Settlement {
        Settlement {
            pot: Chips::ZERO,
            payouts: Vec::new(),
            board: Vec::new(),
            showdown: Vec::new(),
            actions: Vec::new(),
            stage: Stage::Preflop,
        }
    }

    #[test]
    fn config_validation() {
        let config = TournamentConfig::default;

        assert_eq!(
            Tournament::new(["Alice"], config()).unwrap_err(),
            ConfigError::TooFewPlayers(1)
        );

        assert_eq!(
            Tournament::new(["Alice", "Bob", "Alice"], config()).unwrap_err(),
            ConfigError::DuplicateName("Alice".to_string())
        );

        let no_blinds = TournamentConfig {
            blind_structure: Vec::new(),
            ..config()
        };
        assert_eq!(
            Tournament::new(["Alice", "Bob"], no_blinds).unwrap_err(),
            ConfigError::EmptyBlindStructure
        );

        let no_chips = TournamentConfig {
            starting_chips: Chips::ZERO,
            ..config()
        };
        assert_eq!(
            Tournament::new(["Alice", "Bob"], no_chips).unwrap_err(),
            ConfigError::NoStartingChips
        );
    }

    #[test]
    fn level_up_by_hands() {
        let mut tournament = new_tournament(&["A", "B", "C"]);
        let mut events = Vec::new();
        tournament.start_tournament(&mut events);

        let now = tournament.level_start;
        tournament.hands_at_level = 9;
        assert!(!tournament.check_level_up(now, &mut events));

        tournament.hands_at_level = 10;
        assert!(tournament.check_level_up(now, &mut events));
        assert_eq!(tournament.current_level(), 1);
        assert_eq!(tournament.current_blinds().big_blind, Chips::new(300));
        assert_eq!(tournament.hands_at_level, 0);

        assert!(matches!(
            events.last(),
            Some(Event::LevelUp { level: 2, .. })
        ));
    }

    #[test]
    fn level_up_by_time() {
        let mut tournament = new_tournament(&["A", "B"]);
        let start = tournament.level_start;

        let early = start + Duration::from_secs(4 * 60 + 59);
        assert!(!tournament.check_level_up(early, &mut NullSink));

        let late = start + Duration::from_secs(5 * 60);
        assert!(tournament.check_level_up(late, &mut NullSink));
        assert_eq!(tournament.current_level(), 1);
        assert_eq!(tournament.level_start, late);

        // Only one level at a time.
        let much_later = late + Duration::from_secs(3600);
        assert!(tournament.check_level_up(much_later, &mut NullSink));
        assert_eq!(tournament.current_level(), 2);
    }

    #[test]
    fn last_level_never_ends() {
        let mut tournament = new_tournament(&["A", "B"]);
        tournament.current_level = 11;
        tournament.hands_at_level = 100;

        let later = tournament.level_start + Duration::from_secs(3600);
        assert!(!tournament.check_level_up(later, &mut NullSink));
        assert_eq!(tournament.current_level(), 11);
        assert_eq!(tournament.current_blinds().big_blind, Chips::new(8000));

        // Out of range levels clamp to the last one.
        tournament.current_level = 40;
        assert_eq!(tournament.current_blinds().big_blind, Chips::new(8000));
    }

    #[test]
    fn start_hand_sends_hand_start() {
        let mut tournament = new_tournament(&["A", "B", "C"]);
        let mut events = Vec::new();
        tournament.start_tournament(&mut events);

        let game = tournament.start_hand(&mut events).unwrap();
        assert_eq!(game.pot(), Chips::new(300));
        drop(game);

        assert_eq!(tournament.hand_number(), 1);
        assert!(matches!(events[0], Event::TournamentStart { .. }));

        let Event::HandStart(start) = &events[1] else {
            panic!("Expected hand start, got {:?}", events[1]);
        };

        assert_eq!(start.hand_number, 1);
        assert_eq!(start.level, 1);
        assert_eq!(start.button, "A");
        assert_eq!(start.small_blind_player, "B");
        assert_eq!(start.big_blind_player, "C");
        assert_eq!(start.acting_order, vec!["A", "B", "C"]);
    }

    #[test]
    fn eliminations_and_standings() {
        let mut tournament = new_tournament(&["P1", "P2", "P3", "P4"]);
        let mut events = Vec::new();

        tournament.players[2].chips = Chips::ZERO;
        tournament.players[3].chips = Chips::new(20_000);
        let result = tournament.complete_hand(empty_settlement(), &mut events);
        assert_eq!(result.eliminations, vec!["P3"]);
        assert!(result.summary.ends_with("P3 ELIMINATED!"));

        tournament.players[0].chips = Chips::ZERO;
        tournament.complete_hand(empty_settlement(), &mut events);

        assert_eq!(tournament.eliminations(), &["P3", "P1"]);

        let places = events
            .iter()
            .filter_map(|e| match e {
                Event::Elimination { player, place } => Some((player.as_str(), *place)),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(places, vec![("P3", 4), ("P1", 3)]);

        let results = tournament.get_final_results();
        let standings = results
            .standings
            .iter()
            .map(|s| (s.name.as_str(), s.place))
            .collect::<Vec<_>>();
        assert_eq!(
            standings,
            vec![("P4", 1), ("P2", 2), ("P1", 3), ("P3", 4)]
        );
        assert_eq!(results.winner.as_deref(), Some("P4"));
        assert_eq!(results.hand_history.len(), 2);
    }

    #[test]
    fn button_skips_eliminated_players() {
        let mut tournament = new_tournament(&["P1", "P2", "P3"]);
        assert_eq!(tournament.button(), 0);

        tournament.players[1].chips = Chips::ZERO;
        tournament.complete_hand(empty_settlement(), &mut NullSink);
        assert_eq!(tournament.button(), 2);

        tournament.complete_hand(empty_settlement(), &mut NullSink);
        assert_eq!(tournament.button(), 0);
    }

    #[test]
    fn hand_summaries() {
        let mut tournament = new_tournament(&["P1", "P2"]);
        tournament.hand_number = 12;

        let mut settlement = empty_settlement();
        settlement.payouts = vec![Payout {
            player: "P1".to_string(),
            chips: Chips::new(1200),
        }];
        settlement.board = vec!["AS".parse().unwrap(), "KD".parse().unwrap(), "7C".parse().unwrap()];

        assert_eq!(
            tournament.hand_summary(&settlement, &[]),
            "Hand #12 | P1 wins 1,200 | Board: AS KD 7C"
        );

        settlement.payouts.push(Payout {
            player: "P2".to_string(),
            chips: Chips::new(1200),
        });
        settlement.board.clear();
        assert_eq!(
            tournament.hand_summary(&settlement, &["P2".to_string()]),
            "Hand #12 | Split pot: P1, P2 | P2 ELIMINATED!"
        );
    }

    #[test]
    fn showdown_hands_reach_the_result() {
        let mut tournament = new_tournament(&["P1", "P2"]);
        tournament.hand_number = 3;

        let cards = |s: &str| {
            s.split_whitespace()
                .map(|c| c.parse::<Card>().unwrap())
                .collect::<Vec<_>>()
        };
        let board = cards("2C 7D 9H JS KD");
        let shown = |player: &str, hole: &str| {
            let mut all = cards(hole);
            all.extend_from_slice(&board);
            ShowdownHand {
                player: player.to_string(),
                hole_cards: cards(hole),
                value: HandValue::eval(&all).unwrap(),
            }
        };

        let mut settlement = empty_settlement();
        settlement.pot = Chips::new(400);
        settlement.payouts = vec![Payout {
            player: "P1".to_string(),
            chips: Chips::new(400),
        }];
        settlement.board = board.clone();
        settlement.showdown = vec![shown("P1", "KS KH"), shown("P2", "AS QD")];
        settlement.stage = Stage::River;

        let mut events = Vec::new();
        let result = tournament.complete_hand(settlement, &mut events);
        assert!(result.showdown);
        assert_eq!(result.showdown_hands.len(), 2);
        assert_eq!(result.showdown_hands[0].player, "P1");
        assert_eq!(result.showdown_hands[1].hole_cards, cards("AS QD"));
        assert!(result.showdown_hands[0].value > result.showdown_hands[1].value);

        let Some(Event::HandResult(sent)) = events.last() else {
            panic!("no hand result event");
        };
        assert_eq!(sent.showdown_hands.len(), 2);
    }

    #[test]
    fn complete_tournament_rejects_hands() {
        let mut tournament = new_tournament(&["P1", "P2"]);
        tournament.players[1].chips = Chips::ZERO;
        tournament.complete_hand(empty_settlement(), &mut NullSink);

        assert!(tournament.is_complete());
        assert!(matches!(
            tournament.start_hand(&mut NullSink),
            Err(GameError::TournamentComplete)
        ));
    }

    #[test]
    fn snapshot_reports_state() {
        let tournament = new_tournament(&["P1", "P2", "P3"]);
        let snapshot = tournament.snapshot();
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.players_remaining, 3);
        assert_eq!(snapshot.chip_counts.len(), 3);
        assert_eq!(snapshot.chip_counts[0].chips, Chips::new(10_000));
        assert_eq!(snapshot.elapsed, Duration::ZERO);
    }
}
