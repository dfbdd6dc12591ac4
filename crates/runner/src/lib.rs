// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sitgo Poker tournament runner.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, anyhow};
use log::{info, warn};
use std::{path::PathBuf, time::Duration};
use tokio::signal;

use sitgo_core::{
    poker::Chips,
    tournament::{Tournament, TournamentConfig},
};

pub mod agent;
pub mod bots;
pub mod db;
pub mod notes;
pub mod orchestrator;
pub mod prompt;
pub mod runner;
pub mod sinks;

use agent::Agent;
use bots::{CallingAgent, RandomAgent};
use db::Db;
use notes::Notes;
use runner::TournamentRunner;
use sinks::LogSink;

/// The players names.
pub const NICKNAMES: [&str; 6] = ["Alice", "Bob", "Carol", "Dave", "Frank", "Mike"];

/// The built in agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum AgentKind {
    /// Random legal actions.
    #[default]
    Random,
    /// Always call or check.
    Calling,
}

/// Runner config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The players names in seat order.
    pub players: Vec<String>,
    /// The players starting chips.
    pub starting_chips: Chips,
    /// The time a player has to decide.
    pub decision_timeout: Duration,
    /// The time a player has to update its notes after a hand.
    pub reflection_timeout: Duration,
    /// The agent driving all players.
    pub agent: AgentKind,
    /// The seed for dealing and for the agents.
    pub seed: Option<u64>,
    /// The archive path, defaults to the user data directory.
    pub db_path: Option<PathBuf>,
}

impl Config {
    /// Creates a config for the given number of players.
    pub fn with_players(count: usize) -> Self {
        Self {
            players: NICKNAMES.iter().take(count).map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: NICKNAMES.iter().take(5).map(|n| n.to_string()).collect(),
            starting_chips: TournamentConfig::default().starting_chips,
            decision_timeout: TournamentRunner::DECISION_TIMEOUT,
            reflection_timeout: TournamentRunner::REFLECTION_TIMEOUT,
            agent: AgentKind::default(),
            seed: None,
            db_path: None,
        }
    }
}

/// Creates an agent for each player.
pub fn build_agents(config: &Config) -> Vec<Box<dyn Agent>> {
    config
        .players
        .iter()
        .enumerate()
        .map(|(idx, name)| -> Box<dyn Agent> {
            match (config.agent, config.seed) {
                (AgentKind::Calling, _) => Box::new(CallingAgent::new(name)),
                (AgentKind::Random, Some(seed)) => {
                    Box::new(RandomAgent::with_seed(name, seed.wrapping_add(idx as u64 + 1)))
                }
                (AgentKind::Random, None) => Box::new(RandomAgent::new(name)),
            }
        })
        .collect()
}

/// The default archive path.
pub fn default_db_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "sitgo")
        .ok_or_else(|| anyhow!("Cannot find the user data directory"))?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("sitgo.db"))
}

/// Runs a tournament and archives its results.
///
/// A tournament interrupted with Ctrl-C is not archived.
pub async fn run(config: Config) -> Result<()> {
    let db_path = match &config.db_path {
        Some(path) => path.clone(),
        None => default_db_path()?,
    };

    info!("Opening archive {}", db_path.display());
    let db = Db::open(&db_path)?;

    let tournament_config = TournamentConfig {
        starting_chips: config.starting_chips,
        ..Default::default()
    };

    let tournament = match config.seed {
        Some(seed) => Tournament::with_seed(config.players.clone(), tournament_config, seed)?,
        None => Tournament::new(config.players.clone(), tournament_config)?,
    };

    let mut runner = TournamentRunner::new(tournament, build_agents(&config), LogSink)?
        .with_timeouts(config.decision_timeout, config.reflection_timeout);

    for player in &config.players {
        if let Some(text) = db.load_notes(player.clone()).await? {
            runner.set_notes(player, Notes::from_text(text));
        }
    }

    let result = tokio::select! {
        result = runner.run_tournament() => Some(result),
        _ = signal::ctrl_c() => None,
    };

    let Some(result) = result else {
        warn!("Tournament interrupted, nothing archived");
        return Ok(());
    };

    let id = db.record_tournament(result).await?;
    db.save_notes(runner.all_notes()).await?;
    info!("Tournament archived with id {id}");

    Ok(())
}
