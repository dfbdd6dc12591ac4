// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use log::error;
use std::{path::PathBuf, time::Duration};

use sitgo_core::poker::Chips;
use sitgo_runner::{AgentKind, Config};

#[derive(Debug, Parser)]
struct Cli {
    /// Number of players.
    #[clap(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(2..=6))]
    players: u8,
    /// The players starting chips.
    #[clap(long, default_value_t = 10_000)]
    chips: u32,
    /// The time in milliseconds a player has to act.
    #[clap(long, default_value_t = 30_000)]
    timeout_ms: u64,
    /// The agent playing for all players.
    #[clap(long, value_enum, default_value_t = AgentKind::Random)]
    agent: AgentKind,
    /// Seed for a reproducible tournament.
    #[clap(long)]
    seed: Option<u64>,
    /// The archive database path.
    #[clap(long)]
    db: Option<PathBuf>,
    /// Log every action.
    #[clap(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let timeout = Duration::from_millis(cli.timeout_ms);
    let config = Config {
        starting_chips: Chips::new(cli.chips),
        decision_timeout: timeout,
        reflection_timeout: timeout,
        agent: cli.agent,
        seed: cli.seed,
        db_path: cli.db,
        ..Config::with_players(cli.players as usize)
    };

    if let Err(e) = sitgo_runner::run(config).await {
        error!("{e}");
    }
}
