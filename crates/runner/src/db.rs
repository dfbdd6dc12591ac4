// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Tournament results archive.
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use std::{path::Path, sync::Arc};

use sitgo_core::{
    poker::Chips,
    tournament::{Standing, TournamentResult},
};

/// An archived tournament row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentRow {
    /// The tournament id.
    pub id: i64,
    /// The tournament winner.
    pub winner: Option<String>,
    /// The number of hands played.
    pub total_hands: u32,
    /// The tournament duration in milliseconds.
    pub duration_ms: u64,
}

/// Database for archiving tournaments and players notes.
#[derive(Debug, Clone)]
pub struct Db {
    db: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open a database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a database in memory.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // Create tables
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tournaments (
               id INTEGER PRIMARY KEY AUTOINCREMENT,
               winner TEXT,
               total_hands INTEGER NOT NULL,
               duration_ms INTEGER NOT NULL,
               created_at DATETIME DEFAULT CURRENT_TIMESTAMP
             );
             CREATE TABLE IF NOT EXISTS standings (
               tournament_id INTEGER NOT NULL REFERENCES tournaments(id),
               place INTEGER NOT NULL,
               name TEXT NOT NULL,
               chips INTEGER NOT NULL,
               PRIMARY KEY (tournament_id, place)
             );
             CREATE TABLE IF NOT EXISTS hands (
               tournament_id INTEGER NOT NULL REFERENCES tournaments(id),
               hand_number INTEGER NOT NULL,
               pot INTEGER NOT NULL,
               winners TEXT NOT NULL,
               summary TEXT NOT NULL,
               PRIMARY KEY (tournament_id, hand_number)
             );
             CREATE TABLE IF NOT EXISTS notes (
               player TEXT PRIMARY KEY,
               text TEXT NOT NULL,
               last_update DATETIME DEFAULT CURRENT_TIMESTAMP
             );",
        )?;

        Ok(Db {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Archives a completed tournament, returns the tournament id.
    pub async fn record_tournament(&self, result: TournamentResult) -> Result<i64> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut db = db.lock();

            let tx = db.transaction()?;

            tx.execute(
                "INSERT INTO tournaments (winner, total_hands, duration_ms)
                 VALUES (?1, ?2, ?3)",
                params![
                    result.winner,
                    result.total_hands,
                    result.duration.as_millis() as i64
                ],
            )?;

            let id = tx.last_insert_rowid();

            for standing in &result.standings {
                tx.execute(
                    "INSERT INTO standings (tournament_id, place, name, chips)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![id, standing.place, standing.name, standing.chips.amount()],
                )?;
            }

            for hand in &result.hand_history {
                tx.execute(
                    "INSERT INTO hands (tournament_id, hand_number, pot, winners, summary)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        id,
                        hand.hand_number,
                        hand.pot.amount(),
                        hand.winners.join(","),
                        hand.summary
                    ],
                )?;
            }

            tx.commit()?;

            Ok(id)
        })
        .await?
    }

    /// Gets the archived tournaments, most recent first.
    pub async fn tournaments(&self) -> Result<Vec<TournamentRow>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();

            let mut stmt = db.prepare(
                "SELECT id, winner, total_hands, duration_ms
                 FROM tournaments
                 ORDER BY id DESC",
            )?;

            let rows = stmt.query_map([], |row| {
                Ok(TournamentRow {
                    id: row.get(0)?,
                    winner: row.get(1)?,
                    total_hands: row.get(2)?,
                    duration_ms: row.get::<usize, i64>(3)? as u64,
                })
            })?;

            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await?
    }

    /// Gets a tournament standings by place.
    pub async fn standings(&self, tournament_id: i64) -> Result<Vec<Standing>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();

            let mut stmt = db.prepare(
                "SELECT name, place, chips
                 FROM standings
                 WHERE tournament_id = ?1
                 ORDER BY place",
            )?;

            let rows = stmt.query_map(params![tournament_id], |row| {
                Ok(Standing {
                    name: row.get(0)?,
                    place: row.get(1)?,
                    chips: Chips::new(row.get(2)?),
                })
            })?;

            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
        .await?
    }

    /// Gets the hands summaries of a tournament.
    pub async fn hand_summaries(&self, tournament_id: i64) -> Result<Vec<String>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();

            let mut stmt = db.prepare(
                "SELECT summary
                 FROM hands
                 WHERE tournament_id = ?1
                 ORDER BY hand_number",
            )?;

            let rows = stmt.query_map(params![tournament_id], |row| row.get(0))?;
            Ok(rows.collect::<Result<Vec<String>, _>>()?)
        })
        .await?
    }

    /// Gets a player saved notes.
    pub async fn load_notes(&self, player: String) -> Result<Option<String>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let db = db.lock();

            let res = db.query_row(
                "SELECT text FROM notes WHERE player = ?1",
                params![player],
                |row| row.get(0),
            );

            match res {
                Ok(text) => Ok(Some(text)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await?
    }

    /// Saves players notes, as (player, text) pairs.
    pub async fn save_notes(&self, notes: Vec<(String, String)>) -> Result<()> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut db = db.lock();

            let tx = db.transaction()?;

            for (player, text) in notes {
                tx.execute(
                    "INSERT INTO notes (player, text, last_update)
                     VALUES (?1, ?2, CURRENT_TIMESTAMP)
                     ON CONFLICT(player) DO UPDATE SET
                       text = excluded.text,
                       last_update = CURRENT_TIMESTAMP",
                    params![player, text],
                )?;
            }

            tx.commit()?;

            Ok(())
        })
        .await?
    }
}
