// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Players notes.
//!
//! Notes are free text a player writes after each hand and reads before each
//! decision. They are never interpreted, only kept within a size bound.
use std::fmt;

/// The maximum notes length in characters.
pub const MAX_NOTES_LEN: usize = 2000;

const HEADER_LINES: usize = 10;
const RECENT_LINES: usize = 50;
const TRUNCATED: &str = "[...older notes truncated...]";

/// A player notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes {
    text: String,
}

impl Notes {
    /// Creates new notes for a player.
    pub fn new(player: &str) -> Self {
        let text = format!(
            "# {player} poker notes\n\
             \n\
             ## Opponent reads\n\
             \n\
             ## Table talk\n\
             \n\
             ## Strategy\n\
             \n\
             ---\n\
             *Observations below:*"
        );

        Self { text }
    }

    /// Creates notes from previously saved text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut notes = Self { text: text.into() };
        notes.truncate();
        notes
    }

    /// The notes text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Appends a hand observation, empty observations are ignored.
    pub fn append_observation(&mut self, observation: &str) {
        let observation = observation.trim();
        if !observation.is_empty() {
            self.append(&format!("**Hand observation:** {observation}"));
        }
    }

    /// Appends a line to the notes.
    pub fn append(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
        self.truncate();
    }

    // Keeps the header and the most recent lines when the notes are too long.
    fn truncate(&mut self) {
        if self.text.chars().count() <= MAX_NOTES_LEN {
            return;
        }

        let lines = self.text.lines().collect::<Vec<_>>();
        let header = lines[..HEADER_LINES.min(lines.len())].join("\n");
        let rest = lines
            .get(HEADER_LINES..)
            .unwrap_or_default()
            .iter()
            .filter(|l| **l != TRUNCATED)
            .copied()
            .collect::<Vec<_>>();

        let mut keep = RECENT_LINES.min(rest.len());
        loop {
            let recent = rest[rest.len() - keep..].join("\n");
            let text = format!("{header}\n\n{TRUNCATED}\n\n{recent}");

            if text.chars().count() <= MAX_NOTES_LEN {
                self.text = text;
                return;
            }

            if keep == 0 {
                // The header alone is too long.
                self.text = text.chars().take(MAX_NOTES_LEN).collect();
                return;
            }

            keep -= 1;
        }
    }
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
