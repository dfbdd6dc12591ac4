// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Text prompts for text based agents.
use std::fmt::Write;

use sitgo_core::{game_state::ActionRecord, poker::Card};

use crate::agent::{DecisionRequest, ReflectionRequest};

/// Renders a decision request as a prompt.
pub fn decision(name: &str, req: &DecisionRequest) -> String {
    let view = &req.view;
    let mut prompt = String::new();

    let _ = writeln!(prompt, "You are {name}, playing No-Limit Texas Hold'em.");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "=== YOUR NOTES ===");
    let _ = writeln!(prompt, "{}", req.notes);
    let _ = writeln!(prompt, "=== END NOTES ===");

    if !req.table_talk.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "RECENT TABLE TALK:");
        for talk in &req.table_talk {
            let _ = writeln!(
                prompt,
                "- {} (hand #{}): \"{}\"",
                talk.speaker, talk.hand_number, talk.message
            );
        }
    }

    let board = if view.board.is_empty() {
        "None (preflop)".to_string()
    } else {
        cards(&view.board)
    };

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "CURRENT SITUATION (hand #{}):", req.hand_number);
    let _ = writeln!(prompt, "- Your cards: {}", cards(&view.hole_cards));
    let _ = writeln!(prompt, "- Your chips: {}", view.chips.amount());
    let _ = writeln!(prompt, "- Your current bet: {}", view.bet.amount());
    let _ = writeln!(prompt, "- Pot: {}", view.pot.amount());
    let _ = writeln!(prompt, "- Community cards: {board}");
    let _ = writeln!(prompt, "- To call: {}", view.to_call.amount());
    let _ = writeln!(prompt, "- Stage: {}", view.stage);

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "OPPONENTS:");
    for opp in &view.opponents {
        let _ = write!(
            prompt,
            "- {}: {} chips, bet {}",
            opp.name,
            opp.chips.amount(),
            opp.bet.amount()
        );
        if opp.folded {
            prompt.push_str(" (folded)");
        }
        if opp.all_in {
            prompt.push_str(" (all-in)");
        }
        prompt.push('\n');
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "RECENT ACTIONS THIS HAND:");
    write_actions(&mut prompt, &view.history);

    let legal = req
        .legal
        .iter()
        .map(|la| {
            let action = serde_name(la.action);
            if la.max.amount() == 0 {
                action
            } else if la.min == la.max {
                format!("{action} {}", la.min.amount())
            } else {
                format!("{action} {}-{}", la.min.amount(), la.max.amount())
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "VALID ACTIONS: {legal}");
    let _ = writeln!(prompt, "Amounts are the chips you add to the pot now.");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Respond with a single JSON object:");
    let _ = writeln!(
        prompt,
        r#"{{"action": "fold|check|call|bet|raise|all_in", "amount": <number or 0>, "reasoning": "<brief>", "inner_thoughts": "<private, for viewers only>", "trash_talk": "<said to the table, or null>"}}"#
    );

    prompt
}

/// Renders a reflection request as a prompt.
pub fn reflection(req: &ReflectionRequest) -> String {
    let summary = &req.summary;
    let mut prompt = String::new();

    let board = if summary.board.is_empty() {
        "No board".to_string()
    } else {
        cards(&summary.board)
    };

    let _ = writeln!(prompt, "You are {}. Hand #{} just ended.", req.player, summary.hand_number);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "HAND SUMMARY:");
    let _ = writeln!(prompt, "- Result for you: {}", req.outcome);
    let _ = writeln!(prompt, "- Final pot: {}", summary.pot.amount());
    let _ = writeln!(prompt, "- Board: {board}");
    let _ = writeln!(prompt, "- Winners: {}", summary.winners.join(", "));
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "ACTIONS:");
    write_actions(&mut prompt, &summary.actions);
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Write a short note (2-4 lines) about the opponents tendencies you observed."
    );
    let _ = writeln!(prompt, "Just write the note, no JSON.");

    prompt
}

fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_actions(prompt: &mut String, actions: &[ActionRecord]) {
    if actions.is_empty() {
        prompt.push_str("No actions yet\n");
    }

    for record in actions {
        let _ = write!(prompt, "- {}: {}", record.player, serde_name(record.action));
        if record.amount.amount() > 0 {
            let _ = write!(prompt, " {}", record.amount.amount());
        }
        prompt.push('\n');
    }
}

// The wire name of an action, the one agents answer with.
fn serde_name(action: sitgo_core::poker::PlayerAction) -> String {
    action.label().to_ascii_lowercase().replace('-', "_")
}
