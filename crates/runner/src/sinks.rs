// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Events sinks.
use log::{debug, info};
use tokio::sync::mpsc;

use sitgo_core::{
    event::{Event, EventSink},
    poker::Chips,
};

/// Forwards events to a channel without waiting.
///
/// Events are dropped if the channel is full or the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<Event>,
    dropped: usize,
}

impl ChannelSink {
    /// Creates a sink and the receiver for its events.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx, dropped: 0 }, rx)
    }

    /// The number of events dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl EventSink for ChannelSink {
    fn send(&mut self, event: Event) {
        if let Err(err) = self.tx.try_send(event) {
            self.dropped += 1;
            debug!("Event dropped: {err}");
        }
    }
}

/// Renders events as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn send(&mut self, event: Event) {
        match event {
            Event::TournamentStart {
                players,
                small_blind,
                big_blind,
            } => {
                let names = players
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                info!("Tournament starting blinds {small_blind}/{big_blind} players: {names}");
            }
            Event::HandStart(start) => {
                let stacks = start
                    .players
                    .iter()
                    .map(|p| format!("{} {}", p.name, p.chips))
                    .collect::<Vec<_>>()
                    .join(", ");
                info!(
                    "HAND #{} level {} blinds {}/{}{} button {}",
                    start.hand_number,
                    start.level,
                    start.small_blind,
                    start.big_blind,
                    ante(start.ante),
                    start.button
                );
                info!("Chips: {stacks}");
            }
            Event::Action {
                player,
                action,
                amount,
                pot,
                commentary,
                ..
            } => {
                if amount > Chips::ZERO {
                    info!("  [{player}] {action} {amount} pot {pot}");
                } else {
                    info!("  [{player}] {action}");
                }

                if !commentary.reasoning.is_empty() {
                    info!("    \"{}\"", commentary.reasoning);
                }

                if let Some(talk) = commentary.trash_talk {
                    info!("    {player} says: \"{talk}\"");
                }
            }
            Event::CommunityCards { stage, cards } => {
                let cards = cards
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                info!("  [BOARD] {}: {cards}", stage.to_string().to_uppercase());
            }
            Event::HandResult(result) => {
                for hand in &result.showdown_hands {
                    let cards = hand
                        .hole_cards
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    info!("  [SHOWDOWN] {} shows {cards} {}", hand.player, hand.value.rank());
                }
                info!("{}", result.summary);
            }
            Event::Elimination { player, place } => {
                info!("ELIMINATED: {player} finished in place {place}");
            }
            Event::LevelUp {
                level,
                small_blind,
                big_blind,
                ante: level_ante,
            } => {
                info!(
                    "[BLINDS UP] Level {level}: {small_blind}/{big_blind}{}",
                    ante(level_ante)
                );
            }
            Event::TournamentEnd(result) => {
                info!(
                    "TOURNAMENT COMPLETE winner {} after {} hands in {:.1}s",
                    result.winner.as_deref().unwrap_or("nobody"),
                    result.total_hands,
                    result.duration.as_secs_f64()
                );

                for standing in &result.standings {
                    info!("  {}. {} {}", standing.place, standing.name, standing.chips);
                }
            }
        }
    }
}

fn ante(ante: Chips) -> String {
    if ante > Chips::ZERO {
        format!(" ante {ante}")
    } else {
        String::new()
    }
}

/// Sends events to all the sinks in a list.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink + Send>>,
}

impl FanoutSink {
    /// Creates a new empty fanout sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    pub fn with(mut self, sink: impl EventSink + Send + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl EventSink for FanoutSink {
    fn send(&mut self, event: Event) {
        if let Some((last, rest)) = self.sinks.split_last_mut() {
            for sink in rest {
                sink.send(event.clone());
            }
            last.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitgo_core::event::PlayerStack;

    fn elimination(place: usize) -> Event {
        Event::Elimination {
            player: "Bob".to_string(),
            place,
        }
    }

    #[tokio::test]
    async fn channel_sink_never_blocks() {
        let (mut sink, mut rx) = ChannelSink::new(2);

        for place in 1..=5 {
            sink.send(elimination(place));
        }

        assert_eq!(sink.dropped(), 3);
        assert!(matches!(rx.recv().await, Some(Event::Elimination { place: 1, .. })));
        assert!(matches!(rx.recv().await, Some(Event::Elimination { place: 2, .. })));

        drop(rx);
        sink.send(elimination(6));
        assert_eq!(sink.dropped(), 4);
    }

    #[test]
    fn fanout_sink_sends_to_all() {
        let (first, mut rx1) = ChannelSink::new(4);
        let (second, mut rx2) = ChannelSink::new(4);
        let mut sink = FanoutSink::new().with(first).with(second).with(LogSink);

        sink.send(Event::TournamentStart {
            players: vec![PlayerStack::new("Alice", Chips::new(100))],
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
        });

        assert!(matches!(rx1.try_recv(), Ok(Event::TournamentStart { .. })));
        assert!(matches!(rx2.try_recv(), Ok(Event::TournamentStart { .. })));
    }
}
