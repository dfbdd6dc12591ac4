// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! No-Limit Texas Hold'em hand engine.
//!
//! A [PokerGame] runs a single hand over a slice of tournament players, it
//! posts blinds and antes, deals cards, enforces the legal actions, tracks the
//! pot, and pays the winners. It doesn't ask players for actions, that is the
//! job of whoever drives the betting rounds.
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    game_state::{ActionRecord, HandSummary, LegalAction, OpponentView, PlayerView},
    player::Player,
    poker::{Card, Chips, Deck, HandValue, PlayerAction, PlayerCards, Stage},
    tournament::BlindLevel,
};

/// The number of recent actions included in a [PlayerView].
pub const VIEW_HISTORY_LEN: usize = 10;

/// The public state of a hand.
#[derive(Debug, Clone, Default)]
pub struct HandState {
    /// The chips in the pot.
    pub pot: Chips,
    /// Up to five community cards.
    pub board: Vec<Card>,
    /// The bet to match in this betting round.
    pub current_bet: Chips,
    /// The minimum raise increment.
    pub min_raise: Chips,
    /// The hand stage.
    pub stage: Stage,
    /// All the actions in this hand.
    pub actions: Vec<ActionRecord>,
}

/// Chips paid to a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The player name.
    pub player: String,
    /// The chips won.
    pub chips: Chips,
}

/// A hand shown at showdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowdownHand {
    /// The player name.
    pub player: String,
    /// The player hole cards.
    pub hole_cards: Vec<Card>,
    /// The best hand using the community cards.
    pub value: HandValue,
}

/// The outcome of a hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    /// The pot that was paid.
    pub pot: Chips,
    /// The winners, in payout order.
    pub payouts: Vec<Payout>,
    /// The community cards.
    pub board: Vec<Card>,
    /// The hands shown at showdown, empty if the pot was uncontested.
    pub showdown: Vec<ShowdownHand>,
    /// All the hand actions.
    pub actions: Vec<ActionRecord>,
    /// The last stage reached before the pot was paid.
    pub stage: Stage,
}

impl Settlement {
    /// The winners names.
    pub fn winners(&self) -> impl Iterator<Item = &str> {
        self.payouts.iter().map(|p| p.player.as_str())
    }

    /// Checks if the pot was split.
    pub fn is_split(&self) -> bool {
        self.payouts.len() > 1
    }

    /// Builds a summary of this hand.
    pub fn summary(&self, hand_number: u32) -> HandSummary {
        HandSummary {
            hand_number,
            pot: self.pot,
            board: self.board.clone(),
            actions: self.actions.clone(),
            stage: self.stage,
            winners: self.winners().map(String::from).collect(),
        }
    }
}

/// A single hand over the tournament players.
#[derive(Debug)]
pub struct PokerGame<'a> {
    players: &'a mut [Player],
    small_blind: Chips,
    big_blind: Chips,
    ante: Chips,
    button: usize,
    small_blind_seat: usize,
    big_blind_seat: usize,
    deck: Deck,
    state: HandState,
}

impl<'a> PokerGame<'a> {
    /// Creates a hand for the given players, blinds, and button seat.
    pub fn new(players: &'a mut [Player], blinds: &BlindLevel, button: usize) -> Self {
        let button = if players.is_empty() {
            0
        } else {
            button % players.len()
        };

        Self {
            players,
            small_blind: blinds.small_blind,
            big_blind: blinds.big_blind,
            ante: blinds.ante,
            button,
            small_blind_seat: button,
            big_blind_seat: button,
            deck: Deck::default(),
            state: HandState {
                min_raise: blinds.big_blind,
                ..Default::default()
            },
        }
    }

    /// Starts the hand: collects antes, posts blinds, and deals hole cards.
    pub fn start_hand<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        for player in self.players.iter_mut() {
            player.start_hand();
        }

        self.state = HandState {
            min_raise: self.big_blind,
            ..Default::default()
        };
        self.deck.reset(rng);

        let active = self.players.iter().filter(|p| p.is_active).count();
        if active < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        if !self.players[self.button].is_active {
            self.button = self
                .next_active(self.button)
                .ok_or(GameError::NotEnoughPlayers)?;
        }

        if self.ante > Chips::ZERO {
            for player in self.players.iter_mut().filter(|p| p.is_active) {
                self.state.pot += player.pay(self.ante);
            }
        }

        // Heads up the button posts the small blind.
        let (sb, bb) = if active == 2 {
            let bb = self.next_active(self.button);
            (Some(self.button), bb)
        } else {
            let sb = self.next_active(self.button);
            (sb, sb.and_then(|sb| self.next_active(sb)))
        };

        let (Some(sb), Some(bb)) = (sb, bb) else {
            return Err(GameError::NotEnoughPlayers);
        };

        self.small_blind_seat = sb;
        self.big_blind_seat = bb;

        self.state.pot += self.players[sb].commit(self.small_blind);
        self.state.pot += self.players[bb].commit(self.big_blind);
        self.state.current_bet = self.players[sb].bet.max(self.players[bb].bet);

        for seat in seats_after(self.button, self.players.len()) {
            if self.players[seat].is_active {
                if let &[c1, c2] = self.deck.deal(2).as_slice() {
                    self.players[seat].hole_cards = PlayerCards::Cards(c1, c2);
                }
            }
        }

        debug!(
            "Hand started button {} small blind {} big blind {} pot {}",
            self.players[self.button].name,
            self.players[sb].name,
            self.players[bb].name,
            self.state.pot
        );

        Ok(())
    }

    /// The hand players, including the ones out of the tournament.
    pub fn players(&self) -> &[Player] {
        self.players
    }

    /// The player at the given seat.
    pub fn player(&self, seat: usize) -> Result<&Player, GameError> {
        self.players.get(seat).ok_or(GameError::UnknownSeat(seat))
    }

    /// The hand public state.
    pub fn state(&self) -> &HandState {
        &self.state
    }

    /// The chips in the pot.
    pub fn pot(&self) -> Chips {
        self.state.pot
    }

    /// The hand stage.
    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    /// The community cards.
    pub fn board(&self) -> &[Card] {
        &self.state.board
    }

    /// The hand big blind.
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// The button seat.
    pub fn button(&self) -> usize {
        self.button
    }

    /// The seat that posted the small blind.
    pub fn small_blind_seat(&self) -> usize {
        self.small_blind_seat
    }

    /// The seat that posted the big blind.
    pub fn big_blind_seat(&self) -> usize {
        self.big_blind_seat
    }

    /// The number of players that haven't folded.
    pub fn players_in_hand(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// The number of players that haven't folded and are not all in.
    pub fn players_able_to_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Returns the legal actions for the player at the given seat.
    ///
    /// A player that folded or is all in has no legal actions.
    pub fn get_valid_actions(&self, seat: usize) -> Vec<LegalAction> {
        let Some(player) = self.players.get(seat) else {
            return Vec::new();
        };

        if !player.can_act() {
            return Vec::new();
        }

        let to_call = player.to_call(self.state.current_bet);
        let mut actions = vec![LegalAction::new(
            PlayerAction::Fold,
            Chips::ZERO,
            Chips::ZERO,
        )];

        if to_call == Chips::ZERO {
            actions.push(LegalAction::new(
                PlayerAction::Check,
                Chips::ZERO,
                Chips::ZERO,
            ));

            // A stack shorter than the big blind can still bet all of it.
            if player.chips > Chips::ZERO {
                actions.push(LegalAction::new(
                    PlayerAction::Bet,
                    self.big_blind.min(player.chips),
                    player.chips,
                ));
            }
        } else if player.chips <= to_call {
            actions.push(LegalAction::new(
                PlayerAction::AllIn,
                player.chips,
                player.chips,
            ));
        } else {
            actions.push(LegalAction::new(PlayerAction::Call, to_call, to_call));

            let min_raise = to_call + self.state.min_raise;
            if player.chips >= min_raise {
                actions.push(LegalAction::new(
                    PlayerAction::Raise,
                    min_raise,
                    player.chips,
                ));
            }
        }

        actions
    }

    /// Applies an action for the player at the given seat.
    ///
    /// The action must be in the player legal actions and, for bets and
    /// raises, the amount in the action range. Returns the chips the player
    /// put in the pot.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<Chips, GameError> {
        let legal = self.get_valid_actions(seat);
        let player = self.players.get(seat).ok_or(GameError::UnknownSeat(seat))?;

        // Only bets and raises let the player choose the amount.
        let sized = matches!(action, PlayerAction::Bet | PlayerAction::Raise);
        let range = legal
            .into_iter()
            .find(|la| la.action == action)
            .filter(|la| !sized || la.allows(amount));

        let Some(range) = range else {
            return Err(GameError::IllegalAction {
                player: player.name.clone(),
                action,
                amount,
            });
        };

        let prev_bet = self.state.current_bet;
        let player = &mut self.players[seat];

        let paid = match action {
            PlayerAction::Fold => {
                player.fold();
                Chips::ZERO
            }
            PlayerAction::Check => Chips::ZERO,
            PlayerAction::Call => player.commit(range.min),
            PlayerAction::Bet | PlayerAction::Raise => player.commit(amount),
            PlayerAction::AllIn => {
                let chips = player.chips;
                player.commit(chips)
            }
        };

        player.has_acted = true;
        let player_bet = player.bet;
        let name = player.name.clone();

        self.state.pot += paid;

        if player_bet > prev_bet {
            self.state.min_raise = player_bet - prev_bet;
            self.state.current_bet = player_bet;

            // Everybody else has to act again.
            for (idx, other) in self.players.iter_mut().enumerate() {
                if idx != seat {
                    other.has_acted = false;
                }
            }
        }

        debug!("{name} {action} {paid} pot {}", self.state.pot);

        self.state.actions.push(ActionRecord {
            player: name,
            action,
            amount: paid,
            stage: self.state.stage,
        });

        Ok(paid)
    }

    /// Checks if the current betting round is complete.
    pub fn is_betting_complete(&self) -> bool {
        if self.players_in_hand() < 2 {
            return true;
        }

        // A player that can act and didn't match the bet has to act.
        let current_bet = self.state.current_bet;
        if self
            .players
            .iter()
            .any(|p| p.can_act() && p.bet < current_bet)
        {
            return false;
        }

        // Only one player has chips all others are all in.
        if self.players_able_to_act() < 2 {
            return true;
        }

        self.players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.has_acted)
    }

    /// The seat the action starts after in the current betting round.
    ///
    /// Preflop the action starts after the big blind, on the other streets
    /// after the button.
    pub fn action_anchor(&self) -> usize {
        if self.state.stage == Stage::Preflop {
            self.big_blind_seat
        } else {
            self.button
        }
    }

    /// The first player to act in the current betting round.
    pub fn first_to_act(&self) -> Option<usize> {
        self.next_to_act(self.action_anchor())
    }

    /// The next seat after the given one that has to act.
    ///
    /// Skips players that folded or are all in, and players that have already
    /// acted and matched the bet.
    pub fn next_to_act(&self, after: usize) -> Option<usize> {
        let current_bet = self.state.current_bet;
        seats_after(after, self.players.len()).find(|&seat| {
            let p = &self.players[seat];
            p.can_act() && (!p.has_acted || p.bet < current_bet)
        })
    }

    /// The players names in acting order for the current betting round.
    pub fn acting_order(&self) -> Vec<String> {
        seats_after(self.action_anchor(), self.players.len())
            .filter(|&seat| self.players[seat].can_act())
            .map(|seat| self.players[seat].name.clone())
            .collect()
    }

    /// Deals the next community cards after burning one card.
    ///
    /// Deals the flop, the turn, or the river depending on the stage, does
    /// nothing after the river.
    pub fn deal_community(&mut self) -> &[Card] {
        let (count, next) = match self.state.stage {
            Stage::Preflop => (3, Stage::Flop),
            Stage::Flop => (1, Stage::Turn),
            Stage::Turn => (1, Stage::River),
            Stage::River | Stage::Showdown => {
                warn!("No community cards to deal at {}", self.state.stage);
                return &self.state.board;
            }
        };

        self.deck.burn();
        self.state.board.extend(self.deck.deal(count));
        self.state.stage = next;

        debug!(
            "Dealt {} board {}",
            next,
            self.state
                .board
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        &self.state.board
    }

    /// Starts a new betting round.
    ///
    /// Clears the players bets and acted flags, the pot is untouched.
    pub fn reset_betting_round(&mut self) {
        for player in self.players.iter_mut() {
            player.start_round();
        }

        self.state.current_bet = Chips::ZERO;
        self.state.min_raise = self.big_blind;
    }

    /// Pays the pot to the best hands and returns the hand outcome.
    ///
    /// Tied winners are paid in seat order starting left of the button, the
    /// odd chips go one each to the first winners.
    pub fn determine_winners(&mut self) -> Settlement {
        let pot = self.state.pot;
        let stage = self.state.stage;
        let contenders = seats_after(self.button, self.players.len())
            .filter(|&seat| self.players[seat].is_in_hand())
            .collect::<Vec<_>>();

        let mut showdown = Vec::new();
        let winners = match contenders.as_slice() {
            [] => {
                warn!("All players folded, paying the largest contribution");
                self.fallback_winner().into_iter().collect::<Vec<_>>()
            }
            [seat] => vec![*seat],
            _ => {
                let mut values = Vec::with_capacity(contenders.len());
                for &seat in &contenders {
                    let player = &self.players[seat];
                    let mut cards = player.hole_cards.to_vec();
                    cards.extend_from_slice(&self.state.board);

                    match HandValue::eval(&cards) {
                        Ok(value) => {
                            showdown.push(ShowdownHand {
                                player: player.name.clone(),
                                hole_cards: player.hole_cards.to_vec(),
                                value: value.clone(),
                            });
                            values.push((seat, value));
                        }
                        Err(err) => warn!("Cannot evaluate {} hand: {err}", player.name),
                    }
                }

                match values.iter().map(|(_, v)| v).max().cloned() {
                    Some(best) => values
                        .into_iter()
                        .filter(|(_, v)| *v == best)
                        .map(|(seat, _)| seat)
                        .collect(),
                    None => contenders[..1].to_vec(),
                }
            }
        };

        let mut payouts = Vec::with_capacity(winners.len());
        if winners.is_empty() {
            warn!("No winner for pot {pot}");
        } else {
            let count = winners.len() as u32;
            let share = pot / count;
            let remainder = (pot % count).amount() as usize;

            for (idx, &seat) in winners.iter().enumerate() {
                let won = if idx < remainder {
                    share + Chips::new(1)
                } else {
                    share
                };

                let player = &mut self.players[seat];
                player.chips += won;
                payouts.push(Payout {
                    player: player.name.clone(),
                    chips: won,
                });
            }
        }

        self.state.pot = Chips::ZERO;
        self.state.stage = Stage::Showdown;

        Settlement {
            pot,
            payouts,
            board: self.state.board.clone(),
            showdown,
            actions: self.state.actions.clone(),
            stage,
        }
    }

    /// The game state from the point of view of the player at the given seat.
    pub fn view_for(&self, seat: usize) -> Result<PlayerView, GameError> {
        let player = self.player(seat)?;

        let opponents = self
            .players
            .iter()
            .enumerate()
            .filter(|(idx, p)| *idx != seat && p.is_active)
            .map(|(_, p)| OpponentView {
                name: p.name.clone(),
                chips: p.chips,
                bet: p.bet,
                folded: p.folded,
                all_in: p.all_in,
            })
            .collect();

        let skip = self.state.actions.len().saturating_sub(VIEW_HISTORY_LEN);

        Ok(PlayerView {
            name: player.name.clone(),
            hole_cards: player.hole_cards.to_vec(),
            chips: player.chips,
            bet: player.bet,
            pot: self.state.pot,
            board: self.state.board.clone(),
            current_bet: self.state.current_bet,
            to_call: player.to_call(self.state.current_bet),
            min_raise: self.state.min_raise,
            big_blind: self.big_blind,
            stage: self.state.stage,
            opponents,
            history: self.state.actions[skip..].to_vec(),
        })
    }

    fn next_active(&self, seat: usize) -> Option<usize> {
        seats_after(seat, self.players.len()).find(|&s| self.players[s].is_active)
    }

    // The active player who put the most chips in the pot, first seat on ties.
    fn fallback_winner(&self) -> Option<usize> {
        let mut winner: Option<usize> = None;
        for (seat, player) in self.players.iter().enumerate() {
            if !player.is_active {
                continue;
            }

            match winner {
                Some(w) if self.players[w].contributed >= player.contributed => {}
                _ => winner = Some(seat),
            }
        }

        winner
    }
}

/// Seats after the given one wrapping around, the given seat is last.
fn seats_after(seat: usize, count: usize) -> impl Iterator<Item = usize> {
    (1..=count).map(move |offset| (seat + offset) % count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn new_players(stacks: &[u32]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(idx, &chips)| Player::new(format!("P{}", idx + 1), Chips::new(chips)))
            .collect()
    }

    fn blinds(small: u32, big: u32) -> BlindLevel {
        BlindLevel::new(small, big, 0, 10, 5)
    }

    fn start(game: &mut PokerGame<'_>) {
        let mut rng = StdRng::seed_from_u64(101);
        game.start_hand(&mut rng).unwrap();
    }

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn total_chips(game: &PokerGame<'_>) -> Chips {
        game.players().iter().map(|p| p.chips).sum::<Chips>() + game.pot()
    }

    fn legal(action: PlayerAction, min: u32, max: u32) -> LegalAction {
        LegalAction::new(action, Chips::new(min), Chips::new(max))
    }

    #[test]
    fn heads_up_blinds_and_flop() {
        let mut players = new_players(&[1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        start(&mut game);

        // Heads up the button is the small blind and acts first preflop.
        assert_eq!(game.small_blind_seat(), 0);
        assert_eq!(game.big_blind_seat(), 1);
        assert_eq!(game.players()[0].bet, Chips::new(50));
        assert_eq!(game.players()[1].bet, Chips::new(100));
        assert_eq!(game.pot(), Chips::new(150));
        assert_eq!(game.state().current_bet, Chips::new(100));
        assert_eq!(game.first_to_act(), Some(0));

        assert_eq!(
            game.get_valid_actions(0),
            vec![
                legal(PlayerAction::Fold, 0, 0),
                legal(PlayerAction::Call, 50, 50),
                legal(PlayerAction::Raise, 150, 950),
            ]
        );

        let paid = game.apply_action(0, PlayerAction::Call, Chips::ZERO).unwrap();
        assert_eq!(paid, Chips::new(50));
        assert_eq!(game.pot(), Chips::new(200));

        // The big blind has the option.
        assert!(!game.is_betting_complete());
        assert_eq!(game.next_to_act(0), Some(1));

        game.apply_action(1, PlayerAction::Check, Chips::ZERO).unwrap();
        assert!(game.is_betting_complete());

        let board = game.deal_community();
        assert_eq!(board.len(), 3);
        assert_eq!(game.stage(), Stage::Flop);

        game.reset_betting_round();
        assert_eq!(game.pot(), Chips::new(200));
        assert!(game.players().iter().all(|p| p.bet == Chips::ZERO));
        assert_eq!(game.state().current_bet, Chips::ZERO);

        // After the flop the big blind acts first.
        assert_eq!(game.first_to_act(), Some(1));
    }

    #[test]
    fn hole_cards_are_dealt() {
        let mut players = new_players(&[1000, 1000, 1000, 0]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        start(&mut game);

        let mut dealt = game
            .players()
            .iter()
            .flat_map(|p| p.hole_cards.to_vec())
            .collect::<Vec<_>>();
        assert_eq!(dealt.len(), 6);
        assert_eq!(game.players()[3].hole_cards, PlayerCards::None);

        dealt.sort();
        dealt.dedup();
        assert_eq!(dealt.len(), 6);
    }

    #[test]
    fn multiway_blinds_skip_busted_players() {
        let mut players = new_players(&[1000, 0, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        start(&mut game);

        assert_eq!(game.small_blind_seat(), 2);
        assert_eq!(game.big_blind_seat(), 3);
        assert_eq!(game.first_to_act(), Some(0));
        assert_eq!(game.acting_order(), vec!["P1", "P3", "P4"]);
    }

    #[test]
    fn button_moves_to_active_seat() {
        let mut players = new_players(&[0, 1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        start(&mut game);

        assert_eq!(game.button(), 1);
        assert_eq!(game.small_blind_seat(), 2);
        assert_eq!(game.big_blind_seat(), 3);
    }

    #[test]
    fn antes_go_to_the_pot() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let level = BlindLevel::new(100, 200, 25, 10, 5);
        let mut game = PokerGame::new(&mut players, &level, 0);
        start(&mut game);

        assert_eq!(game.pot(), Chips::new(375));
        assert_eq!(game.players()[0].chips, Chips::new(975));
        assert_eq!(game.players()[0].bet, Chips::ZERO);
        assert_eq!(total_chips(&game), Chips::new(3000));
    }

    #[test]
    fn short_big_blind_goes_all_in() {
        let mut players = new_players(&[1000, 1000, 50]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        assert!(game.players()[2].all_in);
        assert_eq!(game.state().current_bet, Chips::new(100));
        assert_eq!(game.pot(), Chips::new(150));
    }

    #[test]
    fn not_enough_players() {
        let mut players = new_players(&[1000, 0, 0]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            game.start_hand(&mut rng),
            Err(GameError::NotEnoughPlayers)
        );
    }

    #[test]
    fn valid_actions_with_nothing_to_call() {
        let mut players = new_players(&[500, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);
        game.reset_betting_round();

        assert_eq!(
            game.get_valid_actions(0),
            vec![
                legal(PlayerAction::Fold, 0, 0),
                legal(PlayerAction::Check, 0, 0),
                legal(PlayerAction::Bet, 200, 500),
            ]
        );
    }

    #[test]
    fn valid_actions_short_stack() {
        let mut players = new_players(&[250, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(150, 300), 0);
        start(&mut game);

        assert_eq!(
            game.get_valid_actions(0),
            vec![
                legal(PlayerAction::Fold, 0, 0),
                legal(PlayerAction::AllIn, 250, 250),
            ]
        );
    }

    #[test]
    fn valid_actions_facing_a_bet() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        assert_eq!(
            game.get_valid_actions(0),
            vec![
                legal(PlayerAction::Fold, 0, 0),
                legal(PlayerAction::Call, 200, 200),
                legal(PlayerAction::Raise, 400, 1000),
            ]
        );

        // A stack between the call and the min raise can only call.
        game.players[0].chips = Chips::new(300);
        assert_eq!(
            game.get_valid_actions(0),
            vec![
                legal(PlayerAction::Fold, 0, 0),
                legal(PlayerAction::Call, 200, 200),
            ]
        );
    }

    #[test]
    fn no_actions_when_folded_or_all_in() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        game.apply_action(0, PlayerAction::Fold, Chips::ZERO).unwrap();
        assert!(game.get_valid_actions(0).is_empty());

        game.apply_action(1, PlayerAction::Raise, Chips::new(900)).unwrap();
        assert!(game.players()[1].all_in);
        assert!(game.get_valid_actions(1).is_empty());
        assert!(game.get_valid_actions(7).is_empty());
    }

    #[test]
    fn three_checks_complete_the_round() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        game.apply_action(0, PlayerAction::Call, Chips::ZERO).unwrap();
        game.apply_action(1, PlayerAction::Call, Chips::ZERO).unwrap();
        assert!(!game.is_betting_complete());
        game.apply_action(2, PlayerAction::Check, Chips::ZERO).unwrap();
        assert!(game.is_betting_complete());

        game.deal_community();
        game.reset_betting_round();
        assert!(!game.is_betting_complete());

        let mut seat = game.first_to_act().unwrap();
        assert_eq!(seat, 1);

        for checks in 1..=3 {
            game.apply_action(seat, PlayerAction::Check, Chips::ZERO)
                .unwrap();
            assert_eq!(game.is_betting_complete(), checks == 3);
            if let Some(next) = game.next_to_act(seat) {
                seat = next;
            }
        }

        assert_eq!(game.next_to_act(seat), None);
    }

    #[test]
    fn raise_reopens_the_action() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        for seat in [0, 1] {
            game.apply_action(seat, PlayerAction::Call, Chips::ZERO)
                .unwrap();
        }
        game.apply_action(2, PlayerAction::Check, Chips::ZERO).unwrap();
        game.deal_community();
        game.reset_betting_round();

        game.apply_action(1, PlayerAction::Bet, Chips::new(200)).unwrap();
        assert_eq!(game.state().current_bet, Chips::new(200));
        assert_eq!(game.state().min_raise, Chips::new(200));

        game.apply_action(2, PlayerAction::Call, Chips::ZERO).unwrap();
        game.apply_action(0, PlayerAction::Raise, Chips::new(400))
            .unwrap();
        assert_eq!(game.state().current_bet, Chips::new(400));
        assert_eq!(game.state().min_raise, Chips::new(200));

        assert!(!game.is_betting_complete());
        assert_eq!(game.next_to_act(0), Some(1));
        assert!(!game.players()[1].has_acted);
        assert!(!game.players()[2].has_acted);
        assert_eq!(total_chips(&game), Chips::new(3000));
    }

    #[test]
    fn illegal_actions_are_rejected() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        let pot = game.pot();

        // Check facing a bet.
        assert!(matches!(
            game.apply_action(0, PlayerAction::Check, Chips::ZERO),
            Err(GameError::IllegalAction { .. })
        ));

        // Raise below the minimum.
        assert!(matches!(
            game.apply_action(0, PlayerAction::Raise, Chips::new(300)),
            Err(GameError::IllegalAction { .. })
        ));

        // Bet when there is a bet to call.
        assert!(game
            .apply_action(0, PlayerAction::Bet, Chips::new(400))
            .is_err());

        assert_eq!(
            game.apply_action(9, PlayerAction::Fold, Chips::ZERO),
            Err(GameError::UnknownSeat(9))
        );

        assert_eq!(game.pot(), pot);
        assert!(game.state().actions.is_empty());
    }

    #[test]
    fn uncontested_pot() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        game.apply_action(0, PlayerAction::Fold, Chips::ZERO).unwrap();
        game.apply_action(1, PlayerAction::Fold, Chips::ZERO).unwrap();
        assert!(game.is_betting_complete());

        let settlement = game.determine_winners();
        assert_eq!(settlement.pot, Chips::new(300));
        assert_eq!(
            settlement.payouts,
            vec![Payout {
                player: "P3".to_string(),
                chips: Chips::new(300)
            }]
        );
        assert!(settlement.showdown.is_empty());
        assert_eq!(settlement.stage, Stage::Preflop);
        assert_eq!(game.pot(), Chips::ZERO);
        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(game.players()[2].chips, Chips::new(1100));
        assert_eq!(total_chips(&game), Chips::new(3000));
    }

    #[test]
    fn all_folded_pays_largest_contribution() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        for player in game.players.iter_mut() {
            player.folded = true;
        }

        let settlement = game.determine_winners();
        assert_eq!(settlement.winners().collect::<Vec<_>>(), vec!["P3"]);
        assert_eq!(total_chips(&game), Chips::new(3000));
    }

    #[test]
    fn split_pot_odd_chips() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        // The board plays for everybody.
        game.state.board = cards("AH KH QH JH TH");
        game.state.stage = Stage::River;
        game.state.pot = Chips::new(100);
        let holes = ["2C 3D", "2D 3C", "2S 3S"];
        for (player, hole) in game.players.iter_mut().zip(holes) {
            let hole = cards(hole);
            player.hole_cards = PlayerCards::Cards(hole[0], hole[1]);
        }

        let settlement = game.determine_winners();
        assert!(settlement.is_split());
        assert_eq!(settlement.showdown.len(), 3);
        assert_eq!(
            settlement.payouts,
            vec![
                Payout {
                    player: "P2".to_string(),
                    chips: Chips::new(34)
                },
                Payout {
                    player: "P3".to_string(),
                    chips: Chips::new(33)
                },
                Payout {
                    player: "P1".to_string(),
                    chips: Chips::new(33)
                },
            ]
        );
        assert_eq!(
            settlement.payouts.iter().map(|p| p.chips).sum::<Chips>(),
            Chips::new(100)
        );
    }

    #[test]
    fn best_hand_wins_showdown() {
        let mut players = new_players(&[1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        start(&mut game);

        game.apply_action(0, PlayerAction::Call, Chips::ZERO).unwrap();
        game.apply_action(1, PlayerAction::Check, Chips::ZERO).unwrap();

        game.state.board = cards("2C 7D 9H JS KD");
        game.state.stage = Stage::River;
        let a = cards("KS KH");
        let b = cards("AS QD");
        game.players[0].hole_cards = PlayerCards::Cards(a[0], a[1]);
        game.players[1].hole_cards = PlayerCards::Cards(b[0], b[1]);

        let settlement = game.determine_winners();
        assert_eq!(settlement.winners().collect::<Vec<_>>(), vec!["P1"]);
        assert_eq!(game.players()[0].chips, Chips::new(1100));
        assert_eq!(game.players()[1].chips, Chips::new(900));

        let summary = settlement.summary(4);
        assert_eq!(summary.hand_number, 4);
        assert_eq!(summary.winners, vec!["P1"]);
        assert_eq!(summary.actions.len(), 2);
    }

    #[test]
    fn community_cards_stop_at_the_river() {
        let mut players = new_players(&[1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(50, 100), 0);
        start(&mut game);

        assert_eq!(game.deal_community().len(), 3);
        assert_eq!(game.deal_community().len(), 4);
        assert_eq!(game.deal_community().len(), 5);
        assert_eq!(game.stage(), Stage::River);
        assert_eq!(game.deal_community().len(), 5);
        assert_eq!(game.stage(), Stage::River);

        // Hole cards and board don't overlap.
        let mut all = game.board().to_vec();
        for player in game.players() {
            all.extend(player.hole_cards.to_vec());
        }
        let count = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), count);
    }

    #[test]
    fn player_view_hides_opponents_cards() {
        let mut players = new_players(&[1000, 1000, 1000]);
        let mut game = PokerGame::new(&mut players, &blinds(100, 200), 0);
        start(&mut game);

        game.apply_action(0, PlayerAction::Call, Chips::ZERO).unwrap();

        let view = game.view_for(1).unwrap();
        assert_eq!(view.name, "P2");
        assert_eq!(view.hole_cards.len(), 2);
        assert_eq!(view.to_call, Chips::new(100));
        assert_eq!(view.pot, Chips::new(500));
        assert_eq!(view.opponents.len(), 2);
        assert_eq!(view.history.len(), 1);
        assert!(game.view_for(3).is_err());
    }

    #[test]
    fn random_hands_conserve_chips() {
        let mut rng = StdRng::seed_from_u64(2025);

        for button in 0..20 {
            let mut players = new_players(&[1500, 800, 2200, 500]);
            let mut game = PokerGame::new(&mut players, &BlindLevel::new(50, 100, 10, 10, 5), button);
            game.start_hand(&mut rng).unwrap();

            loop {
                let mut guard = 0;
                let mut anchor = game.action_anchor();
                while !game.is_betting_complete() && guard < 100 {
                    let Some(seat) = game.next_to_act(anchor) else {
                        break;
                    };

                    let actions = game.get_valid_actions(seat);
                    let choice = actions[rng.random_range(0..actions.len())];
                    let amount = rng.random_range(choice.min.amount()..=choice.max.amount());
                    game.apply_action(seat, choice.action, Chips::new(amount))
                        .unwrap();
                    assert_eq!(total_chips(&game), Chips::new(5000));

                    anchor = seat;
                    guard += 1;
                }

                if game.players_in_hand() < 2 || game.stage() == Stage::River {
                    break;
                }

                game.deal_community();
                game.reset_betting_round();
            }

            if game.players_in_hand() > 1 {
                while game.stage() < Stage::River {
                    game.deal_community();
                }
            }

            let settlement = game.determine_winners();
            assert!(!settlement.payouts.is_empty());
            assert_eq!(total_chips(&game), Chips::new(5000));
        }
    }
}
