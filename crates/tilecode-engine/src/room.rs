//! The room aggregate: phase machine, seats, pools, turn order.
//!
//! A `Room` owns every piece of mutable game state and is the only type
//! that changes a phase. All in-game requests funnel through
//! [`Room::apply`], which validates the op's guards (phase, turn token,
//! acting seat) before running its effect, so a failed call never leaves
//! a half-applied room behind. Successful calls return the event list
//! the service layer should deliver; the room itself never broadcasts.

use tilecode_protocol::{
    ParticipantView, Phase, PlayerId, Recipient, RoomEvent, RoomId, RoomView, TileColor,
};

use crate::config::{RoomConfig, starting_hand_size};
use crate::error::EngineError;
use crate::participant::Participant;
use crate::phase::RoomOp;
use crate::pool::TilePools;
use crate::rng::EngineRng;
use crate::tile::Tile;

/// What a successful mutation wants delivered, in order.
pub type Events = Vec<(Recipient, RoomEvent)>;

/// How the room absorbed a dropped connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// Pre-game: the seat was removed outright.
    RemovedFromLobby { room_empty: bool },
    /// Mid-game: the seat was flagged and play steered around it.
    /// `room_abandoned` is set when no connected seat remains.
    Flagged { room_abandoned: bool },
}

/// One game instance shared by up to four seats.
#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    config: RoomConfig,
    phase: Phase,
    participants: Vec<Participant>,
    /// Seat ids in play order, fixed by the shuffle at game start.
    turn_order: Vec<PlayerId>,
    /// Index into `turn_order`; wraps, skipping dead seats.
    turn_pointer: usize,
    pools: TilePools,
    rng: EngineRng,
}

impl Room {
    pub fn new(id: RoomId, config: RoomConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => EngineRng::with_seed(seed),
            None => EngineRng::from_entropy(),
        };
        Room {
            id,
            config,
            phase: Phase::Wait,
            participants: Vec::new(),
            turn_order: Vec::new(),
            turn_pointer: 0,
            pools: TilePools::empty(),
            rng,
        }
    }

    // -- queries ----------------------------------------------------------

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn_pointer(&self) -> usize {
        self.turn_pointer
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// The seat holding the turn, if a game is running.
    pub fn current_id(&self) -> Option<PlayerId> {
        self.turn_order.get(self.turn_pointer).copied()
    }

    /// The RNG seed this room plays with; logging it makes a game replayable.
    pub fn rng_seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Projects the room for one viewer. Closed tiles in other seats'
    /// hands are masked to the colored sentinel; jokers always show as
    /// the colored 12. In GAMEOVER everything is face up for everyone.
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> RoomView {
        let force_reveal = self.phase == Phase::Gameover;
        let participants = self
            .participants
            .iter()
            .map(|seat| {
                let own = viewer == Some(seat.id());
                let hand = seat
                    .hand()
                    .iter()
                    .map(|tile| {
                        if own || force_reveal {
                            tile.owner_code()
                        } else {
                            tile.public_code()
                        }
                    })
                    .collect();
                ParticipantView {
                    player_id: seat.id(),
                    turn_order: seat.turn_order(),
                    ready: seat.is_ready(),
                    retired: seat.is_retired(),
                    connected: seat.is_connected(),
                    hand,
                    last_drawn_index: seat.last_drawn_index(),
                }
            })
            .collect();
        RoomView {
            room_id: self.id,
            phase: self.phase,
            turn_pointer: self.turn_pointer,
            participants,
        }
    }

    // -- lobby ------------------------------------------------------------

    /// Seats a new participant. WAIT only.
    pub fn join(&mut self, player: PlayerId) -> Result<Events, EngineError> {
        if self.phase != Phase::Wait {
            return Err(EngineError::PhaseMismatch {
                op: "joinRoom",
                actual: self.phase,
            });
        }
        if self.participants.iter().any(|p| p.id() == player) {
            return Err(EngineError::AlreadySeated(player));
        }
        if self.participants.len() >= self.config.max_players {
            return Err(EngineError::RoomFull {
                max: self.config.max_players,
            });
        }

        self.participants.push(Participant::new(player));
        tracing::info!(
            room_id = %self.id,
            player_id = %player,
            seats = self.participants.len(),
            "participant joined"
        );
        Ok(vec![(
            Recipient::All,
            RoomEvent::ParticipantJoined {
                player_id: player,
                seats_taken: self.participants.len(),
            },
        )])
    }

    /// Toggles a lobby ready flag. WAIT only; in-game readiness belongs
    /// to the phase machine.
    pub fn set_ready(&mut self, player: PlayerId, ready: bool) -> Result<Events, EngineError> {
        if self.phase != Phase::Wait {
            return Err(EngineError::PhaseMismatch {
                op: "setReady",
                actual: self.phase,
            });
        }
        self.seat_mut(player)?.set_ready(ready);
        Ok(vec![(
            Recipient::All,
            RoomEvent::ReadyChanged {
                player_id: player,
                ready,
            },
        )])
    }

    /// Absorbs a dropped connection.
    ///
    /// In WAIT the seat is simply removed. Mid-game the seat is flagged
    /// and kept (its hand stays guessable), the pointer is advanced off
    /// it if it held the turn, and the room is forced into GUESS so the
    /// remaining seats can play the deduction out. Ready flags are
    /// cleared as the skipped closes would have done. In GAMEOVER the
    /// flag alone is recorded; eviction happens at the reset edge.
    pub fn handle_disconnect(
        &mut self,
        player: PlayerId,
    ) -> Result<(DisconnectOutcome, Events), EngineError> {
        let position = self
            .participants
            .iter()
            .position(|p| p.id() == player)
            .ok_or(EngineError::UnknownParticipant(player))?;

        if self.phase == Phase::Wait {
            self.participants.remove(position);
            let room_empty = self.participants.is_empty();
            tracing::info!(
                room_id = %self.id,
                player_id = %player,
                seats = self.participants.len(),
                "participant left the lobby"
            );
            return Ok((
                DisconnectOutcome::RemovedFromLobby { room_empty },
                vec![(
                    Recipient::All,
                    RoomEvent::ParticipantLeft { player_id: player },
                )],
            ));
        }

        self.participants[position].mark_disconnected();
        let mut events: Events = vec![(
            Recipient::All,
            RoomEvent::ParticipantDisconnected { player_id: player },
        )];
        tracing::warn!(
            room_id = %self.id,
            player_id = %player,
            phase = %self.phase,
            "participant disconnected mid-game"
        );

        if self.phase.is_turn_cycle() {
            self.clear_ready_flags();
            if self.current_id() == Some(player) {
                if let Some(next) = self.advance_turn() {
                    events.push((
                        Recipient::All,
                        RoomEvent::TurnAdvanced {
                            turn_pointer: self.turn_pointer,
                            player_id: next,
                        },
                    ));
                }
            }
            if self.phase != Phase::Guess {
                events.push((
                    Recipient::All,
                    RoomEvent::PhaseClosed {
                        phase: self.phase,
                        next: Phase::Guess,
                    },
                ));
                self.phase = Phase::Guess;
            }
        }

        let room_abandoned = !self.participants.iter().any(Participant::is_connected);
        Ok((DisconnectOutcome::Flagged { room_abandoned }, events))
    }

    // -- in-game dispatch -------------------------------------------------

    /// Validates and applies one in-game operation.
    ///
    /// Guard order is fixed: phase edge, then turn token, then acting
    /// seat. An `Err` from any guard or effect leaves the room unchanged.
    pub fn apply(&mut self, op: RoomOp) -> Result<Events, EngineError> {
        self.check_guards(op)?;
        match op {
            RoomOp::StartGame => self.start_game(),
            RoomOp::CloseSetting { .. } => self.close_setting(),
            RoomOp::CloseStart { .. } => self.close_start(),
            RoomOp::AutoProgress => self.auto_progress(),
            RoomOp::DrawAtStart {
                player,
                white,
                black,
            } => self.draw_at_start(player, white, black),
            RoomOp::DrawAtDraw { player, color } => self.draw_at_draw(player, color),
            RoomOp::CloseDraw { .. } => self.close_draw(),
            RoomOp::PlaceJoker {
                player,
                color,
                index,
            } => self.place_joker(player, color, index),
            RoomOp::CloseSort { .. } => self.close_sort(),
            RoomOp::Guess {
                guesser,
                target,
                index,
                number,
            } => self.guess(guesser, target, index, number),
            RoomOp::CloseRepeat {
                continue_guessing, ..
            } => self.close_repeat(continue_guessing),
            RoomOp::CloseEnd { .. } => self.close_end(),
            RoomOp::CloseGameover { .. } => self.close_gameover(),
        }
    }

    fn check_guards(&self, op: RoomOp) -> Result<(), EngineError> {
        if !op.allowed_phases().contains(&self.phase) {
            return Err(EngineError::PhaseMismatch {
                op: op.name(),
                actual: self.phase,
            });
        }
        if let Some(turn) = op.turn_token() {
            let expected = self.turn_pointer as u8 + 1;
            if turn != expected {
                return Err(EngineError::TurnMismatch {
                    expected,
                    got: turn,
                });
            }
        }
        if let Some(player) = op.acting_player() {
            self.seat(player)?;
            if self.current_id() != Some(player) {
                return Err(EngineError::NotCurrent(player));
            }
        }
        Ok(())
    }

    // -- effects ----------------------------------------------------------

    fn start_game(&mut self) -> Result<Events, EngineError> {
        let seated = self.participants.len();
        if seated < self.config.min_players {
            return Err(EngineError::NotEnoughParticipants {
                seated,
                min: self.config.min_players,
            });
        }
        if !self.participants.iter().all(Participant::is_ready) {
            return Err(EngineError::NotAllReady);
        }

        self.pools.reset();
        self.turn_pointer = 0;
        let mut order: Vec<PlayerId> = self.participants.iter().map(Participant::id).collect();
        self.rng.shuffle(&mut order);
        self.turn_order = order;

        let order = self.turn_order.clone();
        for (position, id) in order.iter().enumerate() {
            let seat = self.seat_mut(*id)?;
            seat.reset_game_state();
            seat.set_turn_order(position as u8 + 1);
        }

        self.phase = Phase::Setting;
        tracing::info!(
            room_id = %self.id,
            players = seated,
            seed = self.rng.seed(),
            "game started"
        );
        Ok(vec![(
            Recipient::All,
            RoomEvent::GameStarted {
                turn_order: self.turn_order.clone(),
            },
        )])
    }

    fn close_setting(&mut self) -> Result<Events, EngineError> {
        self.clear_ready_flags();
        self.phase = Phase::Start;
        Ok(vec![(
            Recipient::All,
            RoomEvent::PhaseClosed {
                phase: Phase::Setting,
                next: Phase::Start,
            },
        )])
    }

    /// START: the last ready seat's close arms the jokers and opens the
    /// first DRAW turn; any earlier close just passes the pointer on.
    fn close_start(&mut self) -> Result<Events, EngineError> {
        if self.participants.iter().all(Participant::is_ready) {
            self.clear_ready_flags();
            self.pools.add_jokers();
            self.turn_pointer = 0;
            self.phase = Phase::Draw;
            let first = self.require_current("closeStart")?;
            tracing::info!(room_id = %self.id, "all starting hands dealt, jokers in play");
            Ok(vec![
                (
                    Recipient::All,
                    RoomEvent::PhaseClosed {
                        phase: Phase::Start,
                        next: Phase::Draw,
                    },
                ),
                (
                    Recipient::All,
                    RoomEvent::TurnAdvanced {
                        turn_pointer: 0,
                        player_id: first,
                    },
                ),
            ])
        } else {
            let next = self
                .advance_turn()
                .ok_or(EngineError::PhaseMismatch {
                    op: "closeStart",
                    actual: self.phase,
                })?;
            Ok(vec![(
                Recipient::All,
                RoomEvent::TurnAdvanced {
                    turn_pointer: self.turn_pointer,
                    player_id: next,
                },
            )])
        }
    }

    /// The idempotent grant: deals the current seat its due tiles and
    /// marks it ready. A second call finds the seat ready and changes
    /// nothing; that re-check under exclusive access is what collapses
    /// N duplicate requests into one effect.
    fn auto_progress(&mut self) -> Result<Events, EngineError> {
        let current = self.require_current("autoProgress")?;
        if self.seat(current)?.is_ready() {
            return Err(EngineError::AlreadyReady);
        }

        match self.phase {
            Phase::Start => {
                let need = starting_hand_size(self.participants.len());
                if self.pools.remaining() < usize::from(need) {
                    return Err(EngineError::PoolsExhausted);
                }
                let mut tiles = Vec::with_capacity(usize::from(need));
                let mut white = 0u8;
                let mut black = 0u8;
                for _ in 0..need {
                    let want = if self.rng.flip() {
                        TileColor::White
                    } else {
                        TileColor::Black
                    };
                    let tile = self.pools.draw_random(want, &mut self.rng)?;
                    match tile.color() {
                        TileColor::White => white += 1,
                        TileColor::Black => black += 1,
                    }
                    tiles.push(tile);
                }
                Ok(self.grant_starting_hand(current, tiles, white, black))
            }
            Phase::Draw => {
                let want = if self.rng.flip() {
                    TileColor::White
                } else {
                    TileColor::Black
                };
                let tile = self.pools.draw_random(want, &mut self.rng)?;
                Ok(self.grant_drawn_tile(current, tile))
            }
            other => Err(EngineError::PhaseMismatch {
                op: "autoProgress",
                actual: other,
            }),
        }
    }

    /// Caller-chosen split of the starting hand. The split must sum to
    /// the exact hand size; a bad split is rejected without drawing
    /// anything (the service layer follows up with the random grant).
    fn draw_at_start(
        &mut self,
        player: PlayerId,
        white: u8,
        black: u8,
    ) -> Result<Events, EngineError> {
        if self.seat(player)?.is_ready() {
            return Err(EngineError::AlreadyReady);
        }
        let need = starting_hand_size(self.participants.len());
        if u16::from(white) + u16::from(black) != u16::from(need) {
            return Err(EngineError::InvalidTileCount {
                white,
                black,
                expected: need,
            });
        }
        if self.pools.remaining() < usize::from(need) {
            return Err(EngineError::PoolsExhausted);
        }

        let mut tiles = Vec::with_capacity(usize::from(need));
        let mut got_white = 0u8;
        let mut got_black = 0u8;
        for _ in 0..white {
            let tile = self.pools.draw_random(TileColor::White, &mut self.rng)?;
            match tile.color() {
                TileColor::White => got_white += 1,
                TileColor::Black => got_black += 1,
            }
            tiles.push(tile);
        }
        for _ in 0..black {
            let tile = self.pools.draw_random(TileColor::Black, &mut self.rng)?;
            match tile.color() {
                TileColor::White => got_white += 1,
                TileColor::Black => got_black += 1,
            }
            tiles.push(tile);
        }
        Ok(self.grant_starting_hand(player, tiles, got_white, got_black))
    }

    fn draw_at_draw(&mut self, player: PlayerId, color: TileColor) -> Result<Events, EngineError> {
        if self.seat(player)?.is_ready() {
            return Err(EngineError::AlreadyReady);
        }
        let tile = self.pools.draw_random(color, &mut self.rng)?;
        Ok(self.grant_drawn_tile(player, tile))
    }

    fn close_draw(&mut self) -> Result<Events, EngineError> {
        self.clear_ready_flags();
        self.phase = Phase::Sort;
        Ok(vec![(
            Recipient::All,
            RoomEvent::PhaseClosed {
                phase: Phase::Draw,
                next: Phase::Sort,
            },
        )])
    }

    fn place_joker(
        &mut self,
        player: PlayerId,
        color: TileColor,
        index: usize,
    ) -> Result<Events, EngineError> {
        let landed = self.seat_mut(player)?.place_joker(color, index)?;
        tracing::debug!(
            room_id = %self.id,
            player_id = %player,
            %color,
            index = landed,
            "joker placed"
        );
        Ok(vec![(
            Recipient::All,
            RoomEvent::JokerPlaced {
                player_id: player,
                color,
                index: landed,
            },
        )])
    }

    fn close_sort(&mut self) -> Result<Events, EngineError> {
        self.clear_ready_flags();
        self.phase = Phase::Guess;
        Ok(vec![(
            Recipient::All,
            RoomEvent::PhaseClosed {
                phase: Phase::Sort,
                next: Phase::Guess,
            },
        )])
    }

    /// Resolves a guess and closes GUESS.
    ///
    /// A match opens the named tile, can retire the target, and earns
    /// the guesser a REPEAT. A miss force-opens the guesser's own
    /// freshly drawn tile and passes play to END. Either way, if only
    /// one seat is left unretired the game is over instead.
    fn guess(
        &mut self,
        guesser: PlayerId,
        target: PlayerId,
        index: usize,
        number: u8,
    ) -> Result<Events, EngineError> {
        if guesser == target {
            return Err(EngineError::SelfGuess(guesser));
        }
        let target_seat = self.seat(target)?;
        if target_seat.is_retired() {
            return Err(EngineError::TargetRetired(target));
        }
        let hand_size = target_seat.hand().len();
        let tile = *target_seat
            .hand()
            .get(index)
            .ok_or(EngineError::IndexOutOfRange { index, hand_size })?;
        if tile.is_visible() {
            return Err(EngineError::TileAlreadyVisible { index });
        }

        let matched = tile.number() == number;
        let mut events: Events = vec![(
            Recipient::All,
            RoomEvent::GuessResolved {
                guesser,
                target,
                index,
                number,
                matched,
            },
        )];

        if matched {
            let seat = self.seat_mut(target)?;
            let revealed = seat.reveal_at(index)?;
            events.push((
                Recipient::All,
                RoomEvent::TileRevealed {
                    owner: target,
                    index,
                    tile: revealed.owner_code(),
                },
            ));
            if seat.all_visible() {
                seat.mark_retired();
                events.push((
                    Recipient::All,
                    RoomEvent::ParticipantRetired { player_id: target },
                ));
                tracing::info!(room_id = %self.id, player_id = %target, "participant retired");
            }
            self.seat_mut(guesser)?.set_ready(true);
        } else if let Some(drawn) = self.seat(guesser)?.last_drawn_index() {
            // The price of a miss: the guesser's own drawn tile goes
            // face up. It can retire the guesser just like a guessed-out
            // hand does.
            let seat = self.seat_mut(guesser)?;
            let revealed = seat.reveal_at(drawn)?;
            events.push((
                Recipient::All,
                RoomEvent::TileRevealed {
                    owner: guesser,
                    index: drawn,
                    tile: revealed.owner_code(),
                },
            ));
            if seat.all_visible() {
                seat.mark_retired();
                events.push((
                    Recipient::All,
                    RoomEvent::ParticipantRetired { player_id: guesser },
                ));
                tracing::info!(room_id = %self.id, player_id = %guesser, "participant retired");
            }
        }

        let mut live = self
            .participants
            .iter()
            .filter(|p| !p.is_retired())
            .map(Participant::id);
        let (first_live, second_live) = (live.next(), live.next());
        let next = match (first_live, second_live) {
            (Some(winner), None) => {
                events.push((
                    Recipient::All,
                    RoomEvent::PhaseClosed {
                        phase: Phase::Guess,
                        next: Phase::Gameover,
                    },
                ));
                events.push((Recipient::All, RoomEvent::GameOver { winner }));
                tracing::info!(room_id = %self.id, winner = %winner, "game over");
                Phase::Gameover
            }
            _ => {
                let next = if matched { Phase::Repeat } else { Phase::End };
                events.push((
                    Recipient::All,
                    RoomEvent::PhaseClosed {
                        phase: Phase::Guess,
                        next,
                    },
                ));
                next
            }
        };
        self.phase = next;
        Ok(events)
    }

    fn close_repeat(&mut self, continue_guessing: bool) -> Result<Events, EngineError> {
        let next = if continue_guessing {
            Phase::Guess
        } else {
            Phase::End
        };
        self.phase = next;
        Ok(vec![(
            Recipient::All,
            RoomEvent::PhaseClosed {
                phase: Phase::Repeat,
                next,
            },
        )])
    }

    fn close_end(&mut self) -> Result<Events, EngineError> {
        let next_player = self.advance_turn().ok_or(EngineError::PhaseMismatch {
            op: "closeEnd",
            actual: self.phase,
        })?;
        self.phase = Phase::Draw;
        Ok(vec![
            (
                Recipient::All,
                RoomEvent::PhaseClosed {
                    phase: Phase::End,
                    next: Phase::Draw,
                },
            ),
            (
                Recipient::All,
                RoomEvent::TurnAdvanced {
                    turn_pointer: self.turn_pointer,
                    player_id: next_player,
                },
            ),
        ])
    }

    /// GAMEOVER back to the lobby: seats flagged by a mid-game
    /// disconnect are evicted, everything else is wiped for the next
    /// game. The caller deletes the room if this empties it.
    fn close_gameover(&mut self) -> Result<Events, EngineError> {
        let mut events: Events = Vec::new();
        self.participants.retain(|seat| {
            if seat.is_connected() {
                true
            } else {
                events.push((
                    Recipient::All,
                    RoomEvent::ParticipantLeft { player_id: seat.id() },
                ));
                false
            }
        });
        for seat in &mut self.participants {
            seat.reset_game_state();
            seat.set_ready(false);
            seat.clear_turn_order();
        }
        self.pools.reset();
        self.turn_order.clear();
        self.turn_pointer = 0;
        self.phase = Phase::Wait;
        events.push((Recipient::All, RoomEvent::RoomReset));
        tracing::info!(
            room_id = %self.id,
            seats = self.participants.len(),
            "room reset to lobby"
        );
        Ok(events)
    }

    // -- helpers ----------------------------------------------------------

    fn grant_starting_hand(
        &mut self,
        player: PlayerId,
        tiles: Vec<Tile>,
        white: u8,
        black: u8,
    ) -> Events {
        let granted: Vec<_> = tiles.iter().map(Tile::owner_code).collect();
        if let Some(seat) = self.participants.iter_mut().find(|p| p.id() == player) {
            seat.deal_tiles(tiles);
            seat.set_ready(true);
        }
        tracing::debug!(
            room_id = %self.id,
            player_id = %player,
            white,
            black,
            "starting hand dealt"
        );
        vec![
            (
                Recipient::All,
                RoomEvent::TilesDealt {
                    player_id: player,
                    white,
                    black,
                },
            ),
            (
                Recipient::Player(player),
                RoomEvent::TilesGranted {
                    player_id: player,
                    tiles: granted,
                },
            ),
        ]
    }

    fn grant_drawn_tile(&mut self, player: PlayerId, tile: Tile) -> Events {
        let color = tile.color();
        let code = tile.owner_code();
        let mut hand_index = 0;
        if let Some(seat) = self.participants.iter_mut().find(|p| p.id() == player) {
            hand_index = seat.draw_tile(tile);
            seat.set_ready(true);
        }
        tracing::debug!(
            room_id = %self.id,
            player_id = %player,
            %color,
            hand_index,
            "tile drawn"
        );
        vec![
            (
                Recipient::All,
                RoomEvent::TileDrawn {
                    player_id: player,
                    color,
                    hand_index,
                },
            ),
            (
                Recipient::Player(player),
                RoomEvent::TilesGranted {
                    player_id: player,
                    tiles: vec![code],
                },
            ),
        ]
    }

    fn clear_ready_flags(&mut self) {
        for seat in &mut self.participants {
            seat.set_ready(false);
        }
    }

    /// Moves the pointer to the next live seat, skipping retired and
    /// disconnected ones. Returns `None` when no live seat exists.
    fn advance_turn(&mut self) -> Option<PlayerId> {
        let seats = self.turn_order.len();
        for step in 1..=seats {
            let candidate = (self.turn_pointer + step) % seats;
            let id = self.turn_order[candidate];
            let live = self
                .participants
                .iter()
                .find(|p| p.id() == id)
                .is_some_and(|p| !p.is_retired() && p.is_connected());
            if live {
                self.turn_pointer = candidate;
                return Some(id);
            }
        }
        None
    }

    fn require_current(&self, op: &'static str) -> Result<PlayerId, EngineError> {
        self.current_id().ok_or(EngineError::PhaseMismatch {
            op,
            actual: self.phase,
        })
    }

    fn seat(&self, player: PlayerId) -> Result<&Participant, EngineError> {
        self.participants
            .iter()
            .find(|p| p.id() == player)
            .ok_or(EngineError::UnknownParticipant(player))
    }

    fn seat_mut(&mut self, player: PlayerId) -> Result<&mut Participant, EngineError> {
        self.participants
            .iter_mut()
            .find(|p| p.id() == player)
            .ok_or(EngineError::UnknownParticipant(player))
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    fn ids(n: usize) -> Vec<PlayerId> {
        (1..=n as u64).map(PlayerId).collect()
    }

    fn lobby(n: usize) -> Room {
        let config = RoomConfig {
            seed: Some(7),
            ..RoomConfig::default()
        };
        let mut room = Room::new(RoomId(1), config);
        for id in ids(n) {
            room.join(id).unwrap();
            room.set_ready(id, true).unwrap();
        }
        room
    }

    /// A room walked to START (game started, SETTING closed).
    fn in_start(n: usize) -> Room {
        let mut room = lobby(n);
        room.apply(RoomOp::StartGame).unwrap();
        room.apply(RoomOp::CloseSetting { turn: 1 }).unwrap();
        assert_eq!(room.phase(), Phase::Start);
        room
    }

    /// A room walked to DRAW: every seat auto-dealt, START closed out.
    fn in_draw(n: usize) -> Room {
        let mut room = in_start(n);
        for _ in 0..n {
            room.apply(RoomOp::AutoProgress).unwrap();
            let turn = room.turn_pointer() as u8 + 1;
            room.apply(RoomOp::CloseStart { turn }).unwrap();
        }
        assert_eq!(room.phase(), Phase::Draw);
        room
    }

    /// Two seats with rigged hands, parked in GUESS with seat 0 current.
    fn rigged_guess(guesser_hand: Vec<Tile>, target_hand: Vec<Tile>) -> (Room, PlayerId, PlayerId) {
        let mut room = lobby(2);
        room.apply(RoomOp::StartGame).unwrap();
        let guesser = room.turn_order[0];
        let target = room.turn_order[1];
        room.seat_mut(guesser).unwrap().set_hand(guesser_hand);
        room.seat_mut(target).unwrap().set_hand(target_hand);
        room.phase = Phase::Guess;
        (room, guesser, target)
    }

    fn white(n: u8) -> Tile {
        Tile::new(TileColor::White, n)
    }

    fn black(n: u8) -> Tile {
        Tile::new(TileColor::Black, n)
    }

    fn hand_sizes(room: &Room) -> usize {
        room.participants.iter().map(|p| p.hand().len()).sum()
    }

    // =====================================================================
    // Lobby
    // =====================================================================

    #[test]
    fn test_join_fills_seats_until_full() {
        let mut room = Room::new(RoomId(1), RoomConfig::default());
        for id in ids(4) {
            room.join(id).unwrap();
        }
        assert!(matches!(
            room.join(PlayerId(5)),
            Err(EngineError::RoomFull { max: 4 })
        ));
        assert_eq!(room.participant_count(), 4);
    }

    #[test]
    fn test_join_twice_is_rejected() {
        let mut room = Room::new(RoomId(1), RoomConfig::default());
        room.join(PlayerId(1)).unwrap();
        assert!(matches!(
            room.join(PlayerId(1)),
            Err(EngineError::AlreadySeated(PlayerId(1)))
        ));
    }

    #[test]
    fn test_set_ready_requires_a_seat() {
        let mut room = Room::new(RoomId(1), RoomConfig::default());
        assert!(matches!(
            room.set_ready(PlayerId(9), true),
            Err(EngineError::UnknownParticipant(PlayerId(9)))
        ));
    }

    #[test]
    fn test_start_game_needs_enough_ready_seats() {
        let mut room = Room::new(RoomId(1), RoomConfig::default());
        room.join(PlayerId(1)).unwrap();
        room.set_ready(PlayerId(1), true).unwrap();
        assert!(matches!(
            room.apply(RoomOp::StartGame),
            Err(EngineError::NotEnoughParticipants { seated: 1, min: 2 })
        ));

        room.join(PlayerId(2)).unwrap();
        assert!(matches!(
            room.apply(RoomOp::StartGame),
            Err(EngineError::NotAllReady)
        ));

        room.set_ready(PlayerId(2), true).unwrap();
        room.apply(RoomOp::StartGame).unwrap();
        assert_eq!(room.phase(), Phase::Setting);
    }

    #[test]
    fn test_start_game_assigns_a_turn_permutation() {
        let room = {
            let mut room = lobby(4);
            room.apply(RoomOp::StartGame).unwrap();
            room
        };
        let mut orders: Vec<u8> = room
            .participants
            .iter()
            .map(|p| p.turn_order().unwrap())
            .collect();
        orders.sort_unstable();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(room.current_id(), Some(room.turn_order[0]));
    }

    #[test]
    fn test_join_mid_game_is_out_of_phase() {
        let mut room = in_start(2);
        assert!(matches!(
            room.join(PlayerId(9)),
            Err(EngineError::PhaseMismatch { op: "joinRoom", .. })
        ));
        assert!(matches!(
            room.set_ready(PlayerId(1), true),
            Err(EngineError::PhaseMismatch { op: "setReady", .. })
        ));
    }

    // =====================================================================
    // Synchronization guards
    // =====================================================================

    #[test]
    fn test_close_succeeds_once_then_reports_stale() {
        let mut room = lobby(2);
        room.apply(RoomOp::StartGame).unwrap();
        room.apply(RoomOp::CloseSetting { turn: 1 }).unwrap();
        assert_eq!(room.phase(), Phase::Start);

        // The duplicate arrives after the edge already closed.
        assert!(matches!(
            room.apply(RoomOp::CloseSetting { turn: 1 }),
            Err(EngineError::PhaseMismatch {
                op: "closeSetting",
                actual: Phase::Start,
            })
        ));
        assert_eq!(room.phase(), Phase::Start);
    }

    #[test]
    fn test_wrong_turn_token_changes_nothing() {
        let mut room = in_start(2);
        let before = room.snapshot(None);
        assert!(matches!(
            room.apply(RoomOp::CloseStart { turn: 2 }),
            Err(EngineError::TurnMismatch {
                expected: 1,
                got: 2
            })
        ));
        assert_eq!(room.snapshot(None), before);
    }

    #[test]
    fn test_second_start_game_is_out_of_phase() {
        let mut room = lobby(2);
        room.apply(RoomOp::StartGame).unwrap();
        assert!(matches!(
            room.apply(RoomOp::StartGame),
            Err(EngineError::PhaseMismatch { op: "startGame", .. })
        ));
    }

    #[test]
    fn test_auto_progress_grants_exactly_once() {
        let mut room = in_start(2);
        let current = room.current_id().unwrap();
        room.apply(RoomOp::AutoProgress).unwrap();
        let dealt = room.seat(current).unwrap().hand().len();
        assert_eq!(dealt, 4);
        assert!(room.seat(current).unwrap().is_ready());

        // Duplicates bounce off the ready flag without drawing.
        for _ in 0..3 {
            assert!(matches!(
                room.apply(RoomOp::AutoProgress),
                Err(EngineError::AlreadyReady)
            ));
        }
        assert_eq!(room.seat(current).unwrap().hand().len(), 4);
        assert_eq!(room.pools.remaining(), 20);
    }

    // =====================================================================
    // Tile economy
    // =====================================================================

    #[test]
    fn test_tile_conservation_through_start() {
        let mut room = lobby(3);
        room.apply(RoomOp::StartGame).unwrap();
        assert_eq!(room.pools.remaining() + hand_sizes(&room), 24);

        room.apply(RoomOp::CloseSetting { turn: 1 }).unwrap();
        for _ in 0..3 {
            room.apply(RoomOp::AutoProgress).unwrap();
            assert_eq!(room.pools.remaining() + hand_sizes(&room), 24);
            let turn = room.turn_pointer() as u8 + 1;
            room.apply(RoomOp::CloseStart { turn }).unwrap();
        }

        // Jokers entered at the START to DRAW edge.
        assert_eq!(room.phase(), Phase::Draw);
        assert_eq!(room.pools.remaining() + hand_sizes(&room), 26);
    }

    #[test]
    fn test_starting_hand_is_three_at_a_full_table() {
        let mut room = in_start(4);
        let current = room.current_id().unwrap();
        room.apply(RoomOp::AutoProgress).unwrap();
        assert_eq!(room.seat(current).unwrap().hand().len(), 3);
    }

    #[test]
    fn test_draw_at_start_honors_the_split() {
        let mut room = in_start(2);
        let current = room.current_id().unwrap();
        let events = room
            .apply(RoomOp::DrawAtStart {
                player: current,
                white: 3,
                black: 1,
            })
            .unwrap();

        let seat = room.seat(current).unwrap();
        assert_eq!(seat.hand().len(), 4);
        assert!(seat.is_ready());
        let whites = seat
            .hand()
            .iter()
            .filter(|t| t.color() == TileColor::White)
            .count();
        assert_eq!(whites, 3);

        // Everyone sees the split; only the owner sees the numbers.
        assert!(events.iter().any(|(r, e)| *r == Recipient::All
            && matches!(
                e,
                RoomEvent::TilesDealt {
                    white: 3,
                    black: 1,
                    ..
                }
            )));
        assert!(events.iter().any(|(r, e)| *r == Recipient::Player(current)
            && matches!(e, RoomEvent::TilesGranted { tiles, .. } if tiles.len() == 4)));
    }

    #[test]
    fn test_draw_at_start_rejects_bad_split_without_drawing() {
        let mut room = in_start(2);
        let current = room.current_id().unwrap();
        assert!(matches!(
            room.apply(RoomOp::DrawAtStart {
                player: current,
                white: 3,
                black: 2,
            }),
            Err(EngineError::InvalidTileCount {
                white: 3,
                black: 2,
                expected: 4
            })
        ));
        assert_eq!(room.seat(current).unwrap().hand().len(), 0);
        assert!(!room.seat(current).unwrap().is_ready());
        assert_eq!(room.pools.remaining(), 24);
    }

    #[test]
    fn test_draw_at_start_rejected_for_bystanders() {
        let mut room = in_start(2);
        let current = room.current_id().unwrap();
        let other = ids(2).into_iter().find(|id| *id != current).unwrap();
        assert!(matches!(
            room.apply(RoomOp::DrawAtStart {
                player: other,
                white: 2,
                black: 2,
            }),
            Err(EngineError::NotCurrent(p)) if p == other
        ));
    }

    #[test]
    fn test_draw_at_draw_takes_the_requested_color() {
        let mut room = in_draw(2);
        let current = room.current_id().unwrap();
        let before = room.seat(current).unwrap().hand().len();
        let events = room
            .apply(RoomOp::DrawAtDraw {
                player: current,
                color: TileColor::Black,
            })
            .unwrap();

        assert_eq!(room.seat(current).unwrap().hand().len(), before + 1);
        assert!(room.seat(current).unwrap().last_drawn_index().is_some());
        // Both pools still held tiles, so no fallback could kick in.
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::TileDrawn {
                color: TileColor::Black,
                ..
            }
        )));
    }

    // =====================================================================
    // Sort phase
    // =====================================================================

    #[test]
    fn test_place_joker_emits_the_landing_index() {
        let mut room = lobby(2);
        room.apply(RoomOp::StartGame).unwrap();
        let current = room.turn_order[0];
        room.seat_mut(current).unwrap().set_hand(vec![
            white(2),
            white(5),
            Tile::new(TileColor::White, 12),
            black(3),
        ]);
        room.phase = Phase::Sort;

        let events = room
            .apply(RoomOp::PlaceJoker {
                player: current,
                color: TileColor::White,
                index: 0,
            })
            .unwrap();
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::JokerPlaced {
                index: 0,
                color: TileColor::White,
                ..
            }
        )));
        assert!(room.seat(current).unwrap().hand()[0].is_joker());
    }

    #[test]
    fn test_place_joker_range_error_leaves_hand_alone() {
        let mut room = lobby(2);
        room.apply(RoomOp::StartGame).unwrap();
        let current = room.turn_order[0];
        room.seat_mut(current)
            .unwrap()
            .set_hand(vec![white(2), black(3)]);
        room.phase = Phase::Sort;

        assert!(matches!(
            room.apply(RoomOp::PlaceJoker {
                player: current,
                color: TileColor::White,
                index: 1,
            }),
            Err(EngineError::NoJoker {
                color: TileColor::White
            })
        ));
        assert!(!room.seat(current).unwrap().hand()[1].is_joker());
    }

    // =====================================================================
    // Guess resolution
    // =====================================================================

    #[test]
    fn test_guess_match_reveals_and_earns_a_repeat() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(0), black(1)]);

        let events = room
            .apply(RoomOp::Guess {
                guesser,
                target,
                index: 0,
                number: 0,
            })
            .unwrap();

        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::GuessResolved { matched: true, .. }
        )));
        assert!(room.seat(target).unwrap().hand()[0].is_visible());
        assert!(!room.seat(target).unwrap().hand()[1].is_visible());
        assert!(room.seat(guesser).unwrap().is_ready());
        assert!(!room.seat(target).unwrap().is_retired());
        assert_eq!(room.phase(), Phase::Repeat);
    }

    #[test]
    fn test_guess_miss_opens_the_drawn_tile_and_ends_the_turn() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(0), black(9)]);
        room.seat_mut(guesser).unwrap().set_last_drawn(Some(0));

        let events = room
            .apply(RoomOp::Guess {
                guesser,
                target,
                index: 0,
                number: 5,
            })
            .unwrap();

        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::GuessResolved { matched: false, .. }
        )));
        // Target untouched; the guesser pays with their own drawn tile.
        assert!(!room.seat(target).unwrap().hand()[0].is_visible());
        assert!(room.seat(guesser).unwrap().hand()[0].is_visible());
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::TileRevealed { owner, index: 0, .. } if *owner == guesser
        )));
        assert_eq!(room.phase(), Phase::End);
    }

    #[test]
    fn test_guess_miss_without_a_drawn_tile_reveals_nothing() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(0), black(9)]);

        room.apply(RoomOp::Guess {
            guesser,
            target,
            index: 0,
            number: 5,
        })
        .unwrap();

        assert!(room.seat(guesser).unwrap().hand().iter().all(|t| !t.is_visible()));
        assert_eq!(room.phase(), Phase::End);
    }

    #[test]
    fn test_last_tile_match_retires_and_ends_the_game() {
        let (mut room, guesser, target) = rigged_guess(vec![white(5), white(7)], vec![black(0)]);

        let events = room
            .apply(RoomOp::Guess {
                guesser,
                target,
                index: 0,
                number: 0,
            })
            .unwrap();

        assert!(room.seat(target).unwrap().is_retired());
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::GameOver { winner } if *winner == guesser
        )));
        // GAMEOVER overrides the REPEAT a match would otherwise earn.
        assert_eq!(room.phase(), Phase::Gameover);
    }

    #[test]
    fn test_miss_penalty_can_retire_the_guesser() {
        let (mut room, guesser, target) = rigged_guess(vec![white(5)], vec![black(0), black(9)]);
        room.seat_mut(guesser).unwrap().set_last_drawn(Some(0));

        let events = room
            .apply(RoomOp::Guess {
                guesser,
                target,
                index: 0,
                number: 3,
            })
            .unwrap();

        assert!(room.seat(guesser).unwrap().is_retired());
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::GameOver { winner } if *winner == target
        )));
        assert_eq!(room.phase(), Phase::Gameover);
    }

    #[test]
    fn test_guess_rejects_degenerate_targets() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(0), black(9)]);

        assert!(matches!(
            room.apply(RoomOp::Guess {
                guesser,
                target: guesser,
                index: 0,
                number: 0,
            }),
            Err(EngineError::SelfGuess(p)) if p == guesser
        ));
        assert!(matches!(
            room.apply(RoomOp::Guess {
                guesser,
                target,
                index: 7,
                number: 0,
            }),
            Err(EngineError::IndexOutOfRange {
                index: 7,
                hand_size: 2
            })
        ));

        room.seat_mut(target).unwrap().reveal_at(0).unwrap();
        assert!(matches!(
            room.apply(RoomOp::Guess {
                guesser,
                target,
                index: 0,
                number: 0,
            }),
            Err(EngineError::TileAlreadyVisible { index: 0 })
        ));

        room.seat_mut(target).unwrap().mark_retired();
        assert!(matches!(
            room.apply(RoomOp::Guess {
                guesser,
                target,
                index: 1,
                number: 9,
            }),
            Err(EngineError::TargetRetired(p)) if p == target
        ));
        assert_eq!(room.phase(), Phase::Guess);
    }

    #[test]
    fn test_repeat_continue_reopens_guess() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(0), black(1)]);
        room.apply(RoomOp::Guess {
            guesser,
            target,
            index: 0,
            number: 0,
        })
        .unwrap();
        assert_eq!(room.phase(), Phase::Repeat);

        room.apply(RoomOp::CloseRepeat {
            turn: 1,
            continue_guessing: true,
        })
        .unwrap();
        assert_eq!(room.phase(), Phase::Guess);

        room.apply(RoomOp::Guess {
            guesser,
            target,
            index: 1,
            number: 4,
        })
        .unwrap();
        assert_eq!(room.phase(), Phase::End);
    }

    #[test]
    fn test_close_end_passes_the_turn_into_draw() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(0), black(1)]);
        room.apply(RoomOp::Guess {
            guesser,
            target,
            index: 0,
            number: 4,
        })
        .unwrap();
        assert_eq!(room.phase(), Phase::End);

        let events = room.apply(RoomOp::CloseEnd { turn: 1 }).unwrap();
        assert_eq!(room.phase(), Phase::Draw);
        assert_eq!(room.current_id(), Some(target));
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::TurnAdvanced { turn_pointer: 1, player_id } if *player_id == target
        )));
    }

    // =====================================================================
    // Full flow
    // =====================================================================

    #[test]
    fn test_perfect_guesser_sweeps_to_gameover() {
        let mut room = in_draw(2);
        let guesser = room.current_id().unwrap();
        let target = room
            .turn_order
            .iter()
            .copied()
            .find(|id| *id != guesser)
            .unwrap();

        room.apply(RoomOp::DrawAtDraw {
            player: guesser,
            color: TileColor::White,
        })
        .unwrap();
        let turn = room.turn_pointer() as u8 + 1;
        room.apply(RoomOp::CloseDraw { turn }).unwrap();
        room.apply(RoomOp::CloseSort { turn }).unwrap();

        // Guess the target out tile by tile with perfect information.
        loop {
            let victim = room.seat(target).unwrap();
            let Some((index, number)) = victim
                .hand()
                .iter()
                .enumerate()
                .find(|(_, t)| !t.is_visible())
                .map(|(i, t)| (i, t.number()))
            else {
                break;
            };
            room.apply(RoomOp::Guess {
                guesser,
                target,
                index,
                number,
            })
            .unwrap();
            if room.phase() == Phase::Gameover {
                break;
            }
            assert_eq!(room.phase(), Phase::Repeat);
            room.apply(RoomOp::CloseRepeat {
                turn,
                continue_guessing: true,
            })
            .unwrap();
        }

        assert_eq!(room.phase(), Phase::Gameover);
        assert!(room.seat(target).unwrap().is_retired());

        room.apply(RoomOp::CloseGameover { turn }).unwrap();
        assert_eq!(room.phase(), Phase::Wait);
        assert_eq!(room.participant_count(), 2);
        assert!(room.participants.iter().all(|p| p.hand().is_empty()));
        assert!(room.participants.iter().all(|p| !p.is_ready()));
        assert!(room.participants.iter().all(|p| p.turn_order().is_none()));
    }

    // =====================================================================
    // Disconnects
    // =====================================================================

    #[test]
    fn test_lobby_disconnect_removes_the_seat() {
        let mut room = lobby(2);
        let (outcome, events) = room.handle_disconnect(PlayerId(1)).unwrap();
        assert_eq!(
            outcome,
            DisconnectOutcome::RemovedFromLobby { room_empty: false }
        );
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::ParticipantLeft {
                player_id: PlayerId(1)
            }
        )));

        let (outcome, _) = room.handle_disconnect(PlayerId(2)).unwrap();
        assert_eq!(
            outcome,
            DisconnectOutcome::RemovedFromLobby { room_empty: true }
        );
        assert!(room.is_empty());
    }

    #[test]
    fn test_midgame_disconnect_flags_and_forces_guess() {
        let mut room = in_draw(3);
        let bystander = room.turn_order[2];
        let (outcome, events) = room.handle_disconnect(bystander).unwrap();

        assert_eq!(
            outcome,
            DisconnectOutcome::Flagged {
                room_abandoned: false
            }
        );
        assert_eq!(room.participant_count(), 3);
        assert!(!room.seat(bystander).unwrap().is_connected());
        assert_eq!(room.phase(), Phase::Guess);
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::ParticipantDisconnected { player_id } if *player_id == bystander
        )));
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::PhaseClosed {
                next: Phase::Guess,
                ..
            }
        )));
    }

    #[test]
    fn test_disconnect_of_current_seat_passes_the_turn() {
        let mut room = in_draw(2);
        let current = room.current_id().unwrap();
        let other = room
            .turn_order
            .iter()
            .copied()
            .find(|id| *id != current)
            .unwrap();

        let (_, events) = room.handle_disconnect(current).unwrap();
        assert_eq!(room.current_id(), Some(other));
        assert_eq!(room.phase(), Phase::Guess);
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::TurnAdvanced { player_id, .. } if *player_id == other
        )));
    }

    #[test]
    fn test_last_connected_seat_leaving_abandons_the_room() {
        let mut room = in_draw(2);
        room.handle_disconnect(room.turn_order[0]).unwrap();
        let (outcome, _) = room.handle_disconnect(room.turn_order[1]).unwrap();
        assert_eq!(
            outcome,
            DisconnectOutcome::Flagged {
                room_abandoned: true
            }
        );
    }

    #[test]
    fn test_gameover_reset_evicts_flagged_seats() {
        let (mut room, guesser, target) = rigged_guess(vec![white(5), white(7)], vec![black(0)]);
        room.apply(RoomOp::Guess {
            guesser,
            target,
            index: 0,
            number: 0,
        })
        .unwrap();
        assert_eq!(room.phase(), Phase::Gameover);

        // A disconnect during GAMEOVER only flags; the reset evicts.
        let (outcome, _) = room.handle_disconnect(target).unwrap();
        assert_eq!(
            outcome,
            DisconnectOutcome::Flagged {
                room_abandoned: false
            }
        );
        assert_eq!(room.phase(), Phase::Gameover);

        let events = room.apply(RoomOp::CloseGameover { turn: 1 }).unwrap();
        assert_eq!(room.phase(), Phase::Wait);
        assert_eq!(room.participant_count(), 1);
        assert!(room.seat(target).is_err());
        assert!(events.iter().any(|(_, e)| matches!(
            e,
            RoomEvent::ParticipantLeft { player_id } if *player_id == target
        )));
        assert!(events.iter().any(|(_, e)| matches!(e, RoomEvent::RoomReset)));
    }

    // =====================================================================
    // Snapshot
    // =====================================================================

    #[test]
    fn test_snapshot_masks_other_hands() {
        let (room, guesser, target) = rigged_guess(
            vec![white(5), Tile::new(TileColor::White, 12)],
            vec![black(0)],
        );

        let view = room.snapshot(Some(guesser));
        let own = view
            .participants
            .iter()
            .find(|p| p.player_id == guesser)
            .unwrap();
        let theirs = view
            .participants
            .iter()
            .find(|p| p.player_id == target)
            .unwrap();

        // Own tiles show true numbers; the joker reads as 12 either way.
        assert_eq!(own.hand[0].code, 5);
        assert_eq!(own.hand[1].code, 12);
        // The closed black 0 masks to the colored sentinel.
        assert_eq!(theirs.hand[0].code, -13);
    }

    #[test]
    fn test_snapshot_reveals_everything_at_gameover() {
        let (mut room, guesser, target) =
            rigged_guess(vec![white(5), white(7)], vec![black(3)]);
        room.apply(RoomOp::Guess {
            guesser,
            target,
            index: 0,
            number: 3,
        })
        .unwrap();
        assert_eq!(room.phase(), Phase::Gameover);

        let view = room.snapshot(None);
        let winner = view
            .participants
            .iter()
            .find(|p| p.player_id == guesser)
            .unwrap();
        assert_eq!(winner.hand[0].code, 5);
        assert_eq!(winner.hand[1].code, 7);
    }
}
