//! Room manager: creates, tracks, and routes participants to rooms.
//!
//! The manager owns one [`RoomHandle`] per live room plus the
//! participant-to-room index, and exposes the request surface the outer
//! layers call. Seat-keyed operations (ready, draws, joker, guess) are
//! routed through the index; room-keyed operations (closes, start,
//! auto-progress, snapshot) go straight to the handle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tilecode_engine::{DisconnectOutcome, RoomConfig, RoomOp};
use tilecode_protocol::{PlayerId, RoomId, RoomView, TileColor};

use crate::room::{ApplyReply, PlayerSender, RoomHandle, spawn_room};
use crate::RoomError;

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all active rooms and tracks which participant sits where.
///
/// A participant can be in at most one room at a time; that invariant
/// lives in `player_rooms` and is enforced at join.
pub struct RoomManager {
    rooms: HashMap<RoomId, RoomHandle>,
    player_rooms: HashMap<PlayerId, RoomId>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
        }
    }

    // -- lifecycle --------------------------------------------------------

    /// Creates a new room and returns its ID.
    pub fn create_room(&mut self, config: RoomConfig) -> RoomId {
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let handle = spawn_room(room_id, config, DEFAULT_CHANNEL_SIZE);
        self.rooms.insert(room_id, handle);
        tracing::info!(%room_id, "room created");
        room_id
    }

    /// Seats a participant in a room with their outbound channel.
    pub async fn join_room(
        &mut self,
        player_id: PlayerId,
        room_id: RoomId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if let Some(current) = self.player_rooms.get(&player_id) {
            return Err(RoomError::AlreadyInRoom(player_id, *current));
        }
        let handle = self.handle(room_id)?;
        handle.join(player_id, sender).await?;
        self.player_rooms.insert(player_id, room_id);
        Ok(())
    }

    /// Reports a dropped connection, updating the index and reaping the
    /// room when nobody is left behind.
    pub async fn disconnect(
        &mut self,
        player_id: PlayerId,
    ) -> Result<DisconnectOutcome, RoomError> {
        let room_id = self
            .player_rooms
            .get(&player_id)
            .copied()
            .ok_or(RoomError::NotInRoom(player_id))?;
        let handle = self.handle(room_id)?;
        let outcome = handle.disconnect(player_id).await?;
        self.player_rooms.remove(&player_id);

        match outcome {
            DisconnectOutcome::RemovedFromLobby { room_empty: true }
            | DisconnectOutcome::Flagged {
                room_abandoned: true,
            } => {
                self.destroy_room(room_id).await?;
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Shuts a room down and clears every index entry pointing at it.
    pub async fn destroy_room(&mut self, room_id: RoomId) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;
        let _ = handle.shutdown().await;
        self.player_rooms.retain(|_, rid| *rid != room_id);
        tracing::info!(%room_id, "room destroyed");
        Ok(())
    }

    // -- lobby ------------------------------------------------------------

    pub async fn set_ready(&self, player_id: PlayerId, ready: bool) -> Result<(), RoomError> {
        self.handle_for(player_id)?.set_ready(player_id, ready).await
    }

    pub async fn start_game(&self, room_id: RoomId) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::StartGame).await
    }

    // -- phase closes -----------------------------------------------------

    pub async fn close_setting(&self, room_id: RoomId, turn: u8) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::CloseSetting { turn }).await
    }

    pub async fn close_start(&self, room_id: RoomId, turn: u8) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::CloseStart { turn }).await
    }

    pub async fn close_draw(&self, room_id: RoomId, turn: u8) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::CloseDraw { turn }).await
    }

    pub async fn close_sort(&self, room_id: RoomId, turn: u8) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::CloseSort { turn }).await
    }

    pub async fn close_repeat(
        &self,
        room_id: RoomId,
        turn: u8,
        continue_guessing: bool,
    ) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(
            room_id,
            RoomOp::CloseRepeat {
                turn,
                continue_guessing,
            },
        )
        .await
    }

    pub async fn close_end(&self, room_id: RoomId, turn: u8) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::CloseEnd { turn }).await
    }

    pub async fn close_gameover(&self, room_id: RoomId, turn: u8) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::CloseGameover { turn }).await
    }

    // -- tile actions -----------------------------------------------------

    /// Fires the idempotent grant for whichever seat is current.
    pub async fn auto_progress(&self, room_id: RoomId) -> Result<ApplyReply, RoomError> {
        self.apply_to_room(room_id, RoomOp::AutoProgress).await
    }

    /// Caller-chosen starting split. On a bad split the room falls back
    /// to the random grant and this still returns the rejection.
    pub async fn draw_at_start(
        &self,
        player_id: PlayerId,
        white: u8,
        black: u8,
    ) -> Result<ApplyReply, RoomError> {
        self.apply_for_player(
            player_id,
            RoomOp::DrawAtStart {
                player: player_id,
                white,
                black,
            },
        )
        .await
    }

    pub async fn draw_at_draw(
        &self,
        player_id: PlayerId,
        color: TileColor,
    ) -> Result<ApplyReply, RoomError> {
        self.apply_for_player(
            player_id,
            RoomOp::DrawAtDraw {
                player: player_id,
                color,
            },
        )
        .await
    }

    pub async fn place_joker(
        &self,
        player_id: PlayerId,
        index: usize,
        color: TileColor,
    ) -> Result<ApplyReply, RoomError> {
        self.apply_for_player(
            player_id,
            RoomOp::PlaceJoker {
                player: player_id,
                color,
                index,
            },
        )
        .await
    }

    /// Resolves a guess; `true` means it matched.
    pub async fn guess(
        &self,
        guesser: PlayerId,
        target: PlayerId,
        index: usize,
        number: u8,
    ) -> Result<bool, RoomError> {
        let reply = self
            .apply_for_player(
                guesser,
                RoomOp::Guess {
                    guesser,
                    target,
                    index,
                    number,
                },
            )
            .await?;
        Ok(reply.matched.unwrap_or(false))
    }

    // -- queries ----------------------------------------------------------

    /// Takes a consistent snapshot of a room as seen by `viewer`.
    pub async fn snapshot(
        &self,
        room_id: RoomId,
        viewer: Option<PlayerId>,
    ) -> Result<RoomView, RoomError> {
        self.handle(room_id)?.snapshot(viewer).await
    }

    /// The room a participant currently sits in, if any.
    pub fn player_room(&self, player_id: &PlayerId) -> Option<RoomId> {
        self.player_rooms.get(player_id).copied()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }

    // -- routing ----------------------------------------------------------

    fn handle(&self, room_id: RoomId) -> Result<&RoomHandle, RoomError> {
        self.rooms.get(&room_id).ok_or(RoomError::NotFound(room_id))
    }

    fn handle_for(&self, player_id: PlayerId) -> Result<&RoomHandle, RoomError> {
        let room_id = self
            .player_rooms
            .get(&player_id)
            .ok_or(RoomError::NotInRoom(player_id))?;
        self.handle(*room_id)
    }

    async fn apply_to_room(&self, room_id: RoomId, op: RoomOp) -> Result<ApplyReply, RoomError> {
        self.handle(room_id)?.apply(op).await
    }

    async fn apply_for_player(
        &self,
        player_id: PlayerId,
        op: RoomOp,
    ) -> Result<ApplyReply, RoomError> {
        self.handle_for(player_id)?.apply(op).await
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
