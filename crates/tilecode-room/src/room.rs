//! Room actor: an isolated Tokio task that owns one [`Room`].
//!
//! Each room runs in its own task and talks to the rest of the process
//! through an mpsc command channel. That task is the per-room mutual
//! exclusion the engine's guards assume: commands are applied one at a
//! time, so duplicate requests racing each other arrive sequenced and
//! the idempotency re-check inside the engine sees settled state.

use std::collections::HashMap;

use tilecode_engine::{DisconnectOutcome, EngineError, Events, Room, RoomConfig, RoomOp};
use tilecode_protocol::{Phase, PlayerId, Recipient, RoomEvent, RoomId, RoomView};
use tokio::sync::{mpsc, oneshot};

use crate::RoomError;

/// An outbound message from a room actor to one seat's connection.
#[derive(Debug, Clone)]
pub enum RoomOutbound {
    /// Full per-viewer snapshot (sent on join and at game start).
    State(RoomView),
    /// One change notification.
    Event(RoomEvent),
}

/// Channel sender for delivering outbound messages to a seat.
pub type PlayerSender = mpsc::UnboundedSender<RoomOutbound>;

/// The caller-visible result of one applied op. Events travel to the
/// seats' channels; the reply only tells the caller where the room
/// ended up and, for a guess, whether it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReply {
    pub phase: Phase,
    pub matched: Option<bool>,
}

/// Commands sent to a room actor through its channel. Reply senders
/// close the loop back to the caller awaiting the outcome.
pub(crate) enum RoomCommand {
    Join {
        player_id: PlayerId,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    SetReady {
        player_id: PlayerId,
        ready: bool,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    Disconnect {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<DisconnectOutcome, RoomError>>,
    },

    Apply {
        op: RoomOp,
        reply: oneshot::Sender<Result<ApplyReply, RoomError>>,
    },

    Snapshot {
        viewer: Option<PlayerId>,
        reply: oneshot::Sender<RoomView>,
    },

    Shutdown,
}

/// Handle to a running room actor.
///
/// Cheap to clone; the `RoomManager` holds one per room. Every method
/// maps a dead or saturated channel to [`RoomError::Unavailable`].
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Seats a participant and registers their outbound channel.
    pub async fn join(
        &self,
        player_id: PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player_id,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Toggles a lobby ready flag.
    pub async fn set_ready(&self, player_id: PlayerId, ready: bool) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::SetReady {
                player_id,
                ready,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Reports a dropped connection and learns how the room absorbed it.
    pub async fn disconnect(&self, player_id: PlayerId) -> Result<DisconnectOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Disconnect {
                player_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Runs one in-game operation to completion.
    pub async fn apply(&self, op: RoomOp) -> Result<ApplyReply, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Apply {
                op,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Takes a consistent snapshot as seen by `viewer`.
    pub async fn snapshot(&self, viewer: Option<PlayerId>) -> Result<RoomView, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Snapshot {
                viewer,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room: Room,
    /// Per-seat outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    async fn run(mut self) {
        tracing::info!(
            room_id = %self.room.id(),
            seed = self.room.rng_seed(),
            "room actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player_id,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player_id, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::SetReady {
                    player_id,
                    ready,
                    reply,
                } => {
                    let result = self.handle_set_ready(player_id, ready);
                    let _ = reply.send(result);
                }
                RoomCommand::Disconnect { player_id, reply } => {
                    let result = self.handle_disconnect(player_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Apply { op, reply } => {
                    let result = self.handle_apply(op);
                    let _ = reply.send(result);
                }
                RoomCommand::Snapshot { viewer, reply } => {
                    let _ = reply.send(self.room.snapshot(viewer));
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room_id = %self.room.id(), "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(room_id = %self.room.id(), "room actor stopped");
    }

    fn handle_join(
        &mut self,
        player_id: PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let events = self.room.join(player_id)?;
        self.senders.insert(player_id, sender);

        // The joiner starts from a full picture of the lobby.
        self.send_to(
            player_id,
            RoomOutbound::State(self.room.snapshot(Some(player_id))),
        );
        self.dispatch(events);
        Ok(())
    }

    fn handle_set_ready(&mut self, player_id: PlayerId, ready: bool) -> Result<(), RoomError> {
        let events = self.room.set_ready(player_id, ready)?;
        self.dispatch(events);
        Ok(())
    }

    fn handle_disconnect(&mut self, player_id: PlayerId) -> Result<DisconnectOutcome, RoomError> {
        let (outcome, events) = self.room.handle_disconnect(player_id)?;
        self.senders.remove(&player_id);
        self.dispatch(events);
        Ok(outcome)
    }

    fn handle_apply(&mut self, op: RoomOp) -> Result<ApplyReply, RoomError> {
        match self.room.apply(op) {
            Ok(events) => {
                let matched = events.iter().find_map(|(_, event)| match event {
                    RoomEvent::GuessResolved { matched, .. } => Some(*matched),
                    _ => None,
                });
                let started = matches!(op, RoomOp::StartGame);
                self.dispatch(events);
                if started {
                    self.broadcast_states();
                }
                Ok(ApplyReply {
                    phase: self.room.phase(),
                    matched,
                })
            }
            Err(err @ EngineError::InvalidTileCount { .. }) => {
                // A bad split does not keep the turn open: the seat gets
                // the random deal instead, and the caller still sees the
                // rejection of their split.
                match self.room.apply(RoomOp::AutoProgress) {
                    Ok(events) => self.dispatch(events),
                    Err(fallback) => tracing::debug!(
                        room_id = %self.room.id(),
                        error = %fallback,
                        "corrective grant not applicable"
                    ),
                }
                Err(err.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delivers each event to its recipients.
    fn dispatch(&self, events: Events) {
        for (recipient, event) in events {
            let outbound = RoomOutbound::Event(event);
            match recipient {
                Recipient::All => {
                    for id in self.senders.keys() {
                        self.send_to(*id, outbound.clone());
                    }
                }
                Recipient::Player(id) => {
                    self.send_to(id, outbound);
                }
                Recipient::AllExcept(excluded) => {
                    for id in self.senders.keys() {
                        if *id != excluded {
                            self.send_to(*id, outbound.clone());
                        }
                    }
                }
            }
        }
    }

    /// Sends every seat its own view of the room.
    fn broadcast_states(&self) {
        for id in self.senders.keys() {
            self.send_to(*id, RoomOutbound::State(self.room.snapshot(Some(*id))));
        }
    }

    /// Sends to a single seat. Silently drops if the receiver is gone.
    fn send_to(&self, player_id: PlayerId, msg: RoomOutbound) {
        if let Some(sender) = self.senders.get(&player_id) {
            let _ = sender.send(msg);
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
///
/// `channel_size` bounds the command mailbox; when it fills, callers
/// wait rather than pile up unbounded.
pub(crate) fn spawn_room(room_id: RoomId, config: RoomConfig, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room: Room::new(room_id, config),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
