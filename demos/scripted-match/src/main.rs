//! Two scripted bots play full games against each other through the
//! public room surface.
//!
//! Each bot only ever sees what a real client would: its own true
//! codes, everyone else's masked hands, and the public event stream.
//! Guessing works by elimination; misses are remembered, public joker
//! faces are read off the table, and certainty keeps the bonus-guess
//! window open. Run with `RUST_LOG=debug` for the full event feed.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilecode::engine::starting_hand_size;
use tilecode::prelude::*;
use tilecode::protocol::{JOKER_NUMBER, ParticipantView};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Bot
// ---------------------------------------------------------------------------

/// A seated player that deduces the rival's hand from public information.
struct Bot {
    id: PlayerId,
    rival: PlayerId,
    rx: mpsc::UnboundedReceiver<RoomOutbound>,
    rng: StdRng,
    /// Numbers not yet ruled out, per rival hand index.
    candidates: Vec<HashSet<u8>>,
    /// Rival indices known to be open (reveal events plus rejections).
    known_visible: HashSet<usize>,
}

impl Bot {
    fn new(
        id: PlayerId,
        rival: PlayerId,
        rx: mpsc::UnboundedReceiver<RoomOutbound>,
        seed: u64,
    ) -> Self {
        Self {
            id,
            rival,
            rx,
            rng: StdRng::seed_from_u64(seed),
            candidates: Vec::new(),
            known_visible: HashSet::new(),
        }
    }

    fn any_number() -> HashSet<u8> {
        (0..=JOKER_NUMBER).collect()
    }

    fn mark_visible(&mut self, index: usize) {
        self.known_visible.insert(index);
    }

    /// Folds every queued event into the deduction tables.
    fn pump(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            if let RoomOutbound::Event(event) = message {
                tracing::debug!(bot = %self.id, ?event, "event");
                self.absorb(&event);
            }
        }
    }

    fn absorb(&mut self, event: &RoomEvent) {
        match *event {
            RoomEvent::GameStarted { .. } => {
                self.candidates.clear();
                self.known_visible.clear();
            }
            RoomEvent::TilesDealt {
                player_id,
                white,
                black,
            } if player_id == self.rival => {
                let dealt = usize::from(white + black);
                self.candidates = vec![Self::any_number(); dealt];
                self.known_visible.clear();
            }
            RoomEvent::TileDrawn {
                player_id,
                hand_index,
                ..
            } if player_id == self.rival => {
                let at = hand_index.min(self.candidates.len());
                self.candidates.insert(at, Self::any_number());
                self.known_visible = self
                    .known_visible
                    .iter()
                    .map(|&i| if i >= hand_index { i + 1 } else { i })
                    .collect();
            }
            RoomEvent::JokerPlaced { player_id, .. } if player_id == self.rival => {
                // A repositioned joker shifts unknown indices; start over.
                let len = self.candidates.len();
                self.candidates = vec![Self::any_number(); len];
                self.known_visible.clear();
            }
            RoomEvent::TileRevealed { owner, index, tile } if owner == self.rival => {
                let (_, number) = tile.decode();
                if let Some(set) = self.candidates.get_mut(index) {
                    *set = HashSet::from([number]);
                }
                self.known_visible.insert(index);
            }
            RoomEvent::GuessResolved {
                target,
                index,
                number,
                matched: false,
                ..
            } if target == self.rival => {
                if let Some(set) = self.candidates.get_mut(index) {
                    set.remove(&number);
                }
            }
            _ => {}
        }
    }

    /// Picks the most constrained closed tile and a number for it.
    fn pick_guess(&mut self, rival_hand: &[TileCode]) -> Option<(usize, u8)> {
        let mut pool: Vec<(usize, Vec<u8>)> = Vec::new();
        for (index, code) in rival_hand.iter().enumerate() {
            if self.known_visible.contains(&index) {
                continue;
            }
            if code.is_joker() {
                // The public face of a joker is its number.
                pool.push((index, vec![JOKER_NUMBER]));
                continue;
            }
            if !code.is_hidden() {
                continue;
            }
            let numbers: Vec<u8> = match self.candidates.get(index) {
                Some(set) if !set.is_empty() => set.iter().copied().collect(),
                _ => (0..=JOKER_NUMBER).collect(),
            };
            pool.push((index, numbers));
        }

        pool.sort_by_key(|(_, numbers)| numbers.len());
        let (index, numbers) = pool.into_iter().next()?;
        let number = numbers[self.rng.random_range(0..numbers.len())];
        Some((index, number))
    }

    /// Keeps the bonus window open when a sure hit exists, and
    /// occasionally on a gamble.
    fn wants_bonus_guess(&mut self, rival_hand: &[TileCode]) -> bool {
        let certain = rival_hand.iter().enumerate().any(|(index, code)| {
            if self.known_visible.contains(&index) {
                return false;
            }
            if code.is_joker() {
                return true;
            }
            code.is_hidden()
                && self
                    .candidates
                    .get(index)
                    .is_some_and(|set| set.len() == 1)
        });
        certain || self.rng.random_bool(0.25)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

fn find<'a>(view: &'a RoomView, id: PlayerId) -> Option<&'a ParticipantView> {
    view.participants.iter().find(|p| p.player_id == id)
}

fn bot_by_id(bots: &mut [Bot; 2], id: PlayerId) -> &mut Bot {
    if bots[0].id == id {
        &mut bots[0]
    } else {
        &mut bots[1]
    }
}

fn other_of(bots: &[Bot; 2], id: PlayerId) -> PlayerId {
    if bots[0].id == id { bots[1].id } else { bots[0].id }
}

async fn play_game(
    manager: &RoomManager,
    room: RoomId,
    bots: &mut [Bot; 2],
) -> Result<(), Box<dyn std::error::Error>> {
    for bot in bots.iter() {
        manager.set_ready(bot.id, true).await?;
    }
    manager.start_game(room).await?;

    for _step in 0..2000 {
        for bot in bots.iter_mut() {
            bot.pump();
        }

        let view = manager.snapshot(room, None).await?;
        let token = view.turn_pointer as u8 + 1;

        match view.phase {
            Phase::Setting => {
                manager.close_setting(room, token).await?;
            }
            Phase::Start => {
                let current = view.current().ok_or("no current seat")?;
                if !current.ready {
                    if current.player_id == bots[0].id {
                        // The first bot picks its own split.
                        let need = starting_hand_size(view.participants.len());
                        let white = need / 2;
                        manager
                            .draw_at_start(current.player_id, white, need - white)
                            .await?;
                    } else {
                        manager.auto_progress(room).await?;
                    }
                }
                manager.close_start(room, token).await?;
            }
            Phase::Draw => {
                match manager.auto_progress(room).await {
                    Ok(_) => {}
                    Err(RoomError::Engine(EngineError::PoolsExhausted)) => {
                        tracing::info!("pools are empty, playing on without a draw");
                    }
                    Err(other) => return Err(other.into()),
                }
                manager.close_draw(room, token).await?;
            }
            Phase::Sort => {
                let current = view.current().ok_or("no current seat")?;
                let own = manager.snapshot(room, Some(current.player_id)).await?;
                let me = find(&own, current.player_id).ok_or("current seat missing")?;
                if let Some(drawn) = me.last_drawn_index {
                    let (color, number) = me.hand[drawn].decode();
                    if number == JOKER_NUMBER {
                        manager.place_joker(current.player_id, 0, color).await?;
                        tracing::info!(player = %current.player_id, "drawn joker moved to the front");
                    }
                }
                manager.close_sort(room, token).await?;
            }
            Phase::Guess => {
                let guesser = view.current().ok_or("no current seat")?.player_id;
                let rival = other_of(bots, guesser);
                let rival_hand = find(&view, rival).ok_or("rival missing")?.hand.clone();
                let bot = bot_by_id(bots, guesser);
                loop {
                    let Some((index, number)) = bot.pick_guess(&rival_hand) else {
                        return Err("no closed tile left to guess".into());
                    };
                    match manager.guess(guesser, rival, index, number).await {
                        Ok(hit) => {
                            tracing::info!(
                                guesser = %guesser,
                                target = %rival,
                                index,
                                number,
                                hit,
                                "guess resolved"
                            );
                            break;
                        }
                        Err(RoomError::Engine(EngineError::TileAlreadyVisible { .. })) => {
                            // A joker face hides its open/closed state;
                            // the rejection settles it.
                            bot.mark_visible(index);
                        }
                        Err(other) => return Err(other.into()),
                    }
                }
            }
            Phase::Repeat => {
                let current = view.current().ok_or("no current seat")?.player_id;
                let rival = other_of(bots, current);
                let rival_hand = find(&view, rival).ok_or("rival missing")?.hand.clone();
                let again = bot_by_id(bots, current).wants_bonus_guess(&rival_hand);
                manager.close_repeat(room, token, again).await?;
            }
            Phase::End => {
                manager.close_end(room, token).await?;
            }
            Phase::Gameover => {
                let winner = view
                    .participants
                    .iter()
                    .find(|p| !p.retired && p.connected)
                    .ok_or("gameover without a winner")?;
                tracing::info!(winner = %winner.player_id, "game over");
                manager.close_gameover(room, token).await?;
                return Ok(());
            }
            Phase::Wait => return Err("room fell back to the lobby mid-game".into()),
        }
    }

    Err("game did not finish within the step limit".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut manager = RoomManager::new();
    let room = manager.create_room(RoomConfig {
        seed: Some(2024),
        ..RoomConfig::default()
    });

    let first = PlayerId(1);
    let second = PlayerId(2);
    let (tx1, rx1) = mpsc::unbounded_channel();
    let (tx2, rx2) = mpsc::unbounded_channel();
    manager.join_room(first, room, tx1).await?;
    manager.join_room(second, room, tx2).await?;

    let mut bots = [
        Bot::new(first, second, rx1, 11),
        Bot::new(second, first, rx2, 23),
    ];

    for game in 1..=2u32 {
        tracing::info!(game, "starting a match");
        play_game(&manager, room, &mut bots).await?;
    }

    tracing::info!("both matches finished, tearing down");
    manager.destroy_room(room).await?;
    Ok(())
}
