use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::events::{EventLogger, GameEvent, GameEventHandler};
use crate::core::{Deck, FlipOutcome, GameState, ReversalToken};
use crate::utils::{GameError, GameResult};

pub struct GameEngine {
    state: Option<GameState>,
    event_handler: Arc<Mutex<EventLogger>>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            state: None,
            event_handler: Arc::new(Mutex::new(EventLogger::default())),
        }
    }

    /// Deal a freshly shuffled deck and start a new game.
    pub async fn new_game(&mut self, labels: &[String], seed: Option<u64>) -> GameResult<()> {
        let deck = Deck::shuffled(labels, seed)?;
        info!("Starting new game ({} cards, seed: {:?})", deck.len(), seed);

        let deck_size = deck.len();
        self.state = Some(GameState::new(deck));
        self.emit_event(GameEvent::game_started(deck_size, seed)).await;

        Ok(())
    }

    /// Start a game from an explicit deck layout.
    pub async fn start_with_deck(&mut self, deck: Deck) {
        info!("Starting game with a fixed layout ({} cards)", deck.len());

        let deck_size = deck.len();
        self.state = Some(GameState::new(deck));
        self.emit_event(GameEvent::game_started(deck_size, None)).await;
    }

    /// Flip the card at `index`. Invalid flips (out of range, already face
    /// up, board locked) are silent no-ops and emit no notification.
    pub async fn flip(&mut self, index: usize) -> GameResult<FlipOutcome> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| GameError::game("No active game".to_string()))?;

        let outcome = state.flip_card(index);

        match outcome {
            FlipOutcome::Ignored => {
                debug!("Ignored flip at index {}", index);
            }
            FlipOutcome::Revealed => {
                let front = card_front(state, index);
                debug!("Revealed card {} ({})", index, front);
                self.emit_event(GameEvent::card_flipped(index, &front)).await;
            }
            FlipOutcome::Matched { indices, won } => {
                let front = card_front(state, index);
                let matched_pairs = state.matched_pairs;
                let moves = state.moves;
                let mismatches = state.mismatches;
                let playtime = state.get_playtime_seconds();
                info!("Match on {:?} ({})", indices, front);

                self.emit_event(GameEvent::card_flipped(index, &front)).await;
                self.emit_event(GameEvent::match_found(indices, &front, matched_pairs))
                    .await;
                if won {
                    info!("Game won in {} moves", moves);
                    self.emit_event(GameEvent::game_won(moves, mismatches, playtime))
                        .await;
                }
            }
            FlipOutcome::Mismatched { indices, .. } => {
                let front = card_front(state, index);
                debug!("Mismatch on {:?}, reversal pending", indices);
                self.emit_event(GameEvent::card_flipped(index, &front)).await;
            }
        }

        Ok(outcome)
    }

    /// Hide a mismatched pair once its delay has elapsed. Returns `false`
    /// without emitting anything when the token is stale.
    pub async fn resolve_mismatch(&mut self, token: ReversalToken) -> GameResult<bool> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| GameError::game("No active game".to_string()))?;

        match state.resolve_mismatch(token) {
            Some(indices) => {
                debug!("Reverted mismatched pair {:?}", indices);
                self.emit_event(GameEvent::mismatch_reverted(indices)).await;
                Ok(true)
            }
            None => {
                debug!("Stale reversal token ignored");
                Ok(false)
            }
        }
    }

    /// Hide every card and clear transient state without re-shuffling.
    pub async fn reset(&mut self) -> GameResult<()> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| GameError::game("No active game".to_string()))?;

        state.reset();
        info!("Board reset (same layout)");
        self.emit_event(GameEvent::board_reset(false)).await;

        Ok(())
    }

    pub fn get_game_state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn is_game_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_game_won(&self) -> bool {
        self.state.as_ref().map(|s| s.is_won()).unwrap_or(false)
    }

    async fn emit_event(&self, event: GameEvent) {
        if let Ok(mut handler) = self.event_handler.try_lock() {
            handler.handle_event(&event);
        }
    }

    pub async fn get_event_history(&self) -> Vec<GameEvent> {
        if let Ok(handler) = self.event_handler.try_lock() {
            handler.get_events().to_vec()
        } else {
            Vec::new()
        }
    }

    pub async fn get_recent_events(&self, count: usize) -> Vec<GameEvent> {
        if let Ok(handler) = self.event_handler.try_lock() {
            handler.get_recent_events(count).into_iter().cloned().collect()
        } else {
            Vec::new()
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn card_front(state: &GameState, index: usize) -> String {
    state
        .deck()
        .get(index)
        .map(|card| card.front.clone())
        .unwrap_or_default()
}
