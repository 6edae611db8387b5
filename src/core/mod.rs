pub mod deck;
pub mod engine;
pub mod events;
pub mod game_state;

pub use deck::{Card, Deck, CARD_BACK, DECK_SIZE, GRID_COLS, GRID_ROWS, PAIR_COUNT};
pub use engine::GameEngine;
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
pub use game_state::{
    FlipOutcome, GameState, GameStatistics, GameStatus, PendingReversal, ReversalToken,
};
