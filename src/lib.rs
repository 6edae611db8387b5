pub mod config;
pub mod core;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use self::core::{deck::Card, deck::Deck, engine::GameEngine, game_state::GameState};
pub use ui::GameInterface;

// Re-export commonly used types
pub type Result<T> = anyhow::Result<T>;

// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
