use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game error: {message}")]
    Game { message: String },

    #[error("Deck error: {message}")]
    Deck { message: String },

    #[error("Interface error: {message}")]
    Interface { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GameError {
    pub fn game<S: Into<String>>(message: S) -> Self {
        Self::Game {
            message: message.into(),
        }
    }

    pub fn deck<S: Into<String>>(message: S) -> Self {
        Self::Deck {
            message: message.into(),
        }
    }

    pub fn interface<S: Into<String>>(message: S) -> Self {
        Self::Interface {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = GameError::game("Test game error");
        assert!(matches!(error, GameError::Game { .. }));
        assert_eq!(error.to_string(), "Game error: Test game error");
    }

    #[test]
    fn test_deck_error() {
        let error = GameError::deck("wrong label count");
        assert!(matches!(error, GameError::Deck { .. }));
        assert_eq!(error.to_string(), "Deck error: wrong label count");
    }
}
