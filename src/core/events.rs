use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: Uuid,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEventType {
    GameStarted,
    CardFlipped,
    MatchFound,
    MismatchReverted,
    BoardReset,
    GameWon,
    Custom(String),
}

impl GameEvent {
    pub fn new(event_type: GameEventType, data: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    // Convenience constructors for common events
    pub fn game_started(deck_size: usize, seed: Option<u64>) -> Self {
        let data = serde_json::json!({
            "deck_size": deck_size,
            "seed": seed
        });
        Self::new(GameEventType::GameStarted, data)
    }

    pub fn card_flipped(index: usize, front: &str) -> Self {
        let data = serde_json::json!({
            "index": index,
            "front": front
        });
        Self::new(GameEventType::CardFlipped, data)
    }

    pub fn match_found(indices: [usize; 2], front: &str, matched_pairs: usize) -> Self {
        let data = serde_json::json!({
            "indices": indices,
            "front": front,
            "matched_pairs": matched_pairs
        });
        Self::new(GameEventType::MatchFound, data)
    }

    pub fn mismatch_reverted(indices: [usize; 2]) -> Self {
        let data = serde_json::json!({
            "indices": indices
        });
        Self::new(GameEventType::MismatchReverted, data)
    }

    pub fn board_reset(reshuffled: bool) -> Self {
        let data = serde_json::json!({
            "reshuffled": reshuffled
        });
        Self::new(GameEventType::BoardReset, data)
    }

    pub fn game_won(moves: u32, mismatches: u32, playtime_seconds: i64) -> Self {
        let data = serde_json::json!({
            "moves": moves,
            "mismatches": mismatches,
            "playtime_seconds": playtime_seconds
        });
        Self::new(GameEventType::GameWon, data)
    }

    pub fn custom<S: Into<String>>(event_name: S, data: serde_json::Value) -> Self {
        Self::new(GameEventType::Custom(event_name.into()), data)
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn get_events_by_type(&self, event_type: &GameEventType) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|event| {
                std::mem::discriminant(&event.event_type) == std::mem::discriminant(event_type)
            })
            .collect()
    }

    pub fn get_recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events.iter().rev().take(count).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }

    pub fn get_event_count_by_type(&self, event_type: &GameEventType) -> usize {
        self.events
            .iter()
            .filter(|event| {
                std::mem::discriminant(&event.event_type) == std::mem::discriminant(event_type)
            })
            .count()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000) // Default max 1000 events
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        // Remove oldest events if we exceed max capacity
        if self.events.len() > self.max_events {
            self.events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_started_event() {
        let event = GameEvent::game_started(16, Some(42));

        assert!(matches!(event.event_type, GameEventType::GameStarted));
        assert_eq!(event.data["deck_size"], 16);
        assert_eq!(event.data["seed"], 42);
    }

    #[test]
    fn test_card_flipped_event() {
        let event = GameEvent::card_flipped(5, "A");

        assert!(matches!(event.event_type, GameEventType::CardFlipped));
        assert_eq!(event.data["index"], 5);
        assert_eq!(event.data["front"], "A");
    }

    #[test]
    fn test_match_found_event() {
        let event = GameEvent::match_found([0, 5], "A", 3);

        assert!(matches!(event.event_type, GameEventType::MatchFound));
        assert_eq!(event.data["indices"][0], 0);
        assert_eq!(event.data["indices"][1], 5);
        assert_eq!(event.data["matched_pairs"], 3);
    }

    #[test]
    fn test_event_logger_capacity() {
        let mut logger = EventLogger::new(3);

        logger.handle_event(&GameEvent::card_flipped(0, "A"));
        logger.handle_event(&GameEvent::card_flipped(1, "B"));
        logger.handle_event(&GameEvent::card_flipped(2, "C"));

        assert_eq!(logger.get_event_count(), 3);

        // Add one more - should remove the oldest
        logger.handle_event(&GameEvent::card_flipped(3, "D"));

        assert_eq!(logger.get_event_count(), 3);
        assert_eq!(logger.get_events()[0].data["index"], 1);
    }

    #[test]
    fn test_event_filtering() {
        let mut logger = EventLogger::default();

        logger.handle_event(&GameEvent::game_started(16, None));
        logger.handle_event(&GameEvent::card_flipped(0, "A"));
        logger.handle_event(&GameEvent::card_flipped(5, "A"));
        logger.handle_event(&GameEvent::match_found([0, 5], "A", 1));

        let flips = logger.get_events_by_type(&GameEventType::CardFlipped);
        assert_eq!(flips.len(), 2);

        assert_eq!(logger.get_event_count_by_type(&GameEventType::MatchFound), 1);
        assert_eq!(
            logger.get_event_count_by_type(&GameEventType::BoardReset),
            0
        );
    }

    #[test]
    fn test_recent_events_order() {
        let mut logger = EventLogger::default();

        logger.handle_event(&GameEvent::card_flipped(0, "A"));
        logger.handle_event(&GameEvent::card_flipped(1, "B"));
        logger.handle_event(&GameEvent::card_flipped(2, "C"));

        let recent = logger.get_recent_events(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].data["index"], 2);
        assert_eq!(recent[1].data["index"], 1);
    }
}
