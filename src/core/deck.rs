use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::{GameError, GameResult};

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 4;
pub const DECK_SIZE: usize = GRID_ROWS * GRID_COLS;
pub const PAIR_COUNT: usize = DECK_SIZE / 2;

/// Display text shared by every hidden card.
pub const CARD_BACK: &str = "Back Design";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
    pub revealed: bool,
}

impl Card {
    pub fn new<S: Into<String>>(front: S) -> Self {
        Self {
            front: front.into(),
            back: CARD_BACK.to_string(),
            revealed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck of 16 cards from 8 distinct labels (each duplicated once)
    /// and permute it. A seed gives a reproducible permutation.
    pub fn shuffled(labels: &[String], seed: Option<u64>) -> GameResult<Self> {
        validate_labels(labels)?;

        let mut cards: Vec<Card> = labels
            .iter()
            .flat_map(|label| [Card::new(label.clone()), Card::new(label.clone())])
            .collect();

        match seed {
            Some(seed) => cards.shuffle(&mut ChaCha8Rng::seed_from_u64(seed)),
            None => cards.shuffle(&mut rand::thread_rng()),
        }

        Ok(Self { cards })
    }

    /// Build a deck with an explicit card order. The pair invariant still
    /// holds: 16 fronts, each appearing exactly twice.
    pub fn from_fronts<I, S>(fronts: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards: Vec<Card> = fronts.into_iter().map(Card::new).collect();

        if cards.len() != DECK_SIZE {
            return Err(GameError::deck(format!(
                "Expected {} cards, got {}",
                DECK_SIZE,
                cards.len()
            )));
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(card.front.as_str()).or_default() += 1;
        }
        if counts.len() != PAIR_COUNT || counts.values().any(|&count| count != 2) {
            return Err(GameError::deck(
                "Every label must appear exactly twice".to_string(),
            ));
        }

        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn card_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub(crate) fn hide_all(&mut self) {
        for card in &mut self.cards {
            card.revealed = false;
        }
    }

    pub fn revealed_count(&self) -> usize {
        self.cards.iter().filter(|card| card.revealed).count()
    }
}

fn validate_labels(labels: &[String]) -> GameResult<()> {
    if labels.len() != PAIR_COUNT {
        return Err(GameError::deck(format!(
            "Expected {} labels, got {}",
            PAIR_COUNT,
            labels.len()
        )));
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *seen.entry(label.as_str()).or_default() += 1;
    }
    if seen.len() != PAIR_COUNT {
        return Err(GameError::deck("Labels must be distinct".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_labels() -> Vec<String> {
        ["A", "B", "C", "D", "E", "F", "G", "H"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_deck_has_eight_pairs() {
        let deck = Deck::shuffled(&test_labels(), Some(42)).unwrap();
        assert_eq!(deck.len(), DECK_SIZE);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in deck.cards() {
            *counts.entry(card.front.as_str()).or_default() += 1;
        }

        assert_eq!(counts.len(), PAIR_COUNT);
        assert!(counts.values().all(|&count| count == 2));
    }

    #[test]
    fn test_cards_start_hidden_with_shared_back() {
        let deck = Deck::shuffled(&test_labels(), Some(42)).unwrap();

        for card in deck.cards() {
            assert!(!card.revealed);
            assert_eq!(card.back, CARD_BACK);
        }
        assert_eq!(deck.revealed_count(), 0);
    }

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let deck1 = Deck::shuffled(&test_labels(), Some(7)).unwrap();
        let deck2 = Deck::shuffled(&test_labels(), Some(7)).unwrap();

        let fronts1: Vec<&str> = deck1.cards().iter().map(|c| c.front.as_str()).collect();
        let fronts2: Vec<&str> = deck2.cards().iter().map(|c| c.front.as_str()).collect();
        assert_eq!(fronts1, fronts2);
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let deck1 = Deck::shuffled(&test_labels(), Some(1)).unwrap();
        let deck2 = Deck::shuffled(&test_labels(), Some(2)).unwrap();

        let fronts1: Vec<&str> = deck1.cards().iter().map(|c| c.front.as_str()).collect();
        let fronts2: Vec<&str> = deck2.cards().iter().map(|c| c.front.as_str()).collect();
        assert_ne!(fronts1, fronts2);
    }

    #[test]
    fn test_label_validation() {
        let too_few: Vec<String> = vec!["A".to_string(), "B".to_string()];
        assert!(Deck::shuffled(&too_few, None).is_err());

        let mut duplicated = test_labels();
        duplicated[7] = "A".to_string();
        assert!(Deck::shuffled(&duplicated, None).is_err());
    }

    #[test]
    fn test_from_fronts_preserves_order() {
        let fronts = [
            "A", "A", "B", "B", "C", "C", "D", "D", "E", "E", "F", "F", "G", "G", "H", "H",
        ];
        let deck = Deck::from_fronts(fronts).unwrap();

        assert_eq!(deck.get(0).unwrap().front, "A");
        assert_eq!(deck.get(15).unwrap().front, "H");
    }

    #[test]
    fn test_from_fronts_rejects_broken_pairs() {
        let fronts = [
            "A", "A", "B", "B", "C", "C", "D", "D", "E", "E", "F", "F", "G", "G", "H", "A",
        ];
        assert!(Deck::from_fronts(fronts).is_err());

        let too_short = ["A", "A", "B", "B"];
        assert!(Deck::from_fronts(too_short).is_err());
    }
}
