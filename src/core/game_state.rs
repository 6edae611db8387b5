use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::deck::{Deck, PAIR_COUNT};

/// Generation token for an outstanding mismatch reversal. A token is only
/// honored while its reversal is still pending, so a callback that outlived
/// a reset cannot touch the new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalToken(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingReversal {
    pub indices: [usize; 2],
    pub token: ReversalToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
}

/// Result of a flip attempt. Failed preconditions are `Ignored`, never an
/// error: the board simply does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored,
    Revealed,
    Matched { indices: [usize; 2], won: bool },
    Mismatched { indices: [usize; 2], token: ReversalToken },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: Uuid,
    deck: Deck,
    revealed: Vec<usize>,
    pending: Option<PendingReversal>,
    next_token: u64,
    pub moves: u32,
    pub matched_pairs: usize,
    pub mismatches: u32,
    pub started_at: DateTime<Utc>,
}

impl GameState {
    pub fn new(deck: Deck) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            deck,
            revealed: Vec::new(),
            pending: None,
            // Token series is namespaced by game, so a reversal scheduled
            // in an earlier game can never match a pending entry here.
            next_token: (id.as_u128() >> 64) as u64,
            moves: 0,
            matched_pairs: 0,
            mismatches: 0,
            started_at: Utc::now(),
        }
    }

    /// Flip the card at `index`. Preconditions: index in range, card still
    /// hidden, fewer than two unresolved cards face up. Any failed
    /// precondition is a silent no-op.
    pub fn flip_card(&mut self, index: usize) -> FlipOutcome {
        let hidden = match self.deck.get(index) {
            Some(card) => !card.revealed,
            None => return FlipOutcome::Ignored,
        };
        if !hidden || self.revealed.len() >= 2 {
            return FlipOutcome::Ignored;
        }

        if let Some(card) = self.deck.card_mut(index) {
            card.revealed = true;
        }
        self.revealed.push(index);
        self.moves += 1;

        if self.revealed.len() < 2 {
            return FlipOutcome::Revealed;
        }

        self.resolve_pair()
    }

    fn resolve_pair(&mut self) -> FlipOutcome {
        let indices = [self.revealed[0], self.revealed[1]];
        let matched = match (self.deck.get(indices[0]), self.deck.get(indices[1])) {
            (Some(first), Some(second)) => first.front == second.front,
            _ => false,
        };

        if matched {
            self.revealed.clear();
            self.matched_pairs += 1;
            FlipOutcome::Matched {
                indices,
                won: self.matched_pairs == PAIR_COUNT,
            }
        } else {
            // Both cards stay face up and the revealed set keeps gating
            // flips until the reversal fires.
            self.next_token += 1;
            let token = ReversalToken(self.next_token);
            self.pending = Some(PendingReversal { indices, token });
            FlipOutcome::Mismatched { indices, token }
        }
    }

    /// Hide a mismatched pair. Only the token of the outstanding reversal
    /// is honored; a stale token returns `None` and changes nothing.
    pub fn resolve_mismatch(&mut self, token: ReversalToken) -> Option<[usize; 2]> {
        match &self.pending {
            Some(pending) if pending.token == token => {
                let indices = pending.indices;
                for index in indices {
                    if let Some(card) = self.deck.card_mut(index) {
                        card.revealed = false;
                    }
                }
                self.revealed.clear();
                self.pending = None;
                self.mismatches += 1;
                Some(indices)
            }
            _ => None,
        }
    }

    /// Hide every card and clear all transient state. The deck keeps its
    /// layout; dealing a fresh permutation is `GameEngine::new_game`.
    pub fn reset(&mut self) {
        self.deck.hide_all();
        self.revealed.clear();
        self.pending = None;
        self.moves = 0;
        self.matched_pairs = 0;
        self.mismatches = 0;
        self.started_at = Utc::now();
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn pending(&self) -> Option<&PendingReversal> {
        self.pending.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        if self.matched_pairs == PAIR_COUNT {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_won(&self) -> bool {
        self.status() == GameStatus::Won
    }

    pub fn get_playtime_seconds(&self) -> i64 {
        Utc::now().signed_duration_since(self.started_at).num_seconds()
    }

    pub fn get_playtime_formatted(&self) -> String {
        let total = self.get_playtime_seconds();
        let minutes = total / 60;
        let seconds = total % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    pub fn get_statistics(&self) -> GameStatistics {
        GameStatistics {
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            mismatches: self.mismatches,
            playtime_seconds: self.get_playtime_seconds(),
            status: self.status(),
            started_at: self.started_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatistics {
    pub moves: u32,
    pub matched_pairs: usize,
    pub mismatches: u32,
    pub playtime_seconds: i64,
    pub status: GameStatus,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Index 0 and index 5 share "A"; index 1 holds "B".
    fn spread_layout() -> GameState {
        let fronts = [
            "A", "B", "C", "D", "E", "A", "F", "G", "H", "B", "C", "D", "E", "F", "G", "H",
        ];
        GameState::new(Deck::from_fronts(fronts).unwrap())
    }

    // Pairs sit side by side: (0,1), (2,3), ...
    fn adjacent_layout() -> GameState {
        let fronts = [
            "A", "A", "B", "B", "C", "C", "D", "D", "E", "E", "F", "F", "G", "G", "H", "H",
        ];
        GameState::new(Deck::from_fronts(fronts).unwrap())
    }

    #[test]
    fn test_flip_reveals_card() {
        let mut state = spread_layout();

        assert_eq!(state.flip_card(0), FlipOutcome::Revealed);
        assert!(state.deck().get(0).unwrap().revealed);
        assert_eq!(state.revealed(), &[0]);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn test_flip_out_of_range_is_noop() {
        let mut state = spread_layout();

        assert_eq!(state.flip_card(16), FlipOutcome::Ignored);
        assert_eq!(state.revealed(), &[] as &[usize]);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn test_flip_already_revealed_is_noop() {
        let mut state = spread_layout();

        state.flip_card(0);
        assert_eq!(state.flip_card(0), FlipOutcome::Ignored);
        assert_eq!(state.revealed(), &[0]);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn test_matching_pair_stays_revealed() {
        let mut state = spread_layout();

        assert_eq!(state.flip_card(0), FlipOutcome::Revealed);
        let outcome = state.flip_card(5);
        assert_eq!(
            outcome,
            FlipOutcome::Matched {
                indices: [0, 5],
                won: false
            }
        );

        assert!(state.deck().get(0).unwrap().revealed);
        assert!(state.deck().get(5).unwrap().revealed);
        assert_eq!(state.revealed(), &[] as &[usize]);
        assert_eq!(state.matched_pairs, 1);
    }

    #[test]
    fn test_mismatch_stays_revealed_until_resolved() {
        let mut state = spread_layout();

        state.flip_card(0);
        let outcome = state.flip_card(1);
        let token = match outcome {
            FlipOutcome::Mismatched { indices, token } => {
                assert_eq!(indices, [0, 1]);
                token
            }
            other => panic!("expected mismatch, got {:?}", other),
        };

        // Until the reversal fires both cards stay up and the board is locked.
        assert!(state.deck().get(0).unwrap().revealed);
        assert!(state.deck().get(1).unwrap().revealed);
        assert_eq!(state.revealed().len(), 2);
        assert_eq!(state.flip_card(2), FlipOutcome::Ignored);

        assert_eq!(state.resolve_mismatch(token), Some([0, 1]));
        assert!(!state.deck().get(0).unwrap().revealed);
        assert!(!state.deck().get(1).unwrap().revealed);
        assert_eq!(state.revealed(), &[] as &[usize]);
        assert_eq!(state.mismatches, 1);
    }

    #[test]
    fn test_flip_allowed_again_after_reversal() {
        let mut state = spread_layout();

        state.flip_card(0);
        let token = match state.flip_card(1) {
            FlipOutcome::Mismatched { token, .. } => token,
            other => panic!("expected mismatch, got {:?}", other),
        };
        state.resolve_mismatch(token);

        assert_eq!(state.flip_card(0), FlipOutcome::Revealed);
    }

    #[test]
    fn test_stale_token_is_noop() {
        let mut state = spread_layout();

        state.flip_card(0);
        let token = match state.flip_card(1) {
            FlipOutcome::Mismatched { token, .. } => token,
            other => panic!("expected mismatch, got {:?}", other),
        };

        // A reset invalidates the outstanding reversal entirely.
        state.reset();
        state.flip_card(2);
        assert_eq!(state.resolve_mismatch(token), None);
        assert!(state.deck().get(2).unwrap().revealed);
        assert_eq!(state.revealed(), &[2]);
    }

    #[test]
    fn test_double_resolve_is_noop() {
        let mut state = spread_layout();

        state.flip_card(0);
        let token = match state.flip_card(1) {
            FlipOutcome::Mismatched { token, .. } => token,
            other => panic!("expected mismatch, got {:?}", other),
        };

        assert_eq!(state.resolve_mismatch(token), Some([0, 1]));
        assert_eq!(state.resolve_mismatch(token), None);
        assert_eq!(state.mismatches, 1);
    }

    #[test]
    fn test_reset_hides_everything() {
        let mut state = spread_layout();

        state.flip_card(0);
        state.flip_card(5);
        state.flip_card(1);
        state.reset();

        assert_eq!(state.deck().revealed_count(), 0);
        assert_eq!(state.revealed(), &[] as &[usize]);
        assert!(state.pending().is_none());
        assert_eq!(state.moves, 0);
        assert_eq!(state.matched_pairs, 0);
    }

    #[test]
    fn test_reset_keeps_layout() {
        let mut state = spread_layout();
        let fronts_before: Vec<String> = state
            .deck()
            .cards()
            .iter()
            .map(|c| c.front.clone())
            .collect();

        state.flip_card(0);
        state.reset();

        let fronts_after: Vec<String> = state
            .deck()
            .cards()
            .iter()
            .map(|c| c.front.clone())
            .collect();
        assert_eq!(fronts_before, fronts_after);
    }

    #[test]
    fn test_winning_the_game() {
        let mut state = adjacent_layout();

        for pair in 0..8 {
            let first = pair * 2;
            assert_eq!(state.flip_card(first), FlipOutcome::Revealed);
            let outcome = state.flip_card(first + 1);
            let expected_won = pair == 7;
            assert_eq!(
                outcome,
                FlipOutcome::Matched {
                    indices: [first, first + 1],
                    won: expected_won
                }
            );
        }

        assert_eq!(state.status(), GameStatus::Won);
        assert!(state.is_won());
        assert_eq!(state.deck().revealed_count(), 16);
    }

    #[test]
    fn test_statistics_snapshot() {
        let mut state = spread_layout();

        state.flip_card(0);
        state.flip_card(5);
        state.flip_card(1);
        let token = match state.flip_card(2) {
            FlipOutcome::Mismatched { token, .. } => token,
            other => panic!("expected mismatch, got {:?}", other),
        };
        state.resolve_mismatch(token);

        let stats = state.get_statistics();
        assert_eq!(stats.moves, 4);
        assert_eq!(stats.matched_pairs, 1);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.status, GameStatus::InProgress);
    }
}
