use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::puzzle::Constellation;

pub const STARTING_CURRENCY: u32 = 100;
pub const DEFAULT_SOUNDSCAPE: &str = "quiet_night";
pub const DEFAULT_THEME: &str = "default";

/// Everything the player has earned. Serialized wholesale on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub completed_puzzles: BTreeSet<String>,
    pub current_puzzle: Option<String>,
    /// Highest constellation order the player may play.
    pub current_constellation_order: u32,
    pub currency: u32,
    pub unlocked_soundscapes: BTreeSet<String>,
    pub unlocked_themes: BTreeSet<String>,
    pub unlocked_spirits: BTreeSet<String>,
    pub hints_used: u32,
    pub total_puzzles_solved: u32,
}

impl PlayerProgress {
    pub fn new_player() -> Self {
        PlayerProgress {
            completed_puzzles: BTreeSet::new(),
            current_puzzle: None,
            current_constellation_order: 1,
            currency: STARTING_CURRENCY,
            unlocked_soundscapes: BTreeSet::from([DEFAULT_SOUNDSCAPE.to_string()]),
            unlocked_themes: BTreeSet::from([DEFAULT_THEME.to_string()]),
            unlocked_spirits: BTreeSet::new(),
            hints_used: 0,
            total_puzzles_solved: 0,
        }
    }

    pub fn is_puzzle_completed(&self, puzzle_id: &str) -> bool {
        self.completed_puzzles.contains(puzzle_id)
    }

    pub fn is_spirit_unlocked(&self, spirit_id: &str) -> bool {
        self.unlocked_spirits.contains(spirit_id)
    }

    pub fn is_constellation_unlocked(&self, constellation: &Constellation) -> bool {
        constellation.order <= self.current_constellation_order
    }

    pub fn completed_puzzles_in(&self, constellation: &Constellation) -> usize {
        constellation
            .puzzles
            .iter()
            .filter(|p| self.completed_puzzles.contains(&p.id))
            .count()
    }

    /// True once the unlock threshold is met, not when every puzzle is solved.
    pub fn is_constellation_complete(&self, constellation: &Constellation) -> bool {
        self.completed_puzzles_in(constellation) >= constellation.unlock_threshold
    }

    pub fn is_constellation_fully_complete(&self, constellation: &Constellation) -> bool {
        self.completed_puzzles_in(constellation) >= constellation.total_puzzles()
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.currency >= cost
    }
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::new_player()
    }
}
