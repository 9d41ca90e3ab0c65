use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::engine::{CompletionOutcome, ProgressionEngine};
use crate::puzzle::Puzzle;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HintError {
    #[error("Not enough moonstones: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("Already used on this puzzle")]
    AlreadyUsed,

    #[error("Nothing left to reveal")]
    NothingToReveal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerResult {
    Correct(CompletionOutcome),
    Wrong,
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterReveal {
    pub index: usize,
    pub letter: char,
}

pub struct PuzzleSession {
    puzzle: Puzzle,
    answer: Vec<char>,
    anchors: BTreeMap<usize, char>,
    revealed: BTreeSet<usize>,
    context_revealed: bool,
    boost_index: Option<usize>,
    solved: bool,
}

impl PuzzleSession {
    pub fn new(puzzle: Puzzle) -> Self {
        let answer: Vec<char> = puzzle.answer.chars().collect();
        // Out-of-range anchors are ignored
        let anchors = puzzle
            .anchor_letters
            .iter()
            .filter_map(|&i| answer.get(i).map(|&c| (i, c)))
            .collect();

        PuzzleSession {
            puzzle,
            answer,
            anchors,
            revealed: BTreeSet::new(),
            context_revealed: false,
            boost_index: None,
            solved: false,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn anchor_letters(&self) -> &BTreeMap<usize, char> {
        &self.anchors
    }

    pub fn revealed_indices(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn context_tag(&self) -> Option<&str> {
        self.context_revealed
            .then_some(self.puzzle.context_tag.as_str())
    }

    /// Slot the boost highlights. The player still has to type that letter.
    pub fn boost_index(&self) -> Option<usize> {
        self.boost_index
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    fn is_prefilled(&self, index: usize) -> bool {
        self.anchors.contains_key(&index) || self.revealed.contains(&index)
    }

    /// Number of letters the player has to supply.
    pub fn open_slots(&self) -> usize {
        (0..self.answer.len()).filter(|&i| !self.is_prefilled(i)).count()
    }

    /// Answer slots with anchors and revealed letters in place and `input` poured
    /// into the remaining slots left to right.
    pub fn slots(&self, input: &str) -> Vec<Option<char>> {
        let mut typed = input.chars().filter(|c| !c.is_whitespace());
        (0..self.answer.len())
            .map(|i| {
                if self.is_prefilled(i) {
                    Some(self.answer[i])
                } else {
                    typed.next()
                }
            })
            .collect()
    }

    pub fn build_full_answer(&self, input: &str) -> String {
        self.slots(input).into_iter().flatten().collect()
    }

    pub fn submit(&mut self, input: &str, engine: &mut ProgressionEngine) -> AnswerResult {
        let full = self.build_full_answer(input);

        if full.to_uppercase() == self.puzzle.answer.to_uppercase() {
            self.solved = true;
            AnswerResult::Correct(engine.complete_puzzle(&self.puzzle))
        } else if full.chars().count() == self.answer.len() {
            AnswerResult::Wrong
        } else {
            AnswerResult::Incomplete
        }
    }

    fn charge(engine: &mut ProgressionEngine, cost: u32) -> Result<(), HintError> {
        if engine.spend(cost) {
            Ok(())
        } else {
            Err(HintError::InsufficientFunds {
                needed: cost,
                available: engine.progress().currency,
            })
        }
    }

    /// Pays for a hint: shows the context tag and fills in the next open letter.
    pub fn use_hint(&mut self, engine: &mut ProgressionEngine) -> Result<LetterReveal, HintError> {
        let index = (0..self.answer.len())
            .find(|&i| !self.is_prefilled(i))
            .ok_or(HintError::NothingToReveal)?;

        let cost = engine.economy().reveal_letter_cost;
        Self::charge(engine, cost)?;
        engine.record_hint();

        self.revealed.insert(index);
        self.context_revealed = true;
        Ok(LetterReveal {
            index,
            letter: self.answer[index],
        })
    }

    /// Once per session: marks the first letter the player still has to type.
    pub fn use_boost(&mut self, engine: &mut ProgressionEngine) -> Result<usize, HintError> {
        if self.boost_index.is_some() {
            return Err(HintError::AlreadyUsed);
        }
        let index = (0..self.answer.len())
            .find(|&i| !self.is_prefilled(i))
            .ok_or(HintError::NothingToReveal)?;

        let cost = engine.economy().boost_cost;
        Self::charge(engine, cost)?;
        self.boost_index = Some(index);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Economy;
    use crate::progress::{MemoryStore, ProgressStore};
    use crate::puzzle::types::fixtures;
    use crate::puzzle::Catalog;
    use std::rc::Rc;

    fn engine() -> ProgressionEngine {
        let catalog = Rc::new(Catalog::from_constellations(vec![fixtures::constellation(
            "woods", 1, 3, 2,
        )]));
        let store = ProgressStore::open(Box::new(MemoryStore::new()));
        ProgressionEngine::new(catalog, store, Economy::default())
    }

    fn anchored(engine: &ProgressionEngine) -> PuzzleSession {
        // STARFISH with S and F pre-filled
        let mut puzzle = engine.catalog().puzzle("woods_01").unwrap();
        puzzle.anchor_letters = vec![0, 4, 99];
        PuzzleSession::new(puzzle)
    }

    #[test]
    fn input_fills_around_anchors() {
        let engine = engine();
        let session = anchored(&engine);
        assert_eq!(session.anchor_letters().len(), 2);
        assert_eq!(session.open_slots(), 6);
        assert_eq!(session.build_full_answer("TAR"), "STARF");
        assert_eq!(session.build_full_answer("tarish"), "StarFish");
        assert_eq!(session.slots("")[1], None);
    }

    #[test]
    fn submit_distinguishes_wrong_from_incomplete() {
        let mut engine = engine();
        let mut session = anchored(&engine);

        assert_eq!(session.submit("TAR", &mut engine), AnswerResult::Incomplete);
        assert_eq!(session.submit("TARLSH", &mut engine), AnswerResult::Wrong);
        assert!(!session.is_solved());
        assert_eq!(engine.progress().currency, 100);

        match session.submit("tarish", &mut engine) {
            AnswerResult::Correct(outcome) => assert_eq!(outcome.reward, 20),
            other => panic!("expected a correct answer, got {:?}", other),
        }
        assert!(session.is_solved());
        assert!(engine.progress().is_puzzle_completed("woods_01"));
    }

    #[test]
    fn hint_reveals_next_open_letter() {
        let mut engine = engine();
        let mut session = anchored(&engine);
        assert!(session.context_tag().is_none());

        let reveal = session.use_hint(&mut engine).unwrap();
        assert_eq!(reveal, LetterReveal { index: 1, letter: 'T' });
        assert_eq!(session.context_tag(), Some("Somewhere"));
        assert_eq!(engine.progress().currency, 75);
        assert_eq!(engine.progress().hints_used, 1);

        let reveal = session.use_hint(&mut engine).unwrap();
        assert_eq!(reveal.index, 2);
        assert_eq!(session.open_slots(), 4);
        assert_eq!(session.build_full_answer("RISH"), "STARFISH");
    }

    #[test]
    fn hint_without_funds_changes_nothing() {
        let mut engine = engine();
        assert!(engine.spend(90));
        let mut session = anchored(&engine);

        assert_eq!(
            session.use_hint(&mut engine),
            Err(HintError::InsufficientFunds {
                needed: 25,
                available: 10
            })
        );
        assert_eq!(engine.progress().currency, 10);
        assert_eq!(engine.progress().hints_used, 0);
        assert!(session.revealed_indices().is_empty());
        assert!(session.context_tag().is_none());
    }

    #[test]
    fn hint_stops_when_everything_is_filled() {
        let mut engine = engine();
        engine.add_currency(1000);
        let mut puzzle = engine.catalog().puzzle("woods_02").unwrap();
        puzzle.answer = "OWL".to_string();
        puzzle.anchor_letters = vec![1];
        let mut session = PuzzleSession::new(puzzle);

        assert!(session.use_hint(&mut engine).is_ok());
        assert!(session.use_hint(&mut engine).is_ok());
        let balance = engine.progress().currency;
        assert_eq!(session.use_hint(&mut engine), Err(HintError::NothingToReveal));
        assert_eq!(engine.progress().currency, balance);
    }

    #[test]
    fn boost_marks_first_non_anchor_once() {
        let mut engine = engine();
        let mut session = anchored(&engine);

        assert_eq!(session.use_boost(&mut engine), Ok(1));
        assert_eq!(session.boost_index(), Some(1));
        assert_eq!(engine.progress().currency, 50);
        // Still typed by the player
        assert_eq!(session.open_slots(), 6);

        assert_eq!(session.use_boost(&mut engine), Err(HintError::AlreadyUsed));
        assert_eq!(engine.progress().currency, 50);
    }

    #[test]
    fn boost_without_funds_can_be_retried() {
        let mut engine = engine();
        assert!(engine.spend(60));
        let mut session = anchored(&engine);

        assert!(matches!(
            session.use_boost(&mut engine),
            Err(HintError::InsufficientFunds { .. })
        ));
        assert_eq!(session.boost_index(), None);

        engine.add_currency(10);
        assert_eq!(session.use_boost(&mut engine), Ok(1));
    }

    #[test]
    fn boost_skips_letters_revealed_by_hint() {
        let mut engine = engine();
        let mut session = PuzzleSession::new(engine.catalog().puzzle("woods_01").unwrap());

        assert_eq!(session.use_hint(&mut engine).unwrap().index, 0);
        assert_eq!(session.use_boost(&mut engine), Ok(1));
        assert_eq!(engine.progress().currency, 25);
        assert_eq!(session.open_slots(), 7);
        let boosted = session.boost_index().unwrap();
        assert_eq!(session.slots("")[boosted], None);
    }

    #[test]
    fn boost_with_every_letter_filled_charges_nothing() {
        let mut engine = engine();
        engine.add_currency(1000);
        let mut puzzle = engine.catalog().puzzle("woods_02").unwrap();
        puzzle.answer = "OWL".to_string();
        puzzle.anchor_letters = vec![0, 2];
        let mut session = PuzzleSession::new(puzzle);

        assert!(session.use_hint(&mut engine).is_ok());
        let balance = engine.progress().currency;
        assert_eq!(session.use_boost(&mut engine), Err(HintError::NothingToReveal));
        assert_eq!(engine.progress().currency, balance);
        assert_eq!(session.boost_index(), None);
    }
}
