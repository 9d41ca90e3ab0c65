use std::rc::Rc;

use crate::config::Economy;
use crate::progress::{ObserverId, PlayerProgress, ProgressStore};
use crate::puzzle::{Catalog, Constellation, Puzzle};

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    PuzzleCompleted { puzzle_id: String, reward: u32 },
    ConstellationUnlocked(Rc<Constellation>),
    ConstellationCompleted(Rc<Constellation>),
}

/// What a single `complete_puzzle` call changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOutcome {
    /// False when the puzzle had already been solved and nothing changed.
    pub newly_completed: bool,
    pub reward: u32,
    pub bonus: u32,
    pub unlocked: Option<Rc<Constellation>>,
    pub rewarded: Option<Rc<Constellation>>,
}

type EventObserver = Box<dyn FnMut(&ProgressEvent)>;

pub struct ProgressionEngine {
    catalog: Rc<Catalog>,
    store: ProgressStore,
    economy: Economy,
    pending_unlock: Option<Rc<Constellation>>,
    pending_reward: Option<Rc<Constellation>>,
    event_observers: Vec<EventObserver>,
}

impl ProgressionEngine {
    pub fn new(catalog: Rc<Catalog>, store: ProgressStore, economy: Economy) -> Self {
        ProgressionEngine {
            catalog,
            store,
            economy,
            pending_unlock: None,
            pending_reward: None,
            event_observers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn progress(&self) -> &PlayerProgress {
        self.store.progress()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&PlayerProgress) + 'static) -> ObserverId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn subscribe_events(&mut self, observer: impl FnMut(&ProgressEvent) + 'static) {
        self.event_observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: ProgressEvent) {
        for observer in self.event_observers.iter_mut() {
            observer(&event);
        }
    }

    pub fn complete_puzzle(&mut self, puzzle: &Puzzle) -> CompletionOutcome {
        if self.store.is_puzzle_completed(&puzzle.id) {
            return CompletionOutcome::default();
        }

        let reward = puzzle.moonstone_reward();
        let bonus_amount = self.economy.constellation_bonus;
        let constellation = self.catalog.constellation_containing(&puzzle.id);
        if constellation.is_none() {
            log::warn!("puzzle {} is not part of any constellation", puzzle.id);
        }

        let (bonus, unlocked, rewarded) = self.store.update(|p| {
            p.completed_puzzles.insert(puzzle.id.clone());
            p.total_puzzles_solved += 1;
            p.currency = p.currency.saturating_add(reward);

            let Some(constellation) = constellation.as_ref() else {
                return (0, false, false);
            };
            // Both triggers fire only on the solve that lands exactly on the count
            let completed = p.completed_puzzles_in(constellation);

            let mut bonus = 0;
            let mut unlocked = false;
            if completed == constellation.unlock_threshold
                && p.current_constellation_order <= constellation.order
            {
                bonus = bonus_amount;
                p.currency = p.currency.saturating_add(bonus);
                p.current_constellation_order =
                    p.current_constellation_order.max(constellation.order + 1);
                unlocked = true;
            }

            let mut rewarded = false;
            if completed == constellation.total_puzzles() {
                if let Some(spirit) = &constellation.spirit_reward {
                    rewarded = p.unlocked_spirits.insert(spirit.id.clone());
                }
            }

            (bonus, unlocked, rewarded)
        });

        log::info!("completed puzzle {} (+{})", puzzle.id, reward);
        let mut outcome = CompletionOutcome {
            newly_completed: true,
            reward,
            bonus,
            ..Default::default()
        };
        self.emit(ProgressEvent::PuzzleCompleted {
            puzzle_id: puzzle.id.clone(),
            reward,
        });

        if let Some(constellation) = constellation {
            if unlocked {
                log::info!(
                    "constellation {} reached its threshold, order {} unlocked",
                    constellation.id,
                    constellation.order + 1
                );
                self.pending_unlock = Some(Rc::clone(&constellation));
                outcome.unlocked = Some(Rc::clone(&constellation));
                self.emit(ProgressEvent::ConstellationUnlocked(Rc::clone(&constellation)));
            }
            if rewarded {
                log::info!("constellation {} fully completed", constellation.id);
                self.pending_reward = Some(Rc::clone(&constellation));
                outcome.rewarded = Some(Rc::clone(&constellation));
                self.emit(ProgressEvent::ConstellationCompleted(constellation));
            }
        }

        outcome
    }

    /// The constellation whose threshold was just reached, awaiting its unlock screen.
    pub fn pending_unlock(&self) -> Option<&Rc<Constellation>> {
        self.pending_unlock.as_ref()
    }

    /// The constellation just fully completed, awaiting its spirit reveal.
    /// Present this before any pending unlock.
    pub fn pending_reward(&self) -> Option<&Rc<Constellation>> {
        self.pending_reward.as_ref()
    }

    pub fn clear_pending_unlock(&mut self) {
        self.pending_unlock = None;
    }

    pub fn clear_pending_reward(&mut self) {
        self.pending_reward = None;
    }

    pub fn is_constellation_unlocked(&self, constellation: &Constellation) -> bool {
        self.store.is_constellation_unlocked(constellation)
    }

    /// Every puzzle in an unlocked constellation is playable, in any order.
    pub fn is_puzzle_available(&self, puzzle: &Puzzle) -> bool {
        match self.catalog.constellation_containing(&puzzle.id) {
            Some(constellation) => self.store.is_constellation_unlocked(&constellation),
            None => false,
        }
    }

    pub fn next_puzzle(&self) -> Option<(Puzzle, Rc<Constellation>)> {
        self.catalog
            .next_uncompleted_puzzle(&self.progress().completed_puzzles)
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.store.can_afford(amount)
    }

    pub fn spend(&mut self, amount: u32) -> bool {
        self.store.spend(amount)
    }

    pub fn add_currency(&mut self, amount: u32) {
        self.store.add_currency(amount);
    }

    pub fn record_hint(&mut self) {
        self.store.use_hint();
    }

    pub fn set_current_puzzle(&mut self, puzzle_id: Option<String>) {
        self.store.set_current_puzzle(puzzle_id);
    }

    pub fn unlock_theme(&mut self, theme_id: &str) {
        self.store.unlock_theme(theme_id);
    }

    pub fn unlock_soundscape(&mut self, soundscape_id: &str) {
        self.store.unlock_soundscape(soundscape_id);
    }

    pub fn unlock_spirit(&mut self, spirit_id: &str) {
        self.store.unlock_spirit(spirit_id);
    }

    pub fn reset_progress(&mut self) {
        self.pending_unlock = None;
        self.pending_reward = None;
        self.store.reset_progress();
    }

    /// Opens every constellation and tops up currency. For testing content.
    pub fn unlock_all_content(&mut self) {
        let last_order = self
            .catalog
            .load_constellations()
            .last()
            .map(|c| c.order);
        let currency = self.economy.unlock_all_currency;
        self.store.update(|p| {
            if let Some(order) = last_order {
                p.current_constellation_order = p.current_constellation_order.max(order);
            }
            p.currency = currency;
        });
    }
}
