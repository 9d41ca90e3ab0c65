use super::model::PlayerProgress;
use super::storage::KeyValueStore;
use crate::puzzle::Constellation;

pub const PROGRESS_KEY: &str = "player_progress";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&PlayerProgress)>;

pub struct ProgressStore {
    progress: PlayerProgress,
    storage: Box<dyn KeyValueStore>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl ProgressStore {
    /// Restores saved progress, or starts a new player when nothing usable is stored.
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        let progress = Self::load(storage.as_ref());
        ProgressStore {
            progress,
            storage,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    fn load(storage: &dyn KeyValueStore) -> PlayerProgress {
        let raw = match storage.get(PROGRESS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("no saved progress, starting a new player");
                return PlayerProgress::new_player();
            }
            Err(e) => {
                log::error!("error reading progress: {}", e);
                return PlayerProgress::new_player();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(progress) => progress,
            Err(e) => {
                log::error!("error decoding progress, starting over: {}", e);
                PlayerProgress::new_player()
            }
        }
    }

    fn save(&mut self) {
        let json = match serde_json::to_string(&self.progress) {
            Ok(json) => json,
            Err(e) => {
                log::error!("error encoding progress: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(PROGRESS_KEY, json) {
            log::error!("error saving progress: {}", e);
        }
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.progress);
        }
    }

    /// Applies `change`, then persists and notifies once.
    pub(crate) fn update<R>(&mut self, change: impl FnOnce(&mut PlayerProgress) -> R) -> R {
        let result = change(&mut self.progress);
        self.save();
        self.notify();
        result
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&PlayerProgress) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn is_puzzle_completed(&self, puzzle_id: &str) -> bool {
        self.progress.is_puzzle_completed(puzzle_id)
    }

    pub fn is_spirit_unlocked(&self, spirit_id: &str) -> bool {
        self.progress.is_spirit_unlocked(spirit_id)
    }

    pub fn is_constellation_unlocked(&self, constellation: &Constellation) -> bool {
        self.progress.is_constellation_unlocked(constellation)
    }

    pub fn completed_puzzles_in(&self, constellation: &Constellation) -> usize {
        self.progress.completed_puzzles_in(constellation)
    }

    pub fn is_constellation_complete(&self, constellation: &Constellation) -> bool {
        self.progress.is_constellation_complete(constellation)
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.progress.can_afford(amount)
    }

    /// Deducts `amount` if the balance covers it. Never leaves the balance negative.
    pub fn spend(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            log::debug!(
                "cannot spend {} with balance {}",
                amount,
                self.progress.currency
            );
            return false;
        }
        self.update(|p| p.currency -= amount);
        true
    }

    pub fn add_currency(&mut self, amount: u32) {
        self.update(|p| p.currency = p.currency.saturating_add(amount));
    }

    pub fn use_hint(&mut self) {
        self.update(|p| p.hints_used += 1);
    }

    pub fn set_current_puzzle(&mut self, puzzle_id: Option<String>) {
        self.update(|p| p.current_puzzle = puzzle_id);
    }

    pub fn unlock_theme(&mut self, theme_id: &str) {
        self.update(|p| {
            p.unlocked_themes.insert(theme_id.to_string());
        });
    }

    pub fn unlock_soundscape(&mut self, soundscape_id: &str) {
        self.update(|p| {
            p.unlocked_soundscapes.insert(soundscape_id.to_string());
        });
    }

    pub fn unlock_spirit(&mut self, spirit_id: &str) {
        self.update(|p| {
            p.unlocked_spirits.insert(spirit_id.to_string());
        });
    }

    pub fn reset_progress(&mut self) {
        log::info!("resetting progress");
        self.update(|p| *p = PlayerProgress::new_player());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::storage::{FileStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn stored_progress(store: &FileStore) -> PlayerProgress {
        let raw = store.get(PROGRESS_KEY).unwrap().expect("progress saved");
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn opens_as_new_player_when_empty() {
        let store = ProgressStore::open(Box::new(MemoryStore::new()));
        assert_eq!(store.progress(), &PlayerProgress::new_player());
    }

    #[test]
    fn corrupt_save_falls_back_to_new_player() {
        let mut backing = MemoryStore::new();
        backing.set(PROGRESS_KEY, "{\"currency\": -5".into()).unwrap();
        let store = ProgressStore::open(Box::new(backing));
        assert_eq!(store.progress(), &PlayerProgress::new_player());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let dir = TempDir::new().unwrap();
        let file = FileStore::new(dir.path().join("save.json"));
        let mut store = ProgressStore::open(Box::new(file.clone()));

        store.add_currency(15);
        assert_eq!(stored_progress(&file).currency, 115);

        store.use_hint();
        store.unlock_theme("aurora");
        store.unlock_soundscape("rainfall");
        store.unlock_spirit("spirit_owl");
        store.set_current_puzzle(Some("woods_03".into()));

        let saved = stored_progress(&file);
        assert_eq!(saved.hints_used, 1);
        assert!(saved.unlocked_themes.contains("aurora"));
        assert!(saved.unlocked_soundscapes.contains("rainfall"));
        assert!(saved.unlocked_spirits.contains("spirit_owl"));
        assert_eq!(saved.current_puzzle.as_deref(), Some("woods_03"));

        let reopened = ProgressStore::open(Box::new(file));
        assert_eq!(reopened.progress(), store.progress());
    }

    #[test]
    fn spend_rejects_overdraft() {
        let mut store = ProgressStore::open(Box::new(MemoryStore::new()));
        assert!(!store.spend(101));
        assert_eq!(store.progress().currency, 100);

        assert!(store.spend(40));
        assert_eq!(store.progress().currency, 60);
        assert!(store.spend(60));
        assert_eq!(store.progress().currency, 0);
        assert!(!store.spend(1));
        assert!(store.spend(0));
    }

    #[test]
    fn reset_restores_new_player() {
        let mut store = ProgressStore::open(Box::new(MemoryStore::new()));
        store.add_currency(500);
        store.unlock_spirit("spirit_fox");
        store.reset_progress();
        assert_eq!(store.progress(), &PlayerProgress::new_player());
    }

    #[test]
    fn observers_see_each_change_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ProgressStore::open(Box::new(MemoryStore::new()));

        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |p| sink.borrow_mut().push(p.currency));

        store.add_currency(5);
        assert!(store.spend(50));
        assert!(!store.spend(1000));
        assert_eq!(*seen.borrow(), vec![105, 55]);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.add_currency(1);
        assert_eq!(seen.borrow().len(), 2);
    }
}
