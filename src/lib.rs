pub mod config;
pub mod engine;
pub mod progress;
pub mod puzzle;
pub mod session;
pub mod settings;

pub use config::{Config, Economy};
pub use engine::{CompletionOutcome, ProgressEvent, ProgressionEngine};
pub use progress::{FileStore, KeyValueStore, MemoryStore, PlayerProgress, ProgressStore};
pub use puzzle::{Catalog, Constellation, Puzzle, Spirit, SpiritRarity};
pub use session::{AnswerResult, HintError, LetterReveal, PuzzleSession};
pub use settings::{Preference, Settings};
