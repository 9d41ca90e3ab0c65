pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::Catalog;
pub use loader::{load_catalog, load_constellation};
pub use types::{Constellation, LogicType, Puzzle, PuzzleExplanation, Spirit, SpiritRarity, StarPosition};
