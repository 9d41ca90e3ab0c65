use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::rc::Rc;

use super::loader;
use super::types::{Constellation, Puzzle};

enum Source {
    Directory(PathBuf),
    Embedded(Vec<Constellation>),
}

struct CatalogIndex {
    constellations: Vec<Rc<Constellation>>,
    // puzzle id -> (constellation index, puzzle index)
    by_puzzle: HashMap<String, (usize, usize)>,
}

impl CatalogIndex {
    fn build(constellations: Vec<Constellation>) -> Self {
        let constellations: Vec<Rc<Constellation>> =
            constellations.into_iter().map(Rc::new).collect();

        let mut by_puzzle = HashMap::new();
        for (ci, constellation) in constellations.iter().enumerate() {
            for (pi, puzzle) in constellation.puzzles.iter().enumerate() {
                by_puzzle.insert(puzzle.id.clone(), (ci, pi));
            }
        }

        CatalogIndex {
            constellations,
            by_puzzle,
        }
    }
}

pub struct Catalog {
    source: Source,
    cache: RefCell<Option<Rc<CatalogIndex>>>,
}

impl Catalog {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Catalog {
            source: Source::Directory(dir.into()),
            cache: RefCell::new(None),
        }
    }

    pub fn from_constellations(constellations: Vec<Constellation>) -> Self {
        Catalog {
            source: Source::Embedded(constellations),
            cache: RefCell::new(None),
        }
    }

    fn read_source(&self) -> Vec<Constellation> {
        let result = match &self.source {
            Source::Directory(dir) => loader::load_catalog(dir),
            Source::Embedded(constellations) => {
                let mut sorted = constellations.clone();
                sorted.sort_by_key(|c| c.order);
                loader::validate(&sorted).map(|_| sorted)
            }
        };

        match result {
            Ok(constellations) => {
                log::info!("loaded {} constellations", constellations.len());
                constellations
            }
            Err(e) => {
                log::error!("catalog unavailable: {:#}", e);
                Vec::new()
            }
        }
    }

    fn index(&self) -> Rc<CatalogIndex> {
        if let Some(index) = self.cache.borrow().as_ref() {
            return Rc::clone(index);
        }

        let index = Rc::new(CatalogIndex::build(self.read_source()));
        *self.cache.borrow_mut() = Some(Rc::clone(&index));
        index
    }

    /// All constellations by ascending order. Empty when content is missing or invalid.
    pub fn load_constellations(&self) -> Vec<Rc<Constellation>> {
        self.index().constellations.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.index().constellations.is_empty()
    }

    pub fn constellation(&self, id: &str) -> Option<Rc<Constellation>> {
        self.index()
            .constellations
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn constellation_at_order(&self, order: u32) -> Option<Rc<Constellation>> {
        self.index()
            .constellations
            .iter()
            .find(|c| c.order == order)
            .cloned()
    }

    pub fn constellation_containing(&self, puzzle_id: &str) -> Option<Rc<Constellation>> {
        let index = self.index();
        index
            .by_puzzle
            .get(puzzle_id)
            .map(|&(ci, _)| Rc::clone(&index.constellations[ci]))
    }

    pub fn puzzle(&self, puzzle_id: &str) -> Option<Puzzle> {
        let index = self.index();
        index
            .by_puzzle
            .get(puzzle_id)
            .map(|&(ci, pi)| index.constellations[ci].puzzles[pi].clone())
    }

    pub fn puzzles_in(&self, constellation_id: &str) -> Vec<Puzzle> {
        self.constellation(constellation_id)
            .map(|c| c.puzzles.clone())
            .unwrap_or_default()
    }

    pub fn all_puzzles(&self) -> Vec<Puzzle> {
        self.index()
            .constellations
            .iter()
            .flat_map(|c| c.puzzles.iter().cloned())
            .collect()
    }

    /// First puzzle not in `completed`, scanning constellations in order.
    pub fn next_uncompleted_puzzle(
        &self,
        completed: &BTreeSet<String>,
    ) -> Option<(Puzzle, Rc<Constellation>)> {
        self.index().constellations.iter().find_map(|constellation| {
            constellation
                .puzzles
                .iter()
                .find(|p| !completed.contains(&p.id))
                .map(|p| (p.clone(), Rc::clone(constellation)))
        })
    }

    pub fn effective_background<'a>(
        &self,
        puzzle: &'a Puzzle,
        constellation: &'a Constellation,
    ) -> &'a str {
        puzzle
            .background
            .as_deref()
            .unwrap_or(&constellation.background)
    }

    /// Drops the cached constellations and index; the next query reloads.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::types::fixtures;

    fn catalog() -> Catalog {
        Catalog::from_constellations(vec![
            fixtures::constellation("tides", 2, 3, 2),
            fixtures::constellation("woods", 1, 4, 3),
        ])
    }

    #[test]
    fn constellations_sorted_by_order() {
        let catalog = catalog();
        let ids: Vec<_> = catalog
            .load_constellations()
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(ids, vec!["woods", "tides"]);
        assert_eq!(catalog.constellation_at_order(2).unwrap().id, "tides");
        assert!(catalog.constellation_at_order(3).is_none());
    }

    #[test]
    fn puzzle_lookup_uses_index() {
        let catalog = catalog();
        assert_eq!(catalog.puzzle("tides_02").unwrap().id, "tides_02");
        assert_eq!(catalog.constellation_containing("woods_04").unwrap().id, "woods");
        assert!(catalog.puzzle("moon_01").is_none());
        assert!(catalog.constellation_containing("moon_01").is_none());
        assert_eq!(catalog.puzzles_in("tides").len(), 3);
        assert_eq!(catalog.all_puzzles().len(), 7);
    }

    #[test]
    fn next_uncompleted_scans_in_order() {
        let catalog = catalog();
        let mut completed = BTreeSet::new();
        let (puzzle, constellation) = catalog.next_uncompleted_puzzle(&completed).unwrap();
        assert_eq!((puzzle.id.as_str(), constellation.id.as_str()), ("woods_01", "woods"));

        for p in catalog.puzzles_in("woods") {
            completed.insert(p.id);
        }
        completed.insert("tides_01".to_string());
        let (puzzle, _) = catalog.next_uncompleted_puzzle(&completed).unwrap();
        assert_eq!(puzzle.id, "tides_02");

        for p in catalog.all_puzzles() {
            completed.insert(p.id);
        }
        assert!(catalog.next_uncompleted_puzzle(&completed).is_none());
    }

    #[test]
    fn invalid_catalog_degrades_to_empty() {
        let catalog = Catalog::from_constellations(vec![
            fixtures::constellation("woods", 1, 2, 2),
            fixtures::constellation("moon", 3, 2, 2),
        ]);
        assert!(catalog.is_empty());
        assert!(catalog.puzzle("woods_01").is_none());

        let missing = Catalog::from_dir("/definitely/not/here");
        assert!(missing.load_constellations().is_empty());
    }

    #[test]
    fn background_override() {
        let catalog = catalog();
        let woods = catalog.constellation("woods").unwrap();
        let mut puzzle = woods.puzzles[0].clone();
        assert_eq!(catalog.effective_background(&puzzle, &woods), "woods_bg");
        puzzle.background = Some("glade".to_string());
        assert_eq!(catalog.effective_background(&puzzle, &woods), "glade");
    }

    #[test]
    fn clear_cache_reloads() {
        let catalog = catalog();
        let first = catalog.load_constellations();
        catalog.clear_cache();
        let second = catalog.load_constellations();
        assert!(!Rc::ptr_eq(&first[0], &second[0]));
        assert_eq!(first[0].id, second[0].id);
    }

    #[test]
    fn bundled_content_is_consistent() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("content/constellations");
        let catalog = Catalog::from_dir(dir);
        let constellations = catalog.load_constellations();
        assert_eq!(constellations.len(), 2);
        for constellation in &constellations {
            assert!(constellation.unlock_threshold <= constellation.total_puzzles());
            assert!(constellation.spirit_reward.is_some());
            for puzzle in &constellation.puzzles {
                assert_eq!(puzzle.letters.concat(), puzzle.answer);
                assert!(puzzle.anchor_letters.iter().all(|&i| i < puzzle.answer.len()));
            }
        }
    }
}
