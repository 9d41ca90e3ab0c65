use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::types::Constellation;

pub fn load_constellation(path: &Path) -> Result<Constellation> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let constellation: Constellation = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("decoding {}", path.display()))?,
        _ => toml::from_str(&content).with_context(|| format!("decoding {}", path.display()))?,
    };
    Ok(constellation)
}

fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("catalog directory {} not found", dir.display());
    }

    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files = Vec::new();
    for ext in ["toml", "json"] {
        let pattern = format!("{}/*.{}", base, ext);
        files.extend(glob::glob(&pattern)?.filter_map(|entry| entry.ok()));
    }

    // File names carry a numeric prefix (01_, 02_, ...)
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Reads every constellation file in `dir`. Files that fail to decode are skipped,
/// but a catalog that decodes into an inconsistent sequence is rejected.
pub fn load_catalog(dir: &Path) -> Result<Vec<Constellation>> {
    let mut constellations: Vec<Constellation> = Vec::new();

    for path in catalog_files(dir)? {
        match load_constellation(&path) {
            Ok(constellation) => {
                if constellations.iter().any(|c| c.id == constellation.id) {
                    log::warn!(
                        "skipping {}: duplicate constellation id {}",
                        path.display(),
                        constellation.id
                    );
                    continue;
                }
                constellations.push(constellation);
            }
            Err(e) => log::warn!("skipping catalog file: {:#}", e),
        }
    }

    constellations.sort_by_key(|c| c.order);
    validate(&constellations)?;
    Ok(constellations)
}

/// Orders must run 1..=N without gaps and puzzle ids must be unique across the catalog.
pub fn validate(constellations: &[Constellation]) -> Result<()> {
    for (index, constellation) in constellations.iter().enumerate() {
        let expected = index as u32 + 1;
        if constellation.order != expected {
            bail!(
                "constellation {} has order {}, expected {}",
                constellation.id,
                constellation.order,
                expected
            );
        }
        if constellation.unlock_threshold > constellation.total_puzzles() {
            log::warn!(
                "constellation {} needs {} puzzles to unlock but only has {}",
                constellation.id,
                constellation.unlock_threshold,
                constellation.total_puzzles()
            );
        }
    }

    let mut seen = HashSet::new();
    for puzzle in constellations.iter().flat_map(|c| c.puzzles.iter()) {
        if !seen.insert(puzzle.id.as_str()) {
            bail!("puzzle id {} appears more than once", puzzle.id);
        }
    }

    Ok(())
}
