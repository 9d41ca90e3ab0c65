use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Economy {
    /// Awarded once when a constellation's unlock threshold is first reached.
    pub constellation_bonus: u32,
    pub reveal_letter_cost: u32,
    pub boost_cost: u32,
    pub unlock_all_currency: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Economy {
            constellation_bonus: 100,
            reveal_letter_cost: 25,
            boost_cost: 50,
            unlock_all_currency: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_dir: PathBuf,
    pub save_path: PathBuf,
    pub economy: Economy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_dir: PathBuf::from("content/constellations"),
            save_path: PathBuf::from("puzzlore_save.json"),
            economy: Economy::default(),
        }
    }
}

impl Config {
    /// Missing file means defaults; a file that exists must parse.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("puzzlore.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.economy.reveal_letter_cost, 25);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("puzzlore.toml");
        std::fs::write(
            &path,
            "save_path = \"/tmp/save.json\"\n\n[economy]\nboost_cost = 75\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.save_path, PathBuf::from("/tmp/save.json"));
        assert_eq!(config.catalog_dir, PathBuf::from("content/constellations"));
        assert_eq!(config.economy.boost_cost, 75);
        assert_eq!(config.economy.constellation_bonus, 100);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("puzzlore.toml");
        std::fs::write(&path, "economy = 3").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
