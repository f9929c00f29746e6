use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// All gameplay tunables. Positions and speeds live in the 800x600 logical
/// space the render description uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub bank: String,
    pub fall_speed: f32,
    pub top_y: f32,
    pub floor_y: f32,
    pub target_score: u32,
    pub words_per_level: u32,
    pub milestones: Vec<u32>,
    pub backspace_delay_ms: u64,
    pub backspace_interval_ms: u64,
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bank: "classic".to_string(),
            fall_speed: 1.5,
            top_y: 20.0,
            floor_y: 580.0,
            target_score: 100,
            words_per_level: 10,
            milestones: vec![20, 40, 60, 80],
            backspace_delay_ms: 500,
            backspace_interval_ms: 50,
            ticks_per_second: 60,
        }
    }
}

impl GameConfig {
    /// Rejects configurations that would corrupt a session mid-loop. Runs
    /// at construction time, before the first tick.
    pub fn validate(&self) -> Result<()> {
        if self.target_score == 0 {
            bail!("target_score must be at least 1");
        }
        if self.words_per_level == 0 {
            bail!("words_per_level must be at least 1");
        }
        if self.fall_speed <= 0.0 {
            bail!("fall_speed must be positive");
        }
        if self.ticks_per_second == 0 {
            bail!("ticks_per_second must be positive");
        }
        if self.backspace_delay_ms == 0 || self.backspace_interval_ms == 0 {
            bail!("backspace timings must be positive");
        }
        if self.floor_y <= self.top_y {
            bail!("floor_y must be below top_y");
        }
        if self.milestones.windows(2).any(|w| w[0] >= w[1]) {
            bail!("milestones must be strictly ascending");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.ticks_per_second))
    }

    pub fn backspace_delay(&self) -> Duration {
        Duration::from_millis(self.backspace_delay_ms)
    }

    pub fn backspace_interval(&self) -> Duration {
        Duration::from_millis(self.backspace_interval_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "typefall") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("typefall_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<GameConfig>(&bytes) {
                return cfg;
            }
        }
        GameConfig::default()
    }

    fn save(&self, cfg: &GameConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = GameConfig::default();

        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.bank, "classic");
        assert_eq!(cfg.target_score, 100);
        assert_eq!(cfg.milestones, vec![20, 40, 60, 80]);
    }

    #[test]
    fn test_tick_interval_for_sixty_fps() {
        let cfg = GameConfig::default();

        assert_eq!(cfg.tick_interval(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_zero_target_rejected() {
        let cfg = GameConfig {
            target_score: 0,
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_words_per_level_rejected() {
        let cfg = GameConfig {
            words_per_level: 0,
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_nonpositive_fall_speed_rejected() {
        let cfg = GameConfig {
            fall_speed: 0.0,
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let cfg = GameConfig {
            ticks_per_second: 0,
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_floor_above_top_rejected() {
        let cfg = GameConfig {
            top_y: 580.0,
            floor_y: 20.0,
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_unsorted_milestones_rejected() {
        let cfg = GameConfig {
            milestones: vec![40, 20],
            ..Default::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_milestones_allowed() {
        let cfg = GameConfig {
            milestones: vec![],
            ..Default::default()
        };

        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = GameConfig::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = GameConfig {
            bank: "meadow".into(),
            fall_speed: 2.5,
            target_score: 50,
            milestones: vec![10, 30],
            ..Default::default()
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));

        assert!(!store.exists());
        assert_eq!(store.load(), GameConfig::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_eq!(store.load(), GameConfig::default());
    }
}
