//! Sequencer settings
//!
//! Layered from an optional TOML file and `CADENCE_*` environment variables.

use crate::error::{Result, SequencerError};
use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix (`CADENCE_SHUFFLE`, `CADENCE_REPEAT`, ...)
pub const ENV_PREFIX: &str = "CADENCE";

/// Default elapsed time after which "previous" restarts the current track
pub const DEFAULT_RESTART_THRESHOLD_MS: u64 = 3000;

/// Configuration for a playback sequencer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial repeat mode (default: None)
    pub repeat: RepeatMode,

    /// Restart the current track on "previous" once this much has played
    /// (default: 3000ms, `None` disables)
    pub restart_threshold_ms: Option<u64>,

    /// Seed for shuffle selection; random when unset
    pub seed: Option<u64>,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat: RepeatMode::None,
            restart_threshold_ms: Some(DEFAULT_RESTART_THRESHOLD_MS),
            seed: None,
        }
    }
}

impl SequencerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables (prefixed with `CADENCE_`) override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(false));
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| SequencerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| SequencerError::Config(e.to_string()))
    }

    /// Restart threshold as a duration
    pub fn restart_threshold(&self) -> Option<Duration> {
        self.restart_threshold_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Loading reads every CADENCE_* variable; tests that load take this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sets environment variables for the life of the guard
    struct ScopedEnv(Vec<&'static str>);

    impl ScopedEnv {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
            Self(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for key in &self.0 {
                std::env::remove_var(key);
            }
        }
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config() {
        let config = SequencerConfig::default();
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::None);
        assert_eq!(config.restart_threshold(), Some(Duration::from_secs(3)));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn loads_values_from_file() {
        let file = write_config(
            r#"
shuffle = true
repeat = "all"
restart_threshold_ms = 5000
seed = 7
"#,
        );

        let _lock = env_lock();
        let config = SequencerConfig::load(Some(file.path())).unwrap();
        assert!(config.shuffle);
        assert_eq!(config.repeat, RepeatMode::All);
        assert_eq!(config.restart_threshold(), Some(Duration::from_secs(5)));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let file = write_config("repeat = \"one\"\n");

        let _lock = env_lock();
        let config = SequencerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.repeat, RepeatMode::One);
        assert!(!config.shuffle);
        assert_eq!(
            config.restart_threshold_ms,
            Some(DEFAULT_RESTART_THRESHOLD_MS)
        );
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let _lock = env_lock();
        let config = SequencerConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.repeat, RepeatMode::None);
    }

    #[test]
    fn invalid_repeat_mode_is_config_error() {
        let file = write_config("repeat = \"sometimes\"\n");

        let _lock = env_lock();
        let err = SequencerConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SequencerError::Config(_)));
    }

    #[test]
    fn environment_overrides_file() {
        let file = write_config(
            r#"
shuffle = true
repeat = "one"
restart_threshold_ms = 5000
"#,
        );

        let _lock = env_lock();
        let _env = ScopedEnv::set(&[
            ("CADENCE_REPEAT", "all"),
            ("CADENCE_RESTART_THRESHOLD_MS", "1000"),
        ]);

        let config = SequencerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.repeat, RepeatMode::All);
        assert_eq!(config.restart_threshold_ms, Some(1000));
        // Keys absent from the environment still come from the file
        assert!(config.shuffle);
    }

    #[test]
    fn environment_alone_is_enough() {
        let _lock = env_lock();
        let _env = ScopedEnv::set(&[("CADENCE_SHUFFLE", "true"), ("CADENCE_SEED", "99")]);

        let config = SequencerConfig::load(None).unwrap();
        assert!(config.shuffle);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.repeat, RepeatMode::None);
    }
}
