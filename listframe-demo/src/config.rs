use std::env;
use std::path::PathBuf;
use std::time::Duration;

use simplelog::LevelFilter;

/// Demo settings, read from the environment.
///
/// - `LISTFRAME_LOG`: log level (`off`, `error`, ... `trace`), default `debug`
/// - `LISTFRAME_LOG_FILE`: log path, default `listframe-demo.log`
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Longest wait for input before timers and redraw get a turn.
    pub poll_interval: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("listframe-demo.log"),
            log_level: LevelFilter::Debug,
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = env::var("LISTFRAME_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }
        if let Ok(level) = env::var("LISTFRAME_LOG") {
            match level.parse() {
                Ok(level) => config.log_level = level,
                Err(_) => eprintln!("ignoring LISTFRAME_LOG={level:?}: not a log level"),
            }
        }
        config
    }
}
