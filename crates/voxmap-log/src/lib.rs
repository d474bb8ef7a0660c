//! Structured logging for the voxel map editor.
//!
//! Console output with uptime and module paths, plus a JSON log file in debug builds.
//! The level comes from `RUST_LOG` when set, otherwise from the config's
//! `debug.log_level`.

use std::path::{Path, PathBuf};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voxmap_config::Config;

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "voxmap.log";

const DEFAULT_FILTER: &str = "info";

/// Filter directives for `config`, falling back to [`DEFAULT_FILTER`] when the config is
/// absent or its level is blank.
pub fn filter_directives(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initialize the global tracing subscriber.
///
/// # Arguments
///
/// * `log_dir` - Directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether to write the JSON log file
/// * `config` - Configuration supplying the log level
///
/// Returns the path of the JSON log file when one was opened. Calling this a second time
/// in the same process leaves the first subscriber in place.
///
/// ```no_run
/// use voxmap_config::Config;
/// use voxmap_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let directives = filter_directives(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        return subscriber
            .with(file_layer)
            .try_init()
            .ok()
            .map(|()| log_dir.join(LOG_FILE_NAME));
    }

    let _ = subscriber.try_init();
    None
}

/// The default `info` filter.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert_eq!(format!("{}", filter), "info");
    }

    #[test]
    fn test_directives_follow_config() {
        let mut config = Config::default();
        assert_eq!(filter_directives(Some(&config)), "info");

        config.debug.log_level = "debug,voxmap_tools=trace".to_string();
        assert_eq!(filter_directives(Some(&config)), "debug,voxmap_tools=trace");

        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_directives(Some(&config)), "info");
        assert_eq!(filter_directives(None), "info");
    }

    #[test]
    fn test_env_filter_parsing() {
        for filter_str in ["info", "debug,voxmap_render=trace", "warn,voxmap_tools=debug"] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {}",
                filter_str
            );
        }
    }

    #[test]
    fn test_release_build_writes_no_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = init_logging(Some(temp_dir.path()), false, None);
        assert!(path.is_none());
        assert!(!temp_dir.path().join(LOG_FILE_NAME).exists());
    }
}
