//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default sampling mode
pub const DEFAULT_MODE: &str = "circle";

/// Default max resolution amount (resolution-0 cells get this + 1 points)
pub const DEFAULT_MAX_AMOUNT: i64 = 7;

/// Default annotation export path
pub const DEFAULT_ANNOTATIONS: &str = "annotations.csv";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Default output format
pub const DEFAULT_FORMAT: &str = "csv";

/// Default sample count for the `check` command
pub const DEFAULT_CHECK_SAMPLES: usize = 10_000;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "pseudo-points";
