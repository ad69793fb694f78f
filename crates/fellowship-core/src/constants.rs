/// IANA zone every program time is anchored to unless configured otherwise.
pub const DEFAULT_TIMEZONE: &str = "Africa/Lagos";

/// Months past the series start that a recurring program is projected over.
pub const DEFAULT_PROJECTION_MONTHS: u32 = 3;

/// Upper bound on occurrences produced by one expansion (ten years of weekly events).
pub const DEFAULT_MAX_OCCURRENCES: u16 = 520;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Prefix for environment overrides, e.g. `FELLOWSHIP_SCHEDULE__TIMEZONE`.
pub const ENV_PREFIX: &str = "FELLOWSHIP";
