use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Fixed rendering constants for the day timeline.
///
/// These are not per-call options. Callers build one config (usually
/// `TimelineConfig::default()` or `TimelineConfig::from_env()`) and reuse it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineConfig {
    /// First hour drawn on the timeline (0 = midnight).
    pub day_start_hour: u8,
    /// Last hour row drawn on the timeline, inclusive.
    pub day_end_hour: u8,
    pub pixels_per_hour: f64,
    /// Render floor so short appointments stay clickable.
    pub min_block_height: f64,
    /// Horizontal gap between adjacent columns, in pixels.
    pub column_gap: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 0,
            day_end_hour: 23,
            pixels_per_hour: 60.0,
            min_block_height: 30.0,
            column_gap: 4.0,
        }
    }
}

impl TimelineConfig {
    /// Defaults overridden by `TIMELINE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Checks that the hour range fits in one day and the scale is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.day_start_hour > 23 || self.day_end_hour > 23 || self.day_start_hour > self.day_end_hour {
            return Err(ConfigError::HourRange {
                start: self.day_start_hour,
                end: self.day_end_hour,
            });
        }
        if self.pixels_per_hour.is_nan() || self.pixels_per_hour <= 0.0 {
            return Err(ConfigError::PixelsPerHour(self.pixels_per_hour));
        }
        Ok(())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        override_from(&lookup, "TIMELINE_DAY_START_HOUR", &mut config.day_start_hour);
        override_from(&lookup, "TIMELINE_DAY_END_HOUR", &mut config.day_end_hour);
        override_from(&lookup, "TIMELINE_PIXELS_PER_HOUR", &mut config.pixels_per_hour);
        override_from(&lookup, "TIMELINE_MIN_BLOCK_HEIGHT", &mut config.min_block_height);
        override_from(&lookup, "TIMELINE_COLUMN_GAP", &mut config.column_gap);

        let defaults = Self::default();
        while let Err(err) = config.validate() {
            warn!(%err, "ignoring invalid timeline setting");
            match err {
                ConfigError::HourRange { .. } => {
                    config.day_start_hour = defaults.day_start_hour;
                    config.day_end_hour = defaults.day_end_hour;
                }
                ConfigError::PixelsPerHour(_) => config.pixels_per_hour = defaults.pixels_per_hour,
            }
        }
        config
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => warn!(key, value = %raw, "ignoring unparsable timeline setting"),
    }
}

/// Admin password for the upload endpoint, from `ADMIN_PASSWORD`.
pub fn admin_password_from_env() -> String {
    match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => {
            warn!("ADMIN_PASSWORD not set, using the default password");
            DEFAULT_ADMIN_PASSWORD.to_string()
        }
    }
}
