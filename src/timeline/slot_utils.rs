use crate::config::TimelineConfig;
use crate::error::LayoutError;
use super::types::{HourRow, TimeOfDay};

/// Parses a time string (HH:MM) into a validated time of day
pub fn parse_time_of_day(time_str: &str) -> Result<TimeOfDay, LayoutError> {
    let invalid = || LayoutError::InvalidTimeFormat(time_str.trim().to_string());

    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 || parts[1].len() != 2 || parts[0].is_empty() || parts[0].len() > 2 {
        return Err(invalid());
    }
    if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
        return Err(invalid());
    }
    let hours: u32 = parts[0].parse().map_err(|_| invalid())?;
    let minutes: u32 = parts[1].parse().map_err(|_| invalid())?;
    TimeOfDay::new(hours, minutes).map_err(|_| invalid())
}

/// Twelve-hour label for an hour row, e.g. "12:00 AM" or "3:00 PM"
pub fn format_hour(hour: u8) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", display_hour, suffix)
}

/// One row per hour from `day_start_hour` through `day_end_hour`
pub fn hour_rows(config: &TimelineConfig) -> Vec<HourRow> {
    (config.day_start_hour..=config.day_end_hour)
        .map(|hour| HourRow {
            hour,
            label: format_hour(hour),
            top_offset: (hour - config.day_start_hour) as f64 * config.pixels_per_hour,
        })
        .collect()
}

/// Maps a click at pixel `y` back to the enclosing whole hour.
///
/// Clicks above the first row or below the last one land on the first or
/// last hour respectively. The result is always a real hour of the day, even
/// for a config that fails [`TimelineConfig::validate`].
pub fn slot_time_at(y: f64, config: &TimelineConfig) -> TimeOfDay {
    let rows_down = if y.is_finite() && y > 0.0 && config.pixels_per_hour > 0.0 {
        (y / config.pixels_per_hour).floor()
    } else {
        0.0
    };
    let first = config.day_start_hour.min(23);
    let last_row = config.day_end_hour.min(23).saturating_sub(first) as f64;
    let hour = first + rows_down.min(last_row) as u8;
    TimeOfDay { hour, minute: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_digit_times() {
        assert_eq!(parse_time_of_day("09:30").unwrap(), TimeOfDay { hour: 9, minute: 30 });
        assert_eq!(parse_time_of_day(" 23:59 ").unwrap(), TimeOfDay { hour: 23, minute: 59 });
        assert_eq!(parse_time_of_day("7:05").unwrap(), TimeOfDay { hour: 7, minute: 5 });
    }

    #[test]
    fn rejects_malformed_times_without_clamping() {
        for bad in ["24:00", "12:60", "9", "09:5", "ab:cd", "09:30:00", "", "-1:30", "+9:30"] {
            assert_eq!(
                parse_time_of_day(bad),
                Err(LayoutError::InvalidTimeFormat(bad.trim().to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn formats_twelve_hour_labels() {
        assert_eq!(format_hour(0), "12:00 AM");
        assert_eq!(format_hour(9), "9:00 AM");
        assert_eq!(format_hour(12), "12:00 PM");
        assert_eq!(format_hour(23), "11:00 PM");
    }

    #[test]
    fn hour_rows_cover_the_configured_day() {
        let rows = hour_rows(&TimelineConfig::default());
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].label, "12:00 AM");
        assert_eq!(rows[23].top_offset, 23.0 * 60.0);

        let config = TimelineConfig { day_start_hour: 8, day_end_hour: 17, ..Default::default() };
        let rows = hour_rows(&config);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].top_offset, 0.0);
        assert_eq!(rows[1].hour, 9);
    }

    #[test]
    fn slot_click_rounds_down_to_hour() {
        let config = TimelineConfig::default();
        assert_eq!(slot_time_at(0.0, &config), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(slot_time_at(59.9, &config), TimeOfDay { hour: 0, minute: 0 });
        assert_eq!(slot_time_at(600.0, &config), TimeOfDay { hour: 10, minute: 0 });
        assert_eq!(slot_time_at(629.0, &config), TimeOfDay { hour: 10, minute: 0 });
    }

    #[test]
    fn slot_click_stays_inside_the_day() {
        let config = TimelineConfig { day_start_hour: 8, day_end_hour: 17, ..Default::default() };
        assert_eq!(slot_time_at(-20.0, &config).hour, 8);
        assert_eq!(slot_time_at(90.0, &config).hour, 9);
        assert_eq!(slot_time_at(10_000.0, &config).hour, 17);
        assert_eq!(slot_time_at(f64::NAN, &config).hour, 8);
    }

    #[test]
    fn slot_click_survives_unchecked_config() {
        let inverted = TimelineConfig { day_start_hour: 18, day_end_hour: 8, ..Default::default() };
        assert_eq!(slot_time_at(500.0, &inverted), TimeOfDay { hour: 18, minute: 0 });

        let past_midnight = TimelineConfig { day_end_hour: 30, ..Default::default() };
        let time = slot_time_at(1740.0, &past_midnight);
        assert_eq!(time, TimeOfDay { hour: 23, minute: 0 });
        assert_eq!(time.validate(), Ok(()));
    }
}
