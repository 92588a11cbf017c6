//! Pixel geometry for the day timeline.
//!
//! Vertical placement depends only on start time, duration and the
//! configured scale. Horizontal placement depends only on the column slot.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::config::TimelineConfig;
use super::types::{Appointment, BlockDetail, ColumnSlot, HorizontalBounds, Position};

/// Blocks taller than this show the time and duration line.
const TIME_LINE_MIN_HEIGHT: f64 = 40.0;
/// Blocks taller than this also show the visit reason.
const REASON_LINE_MIN_HEIGHT: f64 = 60.0;

/// Top offset and rendered height of an appointment block.
///
/// Appointments starting before `day_start_hour` get a negative offset.
pub fn position(appointment: &Appointment, config: &TimelineConfig) -> Position {
    let minutes_since_day_start = (appointment.start.hour as i64 - config.day_start_hour as i64) * 60
        + appointment.start.minute as i64;

    Position {
        top_offset: minutes_to_pixels(minutes_since_day_start, config),
        block_height: natural_height(appointment, config).max(config.min_block_height),
    }
}

/// Height the duration maps to, without the render floor.
pub fn natural_height(appointment: &Appointment, config: &TimelineConfig) -> f64 {
    minutes_to_pixels(appointment.duration_minutes as i64, config)
}

fn minutes_to_pixels(minutes: i64, config: &TimelineConfig) -> f64 {
    minutes as f64 * config.pixels_per_hour / 60.0
}

/// Percent bounds of a column: `left = column * 100 / total`, `width = 100 / total`
pub fn horizontal_bounds(slot: ColumnSlot) -> HorizontalBounds {
    let total = slot.total_columns.max(1) as f64;
    let width_percent = 100.0 / total;
    HorizontalBounds {
        left_percent: slot.column as f64 * width_percent,
        width_percent,
    }
}

impl HorizontalBounds {
    /// CSS `left`, shifted right by one gap.
    pub fn css_left(&self, gap: f64) -> String {
        format!("calc({}% + {}px)", self.left_percent, gap)
    }

    /// CSS `width`, leaving a gap on each side.
    pub fn css_width(&self, gap: f64) -> String {
        format!("calc({}% - {}px)", self.width_percent, gap * 2.0)
    }
}

/// Text lines that fit in the block, judged from the unfloored height.
pub fn detail_level(appointment: &Appointment, config: &TimelineConfig) -> BlockDetail {
    let height = natural_height(appointment, config);
    let has_reason = appointment
        .visit_reason
        .as_deref()
        .is_some_and(|reason| !reason.trim().is_empty());

    if height > REASON_LINE_MIN_HEIGHT && has_reason {
        BlockDetail::WithReason
    } else if height > TIME_LINE_MIN_HEIGHT {
        BlockDetail::WithTime
    } else {
        BlockDetail::NameOnly
    }
}

/// Offset of the "now" line, only when `selected` is today and now falls at
/// or after the first hour row.
pub fn current_time_offset(
    selected: NaiveDate,
    now: NaiveDateTime,
    config: &TimelineConfig,
) -> Option<f64> {
    if now.date() != selected {
        return None;
    }
    let minutes = (now.hour() as i64 - config.day_start_hour as i64) * 60 + now.minute() as i64;
    let offset = minutes_to_pixels(minutes, config);
    (offset >= 0.0).then_some(offset)
}
