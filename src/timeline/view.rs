use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::TimelineConfig;
use crate::error::LayoutError;
use super::day::{layout_indexed, select_for_date};
use super::geometry::{current_time_offset, detail_level, horizontal_bounds};
use super::slot_utils::hour_rows;
use super::types::{Appointment, AppointmentStatus, BlockDetail, HourRow, LayoutResult};

/// Everything the timeline page needs to paint one appointment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBlock {
    pub id: String,
    pub patient_name: String,
    pub status: AppointmentStatus,
    pub dimmed: bool,
    pub time: String,
    pub duration_minutes: i32,
    pub visit_reason: Option<String>,
    pub top_offset: f64,
    pub block_height: f64,
    pub column: usize,
    pub total_columns: usize,
    pub left_percent: f64,
    pub width_percent: f64,
    pub css_left: String,
    pub css_width: String,
    pub detail: BlockDetail,
}

impl TimelineBlock {
    pub fn new(appointment: &Appointment, layout: &LayoutResult, config: &TimelineConfig) -> Self {
        let bounds = horizontal_bounds(layout.slot());
        Self {
            id: appointment.id.clone(),
            patient_name: appointment.patient_name.clone(),
            status: appointment.status,
            dimmed: appointment.status.is_dimmed(),
            time: appointment.start.to_string(),
            duration_minutes: appointment.duration_minutes,
            visit_reason: appointment.visit_reason.clone(),
            top_offset: layout.top_offset,
            block_height: layout.block_height,
            column: layout.column,
            total_columns: layout.total_columns,
            left_percent: bounds.left_percent,
            width_percent: bounds.width_percent,
            css_left: bounds.css_left(config.column_gap),
            css_width: bounds.css_width(config.column_gap),
            detail: detail_level(appointment, config),
        }
    }
}

/// A laid-out day, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub appointment_count: usize,
    pub hours: Vec<HourRow>,
    pub blocks: Vec<TimelineBlock>,
    pub now_offset: Option<f64>,
}

/// Filters the book to `date`, lays it out and attaches display fields.
pub fn build_day_view(
    book: &[Appointment],
    date: NaiveDate,
    now: NaiveDateTime,
    config: &TimelineConfig,
) -> Result<DayView, LayoutError> {
    let day = select_for_date(book, date);
    let blocks = build_blocks(&day, config)?;

    Ok(DayView {
        date,
        appointment_count: day.len(),
        hours: hour_rows(config),
        blocks,
        now_offset: current_time_offset(date, now, config),
    })
}

/// Lays out an arbitrary list (already one day) into render blocks.
pub fn build_blocks(
    appointments: &[Appointment],
    config: &TimelineConfig,
) -> Result<Vec<TimelineBlock>, LayoutError> {
    Ok(layout_indexed(appointments, config)?
        .iter()
        .map(|(i, result)| TimelineBlock::new(&appointments[*i], result, config))
        .collect())
}
