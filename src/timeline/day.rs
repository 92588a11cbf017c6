use chrono::NaiveDate;
use tracing::debug;

use crate::config::TimelineConfig;
use crate::error::LayoutError;
use super::columns::plan_columns;
use super::geometry::position;
use super::types::{Appointment, LayoutResult, Position};

/// Keeps the appointments booked on `date`, in input order
pub fn select_for_date(appointments: &[Appointment], date: NaiveDate) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.date == date)
        .cloned()
        .collect()
}

/// Lays out one day's appointments.
///
/// The config and every input are validated first; a single malformed record
/// fails the whole call. Results are in start-time order, ties in input order.
pub fn layout_day(
    appointments: &[Appointment],
    config: &TimelineConfig,
) -> Result<Vec<LayoutResult>, LayoutError> {
    Ok(layout_indexed(appointments, config)?
        .into_iter()
        .map(|(_, result)| result)
        .collect())
}

/// Same as `layout_day`, with each result paired with its input index.
pub(crate) fn layout_indexed(
    appointments: &[Appointment],
    config: &TimelineConfig,
) -> Result<Vec<(usize, LayoutResult)>, LayoutError> {
    config.validate()?;
    for appointment in appointments {
        appointment.validate()?;
    }

    let plan = plan_columns(appointments);
    let layout: Vec<(usize, LayoutResult)> = plan
        .order
        .iter()
        .map(|&i| {
            let appointment = &appointments[i];
            let Position { top_offset, block_height } = position(appointment, config);
            let result = LayoutResult {
                id: appointment.id.clone(),
                top_offset,
                block_height,
                column: plan.slots[i].column,
                total_columns: plan.slots[i].total_columns,
            };
            (i, result)
        })
        .collect();

    debug!(
        appointments = layout.len(),
        max_columns = layout.iter().map(|(_, l)| l.total_columns).max().unwrap_or(0),
        "laid out day timeline"
    );
    Ok(layout)
}
