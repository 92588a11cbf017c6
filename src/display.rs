use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::timeline::{AppointmentStatus, DayView, TimelineBlock};

/// Formats a patient name with status tag
pub fn format_patient_label(status: AppointmentStatus, name: &str) -> String {
    let name = if name.trim().is_empty() { "(unnamed)" } else { name };
    format!("[{}] {}", status, name)
}

/// One line per block: HH:MM  +Nmin  col c/t  top=…px  h=…px  [status] name
pub fn format_block_line(block: &TimelineBlock) -> String {
    format!(
        "{}  +{}min  col {}/{}  top={}px  h={}px  {}",
        block.time,
        block.duration_minutes,
        block.column + 1,
        block.total_columns,
        block.top_offset,
        block.block_height,
        format_patient_label(block.status, &block.patient_name),
    )
}

fn write_day<W: Write>(out: &mut W, view: &DayView) -> io::Result<()> {
    writeln!(out, "** {} **", view.date.format("%A, %B %-d, %Y"))?;
    writeln!(out, "{} appointment(s)", view.appointment_count)?;
    for block in &view.blocks {
        writeln!(out, "{}", format_block_line(block))?;
    }
    Ok(())
}

/// Writes a day layout to a file, one block per line
pub fn write_layout_to_file(view: &DayView, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_day(&mut file, view)
}

/// Prints a day layout in a readable format
pub fn print_day_layout(view: &DayView) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_day(&mut out, view)?;

    let widest = view.blocks.iter().map(|b| b.total_columns).max().unwrap_or(0);
    if widest > 1 {
        writeln!(out, "Busiest overlap: {} side by side", widest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimelineConfig;
    use crate::timeline::build_day_view;
    use crate::timeline::testing::appt_on;
    use chrono::NaiveDate;

    fn view() -> DayView {
        let day = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let mut b = appt_on("b", day, "09:30", 60);
        b.status = AppointmentStatus::CheckedIn;
        b.patient_name = "Jane Doe".into();
        let book = vec![appt_on("a", day, "09:00", 60), b];
        let now = day.and_hms_opt(0, 0, 0).unwrap();
        build_day_view(&book, day, now, &TimelineConfig::default()).unwrap()
    }

    #[test]
    fn label_includes_status() {
        assert_eq!(format_patient_label(AppointmentStatus::NoShow, "Ada"), "[No-Show] Ada");
        assert_eq!(format_patient_label(AppointmentStatus::Scheduled, " "), "[Scheduled] (unnamed)");
    }

    #[test]
    fn block_line_shows_column_of_total() {
        let view = view();
        assert_eq!(
            format_block_line(&view.blocks[1]),
            "09:30  +60min  col 2/2  top=570px  h=60px  [Checked-In] Jane Doe"
        );
    }

    #[test]
    fn writes_header_and_blocks_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.txt");
        write_layout_to_file(&view(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "** Tuesday, March 4, 2025 **");
        assert_eq!(lines[1], "2 appointment(s)");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("09:00  +60min  col 1/2"));
    }
}
