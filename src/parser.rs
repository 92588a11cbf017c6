use csv::{Reader, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::timeline::{Appointment, AppointmentStatus, TimeOfDay, DEFAULT_DURATION_MINUTES};

/// Column positions resolved from the header row
struct Columns {
    id: usize,
    date: usize,
    time: usize,
    duration: Option<usize>,
    status: Option<usize>,
    patient_name: Option<usize>,
    visit_reason: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase().replace(' ', "_");
                names.iter().any(|n| h == *n)
            })
        };

        Ok(Columns {
            id: find(&["id", "appointment_id"]).ok_or(LoadError::MissingColumn("id"))?,
            date: find(&["date", "appointment_date"]).ok_or(LoadError::MissingColumn("date"))?,
            time: find(&["time", "appointment_time"]).ok_or(LoadError::MissingColumn("time"))?,
            duration: find(&["duration", "duration_minutes"]),
            status: find(&["status"]),
            patient_name: find(&["patient_name", "patient"]),
            visit_reason: find(&["visit_reason", "reason"]),
        })
    }
}

/// Takes the calendar-day part of "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM:SS..."
fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value.trim().split('T').next().unwrap_or("");
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn field(record: &StringRecord, col: Option<usize>) -> &str {
    col.and_then(|c| record.get(c)).unwrap_or("").trim()
}

/// Loads appointments from a CSV file
pub fn load_appointments<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Appointment>, LoadError> {
    let reader = Reader::from_path(csv_path)?;
    read_records(reader)
}

/// Loads appointments from CSV bytes already in memory (e.g. an upload)
pub fn read_appointments<R: Read>(source: R) -> Result<Vec<Appointment>, LoadError> {
    read_records(Reader::from_reader(source))
}

fn read_records<R: Read>(mut reader: Reader<R>) -> Result<Vec<Appointment>, LoadError> {
    let headers = reader.headers()?.clone();
    let cols = Columns::from_headers(&headers)?;

    let mut entries: Vec<Appointment> = Vec::new();
    // Later rows with the same id replace earlier ones in place
    let mut position_by_id: HashMap<String, usize> = HashMap::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // header is line 1
        let row = index + 2;

        let id = field(&record, Some(cols.id)).to_string();
        let date_raw = field(&record, Some(cols.date));
        let time_raw = field(&record, Some(cols.time));

        // Skip if essential fields are missing
        if id.is_empty() || date_raw.is_empty() || time_raw.is_empty() {
            warn!(row, "skipping appointment row with missing id, date or time");
            continue;
        }

        let date = parse_date(date_raw).ok_or_else(|| LoadError::InvalidDate {
            row,
            value: date_raw.to_string(),
        })?;

        let start: TimeOfDay = time_raw
            .parse()
            .map_err(|source| LoadError::InvalidRow { row, source })?;

        let duration_raw = field(&record, cols.duration);
        let duration_minutes = if duration_raw.is_empty() {
            DEFAULT_DURATION_MINUTES
        } else {
            duration_raw.parse().map_err(|_| LoadError::InvalidNumber {
                row,
                value: duration_raw.to_string(),
            })?
        };

        let status_raw = field(&record, cols.status);
        let status = if status_raw.is_empty() {
            AppointmentStatus::default()
        } else {
            status_raw
                .parse()
                .map_err(|value| LoadError::UnknownStatus { row, value })?
        };

        let visit_reason = Some(field(&record, cols.visit_reason))
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        let appointment = Appointment {
            id: id.clone(),
            date,
            start,
            duration_minutes,
            status,
            patient_name: field(&record, cols.patient_name).to_string(),
            visit_reason,
        };

        match position_by_id.get(&id) {
            Some(&existing) => entries[existing] = appointment,
            None => {
                position_by_id.insert(id, entries.len());
                entries.push(appointment);
            }
        }
    }

    info!(appointments = entries.len(), "loaded appointment book");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,date,time,duration,status,patient_name,visit_reason\n";

    fn load(body: &str) -> Result<Vec<Appointment>, LoadError> {
        read_appointments(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn reads_all_columns() {
        let book = load("a1,2025-03-04,09:30,45,Checked-In,Jane Doe,Follow-up on labs\n").unwrap();
        assert_eq!(book.len(), 1);
        let a = &book[0];
        assert_eq!(a.id, "a1");
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(a.start, TimeOfDay { hour: 9, minute: 30 });
        assert_eq!(a.duration_minutes, 45);
        assert_eq!(a.status, AppointmentStatus::CheckedIn);
        assert_eq!(a.patient_name, "Jane Doe");
        assert_eq!(a.visit_reason.as_deref(), Some("Follow-up on labs"));
    }

    #[test]
    fn blank_duration_and_status_use_defaults() {
        let book = load("a1,2025-03-04T00:00:00.000Z,08:00,,,John Roe,\n").unwrap();
        assert_eq!(book[0].duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(book[0].status, AppointmentStatus::Scheduled);
        assert!(book[0].visit_reason.is_none());
    }

    #[test]
    fn rows_missing_essentials_are_skipped() {
        let book = load(",2025-03-04,08:00,30,,Nobody,\na2,2025-03-04,,30,,No Time,\na3,2025-03-04,10:00,30,,Kept,\n").unwrap();
        let ids: Vec<&str> = book.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a3"]);
    }

    #[test]
    fn repeated_id_replaces_earlier_row_in_place() {
        let book = load(
            "a1,2025-03-04,08:00,30,,First,\n\
             a2,2025-03-04,09:00,30,,Second,\n\
             a1,2025-03-04,11:00,60,Rescheduled,First,\n",
        )
        .unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book[0].id, "a1");
        assert_eq!(book[0].start, TimeOfDay { hour: 11, minute: 0 });
        assert_eq!(book[0].status, AppointmentStatus::Rescheduled);
        assert_eq!(book[1].id, "a2");
    }

    #[test]
    fn bad_time_names_the_row() {
        let err = load("a1,2025-03-04,08:00,30,,Ok,\na2,2025-03-04,25:00,30,,Bad,\n").unwrap_err();
        assert_eq!(err.to_string(), "row 3: invalid time format: 25:00");
    }

    #[test]
    fn unknown_status_and_bad_numbers_are_errors() {
        assert!(matches!(
            load("a1,2025-03-04,08:00,30,Lost,Ok,\n"),
            Err(LoadError::UnknownStatus { row: 2, .. })
        ));
        assert!(matches!(
            load("a1,2025-03-04,08:00,half an hour,,Ok,\n"),
            Err(LoadError::InvalidNumber { row: 2, .. })
        ));
        assert!(matches!(
            load("a1,04/03/2025,08:00,30,,Ok,\n"),
            Err(LoadError::InvalidDate { row: 2, .. })
        ));
    }

    #[test]
    fn negative_duration_loads_and_is_left_to_layout() {
        let book = load("a1,2025-03-04,08:00,-10,,Ok,\n").unwrap();
        assert_eq!(book[0].duration_minutes, -10);
        assert!(book[0].validate().is_err());
    }

    #[test]
    fn missing_required_column_is_reported() {
        let err = read_appointments("id,date,duration\na1,2025-03-04,30\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("time")));
    }

    #[test]
    fn header_aliases_and_order_are_flexible() {
        let csv = "Patient Name,Appointment Time,Appointment Date,Appointment ID\nAda,07:15,2025-03-04,z9\n";
        let book = read_appointments(csv.as_bytes()).unwrap();
        assert_eq!(book[0].id, "z9");
        assert_eq!(book[0].patient_name, "Ada");
        assert_eq!(book[0].start, TimeOfDay { hour: 7, minute: 15 });
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}a1,2025-03-04,09:00,30,,Jane,\n").unwrap();
        let book = load_appointments(file.path()).unwrap();
        assert_eq!(book.len(), 1);
    }
}
