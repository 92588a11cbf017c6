pub mod types;
pub mod slot_utils;
pub mod overlap;
pub mod columns;
pub mod geometry;
pub mod day;
pub mod view;

pub use types::{
    Appointment, AppointmentStatus, BlockDetail, ColumnAssignment, ColumnSlot, HorizontalBounds,
    HourRow, LayoutResult, Position, TimeOfDay, DEFAULT_DURATION_MINUTES,
};
pub use slot_utils::{format_hour, hour_rows, parse_time_of_day, slot_time_at};
pub use overlap::overlaps;
pub use columns::assign_columns;
pub use geometry::{current_time_offset, detail_level, horizontal_bounds, position};
pub use day::{layout_day, select_for_date};
pub use view::{build_blocks, build_day_view, DayView, TimelineBlock};
