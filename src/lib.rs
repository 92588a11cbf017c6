//! Day-view appointment timeline for a hospital front desk.
//!
//! The core is [`timeline::layout_day`]: given one day's appointments it
//! assigns each a vertical position from its time of day and a column from
//! its overlap conflicts, using the fewest columns each overlap cluster
//! needs. The CSV loader, text output and web surface sit around it.

pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod timeline;
pub mod web;

pub use config::TimelineConfig;
pub use error::{LayoutError, LoadError};
