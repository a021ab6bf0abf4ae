//! State Management
//!
//! Per-view filter selection state and toast notification state.

pub mod filters;
pub mod notify;

pub use filters::{DateRange, FilterSelection, Interval, SelectOption};
pub use notify::{provide_notifications, Notifications};
