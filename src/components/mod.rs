//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod filters;
pub mod loading;
pub mod toast;

pub use chart::{ChartData, ComposedChart, Layer, LayerKind};
pub use filters::FilterBar;
pub use loading::{InlineLoading, Loading};
pub use toast::Toast;
