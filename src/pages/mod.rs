//! Pages
//!
//! Top-level view components, one per dashboard tab.

pub mod hours;
pub mod mpph;
pub mod picks;
pub mod sync;
pub mod tonnes;

pub use hours::Hours;
pub use mpph::Mpph;
pub use picks::Picks;
pub use sync::Sync;
pub use tonnes::Tonnes;
