//! UI components and rendering.

pub mod detail;
pub mod filters;
pub mod footer;
pub mod header;
pub mod history;
pub mod layout;
pub mod overlays;
pub mod results;
pub mod search_input;
pub mod theme;

pub use theme::palette;
