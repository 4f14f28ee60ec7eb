//! talentlens-tui: terminal front end for the TalentLens assessment recommender.

pub mod app;
mod browser;
pub mod state;
pub mod ui;
mod worker;

pub use app::run;
pub use state::{AppMode, AppState};
