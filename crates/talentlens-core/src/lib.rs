//! talentlens-core: session state, search controller and result filtering
//! for the TalentLens assessment recommender client.

pub mod build_info;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod paths;
pub mod session;
pub mod storage;

pub use client::{HttpRecommender, Recommender};
pub use config::Config;
pub use controller::{SearchController, SearchTicket, FETCH_FAILED_MESSAGE};
pub use error::{Error, Result};
pub use filter::{filter_results, FilterCriteria, FilterField, FilterValue};
pub use model::{RecommendRequest, ResultItem};
pub use session::{SessionStore, Theme};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
