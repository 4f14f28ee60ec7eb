//! Client-side result filtering.
//!
//! The displayed list is always `filter_results(raw, criteria)`: a pure,
//! order-preserving subset of the server's list. Nothing here reorders,
//! rescores or caches.

use crate::model::ResultItem;
use std::fmt;

/// Sentinel label for an inactive criterion.
pub const ALL: &str = "All";

/// Job levels offered by the filter bar.
pub const JOB_LEVEL_OPTIONS: &[&str] = &["Entry", "Graduate", "Senior", "Manager"];

/// Test types offered by the filter bar.
pub const TEST_TYPE_OPTIONS: &[&str] = &["Assessment", "Personality", "Cognitive", "Skill"];

/// A single criterion: either the `"All"` sentinel or one concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterValue {
    #[default]
    All,
    Only(String),
}

impl FilterValue {
    pub fn only(value: impl Into<String>) -> Self {
        FilterValue::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterValue::All => ALL,
            FilterValue::Only(value) => value,
        }
    }

    /// Step to the next entry of `options`, wrapping through `All`.
    ///
    /// `All -> options[0] -> .. -> options[n-1] -> All`. A value not in
    /// `options` steps to `All`.
    pub fn cycle(&self, options: &[String]) -> Self {
        let next = match self {
            FilterValue::All => options.first(),
            FilterValue::Only(current) => options
                .iter()
                .position(|o| o == current)
                .and_then(|idx| options.get(idx + 1)),
        };
        next.map(|v| FilterValue::Only(v.clone()))
            .unwrap_or(FilterValue::All)
    }

    /// Step backwards; the inverse of [`FilterValue::cycle`].
    pub fn cycle_back(&self, options: &[String]) -> Self {
        let prev = match self {
            FilterValue::All => options.last(),
            FilterValue::Only(current) => options
                .iter()
                .position(|o| o == current)
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| options.get(idx)),
        };
        prev.map(|v| FilterValue::Only(v.clone()))
            .unwrap_or(FilterValue::All)
    }

    fn admits(&self, field: Option<&str>, matches: impl Fn(&str, &str) -> bool) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Only(want) => field.is_some_and(|have| matches(have, want)),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        if raw == ALL {
            FilterValue::All
        } else {
            FilterValue::Only(raw.to_string())
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which criterion a UI control edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    JobLevel,
    Duration,
    TestType,
}

impl FilterField {
    pub const ALL: &'static [FilterField] = &[
        FilterField::JobLevel,
        FilterField::Duration,
        FilterField::TestType,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::JobLevel => "Level",
            FilterField::Duration => "Duration",
            FilterField::TestType => "Type",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterField::JobLevel => FilterField::Duration,
            FilterField::Duration => FilterField::TestType,
            FilterField::TestType => FilterField::JobLevel,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FilterField::JobLevel => FilterField::TestType,
            FilterField::Duration => FilterField::JobLevel,
            FilterField::TestType => FilterField::Duration,
        }
    }

    /// Selectable values for this field given the current raw results.
    pub fn options(self, raw: &[ResultItem]) -> Vec<String> {
        match self {
            FilterField::JobLevel => JOB_LEVEL_OPTIONS.iter().map(|s| s.to_string()).collect(),
            FilterField::TestType => TEST_TYPE_OPTIONS.iter().map(|s| s.to_string()).collect(),
            FilterField::Duration => duration_options(raw),
        }
    }
}

/// The three independent criteria, ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub job_level: FilterValue,
    pub duration: FilterValue,
    pub test_type: FilterValue,
}

impl FilterCriteria {
    /// Criteria with every field set to `All`.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.job_level.is_all() && self.duration.is_all() && self.test_type.is_all()
    }

    pub fn get(&self, field: FilterField) -> &FilterValue {
        match field {
            FilterField::JobLevel => &self.job_level,
            FilterField::Duration => &self.duration,
            FilterField::TestType => &self.test_type,
        }
    }

    pub fn set(&mut self, field: FilterField, value: FilterValue) {
        match field {
            FilterField::JobLevel => self.job_level = value,
            FilterField::Duration => self.duration = value,
            FilterField::TestType => self.test_type = value,
        }
    }

    /// Return `true` if `item` passes every active criterion.
    ///
    /// - job level: case-insensitive substring
    /// - duration: case-sensitive substring
    /// - test type: exact equality
    pub fn matches(&self, item: &ResultItem) -> bool {
        self.job_level
            .admits(item.job_level.as_deref(), |have, want| {
                have.to_lowercase().contains(&want.to_lowercase())
            })
            && self
                .duration
                .admits(item.duration.as_deref(), |have, want| have.contains(want))
            && self
                .test_type
                .admits(item.test_type.as_deref(), |have, want| have == want)
    }
}

/// Rebuild the displayed list from scratch, keeping server order.
pub fn filter_results(raw: &[ResultItem], criteria: &FilterCriteria) -> Vec<ResultItem> {
    raw.iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect()
}

/// Count label shown above the results list.
pub fn match_count_label(count: usize) -> String {
    format!("{count} matches found")
}

/// Distinct `duration` values in first-seen order.
pub fn duration_options(raw: &[ResultItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for duration in raw.iter().filter_map(|item| item.duration.as_deref()) {
        let duration = duration.trim();
        if !duration.is_empty() && !seen.iter().any(|d| d == duration) {
            seen.push(duration.to_string());
        }
    }
    seen
}
