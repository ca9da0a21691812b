#![forbid(unsafe_code)]

//! Structural checks over an item list.
//!
//! The engine never rejects a list; this report is how hosts and tests find
//! out that one is off. A non-final row that does not sum to 12 or a repeated
//! id is an error; a trailing partial row is only a warning, because a form
//! that is still being filled in legitimately ends short.

use gridform_core::{GRID_COLUMNS, Item, ItemId};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::partition::partition;

/// Severity for one finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridInvariantSeverity {
    Error,
    Warning,
}

/// Stable code for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridInvariantCode {
    DuplicateId,
    UnbalancedRow,
    TrailingPartialRow,
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInvariantIssue {
    pub code: GridInvariantCode,
    pub severity: GridInvariantSeverity,
    pub item: Option<ItemId>,
    pub row: Option<usize>,
    pub message: String,
}

/// All findings for one list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridInvariantReport {
    pub issues: Vec<GridInvariantIssue>,
}

impl GridInvariantReport {
    /// Inspect `items` in list order.
    #[must_use]
    pub fn inspect<P: Clone>(items: &[Item<P>]) -> Self {
        let mut issues = Vec::new();

        let mut seen = FxHashSet::default();
        for item in items {
            if !seen.insert(&item.id) {
                issues.push(GridInvariantIssue {
                    code: GridInvariantCode::DuplicateId,
                    severity: GridInvariantSeverity::Error,
                    item: Some(item.id.clone()),
                    row: None,
                    message: format!("item id {} appears more than once", item.id),
                });
            }
        }

        let layout = partition(items, None, None);
        let sums = layout.row_sums();
        let last = sums.len().saturating_sub(1);
        for (row, sum) in sums.into_iter().enumerate() {
            if sum == u32::from(GRID_COLUMNS) {
                continue;
            }
            let first_item = layout.rows[row].first().map(|item| item.id.clone());
            if row == last {
                issues.push(GridInvariantIssue {
                    code: GridInvariantCode::TrailingPartialRow,
                    severity: GridInvariantSeverity::Warning,
                    item: first_item,
                    row: Some(row),
                    message: format!("last row spans {sum} of {GRID_COLUMNS} columns"),
                });
            } else {
                issues.push(GridInvariantIssue {
                    code: GridInvariantCode::UnbalancedRow,
                    severity: GridInvariantSeverity::Error,
                    item: first_item,
                    row: Some(row),
                    message: format!("row {row} spans {sum} of {GRID_COLUMNS} columns"),
                });
            }
        }

        Self { issues }
    }

    /// Return true if any error-level finding exists.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity == GridInvariantSeverity::Error)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues with a given code.
    pub fn with_code(&self, code: GridInvariantCode) -> impl Iterator<Item = &GridInvariantIssue> {
        self.issues.iter().filter(move |issue| issue.code == code)
    }
}
