//! FILENAME: core/case-analytics/src/snapshot.rs
//! Data Snapshot - The collections one data-store fetch hands over.
//!
//! The store collaborator returns cases, their product lines and the product
//! catalog. A snapshot is immutable once built; after any create, edit or
//! delete the caller fetches (or assembles) a new one and re-indexes.

use case_model::{CaseId, CaseProductLine, CaseRecord, Product};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::index::{index, CaseProductIndex};
use crate::options::{collect_dual_row_options, DualRowOptions};
use crate::scope::CaseScope;
use crate::{log_debug, log_info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSnapshot {
    pub cases: Vec<CaseRecord>,
    pub lines: Vec<CaseProductLine>,
    pub products: Vec<Product>,
}

impl DataSnapshot {
    pub fn new(cases: Vec<CaseRecord>, lines: Vec<CaseProductLine>, products: Vec<Product>) -> Self {
        DataSnapshot {
            cases,
            lines,
            products,
        }
    }

    /// Parses the JSON object `{ "cases": [...], "lines": [...], "products": [...] }`.
    /// Missing collections are empty.
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        let snapshot: DataSnapshot = serde_json::from_str(json).map_err(AnalyticsError::Snapshot)?;
        log_info!(
            "SNAPSHOT",
            "loaded cases={} lines={} products={}",
            snapshot.cases.len(),
            snapshot.lines.len(),
            snapshot.products.len()
        );
        Ok(snapshot)
    }

    pub fn index(&self) -> CaseProductIndex {
        index(&self.lines)
    }

    /// Full option sets for both filter rows.
    pub fn options(&self) -> DualRowOptions {
        collect_dual_row_options(&self.lines, &self.products)
    }

    /// A snapshot restricted to the cases inside `scope` and their lines.
    /// The catalog is kept whole.
    pub fn scoped(&self, scope: &CaseScope) -> DataSnapshot {
        if scope.is_unrestricted() {
            return self.clone();
        }
        let cases = scope.apply_owned(&self.cases);
        let kept: FxHashSet<CaseId> = cases.iter().map(|c| c.id).collect();
        let lines: Vec<CaseProductLine> = self
            .lines
            .iter()
            .filter(|line| line.case_id.is_some_and(|id| kept.contains(&id)))
            .cloned()
            .collect();
        log_debug!(
            "SNAPSHOT",
            "scoped cases {}->{} lines {}->{}",
            self.cases.len(),
            cases.len(),
            self.lines.len(),
            lines.len()
        );
        DataSnapshot {
            cases,
            lines,
            products: self.products.clone(),
        }
    }
}
