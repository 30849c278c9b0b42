//! FILENAME: core/case-analytics/src/scope.rs
//! Case Scope - Which cases a screen aggregates over at all.
//!
//! Scope is applied before the dual-row predicates: it narrows the case list
//! by date, approval status, submitting rep and account type. A rep's view
//! is the same pipeline with `submitted_by` pinned to that rep.

use case_model::{non_empty, CaseRecord, CaseStatus, RepId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseScope {
    /// Inclusive lower bound on `case_date`.
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper bound on `case_date`.
    pub date_to: Option<NaiveDate>,

    /// Allowed statuses. Empty allows every status.
    pub statuses: Vec<CaseStatus>,

    pub submitted_by: Option<RepId>,

    pub account_type: Option<String>,
}

impl CaseScope {
    /// A scope that keeps every case.
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the given rep's cases.
    pub fn for_rep(rep: &str) -> Self {
        CaseScope {
            submitted_by: Some(rep.to_string()),
            ..Self::default()
        }
    }

    pub fn with_statuses(mut self, statuses: &[CaseStatus]) -> Self {
        self.statuses = statuses.to_vec();
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.date_from.is_none()
            && self.date_to.is_none()
            && self.statuses.is_empty()
            && non_empty(&self.submitted_by).is_none()
            && non_empty(&self.account_type).is_none()
    }

    /// Whether the case falls inside the scope. An undated case fails any
    /// date bound.
    pub fn matches(&self, case: &CaseRecord) -> bool {
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = case.case_date else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&case.status) {
            return false;
        }
        if let Some(rep) = non_empty(&self.submitted_by) {
            if non_empty(&case.submitted_by) != Some(rep) {
                return false;
            }
        }
        if let Some(account_type) = non_empty(&self.account_type) {
            if non_empty(&case.account_type) != Some(account_type) {
                return false;
            }
        }
        true
    }

    /// Cases inside the scope, in input order.
    pub fn apply<'a>(&self, cases: &'a [CaseRecord]) -> Vec<&'a CaseRecord> {
        cases.iter().filter(|case| self.matches(case)).collect()
    }

    /// Owned copy of the cases inside the scope.
    pub fn apply_owned(&self, cases: &[CaseRecord]) -> Vec<CaseRecord> {
        cases.iter().filter(|case| self.matches(case)).cloned().collect()
    }
}
