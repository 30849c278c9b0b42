//! FILENAME: core/case-analytics/src/metrics.rs
//! Metrics Aggregator - Counts and unit sums behind the stat cards.
//!
//! Every screen feeds the same case list, index and row predicates through
//! `compute_metrics`, so the dashboard, the cases list and the rep view can
//! never disagree about what the same filter state means.
//!
//! Unit totals come from one of two sources, chosen by an explicit
//! `UnitMode` argument:
//! - `CaseTotals`: the case's pre-aggregated totals, computed at write time
//! - `LineLevel`: a re-sum of the lines that pass each row's line test

use case_model::{CaseRecord, EntityKey};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::index::CaseProductIndex;
use crate::predicate::{CaseMembership, CasePredicate, RowPredicates};
use crate::{log_enter, log_exit};

/// Where unit sums come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitMode {
    /// Trust `total_company_units` / `total_competitor_units` on each case.
    CaseTotals,
    /// Re-sum the units of the lines that satisfy each row's selection.
    LineLevel,
}

impl Default for UnitMode {
    fn default() -> Self {
        UnitMode::CaseTotals
    }
}

impl UnitMode {
    /// The conventional mode for a filter state: line-level as soon as either
    /// row narrows anything, case totals otherwise. Callers that want a fixed
    /// mode across screens pass one explicitly instead.
    pub fn for_predicates(predicates: &RowPredicates) -> Self {
        if predicates.any_active() {
            UnitMode::LineLevel
        } else {
            UnitMode::CaseTotals
        }
    }
}

/// Numbers for the stat cards.
///
/// `total_case_count` is always `company + competitor - mixed`, floored at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    pub company_case_count: usize,
    pub competitor_case_count: usize,
    pub mixed_case_count: usize,
    pub total_case_count: usize,
    pub company_units: u64,
    pub competitor_units: u64,
    /// Distinct doctors seen on company-matching cases.
    pub active_doctors: usize,
    /// Distinct accounts seen on company-matching cases.
    pub active_accounts: usize,
}

impl MetricsResult {
    /// Company units as a percentage of all units, 0 when there are none.
    pub fn company_unit_share(&self) -> f64 {
        let total = self.company_units + self.competitor_units;
        if total == 0 {
            0.0
        } else {
            self.company_units as f64 * 100.0 / total as f64
        }
    }
}

/// Aggregates counts, unit sums and distinct doctors/accounts over `cases`.
///
/// `company` and `competitor` are evaluated independently per case. Any
/// `CasePredicate` works, closures included; in `LineLevel` mode a predicate
/// without a line test contributes the case's pre-aggregated total instead.
pub fn compute_metrics<C, K>(
    cases: &[CaseRecord],
    index: &CaseProductIndex,
    company: &C,
    competitor: &K,
    unit_mode: UnitMode,
) -> MetricsResult
where
    C: CasePredicate + ?Sized,
    K: CasePredicate + ?Sized,
{
    log_enter!(
        "METRICS",
        "compute_metrics",
        "cases={} mode={:?}",
        cases.len(),
        unit_mode
    );

    let mut result = MetricsResult::default();
    let mut doctors: FxHashSet<EntityKey> = FxHashSet::default();
    let mut accounts: FxHashSet<EntityKey> = FxHashSet::default();

    for case in cases {
        let membership = CaseMembership {
            company: company.matches(case, index),
            competitor: competitor.matches(case, index),
        };

        if membership.company {
            result.company_case_count += 1;
            doctors.extend(case.doctor_key());
            accounts.extend(case.account_key());
        }
        if membership.competitor {
            result.competitor_case_count += 1;
        }
        if membership.is_mixed() {
            result.mixed_case_count += 1;
        }

        if membership.company {
            result.company_units += match unit_mode {
                UnitMode::CaseTotals => case.total_company_units,
                UnitMode::LineLevel => company
                    .line_units(case, index)
                    .unwrap_or(case.total_company_units),
            };
        }
        if membership.competitor {
            result.competitor_units += match unit_mode {
                UnitMode::CaseTotals => case.total_competitor_units,
                UnitMode::LineLevel => competitor
                    .line_units(case, index)
                    .unwrap_or(case.total_competitor_units),
            };
        }
    }

    result.total_case_count = (result.company_case_count + result.competitor_case_count)
        .saturating_sub(result.mixed_case_count);
    result.active_doctors = doctors.len();
    result.active_accounts = accounts.len();

    log_exit!(
        "METRICS",
        "compute_metrics",
        "company={} competitor={} mixed={} total={}",
        result.company_case_count,
        result.competitor_case_count,
        result.mixed_case_count,
        result.total_case_count
    );
    result
}
