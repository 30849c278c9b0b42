//! FILENAME: core/case-analytics/src/predicate.rs
//! Dual-Row Predicate Builder - Per-case membership tests.
//!
//! A case "matches" a row when at least one of its lines sits on that row's
//! side and satisfies every set level of the row's selection. An empty
//! selection still requires one line on the side: a case without any
//! company line is never a company case. The two rows are evaluated
//! independently; a case matching both is a mixed case.

use case_model::{CaseId, CaseProductLine, CaseRecord, FilterRow, FilterSelection};
use serde::{Deserialize, Serialize};

use crate::index::CaseProductIndex;

// ============================================================================
// PREDICATE SEAM
// ============================================================================

/// A membership test over cases. Implemented by `RowPredicate` and by any
/// closure `Fn(&CaseRecord, &CaseProductIndex) -> bool`, so ad-hoc callers
/// can feed their own tests into the aggregator.
pub trait CasePredicate {
    fn matches(&self, case: &CaseRecord, index: &CaseProductIndex) -> bool;

    /// Units of the case's lines that pass this predicate's line test.
    /// `None` when the predicate has no line test; line-level aggregation
    /// then falls back to the case's pre-aggregated total.
    fn line_units(&self, _case: &CaseRecord, _index: &CaseProductIndex) -> Option<u64> {
        None
    }
}

impl<F> CasePredicate for F
where
    F: Fn(&CaseRecord, &CaseProductIndex) -> bool,
{
    fn matches(&self, case: &CaseRecord, index: &CaseProductIndex) -> bool {
        self(case, index)
    }
}

// ============================================================================
// ROW PREDICATE
// ============================================================================

/// Membership test for one filter row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPredicate {
    row: FilterRow,
    selection: FilterSelection,
}

impl RowPredicate {
    pub fn new(row: FilterRow, selection: FilterSelection) -> Self {
        RowPredicate { row, selection }
    }

    /// Whether the row narrows anything beyond "has a line on this side".
    pub fn is_active(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Line-level test: on this row's side and satisfying the selection.
    pub fn matches_line(&self, line: &CaseProductLine) -> bool {
        self.row.owns(line) && self.selection.matches_line(line)
    }

    /// The case's lines that pass the line-level test, in sequence order.
    pub fn matching_lines<'a>(
        &'a self,
        case_id: CaseId,
        index: &'a CaseProductIndex,
    ) -> impl Iterator<Item = &'a CaseProductLine> + 'a {
        index
            .lines_for(case_id)
            .iter()
            .filter(move |line| self.matches_line(line))
    }
}

impl CasePredicate for RowPredicate {
    fn matches(&self, case: &CaseRecord, index: &CaseProductIndex) -> bool {
        self.matching_lines(case.id, index).next().is_some()
    }

    fn line_units(&self, case: &CaseRecord, index: &CaseProductIndex) -> Option<u64> {
        Some(
            self.matching_lines(case.id, index)
                .map(|line| u64::from(line.units))
                .sum(),
        )
    }
}

// ============================================================================
// DUAL ROW
// ============================================================================

/// Both bits of a case's row membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMembership {
    pub company: bool,
    pub competitor: bool,
}

impl CaseMembership {
    pub fn is_mixed(&self) -> bool {
        self.company && self.competitor
    }
}

/// The company-row and competitor-row predicates of one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowPredicates {
    pub company: RowPredicate,
    pub competitor: RowPredicate,
}

impl RowPredicates {
    /// Whether either row carries a selection.
    pub fn any_active(&self) -> bool {
        self.company.is_active() || self.competitor.is_active()
    }

    pub fn membership(&self, case: &CaseRecord, index: &CaseProductIndex) -> CaseMembership {
        CaseMembership {
            company: self.company.matches(case, index),
            competitor: self.competitor.matches(case, index),
        }
    }

    /// Cases for table display or export. With no active row every case is
    /// kept; otherwise a case must satisfy each active row.
    pub fn filter_cases<'a>(
        &self,
        cases: &'a [CaseRecord],
        index: &CaseProductIndex,
    ) -> Vec<&'a CaseRecord> {
        cases
            .iter()
            .filter(|case| {
                (!self.company.is_active() || self.company.matches(case, index))
                    && (!self.competitor.is_active() || self.competitor.matches(case, index))
            })
            .collect()
    }
}

/// Builds the membership tests for a company-row and a competitor-row
/// selection.
pub fn build_row_predicates(
    company_sel: &FilterSelection,
    competitor_sel: &FilterSelection,
) -> RowPredicates {
    RowPredicates {
        company: RowPredicate::new(FilterRow::Company, company_sel.clone()),
        competitor: RowPredicate::new(FilterRow::Competitor, competitor_sel.clone()),
    }
}

/// Cases accepted by an arbitrary predicate, in input order.
pub fn filter_cases<'a, P>(
    cases: &'a [CaseRecord],
    index: &CaseProductIndex,
    predicate: &P,
) -> Vec<&'a CaseRecord>
where
    P: CasePredicate + ?Sized,
{
    cases
        .iter()
        .filter(|case| predicate.matches(case, index))
        .collect()
}
