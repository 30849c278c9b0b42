//! FILENAME: core/case-analytics/src/index.rs
//! Case Product Index - The shared dictionary every other component reads.
//!
//! Groups the flat case-product relation by owning case, ordered by
//! `sequence` within each case. The index has no mutation API: whenever the
//! underlying relation changes (load, create, edit, delete) the caller
//! builds a new one wholesale.

use case_model::{CaseId, CaseProductLine, FilterRow};
use rustc_hash::FxHashMap;

use crate::{log_debug, log_enter, log_exit};

/// Owning-key to ordered-list mapping from case id to its product lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseProductIndex {
    /// Lines per case, sorted ascending by sequence.
    groups: FxHashMap<CaseId, Vec<CaseProductLine>>,

    /// Total number of indexed lines (dropped lines excluded).
    line_count: usize,
}

impl CaseProductIndex {
    /// Lines of a case in sequence order. Unknown cases have no lines.
    pub fn lines_for(&self, case_id: CaseId) -> &[CaseProductLine] {
        self.groups.get(&case_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lines of a case that belong to one row's partition.
    pub fn side_lines(
        &self,
        case_id: CaseId,
        row: FilterRow,
    ) -> impl Iterator<Item = &CaseProductLine> + '_ {
        self.lines_for(case_id)
            .iter()
            .filter(move |line| row.owns(line))
    }

    /// Whether the case has at least one line on the given side.
    pub fn has_side(&self, case_id: CaseId, row: FilterRow) -> bool {
        self.side_lines(case_id, row).next().is_some()
    }

    /// Number of cases with at least one line.
    pub fn case_count(&self) -> usize {
        self.groups.len()
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Indexed case ids in ascending order.
    pub fn case_ids(&self) -> Vec<CaseId> {
        let mut ids: Vec<CaseId> = self.groups.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Builds the index from every product line currently loaded.
///
/// Lines without a case id are dropped. Within a case, lines sort ascending
/// by `sequence`, a missing sequence counting as 0; the sort is stable so
/// equal sequences keep their input order.
pub fn index(lines: &[CaseProductLine]) -> CaseProductIndex {
    log_enter!("INDEX", "index", "lines={}", lines.len());

    let mut groups: FxHashMap<CaseId, Vec<CaseProductLine>> = FxHashMap::default();
    let mut dropped = 0usize;

    for line in lines {
        match line.case_id {
            Some(case_id) => groups.entry(case_id).or_default().push(line.clone()),
            None => dropped += 1,
        }
    }

    for group in groups.values_mut() {
        group.sort_by_key(|line| line.sequence.unwrap_or(0));
    }

    if dropped > 0 {
        log_debug!("INDEX", "dropped {} lines without a case id", dropped);
    }

    let line_count = lines.len() - dropped;
    log_exit!("INDEX", "index", "cases={} lines={}", groups.len(), line_count);

    CaseProductIndex { groups, line_count }
}
