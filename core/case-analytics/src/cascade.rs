//! FILENAME: core/case-analytics/src/cascade.rs
//! Cascading Resolver - Narrows a row's dependent option lists.
//!
//! Each level narrows by every level above it on the same row only:
//! - categories depend on company
//! - sub-categories depend on company + category
//! - products depend on company + category + sub-category
//!
//! Levels are applied independently, so a category set without a company
//! still narrows sub-categories and products. When nothing above a level is
//! set, that level lists the row's full options unchanged.

use case_model::{
    CascadeChange, CascadeLevel, CaseProductLine, FilterRow, FilterSelection, Product,
};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::options::{distinct_sorted, DualRowOptions, OptionSet, ProductOptionsBuilder};
use crate::{log_debug, log_enter, log_exit};

/// Result of editing one level of a row: the selection with lower levels
/// cleared, and the option lists that go with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeUpdate {
    pub selection: FilterSelection,
    pub options: OptionSet,
}

/// Lines of the row's partition that satisfy `upstream`.
fn narrowed<'a>(
    row: FilterRow,
    upstream: &'a FilterSelection,
    lines: &'a [CaseProductLine],
) -> impl Iterator<Item = &'a CaseProductLine> + 'a {
    lines
        .iter()
        .filter(move |line| row.owns(line) && upstream.matches_line(line))
}

/// Recomputes the option lists of `row` for the current selection.
///
/// `full` is the row's unfiltered option set as produced by the collector
/// from the same `lines`. No match at any level yields an empty list.
pub fn update_cascade(
    row: FilterRow,
    selection: &FilterSelection,
    lines: &[CaseProductLine],
    full: &OptionSet,
) -> OptionSet {
    update_cascade_with_catalog(row, selection, lines, &[], full)
}

/// `update_cascade` that also keeps catalog products in a narrowed product
/// list when their company, category and sub-category match the selection.
pub fn update_cascade_with_catalog(
    row: FilterRow,
    selection: &FilterSelection,
    lines: &[CaseProductLine],
    catalog: &[Product],
    full: &OptionSet,
) -> OptionSet {
    log_enter!("CASCADE", "update_cascade", "row={} lines={}", row, lines.len());

    let by_company = selection.truncated_to(CascadeLevel::Company);
    let categories = if by_company.is_empty() {
        full.categories.clone()
    } else {
        distinct_sorted(narrowed(row, &by_company, lines).map(|l| l.category()))
    };

    let by_category = selection.truncated_to(CascadeLevel::Category);
    let sub_categories = if by_category.is_empty() {
        full.sub_categories.clone()
    } else {
        distinct_sorted(narrowed(row, &by_category, lines).map(|l| l.sub_category()))
    };

    let by_sub_category = selection.truncated_to(CascadeLevel::SubCategory);
    let products = if by_sub_category.is_empty() {
        full.products.clone()
    } else {
        let mut builder = ProductOptionsBuilder::default();
        for line in narrowed(row, &by_sub_category, lines) {
            builder.push_line(line);
        }
        for product in catalog
            .iter()
            .filter(|p| row.owns_product(p) && by_sub_category.matches_product(p))
        {
            builder.push_catalog(product);
        }
        builder.finish()
    };

    let options = OptionSet {
        companies: full.companies.clone(),
        categories,
        sub_categories,
        products,
    };

    log_exit!(
        "CASCADE",
        "update_cascade",
        "categories={} sub_categories={} products={}",
        options.categories.len(),
        options.sub_categories.len(),
        options.products.len()
    );
    options
}

/// Applies one edit to a row and recomputes its options. Every level below
/// the edited one comes back cleared; the caller resets those widgets.
pub fn change_selection(
    row: FilterRow,
    selection: &FilterSelection,
    change: CascadeChange,
    lines: &[CaseProductLine],
    full: &OptionSet,
) -> CascadeUpdate {
    log_debug!("CASCADE", "row={} change={:?}", row, change);

    let selection = selection.with(change);
    let options = update_cascade(row, &selection, lines, full);
    CascadeUpdate { selection, options }
}

/// Cascaded options for both rows at once. Each row narrows by its own
/// selection only.
pub fn cascade_dual_row(
    company: &FilterSelection,
    competitor: &FilterSelection,
    lines: &[CaseProductLine],
    catalog: &[Product],
    full: &DualRowOptions,
) -> DualRowOptions {
    DualRowOptions {
        company: update_cascade_with_catalog(
            FilterRow::Company,
            company,
            lines,
            catalog,
            &full.company,
        ),
        competitor: update_cascade_with_catalog(
            FilterRow::Competitor,
            competitor,
            lines,
            catalog,
            &full.competitor,
        ),
    }
}

/// `change_selection` for callers that name the row as text ("company" or
/// "competitor", case-insensitive), such as a UI event payload.
pub fn change_row_selection(
    row_name: &str,
    selection: &FilterSelection,
    change: CascadeChange,
    lines: &[CaseProductLine],
    full: &DualRowOptions,
) -> Result<CascadeUpdate, AnalyticsError> {
    let row: FilterRow = row_name.parse()?;
    Ok(change_selection(row, selection, change, lines, full.row(row)))
}
