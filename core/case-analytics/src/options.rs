//! FILENAME: core/case-analytics/src/options.rs
//! Filter Option Collector - What each filter row can offer.
//!
//! The case-product relation is split into its company and competitor
//! partitions and each partition yields its own option lists. A value seen
//! only on company lines never shows up in the competitor row, even when a
//! competitor product carries the same name.

use std::collections::BTreeSet;

use case_model::{CaseProductLine, FilterRow, Product, ProductKey};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{log_enter, log_exit, log_warn};

// ============================================================================
// OPTION TYPES
// ============================================================================

/// One entry of a product selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Product id if known, else product name.
    pub value: ProductKey,
    /// Display text.
    pub label: String,
}

/// The selectable values of one filter row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSet {
    /// Distinct company names, sorted.
    pub companies: Vec<String>,
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    /// Distinct sub-categories, sorted.
    pub sub_categories: Vec<String>,
    /// De-duplicated products in discovery order.
    pub products: Vec<ProductOption>,
}

impl OptionSet {
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
            && self.categories.is_empty()
            && self.sub_categories.is_empty()
            && self.products.is_empty()
    }

    pub fn has_product(&self, key: &ProductKey) -> bool {
        self.products.iter().any(|p| &p.value == key)
    }
}

/// Option sets for both filter rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualRowOptions {
    pub company: OptionSet,
    pub competitor: OptionSet,
}

impl DualRowOptions {
    pub fn row(&self, row: FilterRow) -> &OptionSet {
        match row {
            FilterRow::Company => &self.company,
            FilterRow::Competitor => &self.competitor,
        }
    }
}

// ============================================================================
// PRODUCT DE-DUPLICATION
// ============================================================================

/// Accumulates product options, first occurrence wins.
#[derive(Debug, Default)]
pub(crate) struct ProductOptionsBuilder {
    seen: FxHashSet<ProductKey>,
    options: Vec<ProductOption>,
}

impl ProductOptionsBuilder {
    pub(crate) fn push_line(&mut self, line: &CaseProductLine) {
        let Some(key) = line.product_key() else {
            return;
        };
        if self.seen.insert(key.clone()) {
            let label = if line.product_name.trim().is_empty() {
                key.to_string()
            } else {
                line.product_name.clone()
            };
            self.options.push(ProductOption { value: key, label });
        }
    }

    /// Adds a catalog product unless it is already listed, either under its
    /// key or (for lines that were stored without a product id) its name.
    pub(crate) fn push_catalog(&mut self, product: &Product) {
        let Some(key) = product.key() else {
            log_warn!("OPTIONS", "catalog product without id or name skipped");
            return;
        };
        let by_name = ProductKey::Name(product.name.clone());
        if self.seen.contains(&key) || self.seen.contains(&by_name) {
            return;
        }
        self.seen.insert(key.clone());
        let label = if product.name.trim().is_empty() {
            key.to_string()
        } else {
            product.name.clone()
        };
        self.options.push(ProductOption { value: key, label });
    }

    pub(crate) fn finish(self) -> Vec<ProductOption> {
        self.options
    }
}

/// Distinct non-empty values, sorted lexicographically.
pub(crate) fn distinct_sorted<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Full, unfiltered option set for one row.
pub fn collect_row_options(
    row: FilterRow,
    lines: &[CaseProductLine],
    catalog: &[Product],
) -> OptionSet {
    let side: Vec<&CaseProductLine> = lines.iter().filter(|line| row.owns(line)).collect();

    let mut products = ProductOptionsBuilder::default();
    for line in &side {
        products.push_line(line);
    }
    for product in catalog
        .iter()
        .filter(|p| FilterRow::from_flag(p.is_company_product) == row)
    {
        products.push_catalog(product);
    }

    OptionSet {
        companies: distinct_sorted(side.iter().map(|l| l.company())),
        categories: distinct_sorted(side.iter().map(|l| l.category())),
        sub_categories: distinct_sorted(side.iter().map(|l| l.sub_category())),
        products: products.finish(),
    }
}

/// Option sets for both rows from the full case-product relation, completed
/// with catalog products nobody has used on a case yet.
pub fn collect_dual_row_options(lines: &[CaseProductLine], catalog: &[Product]) -> DualRowOptions {
    log_enter!(
        "OPTIONS",
        "collect_dual_row_options",
        "lines={} catalog={}",
        lines.len(),
        catalog.len()
    );

    let options = DualRowOptions {
        company: collect_row_options(FilterRow::Company, lines, catalog),
        competitor: collect_row_options(FilterRow::Competitor, lines, catalog),
    };

    log_exit!(
        "OPTIONS",
        "collect_dual_row_options",
        "company_products={} competitor_products={}",
        options.company.products.len(),
        options.competitor.products.len()
    );
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(
        company: &str,
        category: &str,
        sub: &str,
        product: (Option<u64>, &str),
        own: bool,
    ) -> CaseProductLine {
        let mut line = CaseProductLine::new(1, company, own);
        line.category = Some(category.to_string());
        line.sub_category = Some(sub.to_string());
        line.product_id = product.0;
        line.product_name = product.1.to_string();
        line
    }

    fn catalog_product(id: u64, name: &str, own: bool) -> Product {
        Product {
            id: Some(id),
            name: name.to_string(),
            company_name: None,
            category: None,
            sub_category: None,
            is_company_product: own,
        }
    }

    fn sample_lines() -> Vec<CaseProductLine> {
        vec![
            line("Pharmo", "Cardio", "Statins", (Some(1), "Lipora"), true),
            line("Pharmo", "Neuro", "", (Some(2), "Calmex"), true),
            line("Pharmo", "Cardio", "Statins", (Some(1), "Lipora renamed"), true),
            line("Rival", "Cardio", "Beta", (None, "Betarx"), false),
            line("Alpha", "Cardio", "Statins", (Some(9), "Lipora"), false),
        ]
    }

    #[test]
    fn test_partitions_values() {
        let options = collect_dual_row_options(&sample_lines(), &[]);

        assert_eq!(options.company.companies, vec!["Pharmo"]);
        assert_eq!(options.company.categories, vec!["Cardio", "Neuro"]);
        assert_eq!(options.company.sub_categories, vec!["Statins"]);

        assert_eq!(options.competitor.companies, vec!["Alpha", "Rival"]);
        assert_eq!(options.competitor.categories, vec!["Cardio"]);
        assert_eq!(options.competitor.sub_categories, vec!["Beta", "Statins"]);
    }

    #[test]
    fn test_products_first_occurrence_wins() {
        let options = collect_dual_row_options(&sample_lines(), &[]);

        let labels: Vec<&str> = options.company.products.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Lipora", "Calmex"]);
        assert_eq!(options.company.products[0].value, ProductKey::Id(1));

        assert_eq!(
            options.competitor.products[0].value,
            ProductKey::Name("Betarx".to_string())
        );
        assert_eq!(options.competitor.products[1].value, ProductKey::Id(9));
    }

    #[test]
    fn test_same_name_stays_on_its_side() {
        let options = collect_dual_row_options(&sample_lines(), &[]);

        assert!(options.company.has_product(&ProductKey::Id(1)));
        assert!(!options.company.has_product(&ProductKey::Id(9)));
        assert!(!options.competitor.has_product(&ProductKey::Id(1)));
    }

    #[test]
    fn test_catalog_completion() {
        let catalog = vec![
            catalog_product(1, "Lipora", true),
            catalog_product(3, "Newdrug", true),
            catalog_product(4, "Rivalnew", false),
            catalog_product(5, "Betarx", false),
        ];
        let options = collect_dual_row_options(&sample_lines(), &catalog);

        let company: Vec<&ProductKey> = options.company.products.iter().map(|p| &p.value).collect();
        assert_eq!(company, vec![&ProductKey::Id(1), &ProductKey::Id(2), &ProductKey::Id(3)]);

        // Betarx is already listed by name from a line without an id.
        let competitor: Vec<&str> =
            options.competitor.products.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(competitor, vec!["Betarx", "Lipora", "Rivalnew"]);
    }

    #[test]
    fn test_empty_input() {
        let options = collect_dual_row_options(&[], &[]);
        assert!(options.company.is_empty());
        assert!(options.competitor.is_empty());
    }

    #[test]
    fn test_row_accessor() {
        let options = collect_dual_row_options(&sample_lines(), &[]);
        assert_eq!(options.row(FilterRow::Competitor), &options.competitor);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(OptionSet::default()).unwrap();
        assert!(json.get("subCategories").is_some());
    }
}
