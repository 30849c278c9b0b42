//! FILENAME: core/case-model/src/selection.rs
//! Filter Selections - Immutable snapshots of what the user picked.
//!
//! Each screen carries two independent rows of filters: one scoped to the
//! organization's products and one scoped to competitor products. A row is
//! a four-level cascade (company -> category -> sub-category -> product).
//! Changing a level produces a new selection with every lower level cleared.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::record::{non_empty, CaseProductLine, Product, ProductKey};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown filter row: {0}")]
    UnknownRow(String),
}

// ============================================================================
// FILTER ROW
// ============================================================================

/// Which side of the product relation a filter row is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterRow {
    Company,
    Competitor,
}

impl FilterRow {
    /// Whether the line belongs to this row's partition.
    pub fn owns(&self, line: &CaseProductLine) -> bool {
        match self {
            FilterRow::Company => line.is_company_product,
            FilterRow::Competitor => !line.is_company_product,
        }
    }

    /// Whether the catalog product belongs to this row's partition.
    pub fn owns_product(&self, product: &Product) -> bool {
        Self::from_flag(product.is_company_product) == *self
    }

    pub fn from_flag(is_company_product: bool) -> Self {
        if is_company_product {
            FilterRow::Company
        } else {
            FilterRow::Competitor
        }
    }
}

impl FromStr for FilterRow {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "company" => Ok(FilterRow::Company),
            "competitor" => Ok(FilterRow::Competitor),
            _ => Err(ModelError::UnknownRow(s.to_string())),
        }
    }
}

impl fmt::Display for FilterRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRow::Company => f.write_str("company"),
            FilterRow::Competitor => f.write_str("competitor"),
        }
    }
}

// ============================================================================
// CASCADE
// ============================================================================

/// Levels of a filter row, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CascadeLevel {
    Company,
    Category,
    SubCategory,
    Product,
}

/// A single edit to one level of a filter row. `None` clears the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeChange {
    Company(Option<String>),
    Category(Option<String>),
    SubCategory(Option<String>),
    Product(Option<ProductKey>),
}

impl CascadeChange {
    pub fn level(&self) -> CascadeLevel {
        match self {
            CascadeChange::Company(_) => CascadeLevel::Company,
            CascadeChange::Category(_) => CascadeLevel::Category,
            CascadeChange::SubCategory(_) => CascadeLevel::SubCategory,
            CascadeChange::Product(_) => CascadeLevel::Product,
        }
    }
}

// ============================================================================
// FILTER SELECTION
// ============================================================================

/// The current picks of one filter row. Every field is optional and an
/// empty selection matches every line on its side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub sub_category: Option<String>,

    /// Product id if known, else product name.
    #[serde(default)]
    pub product: Option<ProductKey>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a selection with only the company level set.
    pub fn company(company: &str) -> Self {
        Self::new().with(CascadeChange::Company(Some(company.to_string())))
    }

    pub fn company_value(&self) -> Option<&str> {
        non_empty(&self.company)
    }

    pub fn category_value(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn sub_category_value(&self) -> Option<&str> {
        non_empty(&self.sub_category)
    }

    /// True when no level carries a value.
    pub fn is_empty(&self) -> bool {
        self.company_value().is_none()
            && self.category_value().is_none()
            && self.sub_category_value().is_none()
            && self.product.is_none()
    }

    pub fn is_set(&self, level: CascadeLevel) -> bool {
        match level {
            CascadeLevel::Company => self.company_value().is_some(),
            CascadeLevel::Category => self.category_value().is_some(),
            CascadeLevel::SubCategory => self.sub_category_value().is_some(),
            CascadeLevel::Product => self.product.is_some(),
        }
    }

    /// Returns a new selection with the change applied and every level
    /// below the changed one cleared.
    pub fn with(&self, change: CascadeChange) -> Self {
        let mut next = self.truncated_above(change.level());
        match change {
            CascadeChange::Company(v) => next.company = v.filter(|s| !s.trim().is_empty()),
            CascadeChange::Category(v) => next.category = v.filter(|s| !s.trim().is_empty()),
            CascadeChange::SubCategory(v) => {
                next.sub_category = v.filter(|s| !s.trim().is_empty())
            }
            CascadeChange::Product(v) => next.product = v,
        }
        next
    }

    /// Keeps the levels strictly above `level` and drops the rest.
    fn truncated_above(&self, level: CascadeLevel) -> Self {
        FilterSelection {
            company: if level > CascadeLevel::Company { self.company.clone() } else { None },
            category: if level > CascadeLevel::Category { self.category.clone() } else { None },
            sub_category: if level > CascadeLevel::SubCategory {
                self.sub_category.clone()
            } else {
                None
            },
            product: None,
        }
    }

    /// Keeps the levels up to and including `level`.
    pub fn truncated_to(&self, level: CascadeLevel) -> Self {
        match level {
            CascadeLevel::Product => self.clone(),
            CascadeLevel::SubCategory => self.truncated_above(CascadeLevel::Product),
            CascadeLevel::Category => self.truncated_above(CascadeLevel::SubCategory),
            CascadeLevel::Company => self.truncated_above(CascadeLevel::Category),
        }
    }

    /// Whether the line satisfies every set level. Side is not checked here;
    /// callers restrict to a partition with `FilterRow::owns` first.
    pub fn matches_line(&self, line: &CaseProductLine) -> bool {
        if let Some(company) = self.company_value() {
            if line.company() != Some(company) {
                return false;
            }
        }
        if let Some(category) = self.category_value() {
            if line.category() != Some(category) {
                return false;
            }
        }
        if let Some(sub_category) = self.sub_category_value() {
            if line.sub_category() != Some(sub_category) {
                return false;
            }
        }
        match &self.product {
            Some(key) => key.matches(line),
            None => true,
        }
    }

    /// `matches_line` for a catalog product. Unset product fields never
    /// satisfy a set level.
    pub fn matches_product(&self, product: &Product) -> bool {
        if let Some(company) = self.company_value() {
            if product.company() != Some(company) {
                return false;
            }
        }
        if let Some(category) = self.category_value() {
            if product.category() != Some(category) {
                return false;
            }
        }
        if let Some(sub_category) = self.sub_category_value() {
            if product.sub_category() != Some(sub_category) {
                return false;
            }
        }
        match &self.product {
            Some(key) => product.key().as_ref() == Some(key),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_selection() -> FilterSelection {
        FilterSelection {
            company: Some("Acme".to_string()),
            category: Some("Cardio".to_string()),
            sub_category: Some("Statins".to_string()),
            product: Some(ProductKey::Id(3)),
        }
    }

    #[test]
    fn test_row_parsing() {
        assert_eq!("company".parse::<FilterRow>(), Ok(FilterRow::Company));
        assert_eq!(" Competitor ".parse::<FilterRow>(), Ok(FilterRow::Competitor));
        assert_eq!(
            "vendor".parse::<FilterRow>(),
            Err(ModelError::UnknownRow("vendor".to_string()))
        );
    }

    #[test]
    fn test_row_owns_partition() {
        let own = CaseProductLine::new(1, "Acme", true);
        let rival = CaseProductLine::new(1, "Rival", false);

        assert!(FilterRow::Company.owns(&own));
        assert!(!FilterRow::Company.owns(&rival));
        assert!(FilterRow::Competitor.owns(&rival));
        assert_eq!(FilterRow::from_flag(false), FilterRow::Competitor);
    }

    #[test]
    fn test_changing_company_clears_lower_levels() {
        let next = full_selection().with(CascadeChange::Company(Some("Beta".to_string())));

        assert_eq!(next.company.as_deref(), Some("Beta"));
        assert_eq!(next.category, None);
        assert_eq!(next.sub_category, None);
        assert_eq!(next.product, None);
    }

    #[test]
    fn test_changing_category_keeps_company() {
        let next = full_selection().with(CascadeChange::Category(None));

        assert_eq!(next.company.as_deref(), Some("Acme"));
        assert_eq!(next.category, None);
        assert_eq!(next.sub_category, None);
        assert_eq!(next.product, None);
    }

    #[test]
    fn test_changing_product_keeps_everything_above() {
        let next = full_selection().with(CascadeChange::Product(Some(ProductKey::Id(4))));

        assert_eq!(next.sub_category.as_deref(), Some("Statins"));
        assert_eq!(next.product, Some(ProductKey::Id(4)));
    }

    #[test]
    fn test_blank_change_is_unset() {
        let next = FilterSelection::new().with(CascadeChange::Company(Some("  ".to_string())));
        assert!(next.is_empty());
    }

    #[test]
    fn test_truncated_to() {
        let sel = full_selection();

        let upto_category = sel.truncated_to(CascadeLevel::Category);
        assert!(upto_category.is_set(CascadeLevel::Category));
        assert!(!upto_category.is_set(CascadeLevel::SubCategory));
        assert!(!upto_category.is_set(CascadeLevel::Product));

        assert_eq!(sel.truncated_to(CascadeLevel::Product), sel);
    }

    #[test]
    fn test_matches_line() {
        let mut line = CaseProductLine::new(1, "Acme", true);
        line.category = Some("Cardio".to_string());
        line.sub_category = Some("Statins".to_string());
        line.product_id = Some(3);

        assert!(FilterSelection::new().matches_line(&line));
        assert!(full_selection().matches_line(&line));
        assert!(!FilterSelection::company("Beta").matches_line(&line));

        line.category = None;
        assert!(!full_selection().matches_line(&line));
    }

    #[test]
    fn test_matches_product() {
        let product = Product {
            id: Some(3),
            name: "Lipora".to_string(),
            company_name: Some("Acme".to_string()),
            category: Some("Cardio".to_string()),
            sub_category: None,
            is_company_product: true,
        };

        assert!(FilterRow::Company.owns_product(&product));
        assert!(!FilterRow::Competitor.owns_product(&product));
        assert!(FilterSelection::company("Acme").matches_product(&product));
        assert!(!FilterSelection::company("Beta").matches_product(&product));
        // Sub-category is unset on the product.
        assert!(!full_selection().matches_product(&product));
        assert!(full_selection()
            .truncated_to(CascadeLevel::Category)
            .matches_product(&product));
    }
}
