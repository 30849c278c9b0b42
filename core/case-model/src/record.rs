//! FILENAME: core/case-model/src/record.rs
//! Case Records - The rows the data store hands to the analytics engine.
//!
//! These structures mirror the shape of the store's query results:
//! - `CaseRecord`: one sales visit (the owning side)
//! - `CaseProductLine`: one product entry on a case (the owned side)
//! - `Product`: a catalog entry, used to complete option lists
//!
//! Nothing in here is ever mutated by the analytics engine. Missing or blank
//! values are kept as-is and treated as "unset" by the accessors below.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for a case.
pub type CaseId = u64;

/// Unique identifier for a catalog product.
pub type ProductId = u64;

/// Identifier of the rep who submitted a case (auth user id).
pub type RepId = String;

/// Identifier of a doctor or account row.
pub type EntityId = u64;

// ============================================================================
// HELPERS
// ============================================================================

/// Returns the value only when it holds something other than whitespace.
/// Every grouping and filtering step treats blank strings as missing.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.as_str()),
        _ => None,
    }
}

/// Deserializes `null` as the type's default. The store sends explicit nulls
/// for unset numeric and boolean columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// CASE STATUS
// ============================================================================

/// Approval state of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Submitted, waiting for a manager decision.
    Pending,
    /// Accepted by the approval workflow.
    Approved,
    /// Rejected by the approval workflow.
    Rejected,
    /// Any status string this version does not know about.
    #[serde(other)]
    Unknown,
}

impl Default for CaseStatus {
    fn default() -> Self {
        CaseStatus::Pending
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseStatus::Pending => "pending",
            CaseStatus::Approved => "approved",
            CaseStatus::Rejected => "rejected",
            CaseStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// ============================================================================
// ENTITY KEY
// ============================================================================

/// Identity of a doctor or account for distinct counting.
///
/// The id wins when the store supplies one; otherwise the display name is
/// used verbatim, so differently spelled names stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKey {
    Id(EntityId),
    Name(String),
}

impl EntityKey {
    fn resolve(id: Option<EntityId>, name: &Option<String>) -> Option<Self> {
        match id {
            Some(id) => Some(EntityKey::Id(id)),
            None => non_empty(name).map(|n| EntityKey::Name(n.to_string())),
        }
    }
}

// ============================================================================
// CASE RECORD
// ============================================================================

/// One recorded sales visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,

    #[serde(default)]
    pub case_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: CaseStatus,

    #[serde(default)]
    pub account_type: Option<String>,

    /// The rep who submitted the case.
    #[serde(default)]
    pub submitted_by: Option<RepId>,

    #[serde(default)]
    pub doctor_id: Option<EntityId>,

    #[serde(default)]
    pub doctor_name: Option<String>,

    #[serde(default)]
    pub account_id: Option<EntityId>,

    #[serde(default)]
    pub account_name: Option<String>,

    /// Units of the organization's products, summed at write time.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_company_units: u64,

    /// Units of competitor products, summed at write time.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_competitor_units: u64,
}

impl CaseRecord {
    /// Creates a pending case with no references and zero totals.
    pub fn new(id: CaseId) -> Self {
        CaseRecord {
            id,
            case_date: None,
            status: CaseStatus::Pending,
            account_type: None,
            submitted_by: None,
            doctor_id: None,
            doctor_name: None,
            account_id: None,
            account_name: None,
            total_company_units: 0,
            total_competitor_units: 0,
        }
    }

    pub fn doctor_key(&self) -> Option<EntityKey> {
        EntityKey::resolve(self.doctor_id, &self.doctor_name)
    }

    pub fn account_key(&self) -> Option<EntityKey> {
        EntityKey::resolve(self.account_id, &self.account_name)
    }
}

// ============================================================================
// CASE PRODUCT LINE
// ============================================================================

/// One product entry on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseProductLine {
    /// Owning case. Lines without one are dropped by the indexer.
    #[serde(default)]
    pub case_id: Option<CaseId>,

    #[serde(default)]
    pub product_id: Option<ProductId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub sub_category: Option<String>,

    /// true = the organization's own product, false = a competitor's.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_company_product: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub units: u32,

    /// Position within the case. Missing sorts as 0.
    #[serde(default)]
    pub sequence: Option<i32>,
}

impl CaseProductLine {
    /// Creates a line with only the owning case, side and company filled in.
    pub fn new(case_id: CaseId, company_name: &str, is_company_product: bool) -> Self {
        CaseProductLine {
            case_id: Some(case_id),
            product_id: None,
            product_name: String::new(),
            company_name: Some(company_name.to_string()),
            category: None,
            sub_category: None,
            is_company_product,
            units: 0,
            sequence: None,
        }
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(&self.company_name)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn sub_category(&self) -> Option<&str> {
        non_empty(&self.sub_category)
    }

    /// The product's surrogate key: the id if known, else the name.
    /// Returns `None` when the line carries neither.
    pub fn product_key(&self) -> Option<ProductKey> {
        ProductKey::resolve(self.product_id, &self.product_name)
    }
}

// ============================================================================
// CATALOG PRODUCT
// ============================================================================

/// A product from the catalog, whether or not any case has used it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<ProductId>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub sub_category: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_company_product: bool,
}

impl Product {
    pub fn key(&self) -> Option<ProductKey> {
        ProductKey::resolve(self.id, &self.name)
    }

    pub fn company(&self) -> Option<&str> {
        non_empty(&self.company_name)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn sub_category(&self) -> Option<&str> {
        non_empty(&self.sub_category)
    }
}

// ============================================================================
// PRODUCT KEY
// ============================================================================

/// Surrogate key for a product: the id when known, otherwise the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductKey {
    Id(ProductId),
    Name(String),
}

impl ProductKey {
    fn resolve(id: Option<ProductId>, name: &str) -> Option<Self> {
        match id {
            Some(id) => Some(ProductKey::Id(id)),
            None if !name.trim().is_empty() => Some(ProductKey::Name(name.to_string())),
            None => None,
        }
    }

    /// Id-or-name equality against a line: an id key matches the line's
    /// product id, a name key matches the line's product name.
    pub fn matches(&self, line: &CaseProductLine) -> bool {
        match self {
            ProductKey::Id(id) => line.product_id == Some(*id),
            ProductKey::Name(name) => line.product_name == *name,
        }
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKey::Id(id) => write!(f, "{}", id),
            ProductKey::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_unset() {
        let mut line = CaseProductLine::new(1, "  ", true);
        line.category = Some(String::new());
        line.sub_category = Some("Oral".to_string());

        assert_eq!(line.company(), None);
        assert_eq!(line.category(), None);
        assert_eq!(line.sub_category(), Some("Oral"));
    }

    #[test]
    fn test_product_key_prefers_id() {
        let mut line = CaseProductLine::new(1, "Acme", true);
        line.product_name = "Zentrol".to_string();
        assert_eq!(line.product_key(), Some(ProductKey::Name("Zentrol".to_string())));

        line.product_id = Some(42);
        assert_eq!(line.product_key(), Some(ProductKey::Id(42)));

        line.product_id = None;
        line.product_name.clear();
        assert_eq!(line.product_key(), None);
    }

    #[test]
    fn test_product_key_matching() {
        let mut line = CaseProductLine::new(1, "Acme", true);
        line.product_id = Some(7);
        line.product_name = "Zentrol".to_string();

        assert!(ProductKey::Id(7).matches(&line));
        assert!(ProductKey::Name("Zentrol".to_string()).matches(&line));
        assert!(!ProductKey::Id(8).matches(&line));
        assert!(!ProductKey::Name("zentrol".to_string()).matches(&line));
    }

    #[test]
    fn test_entity_key_falls_back_to_name() {
        let mut case = CaseRecord::new(1);
        assert_eq!(case.doctor_key(), None);

        case.doctor_name = Some("Dr. Lee".to_string());
        assert_eq!(case.doctor_key(), Some(EntityKey::Name("Dr. Lee".to_string())));

        case.doctor_id = Some(9);
        assert_eq!(case.doctor_key(), Some(EntityKey::Id(9)));
    }

    #[test]
    fn test_deserialize_store_row_with_nulls() {
        let json = r#"{
            "id": 12,
            "case_date": "2024-03-05",
            "status": "approved",
            "doctor_name": "Dr. Lee",
            "total_company_units": null,
            "total_competitor_units": 4
        }"#;
        let case: CaseRecord = serde_json::from_str(json).unwrap();

        assert_eq!(case.id, 12);
        assert_eq!(case.status, CaseStatus::Approved);
        assert_eq!(case.case_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(case.total_company_units, 0);
        assert_eq!(case.total_competitor_units, 4);
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let case: CaseRecord =
            serde_json::from_str(r#"{"id": 1, "status": "archived"}"#).unwrap();
        assert_eq!(case.status, CaseStatus::Unknown);
    }

    #[test]
    fn test_deserialize_line() {
        let json = r#"{
            "case_id": 3,
            "product_id": null,
            "product_name": "Zentrol",
            "company_name": "Acme",
            "is_company_product": false,
            "units": 4,
            "sequence": 2
        }"#;
        let line: CaseProductLine = serde_json::from_str(json).unwrap();

        assert_eq!(line.case_id, Some(3));
        assert!(!line.is_company_product);
        assert_eq!(line.units, 4);
        assert_eq!(line.product_key(), Some(ProductKey::Name("Zentrol".to_string())));
    }

    #[test]
    fn test_product_key_untagged_serde() {
        let id: ProductKey = serde_json::from_str("17").unwrap();
        let name: ProductKey = serde_json::from_str("\"Zentrol\"").unwrap();

        assert_eq!(id, ProductKey::Id(17));
        assert_eq!(name, ProductKey::Name("Zentrol".to_string()));
        assert_eq!(id.to_string(), "17");
    }
}
