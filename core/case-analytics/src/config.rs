//! FILENAME: core/case-analytics/src/config.rs
//! Analytics configuration.
//!
//! Every field has a default, so a host may pass a partial JSON object (or
//! nothing at all). Configuration is data only; the engine never reads the
//! environment or the file system.

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;
use crate::market_share::CompetitorUnitAttribution;
use crate::metrics::UnitMode;

/// Number of competitors kept by name before the residual bucket.
pub const DEFAULT_TOP_N: usize = 10;

pub const DEFAULT_COMPANY_LABEL: &str = "Company";

pub const DEFAULT_OTHER_LABEL: &str = "Other Companies";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Competitors kept by name in the market-share ranking.
    pub top_n: usize,

    /// Label of the organization's bucket.
    pub company_label: String,

    /// Label of the residual competitor bucket.
    pub other_label: String,

    /// Fixed unit mode for every screen. `None` derives it per filter state.
    pub unit_mode: Option<UnitMode>,

    pub competitor_unit_attribution: CompetitorUnitAttribution,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            top_n: DEFAULT_TOP_N,
            company_label: DEFAULT_COMPANY_LABEL.to_string(),
            other_label: DEFAULT_OTHER_LABEL.to_string(),
            unit_mode: None,
            competitor_unit_attribution: CompetitorUnitAttribution::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Parses and validates a JSON config object.
    pub fn from_json(json: &str) -> Result<Self, AnalyticsError> {
        let config: AnalyticsConfig =
            serde_json::from_str(json).map_err(AnalyticsError::ConfigFormat)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.top_n == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "top_n must be at least 1".to_string(),
            ));
        }
        if self.company_label.trim().is_empty() {
            return Err(AnalyticsError::InvalidConfig(
                "company_label must not be blank".to_string(),
            ));
        }
        if self.other_label.trim().is_empty() {
            return Err(AnalyticsError::InvalidConfig(
                "other_label must not be blank".to_string(),
            ));
        }
        if self.other_label == self.company_label {
            return Err(AnalyticsError::InvalidConfig(
                "other_label must differ from company_label".to_string(),
            ));
        }
        Ok(())
    }
}
