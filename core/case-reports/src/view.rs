//! FILENAME: core/case-reports/src/view.rs
//! Report View - Renderable output for the frontend.
//!
//! Everything a surface needs in one payload: stat cards, the market-share
//! chart series, the option lists of both filter rows (already narrowed by
//! the current selections) and the ids of the cases to list.

use case_analytics::{MarketShare, MetricsResult, OptionSet, UnitMode};
use case_model::CaseId;
use serde::{Deserialize, Serialize};

use crate::definition::ReportSurface;

/// Which number a stat card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    TotalCases,
    CompanyCases,
    CompetitorCases,
    MixedCases,
    CompanyUnits,
    CompetitorUnits,
    ActiveDoctors,
    ActiveAccounts,
}

impl StatKind {
    pub fn label(&self) -> &'static str {
        match self {
            StatKind::TotalCases => "Total Cases",
            StatKind::CompanyCases => "Company Cases",
            StatKind::CompetitorCases => "Competitor Cases",
            StatKind::MixedCases => "Mixed Cases",
            StatKind::CompanyUnits => "Company Units",
            StatKind::CompetitorUnits => "Competitor Units",
            StatKind::ActiveDoctors => "Active Doctors",
            StatKind::ActiveAccounts => "Active Accounts",
        }
    }

    pub fn value(&self, metrics: &MetricsResult) -> u64 {
        match self {
            StatKind::TotalCases => metrics.total_case_count as u64,
            StatKind::CompanyCases => metrics.company_case_count as u64,
            StatKind::CompetitorCases => metrics.competitor_case_count as u64,
            StatKind::MixedCases => metrics.mixed_case_count as u64,
            StatKind::CompanyUnits => metrics.company_units,
            StatKind::CompetitorUnits => metrics.competitor_units,
            StatKind::ActiveDoctors => metrics.active_doctors as u64,
            StatKind::ActiveAccounts => metrics.active_accounts as u64,
        }
    }
}

/// One stat card as the renderer consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub kind: StatKind,
    pub label: String,
    pub value: u64,
}

/// The complete output for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub surface: ReportSurface,
    pub metrics: MetricsResult,
    /// The unit source used for `metrics`.
    pub unit_mode: UnitMode,
    pub market_share: MarketShare,
    pub company_options: OptionSet,
    pub competitor_options: OptionSet,
    /// Cases to list, in input order.
    pub visible_cases: Vec<CaseId>,
    pub stat_cards: Vec<StatCard>,
}

impl ReportView {
    pub fn card(&self, kind: StatKind) -> Option<&StatCard> {
        self.stat_cards.iter().find(|card| card.kind == kind)
    }
}
