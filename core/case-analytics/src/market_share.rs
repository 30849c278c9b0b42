//! FILENAME: core/case-analytics/src/market_share.rs
//! Market-Share Ranker - The organization against its named competitors.
//!
//! Buckets are filled per case, never per line: a case naming the same
//! competitor on two lines counts once for it. Competitors are ranked by
//! value, the top N are kept by name and the rest fold into a single
//! residual bucket. The organization's bucket always comes first.

use case_model::{CaseProductLine, CaseRecord, FilterSelection};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::AnalyticsConfig;
use crate::index::CaseProductIndex;
use crate::predicate::{build_row_predicates, CasePredicate, RowPredicates};
use crate::{log_enter, log_exit, log_warn};

/// What a bucket measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareMetric {
    /// Number of cases.
    Count,
    /// Unit volume.
    Units,
}

impl Default for ShareMetric {
    fn default() -> Self {
        ShareMetric::Count
    }
}

/// How a case's competitor units are attributed when it names more than one
/// competitor company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorUnitAttribution {
    /// Every competitor in the case receives the case's full
    /// `total_competitor_units`. Multi-competitor cases are counted once per
    /// competitor.
    CaseTotal,
    /// Every competitor receives the units of its own lines in the case.
    CompanyLines,
}

impl Default for CompetitorUnitAttribution {
    fn default() -> Self {
        CompetitorUnitAttribution::CaseTotal
    }
}

/// Chart-ready ranking: parallel label and value lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketShare {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

impl MarketShare {
    /// Sum of every bucket after the organization's.
    pub fn competitor_total(&self) -> u64 {
        self.data.iter().skip(1).sum()
    }

    /// Each bucket as a percentage of the grand total (0 when empty).
    pub fn percentages(&self) -> Vec<f64> {
        let total: u64 = self.data.iter().sum();
        self.data
            .iter()
            .map(|&v| if total == 0 { 0.0 } else { v as f64 * 100.0 / total as f64 })
            .collect()
    }

    pub fn value_of(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|i| self.data.get(i).copied())
    }
}

/// Distinct competitor company names of a case, in first-seen order.
fn competitor_names<'a>(
    lines: impl Iterator<Item = &'a CaseProductLine>,
) -> SmallVec<[&'a str; 4]> {
    let mut names: SmallVec<[&str; 4]> = SmallVec::new();
    for name in lines.filter_map(CaseProductLine::company) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Ranks the organization and competitor companies by case count or unit
/// volume over `cases`, with no row filter applied.
pub fn rank_market_share(
    cases: &[CaseRecord],
    index: &CaseProductIndex,
    metric: ShareMetric,
    config: &AnalyticsConfig,
) -> MarketShare {
    let unfiltered = build_row_predicates(&FilterSelection::new(), &FilterSelection::new());
    rank_filtered_market_share(cases, index, &unfiltered, metric, config)
}

/// Ranks over the same case set and row predicates the stat cards use.
///
/// The organization bucket counts cases matching the company row, so its
/// count equals `MetricsResult::company_case_count` for the same inputs.
/// Competitor names come only from lines passing the competitor row's line
/// test. A competitor named like the organization or residual bucket is
/// folded into the residual bucket so labels stay unique.
pub fn rank_filtered_market_share(
    cases: &[CaseRecord],
    index: &CaseProductIndex,
    predicates: &RowPredicates,
    metric: ShareMetric,
    config: &AnalyticsConfig,
) -> MarketShare {
    log_enter!(
        "SHARE",
        "rank_market_share",
        "cases={} metric={:?} top_n={} filtered={}",
        cases.len(),
        metric,
        config.top_n,
        predicates.any_active()
    );

    let mut company_bucket = 0u64;
    let mut buckets: FxHashMap<String, u64> = FxHashMap::default();
    let mut folded = 0u64;

    for case in cases {
        if predicates.company.matches(case, index) {
            company_bucket += match metric {
                ShareMetric::Count => 1,
                ShareMetric::Units => case.total_company_units,
            };
        }

        let names = competitor_names(predicates.competitor.matching_lines(case.id, index));
        for name in names {
            let contribution = match (metric, config.competitor_unit_attribution) {
                (ShareMetric::Count, _) => 1,
                (ShareMetric::Units, CompetitorUnitAttribution::CaseTotal) => {
                    case.total_competitor_units
                }
                (ShareMetric::Units, CompetitorUnitAttribution::CompanyLines) => predicates
                    .competitor
                    .matching_lines(case.id, index)
                    .filter(|line| line.company() == Some(name))
                    .map(|line| u64::from(line.units))
                    .sum(),
            };
            if name == config.company_label || name == config.other_label {
                folded += contribution;
            } else {
                *buckets.entry(name.to_string()).or_insert(0) += contribution;
            }
        }
    }

    if folded > 0 {
        log_warn!(
            "SHARE",
            "competitor named like a reserved label folded into '{}': {}",
            config.other_label,
            folded
        );
    }

    let mut ranked: Vec<(String, u64)> = buckets.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let competitor_total: u64 = ranked.iter().map(|(_, v)| v).sum::<u64>() + folded;
    let distinct = ranked.len();
    ranked.truncate(config.top_n);
    let top_total: u64 = ranked.iter().map(|(_, v)| v).sum();

    let mut share = MarketShare {
        labels: Vec::with_capacity(ranked.len() + 2),
        data: Vec::with_capacity(ranked.len() + 2),
    };
    share.labels.push(config.company_label.clone());
    share.data.push(company_bucket);
    for (name, value) in ranked {
        share.labels.push(name);
        share.data.push(value);
    }
    if competitor_total > top_total {
        share.labels.push(config.other_label.clone());
        share.data.push(competitor_total - top_total);
    }

    log_exit!(
        "SHARE",
        "rank_market_share",
        "competitors={} buckets={}",
        distinct,
        share.labels.len()
    );
    share
}
