//! FILENAME: core/case-reports/src/engine.rs
//! Report Engine - Runs one ReportDefinition over a DataSnapshot.
//!
//! Pipeline:
//! 1. Scope the snapshot (dates, statuses, rep, account type)
//! 2. Index product lines by case
//! 3. Collect full option lists and narrow them per row selection
//! 4. Build the row predicates and pick the unit mode
//! 5. Aggregate metrics over every scoped case
//! 6. Resolve the visible cases and rank market share over the scoped cases,
//!    with the same row predicates deciding each bucket
//! 7. Pick the stat cards for the surface

use case_analytics::{
    build_row_predicates, cascade_dual_row, compute_metrics, log_enter, log_exit,
    rank_filtered_market_share, AnalyticsConfig, DataSnapshot, MetricsResult, UnitMode,
};
use case_model::CaseId;

use crate::definition::{ReportDefinition, ReportSurface};
use crate::error::ReportError;
use crate::view::{ReportView, StatCard, StatKind};

const DASHBOARD_CARDS: [StatKind; 8] = [
    StatKind::TotalCases,
    StatKind::CompanyCases,
    StatKind::CompetitorCases,
    StatKind::MixedCases,
    StatKind::CompanyUnits,
    StatKind::CompetitorUnits,
    StatKind::ActiveDoctors,
    StatKind::ActiveAccounts,
];

const CASES_LIST_CARDS: [StatKind; 4] = [
    StatKind::TotalCases,
    StatKind::CompanyCases,
    StatKind::CompetitorCases,
    StatKind::MixedCases,
];

const REP_VIEW_CARDS: [StatKind; 6] = [
    StatKind::TotalCases,
    StatKind::CompanyCases,
    StatKind::CompetitorCases,
    StatKind::MixedCases,
    StatKind::CompanyUnits,
    StatKind::CompetitorUnits,
];

// ============================================================================
// PUBLIC API
// ============================================================================

/// Calculates the view for one surface. The config is validated first so a
/// hand-built config cannot reach the ranker with `top_n == 0`.
pub fn calculate_report(
    definition: &ReportDefinition,
    snapshot: &DataSnapshot,
    config: &AnalyticsConfig,
) -> Result<ReportView, ReportError> {
    config.validate()?;

    log_enter!(
        "REPORT",
        "calculate_report",
        "surface={:?} cases={} lines={}",
        definition.surface,
        snapshot.cases.len(),
        snapshot.lines.len()
    );

    let scoped = snapshot.scoped(&definition.effective_scope());
    let index = scoped.index();

    let full_options = scoped.options();
    let options = cascade_dual_row(
        &definition.company,
        &definition.competitor,
        &scoped.lines,
        &scoped.products,
        &full_options,
    );

    let predicates = build_row_predicates(&definition.company, &definition.competitor);
    let unit_mode = config
        .unit_mode
        .unwrap_or_else(|| UnitMode::for_predicates(&predicates));

    let metrics = compute_metrics(
        &scoped.cases,
        &index,
        &predicates.company,
        &predicates.competitor,
        unit_mode,
    );

    let visible_cases: Vec<CaseId> = predicates
        .filter_cases(&scoped.cases, &index)
        .iter()
        .map(|case| case.id)
        .collect();

    let market_share = rank_filtered_market_share(
        &scoped.cases,
        &index,
        &predicates,
        definition.share_metric,
        config,
    );
    let stat_cards = stat_cards_for(&definition.surface, &metrics);

    log_exit!(
        "REPORT",
        "calculate_report",
        "visible={} total={} share_buckets={}",
        visible_cases.len(),
        metrics.total_case_count,
        market_share.labels.len()
    );

    Ok(ReportView {
        surface: definition.surface.clone(),
        metrics,
        unit_mode,
        market_share,
        company_options: options.company,
        competitor_options: options.competitor,
        visible_cases,
        stat_cards,
    })
}

/// JSON boundary used by hosts that exchange strings. A missing config
/// uses the defaults.
pub fn calculate_report_from_json(
    definition_json: &str,
    snapshot_json: &str,
    config_json: Option<&str>,
) -> Result<String, ReportError> {
    let definition: ReportDefinition =
        serde_json::from_str(definition_json).map_err(ReportError::Definition)?;
    let snapshot = DataSnapshot::from_json(snapshot_json)?;
    let config = match config_json {
        Some(json) => AnalyticsConfig::from_json(json)?,
        None => AnalyticsConfig::default(),
    };

    let view = calculate_report(&definition, &snapshot, &config)?;
    serde_json::to_string(&view).map_err(ReportError::Serialize)
}

// ============================================================================
// STAT CARDS
// ============================================================================

fn stat_cards_for(surface: &ReportSurface, metrics: &MetricsResult) -> Vec<StatCard> {
    let kinds: &[StatKind] = match surface {
        ReportSurface::Dashboard => &DASHBOARD_CARDS,
        ReportSurface::CasesList => &CASES_LIST_CARDS,
        ReportSurface::RepView { .. } => &REP_VIEW_CARDS,
    };

    kinds
        .iter()
        .map(|kind| StatCard {
            kind: *kind,
            label: kind.label().to_string(),
            value: kind.value(metrics),
        })
        .collect()
}
