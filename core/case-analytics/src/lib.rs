//! FILENAME: core/case-analytics/src/lib.rs
//! Case Analytics subsystem.
//!
//! Pure functions that turn the flat case / case-product relation into
//! filter option lists and the numbers every screen shows. It depends on
//! `case-model` only for shared record and selection types.
//!
//! Layers:
//! - `index`: Case id -> ordered product lines (the shared dictionary)
//! - `options` / `cascade`: What each filter row can offer
//! - `predicate`: Per-case membership for the company and competitor rows
//! - `metrics` / `market_share`: Counts, unit sums and rankings
//! - `scope` / `snapshot` / `config`: Inputs around the pipeline

pub mod cascade;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod market_share;
pub mod metrics;
pub mod options;
pub mod predicate;
pub mod scope;
pub mod snapshot;

pub use cascade::{
    cascade_dual_row, change_row_selection, change_selection, update_cascade,
    update_cascade_with_catalog, CascadeUpdate,
};
pub use config::AnalyticsConfig;
pub use error::AnalyticsError;
pub use index::{index, CaseProductIndex};
pub use market_share::{
    rank_filtered_market_share, rank_market_share, CompetitorUnitAttribution, MarketShare,
    ShareMetric,
};
pub use metrics::{compute_metrics, MetricsResult, UnitMode};
pub use options::{
    collect_dual_row_options, collect_row_options, DualRowOptions, OptionSet, ProductOption,
};
pub use predicate::{
    build_row_predicates, filter_cases, CaseMembership, CasePredicate, RowPredicate,
    RowPredicates,
};
pub use scope::CaseScope;
pub use snapshot::DataSnapshot;
