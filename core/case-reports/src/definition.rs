//! FILENAME: core/case-reports/src/definition.rs
//! Report Definition - What one screen asks the engine for.
//!
//! Every surface (dashboard, cases list, rep view) is described by the same
//! structure and fed through the same pipeline. The surface only decides
//! which stat cards are shown and, for the rep view, pins the scope to one
//! rep.

use case_analytics::{CaseScope, ShareMetric};
use case_model::{FilterSelection, RepId};
use serde::{Deserialize, Serialize};

/// The UI surface a report is rendered on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportSurface {
    /// Organization-wide dashboard.
    Dashboard,
    /// The filterable cases table.
    CasesList,
    /// One rep's own cases.
    RepView { rep: RepId },
}

impl Default for ReportSurface {
    fn default() -> Self {
        ReportSurface::Dashboard
    }
}

/// The complete, serializable request for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDefinition {
    pub surface: ReportSurface,

    /// Company-row filter.
    pub company: FilterSelection,

    /// Competitor-row filter.
    pub competitor: FilterSelection,

    /// Date / status / account-type restriction applied before the rows.
    pub scope: CaseScope,

    /// What the market-share chart measures.
    pub share_metric: ShareMetric,
}

impl ReportDefinition {
    pub fn new(surface: ReportSurface) -> Self {
        ReportDefinition {
            surface,
            ..Self::default()
        }
    }

    pub fn with_company(mut self, selection: FilterSelection) -> Self {
        self.company = selection;
        self
    }

    pub fn with_competitor(mut self, selection: FilterSelection) -> Self {
        self.competitor = selection;
        self
    }

    pub fn with_scope(mut self, scope: CaseScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_share_metric(mut self, metric: ShareMetric) -> Self {
        self.share_metric = metric;
        self
    }

    /// The scope actually applied: a rep view always sees only its rep's
    /// cases, whatever `scope.submitted_by` says.
    pub fn effective_scope(&self) -> CaseScope {
        match &self.surface {
            ReportSurface::RepView { rep } => CaseScope {
                submitted_by: Some(rep.clone()),
                ..self.scope.clone()
            },
            _ => self.scope.clone(),
        }
    }
}
