//! FILENAME: core/case-reports/src/lib.rs
//! Case Reports subsystem.
//!
//! The dashboard, cases list and rep view all run through one pipeline.
//! This crate wires `case-analytics` into that pipeline and shapes its
//! output for the stat cards, market-share chart and case table.
//!
//! Layers:
//! - `definition`: Serializable request (what the screen asks for)
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `engine`: Calculation pipeline (HOW we calculate)

pub mod definition;
pub mod engine;
pub mod error;
pub mod view;

pub use definition::*;
pub use engine::{calculate_report, calculate_report_from_json};
pub use error::ReportError;
pub use view::*;
