use serde::Serialize;
use tabled::{
    Table,
    Tabled,
};

/// One before/after record per corrected channel, for interactive
/// debugging. Advisory output only; correction does not depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct CorrectionTrace {
    #[tabled(rename = "Index")]
    pub index: usize,
    #[tabled(rename = "Channel")]
    pub label: &'static str,
    #[tabled(rename = "Observed")]
    pub observed: f64,
    #[tabled(rename = "Corrected")]
    pub corrected: f64,
    /// Change relative to the most intense observed channel, in percent.
    #[tabled(rename = "% of max")]
    pub pct_of_max: f64,
}

/// Render trace records as a plain-text table for a console or log sink.
pub fn render_trace_table(records: &[CorrectionTrace]) -> String {
    Table::new(records).to_string()
}
