//! JSON request format for a complete analysis
//!
//! ```json
//! {
//!   "initialInvestment": 100000,
//!   "discountRatePercent": 10,
//!   "includeTax": true,
//!   "taxRatePercent": 25,
//!   "cashFlows": [{ "year": 1, "value": 25000 }, { "year": 2, "value": 30000 }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::{AnalyzerConfig, IrrOptions};
use crate::cashflow::{AnalysisParameters, CashFlowPeriod};
use crate::error::Result;

/// Parameters, cash flows and optional IRR tuning in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub parameters: AnalysisParameters,

    pub cash_flows: Vec<CashFlowPeriod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irr_options: Option<IrrOptions>,
}

impl AnalysisRequest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Analyzer configuration implied by the request
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            irr: self.irr_options.unwrap_or_default(),
        }
    }
}
