use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::trend::DEFAULT_TREND;

#[derive(Debug, Clone, Deserialize)]
pub struct Site {
    pub site_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub site_type: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub status: String,
    /// Present on the at-risk listing.
    #[serde(default)]
    pub risk_score: Option<RiskScore>,
    /// Present on the single-site lookup.
    #[serde(default)]
    pub current_risk_score: Option<RiskScore>,
}

impl Site {
    pub fn latest_risk(&self) -> Option<&RiskScore> {
        self.risk_score.as_ref().or(self.current_risk_score.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskScore {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub calculated_date: String,
    #[serde(default)]
    pub contributing_signals: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub trend: Option<String>,
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RiskScore {
    pub fn trend(&self) -> &str {
        match self.trend.as_deref() {
            Some(trend) if !trend.is_empty() => trend,
            _ => DEFAULT_TREND,
        }
    }

    pub fn total_signals(&self) -> u64 {
        self.metadata
            .get("total_signals")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signal {
    pub signal_id: String,
    #[serde(default)]
    pub site_id: String,
    #[serde(default)]
    pub signal_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub detected_date: String,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub evidence: Option<Evidence>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub resolved_date: Option<String>,
}

impl Signal {
    pub fn quote(&self) -> Option<&str> {
        self.evidence
            .as_ref()
            .and_then(|evidence| evidence.quote.as_deref())
            .filter(|quote| !quote.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteHistory {
    pub site: Site,
    #[serde(default)]
    pub risk_history: Vec<RiskScore>,
    #[serde(default)]
    pub signals: Vec<Signal>,
}

impl SiteHistory {
    pub fn latest_risk(&self) -> Option<&RiskScore> {
        self.risk_history.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtRiskSites {
    #[serde(default)]
    pub sites: Vec<Site>,
    /// Matches above the threshold before `limit` was applied.
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignalBreakdown {
    #[serde(default)]
    pub total_signals: u64,
    #[serde(default)]
    pub breakdown_by_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub breakdown_by_severity: BTreeMap<String, u64>,
    #[serde(default)]
    pub top_sites_by_signal_count: Vec<SiteSignalCount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSignalCount {
    pub site_id: String,
    pub signal_count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BreakdownFilters {
    pub site_id: Option<String>,
    pub signal_type: Option<String>,
    pub severity: Option<String>,
    pub resolved: Option<bool>,
}

impl BreakdownFilters {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(value) = &self.site_id {
            pairs.push(("site_id", value.clone()));
        }
        if let Some(value) = &self.signal_type {
            pairs.push(("signal_type", value.clone()));
        }
        if let Some(value) = &self.severity {
            pairs.push(("severity", value.clone()));
        }
        if let Some(value) = self.resolved {
            pairs.push(("resolved", value.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveAck {
    #[serde(default)]
    pub status: String,
    pub signal_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub inspection_id: String,
    pub site_id: String,
    pub inspector_name: String,
    pub inspection_date: DateTime<Utc>,
    pub notes: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkOrder {
    pub work_order_id: String,
    pub site_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestAck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub signals_extracted: usize,
    #[serde(default)]
    pub signals: Vec<ExtractedSignal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedSignal {
    pub signal_id: String,
    #[serde(rename = "type", default)]
    pub signal_type: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_at_risk_listing_with_sparse_fields() {
        let body = r#"{
            "sites": [{
                "site_id": "site_001",
                "name": "Downtown Retail Store #45",
                "location": "123 Main St, Austin, TX 78701",
                "site_type": "retail",
                "risk_score": {
                    "score": 67.5,
                    "trend": "deteriorating",
                    "breakdown": {"missed_inspection": 30.0},
                    "metadata": {"total_signals": 3}
                }
            }],
            "count": 1,
            "min_score_threshold": 50.0
        }"#;

        let listing: AtRiskSites = serde_json::from_str(body).unwrap();
        assert_eq!(listing.sites.len(), 1);
        let site = &listing.sites[0];
        assert_eq!(site.region, None);
        let risk = site.latest_risk().unwrap();
        assert_eq!(risk.trend(), "deteriorating");
        assert_eq!(risk.total_signals(), 3);
        assert_eq!(risk.breakdown["missed_inspection"], 30.0);
    }

    #[test]
    fn missing_trend_reads_as_stable() {
        let risk: RiskScore = serde_json::from_str(r#"{"score": 10.0}"#).unwrap();
        assert_eq!(risk.trend(), "stable");
        assert_eq!(risk.total_signals(), 0);

        let risk: RiskScore = serde_json::from_str(r#"{"score": 10.0, "trend": ""}"#).unwrap();
        assert_eq!(risk.trend(), "stable");
    }

    #[test]
    fn signal_quote_ignores_empty_evidence() {
        let signal: Signal = serde_json::from_str(
            r#"{"signal_id": "sig_001", "evidence": {"quote": "", "inspection_id": "insp_001"}}"#,
        )
        .unwrap();
        assert_eq!(signal.quote(), None);

        let signal: Signal = serde_json::from_str(
            r#"{"signal_id": "sig_002", "evidence": {"quote": "HVAC filter needs replacement"}}"#,
        )
        .unwrap();
        assert_eq!(signal.quote(), Some("HVAC filter needs replacement"));
    }

    #[test]
    fn breakdown_filters_only_send_set_values() {
        let filters = BreakdownFilters {
            severity: Some("high".to_string()),
            resolved: Some(false),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("severity", "high".to_string()),
                ("resolved", "false".to_string())
            ]
        );
        assert!(BreakdownFilters::default().query_pairs().is_empty());
    }
}
