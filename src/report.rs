use std::collections::BTreeMap;
use std::fmt::Write;

use crate::dates::{format_date, parse_timestamp};
use crate::models::{Signal, SignalBreakdown, Site};
use crate::render::humanize;
use crate::risk::{classify_risk_tier, format_score, RiskTier};
use crate::trend::DEFAULT_TREND;

#[derive(Debug, Clone, PartialEq)]
pub struct SignalTypeSummary {
    pub signal_type: String,
    pub count: u64,
}

pub fn summarize_by_type(breakdown: &SignalBreakdown) -> Vec<SignalTypeSummary> {
    let mut summaries: Vec<SignalTypeSummary> = breakdown
        .breakdown_by_type
        .iter()
        .map(|(signal_type, count)| SignalTypeSummary {
            signal_type: signal_type.clone(),
            count: *count,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.signal_type.cmp(&b.signal_type))
    });
    summaries
}

pub fn summarize_by_tier(sites: &[Site]) -> BTreeMap<RiskTier, usize> {
    let mut tiers = BTreeMap::new();
    for site in sites {
        let score = site.latest_risk().map(|r| r.score).unwrap_or(0.0);
        *tiers.entry(classify_risk_tier(score)).or_insert(0) += 1;
    }
    tiers
}

fn most_recent_first(signals: &[Signal]) -> Vec<&Signal> {
    let mut ordered: Vec<&Signal> = signals.iter().collect();
    ordered.sort_by(|a, b| {
        parse_timestamp(&b.detected_date).cmp(&parse_timestamp(&a.detected_date))
    });
    ordered
}

pub fn build_report(
    min_score: f64,
    sites: &[Site],
    breakdown: &SignalBreakdown,
    recent_signals: &[Signal],
) -> String {
    let summaries = summarize_by_type(breakdown);
    let tiers = summarize_by_tier(sites);

    let mut output = String::new();

    let _ = writeln!(output, "# At-Risk Sites Report");
    let _ = writeln!(
        output,
        "Sites with risk score of at least {} ({} sites)",
        min_score,
        sites.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Tiers");

    for tier in RiskTier::ALL {
        let _ = writeln!(
            output,
            "- {}: {}",
            tier,
            tiers.get(&tier).copied().unwrap_or(0)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Signal Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No signals recorded.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} signals",
                humanize(&summary.signal_type),
                summary.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Risk Sites");

    if sites.is_empty() {
        let _ = writeln!(output, "No sites above this threshold.");
    } else {
        for site in sites.iter().take(10) {
            let (score, trend) = site
                .latest_risk()
                .map(|r| (r.score, r.trend()))
                .unwrap_or((0.0, DEFAULT_TREND));
            let _ = writeln!(
                output,
                "- {} ({}) score {} [{}], {}",
                site.name,
                site.location,
                format_score(score),
                classify_risk_tier(score),
                trend
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Signal Notes");

    if recent_signals.is_empty() {
        let _ = writeln!(output, "No signals recorded.");
    } else {
        for signal in most_recent_first(recent_signals).into_iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}, {}) on {}: {}",
                signal.site_id,
                humanize(&signal.signal_type),
                signal.severity,
                format_date(&signal.detected_date),
                signal.explanation
            );
        }
    }

    output
}
