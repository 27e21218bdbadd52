//! Terminal views. Each function returns the full text so commands can
//! print it and tests can inspect it.

use std::fmt::Write;

use crate::dates::format_date;
use crate::models::{AtRiskSites, Signal, SignalBreakdown, Site, SiteHistory};
use crate::risk::{classify_risk_tier, format_score, risk_color, tier_to_badge_style};
use crate::severity::classify_severity_style;
use crate::style::{Painter, Tint};
use crate::trend::{classify_trend, DEFAULT_TREND};

pub fn humanize(label: &str) -> String {
    label.replace('_', " ")
}

pub fn risk_badge(painter: &Painter, score: f64) -> String {
    let style = tier_to_badge_style(classify_risk_tier(score));
    painter.badge(style, &format_score(score))
}

pub fn severity_badge(painter: &Painter, severity: &str) -> String {
    painter.badge(classify_severity_style(severity), severity)
}

pub fn trend_label(painter: &Painter, trend: &str) -> String {
    let indicator = classify_trend(trend);
    painter.paint(
        indicator.color,
        &format!("{} {}", indicator.icon.glyph(), trend),
    )
}

pub fn site_card(painter: &Painter, site: &Site) -> String {
    let risk = site.latest_risk();
    let score = risk.map(|r| r.score).unwrap_or(0.0);
    let trend = risk.map(|r| r.trend()).unwrap_or(DEFAULT_TREND);
    let signals = risk.map(|r| r.total_signals()).unwrap_or(0);
    let region = site.region.as_deref().unwrap_or("No region");

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}  {}",
        painter.bold(&site.name),
        risk_badge(painter, score)
    );
    let _ = writeln!(output, "  {}", site.location);
    let _ = writeln!(
        output,
        "  {} active signals | {} • {} | {}",
        signals,
        site.site_type,
        region,
        trend_label(painter, trend)
    );
    let _ = writeln!(output, "  id: {}", site.site_id);
    output
}

pub fn signal_timeline(painter: &Painter, signals: &[Signal]) -> String {
    let mut output = String::new();

    if signals.is_empty() {
        let _ = writeln!(
            output,
            "{}",
            painter.paint(
                Tint::Green,
                "No active execution signals. Site is performing well!"
            )
        );
        return output;
    }

    for signal in signals {
        let _ = writeln!(
            output,
            "{} {}  {}",
            painter.paint(Tint::Orange, "!"),
            painter.bold(&humanize(&signal.signal_type)),
            severity_badge(painter, &signal.severity)
        );
        if !signal.explanation.is_empty() {
            let _ = writeln!(output, "  {}", signal.explanation);
        }
        if let Some(quote) = signal.quote() {
            let _ = writeln!(output, "  \"{}\"", quote);
        }
        let _ = writeln!(
            output,
            "  {} | Confidence: {:.0}% | id: {}",
            format_date(&signal.detected_date),
            (signal.confidence_score * 100.0).round(),
            signal.signal_id
        );
        if let Some(source_type) = signal.source_type.as_deref() {
            match signal.source_id.as_deref() {
                Some(source_id) => {
                    let _ = writeln!(output, "  Source: {} {}", humanize(source_type), source_id);
                }
                None => {
                    let _ = writeln!(output, "  Source: {}", humanize(source_type));
                }
            }
        }
        if signal.resolved {
            let resolved = match signal.resolved_date.as_deref() {
                Some(date) => format!("Resolved {}", format_date(date)),
                None => "Resolved".to_string(),
            };
            let _ = writeln!(output, "  {}", painter.paint(Tint::Green, &resolved));
        }
        let _ = writeln!(output);
    }

    output
}

pub fn dashboard(painter: &Painter, listing: &AtRiskSites, min_score: f64) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", painter.bold("At-Risk Sites"));
    let _ = writeln!(output, "Execution intelligence from the ground up");
    let _ = writeln!(
        output,
        "Minimum risk score: {} | {} sites",
        painter.paint(risk_color(min_score), &min_score.to_string()),
        listing.sites.len()
    );
    if listing.count > listing.sites.len() {
        let _ = writeln!(
            output,
            "Showing {} of {} matching sites",
            listing.sites.len(),
            listing.count
        );
    }
    let _ = writeln!(output);

    if listing.sites.is_empty() {
        let _ = writeln!(
            output,
            "No sites found above risk threshold of {}",
            min_score
        );
        return output;
    }

    for site in &listing.sites {
        output.push_str(&site_card(painter, site));
        let _ = writeln!(output);
    }
    output
}

pub fn site_detail(painter: &Painter, history: Option<&SiteHistory>) -> String {
    let mut output = String::new();

    let Some(history) = history else {
        let _ = writeln!(output, "Site not found");
        return output;
    };

    let site = &history.site;
    let latest = history.latest_risk();

    match latest {
        Some(risk) => {
            let _ = writeln!(
                output,
                "{}  {}",
                painter.bold(&site.name),
                risk_badge(painter, risk.score)
            );
        }
        None => {
            let _ = writeln!(output, "{}", painter.bold(&site.name));
        }
    }
    let _ = writeln!(output, "  {}", site.location);
    let _ = writeln!(
        output,
        "  Type: {} | Region: {} | Status: {}",
        site.site_type,
        site.region.as_deref().unwrap_or("N/A"),
        site.status
    );

    if let Some(risk) = latest {
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "{}  {}",
            painter.bold("Risk Assessment"),
            trend_label(painter, risk.trend())
        );
        if !risk.explanation.is_empty() {
            let _ = writeln!(output, "  {}", risk.explanation);
        }
        if !risk.calculated_date.is_empty() {
            let _ = writeln!(
                output,
                "  Calculated {} from {} signals",
                format_date(&risk.calculated_date),
                risk.contributing_signals.len()
            );
        }
        for (category, score) in &risk.breakdown {
            let _ = writeln!(output, "  - {}: {}", humanize(category), format_score(*score));
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", painter.bold("Execution Signals"));
    output.push_str(&signal_timeline(painter, &history.signals));
    output
}

pub fn breakdown(painter: &Painter, breakdown: &SignalBreakdown) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", painter.bold("Signal Breakdown"));
    let _ = writeln!(output, "Total signals: {}", breakdown.total_signals);

    let _ = writeln!(output);
    let _ = writeln!(output, "By severity:");
    if breakdown.breakdown_by_severity.is_empty() {
        let _ = writeln!(output, "  none");
    }
    for (severity, count) in &breakdown.breakdown_by_severity {
        let _ = writeln!(output, "  {} {}", severity_badge(painter, severity), count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "By type:");
    if breakdown.breakdown_by_type.is_empty() {
        let _ = writeln!(output, "  none");
    }
    for (signal_type, count) in &breakdown.breakdown_by_type {
        let _ = writeln!(output, "  {}: {}", humanize(signal_type), count);
    }

    if !breakdown.top_sites_by_signal_count.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Top sites:");
        for entry in &breakdown.top_sites_by_signal_count {
            let _ = writeln!(output, "  {}: {} signals", entry.site_id, entry.signal_count);
        }
    }

    output
}
