use crate::style::{StyleDescriptor, Tint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityTier {
    Critical,
    High,
    Medium,
    Low,
    /// Any label outside the four known values, including case variants.
    Unrecognized,
}

pub const FALLBACK_SEVERITY_STYLE: StyleDescriptor = StyleDescriptor::uniform(Tint::Gray);

impl SeverityTier {
    pub fn style(&self) -> StyleDescriptor {
        match self {
            SeverityTier::Critical => StyleDescriptor::uniform(Tint::Red),
            SeverityTier::High => StyleDescriptor::uniform(Tint::Orange),
            SeverityTier::Medium => StyleDescriptor::uniform(Tint::Yellow),
            SeverityTier::Low => StyleDescriptor::uniform(Tint::Blue),
            SeverityTier::Unrecognized => FALLBACK_SEVERITY_STYLE,
        }
    }
}

/// Exact, case-sensitive match against the backend's severity labels.
pub fn classify_severity(severity: &str) -> SeverityTier {
    match severity {
        "critical" => SeverityTier::Critical,
        "high" => SeverityTier::High,
        "medium" => SeverityTier::Medium,
        "low" => SeverityTier::Low,
        _ => SeverityTier::Unrecognized,
    }
}

pub fn classify_severity_style(severity: &str) -> StyleDescriptor {
    classify_severity(severity).style()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_labels_get_distinct_styles() {
        let known = ["critical", "high", "medium", "low"];
        let styles: HashSet<_> = known.iter().map(|s| classify_severity_style(s)).collect();
        assert_eq!(styles.len(), 4);
        assert!(!styles.contains(&FALLBACK_SEVERITY_STYLE));
        assert_eq!(classify_severity_style("low").text, Tint::Blue);
    }

    #[test]
    fn unknown_labels_fall_back_to_gray() {
        for label in ["", "urgent", "CRITICAL", " high", "medium ", "n/a"] {
            assert_eq!(classify_severity(label), SeverityTier::Unrecognized);
            assert_eq!(classify_severity_style(label), FALLBACK_SEVERITY_STYLE);
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            classify_severity_style("critical"),
            StyleDescriptor::uniform(Tint::Red)
        );
        assert_eq!(classify_severity_style("Critical"), FALLBACK_SEVERITY_STYLE);
    }

    #[test]
    fn classification_is_repeatable() {
        for label in ["critical", "Critical", ""] {
            assert_eq!(classify_severity_style(label), classify_severity_style(label));
        }
    }
}
