use crate::style::Tint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendIcon {
    Up,
    Down,
    Flat,
}

impl TrendIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            TrendIcon::Up => "↑",
            TrendIcon::Down => "↓",
            TrendIcon::Flat => "–",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendIndicator {
    pub icon: TrendIcon,
    pub color: Tint,
}

impl TrendIndicator {
    /// Used for `stable` and for every label the backend might add later.
    pub const FALLBACK: TrendIndicator = TrendIndicator {
        icon: TrendIcon::Flat,
        color: Tint::Gray,
    };
}

pub const DEFAULT_TREND: &str = "stable";

/// The arrow follows the risk, not the site: a deteriorating site has
/// rising risk and shows an upward red arrow.
pub fn classify_trend(trend: &str) -> TrendIndicator {
    match trend {
        "deteriorating" => TrendIndicator {
            icon: TrendIcon::Up,
            color: Tint::Red,
        },
        "improving" => TrendIndicator {
            icon: TrendIcon::Down,
            color: Tint::Green,
        },
        _ => TrendIndicator::FALLBACK,
    }
}
