//! Widget configuration: display mode and preview aspect ratio.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which parts of the widget are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Source code only; the preview is hidden and playback stays paused.
    Code,
    /// Editor and preview side by side.
    Split,
    /// Preview only.
    Preview,
}

impl DisplayMode {
    /// Get the name of this display mode
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Split => "split",
            Self::Preview => "preview",
        }
    }

    /// Whether the preview surface is visible in this mode.
    #[inline]
    pub fn shows_preview(&self) -> bool {
        !matches!(self, Self::Code)
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::Split
    }
}

impl From<&str> for DisplayMode {
    fn from(s: &str) -> Self {
        match s {
            "code" => Self::Code,
            // "editor" is the legacy name for the side-by-side layout.
            "split" | "editor" => Self::Split,
            "preview" => Self::Preview,
            _ => Self::Split,
        }
    }
}

/// Preview aspect ratio, parsed from a `"W/H"` or decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Fallback ratio used when the configured string does not parse.
    pub const FALLBACK: f64 = 4.0;

    /// Parse a ratio string. Accepts `"16/9"` and `"2.35"` forms; anything
    /// that does not resolve to a finite positive number yields the fallback.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some((w, h)) = raw.split_once('/') {
            if let (Ok(w), Ok(h)) = (w.trim().parse::<f64>(), h.trim().parse::<f64>()) {
                let ratio = w / h;
                if ratio.is_finite() && ratio > 0.0 {
                    return Self(ratio);
                }
            }
            return Self(Self::FALLBACK);
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Self(value),
            _ => Self(Self::FALLBACK),
        }
    }

    /// Width-over-height value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self(Self::FALLBACK)
    }
}

impl From<f64> for AspectRatio {
    fn from(value: f64) -> Self {
        if value.is_finite() && value > 0.0 {
            Self(value)
        } else {
            Self(Self::FALLBACK)
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration passed to the widget at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FiddleConfig {
    /// Initial display mode.
    pub mode: DisplayMode,
    /// Preview aspect ratio.
    pub ratio: AspectRatio,
}

impl FiddleConfig {
    /// Create a configuration with an explicit mode and ratio.
    pub fn new(mode: DisplayMode, ratio: AspectRatio) -> Self {
        Self { mode, ratio }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fraction_ratio() {
        let ratio = AspectRatio::parse("16/9");
        assert!((ratio.value() - 16.0 / 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_decimal_ratio() {
        let ratio = AspectRatio::parse("2.35");
        assert!((ratio.value() - 2.35).abs() < f64::EPSILON);
    }

    #[test]
    fn falls_back_on_garbage() {
        assert_eq!(AspectRatio::parse("wide").value(), AspectRatio::FALLBACK);
        assert_eq!(AspectRatio::parse("").value(), AspectRatio::FALLBACK);
        assert_eq!(AspectRatio::parse("16/0").value(), AspectRatio::FALLBACK);
        assert_eq!(AspectRatio::parse("-3").value(), AspectRatio::FALLBACK);
    }

    #[test]
    fn mode_from_str() {
        assert_eq!(DisplayMode::from("code"), DisplayMode::Code);
        assert_eq!(DisplayMode::from("editor"), DisplayMode::Split);
        assert_eq!(DisplayMode::from("split"), DisplayMode::Split);
        assert_eq!(DisplayMode::from("preview"), DisplayMode::Preview);
        assert_eq!(DisplayMode::from("bogus"), DisplayMode::Split);
    }
}
