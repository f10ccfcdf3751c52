//! Perceptual contrast analysis: WCAG 2.1 ratio and APCA Lc.
//!
//! The two algorithms disagree often enough that reporting both is the
//! point: WCAG 2.1 is the compliance baseline, APCA the perceptual
//! reality check.

use serde::{Deserialize, Serialize};

use crate::color::{ColorError, Rgba};
use crate::rules::ContrastPolicy;
use crate::types::{Issue, IssueCode};

/// Text size class for WCAG threshold selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    /// Body text (AA ≥ 4.5, AAA ≥ 7.0).
    Normal,
    /// Large text, ≥ 18pt or 14pt bold (AA ≥ 3.0, AAA ≥ 4.5).
    Large,
}

impl std::str::FromStr for TextSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "large" => Ok(Self::Large),
            other => Err(format!("unknown text size `{other}`. Valid values: normal, large")),
        }
    }
}

/// WCAG 2.1 conformance level. Ordered: `Fail < Aa < Aaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WcagLevel {
    /// Below AA.
    Fail,
    /// Meets AA.
    Aa,
    /// Meets AAA.
    Aaa,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "Fail"),
            Self::Aa => write!(f, "AA"),
            Self::Aaa => write!(f, "AAA"),
        }
    }
}

/// APCA compliance band on |Lc|. Ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApcaBand {
    /// |Lc| < 45.
    Fail,
    /// |Lc| ≥ 45: non-text elements only.
    NonText,
    /// |Lc| ≥ 60: large text.
    LargeText,
    /// |Lc| ≥ 75: body text (AA-equivalent).
    Aa,
    /// |Lc| ≥ 90: preferred body text (AAA-equivalent).
    Aaa,
}

impl std::fmt::Display for ApcaBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "Fail"),
            Self::NonText => write!(f, "Non-text"),
            Self::LargeText => write!(f, "Large text"),
            Self::Aa => write!(f, "AA"),
            Self::Aaa => write!(f, "AAA"),
        }
    }
}

/// Which way round the pair reads best, from the APCA sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// Dark text on a light background.
    DarkOnLight,
    /// Light text on a dark background.
    LightOnDark,
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DarkOnLight => write!(f, "dark-on-light"),
            Self::LightOnDark => write!(f, "light-on-dark"),
        }
    }
}

/// WCAG 2.1 side of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WcagAnalysis {
    /// Contrast ratio in [1, 21].
    pub ratio: f64,
    /// Conformance level for the given text size.
    pub level: WcagLevel,
}

/// APCA side of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApcaAnalysis {
    /// Signed lightness contrast, roughly [-108, 108].
    pub lc: f64,
    /// Compliance band on |Lc|.
    pub band: ApcaBand,
}

/// Combined contrast report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastReport {
    /// WCAG 2.1 analysis.
    pub wcag: WcagAnalysis,
    /// APCA analysis.
    pub apca: ApcaAnalysis,
    /// Whether the pair satisfies the policy's required thresholds.
    pub valid: bool,
    /// Reading-direction hint derived from the APCA sign.
    pub recommended: Polarity,
    /// Advisory findings: required thresholds passed, recommended missed.
    pub advisories: Vec<Issue>,
}

/// WCAG 2.1 contrast ratio: `(max + 0.05) / (min + 0.05)`, range [1, 21].
#[must_use]
pub fn contrast_ratio(a: &Rgba, b: &Rgba) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Classifies a WCAG ratio for a text size.
#[must_use]
pub fn wcag_level(ratio: f64, size: TextSize) -> WcagLevel {
    let (aa, aaa) = match size {
        TextSize::Normal => (4.5, 7.0),
        TextSize::Large => (3.0, 4.5),
    };
    if ratio >= aaa {
        WcagLevel::Aaa
    } else if ratio >= aa {
        WcagLevel::Aa
    } else {
        WcagLevel::Fail
    }
}

// APCA (SAPC-4) constants. Perceptual luminance exponents differ per
// polarity; the soft black clamp keeps near-black from overstating
// contrast.
const APCA_BLACK_THRESHOLD: f64 = 0.022;
const APCA_BLACK_CLAMP: f64 = 1.414;
const APCA_SCALE: f64 = 1.14;
const APCA_OFFSET: f64 = 0.027;
const APCA_DELTA_MIN: f64 = 0.1;

fn apca_luminance(c: &Rgba) -> f64 {
    let y = 0.212_672_9 * c.r.powf(2.4) + 0.715_152_2 * c.g.powf(2.4) + 0.072_175_0 * c.b.powf(2.4);
    if y < APCA_BLACK_THRESHOLD {
        y + (APCA_BLACK_THRESHOLD - y).powf(APCA_BLACK_CLAMP)
    } else {
        y
    }
}

/// APCA lightness contrast Lc for text on background.
///
/// Positive for dark-on-light, negative for light-on-dark. Values with
/// |SAPC| below the minimum delta clamp to 0 before the offset is
/// applied and the result scaled by 100.
#[must_use]
pub fn apca_lc(text: &Rgba, background: &Rgba) -> f64 {
    let y_text = apca_luminance(text);
    let y_bg = apca_luminance(background);

    let sapc = if y_bg > y_text {
        (y_bg.powf(0.56) - y_text.powf(0.57)) * APCA_SCALE
    } else {
        (y_bg.powf(0.65) - y_text.powf(0.62)) * APCA_SCALE
    };

    if sapc.abs() < APCA_DELTA_MIN {
        return 0.0;
    }

    let lc = if sapc > 0.0 {
        sapc - APCA_OFFSET
    } else {
        sapc + APCA_OFFSET
    };
    lc * 100.0
}

/// Classifies an Lc value into its compliance band.
#[must_use]
pub fn apca_band(lc: f64) -> ApcaBand {
    let magnitude = lc.abs();
    if magnitude >= 90.0 {
        ApcaBand::Aaa
    } else if magnitude >= 75.0 {
        ApcaBand::Aa
    } else if magnitude >= 60.0 {
        ApcaBand::LargeText
    } else if magnitude >= 45.0 {
        ApcaBand::NonText
    } else {
        ApcaBand::Fail
    }
}

/// Runs both algorithms over a text/background pair.
///
/// # Errors
///
/// Fails fast with [`ColorError`] when either input does not parse;
/// callers map this to an `invalid-color-format` finding.
pub fn analyze(
    text: &str,
    background: &str,
    size: TextSize,
    policy: &ContrastPolicy,
) -> Result<ContrastReport, ColorError> {
    let text_color = Rgba::parse(text)?;
    let bg_color = Rgba::parse(background)?;

    let ratio = contrast_ratio(&text_color, &bg_color);
    let wcag = WcagAnalysis {
        ratio,
        level: wcag_level(ratio, size),
    };

    let lc = apca_lc(&text_color, &bg_color);
    let apca = ApcaAnalysis {
        lc,
        band: apca_band(lc),
    };

    let mut valid = true;
    if policy.require_wcag && wcag.level < policy.wcag_level {
        valid = false;
    }
    if policy.require_apca && lc.abs() < policy.apca_minimum {
        valid = false;
    }

    let recommended = if lc < 0.0 {
        Polarity::LightOnDark
    } else {
        Polarity::DarkOnLight
    };

    let mut advisories = Vec::new();
    if valid {
        let pair = format!("{text} on {background}");
        if let Some(level) = policy.advise_wcag_level {
            if wcag.level < level {
                advisories.push(Issue::new(
                    IssueCode::ContrastAdvisory,
                    pair.clone(),
                    format!(
                        "WCAG 2.1 ratio {:.2}:1 is {} but {} is recommended",
                        ratio, wcag.level, level
                    ),
                ));
            }
        }
        if let Some(minimum) = policy.advise_apca_minimum {
            if lc.abs() < minimum {
                advisories.push(Issue::new(
                    IssueCode::ContrastAdvisory,
                    pair,
                    format!("APCA |Lc| {:.1} is below the recommended {minimum:.0}", lc.abs()),
                ));
            }
        }
    }

    Ok(ContrastReport {
        wcag,
        apca,
        valid,
        recommended,
        advisories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn black_on_white_is_21_to_1() {
        let ratio = contrast_ratio(&BLACK, &WHITE);
        assert!((ratio - 21.0).abs() < 1e-6, "got {ratio}");
        assert_eq!(wcag_level(ratio, TextSize::Normal), WcagLevel::Aaa);
        assert_eq!(wcag_level(ratio, TextSize::Large), WcagLevel::Aaa);
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = contrast_ratio(&BLACK, &WHITE);
        let b = contrast_ratio(&WHITE, &BLACK);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn wcag_thresholds_per_size() {
        assert_eq!(wcag_level(3.5, TextSize::Large), WcagLevel::Aa);
        assert_eq!(wcag_level(3.5, TextSize::Normal), WcagLevel::Fail);
        assert_eq!(wcag_level(4.6, TextSize::Normal), WcagLevel::Aa);
        assert_eq!(wcag_level(7.0, TextSize::Normal), WcagLevel::Aaa);
    }

    #[test]
    fn apca_signs_are_opposite_same_band() {
        let dark_on_light = apca_lc(&BLACK, &WHITE);
        let light_on_dark = apca_lc(&WHITE, &BLACK);

        assert!(dark_on_light > 100.0, "got {dark_on_light}");
        assert!(light_on_dark < -100.0, "got {light_on_dark}");
        assert_eq!(apca_band(dark_on_light), ApcaBand::Aaa);
        assert_eq!(apca_band(light_on_dark), ApcaBand::Aaa);
    }

    #[test]
    fn apca_same_color_clamps_to_zero() {
        let gray = Rgba::from_u8(128, 128, 128);
        assert_eq!(apca_lc(&gray, &gray), 0.0);
    }

    #[test]
    fn apca_bands() {
        assert_eq!(apca_band(95.0), ApcaBand::Aaa);
        assert_eq!(apca_band(-80.0), ApcaBand::Aa);
        assert_eq!(apca_band(61.0), ApcaBand::LargeText);
        assert_eq!(apca_band(45.0), ApcaBand::NonText);
        assert_eq!(apca_band(10.0), ApcaBand::Fail);
    }

    #[test]
    fn analyze_black_on_white_passes_defaults() {
        let report = analyze("#000000", "#FFFFFF", TextSize::Normal, &ContrastPolicy::default())
            .expect("valid colors");
        assert!(report.valid);
        assert_eq!(report.wcag.level, WcagLevel::Aaa);
        assert_eq!(report.recommended, Polarity::DarkOnLight);
        assert!(report.advisories.is_empty());
    }

    #[test]
    fn analyze_fails_fast_on_bad_color() {
        let err = analyze("notacolor", "#fff", TextSize::Normal, &ContrastPolicy::default());
        assert!(err.is_err());
    }

    #[test]
    fn analyze_low_contrast_fails_policy() {
        let report = analyze("#777777", "#888888", TextSize::Normal, &ContrastPolicy::default())
            .expect("valid colors");
        assert!(!report.valid);
        assert_eq!(report.wcag.level, WcagLevel::Fail);
    }

    #[test]
    fn analyze_advisory_when_required_passes() {
        let policy = ContrastPolicy {
            advise_wcag_level: Some(WcagLevel::Aaa),
            ..ContrastPolicy::default()
        };
        // 4.6:1-ish pair: passes AA, misses AAA.
        let report = analyze("#767676", "#ffffff", TextSize::Normal, &policy).expect("valid colors");
        assert!(report.valid);
        assert_eq!(report.advisories.len(), 1);
        assert_eq!(report.advisories[0].code, IssueCode::ContrastAdvisory);
    }
}
