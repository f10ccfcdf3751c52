//! Color parsing and WCAG 2.1 luminance primitives.
//!
//! Accepts the color syntaxes tokens use in practice: hex (3/4/6/8
//! digits), `rgb()`/`rgba()`, `hsl()`/`hsla()`, and CSS named colors.

use thiserror::Error;

/// Color parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input does not match any recognized color syntax.
    #[error("unrecognized color format: `{0}`")]
    Unparseable(String),
}

/// An sRGB color with channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Creates a color from normalized channels.
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Parses a color value.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Unparseable`] when the input matches no
    /// recognized syntax or a component is out of range.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::Unparseable(input.to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("rgb") || lower.starts_with("hsl") {
            return parse_functional(&lower)
                .ok_or_else(|| ColorError::Unparseable(input.to_string()));
        }

        named_color(&lower).ok_or_else(|| ColorError::Unparseable(input.to_string()))
    }

    /// Relative luminance per WCAG 2.1.
    ///
    /// sRGB channels are linearized (0.03928 threshold) and weighted
    /// 0.2126 / 0.7152 / 0.0722.
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(c: f64) -> f64 {
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }
}

fn parse_hex(digits: &str) -> Option<Rgba> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    fn nibble(s: &str, i: usize) -> u8 {
        // Caller has verified the input is ASCII hex.
        u8::from_str_radix(&s[i..=i], 16).unwrap_or(0)
    }
    fn byte(s: &str, i: usize) -> u8 {
        u8::from_str_radix(&s[i..i + 2], 16).unwrap_or(0)
    }

    match digits.len() {
        3 => Some(Rgba::from_u8(
            nibble(digits, 0) * 17,
            nibble(digits, 1) * 17,
            nibble(digits, 2) * 17,
        )),
        4 => {
            let mut c = Rgba::from_u8(
                nibble(digits, 0) * 17,
                nibble(digits, 1) * 17,
                nibble(digits, 2) * 17,
            );
            c.a = f64::from(nibble(digits, 3) * 17) / 255.0;
            Some(c)
        }
        6 => Some(Rgba::from_u8(
            byte(digits, 0),
            byte(digits, 2),
            byte(digits, 4),
        )),
        8 => {
            let mut c = Rgba::from_u8(byte(digits, 0), byte(digits, 2), byte(digits, 4));
            c.a = f64::from(byte(digits, 6)) / 255.0;
            Some(c)
        }
        _ => None,
    }
}

/// Parses `rgb()`, `rgba()`, `hsl()`, `hsla()`. Input is lowercased.
fn parse_functional(input: &str) -> Option<Rgba> {
    let (name, rest) = input.split_once('(')?;
    let body = rest.strip_suffix(')')?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();

    match name {
        "rgb" | "rgba" => {
            if parts.len() != 3 && parts.len() != 4 {
                return None;
            }
            let r = parse_channel(parts[0])?;
            let g = parse_channel(parts[1])?;
            let b = parse_channel(parts[2])?;
            let a = if parts.len() == 4 {
                parse_alpha(parts[3])?
            } else {
                1.0
            };
            Some(Rgba::new(r, g, b, a))
        }
        "hsl" | "hsla" => {
            if parts.len() != 3 && parts.len() != 4 {
                return None;
            }
            let h: f64 = parts[0].strip_suffix("deg").unwrap_or(parts[0]).parse().ok()?;
            let s = parse_percent(parts[1])?;
            let l = parse_percent(parts[2])?;
            let a = if parts.len() == 4 {
                parse_alpha(parts[3])?
            } else {
                1.0
            };
            let (r, g, b) = hsl_to_rgb(h, s, l);
            Some(Rgba::new(r, g, b, a))
        }
        _ => None,
    }
}

/// An rgb() channel: 0-255, percent allowed.
fn parse_channel(part: &str) -> Option<f64> {
    if let Some(pct) = part.strip_suffix('%') {
        let v: f64 = pct.trim().parse().ok()?;
        if !(0.0..=100.0).contains(&v) {
            return None;
        }
        return Some(v / 100.0);
    }
    let v: f64 = part.parse().ok()?;
    if !(0.0..=255.0).contains(&v) {
        return None;
    }
    Some(v / 255.0)
}

/// An alpha component: 0-1, percent allowed.
fn parse_alpha(part: &str) -> Option<f64> {
    if let Some(pct) = part.strip_suffix('%') {
        let v: f64 = pct.trim().parse().ok()?;
        if !(0.0..=100.0).contains(&v) {
            return None;
        }
        return Some(v / 100.0);
    }
    let v: f64 = part.parse().ok()?;
    if !(0.0..=1.0).contains(&v) {
        return None;
    }
    Some(v)
}

/// A percentage component: `NN%`, 0-100.
fn parse_percent(part: &str) -> Option<f64> {
    let v: f64 = part.strip_suffix('%')?.trim().parse().ok()?;
    if !(0.0..=100.0).contains(&v) {
        return None;
    }
    Some(v / 100.0)
}

/// Standard HSL to RGB conversion; h in degrees, s/l normalized.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

/// Looks up a CSS named color. The name must already be lowercase.
#[must_use]
pub fn named_color(name: &str) -> Option<Rgba> {
    NAMED_COLORS
        .binary_search_by_key(&name, |&(n, _)| n)
        .ok()
        .map(|idx| {
            let rgb = NAMED_COLORS[idx].1;
            #[allow(clippy::cast_possible_truncation)]
            let (r, g, b) = ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
            Rgba::from_u8(r, g, b)
        })
}

/// CSS named colors (Color Module Level 4 keywords), sorted by name.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xF0_F8_FF),
    ("antiquewhite", 0xFA_EB_D7),
    ("aqua", 0x00_FF_FF),
    ("aquamarine", 0x7F_FF_D4),
    ("azure", 0xF0_FF_FF),
    ("beige", 0xF5_F5_DC),
    ("bisque", 0xFF_E4_C4),
    ("black", 0x00_00_00),
    ("blanchedalmond", 0xFF_EB_CD),
    ("blue", 0x00_00_FF),
    ("blueviolet", 0x8A_2B_E2),
    ("brown", 0xA5_2A_2A),
    ("burlywood", 0xDE_B8_87),
    ("cadetblue", 0x5F_9E_A0),
    ("chartreuse", 0x7F_FF_00),
    ("chocolate", 0xD2_69_1E),
    ("coral", 0xFF_7F_50),
    ("cornflowerblue", 0x64_95_ED),
    ("cornsilk", 0xFF_F8_DC),
    ("crimson", 0xDC_14_3C),
    ("cyan", 0x00_FF_FF),
    ("darkblue", 0x00_00_8B),
    ("darkcyan", 0x00_8B_8B),
    ("darkgoldenrod", 0xB8_86_0B),
    ("darkgray", 0xA9_A9_A9),
    ("darkgreen", 0x00_64_00),
    ("darkgrey", 0xA9_A9_A9),
    ("darkkhaki", 0xBD_B7_6B),
    ("darkmagenta", 0x8B_00_8B),
    ("darkolivegreen", 0x55_6B_2F),
    ("darkorange", 0xFF_8C_00),
    ("darkorchid", 0x99_32_CC),
    ("darkred", 0x8B_00_00),
    ("darksalmon", 0xE9_96_7A),
    ("darkseagreen", 0x8F_BC_8F),
    ("darkslateblue", 0x48_3D_8B),
    ("darkslategray", 0x2F_4F_4F),
    ("darkslategrey", 0x2F_4F_4F),
    ("darkturquoise", 0x00_CE_D1),
    ("darkviolet", 0x94_00_D3),
    ("deeppink", 0xFF_14_93),
    ("deepskyblue", 0x00_BF_FF),
    ("dimgray", 0x69_69_69),
    ("dimgrey", 0x69_69_69),
    ("dodgerblue", 0x1E_90_FF),
    ("firebrick", 0xB2_22_22),
    ("floralwhite", 0xFF_FA_F0),
    ("forestgreen", 0x22_8B_22),
    ("fuchsia", 0xFF_00_FF),
    ("gainsboro", 0xDC_DC_DC),
    ("ghostwhite", 0xF8_F8_FF),
    ("gold", 0xFF_D7_00),
    ("goldenrod", 0xDA_A5_20),
    ("gray", 0x80_80_80),
    ("green", 0x00_80_00),
    ("greenyellow", 0xAD_FF_2F),
    ("grey", 0x80_80_80),
    ("honeydew", 0xF0_FF_F0),
    ("hotpink", 0xFF_69_B4),
    ("indianred", 0xCD_5C_5C),
    ("indigo", 0x4B_00_82),
    ("ivory", 0xFF_FF_F0),
    ("khaki", 0xF0_E6_8C),
    ("lavender", 0xE6_E6_FA),
    ("lavenderblush", 0xFF_F0_F5),
    ("lawngreen", 0x7C_FC_00),
    ("lemonchiffon", 0xFF_FA_CD),
    ("lightblue", 0xAD_D8_E6),
    ("lightcoral", 0xF0_80_80),
    ("lightcyan", 0xE0_FF_FF),
    ("lightgoldenrodyellow", 0xFA_FA_D2),
    ("lightgray", 0xD3_D3_D3),
    ("lightgreen", 0x90_EE_90),
    ("lightgrey", 0xD3_D3_D3),
    ("lightpink", 0xFF_B6_C1),
    ("lightsalmon", 0xFF_A0_7A),
    ("lightseagreen", 0x20_B2_AA),
    ("lightskyblue", 0x87_CE_FA),
    ("lightslategray", 0x77_88_99),
    ("lightslategrey", 0x77_88_99),
    ("lightsteelblue", 0xB0_C4_DE),
    ("lightyellow", 0xFF_FF_E0),
    ("lime", 0x00_FF_00),
    ("limegreen", 0x32_CD_32),
    ("linen", 0xFA_F0_E6),
    ("magenta", 0xFF_00_FF),
    ("maroon", 0x80_00_00),
    ("mediumaquamarine", 0x66_CD_AA),
    ("mediumblue", 0x00_00_CD),
    ("mediumorchid", 0xBA_55_D3),
    ("mediumpurple", 0x93_70_DB),
    ("mediumseagreen", 0x3C_B3_71),
    ("mediumslateblue", 0x7B_68_EE),
    ("mediumspringgreen", 0x00_FA_9A),
    ("mediumturquoise", 0x48_D1_CC),
    ("mediumvioletred", 0xC7_15_85),
    ("midnightblue", 0x19_19_70),
    ("mintcream", 0xF5_FF_FA),
    ("mistyrose", 0xFF_E4_E1),
    ("moccasin", 0xFF_E4_B5),
    ("navajowhite", 0xFF_DE_AD),
    ("navy", 0x00_00_80),
    ("oldlace", 0xFD_F5_E6),
    ("olive", 0x80_80_00),
    ("olivedrab", 0x6B_8E_23),
    ("orange", 0xFF_A5_00),
    ("orangered", 0xFF_45_00),
    ("orchid", 0xDA_70_D6),
    ("palegoldenrod", 0xEE_E8_AA),
    ("palegreen", 0x98_FB_98),
    ("paleturquoise", 0xAF_EE_EE),
    ("palevioletred", 0xDB_70_93),
    ("papayawhip", 0xFF_EF_D5),
    ("peachpuff", 0xFF_DA_B9),
    ("peru", 0xCD_85_3F),
    ("pink", 0xFF_C0_CB),
    ("plum", 0xDD_A0_DD),
    ("powderblue", 0xB0_E0_E6),
    ("purple", 0x80_00_80),
    ("rebeccapurple", 0x66_33_99),
    ("red", 0xFF_00_00),
    ("rosybrown", 0xBC_8F_8F),
    ("royalblue", 0x41_69_E1),
    ("saddlebrown", 0x8B_45_13),
    ("salmon", 0xFA_80_72),
    ("sandybrown", 0xF4_A4_60),
    ("seagreen", 0x2E_8B_57),
    ("seashell", 0xFF_F5_EE),
    ("sienna", 0xA0_52_2D),
    ("silver", 0xC0_C0_C0),
    ("skyblue", 0x87_CE_EB),
    ("slateblue", 0x6A_5A_CD),
    ("slategray", 0x70_80_90),
    ("slategrey", 0x70_80_90),
    ("snow", 0xFF_FA_FA),
    ("springgreen", 0x00_FF_7F),
    ("steelblue", 0x46_82_B4),
    ("tan", 0xD2_B4_8C),
    ("teal", 0x00_80_80),
    ("thistle", 0xD8_BF_D8),
    ("tomato", 0xFF_63_47),
    ("turquoise", 0x40_E0_D0),
    ("violet", 0xEE_82_EE),
    ("wheat", 0xF5_DE_B3),
    ("white", 0xFF_FF_FF),
    ("whitesmoke", 0xF5_F5_F5),
    ("yellow", 0xFF_FF_00),
    ("yellowgreen", 0x9A_CD_32),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn parse_hex_six_digits() {
        let c = Rgba::parse("#3b82f6").expect("hex");
        assert_close(c.r, f64::from(0x3b_u8) / 255.0);
        assert_close(c.g, f64::from(0x82_u8) / 255.0);
        assert_close(c.b, f64::from(0xf6_u8) / 255.0);
        assert_close(c.a, 1.0);
    }

    #[test]
    fn parse_hex_shorthand_expands() {
        let short = Rgba::parse("#fff").expect("short hex");
        let long = Rgba::parse("#ffffff").expect("long hex");
        assert_eq!(short, long);
    }

    #[test]
    fn parse_hex_with_alpha() {
        let c = Rgba::parse("#00000080").expect("hex with alpha");
        assert_close(c.a, f64::from(0x80_u8) / 255.0);
    }

    #[test]
    fn parse_rgb_functional() {
        let c = Rgba::parse("rgb(59, 130, 246)").expect("rgb");
        assert_close(c.r, 59.0 / 255.0);
        let with_alpha = Rgba::parse("rgba(59, 130, 246, 0.5)").expect("rgba");
        assert_close(with_alpha.a, 0.5);
    }

    #[test]
    fn parse_rgb_rejects_out_of_range() {
        assert!(Rgba::parse("rgb(300, 0, 0)").is_err());
        assert!(Rgba::parse("rgba(0, 0, 0, 1.5)").is_err());
    }

    #[test]
    fn parse_hsl_primary_hues() {
        let red = Rgba::parse("hsl(0, 100%, 50%)").expect("red");
        assert_close(red.r, 1.0);
        assert_close(red.g, 0.0);

        let green = Rgba::parse("hsl(120, 100%, 50%)").expect("green");
        assert_close(green.g, 1.0);

        let blue = Rgba::parse("hsl(240, 100%, 50%)").expect("blue");
        assert_close(blue.b, 1.0);
    }

    #[test]
    fn parse_named() {
        assert_eq!(Rgba::parse("white").expect("white"), Rgba::from_u8(255, 255, 255));
        assert_eq!(Rgba::parse("rebeccapurple").expect("named"), Rgba::from_u8(0x66, 0x33, 0x99));
        assert!(Rgba::parse("notacolor").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Rgba::parse("").is_err());
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("#gggggg").is_err());
        assert!(Rgba::parse("rgb(1,2)").is_err());
    }

    #[test]
    fn luminance_extremes() {
        assert_close(Rgba::from_u8(0, 0, 0).relative_luminance(), 0.0);
        assert!((Rgba::from_u8(255, 255, 255).relative_luminance() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn named_table_is_sorted() {
        for window in NAMED_COLORS.windows(2) {
            assert!(window[0].0 < window[1].0, "{} >= {}", window[0].0, window[1].0);
        }
    }
}
