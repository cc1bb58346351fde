//! Color helpers for icon backgrounds

/// Deterministic hex color for a string: 32-bit rolling hash -> hue,
/// fixed 60% saturation and 50% lightness.
pub fn string_to_color(s: &str) -> String {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = (unit as i32)
            .wrapping_add(hash.wrapping_shl(5))
            .wrapping_sub(hash);
    }
    let hue = (hash as i64).abs() % 360;
    hsl_to_hex(hue as f64, 60.0, 50.0)
}

/// HSL (degrees, percent, percent) to `#rrggbb`
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let s = s / 100.0;
    let l = l / 100.0;
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * v).round().clamp(0.0, 255.0) as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0.0), channel(8.0), channel(4.0))
}

fn parse_hex(hex: &str) -> Option<(i32, i32, i32)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let num = u32::from_str_radix(&expanded, 16).ok()?;
    Some(((num >> 16) as i32, ((num >> 8) & 0xff) as i32, (num & 0xff) as i32))
}

/// Shift every channel of `#rgb`/`#rrggbb` by `amount`, clamping each to
/// 0..=255. Unparseable input is returned unchanged.
pub fn adjust_color(hex: &str, amount: i32) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => {
            let clamp = |c: i32| (c + amount).clamp(0, 255);
            format!("#{:02x}{:02x}{:02x}", clamp(r), clamp(g), clamp(b))
        }
        None => hex.to_string(),
    }
}

/// Two-stop background from `base` to `base` shifted by `amount`
pub fn gradient(base: &str, amount: i32) -> String {
    format!("linear-gradient(135deg, {}, {})", base, adjust_color(base, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_color_empty_is_red_hue() {
        assert_eq!(string_to_color(""), "#cc3333");
    }

    #[test]
    fn test_string_to_color_is_deterministic() {
        let a = string_to_color("pubmed.ncbi.nlm.nih.gov");
        assert_eq!(a, string_to_color("pubmed.ncbi.nlm.nih.gov"));
        assert_eq!(a.len(), 7);
        assert!(a.starts_with('#'));
    }

    #[test]
    fn test_string_to_color_single_char() {
        // 'a' = 97 -> hue 97
        assert_eq!(string_to_color("a"), hsl_to_hex(97.0, 60.0, 50.0));
    }

    #[test]
    fn test_hsl_primary_hues() {
        assert_eq!(hsl_to_hex(120.0, 60.0, 50.0), "#33cc33");
        assert_eq!(hsl_to_hex(240.0, 60.0, 50.0), "#3333cc");
    }

    #[test]
    fn test_adjust_color_darkens_and_clamps() {
        assert_eq!(adjust_color("#2b6cb0", -18), "#195a9e");
        assert_eq!(adjust_color("#fff", -18), "#ededed");
        assert_eq!(adjust_color("#050505", -18), "#000000");
        assert_eq!(adjust_color("#f0f0f0", 40), "#ffffff");
    }

    #[test]
    fn test_adjust_color_invalid_unchanged() {
        assert_eq!(adjust_color("teal", -18), "teal");
        assert_eq!(adjust_color("#12345", -18), "#12345");
    }

    #[test]
    fn test_gradient() {
        assert_eq!(gradient("#ffffff", -18), "linear-gradient(135deg, #ffffff, #ededed)");
    }
}
