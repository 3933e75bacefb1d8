//! Color handling for the renderers.
//!
//! Colors are kept as CSS color strings, which Canvas 2D and SVG both accept
//! directly.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Normalize a user-supplied color to a CSS color string.
///
/// Supports formats:
/// - "#RRGGBB" and "#RGB"
/// - "RRGGBB" (hex without # prefix)
/// - "rgb(r, g, b)" / "rgba(r, g, b, a)"
/// - a handful of CSS color names (see [`named_color`])
pub fn parse_color(s: &str) -> Option<CssColor> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        parse_hex(hex)
    } else if let Some(args) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
        parse_rgb_args("rgba", args, 4)
    } else if let Some(args) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        parse_rgb_args("rgb", args, 3)
    } else if let Some(named) = named_color(s) {
        Some(named.to_string())
    } else {
        parse_hex(s)
    }
}

/// Check `r, g, b[, a]` and rebuild the functional notation from the
/// validated components. Channels may be percentages.
fn parse_rgb_args(func: &str, args: &str, arity: usize) -> Option<CssColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != arity || !parts.iter().all(|p| is_css_number(p)) {
        return None;
    }
    Some(format!("{func}({})", parts.join(", ")))
}

fn is_css_number(s: &str) -> bool {
    let digits = s.strip_suffix('%').unwrap_or(s);
    !digits.is_empty()
        && digits
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+')
        && digits.parse::<f64>().is_ok_and(f64::is_finite)
}

fn parse_hex(hex: &str) -> Option<CssColor> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(format!("#{}", hex.to_ascii_uppercase())),
        3 => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in hex.chars() {
                let c = c.to_ascii_uppercase();
                out.push(c);
                out.push(c);
            }
            Some(out)
        }
        _ => None,
    }
}

/// Hex value of a basic CSS color name.
pub fn named_color(name: &str) -> Option<&'static str> {
    let hex = match name.to_ascii_lowercase().as_str() {
        "black" => palette::BLACK,
        "white" => palette::WHITE,
        "gray" | "grey" => palette::GRAY,
        "red" => "#FF0000",
        "green" => "#008000",
        "blue" => "#0000FF",
        "orange" => "#FFA500",
        "purple" => "#800080",
        _ => return None,
    };
    Some(hex)
}

/// Default colors
pub mod palette {
    pub const WHITE: &str = "#FFFFFF";
    pub const BLACK: &str = "#000000";
    pub const GRAY: &str = "#808080";

    /// Circle fill
    pub const CIRCLE_FILL: &str = BLACK;
    /// Cell outline
    pub const SQUARE_STROKE: &str = GRAY;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_formats() {
        let test_cases = [
            ("#ff0000", Some("#FF0000")),
            ("00ff00", Some("#00FF00")),
            ("#abc", Some("#AABBCC")),
            ("gray", Some("#808080")),
            ("Black", Some("#000000")),
            ("rgb(1, 2, 3)", Some("rgb(1, 2, 3)")),
            ("rgba(1, 2, 3, 0.5)", Some("rgba(1, 2, 3, 0.5)")),
            ("rgb(1,2,3)", Some("rgb(1, 2, 3)")),
            ("rgb(100%, 0%, 50%)", Some("rgb(100%, 0%, 50%)")),
            ("rgb(1, 2", None),
            ("rgb(1, 2, 3, 4)", None),
            ("rgba(1, 2, 3)", None),
            ("rgb(1, 2, inf)", None),
            ("rgb(red, 0, 0)", None),
            (r#"rgb(0,0,0)"/><script>alert(1)</script><rect x="(1)"#, None),
            ("#12345", None),
            ("nope", None),
        ];

        for (input, expected) in test_cases {
            assert_eq!(
                parse_color(input).as_deref(),
                expected,
                "input: {input}"
            );
        }
    }
}
