//! Surface configuration from page query parameters.
//!
//! The drawing surface defaults to 640x480. A page URL such as
//! `index.html?w=800&h=600` overrides it. When only one of `w`/`h` is given
//! the surface becomes a square of that size. An optional `n` sets the
//! initial circle count, taking precedence over the stored one.

use serde::{Deserialize, Serialize};

use crate::store::parse_count;

/// Default surface width in pixels
pub const DEFAULT_WIDTH: f64 = 640.0;

/// Default surface height in pixels
pub const DEFAULT_HEIGHT: f64 = 480.0;

/// Circle count used when neither the query nor the store provides one
pub const DEFAULT_COUNT: u32 = 25;

/// Largest circle count accepted from any source (query, store, CLI, slider)
pub const MAX_COUNT: u32 = 10_000;

/// Drawing surface configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
    /// Count requested through the query string, if any
    pub count: Option<u32>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            count: None,
        }
    }
}

impl SurfaceConfig {
    /// Build from a raw query string (`"?w=800&h=600"`, leading `?` optional).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let width = query_param(query, "w").as_deref().and_then(parse_float_prefix);
        let height = query_param(query, "h").as_deref().and_then(parse_float_prefix);
        let count = query_param(query, "n").as_deref().and_then(parse_count);
        Self::from_params(width, height, count)
    }

    /// Apply the sizing rules to already-parsed values.
    ///
    /// `None` stands for a missing or unparseable parameter. A positive value
    /// overrides its dimension; if the other dimension is missing or zero it
    /// is set to the same value.
    #[must_use]
    pub fn from_params(width: Option<f64>, height: Option<f64>, count: Option<u32>) -> Self {
        let mut config = Self {
            count,
            ..Self::default()
        };

        if let Some(w) = width.filter(|w| *w > 0.0) {
            config.width = w;
            if is_unset(height) {
                config.height = w;
            }
        }
        if let Some(h) = height.filter(|h| *h > 0.0) {
            config.height = h;
            if is_unset(width) {
                config.width = h;
            }
        }

        config
    }

    /// Width divided by height
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whole-pixel canvas size. Fractions are truncated, as a canvas
    /// `width`/`height` attribute would be; each side is at least 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn pixel_size(&self) -> (u32, u32) {
        ((self.width as u32).max(1), (self.height as u32).max(1))
    }
}

fn is_unset(v: Option<f64>) -> bool {
    v.map_or(true, |v| v == 0.0)
}

/// First value for `key` in a `k=v&k=v` query string, form-decoded.
#[must_use]
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| form_decode(k) == key)
        .map(|(_, v)| form_decode(v))
}

/// Decode an `application/x-www-form-urlencoded` component: `+` is a space
/// and `%XX` is a byte. Malformed escapes are kept literally.
#[must_use]
pub fn form_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.as_bytes().iter();

    while let Some(&b) = bytes.next() {
        match b {
            b'+' => out.push(b' '),
            b'%' => {
                let rest = bytes.as_slice();
                match (rest.first().and_then(hex_val), rest.get(1).and_then(hex_val)) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        bytes.nth(1);
                    }
                    _ => out.push(b'%'),
                }
            }
            _ => out.push(b),
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: &u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace and
/// any trailing garbage (`"640px"` -> 640.0). Returns `None` when no digits
/// are found.
#[must_use]
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s.get(..end)?.parse::<f64>().ok()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", 640.0, 480.0 ; "no params")]
    #[test_case("?w=800&h=600", 800.0, 600.0 ; "both")]
    #[test_case("?w=300", 300.0, 300.0 ; "width only makes a square")]
    #[test_case("?h=200", 200.0, 200.0 ; "height only makes a square")]
    #[test_case("?w=300&h=0", 300.0, 300.0 ; "zero height counts as missing")]
    #[test_case("?w=300&h=-5", 300.0, 480.0 ; "negative height keeps default")]
    #[test_case("?w=abc&h=abc", 640.0, 480.0 ; "garbage ignored")]
    #[test_case("w=1024px&h=768px", 1024.0, 768.0 ; "units suffix and no question mark")]
    fn surface_from_query(query: &str, width: f64, height: f64) {
        let config = SurfaceConfig::from_query(query);
        assert_eq!((config.width, config.height), (width, height));
    }

    #[test]
    fn count_from_query() {
        assert_eq!(SurfaceConfig::from_query("?n=12").count, Some(12));
        assert_eq!(SurfaceConfig::from_query("?n=-3").count, None);
        assert_eq!(SurfaceConfig::from_query("?w=10").count, None);
    }

    #[test]
    fn count_from_query_is_capped() {
        let at_max = format!("?n={MAX_COUNT}");
        assert_eq!(SurfaceConfig::from_query(&at_max).count, Some(MAX_COUNT));

        let over = format!("?n={}", MAX_COUNT + 1);
        assert_eq!(SurfaceConfig::from_query(&over).count, None);
        assert_eq!(SurfaceConfig::from_query("?n=4294967295").count, None);
    }

    #[test]
    fn query_param_takes_first() {
        assert_eq!(query_param("?a=1&b=2&a=3", "a").as_deref(), Some("1"));
        assert_eq!(query_param("?a=1", "b"), None);
        assert_eq!(query_param("flag&w=5", "w").as_deref(), Some("5"));
    }

    #[test_case("?w=%36%34%30", 640.0, 640.0 ; "percent encoded digits")]
    #[test_case("?%77=300&h=%32%30%30", 300.0, 200.0 ; "percent encoded key")]
    #[test_case("?w=+800&h=600", 800.0, 600.0 ; "plus is a space")]
    fn surface_from_encoded_query(query: &str, width: f64, height: f64) {
        let config = SurfaceConfig::from_query(query);
        assert_eq!((config.width, config.height), (width, height));
    }

    #[test_case("a+b", "a b" ; "plus")]
    #[test_case("%41%62c", "Abc" ; "escapes")]
    #[test_case("100%", "100%" ; "trailing percent")]
    #[test_case("%4", "%4" ; "short escape")]
    #[test_case("%zz1", "%zz1" ; "bad hex")]
    #[test_case("%C3%A9", "\u{e9}" ; "utf8 sequence")]
    fn form_decode_cases(input: &str, expected: &str) {
        assert_eq!(form_decode(input), expected);
    }

    #[test_case("640", Some(640.0) ; "plain integer")]
    #[test_case("  12.5abc", Some(12.5) ; "leading space trailing text")]
    #[test_case(".5", Some(0.5) ; "no integer part")]
    #[test_case("3.", Some(3.0) ; "no fraction digits")]
    #[test_case("-7", Some(-7.0) ; "negative")]
    #[test_case("1e3px", Some(1000.0) ; "exponent")]
    #[test_case("2e", Some(2.0) ; "dangling exponent")]
    #[test_case("px", None ; "no digits")]
    #[test_case(".", None ; "lone dot")]
    #[test_case("", None ; "empty")]
    fn float_prefix(input: &str, expected: Option<f64>) {
        assert_eq!(parse_float_prefix(input), expected);
    }

    #[test]
    fn pixel_size_truncates() {
        let config = SurfaceConfig::from_params(Some(640.7), Some(0.5), None);
        assert_eq!(config.pixel_size(), (640, 1));
    }

    #[test]
    fn default_aspect() {
        let config = SurfaceConfig::default();
        assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }
}
