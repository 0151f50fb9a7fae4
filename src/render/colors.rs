//! CSS color token normalisation for theme resolution.
//!
//! Theme variables arrive as raw strings from computed style. These helpers
//! decide whether a token is a paintable CSS color and normalise the few
//! shorthand forms design systems commonly use.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Named colors accepted verbatim. Canvas 2D knows the full CSS list; this
/// subset covers what theme files use in practice.
const NAMED_COLORS: &[&str] = &[
    "transparent",
    "black",
    "white",
    "gray",
    "grey",
    "silver",
    "red",
    "green",
    "blue",
    "navy",
    "teal",
    "orange",
    "yellow",
    "purple",
    "currentcolor",
];

/// Normalise a raw theme token into a CSS color.
///
/// Supports formats:
/// - "#RGB", "#RGBA", "#RRGGBB", "#RRGGBBAA"
/// - "rgb(...)", "rgba(...)", "hsl(...)", "hsla(...)"
/// - bare HSL components ("222 47% 11%"), wrapped as `hsl(...)`
/// - a small set of named colors
///
/// Returns `None` for empty tokens, unresolved `var(...)` references and
/// anything else that would not paint.
pub fn parse_color(s: &str) -> Option<CssColor> {
    let s = s.trim();
    if s.is_empty() || s.starts_with("var(") {
        return None;
    }

    if s.starts_with('#') {
        parse_hex_color(s)
    } else if is_color_function(s) {
        Some(s.to_string())
    } else if is_hsl_triplet(s) {
        Some(format!("hsl({s})"))
    } else {
        let lower = s.to_ascii_lowercase();
        NAMED_COLORS.contains(&lower.as_str()).then_some(lower)
    }
}

fn parse_hex_color(s: &str) -> Option<CssColor> {
    let hex = s.strip_prefix('#')?;
    if !matches!(hex.len(), 3 | 4 | 6 | 8) {
        return None;
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", hex.to_ascii_uppercase()))
}

fn is_color_function(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    let Some(open) = lower.find('(') else {
        return false;
    };
    let name = lower.get(..open).unwrap_or_default();
    let has_args = lower
        .get(open + 1..lower.len().saturating_sub(1))
        .is_some_and(|args| !args.trim().is_empty() && !args.contains("var("));
    matches!(name, "rgb" | "rgba" | "hsl" | "hsla") && lower.ends_with(')') && has_args
}

/// Bare "H S% L%" (optionally "/ alpha"), the shape shadcn-style tokens use.
fn is_hsl_triplet(s: &str) -> bool {
    let main = s.split('/').next().unwrap_or_default();
    let parts: Vec<&str> = main.split_whitespace().collect();
    let [hue, sat, light] = parts.as_slice() else {
        return false;
    };
    let is_number = |p: &str| p.parse::<f64>().is_ok_and(f64::is_finite);
    let is_percent = |p: &str| p.strip_suffix('%').is_some_and(is_number);
    (is_number(hue) || hue.strip_suffix("deg").is_some_and(is_number))
        && is_percent(sat)
        && is_percent(light)
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

    #[test_case("#ff0000", "#FF0000" ; "six digit hex")]
    #[test_case("#fff", "#FFF" ; "three digit hex")]
    #[test_case("#11223344", "#11223344" ; "hex with alpha")]
    #[test_case("rgb(255, 128, 64)", "rgb(255, 128, 64)" ; "rgb function")]
    #[test_case("  hsl(210 40% 98%) ", "hsl(210 40% 98%)" ; "hsl function trimmed")]
    #[test_case("222.2 84% 4.9%", "hsl(222.2 84% 4.9%)" ; "bare hsl triplet")]
    #[test_case("Transparent", "transparent" ; "named color")]
    fn accepts(input: &str, expected: &str) {
        assert_eq!(parse_color(input).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("var(--background)" ; "unresolved reference")]
    #[test_case("rgb(var(--r), 0, 0)" ; "nested reference")]
    #[test_case("#12" ; "short hex")]
    #[test_case("#GGHHII" ; "not hex")]
    #[test_case("rgb()" ; "empty function")]
    #[test_case("bold" ; "not a color")]
    fn rejects(input: &str) {
        assert!(parse_color(input).is_none());
    }
}
