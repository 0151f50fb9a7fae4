//! Theme resolution: turn host style variables into a complete [`Styles`].
//!
//! The resolver never fails and never returns partial styles. Each slot is
//! read from a CSS custom property and falls back to the built-in default
//! when the property is missing, empty, or still an unresolved reference.

use crate::render::colors::parse_color;
use crate::types::Styles;

pub const VAR_BACKGROUND: &str = "--grid-background";
pub const VAR_FOREGROUND: &str = "--grid-foreground";
pub const VAR_BORDER: &str = "--grid-border";
pub const VAR_ACCENT: &str = "--grid-accent";
pub const VAR_HEADER_BACKGROUND: &str = "--grid-header-background";
pub const VAR_FONT_FAMILY: &str = "--grid-font-family";

/// Anything that can answer computed-style lookups (a DOM element, a map).
pub trait StyleSource {
    /// Raw value of a CSS custom property, or `None` if unset.
    fn property(&self, name: &str) -> Option<String>;

    /// A frozen view to serve every lookup of one resolve pass, for sources
    /// where each `property` call would otherwise recompute style.
    fn snapshot(&self) -> Option<Box<dyn StyleSource + '_>> {
        None
    }
}

impl StyleSource for std::collections::HashMap<String, String> {
    fn property(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Produces the styles for a frame. Called once per render pass.
pub trait StyleResolver {
    fn resolve(&self) -> Styles;
}

/// Resolver that always returns the same styles.
#[derive(Debug, Clone, Default)]
pub struct StaticStyles(pub Styles);

impl StyleResolver for StaticStyles {
    fn resolve(&self) -> Styles {
        self.0.clone()
    }
}

/// Resolver that reads CSS custom properties from a live style source,
/// so theme switches show up on the next frame.
pub struct ThemeResolver<E> {
    source: E,
    fallback: Styles,
}

impl<E: StyleSource> ThemeResolver<E> {
    pub fn new(source: E) -> Self {
        Self::with_fallback(source, Styles::default())
    }

    /// Use `fallback` for any slot the source cannot supply.
    pub fn with_fallback(source: E, fallback: Styles) -> Self {
        Self { source, fallback }
    }
}

fn color(source: &dyn StyleSource, name: &str) -> Option<String> {
    source.property(name).as_deref().and_then(parse_color)
}

fn font_family(source: &dyn StyleSource) -> Option<String> {
    let raw = source.property(VAR_FONT_FAMILY)?;
    let family = raw.trim();
    if family.is_empty() || family.contains("var(") {
        return None;
    }
    Some(family.to_string())
}

impl<E: StyleSource> StyleResolver for ThemeResolver<E> {
    fn resolve(&self) -> Styles {
        let snapshot = self.source.snapshot();
        let source: &dyn StyleSource = match snapshot.as_deref() {
            Some(frozen) => frozen,
            None => &self.source,
        };
        let fallback = &self.fallback;
        let foreground = color(source, VAR_FOREGROUND);
        let (header_font, cell_font) = match font_family(source) {
            Some(family) => (
                Styles::header_font_for(&family),
                Styles::cell_font_for(&family),
            ),
            None => (fallback.header_font.clone(), fallback.cell_font.clone()),
        };

        Styles {
            header_background: color(source, VAR_HEADER_BACKGROUND)
                .unwrap_or_else(|| fallback.header_background.clone()),
            cell_background: color(source, VAR_BACKGROUND)
                .unwrap_or_else(|| fallback.cell_background.clone()),
            selected_background: color(source, VAR_ACCENT)
                .unwrap_or_else(|| fallback.selected_background.clone()),
            border_color: color(source, VAR_BORDER)
                .unwrap_or_else(|| fallback.border_color.clone()),
            header_text_color: foreground
                .clone()
                .unwrap_or_else(|| fallback.header_text_color.clone()),
            cell_text_color: foreground.unwrap_or_else(|| fallback.cell_text_color.clone()),
            header_font,
            cell_font,
        }
    }
}

/// Where a renderer gets its styles from.
pub enum StylesSource {
    /// Fixed for the lifetime of the renderer.
    Static(Styles),
    /// Re-resolved on every render pass.
    Dynamic(Box<dyn StyleResolver>),
}

impl StylesSource {
    pub fn resolve(&self) -> Styles {
        match self {
            Self::Static(styles) => styles.clone(),
            Self::Dynamic(resolver) => resolver.resolve(),
        }
    }
}

impl Default for StylesSource {
    fn default() -> Self {
        Self::Static(Styles::default())
    }
}

impl std::fmt::Debug for StylesSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(styles) => f.debug_tuple("Static").field(styles).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    /// Live source that counts how often it is asked for a snapshot or a
    /// direct lookup.
    #[derive(Default)]
    struct CountingSource {
        vars: HashMap<String, String>,
        snapshots: Cell<usize>,
        lookups: Cell<usize>,
    }

    impl StyleSource for CountingSource {
        fn property(&self, name: &str) -> Option<String> {
            self.lookups.set(self.lookups.get() + 1);
            self.vars.get(name).cloned()
        }

        fn snapshot(&self) -> Option<Box<dyn StyleSource + '_>> {
            self.snapshots.set(self.snapshots.get() + 1);
            Some(Box::new(self.vars.clone()))
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let resolver = ThemeResolver::new(HashMap::new());
        assert_eq!(resolver.resolve(), Styles::default());
    }

    #[test]
    fn foreground_feeds_both_text_colors() {
        let resolver = ThemeResolver::new(vars(&[(VAR_FOREGROUND, "#eeeeee")]));
        let styles = resolver.resolve();
        assert_eq!(styles.header_text_color, "#EEEEEE");
        assert_eq!(styles.cell_text_color, "#EEEEEE");
    }

    #[test]
    fn unresolved_references_fall_back() {
        let resolver = ThemeResolver::new(vars(&[
            (VAR_BACKGROUND, "var(--surface)"),
            (VAR_FONT_FAMILY, "var(--font-sans)"),
        ]));
        let styles = resolver.resolve();
        let defaults = Styles::default();
        assert_eq!(styles.cell_background, defaults.cell_background);
        assert_eq!(styles.cell_font, defaults.cell_font);
    }

    #[test]
    fn font_family_builds_both_fonts() {
        let resolver = ThemeResolver::new(vars(&[(VAR_FONT_FAMILY, " Inter, sans-serif ")]));
        let styles = resolver.resolve();
        assert_eq!(styles.header_font, "600 13px Inter, sans-serif");
        assert_eq!(styles.cell_font, "13px Inter, sans-serif");
    }

    #[test]
    fn static_source_is_constant() {
        let mut custom = Styles::default();
        custom.border_color = "#000000".to_string();
        let source = StylesSource::Static(custom.clone());
        assert_eq!(source.resolve(), custom);
        assert_eq!(source.resolve(), custom);
    }

    #[test]
    fn one_snapshot_serves_a_whole_resolve() {
        let source = CountingSource {
            vars: vars(&[(VAR_BACKGROUND, "#101010"), (VAR_FONT_FAMILY, "Inter")]),
            ..CountingSource::default()
        };
        let resolver = ThemeResolver::new(source);

        let styles = resolver.resolve();
        assert_eq!(styles.cell_background, "#101010");
        assert_eq!(styles.cell_font, "13px Inter");
        assert_eq!(resolver.source.snapshots.get(), 1);
        assert_eq!(resolver.source.lookups.get(), 0);

        resolver.resolve();
        assert_eq!(resolver.source.snapshots.get(), 2);
        assert_eq!(resolver.source.lookups.get(), 0);
    }
}
