//! Text measurement caching and ellipsis truncation.
//!
//! Measuring text is the most expensive call a 2D context exposes, so widths
//! are cached per `(font, text)` and truncation binary-searches the prefix
//! length instead of scanning it.

use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::backend::DrawContext;

/// Unicode horizontal ellipsis appended to truncated text.
pub const ELLIPSIS: &str = "\u{2026}";

const TEXT_MEASURE_CACHE_CAP: usize = 4096;

/// Insertion-order bounded cache of text widths keyed by `font\ntext`.
pub struct TextMeasureCache {
    entries: HashMap<Rc<str>, f64>,
    order: VecDeque<Rc<str>>,
    max_entries: usize,
    scratch: String,
}

impl TextMeasureCache {
    /// A capacity of 0 disables caching entirely.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
            scratch: String::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, font: &str, text: &str) -> Option<f64> {
        if self.max_entries == 0 {
            return None;
        }
        let key = Self::build_key(&mut self.scratch, font, text);
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, font: &str, text: &str, width: f64) {
        if self.max_entries == 0 {
            return;
        }
        let key = Self::build_key(&mut self.scratch, font, text);
        if self.entries.contains_key(key) {
            return;
        }
        let key_rc: Rc<str> = key.into();
        self.entries.insert(Rc::clone(&key_rc), width);
        self.order.push_back(key_rc);
        self.enforce_cap();
    }

    fn build_key<'a>(scratch: &'a mut String, font: &str, text: &str) -> &'a str {
        scratch.clear();
        scratch.reserve(font.len() + 1 + text.len());
        scratch.push_str(font);
        scratch.push('\n');
        scratch.push_str(text);
        scratch.as_str()
    }

    fn enforce_cap(&mut self) {
        while self.entries.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                break;
            }
        }
    }
}

/// Fits strings into a pixel budget, appending [`ELLIPSIS`] when they overflow.
pub struct TextFitter {
    cache: TextMeasureCache,
}

impl Default for TextFitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFitter {
    pub fn new() -> Self {
        Self::with_cache_capacity(TEXT_MEASURE_CACHE_CAP)
    }

    pub fn with_cache_capacity(max_entries: usize) -> Self {
        Self {
            cache: TextMeasureCache::new(max_entries),
        }
    }

    pub fn cache(&self) -> &TextMeasureCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Width of `text` in `font`, which must already be set on `ctx`.
    pub fn measure<D: DrawContext + ?Sized>(&mut self, ctx: &mut D, font: &str, text: &str) -> f64 {
        if let Some(width) = self.cache.get(font, text) {
            return width;
        }
        let width = ctx.measure_text(text);
        self.cache.insert(font, text, width);
        width
    }

    /// Truncate `text` to fit `max_width` pixels.
    ///
    /// Returns `text` unchanged when it fits. Otherwise returns the longest
    /// prefix that fits alongside the ellipsis, or the ellipsis alone when not
    /// even that fits. Empty text and non-positive budgets yield `""` without
    /// measuring anything.
    pub fn fit<'a, D: DrawContext + ?Sized>(
        &mut self,
        ctx: &mut D,
        font: &str,
        text: &'a str,
        max_width: f64,
    ) -> Cow<'a, str> {
        if text.is_empty() || max_width.is_nan() || max_width <= 0.0 {
            return Cow::Borrowed("");
        }
        if self.measure(ctx, font, text) <= max_width {
            return Cow::Borrowed(text);
        }

        let ellipsis_width = self.measure(ctx, font, ELLIPSIS);
        let available = max_width - ellipsis_width;
        if available <= 0.0 {
            return Cow::Borrowed(ELLIPSIS);
        }

        // boundaries[k] is the byte length of the first k chars.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let prefix = |chars: usize| {
            boundaries
                .get(chars)
                .and_then(|&end| text.get(..end))
                .unwrap_or_default()
        };

        // Binary search for the maximum prefix that fits
        let mut low = 0;
        let mut high = boundaries.len() - 1;
        while low < high {
            let mid = (low + high).div_ceil(2);
            if self.measure(ctx, font, prefix(mid)) <= available {
                low = mid;
            } else {
                high = mid - 1;
            }
        }

        let fitted = prefix(low);
        let mut truncated = String::with_capacity(fitted.len() + ELLIPSIS.len());
        truncated.push_str(fitted);
        truncated.push_str(ELLIPSIS);
        Cow::Owned(truncated)
    }
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
    use crate::render::recording::RecordingSurface;

    const FONT: &str = "13px sans-serif";

    #[test]
    fn measure_cache_evicts_oldest_entries() {
        let mut cache = TextMeasureCache::new(2);
        cache.insert(FONT, "a", 1.0);
        cache.insert(FONT, "b", 2.0);
        cache.insert(FONT, "c", 3.0);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(FONT, "a"), None);
        assert_eq!(cache.get(FONT, "c"), Some(3.0));
    }

    #[test]
    fn measure_cache_keys_include_font() {
        let mut cache = TextMeasureCache::new(8);
        cache.insert("10px a", "x", 5.0);
        assert_eq!(cache.get("12px a", "x"), None);
    }

    #[test]
    fn fitting_text_is_borrowed() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut fitter = TextFitter::new();
        let out = fitter.fit(&mut surface, FONT, "hello", 100.0);
        assert!(matches!(out, Cow::Borrowed("hello")));
    }

    #[test]
    fn multibyte_text_truncates_on_char_boundaries() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut fitter = TextFitter::new();
        // 7px per char: budget 40 leaves 33px for text -> 4 chars
        let out = fitter.fit(&mut surface, FONT, "日本語のテキスト", 40.0);
        assert_eq!(out, "日本語の\u{2026}");
    }

    #[test]
    fn repeated_fits_hit_the_cache() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut fitter = TextFitter::new();
        let _ = fitter.fit(&mut surface, FONT, "a long value that overflows", 50.0);
        let first = surface.measure_calls();
        let _ = fitter.fit(&mut surface, FONT, "a long value that overflows", 50.0);
        assert_eq!(surface.measure_calls(), first);
    }
}
