//! Trigger Detection
//!
//! Scans a call transcript against the pattern catalog and reports each
//! trigger category that matched, with a confidence derived from how much
//! textual evidence was found.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use adherence_core::{TriggerCategory, TriggerDetection};

/// Characters of transcript kept on each side of the first match
pub const CONTEXT_CHARS: usize = 50;

/// Maximum distinct keywords reported per detection
pub const MAX_KEYWORDS: usize = 5;

/// Compiled pattern groups for one category
struct CompiledCategory {
    category: TriggerCategory,
    patterns: Vec<Regex>,
}

static COMPILED_CATALOG: Lazy<Vec<CompiledCategory>> = Lazy::new(|| {
    let catalog: Vec<CompiledCategory> = TriggerCategory::ALL
        .iter()
        .map(|&category| CompiledCategory {
            category,
            patterns: category
                .patterns()
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .build()
                        .expect("catalog pattern must compile")
                })
                .collect(),
        })
        .collect();
    tracing::debug!("Compiled {} trigger pattern groups", catalog.len());
    catalog
});

/// Confidence for a number of matches: 0.70 for one, +0.10 per extra, capped at 0.99.
///
/// Computed in hundredths so the reported value is exact to two decimals.
pub fn confidence_for(match_count: usize) -> f32 {
    let hundredths = match_count.saturating_mul(10).saturating_add(60).min(99);
    hundredths as f32 / 100.0
}

/// Lower-cased copy of a transcript that remembers where each byte came from
struct LoweredText<'a> {
    original: &'a str,
    lowered: String,
    /// `origin[i]` is the byte offset in `original` of the char that produced
    /// lowered byte `i`; one extra trailing entry maps the end of text.
    origin: Vec<usize>,
}

impl<'a> LoweredText<'a> {
    fn new(original: &'a str) -> Self {
        let mut lowered = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len() + 1);

        for (offset, ch) in original.char_indices() {
            for lower in ch.to_lowercase() {
                let before = lowered.len();
                lowered.push(lower);
                origin.extend(std::iter::repeat(offset).take(lowered.len() - before));
            }
        }
        origin.push(original.len());

        Self { original, lowered, origin }
    }

    /// Map a span of the lowered text back onto the original
    fn original_span(&self, start: usize, end: usize) -> (usize, usize) {
        let orig_start = self.origin[start];
        let orig_end = self.origin[end].max(orig_start);
        (orig_start, orig_end)
    }

    /// Excerpt of the original around a lowered span, trimmed of whitespace
    fn context(&self, start: usize, end: usize) -> String {
        let (orig_start, orig_end) = self.original_span(start, end);

        let from = self.original[..orig_start]
            .char_indices()
            .rev()
            .take(CONTEXT_CHARS)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(orig_start);

        let to = self.original[orig_end..]
            .char_indices()
            .nth(CONTEXT_CHARS)
            .map(|(i, _)| orig_end + i)
            .unwrap_or(self.original.len());

        self.original[from..to].trim().to_string()
    }
}

/// Trigger detector over the static pattern catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerDetector;

impl TriggerDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect triggers in a transcript.
    ///
    /// Returns at most one detection per category, ordered by confidence
    /// descending with ties in category declaration order. An empty
    /// transcript yields no detections.
    pub fn detect(&self, transcript: &str) -> Vec<TriggerDetection> {
        if transcript.is_empty() {
            return Vec::new();
        }

        let text = LoweredText::new(transcript);
        tracing::trace!(chars = transcript.chars().count(), "Scanning transcript");

        let mut detections: Vec<TriggerDetection> = COMPILED_CATALOG
            .iter()
            .filter_map(|compiled| Self::detect_category(&text, compiled))
            .collect();

        // Stable sort keeps declaration order among equal confidences
        detections.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        detections
    }

    fn detect_category(
        text: &LoweredText<'_>,
        compiled: &CompiledCategory,
    ) -> Option<TriggerDetection> {
        // Every non-overlapping match of every group counts, even when two
        // groups match the same words
        let spans: Vec<(usize, usize)> = compiled
            .patterns
            .iter()
            .flat_map(|regex| regex.find_iter(&text.lowered).map(|m| (m.start(), m.end())))
            .collect();

        let &(first_start, first_end) = spans.iter().min_by_key(|(start, _)| *start)?;

        let mut keywords_found: Vec<String> = Vec::new();
        for &(start, end) in &spans {
            if keywords_found.len() == MAX_KEYWORDS {
                break;
            }
            let keyword = &text.lowered[start..end];
            if !keywords_found.iter().any(|k| k == keyword) {
                keywords_found.push(keyword.to_string());
            }
        }

        let category = compiled.category;
        let match_count = spans.len();
        let confidence = confidence_for(match_count);

        tracing::debug!(
            category = %category,
            match_count,
            confidence,
            "Trigger detected"
        );

        Some(TriggerDetection {
            category,
            confidence,
            severity: category.severity(),
            match_count,
            context: text.context(first_start, first_end),
            keywords_found,
            recommendation: category.intervention(),
        })
    }
}
