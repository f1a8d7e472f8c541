//! Positional phrase alignment
//!
//! Reconciles two phrase sequences of possibly different length into 1:1
//! pairs. Equal lengths zip directly; otherwise the longer side is grouped
//! into as many contiguous chunks as the shorter side has elements, each
//! chunk joined with single spaces.
//!
//! This is deliberately crude positional alignment with no semantic
//! matching: it trades precision for determinism and zero external
//! dependencies, and is only sound when both sides are roughly parallel in
//! structure (true for formally structured legal documents). Sides with
//! genuinely different sentence counts due to translation style will be
//! silently misaligned.

use serde::{Deserialize, Serialize};

/// One aligned unit of source-language and target-language text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhrasePair {
    /// Source-language side
    pub source: String,

    /// Target-language side
    pub target: String,
}

/// Align two phrase sequences into ordered 1:1 pairs.
///
/// Returns `min(source.len(), target.len())` pairs; every input phrase
/// appears in exactly one pair, in original order. Either side empty yields
/// an empty result (the caller applies the document-level fallback).
pub fn align(source: &[String], target: &[String]) -> Vec<PhrasePair> {
    if source.is_empty() || target.is_empty() {
        return Vec::new();
    }

    use std::cmp::Ordering;
    match source.len().cmp(&target.len()) {
        Ordering::Equal => source
            .iter()
            .zip(target.iter())
            .map(|(s, t)| PhrasePair {
                source: s.clone(),
                target: t.clone(),
            })
            .collect(),
        Ordering::Greater => group(source, target.len())
            .into_iter()
            .zip(target.iter())
            .map(|(chunk, t)| PhrasePair {
                source: chunk,
                target: t.clone(),
            })
            .collect(),
        Ordering::Less => source
            .iter()
            .zip(group(target, source.len()))
            .map(|(s, chunk)| PhrasePair {
                source: s.clone(),
                target: chunk,
            })
            .collect(),
    }
}

/// Group the longer sequence into exactly `count` contiguous chunks of
/// `ceil(len / count)` elements, joined with single spaces. The last chunks
/// hold whatever remains, which can leave a trailing chunk empty when the
/// rounding overshoots.
fn group(longer: &[String], count: usize) -> Vec<String> {
    let chunk_size = longer.len().div_ceil(count);
    (0..count)
        .map(|i| {
            let start = (i * chunk_size).min(longer.len());
            let end = ((i + 1) * chunk_size).min(longer.len());
            longer[start..end].join(" ")
        })
        .collect()
}
