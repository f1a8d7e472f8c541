//! Whitespace canonicalization for raw document text
//!
//! OCR output and copy-pasted legal text arrive with wildly inconsistent
//! indentation. Normalization collapses horizontal whitespace while keeping
//! every newline, because runs of two or more newlines delimit sections for
//! the segmenter downstream.

/// Canonicalize whitespace: carriage returns become newlines, the whole text
/// is trimmed, and runs of spaces/tabs collapse to a single space. Newlines
/// are never touched, so paragraph breaks survive.
pub fn normalize(text: &str) -> String {
    let text = text.replace('\r', "\n");
    let text = text.trim();

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        match ch {
            ' ' | '\t' => pending_space = true,
            _ => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(ch);
            }
        }
    }
    out
}
