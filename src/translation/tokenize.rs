//! Splitting input text into translatable units.

/// Splits text into whitespace-delimited units, preserving their order.
///
/// Leading and trailing whitespace is ignored, and runs of whitespace count
/// as a single separator, so blank input yields no units.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
