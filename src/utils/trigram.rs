use crate::index::types::{chars_to_trigram, Trigram};

/// Generate the trigram sequence for a piece of text.
///
/// The text is lowercased and split on whitespace. Every token of `L` chars
/// yields `L - 2` trigrams from a sliding window of width 3, so tokens
/// shorter than 3 chars yield nothing and no trigram crosses a token
/// boundary. Punctuation stays part of its token.
///
/// Order follows the text and duplicates are kept: `"banana"` yields
/// `ban, ana, nan, ana`.
pub fn generate_trigrams(text: &str) -> Vec<Trigram> {
    let lowered = text.to_lowercase();
    let mut trigrams = Vec::with_capacity(lowered.len());
    let mut chars: Vec<char> = Vec::with_capacity(32);

    for token in lowered.split_whitespace() {
        chars.clear();
        chars.extend(token.chars());
        trigrams.extend(chars.windows(3).map(|w| chars_to_trigram(w[0], w[1], w[2])));
    }

    trigrams
}

/// Distinct trigrams of `text`, sorted.
///
/// Indexing only records membership, so callers that don't need the
/// multiplicity of [`generate_trigrams`] can skip the duplicate inserts.
pub fn unique_trigrams(text: &str) -> Vec<Trigram> {
    let mut trigrams = generate_trigrams(text);
    trigrams.sort_unstable();
    trigrams.dedup();
    trigrams
}

/// Check if content is likely binary
pub fn is_binary(content: &[u8]) -> bool {
    let sample_size = content.len().min(8192);
    let sample = &content[..sample_size];

    // Check for null bytes
    let null_count = sample.iter().filter(|&&b| b == 0).count();
    if null_count > sample_size / 10 {
        return true;
    }

    // Check for high proportion of non-text bytes
    let non_text_count = sample
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    non_text_count > sample_size / 8
}
