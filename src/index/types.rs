/// Identifier of a document, assigned in `add` call order starting at 0
pub type DocId = u32;

/// A trigram is three `char`s packed into a u64 (21 bits each, lower 63 bits used)
pub type Trigram = u64;

const CHAR_BITS: u32 = 21;
const CHAR_MASK: u64 = (1 << CHAR_BITS) - 1;

/// Summary counters for an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Documents added so far (equals the next id to be assigned)
    pub doc_count: u32,
    /// Distinct trigrams with a posting set
    pub trigram_count: usize,
    /// Sum of posting set sizes
    pub posting_count: u64,
}

/// Convert 3 chars to a trigram
#[inline]
pub fn chars_to_trigram(c0: char, c1: char, c2: char) -> Trigram {
    ((c0 as u64) << (2 * CHAR_BITS)) | ((c1 as u64) << CHAR_BITS) | (c2 as u64)
}

/// Convert trigram back to chars
#[inline]
pub fn trigram_to_chars(t: Trigram) -> [char; 3] {
    let unpack = |shift: u32| {
        char::from_u32(((t >> shift) & CHAR_MASK) as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
    };
    [unpack(2 * CHAR_BITS), unpack(CHAR_BITS), unpack(0)]
}

/// Render a trigram as a 3-char string
pub fn trigram_to_string(t: Trigram) -> String {
    trigram_to_chars(t).iter().collect()
}
