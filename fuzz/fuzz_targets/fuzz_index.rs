#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use velocity::index::TrigramIndex;
use velocity::utils::unique_trigrams;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    docs: Vec<&'a str>,
    query: &'a str,
}

fuzz_target!(|input: Input| {
    let mut index = TrigramIndex::new();
    for (k, doc) in input.docs.iter().enumerate() {
        assert_eq!(index.add(doc) as usize, k);
    }

    let result = index.search(input.query);
    let query_trigrams = unique_trigrams(input.query);
    if query_trigrams.is_empty() {
        assert!(result.is_empty());
    }

    // A hit contains every query trigram; nothing else is returned
    for (k, doc) in input.docs.iter().enumerate() {
        let doc_trigrams = unique_trigrams(doc);
        let expected = !query_trigrams.is_empty()
            && query_trigrams
                .iter()
                .all(|t| doc_trigrams.binary_search(t).is_ok());
        assert_eq!(result.contains(k as u32), expected);
    }
});
