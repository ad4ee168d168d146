#![no_main]

use libfuzzer_sys::fuzz_target;
use velocity::index::trigram_to_chars;
use velocity::utils::{generate_trigrams, unique_trigrams};

fuzz_target!(|text: &str| {
    let trigrams = generate_trigrams(text);
    let unique = unique_trigrams(text);
    assert!(unique.len() <= trigrams.len());

    // Every trigram is three non-whitespace chars of the lowercased text
    let lowered = text.to_lowercase();
    for trigram in trigrams {
        let chars = trigram_to_chars(trigram);
        assert!(chars.iter().all(|c| !c.is_whitespace()));
        let s: String = chars.iter().collect();
        assert!(lowered.contains(&s));
    }
});
