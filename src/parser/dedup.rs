//! Rolling-caption overlap detection.
//!
//! Auto-generated tracks often repeat the tail of the previous line at the
//! start of the next cue. Words are compared after lowercasing; punctuation
//! is kept, so "no." and "no!" are different words.

/// Number of leading words of `current` that repeat the trailing words of
/// `previous`, or 0 when the longest overlap is shorter than `min_words`.
///
/// The result may equal the word count of `current` (a full repeat); callers
/// decide what a full repeat means.
pub fn overlap_word_count(previous: &str, current: &str, min_words: usize) -> usize {
    let previous_words: Vec<String> = normalized_words(previous);
    let current_words: Vec<String> = normalized_words(current);

    let longest = previous_words.len().min(current_words.len());
    let min_words = min_words.max(1);

    for k in (min_words..=longest).rev() {
        if previous_words[previous_words.len() - k..] == current_words[..k] {
            return k;
        }
    }

    0
}

/// Drop the first `count` words, returning the rest single-spaced
pub fn drop_leading_words(text: &str, count: usize) -> String {
    text.split_whitespace()
        .skip(count)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn normalized_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(|word| word.to_lowercase()).collect()
}
