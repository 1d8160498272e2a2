/*!
Fragment preparation utilities.

An annotated suffix index is built over a collection of short *fragments*
rather than over the raw text; scoring quality degrades noticeably when the
whole text is indexed as a single string. This module turns free text into
such a collection (uppercasing, word tokenization, fixed-size word chunks)
and appends the unique terminator code points that make every suffix of the
collection end in a distinct leaf.
*/

use crate::error::{AstError, Result};

/// First code point of the reserved terminator region.
///
/// Fragment `i` is terminated with `U+0A00 + i`; input fragments must not
/// contain code points from `[0x0A00, 0x0A00 + m)` where `m` is the
/// collection size.
pub const TERMINATOR_BASE: u32 = 0x0A00;

/// Number of words per fragment used by [`text_to_fragments`] by default.
pub const DEFAULT_WORDS_PER_FRAGMENT: usize = 3;

/// Normalizes free text to the uniform representation used for indexing.
///
/// Queries and indexed text must go through the same normalization for
/// scores to be meaningful.
///
/// # Example
/// ```
/// use east_core::text::prepare_text;
///
/// assert_eq!(prepare_text("Annotated suffix trees"), "ANNOTATED SUFFIX TREES");
/// ```
pub fn prepare_text(text: &str) -> String {
    text.to_uppercase()
}

/// Splits text into word tokens.
///
/// A token is a maximal run of alphanumeric characters, underscores or
/// apostrophes; everything else separates tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits free text into a fragment collection of `words`-word chunks.
///
/// The text is normalized with [`prepare_text`], tokenized, and tokens
/// shorter than three characters or consisting only of digits are dropped.
/// The surviving tokens are concatenated in groups of `words`. A text with
/// no surviving tokens yields a single whitespace fragment so that
/// construction on top of it still succeeds.
///
/// # Example
/// ```
/// use east_core::text::text_to_fragments;
///
/// let fragments = text_to_fragments("the quick brown fox jumps over it", 3);
/// assert_eq!(fragments, vec!["THEQUICKBROWN", "FOXJUMPSOVER"]);
/// ```
pub fn text_to_fragments(text: &str, words: usize) -> Vec<String> {
    let words = words.max(1);
    let text = prepare_text(text);
    let tokens: Vec<String> = tokenize(&text)
        .into_iter()
        .filter(|t| t.chars().count() > 2 && !t.chars().all(|c| c.is_ascii_digit()))
        .collect();

    let mut fragments: Vec<String> = tokens.chunks(words).map(|chunk| chunk.concat()).collect();
    if fragments.is_empty() {
        fragments.push(" ".to_string());
    }
    fragments
}

/// Appends a unique terminator code point to each fragment.
///
/// Fragment `i` receives `U+0A00 + i`, which guarantees that no suffix of
/// the collection is a prefix of another. Fails with
/// [`AstError::EmptyCollection`] on an empty collection and with
/// [`AstError::ReservedCharacterInInput`] when a fragment already contains a
/// code point from the reserved region.
pub fn make_unique_endings(fragments: &[String]) -> Result<Vec<Vec<char>>> {
    if fragments.is_empty() {
        return Err(AstError::EmptyCollection);
    }
    let reserved = TERMINATOR_BASE..TERMINATOR_BASE + fragments.len() as u32;
    for (i, fragment) in fragments.iter().enumerate() {
        if let Some(c) = fragment.chars().find(|c| reserved.contains(&(*c as u32))) {
            return Err(AstError::reserved_character(i, c));
        }
    }
    Ok(fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            let terminator = char::from_u32(TERMINATOR_BASE + i as u32)
                .expect("terminator region exceeds the Basic Multilingual Plane");
            fragment.chars().chain(std::iter::once(terminator)).collect()
        })
        .collect())
}

/// Returns the largest `i` such that `a[..i] == b[..i]`.
pub fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_common_prefix_len_empty() {
        assert_eq!(common_prefix_len(&chars("abc"), &chars("bc")), 0);
        assert_eq!(common_prefix_len(&[], &[]), 0);
    }

    #[test]
    fn test_common_prefix_len_partial() {
        assert_eq!(common_prefix_len(&chars("abc"), &chars("ac")), 1);
        assert_eq!(common_prefix_len(&chars("mnc"), &chars("mnd")), 2);
    }

    #[test]
    fn test_common_prefix_len_full() {
        assert_eq!(common_prefix_len(&chars("abc"), &chars("abc")), 3);
        assert_eq!(common_prefix_len(&chars("abc"), &chars("abcd")), 3);
    }

    #[test]
    fn test_tokenize() {
        let text = "Well, what a sunny day!";
        let tokens = vec!["Well", "what", "a", "sunny", "day"];
        assert_eq!(tokenize(text), tokens);
    }

    #[test]
    fn test_tokenize_keeps_apostrophes_and_underscores() {
        assert_eq!(tokenize("don't stop_me now"), vec!["don't", "stop_me", "now"]);
    }

    #[test]
    fn test_text_to_fragments_groups_words() {
        let fragments = text_to_fragments("the quick brown fox jumps over it", 3);
        assert_eq!(fragments, vec!["THEQUICKBROWN", "FOXJUMPSOVER"]);
    }

    #[test]
    fn test_text_to_fragments_filters_digits_and_short_tokens() {
        let fragments = text_to_fragments("a 42 1999 ox cat dog owl", 2);
        assert_eq!(fragments, vec!["CATDOG", "OWL"]);
    }

    #[test]
    fn test_text_to_fragments_never_empty() {
        assert_eq!(text_to_fragments("a b c 12!", 3), vec![" "]);
    }

    #[test]
    fn test_make_unique_endings() {
        let fragments = vec!["AB".to_string(), "C".to_string()];
        let terminated = make_unique_endings(&fragments).unwrap();
        assert_eq!(terminated[0], vec!['A', 'B', '\u{0A00}']);
        assert_eq!(terminated[1], vec!['C', '\u{0A01}']);
    }

    #[test]
    fn test_make_unique_endings_empty_collection() {
        let err = make_unique_endings(&[]).unwrap_err();
        assert!(matches!(err, AstError::EmptyCollection));
    }

    #[test]
    fn test_make_unique_endings_rejects_reserved_code_points() {
        let fragments = vec!["AB".to_string(), "C\u{0A00}D".to_string()];
        let err = make_unique_endings(&fragments).unwrap_err();
        assert!(matches!(
            err,
            AstError::ReservedCharacterInInput {
                fragment: 1,
                code_point: 0x0A00,
            }
        ));
    }

    #[test]
    fn test_make_unique_endings_allows_code_points_past_the_region() {
        // U+0A05 is reserved only while the collection holds at least six fragments.
        let fragments = vec!["A\u{0A05}".to_string(), "B".to_string()];
        assert!(make_unique_endings(&fragments).is_ok());
    }
}
