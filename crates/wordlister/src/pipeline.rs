//! Token validation and normalization.
//!
//! Each raw token runs through a fixed chain of pure filters:
//! case-fold, validity check, singularization, symbol stripping, a
//! minimum-length gate, lemma lookup, and a stop-word gate. The chain
//! transforms or drops; it never fails. Ordering matters: validity is
//! checked on the lower-cased raw form so tokens carrying forbidden
//! symbols never reach singularization, while the length and stop-word
//! gates see the fully cleaned form.

use wordlist_lemmas::LemmaTable;
use wordlist_morph::Morphology;

/// Longest token accepted by the validator, in bytes.
pub const MAX_TOKEN_LEN: usize = 20;

/// Punctuation deleted from tokens after singularization.
const CLEAR_SYMBOLS: &[char] = &[
    '.', '!', '?', ',', '(', ')', '[', ']', '"', '\'', ';', ':', '{', '}',
];

/// Substrings that disqualify a token outright.
///
/// The multi-byte quote entries are unreachable behind the ASCII-only
/// check but are kept so the table reads as the complete denylist.
const INVALID_SUBSTRINGS: &[&str] = &[
    "&", "#", "|", "/", "www", "http", "%", "@", "'", "\u{2019}", "\u{201d}", "+", "=", "0x",
    "x0", "_", "\\",
];

/// High-frequency function words excluded from counting.
pub const STOP_WORDS: &[&str] = &[
    "a", "the", "is", "are", "if", "what", "where", "of", "you", "me", "he", "she", "it", "to",
    "or", "can", "both", "and", "i", "from", "use", "let", "for", "add", "in", "be", "get",
    "either", "cannot", "do", "there", "no", "yes", "how", "on", "same", "any", "so", "allow",
    "up", "all", "own", "which", "per", "not", "with", "within", "we", "then", "than", "they",
    "this", "through", "when", "will", "because",
];

/// Reject a token before any transformation.
///
/// Expects its input already lower-cased; the accepted domain is
/// printable ASCII of at most [`MAX_TOKEN_LEN`] bytes with none of the
/// denylisted substrings.
pub fn is_invalid(token: &str) -> bool {
    if token.len() > MAX_TOKEN_LEN {
        return true;
    }
    if token.chars().count() != token.len() {
        return true;
    }
    if token
        .chars()
        .any(|c| !c.is_ascii() || c.is_ascii_control())
    {
        return true;
    }
    INVALID_SUBSTRINGS.iter().any(|s| token.contains(s))
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Delete every occurrence of the clear symbols, not just at the ends.
fn strip_symbols(token: &str) -> String {
    token.chars().filter(|c| !CLEAR_SYMBOLS.contains(c)).collect()
}

/// Run the full normalization chain; `None` means the token is dropped.
pub fn normalize(raw: &str, lemmas: &LemmaTable, morph: &dyn Morphology) -> Option<String> {
    let lowered = raw.to_lowercase();
    if is_invalid(&lowered) {
        return None;
    }
    let singular = morph.singular(&lowered);
    let cleaned = strip_symbols(&singular);
    if cleaned.len() < 2 {
        return None;
    }
    let canonical = lemmas.resolve(&cleaned);
    if is_stop_word(canonical) {
        return None;
    }
    Some(canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordlist_morph::EnglishMorph;

    fn normalize_plain(raw: &str) -> Option<String> {
        normalize(raw, &LemmaTable::empty(), &EnglishMorph::default())
    }

    #[test]
    fn rejects_overlong_tokens() {
        assert!(is_invalid(&"x".repeat(21)));
        assert!(!is_invalid(&"x".repeat(20)));
    }

    #[test]
    fn rejects_non_ascii_and_non_printable() {
        assert!(is_invalid("naïve"));
        assert!(is_invalid("tab\there"));
        assert!(is_invalid("bell\u{7}"));
        assert!(!is_invalid("plain"));
    }

    #[test]
    fn rejects_denylisted_substrings() {
        for token in ["a&b", "x#y", "a|b", "a/b", "www.example.com", "http", "50%", "a@b",
            "don't", "a+b", "a=b", "0xff", "x00", "snake_case", "a\\b"]
        {
            assert!(is_invalid(token), "{token} should be invalid");
        }
    }

    #[test]
    fn strips_punctuation_everywhere_not_just_edges() {
        assert_eq!(normalize_plain("(run!)").as_deref(), Some("run"));
        assert_eq!(normalize_plain("mid.dle").as_deref(), Some("middle"));
    }

    #[test]
    fn drops_short_and_stop_tokens() {
        assert_eq!(normalize_plain("a!"), None);
        assert_eq!(normalize_plain("The"), None);
        assert_eq!(normalize_plain("BECAUSE"), None);
    }

    #[test]
    fn singularizes_before_counting() {
        assert_eq!(normalize_plain("cats").as_deref(), Some("cat"));
        assert_eq!(normalize_plain("Churches").as_deref(), Some("church"));
    }

    #[test]
    fn resolves_lemmas_after_cleaning() {
        let lemmas =
            LemmaTable::from_reader(std::io::Cursor::new(b"run\trunning\n".to_vec())).unwrap();
        let morph = EnglishMorph::default();
        assert_eq!(
            normalize("running!", &lemmas, &morph).as_deref(),
            Some("run")
        );
    }

    #[test]
    fn normalization_is_idempotent_on_canonical_tokens() {
        for raw in ["word!", "Cats", "middle.", "runner"] {
            let once = normalize_plain(raw).unwrap();
            assert_eq!(normalize_plain(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn every_stop_word_is_dropped() {
        for word in STOP_WORDS {
            assert_eq!(normalize_plain(word), None, "{word} should be dropped");
        }
    }
}
