//! Text canonicalization for matching.
//!
//! Queries and candidate strings (path segments, display names, performer
//! and title fields) are folded to the same case- and diacritic-insensitive
//! form before substring comparison. The original strings are never altered:
//! folding is for matching only, display and storage always use the input
//! as given.

/// Fold a string for matching: lowercase plus diacritic stripping.
///
/// Pure function — identical input always yields identical output, and it
/// must be applied to both sides of every comparison.
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        for lower in ch.to_lowercase() {
            if let Some(folded) = fold_char(lower) {
                out.push(folded);
            }
        }
    }
    out
}

/// Map a lowercased char to its base form. Combining diacritical marks fold
/// away entirely so decomposed input matches precomposed input.
fn fold_char(ch: char) -> Option<char> {
    let folded = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' => 'u',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ç' | 'ć' | 'č' => 'c',
        'ý' | 'ÿ' => 'y',
        'š' | 'ś' => 's',
        'ž' | 'ź' | 'ż' => 'z',
        '\u{0300}'..='\u{036f}' => return None,
        other => other,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii() {
        assert_eq!(fold("Guantanamera"), "guantanamera");
        assert_eq!(fold("TROVA"), "trova");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(fold("Música"), "musica");
        assert_eq!(fold("mánuel"), "manuel");
        assert_eq!(fold("José Ángel"), "jose angel");
    }

    #[test]
    fn enye_folds_to_n() {
        assert_eq!(fold("Niño"), "nino");
    }

    #[test]
    fn decomposed_input_matches_precomposed() {
        // "a" + U+0301 combining acute vs precomposed "á"
        assert_eq!(fold("a\u{0301}"), fold("á"));
    }

    #[test]
    fn query_and_candidate_fold_identically() {
        assert_eq!(fold("MANUEL"), fold("mánuel"));
    }

    #[test]
    fn passes_through_digits_and_punctuation() {
        assert_eq!(fold("Música 1/Trova"), "musica 1/trova");
    }

    #[test]
    fn empty_string() {
        assert_eq!(fold(""), "");
    }
}
