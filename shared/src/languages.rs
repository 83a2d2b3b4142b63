//! Supported interface languages
//!
//! Maps the short codes used by clients to display names (for prompting the
//! AI provider) and to NLLB-200 language tags (for machine translation).

/// A supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub nllb: &'static str,
}

/// All languages the assistant is prompted in
pub const LANGUAGES: &[Language] = &[
    Language { code: "kn", name: "Kannada", nllb: "kan_Knda" },
    Language { code: "hi", name: "Hindi", nllb: "hin_Deva" },
    Language { code: "ta", name: "Tamil", nllb: "tam_Taml" },
    Language { code: "te", name: "Telugu", nllb: "tel_Telu" },
    Language { code: "ml", name: "Malayalam", nllb: "mal_Mlym" },
    Language { code: "mr", name: "Marathi", nllb: "mar_Deva" },
    Language { code: "bn", name: "Bengali", nllb: "ben_Beng" },
    Language { code: "gu", name: "Gujarati", nllb: "guj_Gujr" },
    Language { code: "pa", name: "Punjabi", nllb: "pan_Guru" },
    Language { code: "or", name: "Odia", nllb: "ory_Orya" },
    Language { code: "ur", name: "Urdu", nllb: "urd_Arab" },
    Language { code: "en", name: "English", nllb: "eng_Latn" },
];

/// English, the fallback for unknown codes
pub const ENGLISH: Language = Language { code: "en", name: "English", nllb: "eng_Latn" };

/// NLLB tag used when a translation code is unknown
const DEFAULT_NLLB_TAG: &str = "kan_Knda";

/// Look up a language by its short code (case-insensitive)
pub fn find_language(code: &str) -> Option<Language> {
    let code = code.trim().to_lowercase();
    LANGUAGES.iter().copied().find(|l| l.code == code)
}

/// Resolve a code for prompting, falling back to English
pub fn resolve_language(code: Option<&str>) -> Language {
    code.and_then(find_language).unwrap_or(ENGLISH)
}

/// NLLB tag for a short code
pub fn nllb_tag(code: &str) -> &'static str {
    find_language(code).map(|l| l.nllb).unwrap_or(DEFAULT_NLLB_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("kn"), "Kannada")]
    #[case(Some("HI"), "Hindi")]
    #[case(Some("xx"), "English")]
    #[case(None, "English")]
    fn test_resolve_language(#[case] code: Option<&str>, #[case] name: &str) {
        assert_eq!(resolve_language(code).name, name);
    }

    #[rstest]
    #[case("en", "eng_Latn")]
    #[case("ta", "tam_Taml")]
    #[case("zz", "kan_Knda")]
    fn test_nllb_tag(#[case] code: &str, #[case] tag: &str) {
        assert_eq!(nllb_tag(code), tag);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = LANGUAGES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LANGUAGES.len());
        assert!(find_language("ur").is_some());
        assert!(find_language("fr").is_none());
    }
}
