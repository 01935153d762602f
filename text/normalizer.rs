use once_cell::sync::Lazy;
use regex::Regex;

// Quote marks, line breaks, digits (Unicode, so Arabic-Indic too) and the
// punctuation the questionnaire form produces.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"\n\d,;.،؛؟?!]"#).unwrap());

// Extended Arabic marks above the tashkeel block, plus tatweel. Zero-width
// noise, removed rather than replaced.
static EXTENDED_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0610}-\x{061A}\x{0653}-\x{065F}\x{0670}\x{0640}]").unwrap());

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

// Emoticons, pictographs, transport symbols, flags, dingbats, enclosed
// characters.
static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2702}-\x{27B0}\x{24C2}-\x{1F251}]",
    )
    .unwrap()
});

// Standard tashkeel.
static TASHKEEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{064B}-\x{0652}]").unwrap());

static ALEF_FORMS: Lazy<Regex> = Lazy::new(|| Regex::new("[إأآ]").unwrap());

/// Deterministic cleanup of raw Arabic text.
///
/// Replaces separators with spaces, strips diacritics and emoji, and unifies
/// letter variants. Total and idempotent: `normalize(normalize(x)) ==
/// normalize(x)` for any input, and the result carries no doubled whitespace.
/// Characters outside the substitution rules (e.g. Latin letters) pass
/// through; downstream reduction discards them.
#[must_use]
pub fn normalize(text: &str) -> String {
    let cleaned = SEPARATORS.replace_all(text, " ");
    let cleaned = EXTENDED_MARKS.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_RUNS.replace_all(&cleaned, " ");
    let cleaned = EMOJI.replace_all(&cleaned, "");
    let cleaned = TASHKEEL.replace_all(&cleaned, "");
    let cleaned = ALEF_FORMS.replace_all(&cleaned, "ا");
    let cleaned: String = cleaned
        .chars()
        .map(|c| match c {
            'ة' => 'ه',
            'ى' => 'ي',
            'ؤ' => 'و',
            'ئ' => 'ي',
            other => other,
        })
        .collect();
    // Emoji removal can leave doubled spaces behind; collapsing again keeps
    // the function idempotent.
    let cleaned = WHITESPACE_RUNS.replace_all(&cleaned, " ");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_alef_forms() {
        assert_eq!(normalize("إأآا"), "اااا");
    }

    #[test]
    fn unifies_teh_marbuta_and_maksura() {
        assert_eq!(normalize("مدرسة"), "مدرسه");
        assert_eq!(normalize("على"), "علي");
        assert_eq!(normalize("مسؤول سيئ"), "مسوول سيي");
    }

    #[test]
    fn strips_digits_punctuation_and_emoji() {
        let result = normalize("مرحبا!! 😊 123");
        assert_eq!(result, "مرحبا");
        assert!(!result.contains('!'));
        assert!(result.chars().all(|c| !c.is_numeric()));
    }

    #[test]
    fn strips_tashkeel() {
        assert_eq!(normalize("بِسْمِ اللَّهِ"), "بسم الله");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("  حزن \n\n شديد  "), "حزن شديد");
    }

    #[test]
    fn latin_passes_through() {
        assert_eq!(normalize("abc حزن"), "abc حزن");
    }

    #[test]
    fn empty_input_is_fine() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("،؛؟"), "");
    }

    #[test]
    fn idempotent_on_messy_input() {
        let samples = [
            "مرحبا!! 😊 123",
            "هل مررتَ بفترةٍ، استمرت أسبوعين؟",
            "  نعم 🚗 أشعر بحزنٍ شديدٍ كل يوم  ",
            "plain ascii only",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
