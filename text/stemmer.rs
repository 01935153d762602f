use once_cell::sync::Lazy;
use regex::Regex;

use crate::stopwords::is_stopword;

// Arabic letter runs only. Diacritics are removed beforehand so that
// vocalized tokens do not split apart.
static ARABIC_LETTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0621}-\x{063A}\x{0641}-\x{064A}]+").unwrap());

static COMBINING_MARKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0610}-\x{061A}\x{064B}-\x{065F}\x{0670}\x{0640}]").unwrap());

const MIN_ROOT_LEN: usize = 3;

const ARTICLE_PREFIXES: &[&str] = &["وال", "فال", "بال", "كال", "لل", "ال"];
const SINGLE_PREFIXES: &[char] = &['و', 'ف', 'ب', 'ك', 'ل'];
const PAIR_SUFFIXES: &[&str] = &[
    "ها", "ان", "ات", "ون", "ين", "تن", "تم", "كم", "هن", "هم", "نا", "يه", "يا",
];
const SINGLE_SUFFIXES: &[char] = &['ه', 'ة', 'ي', 'ا', 'ت', 'ن', 'ك'];
const WEAK_LETTERS: &[char] = &['ا', 'و', 'ي'];
const FORMATIVE_FIRST: &[char] = &['ا', 'ي', 'ت', 'ن', 'م'];

/// Reduces text to a stopword-free sequence of stemmed Arabic tokens.
///
/// Non-Arabic fragments (Latin letters, digits, leftover symbols) are
/// silently dropped, so the function tolerates un-normalized input. Returns
/// an empty string when nothing survives. Total and deterministic.
#[must_use]
pub fn reduce(text: &str) -> String {
    let stripped = COMBINING_MARKS.replace_all(text, "");
    ARABIC_LETTERS
        .find_iter(&stripped)
        .map(|m| m.as_str())
        .filter(|token| !is_stopword(token))
        .map(stem)
        .filter(|stemmed| !stemmed.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Light Arabic stemmer approximating a triliteral root.
///
/// Strips the definite article and single-letter particles, then common
/// suffixes, then formative first letters and weak interior letters, never
/// shrinking a token below three letters.
#[must_use]
pub fn stem(token: &str) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    if chars.len() <= MIN_ROOT_LEN {
        return chars.into_iter().collect();
    }
    strip_prefix(&mut chars);
    strip_suffixes(&mut chars);
    shrink_to_root(&mut chars);
    chars.into_iter().collect()
}

fn strip_prefix(chars: &mut Vec<char>) {
    for prefix in ARTICLE_PREFIXES {
        let prefix: Vec<char> = prefix.chars().collect();
        if chars.len() >= prefix.len() + MIN_ROOT_LEN && chars[..prefix.len()] == prefix[..] {
            chars.drain(..prefix.len());
            return;
        }
    }
    if chars.len() > MIN_ROOT_LEN && SINGLE_PREFIXES.contains(&chars[0]) {
        chars.remove(0);
    }
}

fn strip_suffixes(chars: &mut Vec<char>) {
    for suffix in PAIR_SUFFIXES {
        let suffix: Vec<char> = suffix.chars().collect();
        if chars.len() >= suffix.len() + MIN_ROOT_LEN
            && chars[chars.len() - suffix.len()..] == suffix[..]
        {
            chars.truncate(chars.len() - suffix.len());
            break;
        }
    }
    // Four-letter tokens keep their last letter: a weak interior letter is
    // the more likely culprit there (فعيل forms), handled by the root pass.
    if chars.len() > MIN_ROOT_LEN + 1 && SINGLE_SUFFIXES.contains(&chars[chars.len() - 1]) {
        chars.pop();
    }
}

fn shrink_to_root(chars: &mut Vec<char>) {
    while chars.len() > 4 {
        let interior = 1..chars.len() - 1;
        let Some(weak) = chars[interior.clone()]
            .iter()
            .position(|c| WEAK_LETTERS.contains(c))
        else {
            break;
        };
        chars.remove(interior.start + weak);
    }
    if chars.len() == 4 {
        if FORMATIVE_FIRST.contains(&chars[0]) {
            chars.remove(0);
        } else if let Some(weak) = chars[1..3].iter().position(|c| WEAK_LETTERS.contains(c)) {
            chars.remove(1 + weak);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    #[test]
    fn stem_strips_article_and_particles() {
        assert_eq!(stem("بالحزن"), "حزن");
        assert_eq!(stem("الحزن"), "حزن");
        assert_eq!(stem("والقلق"), "قلق");
    }

    #[test]
    fn stem_removes_formative_letters() {
        assert_eq!(stem("تشعر"), "شعر");
        assert_eq!(stem("اشعر"), "شعر");
        assert_eq!(stem("مدرسه"), "درس");
    }

    #[test]
    fn stem_removes_weak_interior_letters() {
        assert_eq!(stem("حزين"), "حزن");
        assert_eq!(stem("شديد"), "شدد");
    }

    #[test]
    fn stem_keeps_short_tokens() {
        assert_eq!(stem("يوم"), "يوم");
        assert_eq!(stem("هم"), "هم");
    }

    #[test]
    fn reduce_drops_stopwords_entirely() {
        assert_eq!(reduce("هل في من علي هذا"), "");
        assert_eq!(reduce(""), "");
    }

    #[test]
    fn reduce_drops_non_arabic_fragments() {
        assert_eq!(reduce("hello حزن 123 :)"), "حزن");
    }

    #[test]
    fn reduce_is_deterministic_and_tolerates_raw_input() {
        let raw = "هل تَشعر بالحزنِ؟";
        let direct = reduce(raw);
        let cleaned = reduce(&normalize(raw));
        assert_eq!(direct, cleaned);
        assert_eq!(direct, "شعر حزن");
    }

    #[test]
    fn full_pipeline_on_reference_answer() {
        let answer = normalize("نعم أشعر بحزن شديد كل يوم");
        let reduced = reduce(&answer);
        assert!(!reduced.is_empty());
        for token in reduced.split(' ') {
            assert!(token.chars().all(|c| ('\u{0621}'..='\u{064A}').contains(&c)));
        }
    }
}
