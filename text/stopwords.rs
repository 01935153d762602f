use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Fixed Arabic stopword list.
///
/// Stored in normalized orthography (alef unified, teh-marbuta as heh,
/// alef-maksura as yeh), with the common pre-normalization spellings kept as
/// well so that `reduce` tolerates un-normalized input.
pub static ARABIC_STOPWORDS: &[&str] = &[
    // particles and prepositions
    "في", "من", "الي", "إلى", "الى", "علي", "على", "عن", "مع", "بين", "بعد", "قبل", "حتي",
    "حتى", "منذ", "حول", "دون", "عند", "لدي", "لدى", "نحو", "خلال", "ضد", "سوي", "سوى",
    // conjunctions and connectors
    "و", "او", "أو", "ثم", "لكن", "بل", "اذ", "إذ", "اذا", "إذا", "لو", "كما", "كي", "لكي",
    "حيث", "بينما", "لذلك", "لان", "لأن", "ان", "أن", "إن", "انه", "أنه", "إنه", "انها",
    "أنها", "إنها",
    // pronouns
    "انا", "أنا", "نحن", "انت", "أنت", "انتم", "أنتم", "انتي", "هو", "هي", "هم", "هن",
    "هما", "نفس", "نفسه", "نفسها",
    // demonstratives and relatives
    "هذا", "هذه", "ذلك", "تلك", "هولاء", "هؤلاء", "الذي", "التي", "الذين", "اللاتي",
    "اللواتي", "ذو", "ذات",
    // interrogatives
    "هل", "ما", "ماذا", "لماذا", "كيف", "اين", "أين", "متي", "متى", "كم", "اي", "أي",
    // negation, affirmation, auxiliaries
    "لا", "لم", "لن", "ليس", "ليست", "لست", "نعم", "كلا", "قد", "لقد", "سوف",
    // common verbs of being
    "كان", "كانت", "كانوا", "يكون", "تكون", "اصبح", "أصبح", "صار", "مازال", "لايزال",
    // quantifiers and frequency
    "كل", "بعض", "غير", "جميع", "اكثر", "أكثر", "اقل", "أقل", "ايضا", "أيضا", "أيضًا",
    "فقط", "جدا", "جداً",
    // prepositional fusions
    "فيه", "فيها", "فيهم", "عليه", "عليها", "عليهم", "اليه", "إليه", "اليها", "إليها",
    "له", "لها", "لهم", "لنا", "لي", "لك", "منه", "منها", "منهم", "منا", "به", "بها",
    "بهم", "بي", "بك", "معه", "معها", "معهم", "معي", "عنه", "عنها", "عنهم",
    // adverbs of place and misc
    "هنا", "هناك", "هنالك", "الا", "إلا", "اما", "أما", "اذن", "إذن", "بدون", "مثل",
    "عندما", "حين", "حينما", "يا",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ARABIC_STOPWORDS.iter().copied().collect());

/// Returns true when `token` belongs to the fixed stopword set.
#[must_use]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}
