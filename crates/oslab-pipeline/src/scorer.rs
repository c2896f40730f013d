//! Lexicon-based polarity scorer for short English posts.

/// Word polarities.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("clean", 0.37),
    ("cool", 0.35),
    ("easy", 0.43),
    ("effective", 0.6),
    ("excellent", 1.0),
    ("excited", 0.38),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("favorite", 0.5),
    ("fine", 0.42),
    ("free", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("improved", 0.4),
    ("innovative", 0.5),
    ("interesting", 0.5),
    ("like", 0.2),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("new", 0.14),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("popular", 0.6),
    ("powerful", 0.3),
    ("reliable", 0.5),
    ("safe", 0.5),
    ("secure", 0.4),
    ("simple", 0.2),
    ("smart", 0.21),
    ("strong", 0.43),
    ("success", 0.3),
    ("successful", 0.75),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("win", 0.8),
    ("wonderful", 1.0),
    ("wow", 0.1),
    // Negative
    ("abuse", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("attack", -0.4),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("breach", -0.5),
    ("broken", -0.4),
    ("bug", -0.3),
    ("compromised", -0.5),
    ("crash", -0.4),
    ("dangerous", -0.6),
    ("dead", -0.2),
    ("difficult", -0.5),
    ("disappointing", -0.6),
    ("dumb", -0.38),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.32),
    ("fake", -0.5),
    ("fraud", -0.6),
    ("hack", -0.3),
    ("hacked", -0.5),
    ("hard", -0.29),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("insecure", -0.5),
    ("leak", -0.4),
    ("leaked", -0.4),
    ("malicious", -0.6),
    ("malware", -0.5),
    ("poor", -0.4),
    ("problem", -0.3),
    ("risk", -0.3),
    ("sad", -0.5),
    ("scam", -0.7),
    ("slow", -0.3),
    ("stolen", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("threat", -0.4),
    ("ugly", -0.7),
    ("vulnerable", -0.4),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Words that scale the next sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.3),
    ("totally", 1.2),
    ("very", 1.3),
];

/// Words that flip and damp the next sentiment word.
const NEGATORS: &[&str] = &[
    "aren't", "arent", "can't", "cannot", "cant", "didn't", "didnt", "doesn't", "doesnt",
    "don't", "dont", "isn't", "isnt", "never", "no", "not", "wasn't", "wasnt", "won't", "wont",
];

const NEGATION_FACTOR: f64 = -0.5;

/// How many non-sentiment tokens a pending modifier survives.
const MODIFIER_REACH: usize = 2;

fn polarity_of(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(lex_word, _)| *lex_word == word)
        .map(|&(_, weight)| weight)
}

fn intensity_of(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, m)| m)
}

/// Score a text string using the lexicon.
///
/// Each sentiment word contributes its polarity, scaled by a preceding
/// intensifier and flipped by a preceding negator. The result is the mean
/// over matched words, clamped to `[-1.0, 1.0]`. Returns `0.0` for empty or
/// unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut total = 0.0_f64;
    let mut matched: u32 = 0;
    let mut negated = false;
    let mut boost = 1.0_f64;
    let mut reach = 0usize;

    for token in text.split_whitespace() {
        let word = token
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if word.is_empty() {
            continue;
        }

        if NEGATORS.contains(&word.as_str()) {
            negated = true;
            reach = MODIFIER_REACH;
            continue;
        }

        if let Some(m) = intensity_of(&word) {
            boost *= m;
            reach = MODIFIER_REACH;
            continue;
        }

        if let Some(weight) = polarity_of(&word) {
            let mut value = weight * boost;
            if negated {
                value *= NEGATION_FACTOR;
            }
            total += value;
            matched += 1;
            negated = false;
            boost = 1.0;
            reach = 0;
            continue;
        }

        if reach > 0 {
            reach -= 1;
            if reach == 0 {
                negated = false;
                boost = 1.0;
            }
        }
    }

    if matched == 0 {
        return 0.0;
    }

    let score = total / f64::from(matched);
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
