//! Noun lemmatization for English words.
//!
//! Irregular plurals come from an exception table; regular plurals are
//! reduced with suffix rules. Words the rules cannot safely reduce are left
//! unchanged.

use std::borrow::Cow;
use std::collections::HashMap;

/// Irregular plurals and words that only look plural.
const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "people"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("oxen", "ox"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("bases", "basis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("leaves", "leaf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
    ("calves", "calf"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("pies", "pie"),
    ("ties", "tie"),
    ("lies", "lie"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("heroes", "hero"),
    ("echoes", "echo"),
    ("buses", "bus"),
    ("gases", "gas"),
    ("lenses", "lens"),
    ("statuses", "status"),
    ("viruses", "virus"),
    ("bonuses", "bonus"),
    ("campuses", "campus"),
    ("quizzes", "quiz"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
    ("physics", "physics"),
    ("mathematics", "mathematics"),
    ("economics", "economics"),
    ("always", "always"),
    ("perhaps", "perhaps"),
    ("sometimes", "sometimes"),
    ("towards", "towards"),
    ("afterwards", "afterwards"),
    ("whereas", "whereas"),
    ("besides", "besides"),
    ("bias", "bias"),
    ("atlas", "atlas"),
    ("canvas", "canvas"),
    ("lens", "lens"),
    ("yes", "yes"),
];

/// Regular plural suffixes that drop a trailing "es".
const ES_SUFFIXES: [&str; 5] = ["sses", "ches", "shes", "xes", "zzes"];

/// Reduces nouns to their dictionary base form.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            exceptions: NOUN_EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Lemmatize a lowercase word as a noun.
    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if let Some(base) = self.exceptions.get(word) {
            return Cow::Borrowed(*base);
        }

        if word.chars().count() <= 3
            || word.chars().any(|c| c.is_ascii_digit())
            || word.ends_with("ss")
            || word.ends_with("us")
            || word.ends_with("is")
            || !word.ends_with('s')
        {
            return Cow::Borrowed(word);
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return Cow::Owned(format!("{}y", stem));
            }
            return Cow::Borrowed(word);
        }

        if ES_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
            return Cow::Borrowed(&word[..word.len() - 2]);
        }

        Cow::Borrowed(&word[..word.len() - 1])
    }
}
