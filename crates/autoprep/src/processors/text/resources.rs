//! Read-only language resources shared by every text processor.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

use super::lemmatizer::Lemmatizer;

/// Standard English stopword list.
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static SHARED: Lazy<Arc<LanguageResources>> = Lazy::new(|| Arc::new(LanguageResources::english()));

/// Stopwords and lemmatizer for one language.
#[derive(Debug, Clone)]
pub struct LanguageResources {
    stopwords: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

static_assertions::assert_impl_all!(LanguageResources: Send, Sync);

impl LanguageResources {
    /// Build the English resources.
    pub fn english() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Handle to the process-wide English resources, built on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn stopword_count(&self) -> usize {
        self.stopwords.len()
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }
}
