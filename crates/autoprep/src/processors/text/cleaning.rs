//! Free-text cleaning.

use super::numbers::digits_to_words;
use super::resources::LanguageResources;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Punct,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if c.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// A `.` or `,` between two digits, as in `3.5` or `1,000`.
fn joins_digits(text: &str, i: usize, c: char, prev: Option<char>) -> bool {
    matches!(c, '.' | ',')
        && prev.is_some_and(|p| p.is_ascii_digit())
        && text[i + c.len_utf8()..]
            .chars()
            .next()
            .is_some_and(|next| next.is_ascii_digit())
}

/// Split text into word runs and punctuation runs; whitespace separates.
///
/// Numbers with inner separators stay whole.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, CharClass)> = None;
    let mut prev = None;

    for (i, c) in text.char_indices() {
        let class = if joins_digits(text, i, c, prev) {
            CharClass::Word
        } else {
            char_class(c)
        };
        prev = Some(c);
        match start {
            Some((_, current)) if current == class => {}
            Some((from, _)) => {
                tokens.push(&text[from..i]);
                start = (class != CharClass::Space).then_some((i, class));
            }
            None => {
                start = (class != CharClass::Space).then_some((i, class));
            }
        }
    }
    if let Some((from, _)) = start {
        tokens.push(&text[from..]);
    }
    tokens
}

/// Clean one cell for vectorization.
///
/// Lowercases, spells out digit tokens, strips ASCII punctuation, drops
/// stopwords and lemmatizes what remains. The result is space-separated.
pub fn clean_text(text: &str, resources: &LanguageResources) -> String {
    let lowered = text.to_lowercase();

    let spelled: Vec<String> = tokenize(&lowered)
        .into_iter()
        .map(|token| digits_to_words(token).unwrap_or_else(|| token.to_string()))
        .collect();

    let stripped: String = spelled
        .join(" ")
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    stripped
        .split_whitespace()
        .filter(|word| !resources.is_stopword(word))
        .map(|word| resources.lemmatizer().lemmatize(word).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(text: &str) -> String {
        clean_text(text, &LanguageResources::english())
    }

    #[test]
    fn test_tokenize_splits_words_and_punctuation() {
        assert_eq!(tokenize("hello, world!"), vec!["hello", ",", "world", "!"]);
        assert_eq!(tokenize("don't"), vec!["don", "'", "t"]);
        assert_eq!(tokenize("  a  "), vec!["a"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_decimal_and_grouped_numbers() {
        assert_eq!(tokenize("3.5, 1,000."), vec!["3.5", ",", "1,000", "."]);
        assert_eq!(tokenize("a.b 3."), vec!["a", ".", "b", "3", "."]);
    }

    #[test]
    fn test_clean_lowercases_and_lemmatizes() {
        assert_eq!(clean("Apple Products"), "apple product");
    }

    #[test]
    fn test_clean_removes_stopwords_and_punctuation() {
        assert_eq!(clean("The cat, and the hat!"), "cat hat");
        assert_eq!(clean("I don't like it."), "like");
    }

    #[test]
    fn test_clean_spells_numbers() {
        assert_eq!(clean("3 apples"), "three apple");
        assert_eq!(clean("21 cats"), "twentyone cat");
        assert_eq!(clean("101"), "one hundred one");
    }

    #[test]
    fn test_clean_keeps_mixed_tokens() {
        assert_eq!(clean("3rd place"), "3rd place");
    }

    #[test]
    fn test_clean_decimal_is_not_spelled_out() {
        assert_eq!(clean("3.5 kg"), "35 kg");
        assert_eq!(clean("1,000 units"), "1000 unit");
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("the of and"), "");
    }
}
