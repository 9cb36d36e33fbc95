use std::borrow::Cow;
use std::iter::Map;
use std::str::SplitWhitespace;

pub type Tokens<'a> = Map<SplitWhitespace<'a>, fn(&str) -> Token<'_>>;

/// Split text into uppercased words.
///
/// Words are separated by runs of whitespace, so no token is ever empty.
/// The returned iterator is cheap to clone, and iterating the same input
/// again always yields the same tokens.
///
/// ```
/// use bayesfilter::tokenize;
///
/// let words: Vec<String> = tokenize("Free  money\tnow").map(|t| t.into_normalized()).collect();
/// assert_eq!(words, ["FREE", "MONEY", "NOW"]);
/// ```
pub fn tokenize(text: &str) -> Tokens<'_> {
    text.split_whitespace().map(normalize as fn(&str) -> Token<'_>)
}

fn normalize(word: &str) -> Token<'_> {
    Token::new(word)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub original: &'a str,
    pub normalized: Cow<'a, str>,
}

impl<'a> Token<'a> {
    pub fn new(original: &'a str) -> Self {
        let normalized = if is_uppercase_stable(original) {
            Cow::Borrowed(original)
        } else {
            Cow::Owned(original.to_uppercase())
        };

        Self {
            original,
            normalized,
        }
    }

    pub fn get_normalized(&self) -> &str {
        self.normalized.as_ref()
    }

    pub fn into_normalized(self) -> String {
        self.normalized.into_owned()
    }
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        self.get_normalized()
    }
}

// true when uppercasing would leave the string untouched
fn is_uppercase_stable(word: &str) -> bool {
    word.chars().all(|c| {
        let mut upper = c.to_uppercase();
        upper.next() == Some(c) && upper.next().is_none()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).map(Token::into_normalized).collect()
    }

    #[test]
    fn test_splits_on_whitespace_runs() {
        assert_eq!(words("  hello \n\t world  "), ["HELLO", "WORLD"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(words("").is_empty());
        assert!(words(" \t\r\n ").is_empty());
    }

    #[test]
    fn test_case_invariance() {
        assert_eq!(words("Free Money"), words("FREE MONEY"));
        assert_eq!(words("free money"), ["FREE", "MONEY"]);
    }

    #[test]
    fn test_punctuation_is_kept() {
        assert_eq!(words("Hello, world!"), ["HELLO,", "WORLD!"]);
    }

    #[test]
    fn test_stable_under_rejoining() {
        let first = words("Subject: re your meeting tomorrow");
        let second = words(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn test_restartable() {
        let tokens = tokenize("one two three");
        let again = tokens.clone();
        assert_eq!(tokens.count(), 3);
        assert_eq!(again.count(), 3);
    }

    #[test]
    fn test_borrows_uppercase_words() {
        let token = Token::new("MONEY");
        assert!(matches!(token.normalized, Cow::Borrowed(_)));

        let token = Token::new("straße");
        assert_eq!(token.get_normalized(), "STRASSE");
        assert!(matches!(token.normalized, Cow::Owned(_)));
    }
}
