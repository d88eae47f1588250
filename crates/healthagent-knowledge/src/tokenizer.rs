//! Word tokenizer: ASCII letter runs with an optional `'suffix` (don't, it's).

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z]+(?:'[a-z]+)?").expect("static word pattern is valid")
});

/// Lowercased tokens in order of appearance, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Distinct lowercased tokens.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("Managing Anxiety"), vec!["managing", "anxiety"]);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(tokenize("I don't sleep"), vec!["i", "don't", "sleep"]);
        // suffix must be lowercase in the raw text to attach
        assert_eq!(tokenize("DON'T"), vec!["don", "t"]);
        assert_eq!(tokenize("rock'n'roll"), vec!["rock'n", "roll"]);
    }

    #[test]
    fn test_non_letters_split() {
        assert_eq!(tokenize("covid-19 vaccine2024"), vec!["covid", "vaccine"]);
        assert!(tokenize("123 !!! ...").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_split() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_token_set_dedupes() {
        let set = token_set("Sleep sleep SLEEP well");
        assert_eq!(set.len(), 2);
        assert!(set.contains("sleep"));
        assert!(set.contains("well"));
    }
}
