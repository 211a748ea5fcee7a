//! String collation strategies for sorting string columns.

use std::cmp::Ordering;
use std::fmt;

/// Compares two strings for display ordering.
///
/// Implementations must be a total order: the table sort relies on it.
pub trait Collator: Send + Sync + fmt::Debug {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Plain code point order. Deterministic and locale-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodepointCollator;

impl Collator for CodepointCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Cyrillic,
    Latin,
}

impl Script {
    fn of(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' | 'A'..='Z' | '\u{00C0}'..='\u{024F}' => Some(Self::Latin),
            '\u{0400}'..='\u{04FF}' => Some(Self::Cyrillic),
            _ => None,
        }
    }

    fn for_tag(tag: &str) -> Option<Self> {
        let language = tag.split(['-', '_']).next().unwrap_or(tag);
        match language.to_ascii_lowercase().as_str() {
            "ru" | "uk" | "be" | "bg" | "sr" => Some(Self::Cyrillic),
            "en" | "de" | "fr" | "es" | "it" | "pt" | "nl" => Some(Self::Latin),
            _ => None,
        }
    }
}

/// Locale-aware collation driven by an ordered locale list (`["ru", "en"]`).
///
/// Ordering, strongest level first:
/// 1. punctuation and spaces, then digits, then letters grouped by script in
///    the order the locales name them, then anything else;
/// 2. letters compared case-insensitively, `ё` as `е`;
/// 3. lowercase before uppercase;
/// 4. code point order as the final tie-break.
#[derive(Debug, Clone)]
pub struct LocaleCollator {
    scripts: Vec<Script>,
}

impl LocaleCollator {
    pub fn new<S: AsRef<str>>(locales: &[S]) -> Self {
        let mut scripts = Vec::new();
        for script in locales
            .iter()
            .filter_map(|tag| Script::for_tag(tag.as_ref()))
            .chain([Script::Latin, Script::Cyrillic])
        {
            if !scripts.contains(&script) {
                scripts.push(script);
            }
        }
        Self { scripts }
    }

    fn primary_key(&self, ch: char) -> (u8, char) {
        if ch.is_whitespace() || ch.is_ascii_punctuation() {
            return (0, ch);
        }
        if ch.is_numeric() {
            return (1, ch);
        }
        match Script::of(ch) {
            Some(script) => {
                let rank = self.scripts.iter().position(|s| *s == script).unwrap_or(0) as u8;
                (2 + rank, fold(ch))
            }
            None => (u8::MAX, ch),
        }
    }
}

impl Default for LocaleCollator {
    fn default() -> Self {
        Self::new(&["ru", "en"])
    }
}

impl Collator for LocaleCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = a
            .chars()
            .map(|c| self.primary_key(c))
            .cmp(b.chars().map(|c| self.primary_key(c)));

        primary
            .then_with(|| {
                a.chars()
                    .map(char::is_uppercase)
                    .cmp(b.chars().map(char::is_uppercase))
            })
            .then_with(|| a.cmp(b))
    }
}

fn fold(ch: char) -> char {
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    match lower {
        'ё' => 'е',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(collator: &dyn Collator, words: &[&str]) -> Vec<String> {
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        words.sort_by(|a, b| collator.compare(a, b));
        words
    }

    #[test]
    fn test_case_insensitive_with_lowercase_first() {
        let collator = LocaleCollator::new(&["en"]);
        assert_eq!(
            sorted(&collator, &["banana", "Apple", "apple", "Banana"]),
            vec!["apple", "Apple", "banana", "Banana"]
        );
    }

    #[test]
    fn test_script_order_follows_locales() {
        let ru_first = LocaleCollator::new(&["ru", "en"]);
        assert_eq!(
            sorted(&ru_first, &["Zebra", "яблоко", "apple", "Арбуз"]),
            vec!["Арбуз", "яблоко", "apple", "Zebra"]
        );

        let en_first = LocaleCollator::new(&["en", "ru"]);
        assert_eq!(
            sorted(&en_first, &["яблоко", "apple"]),
            vec!["apple", "яблоко"]
        );
    }

    #[test]
    fn test_digits_before_letters() {
        let collator = LocaleCollator::default();
        assert_eq!(sorted(&collator, &["b2", "10", "a"]), vec!["10", "a", "b2"]);
    }

    #[test]
    fn test_yo_sorts_with_ye() {
        let collator = LocaleCollator::default();
        assert_eq!(
            sorted(&collator, &["ель", "ёж", "еда"]),
            vec!["еда", "ёж", "ель"]
        );
    }

    #[test]
    fn test_equal_only_when_identical() {
        let collator = LocaleCollator::default();
        assert_eq!(collator.compare("Shoe", "Shoe"), Ordering::Equal);
        assert_ne!(collator.compare("shoe", "Shoe"), Ordering::Equal);
    }
}
