use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sort key approximating a locale collation: base letters first, then
/// accents, then case (lowercase before uppercase), then raw code points.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let decomposed: Vec<char> = text.nfd().collect();

        let primary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .flat_map(|c| c.to_lowercase())
            .collect();
        let secondary = decomposed.iter().flat_map(|c| c.to_lowercase()).collect();
        let tertiary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .map(|c| c.is_uppercase())
            .collect();

        CollationKey {
            primary,
            secondary,
            tertiary,
            raw: text.to_string(),
        }
    }
}

pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
