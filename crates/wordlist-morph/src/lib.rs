//! English number morphology: plural -> singular and singular -> plural.
//!
//! The engine follows the classic dictionary approach: check an
//! exception table first, then apply ordered suffix rules. Both
//! directions are idempotent — a word that is already in the requested
//! form (or that no rule recognises) comes back unchanged, so callers
//! can apply either function blindly.
//!
//! The [`Morphology`] trait is the seam: anything satisfying the two
//! function contracts is substitutable for [`EnglishMorph`].

use std::collections::{HashMap, HashSet};

/// Capability interface for number morphology.
pub trait Morphology: Send + Sync {
    /// Singular form of `word`; unchanged when nothing applies.
    fn singular(&self, word: &str) -> String;
    /// Plural form of `word`; unchanged when nothing applies.
    fn plural(&self, word: &str) -> String;
}

/// Irregular pairs, `(singular, plural)`.
const IRREGULAR: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("person", "people"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("goose", "geese"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("shoe", "shoes"),
    ("house", "houses"),
    ("hero", "heroes"),
    ("echo", "echoes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
];

/// Words identical in singular and plural.
const UNINFLECTED: &[&str] = &[
    "sheep",
    "fish",
    "deer",
    "moose",
    "swine",
    "bison",
    "salmon",
    "series",
    "species",
    "aircraft",
    "news",
    "information",
    "equipment",
    "money",
    "rice",
    "gas",
    "yes",
];

/// Suffix rules for singularisation, tried in order; first hit wins.
const SINGULAR_RULES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("xes", "x"),
    ("zes", "z"),
    ("ives", "ife"),
    ("ves", "f"),
    ("ses", "s"),
    ("ies", "y"),
    ("oes", "o"),
    ("s", ""),
];

/// Rule-table morphology for English nouns.
pub struct EnglishMorph {
    to_singular: HashMap<&'static str, &'static str>,
    to_plural: HashMap<&'static str, &'static str>,
    uninflected: HashSet<&'static str>,
}

impl Default for EnglishMorph {
    fn default() -> Self {
        let mut to_singular = HashMap::new();
        let mut to_plural = HashMap::new();
        for (singular, plural) in IRREGULAR {
            to_singular.insert(*plural, *singular);
            to_plural.insert(*singular, *plural);
        }
        Self {
            to_singular,
            to_plural,
            uninflected: UNINFLECTED.iter().copied().collect(),
        }
    }
}

impl Morphology for EnglishMorph {
    fn singular(&self, word: &str) -> String {
        if word.is_empty() || self.uninflected.contains(word) {
            return word.to_string();
        }
        if let Some(singular) = self.to_singular.get(word) {
            return (*singular).to_string();
        }
        if self.to_plural.contains_key(word) {
            // Already an irregular singular ("man", "ox").
            return word.to_string();
        }
        for (suffix, replacement) in SINGULAR_RULES {
            if let Some(candidate) = apply_rule(word, suffix, replacement) {
                return candidate;
            }
        }
        word.to_string()
    }

    fn plural(&self, word: &str) -> String {
        if word.is_empty() || self.uninflected.contains(word) {
            return word.to_string();
        }
        if let Some(plural) = self.to_plural.get(word) {
            return (*plural).to_string();
        }
        if self.to_singular.contains_key(word) {
            // Already an irregular plural ("men", "geese").
            return word.to_string();
        }
        if word.ends_with('s') && self.singular(word) != word {
            // Already a regular plural.
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix('y')
            && !stem.is_empty()
            && !ends_with_vowel(stem)
        {
            return format!("{stem}ies");
        }
        for suffix in ["ch", "sh", "ss", "x", "z", "s"] {
            if word.ends_with(suffix) {
                return format!("{word}es");
            }
        }
        format!("{word}s")
    }
}

fn apply_rule(word: &str, suffix: &str, replacement: &str) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if stem.is_empty() {
        return None;
    }
    match suffix {
        // "glass", "status", "basis" are not plurals of anything.
        "s" if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") => {
            return None;
        }
        // Keeps "ties"/"pies" on the bare-s path ("tie", not "ty").
        "ies" if word.len() <= 4 => return None,
        _ => {}
    }
    Some(format!("{stem}{replacement}"))
}

fn ends_with_vowel(stem: &str) -> bool {
    matches!(stem.chars().next_back(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}
