#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Derives the canonical identifier forms used by every emitted artifact.
//!
//! Input may be snake_case, kebab-case, camelCase, PascalCase or a mix. A new
//! word starts at an explicit `_`/`-`/space separator or where a lowercase
//! letter (or digit) is followed by an uppercase letter.

/// The three canonical spellings of one logical name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameForms {
    /// `unit_price`
    pub snake: String,
    /// `unitPrice`
    pub camel: String,
    /// `UnitPrice`
    pub pascal: String,
}

impl NameForms {
    /// Snake form with a plural suffix, used for table names and REST paths.
    pub fn plural_snake(&self) -> String {
        pluralize(&self.snake)
    }

    /// Pascal form with a plural suffix, used for list operation names.
    pub fn plural_pascal(&self) -> String {
        pluralize(&self.pascal)
    }
}

/// Converts an arbitrary-case identifier into its snake, camel and pascal forms.
///
/// Normalizing any casing of the same logical name yields the same triple, so
/// `unit_price`, `unit-price`, `unitPrice` and `UnitPrice` are interchangeable.
/// Empty input yields empty forms.
pub fn normalize(input: &str) -> NameForms {
    let segments = split_segments(input);

    let snake = segments.join("_");

    let mut camel = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            camel.push_str(segment);
        } else {
            camel.push_str(&capitalize(segment));
        }
    }

    let pascal = capitalize(&camel);

    NameForms {
        snake,
        camel,
        pascal,
    }
}

/// Splits an identifier into lower-cased word segments.
fn split_segments(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in input.trim().chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            flush(&mut current, &mut segments);
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            let lower_to_upper = c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit());
            let letter_to_digit = c.is_ascii_digit() && p.is_alphabetic();
            if lower_to_upper || letter_to_digit {
                flush(&mut current, &mut segments);
            }
        }

        current.extend(c.to_lowercase());
        prev = Some(c);
    }
    flush(&mut current, &mut segments);

    segments
}

fn flush(current: &mut String, segments: &mut Vec<String>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Appends an English plural suffix to the final word of an identifier.
///
/// `product` -> `products`, `category` -> `categories`, `box` -> `boxes`.
/// Words already ending in `s` are left untouched.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_lowercase();

    if lower.ends_with('s') && !lower.ends_with("ss") {
        return word.to_string();
    }

    if lower.ends_with('y') {
        let before_y = lower.chars().rev().nth(1);
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    if lower.ends_with("ss")
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{}es", word);
    }

    format!("{}s", word)
}

/// Reserved words of the generated host language.
///
/// A field whose camel form collides with one of these cannot be used as a
/// parameter or local variable name in emitted code.
pub const HOST_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns true if `ident` is a reserved word in the generated host language.
pub fn is_host_keyword(ident: &str) -> bool {
    HOST_KEYWORDS.contains(&ident)
}
