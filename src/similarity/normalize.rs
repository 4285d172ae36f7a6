//! Comparison forms of an attribute string.
//!
//! - [`normalize`] builds the comparison key: lower-case, punctuation removed,
//!   whitespace collapsed. Used to decide whether two strings are "the same".
//! - [`scoring_form`] keeps punctuation so that punctuation differences lower
//!   the similarity score. Spacing around parentheses is standardized.
//! - [`collapse_whitespace`] keeps both case and punctuation.

/// Characters treated as punctuation. A `.` between two digits is kept by
/// [`normalize`] so that decimals such as `1.5` survive.
pub const PUNCTUATION: &[char] = &[
    '-', '_', '.', ',', ';', ':', '\'', '"', '(', ')', '[', ']', '{', '}', '/', '\\', '!', '?',
];

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Comparison-only rendering of an attribute. Never shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedForm(String);

impl NormalizedForm {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key with every space removed, so `product name` matches `productname`.
    fn without_spaces(&self) -> String {
        self.as_str().chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Build the comparison key for `s`.
pub fn normalize(s: &str) -> NormalizedForm {
    let chars: Vec<char> = s.chars().collect();
    let mut kept = String::with_capacity(s.len());

    for (i, &c) in chars.iter().enumerate() {
        if is_punctuation(c) && !is_decimal_point(&chars, i) {
            continue;
        }
        kept.extend(c.to_lowercase());
    }

    NormalizedForm(collapse_whitespace(&kept))
}

/// True when `a` and `b` differ only in case, spacing or punctuation.
pub fn differs_only_in_formatting(a: &str, b: &str) -> bool {
    normalize(a).without_spaces() == normalize(b).without_spaces()
}

/// Lower-cased, whitespace-collapsed form with punctuation intact.
///
/// Parentheses get one space before `(` and none inside, so `Size(cm)` and
/// `Size ( cm )` both become `size (cm)`.
pub fn scoring_form(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len() + 4);
    let mut skip_space = false;

    for c in s.chars() {
        match c {
            '(' | ')' => {
                spaced.truncate(spaced.trim_end().len());
                if c == '(' {
                    spaced.push(' ');
                }
                spaced.push(c);
                if c == ')' {
                    spaced.push(' ');
                }
                skip_space = true;
            }
            c if c.is_whitespace() && skip_space => {}
            c => {
                skip_space = false;
                spaced.push(c);
            }
        }
    }

    collapse_whitespace(&spaced).to_lowercase()
}

/// Trim and replace every run of whitespace with a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Propose a canonical key: lower-case, alphanumeric runs joined by `_`.
pub fn suggested_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    let mut pending_sep = false;

    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }

    key
}

fn is_decimal_point(chars: &[char], i: usize) -> bool {
    chars[i] == '.'
        && i > 0
        && chars[i - 1].is_ascii_digit()
        && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}
