//! Character-class predicates shared by the field rules.
//!
//! These are plain functions over `&str` so every rule composes them the same
//! way. An empty string is vacuously "all digits" and "all letters"; callers
//! check required-ness first.

/// `true` when every character is an ASCII digit.
pub fn is_all_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// `true` when every character is alphabetic.
pub fn is_all_letters(value: &str) -> bool {
    value.chars().all(char::is_alphabetic)
}

/// Word character as in `\w`: ASCII letter, digit or underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `true` when any space-separated token of `value` is not made of word
/// characters only.
///
/// Tokens are split on single spaces, so two consecutive spaces produce an
/// empty token and count as invalid.
pub fn contains_invalid_char(value: &str) -> bool {
    value
        .trim()
        .split(' ')
        .any(|word| word.is_empty() || !word.chars().all(is_word_char))
}

/// Length of `value` in characters.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
