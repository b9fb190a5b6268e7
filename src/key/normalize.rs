//! Directory-name slugs for object keys.
//!
//! `normalize("Tom's Café!")` -> `"toms-cafe"`. Only directory components go
//! through here; file names are kept as they are.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Characters dropped outright: `?`, `!`, straight/curly quotes and periods.
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[?!'\"\u{2018}\u{2019}\u{201C}\u{201D}.]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+&+-+").unwrap());
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Combining Diacritical Marks block.
#[inline]
fn is_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Slugify a relative directory path for use in an object key.
///
/// Steps, in order: NFKD decomposition, lowercase, drop diacritics, drop
/// `?!`, quotes and periods, whitespace runs -> `-`, `-&-` -> `+`, hyphen
/// runs -> `-`. Characters are removed before separators are collapsed so
/// the result is a fixed point: `normalize(normalize(s)) == normalize(s)`.
/// `/` passes through, so a whole relative path can be normalized at once.
pub fn normalize(input: &str) -> String {
    let decomposed: String = input.nfkd().collect::<String>().to_lowercase();
    let stripped: String = decomposed.nfkd().filter(|&c| !is_diacritic(c)).collect();

    let s = STRIP.replace_all(&stripped, "");
    let s = WHITESPACE.replace_all(&s, "-");
    let s = AMPERSAND.replace_all(&s, "+");
    HYPHENS.replace_all(&s, "-").into_owned()
}
