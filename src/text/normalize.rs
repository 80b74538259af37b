// Arabic text normalizer.
//
// A fixed sequence of substitutions that turns arbitrary input into
// "cleaned text": Arabic-block characters separated by single spaces.
// The order matters. Foreign words go first so that Latin digits and
// punctuation glued to them disappear with the word; diacritics go before
// punctuation so the remaining character classes see bare letters.

use std::sync::LazyLock;

use regex_lite::Regex;
use unicode_normalization::char::is_combining_mark;

/// Arabic diacritical marks (tanween, harakat, shadda, sukun and friends).
static DIACRITICS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{064B}-\x{065F}]").expect("diacritics pattern is valid"));

/// Latin and Arabic punctuation, brackets and quotes.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[،؛؟٪٫٬٭۔.!:\-(){}\[\];"'~@#$%^&*_+]"#).expect("punctuation pattern is valid")
});

/// Western, Arabic-Indic and Eastern Arabic-Indic digits plus stray symbols.
static DIGITS_AND_SYMBOLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9\x{0660}-\x{0669}\x{06F0}-\x{06F9}%$#@!&^]")
        .expect("digits pattern is valid")
});

/// Run the full cleaning pipeline.
///
/// Total over any input: the result contains only characters in
/// U+0600..=U+06FF and single ASCII spaces, with no diacritics, digits or
/// punctuation, and no leading or trailing space. Applying it twice gives
/// the same result as applying it once.
pub fn normalize(raw: &str) -> String {
    let text = remove_foreign_words(raw);
    let text = DIACRITICS.replace_all(&text, "");
    let text = PUNCTUATION.replace_all(&text, "");
    let text = DIGITS_AND_SYMBOLS.replace_all(&text, "");
    let text = remove_stray_characters(&text);
    collapse_whitespace(&text)
}

/// Whether `ch` lies in the Arabic Unicode block.
pub fn is_arabic(ch: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&ch)
}

/// Replace each non-Arabic run bounded by word boundaries with a space.
///
/// Mirrors `\b[^؀-ۿ]+\b` with Unicode word boundaries: inside a
/// maximal run of non-Arabic characters the match starts at the first
/// boundary and, greedily, ends at the last one. A run with fewer than two
/// boundaries is left alone (for example a trailing full stop), and the
/// later stages take care of whatever it contains.
fn remove_foreign_words(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if is_arabic(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && !is_arabic(chars[i]) {
            i += 1;
        }
        let end = i;

        let boundaries: Vec<usize> = (start..=end)
            .filter(|&pos| is_word_boundary(&chars, pos))
            .collect();

        match (boundaries.first(), boundaries.last()) {
            (Some(&first), Some(&last)) if first < last => {
                out.extend(&chars[start..first]);
                out.push(' ');
                out.extend(&chars[last..end]);
            }
            _ => out.extend(&chars[start..end]),
        }
    }

    out
}

/// A boundary sits between a word character and a non-word character,
/// with the ends of the text counting as non-word.
fn is_word_boundary(chars: &[char], pos: usize) -> bool {
    let before = pos > 0 && is_word_char(chars[pos - 1]);
    let after = pos < chars.len() && is_word_char(chars[pos]);
    before != after
}

/// Word characters as a Unicode-aware `\w` sees them: letters, numbers
/// and underscore. Marks and enclosed letter symbols count as alphabetic
/// for `char`, but not as word characters.
fn is_word_char(ch: char) -> bool {
    ch == '_'
        || ch.is_numeric()
        || (ch.is_alphabetic() && !is_combining_mark(ch) && !is_enclosed_letter(ch))
}

/// Circled, parenthesized and squared Latin letters (symbols, not letters).
fn is_enclosed_letter(ch: char) -> bool {
    matches!(ch,
        '\u{24B6}'..='\u{24E9}'
        | '\u{1F130}'..='\u{1F149}'
        | '\u{1F150}'..='\u{1F169}'
        | '\u{1F170}'..='\u{1F189}'
    )
}

/// Drop anything outside the Arabic block that is not whitespace.
///
/// Catches what the fixed classes above do not list (guillemets, ellipses,
/// emoji, a foreign run with a single boundary) so the cleaned-text
/// invariant holds for every input.
fn remove_stray_characters(text: &str) -> String {
    text.chars()
        .filter(|&ch| is_arabic(ch) || ch.is_whitespace())
        .collect()
}

/// Collapse Unicode whitespace runs to one space and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
