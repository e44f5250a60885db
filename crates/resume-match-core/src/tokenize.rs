//! Word tokenizer.
//!
//! Segments text on Unicode word boundaries (UAX #29) and then reshapes the
//! segments the way the Penn Treebank tokenizer does for English:
//!
//! - words joined by a single hyphen stay one token (`full-stack`);
//! - clitics are split off (`don't` → `do` `n't`, `team's` → `team` `'s`,
//!   `cannot` → `can` `not`);
//! - each punctuation mark becomes its own token, including the colon and
//!   middle dot that UAX #29 keeps inside words (`skills:python`);
//! - `/` separates words (`ci/cd` → `ci` `/` `cd`);
//! - whitespace is dropped.
//!
//! Case is preserved. The normalizer lowercases before calling in.

use unicode_segmentation::UnicodeSegmentation;

/// Whole words the Treebank tokenizer splits at a fixed offset.
const SPLIT_WORDS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// UAX #29 MidLetter characters. They join letters into one word segment,
/// but in resumes they separate words.
const WORD_SEPARATORS: &[char] = &[
    ':', '\u{00B7}', '\u{0387}', '\u{05F4}', '\u{2027}', '\u{FE13}', '\u{FE55}', '\u{FF1A}',
];

/// Clitics that follow an apostrophe (`'s`, `'ll`, ...). `n't` is handled apart.
const APOSTROPHE_CLITICS: &[&str] = &["s", "m", "d", "ll", "re", "ve"];

/// Split `text` into word and punctuation tokens.
///
/// ```rust
/// use resume_match_core::tokenize::word_tokenize;
///
/// assert_eq!(
///     word_tokenize("I don't use full-stack tools."),
///     vec!["I", "do", "n't", "use", "full-stack", "tools", "."]
/// );
/// ```
pub fn word_tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut joining = false;
    let mut segments = text
        .split_word_bounds()
        .flat_map(split_separators)
        .peekable();

    while let Some(seg) = segments.next() {
        if is_wordlike(seg) {
            if !joining {
                flush_word(&mut current, &mut tokens);
            }
            current.push_str(seg);
            joining = false;
        } else if seg == "-"
            && !current.is_empty()
            && !joining
            && segments.peek().is_some_and(|next| is_wordlike(next))
        {
            current.push('-');
            joining = true;
        } else {
            flush_word(&mut current, &mut tokens);
            joining = false;
            if !seg.trim().is_empty() {
                tokens.push(seg.to_string());
            }
        }
    }
    flush_word(&mut current, &mut tokens);

    tokens
}

/// Break a segment at each [`WORD_SEPARATORS`] char, keeping the char.
fn split_separators(segment: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in segment.char_indices() {
        if WORD_SEPARATORS.contains(&c) {
            if start < i {
                pieces.push(&segment[start..i]);
            }
            pieces.push(&segment[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
    }
    if start < segment.len() {
        pieces.push(&segment[start..]);
    }
    pieces
}

fn is_wordlike(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

fn flush_word(current: &mut String, tokens: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    match clitic_split(current) {
        Some(at) => {
            tokens.push(current[..at].to_string());
            tokens.push(current[at..].to_string());
        }
        None => tokens.push(current.clone()),
    }
    current.clear();
}

/// Byte offset where a trailing clitic starts, if the word has one.
fn clitic_split(word: &str) -> Option<usize> {
    for (whole, at) in SPLIT_WORDS {
        if word.eq_ignore_ascii_case(whole) {
            return Some(*at);
        }
    }

    let (apos_at, apos) = word.char_indices().rev().find(|(_, c)| is_apostrophe(*c))?;
    let suffix = word[apos_at + apos.len_utf8()..].to_lowercase();

    let start = if suffix == "t" {
        // n't
        let (n_at, n) = word[..apos_at].char_indices().next_back()?;
        if !n.eq_ignore_ascii_case(&'n') {
            return None;
        }
        n_at
    } else if APOSTROPHE_CLITICS.contains(&suffix.as_str()) {
        apos_at
    } else {
        return None;
    };

    (start > 0).then_some(start)
}
