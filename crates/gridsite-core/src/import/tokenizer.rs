//! Lenient line-oriented CSV tokenizer.
//!
//! Rules, applied per line:
//!
//! - input splits on `\n`; lines that are blank after trimming are skipped
//! - `"` toggles an in-quotes flag and is never copied into the field
//! - `,` ends a field only outside quotes
//! - every field is trimmed once its boundary is reached
//!
//! An unterminated quote is closed silently at the end of its line. Quotes
//! never span lines. The tokenizer knows nothing about headers.

/// Tokenize `text` into rows of trimmed fields.
///
/// The returned iterator is lazy and single-pass; call again for a fresh pass.
pub fn tokenize(text: &str) -> Tokenizer<'_> {
    Tokenizer {
        lines: text.split('\n'),
    }
}

/// Iterator over the non-blank rows of a CSV text.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    lines: std::str::Split<'a, char>,
}

impl Iterator for Tokenizer<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .by_ref()
            .find(|line| !line.trim().is_empty())
            .map(split_line)
    }
}

fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_owned());

    fields
}
