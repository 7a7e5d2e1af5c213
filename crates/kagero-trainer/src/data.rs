//! Data loading for tab-separated tagged sequences.
//!
//! One `symbol<TAB>state` pair per line; a blank line ends a sequence and
//! lines starting with `#` are comments.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use kagero_core::types::Token;
use tracing::warn;

/// A labelled sequence as read from disk.
pub type TaggedSequence = Vec<Token<String, String>>;

/// Parses tagged sequences from `reader`. Malformed lines are skipped with a
/// warning.
pub fn parse_tagged_sequences<R: BufRead>(reader: R) -> std::io::Result<Vec<TaggedSequence>> {
    let mut sequences = Vec::new();
    let mut current = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            if !current.is_empty() {
                sequences.push(std::mem::take(&mut current));
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        match line.split_once('\t') {
            Some((symbol, state)) if is_field(symbol) && is_field(state) => {
                current.push(Token::labelled(symbol.to_string(), state.to_string()));
            }
            _ => warn!(line = line_no + 1, content = line, "skipping malformed line"),
        }
    }

    // Last sequence may lack a trailing blank line
    if !current.is_empty() {
        sequences.push(current);
    }

    Ok(sequences)
}

fn is_field(s: &str) -> bool {
    !s.is_empty() && !s.contains('\t')
}

/// Loads tagged sequences from a file; see [`parse_tagged_sequences`].
pub fn load_tagged_sequences<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<TaggedSequence>> {
    let file = File::open(path)?;
    parse_tagged_sequences(BufReader::new(file))
}
