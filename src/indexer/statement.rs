//! Joins MATLAB statements continued over several physical lines.
//!
//! A line containing `...` continues on the next line. The marker and anything
//! after it on the same line (usually a comment) are dropped. `...` inside char
//! arrays is not special-cased.

/// Line continuation marker
pub const CONTINUATION: &str = "...";

/// One logical statement assembled from consecutive physical lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Fragments joined by single spaces
    pub text: String,
    /// Number of physical lines consumed after the first one
    pub end_idx: usize,
}

/// Returns the whole statement starting at `lines[0]`.
///
/// Returns `None` when the last available line still ends in a continuation,
/// i.e. the input runs out before the statement is complete.
pub fn join_statement<S: AsRef<str>>(lines: &[S]) -> Option<Statement> {
    let mut text = String::new();

    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match line.find(CONTINUATION) {
            Some(pos) => {
                text.push_str(&line[..pos]);
                text.push(' ');
            }
            None => {
                text.push_str(line);
                return Some(Statement { text, end_idx: idx });
            }
        }
    }

    None
}
