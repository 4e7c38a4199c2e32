//! Template tokenization.
//!
//! Splits the raw template into alternating runs of whitespace and
//! non-whitespace characters. Re-concatenating the tokens in order
//! reproduces the input byte-for-byte, which is what lets the expander
//! substitute resolved content for individual tokens without disturbing
//! the surrounding text.

/// A contiguous run of either whitespace or non-whitespace characters,
/// tagged with its original position in the token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The run's text, exactly as it appeared in the template.
    pub text: String,
    /// Zero-based position in the token sequence.
    pub index: usize,
}

impl Token {
    /// Whether this token is a whitespace run.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Split a template into an ordered sequence of tokens.
///
/// Total over all inputs: the empty string yields an empty sequence and
/// no input can fail.
pub fn split(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_ws: Option<bool> = None;

    for ch in input.chars() {
        let ws = ch.is_whitespace();
        if current_ws != Some(ws) && !current.is_empty() {
            tokens.push(Token {
                text: std::mem::take(&mut current),
                index: tokens.len(),
            });
        }
        current_ws = Some(ws);
        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(Token {
            text: current,
            index: tokens.len(),
        });
    }

    tokens
}
