//! Prompt cleaning — lossy token-reduction pass.
//!
//! Shrinks an expanded prompt before submission by stripping comments and
//! collapsing whitespace around punctuation. Intended for code-like
//! content; applied at most once, and only when explicitly requested.
//!
//! Rules run in a fixed order:
//! 1. strip `#` line comments,
//! 2. strip `"""` / `'''` block spans (including content),
//! 3. one trailing space around sentence punctuation,
//! 4. no space around brackets and parentheses,
//! 5. one space each side of operator characters,
//! 6. trim the whole result.

use regex::Regex;
use std::sync::LazyLock;

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[^\n]*").expect("valid regex"));
static BLOCK_COMMENT_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)""".*?""""#).expect("valid regex"));
static BLOCK_COMMENT_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)'''.*?'''").expect("valid regex"));
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([.,;:!?])\s*").expect("valid regex"));
static BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([\[\]{}()])\s*").expect("valid regex"));
static OPERATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([+\-*/%=<>])\s*").expect("valid regex"));

/// Apply the full cleaning pass to an expanded prompt.
pub fn clean(prompt: &str) -> String {
    let s = LINE_COMMENT.replace_all(prompt, "");
    let s = BLOCK_COMMENT_DOUBLE.replace_all(&s, "");
    let s = BLOCK_COMMENT_SINGLE.replace_all(&s, "");
    let s = PUNCTUATION.replace_all(&s, "$1 ");
    let s = BRACKETS.replace_all(&s, "$1");
    let s = OPERATORS.replace_all(&s, " $1 ");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_comments() {
        let out = clean("value  # trailing note\nnext");
        assert!(!out.contains("trailing note"));
        assert!(out.contains("value"));
        assert!(out.contains("next"));
    }

    #[test]
    fn strips_block_comments_across_lines() {
        let input = "keep\n\"\"\"dropped\nstill dropped\"\"\"\nalso keep";
        let out = clean(input);
        assert!(!out.contains("dropped"));
        assert!(out.contains("keep"));
        assert!(out.contains("also keep"));

        let single = clean("a '''gone\ngone too''' b");
        assert!(!single.contains("gone"));
    }

    #[test]
    fn punctuation_gets_one_trailing_space() {
        assert_eq!(clean("a ,b"), "a, b");
        assert_eq!(clean("x  ;  y"), "x; y");
    }

    #[test]
    fn brackets_lose_surrounding_whitespace() {
        assert_eq!(clean("f ( x )"), "f(x)");
        assert_eq!(clean("[ 1 ]"), "[1]");
    }

    #[test]
    fn operators_get_one_space_each_side() {
        assert_eq!(clean("a+b"), "a + b");
        assert_eq!(clean("a   <   b"), "a < b");
    }

    #[test]
    fn result_is_trimmed() {
        assert_eq!(clean("  text  "), "text");
    }

    #[test]
    fn idempotent_on_comment_free_input() {
        for input in [
            "plain words only",
            "call( a , b )+c",
            "x=1 ; y = [ 2 ]",
            "end of sentence . next",
        ] {
            let once = clean(input);
            let twice = clean(&once);
            assert_eq!(once, twice, "input: {input}");
        }
    }
}
