//! Emphasis markup tokenizer.
//!
//! Paragraph text uses `**...**` to mark emphasized spans and literal line
//! breaks to separate sub-paragraphs. Tokenizing never fails: a `**` without
//! a partner is kept as literal text. Nesting is not supported: every `**`
//! pairs with the next one.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMPHASIS: Regex = Regex::new(r"\*\*(.+?)\*\*").expect("valid emphasis regex");
}

/// Contiguous text span sharing one emphasis style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Text with delimiters removed; surrounding whitespace is preserved
    pub text: String,
    /// Whether the run was wrapped in `**`
    pub emphasized: bool,
}

impl StyledRun {
    /// Create a run.
    pub fn new(text: impl Into<String>, emphasized: bool) -> Self {
        Self {
            text: text.into(),
            emphasized,
        }
    }
}

/// A token of a markup line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// Text outside any emphasis span
    Plain(String),
    /// Text of a `**...**` span, delimiters stripped
    Emphasis(String),
}

impl From<MarkupToken> for StyledRun {
    fn from(token: MarkupToken) -> Self {
        match token {
            MarkupToken::Plain(text) => StyledRun::new(text, false),
            MarkupToken::Emphasis(text) => StyledRun::new(text, true),
        }
    }
}

/// One sub-paragraph of a paragraph's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Runs of one sub-paragraph
    Text(Vec<StyledRun>),
    /// An empty sub-paragraph: advances by the small line height, draws nothing
    Blank,
}

/// Split a single line of markup into plain and emphasis tokens.
pub fn tokenize(line: &str) -> Vec<MarkupToken> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            tokens.push(MarkupToken::Plain(line[last..whole.start()].to_string()));
        }
        tokens.push(MarkupToken::Emphasis(inner.as_str().to_string()));
        last = whole.end();
    }
    if last < line.len() {
        tokens.push(MarkupToken::Plain(line[last..].to_string()));
    }

    tokens
}

/// Tokenize a single line straight into styled runs.
pub fn runs(line: &str) -> Vec<StyledRun> {
    tokenize(line).into_iter().map(StyledRun::from).collect()
}

/// Split paragraph text on line breaks and tokenize every sub-paragraph.
///
/// Whitespace-only sub-paragraphs become [`Block::Blank`].
pub fn split_blocks(text: &str) -> Vec<Block> {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                Block::Blank
            } else {
                Block::Text(runs(line))
            }
        })
        .collect()
}

/// Text with all emphasis markers removed.
pub fn plain_text(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .map(|token| match token {
            MarkupToken::Plain(t) | MarkupToken::Emphasis(t) => t,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_in_the_middle() {
        assert_eq!(
            runs("Hola **mundo** feliz"),
            vec![
                StyledRun::new("Hola ", false),
                StyledRun::new("mundo", true),
                StyledRun::new(" feliz", false),
            ]
        );
    }

    #[test]
    fn test_tokens_are_tagged() {
        assert_eq!(
            tokenize("**EL PROVEEDOR** acepta"),
            vec![
                MarkupToken::Emphasis("EL PROVEEDOR".to_string()),
                MarkupToken::Plain(" acepta".to_string()),
            ]
        );
    }

    #[test]
    fn test_non_greedy_pairs() {
        let result = runs("**a** y **b**");
        assert_eq!(
            result,
            vec![
                StyledRun::new("a", true),
                StyledRun::new(" y ", false),
                StyledRun::new("b", true),
            ]
        );
    }

    #[test]
    fn test_unmatched_marker_is_literal() {
        assert_eq!(runs("precio **sin cierre"), vec![StyledRun::new("precio **sin cierre", false)]);
        assert_eq!(runs("****"), vec![StyledRun::new("****", false)]);
    }

    #[test]
    fn test_empty_line_has_no_runs() {
        assert!(runs("").is_empty());
    }

    #[test]
    fn test_split_blocks_marks_blank_lines() {
        let blocks = split_blocks("Primero\n\n  \n**Segundo**");
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0], Block::Text(vec![StyledRun::new("Primero", false)]));
        assert_eq!(blocks[1], Block::Blank);
        assert_eq!(blocks[2], Block::Blank);
        assert_eq!(blocks[3], Block::Text(vec![StyledRun::new("Segundo", true)]));
    }

    #[test]
    fn test_plain_text_strips_markers() {
        assert_eq!(plain_text("Hola **mundo** feliz"), "Hola mundo feliz");
    }
}
