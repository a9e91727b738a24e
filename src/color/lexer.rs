//! Lexer for color notations using logos

use logos::Logos;

use crate::error::{ColorError, Span};

/// Color tokens. Input is lowercased before lexing, so the keywords only
/// need their lowercase spelling.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // Functional notations (longest match wins, so `rgba` never lexes as `rgb` + `a`)
    #[token("rgba")]
    Rgba,
    #[token("rgb")]
    Rgb,

    // Delimiters
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,

    /// Hex digits following `#`, without the `#`
    #[regex(r"#[0-9a-f]*", |lex| lex.slice()[1..].to_string())]
    Hex(String),

    /// Numeric literal kept as text so the grammar can tell `1` from `1.0`
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Any other word, e.g. `hsl` or `red`
    #[regex(r"[a-z_][a-z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),
}

impl Token {
    /// Human-readable form for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Rgba => "'rgba'".to_string(),
            Token::Rgb => "'rgb'".to_string(),
            Token::ParenOpen => "'('".to_string(),
            Token::ParenClose => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Hex(digits) => format!("'#{}'", digits),
            Token::Number(n) => format!("number {}", n),
            Token::Word(w) => format!("'{}'", w),
        }
    }
}

/// Lex a lowercased color string into tokens with spans
///
/// Unlike a tolerant source lexer, any unrecognized character is an error:
/// a color with stray characters is malformed.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, ColorError> {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(ColorError::UnexpectedCharacter { span }),
        })
        .collect()
}
