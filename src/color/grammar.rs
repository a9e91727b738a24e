//! Recursive-descent grammar over color tokens
//!
//! ```text
//! color    := hex | rgb | rgba
//! hex      := '#' (3 | 6 | 8 hex digits)
//! rgb      := 'rgb'  '(' channel ',' channel ',' channel ')'
//! rgba     := 'rgba' '(' channel ',' channel ',' channel ',' alpha ')'
//! channel  := integer in 0..=255
//! alpha    := decimal in [0, 1]
//! ```

use crate::error::ColorError;

use super::lexer::{lex, Token};
use super::Color;

/// Parse a color string into a [`Color`]
///
/// Whitespace anywhere in the input is ignored and hex digits are
/// case-insensitive.
pub fn parse_color(input: &str) -> Result<Color, ColorError> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.is_empty() {
        return Err(ColorError::Empty);
    }

    let tokens: Vec<Token> = lex(&cleaned)?.into_iter().map(|(t, _)| t).collect();
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
    };
    let color = parser.color()?;
    parser.end()?;
    Ok(color)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn found(tok: Option<&Token>) -> String {
        tok.map(Token::describe)
            .unwrap_or_else(|| "end of input".to_string())
    }

    fn expect(&mut self, expected: Token, label: &'static str) -> Result<(), ColorError> {
        match self.next() {
            Some(tok) if *tok == expected => Ok(()),
            other => Err(ColorError::expected(label, Self::found(other))),
        }
    }

    fn number(&mut self, label: &'static str) -> Result<String, ColorError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n.clone()),
            other => Err(ColorError::expected(label, Self::found(other))),
        }
    }

    fn color(&mut self) -> Result<Color, ColorError> {
        match self.next() {
            Some(Token::Hex(digits)) => hex_color(digits),
            Some(Token::Rgb) => {
                let (r, g, b) = self.channels()?;
                self.expect(Token::ParenClose, "')'")?;
                Ok(Color::rgb(r, g, b))
            }
            Some(Token::Rgba) => {
                let (r, g, b) = self.channels()?;
                self.expect(Token::Comma, "','")?;
                let a = alpha(&self.number("alpha")?)?;
                self.expect(Token::ParenClose, "')'")?;
                Ok(Color::rgba(r, g, b, a))
            }
            Some(other) => Err(ColorError::UnknownNotation {
                found: other.describe(),
            }),
            None => Err(ColorError::Empty),
        }
    }

    /// `'(' channel ',' channel ',' channel`
    fn channels(&mut self) -> Result<(u8, u8, u8), ColorError> {
        self.expect(Token::ParenOpen, "'('")?;
        let r = channel(&self.number("red channel")?)?;
        self.expect(Token::Comma, "','")?;
        let g = channel(&self.number("green channel")?)?;
        self.expect(Token::Comma, "','")?;
        let b = channel(&self.number("blue channel")?)?;
        Ok((r, g, b))
    }

    fn end(&mut self) -> Result<(), ColorError> {
        match self.next() {
            None => Ok(()),
            Some(tok) => Err(ColorError::Trailing {
                found: tok.describe(),
            }),
        }
    }
}

fn hex_color(digits: &str) -> Result<Color, ColorError> {
    let nibbles: Vec<u8> = digits
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    let byte = |i: usize| (nibbles[i] << 4) | nibbles[i + 1];

    match nibbles.len() {
        3 => Ok(Color::rgb(
            nibbles[0] * 0x11,
            nibbles[1] * 0x11,
            nibbles[2] * 0x11,
        )),
        6 => Ok(Color::rgb(byte(0), byte(2), byte(4))),
        8 => Ok(Color::rgba(byte(0), byte(2), byte(4), byte(6))),
        digits => Err(ColorError::HexLength { digits }),
    }
}

fn channel(value: &str) -> Result<u8, ColorError> {
    value.parse::<u8>().map_err(|_| ColorError::Channel {
        value: value.to_string(),
    })
}

fn alpha(value: &str) -> Result<u8, ColorError> {
    match value.parse::<f64>() {
        Ok(a) if (0.0..=1.0).contains(&a) => Ok((a * 255.0).round() as u8),
        _ => Err(ColorError::Alpha {
            value: value.to_string(),
        }),
    }
}
