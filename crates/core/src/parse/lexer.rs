use super::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Comma,
}

impl TokenKind {
    fn from_single_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' => Self::Star,
            '/' => Self::Slash,
            '^' => Self::Caret,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            ',' => Self::Comma,
            _ => return None,
        })
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub kind: TokenKind,
    pub index: usize,
}

/// Splits the whole input into tokens before any parsing happens.
pub(super) fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        let c = bytes[index] as char;

        if c.is_ascii_whitespace() {
            index += 1;
            continue;
        }

        if let Some(kind) = TokenKind::from_single_char(c) {
            tokens.push(Token { kind, index });
            index += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let end = scan_number(bytes, index);
            let text = &input[index..end];
            if text == "." {
                return Err(ParseError::new(index, ParseErrorKind::UnexpectedCharacter('.')));
            }
            let value = text.parse::<f64>().map_err(|_| {
                ParseError::new(index, ParseErrorKind::InvalidNumber(text.to_string()))
            })?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                index,
            });
            index = end;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let end = index
                + bytes[index..]
                    .iter()
                    .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                    .count();
            tokens.push(Token {
                kind: TokenKind::Ident(input[index..end].to_string()),
                index,
            });
            index = end;
            continue;
        }

        // Report the full character, not just its first byte.
        let unexpected = input[index..].chars().next().unwrap_or(c);
        return Err(ParseError::new(
            index,
            ParseErrorKind::UnexpectedCharacter(unexpected),
        ));
    }

    Ok(tokens)
}

/// Returns whether `name` reads back as a single symbol token.
///
/// `true` and `false` lex as identifiers but parse as boolean literals, so
/// they are not symbols.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !matches!(name, "true" | "false")
}

/// Returns the end offset of the number starting at `start`.
///
/// Accepts `12`, `1.5`, `.5`, `1.`, and an exponent (`1e-3`, `2.5E+4`) only
/// when at least one exponent digit follows.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits = |from: usize| {
        from + bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = digits(start);
    if bytes.get(end) == Some(&b'.') {
        end = digits(end + 1);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            end = digits(exp);
        }
    }

    end
}
