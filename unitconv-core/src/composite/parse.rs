//! Recursive-descent parser for composite base expressions.
//!
//! ```text
//! expr   := term (('*' | '/') term)*
//! term   := factor ('^' ['-'] integer)?
//! factor := identifier | '(' expr ')'
//! ```
//!
//! Identifiers name leaf categories and stand for their highest-precision unit.

use crate::error::{GenerationError, GenerationResult};
use crate::operation::Operation;
use crate::units;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Integer(i64),
    Star,
    Slash,
    Caret,
    Minus,
    LParen,
    RParen,
}

struct Parser<'src> {
    input: &'src str,
    tokens: Vec<(usize, Token)>,
    pos: usize,
}

pub(super) fn parse_base(input: &str) -> GenerationResult<Operation> {
    let mut parser = Parser {
        input,
        tokens: tokenize(input)?,
        pos: 0,
    };
    let op = parser.expr()?;
    match parser.peek() {
        None => Ok(op),
        Some(token) => Err(parser.error(format!("unexpected {token:?} after expression"))),
    }
}

fn tokenize(input: &str) -> GenerationResult<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '-' => Token::Minus,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() => {
                let mut end = start;
                while let Some(&(index, c)) = chars.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    end = index + c.len_utf8();
                    chars.next();
                }
                let value = input[start..end].parse().map_err(|_| GenerationError::Parse {
                    input: input.to_string(),
                    position: start,
                    message: "integer out of range".to_string(),
                })?;
                tokens.push((start, Token::Integer(value)));
                continue;
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(index, c)) = chars.peek() {
                    if !(c.is_alphanumeric() || c == '_') {
                        break;
                    }
                    end = index + c.len_utf8();
                    chars.next();
                }
                tokens.push((start, Token::Ident(input[start..end].to_string())));
                continue;
            }
            other => {
                return Err(GenerationError::Parse {
                    input: input.to_string(),
                    position: start,
                    message: format!("unexpected character `{other}`"),
                })
            }
        };
        tokens.push((start, token));
        chars.next();
    }

    Ok(tokens)
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, token)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.input.len(), |(position, _)| *position)
    }

    fn error(&self, message: String) -> GenerationError {
        GenerationError::Parse {
            input: self.input.to_string(),
            position: self.position(),
            message,
        }
    }

    fn expr(&mut self) -> GenerationResult<Operation> {
        let mut op = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    op = op * self.term()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    op = op / self.term()?;
                }
                _ => return Ok(op),
            }
        }
    }

    fn term(&mut self) -> GenerationResult<Operation> {
        let factor = self.factor()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(factor);
        }
        self.advance();
        let negative = self.peek() == Some(&Token::Minus);
        if negative {
            self.advance();
        }
        match self.peek() {
            Some(Token::Integer(power)) => {
                let power = if negative { -power } else { *power };
                self.advance();
                Ok(factor.pow(power))
            }
            _ => Err(self.error("expected an integer exponent".to_string())),
        }
    }

    fn factor(&mut self) -> GenerationResult<Operation> {
        let position = self.position();
        match self.advance() {
            Some(Token::Ident(name)) => units::leaf_representative(&name)
                .map(Operation::constant)
                .ok_or(GenerationError::UndefinedCategory(name)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner.grouped()),
                    _ => Err(self.error("expected `)`".to_string())),
                }
            }
            _ => Err(GenerationError::Parse {
                input: self.input.to_string(),
                position,
                message: "expected a category name or `(`".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{AngleUnits, DistanceUnits, MassUnits, TimeUnits};

    fn um() -> Operation {
        Operation::constant(DistanceUnits::Micrometres)
    }

    fn us() -> Operation {
        Operation::constant(TimeUnits::Microseconds)
    }

    #[test]
    fn parses_quotients_and_powers() {
        assert_eq!(parse_base("distance / time").unwrap(), um() / us());
        assert_eq!(parse_base("distance/time^2").unwrap(), um() / us().pow(2));
        assert_eq!(parse_base("time ^ -1").unwrap(), us().pow(-1));
        assert_eq!(
            parse_base("angle / time").unwrap(),
            Operation::constant(AngleUnits::Degrees) / us()
        );
    }

    #[test]
    fn left_associative_with_grouping() {
        let ug = Operation::constant(MassUnits::Micrograms);
        assert_eq!(parse_base("mass * distance / time ^ 2").unwrap(), ug.clone() * um() / us().pow(2));
        let grouped = parse_base("mass / (distance * time)").unwrap();
        assert_eq!(grouped, ug / (um() * us()));
        assert_eq!(grouped.abbreviation(), "ug_per_um_us");
    }

    #[test]
    fn unknown_categories_are_reported() {
        assert_eq!(
            parse_base("distance / fortnights"),
            Err(GenerationError::UndefinedCategory("fortnights".to_string()))
        );
    }

    #[test]
    fn syntax_errors_carry_a_position() {
        match parse_base("distance / ") {
            Err(GenerationError::Parse { position, .. }) => assert_eq!(position, 11),
            other => panic!("unexpected {other:?}"),
        }
        match parse_base("distance ^ time") {
            Err(GenerationError::Parse { position, message, .. }) => {
                assert_eq!(position, 11);
                assert!(message.contains("integer exponent"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse_base("(distance"), Err(GenerationError::Parse { .. })));
        assert!(matches!(parse_base("distance time"), Err(GenerationError::Parse { .. })));
        assert!(matches!(parse_base("distance + time"), Err(GenerationError::Parse { .. })));
    }
}
