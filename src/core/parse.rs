// Recursive-descent parser over the token stream, bounded by a nesting depth.
use crate::core::error::Error;
use crate::core::scan::{Scanner, Token, syntax_at};
use crate::core::value::{JsonMap, JsonValue};

pub(crate) struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token<'a>,
    offset: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str, max_depth: usize) -> Result<Self, Error> {
        let mut scanner = Scanner::new(text);
        let current = scanner.next_token()?;
        let offset = scanner.token_start();
        Ok(Self {
            scanner,
            current,
            offset,
            depth: 0,
            max_depth,
        })
    }

    /// Parses exactly one JSON value and requires the input to end after it.
    pub(crate) fn parse_document(&mut self) -> Result<JsonValue, Error> {
        let value = self.parse_value()?;
        if self.current != Token::Eof {
            return Err(syntax_at("trailing characters after document", self.offset));
        }
        Ok(value)
    }

    fn advance(&mut self) -> Result<(), Error> {
        self.current = self.scanner.next_token()?;
        self.offset = self.scanner.token_start();
        Ok(())
    }

    fn parse_value(&mut self) -> Result<JsonValue, Error> {
        match std::mem::replace(&mut self.current, Token::Eof) {
            Token::LeftBrace => self.parse_object().map(JsonValue::Object),
            Token::LeftBracket => self.parse_array().map(JsonValue::Array),
            Token::Null => {
                self.advance()?;
                Ok(JsonValue::Null)
            }
            Token::Bool(value) => {
                self.advance()?;
                Ok(JsonValue::Bool(value))
            }
            Token::Str(value) => {
                self.advance()?;
                Ok(JsonValue::Str(value))
            }
            Token::Num { literal, integral } => {
                let value = number_value(literal, integral, self.offset)?;
                self.advance()?;
                Ok(value)
            }
            _ => Err(syntax_at("expected value", self.offset)),
        }
    }

    // Entered with the `{` as the consumed current token.
    fn parse_object(&mut self) -> Result<JsonMap, Error> {
        self.enter_nested()?;
        self.advance()?;
        let mut map = JsonMap::new();
        if self.current == Token::RightBrace {
            self.advance()?;
            self.leave_nested();
            return Ok(map);
        }
        loop {
            let key = match std::mem::replace(&mut self.current, Token::Eof) {
                Token::Str(key) => key,
                _ => return Err(syntax_at("expected object key", self.offset)),
            };
            self.advance()?;
            if self.current != Token::Colon {
                return Err(syntax_at("expected ':' after object key", self.offset));
            }
            self.advance()?;
            let value = self.parse_value()?;
            // Duplicate keys resolve to the last occurrence while the key
            // keeps its first-seen position.
            map.insert(key, value);
            match self.current {
                Token::Comma => self.advance()?,
                Token::RightBrace => {
                    self.advance()?;
                    self.leave_nested();
                    return Ok(map);
                }
                _ => return Err(syntax_at("expected ',' or '}' in object", self.offset)),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Vec<JsonValue>, Error> {
        self.enter_nested()?;
        self.advance()?;
        let mut items = Vec::new();
        if self.current == Token::RightBracket {
            self.advance()?;
            self.leave_nested();
            return Ok(items);
        }
        loop {
            items.push(self.parse_value()?);
            match self.current {
                Token::Comma => self.advance()?,
                Token::RightBracket => {
                    self.advance()?;
                    self.leave_nested();
                    return Ok(items);
                }
                _ => return Err(syntax_at("expected ',' or ']' in array", self.offset)),
            }
        }
    }

    fn enter_nested(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(syntax_at("nesting exceeds depth limit", self.offset));
        }
        Ok(())
    }

    fn leave_nested(&mut self) {
        self.depth -= 1;
    }
}

// Integral literals take `Int`; an i64 overflow falls back to `Float` while it
// stays finite, and infinite magnitudes are rejected outright.
fn number_value(literal: &str, integral: bool, offset: usize) -> Result<JsonValue, Error> {
    if integral {
        if let Ok(number) = literal.parse::<i64>() {
            return Ok(JsonValue::Int(number));
        }
    }
    let number: f64 = literal
        .parse()
        .map_err(|_| syntax_at("invalid number literal", offset))?;
    if number.is_finite() {
        Ok(JsonValue::Float(number))
    } else {
        Err(syntax_at("number out of range", offset))
    }
}
