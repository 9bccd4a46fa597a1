// Byte-level JSON tokenizer with offset tracking for diagnostics.
use crate::core::error::{Error, ErrorKind};

pub(crate) fn syntax_at(message: impl Into<String>, offset: usize) -> Error {
    Error::new(ErrorKind::Syntax)
        .with_message(message)
        .with_offset(offset as u64)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token<'a> {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Null,
    Bool(bool),
    Str(String),
    Num { literal: &'a str, integral: bool },
    Eof,
}

pub(crate) struct Scanner<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    token_start: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            input: text.as_bytes(),
            pos: 0,
            token_start: 0,
        }
    }

    /// Byte offset of the token most recently returned by `next_token`.
    pub(crate) fn token_start(&self) -> usize {
        self.token_start
    }

    pub(crate) fn next_token(&mut self) -> Result<Token<'a>, Error> {
        self.skip_whitespace();
        self.token_start = self.pos;
        let Some(byte) = self.peek() else {
            return Ok(Token::Eof);
        };
        match byte {
            b'{' => {
                self.pos += 1;
                Ok(Token::LeftBrace)
            }
            b'}' => {
                self.pos += 1;
                Ok(Token::RightBrace)
            }
            b'[' => {
                self.pos += 1;
                Ok(Token::LeftBracket)
            }
            b']' => {
                self.pos += 1;
                Ok(Token::RightBracket)
            }
            b':' => {
                self.pos += 1;
                Ok(Token::Colon)
            }
            b',' => {
                self.pos += 1;
                Ok(Token::Comma)
            }
            b'"' => Ok(Token::Str(self.read_string()?)),
            b'n' => self.read_keyword("null", Token::Null),
            b't' => self.read_keyword("true", Token::Bool(true)),
            b'f' => self.read_keyword("false", Token::Bool(false)),
            b'-' | b'0'..=b'9' => self.read_number(),
            _ => Err(syntax_at("unexpected character", self.pos)),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    // Keyword tails can abut multibyte text, so `end` is not always a char
    // boundary; the comparison stays on raw bytes.
    fn read_keyword(&mut self, keyword: &'static str, token: Token<'a>) -> Result<Token<'a>, Error> {
        let start = self.pos;
        let end = start + keyword.len();
        if self.input.len() >= end && &self.input[start..end] == keyword.as_bytes() {
            self.pos = end;
            Ok(token)
        } else {
            Err(syntax_at("invalid literal", start))
        }
    }

    // Reads the string open at `pos`. Unescaped spans are copied slice-wise;
    // the delimiters and `\` are ASCII, so every slice boundary is a char
    // boundary even inside multi-byte text.
    fn read_string(&mut self) -> Result<String, Error> {
        let open = self.pos;
        self.pos += 1;
        let mut out = String::new();
        let mut segment_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(syntax_at("unterminated string", open)),
                Some(b'"') => {
                    out.push_str(&self.text[segment_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[segment_start..self.pos]);
                    out.push(self.read_escape()?);
                    segment_start = self.pos;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(syntax_at("control character in string", self.pos));
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn read_escape(&mut self) -> Result<char, Error> {
        let escape_start = self.pos;
        self.pos += 1;
        let Some(code) = self.peek() else {
            return Err(syntax_at("unterminated string", escape_start));
        };
        self.pos += 1;
        let resolved = match code {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.read_unicode_escape(escape_start),
            _ => return Err(syntax_at("invalid escape sequence", escape_start)),
        };
        Ok(resolved)
    }

    // `\uXXXX`, positioned just past the `u`. High surrogates must be followed
    // by a `\uXXXX` low surrogate; the pair combines into one scalar value.
    fn read_unicode_escape(&mut self, escape_start: usize) -> Result<char, Error> {
        let high = self.read_hex4(escape_start)?;
        if (0xDC00..=0xDFFF).contains(&high) {
            return Err(syntax_at("unpaired surrogate escape", escape_start));
        }
        if (0xD800..=0xDBFF).contains(&high) {
            if self.peek() != Some(b'\\') || self.input.get(self.pos + 1) != Some(&b'u') {
                return Err(syntax_at("unpaired surrogate escape", escape_start));
            }
            self.pos += 2;
            let low = self.read_hex4(escape_start)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(syntax_at("unpaired surrogate escape", escape_start));
            }
            let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| syntax_at("invalid unicode escape", escape_start));
        }
        char::from_u32(high).ok_or_else(|| syntax_at("invalid unicode escape", escape_start))
    }

    fn read_hex4(&mut self, escape_start: usize) -> Result<u32, Error> {
        let mut code = 0u32;
        for _ in 0..4 {
            let Some(byte) = self.peek() else {
                return Err(syntax_at("unterminated string", escape_start));
            };
            let digit = match byte {
                b'0'..=b'9' => u32::from(byte - b'0'),
                b'a'..=b'f' => u32::from(byte - b'a' + 10),
                b'A'..=b'F' => u32::from(byte - b'A' + 10),
                _ => return Err(syntax_at("invalid unicode escape", escape_start)),
            };
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }

    // RFC 8259 number grammar. The token keeps the raw literal plus whether a
    // fraction or exponent was seen, so numeric widening happens at parse time.
    fn read_number(&mut self) -> Result<Token<'a>, Error> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(syntax_at("invalid number literal", start));
                }
            }
            Some(b'1'..=b'9') => {
                self.pos += 1;
                self.consume_digits();
            }
            _ => return Err(syntax_at("invalid number literal", start)),
        }
        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(syntax_at("invalid number literal", start));
            }
            self.consume_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(syntax_at("invalid number literal", start));
            }
            self.consume_digits();
        }
        Ok(Token::Num {
            literal: &self.text[start..self.pos],
            integral,
        })
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }
}
