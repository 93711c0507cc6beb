//! Formula syntax validation
//!
//! Formulas are stored as text and never evaluated. Writes still go through a
//! recursive descent check so malformed input is rejected the way a real
//! spreadsheet engine would reject it.
//!
//! Precedence (lowest to highest): comparison, concatenation, additive,
//! multiplicative, exponent, unary, range, primary.

use crate::error::{NativeError, Result};

/// Validate a formula and return its text without the leading '='
pub fn normalize(formula: &str) -> Result<String> {
    let body = formula.trim();
    let body = body.strip_prefix('=').unwrap_or(body).trim();
    if body.is_empty() {
        return Err(NativeError::InvalidFormula("empty formula".into()));
    }

    let mut parser = Validator::new(body);
    parser.expression()?;
    if parser.current != Token::Eof {
        return Err(NativeError::InvalidFormula(format!(
            "unexpected '{}'",
            &body[parser.token_start..]
        )));
    }
    Ok(body.to_string())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number,
    String,
    Literal,
    Identifier,
    CellRef,
    SheetRef,
    Operator,
    Compare,
    Percent,
    Colon,
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Invalid(char),
    Eof,
}

struct Validator<'a> {
    input: &'a str,
    pos: usize,
    token_start: usize,
    current: Token,
    sign: Option<char>,
}

impl<'a> Validator<'a> {
    fn new(input: &'a str) -> Self {
        let mut v = Self {
            input,
            pos: 0,
            token_start: 0,
            current: Token::Eof,
            sign: None,
        };
        v.advance_token();
        v
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.bump();
        }
        self.token_start = self.pos;
        self.sign = None;
        self.current = self.scan();
    }

    fn scan(&mut self) -> Token {
        let Some(c) = self.peek() else {
            return Token::Eof;
        };
        match c {
            '+' | '-' => {
                self.bump();
                self.sign = Some(c);
                return Token::Operator;
            }
            '*' | '/' | '^' | '&' => {
                self.bump();
                return Token::Operator;
            }
            '%' => {
                self.bump();
                return Token::Percent;
            }
            ':' => {
                self.bump();
                return Token::Colon;
            }
            ',' => {
                self.bump();
                return Token::Comma;
            }
            ';' => {
                self.bump();
                return Token::Semicolon;
            }
            '(' => {
                self.bump();
                return Token::LeftParen;
            }
            ')' => {
                self.bump();
                return Token::RightParen;
            }
            '{' => {
                self.bump();
                return Token::LeftBrace;
            }
            '}' => {
                self.bump();
                return Token::RightBrace;
            }
            '=' => {
                self.bump();
                return Token::Compare;
            }
            '<' => {
                self.bump();
                if matches!(self.peek(), Some('=') | Some('>')) {
                    self.bump();
                }
                return Token::Compare;
            }
            '>' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                }
                return Token::Compare;
            }
            '"' => return self.scan_string(),
            '\'' => return self.scan_quoted_sheet(),
            _ => {}
        }

        if c.is_ascii_digit() || c == '.' {
            return self.scan_number();
        }
        if c.is_alphabetic() || c == '_' || c == '$' || c == '#' {
            return self.scan_word();
        }

        self.bump();
        Token::Invalid(c)
    }

    fn scan_string(&mut self) -> Token {
        self.bump();
        loop {
            match self.peek() {
                None => return Token::Invalid('"'),
                Some('"') => {
                    self.bump();
                    if self.peek() == Some('"') {
                        self.bump();
                    } else {
                        return Token::String;
                    }
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn scan_quoted_sheet(&mut self) -> Token {
        self.bump();
        while let Some(c) = self.peek() {
            self.bump();
            if c == '\'' {
                return if self.peek() == Some('!') {
                    self.bump();
                    Token::SheetRef
                } else {
                    Token::Invalid('\'')
                };
            }
        }
        Token::Invalid('\'')
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_digit() || c == '.') {
            self.bump();
        }
        if self.peek().map_or(false, |c| c == 'e' || c == 'E') {
            self.bump();
            if self.peek().map_or(false, |c| c == '+' || c == '-') {
                self.bump();
            }
            while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        match self.input[start..self.pos].parse::<f64>() {
            Ok(_) => Token::Number,
            Err(_) => Token::Invalid('.'),
        }
    }

    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        if self.peek() == Some('#') {
            self.bump();
            while self
                .peek()
                .map_or(false, |c| c.is_ascii_alphanumeric() || matches!(c, '!' | '/' | '?'))
            {
                self.bump();
            }
            let text = &self.input[start..self.pos];
            return if ERROR_LITERALS.contains(&text.to_ascii_uppercase().as_str()) {
                Token::Literal
            } else {
                Token::Invalid('#')
            };
        }

        while self
            .peek()
            .map_or(false, |c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
        {
            self.bump();
        }
        let text = &self.input[start..self.pos];

        if self.peek() == Some('!') {
            self.bump();
            return Token::SheetRef;
        }
        if self.peek() == Some('(') {
            return Token::Identifier;
        }
        let upper = text.to_ascii_uppercase();
        if upper == "TRUE" || upper == "FALSE" {
            return Token::Literal;
        }
        if is_cell_reference(text) {
            return Token::CellRef;
        }
        Token::Identifier
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn unexpected(&self) -> NativeError {
        match &self.current {
            Token::Eof => NativeError::InvalidFormula("unexpected end of formula".into()),
            _ => NativeError::InvalidFormula(format!(
                "unexpected '{}'",
                &self.input[self.token_start..self.pos]
            )),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.current == expected {
            self.advance_token();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    // === Expression checks ===

    fn expression(&mut self) -> Result<()> {
        self.binary()?;
        while matches!(self.current, Token::Compare | Token::Operator) {
            self.advance_token();
            self.binary()?;
        }
        Ok(())
    }

    fn binary(&mut self) -> Result<()> {
        // Prefix signs
        while self.current == Token::Operator && self.sign.is_some() {
            self.advance_token();
        }
        self.range()?;
        while self.current == Token::Percent {
            self.advance_token();
        }
        Ok(())
    }

    fn range(&mut self) -> Result<()> {
        self.primary()?;
        if self.current == Token::Colon {
            self.advance_token();
            self.primary()?;
        }
        Ok(())
    }

    fn primary(&mut self) -> Result<()> {
        match self.current {
            Token::Number | Token::String | Token::Literal | Token::CellRef => {
                self.advance_token();
                Ok(())
            }
            Token::LeftParen => {
                self.advance_token();
                self.expression()?;
                self.expect(Token::RightParen)
            }
            Token::LeftBrace => self.array(),
            Token::SheetRef => {
                self.advance_token();
                match self.current {
                    Token::CellRef | Token::Identifier => {
                        self.advance_token();
                        Ok(())
                    }
                    _ => Err(self.unexpected()),
                }
            }
            Token::Identifier => {
                self.advance_token();
                if self.current == Token::LeftParen {
                    self.call_arguments()
                } else {
                    Ok(())
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    fn array(&mut self) -> Result<()> {
        self.expect(Token::LeftBrace)?;
        if self.current != Token::RightBrace {
            self.expression()?;
            while matches!(self.current, Token::Comma | Token::Semicolon) {
                self.advance_token();
                self.expression()?;
            }
        }
        self.expect(Token::RightBrace)
    }

    fn call_arguments(&mut self) -> Result<()> {
        self.expect(Token::LeftParen)?;
        if self.current != Token::RightParen {
            self.argument()?;
            while self.current == Token::Comma {
                self.advance_token();
                self.argument()?;
            }
        }
        self.expect(Token::RightParen)
    }

    fn argument(&mut self) -> Result<()> {
        // Empty arguments such as IF(A1,,2) are legal
        if matches!(self.current, Token::Comma | Token::RightParen) {
            return Ok(());
        }
        self.expression()
    }
}

const ERROR_LITERALS: [&str; 7] = [
    "#NULL!", "#DIV/0!", "#VALUE!", "#REF!", "#NAME?", "#NUM!", "#N/A",
];

fn is_cell_reference(text: &str) -> bool {
    let body = text.strip_prefix('$').unwrap_or(text);
    let letters = body.chars().take_while(char::is_ascii_alphabetic).count();
    if letters == 0 || letters > 3 {
        return false;
    }
    let rest = &body[letters..];
    let digits = rest.strip_prefix('$').unwrap_or(rest);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_valid_formulas() {
        for f in [
            "=1+2",
            "SUM(A1:A10)",
            "=IF(A1>0,\"Yes\",\"No\")",
            "=-A1%*2^3",
            "=Sheet2!B3+'My Sheet'!C4",
            "={1,2;3,4}",
            "=A1<>B1",
            "=IF(A1,,2)",
            "=#N/A",
            "=NOW()",
        ] {
            assert!(normalize(f).is_ok(), "{f} should be accepted");
        }
    }

    #[test]
    fn test_strips_leading_equals() {
        assert_eq!(normalize(" =A1*2 ").unwrap(), "A1*2");
    }

    #[test]
    fn test_invalid_formulas() {
        for f in ["", "=", "=1+", "=SUM(A1", "=(1))", "=\"open", "=A1 @ B1", "=#BOGUS!", "=1 2"] {
            assert!(
                matches!(normalize(f), Err(NativeError::InvalidFormula(_))),
                "{f:?} should be rejected"
            );
        }
    }
}
