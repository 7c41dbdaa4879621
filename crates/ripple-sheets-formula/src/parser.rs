//! Formula parser
//!
//! A recursive descent parser for the restricted formula grammar:
//! integer literals, cell references, addition, and parentheses. The
//! scanner recognizes the wider arithmetic operator set so that excluded
//! constructs can be rejected by name instead of as stray characters.

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use ripple_sheets_core::Address;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use ripple_sheets_formula::parse_formula;
///
/// let ast = parse_formula("2").unwrap();
/// let ast = parse_formula("A1+A2").unwrap();
/// let ast = parse_formula("(A1+2)+B3").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let formula = formula.trim();
    if formula.is_empty() {
        return Err(FormulaError::Parse("empty expression".into()));
    }

    let mut parser = FormulaParser::new(formula)?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if *parser.current_token() != Token::Eof {
        return Err(FormulaError::Parse(format!(
            "unexpected input after expression: {}",
            parser.current_token().describe()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// Integer literal
    Number(i64),
    /// Cell reference candidate (letters then digits) or stray name
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    // Delimiters
    LeftParen,
    RightParen,

    // End of input
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Identifier(name) => format!("'{name}'"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::LeftParen => "'('".into(),
            Token::RightParen => "')'".into(),
            Token::Eof => "end of input".into(),
        }
    }
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Option<Token>,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: None,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current_token = Some(self.scan_token()?);
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let c = self.peek_char().unwrap_or('\0');

        match c {
            '+' => {
                self.advance();
                return Ok(Token::Plus);
            }
            '-' => {
                self.advance();
                return Ok(Token::Minus);
            }
            '*' => {
                self.advance();
                return Ok(Token::Star);
            }
            '/' => {
                self.advance();
                return Ok(Token::Slash);
            }
            '(' => {
                self.advance();
                return Ok(Token::LeftParen);
            }
            ')' => {
                self.advance();
                return Ok(Token::RightParen);
            }
            _ => {}
        }

        if c.is_ascii_digit() {
            return self.scan_number();
        }

        if c.is_ascii_alphabetic() {
            return Ok(self.scan_identifier());
        }

        Err(FormulaError::Parse(format!("unexpected character '{c}'")))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        let num_str = &self.input[start..self.pos];
        let num: i64 = num_str
            .parse()
            .map_err(|_| FormulaError::Parse(format!("integer literal '{num_str}' is too large")))?;
        Ok(Token::Number(num))
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric())
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_token(&self) -> &Token {
        self.current_token.as_ref().unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = self.current_token.take().unwrap_or(Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    // === Expression parsing ===
    //
    // The full precedence ladder collapses to a single additive level:
    // the only binary operator the grammar admits is '+'. Excluded
    // operators are still scanned so they can be rejected by name.

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        let mut left = self.parse_primary()?;

        loop {
            match self.current_token() {
                Token::Plus => {
                    self.consume()?;
                    let right = self.parse_primary()?;
                    left = FormulaExpr::Add {
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                }
                Token::Minus => return Err(FormulaError::Unsupported("subtraction".into())),
                Token::Star => return Err(FormulaError::Unsupported("multiplication".into())),
                Token::Slash => return Err(FormulaError::Unsupported("division".into())),
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.consume()? {
            Token::Number(n) => Ok(FormulaExpr::Number(n)),
            Token::Identifier(name) => {
                if *self.current_token() == Token::LeftParen {
                    return Err(FormulaError::Unsupported(format!("function call '{name}'")));
                }
                let address = Address::parse(&name)?;
                Ok(FormulaExpr::CellRef(address))
            }
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                Ok(expr)
            }
            Token::Minus => Err(FormulaError::Unsupported("negation".into())),
            Token::Plus => Err(FormulaError::Unsupported("unary plus".into())),
            other => Err(FormulaError::Parse(format!(
                "expected a literal, reference, or '(', got {}",
                other.describe()
            ))),
        }
    }

    fn expect(&mut self, expected: Token) -> FormulaResult<()> {
        if *self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "expected {}, got {}",
                expected.describe(),
                self.current_token().describe()
            )))
        }
    }
}
