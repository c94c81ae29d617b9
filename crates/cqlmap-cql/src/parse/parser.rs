use super::{Lexer, Token};

use cqlmap_core::{bail, err, Result};

/// A recursive-descent parser over CQL tokens.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(src),
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.lexer.next()
    }

    /// Returns the next token, failing at end of input.
    pub fn expect_token(&mut self) -> Result<Token> {
        self.next_token()?
            .ok_or_else(|| err!("unexpected end of statement"))
    }

    pub fn peek(&mut self) -> Result<Option<&Token>> {
        self.lexer.peek_nth(0)
    }

    pub fn peek_nth(&mut self, n: usize) -> Result<Option<&Token>> {
        self.lexer.peek_nth(n)
    }

    pub fn is_next(&mut self, token: &Token) -> Result<bool> {
        Ok(self.peek()? == Some(token))
    }

    pub fn is_keyword(&mut self, keyword: &str) -> Result<bool> {
        self.is_nth_keyword(0, keyword)
    }

    pub fn is_nth_keyword(&mut self, n: usize, keyword: &str) -> Result<bool> {
        Ok(self
            .peek_nth(n)?
            .is_some_and(|token| token.is_keyword(keyword)))
    }

    /// Consumes `token` if it is next.
    pub fn take(&mut self, token: &Token) -> Result<bool> {
        if self.is_next(token)? {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes `keyword` if it is next.
    pub fn take_keyword(&mut self, keyword: &str) -> Result<bool> {
        if self.is_keyword(keyword)? {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn expect(&mut self, expected: &Token) -> Result<()> {
        match self.expect_token()? {
            token if token == *expected => Ok(()),
            token => bail!("expected {expected}, found {token}"),
        }
    }

    /// Consumes a sequence of keywords, such as `IF NOT EXISTS`.
    pub fn expect_keywords(&mut self, keywords: &[&str]) -> Result<()> {
        for keyword in keywords {
            match self.expect_token()? {
                token if token.is_keyword(keyword) => {}
                token => bail!("expected `{keyword}`, found {token}"),
            }
        }
        Ok(())
    }

    /// Consumes an optional keyword sequence. The sequence is only
    /// consumed when every keyword matches.
    pub fn take_keywords(&mut self, keywords: &[&str]) -> Result<bool> {
        for (n, keyword) in keywords.iter().enumerate() {
            if !self.is_nth_keyword(n, keyword)? {
                return Ok(false);
            }
        }

        for _ in keywords {
            self.next_token()?;
        }

        Ok(true)
    }

    pub fn ident(&mut self) -> Result<String> {
        match self.expect_token()? {
            Token::Ident(ident) => Ok(ident),
            token => bail!("expected identifier, found {token}"),
        }
    }

    pub fn number<T: std::str::FromStr>(&mut self) -> Result<T> {
        match self.expect_token()? {
            Token::Number(number) => number
                .parse()
                .map_err(|_| err!("invalid number `{number}`")),
            token => bail!("expected number, found {token}"),
        }
    }

    /// Parses `item (, item)*`.
    pub fn comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut ret = vec![item(self)?];

        while self.take(&Token::Comma)? {
            ret.push(item(self)?);
        }

        Ok(ret)
    }

    /// Parses `( item (, item)* )`. The list may be empty.
    pub fn parenthesized<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.expect(&Token::LParen)?;

        if self.take(&Token::RParen)? {
            return Ok(vec![]);
        }

        let ret = self.comma_separated(&mut item)?;
        self.expect(&Token::RParen)?;
        Ok(ret)
    }

    /// Consumes an optional trailing `;` and fails if input remains.
    pub fn finish(&mut self) -> Result<()> {
        self.take(&Token::SemiColon)?;

        match self.next_token()? {
            None => Ok(()),
            Some(token) => bail!("unexpected {token} after end of statement"),
        }
    }
}
