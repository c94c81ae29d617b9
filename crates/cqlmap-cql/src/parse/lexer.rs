use super::Token;

use cqlmap_core::{bail, Result};

use std::collections::VecDeque;

pub(crate) struct Lexer<'a> {
    src: &'a str,
    next: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            src,
            next: VecDeque::new(),
        }
    }

    pub(crate) fn next(&mut self) -> Result<Option<Token>> {
        self.lex_n(1)?;
        Ok(self.next.pop_front())
    }

    pub(crate) fn peek_nth(&mut self, n: usize) -> Result<Option<&Token>> {
        self.lex_n(n + 1)?;
        Ok(self.next.get(n))
    }

    fn lex_n(&mut self, n: usize) -> Result<()> {
        while self.next.len() < n {
            // First, skip whitespace
            self.skip_whitespace();

            let Some(ch) = self.try_next_char() else {
                return Ok(());
            };

            let token = match ch {
                ':' => Token::Colon,
                ';' => Token::SemiColon,
                ',' => Token::Comma,
                '.' => Token::Period,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '{' => Token::LBrace,
                '}' => Token::RBrace,
                '[' => Token::LBracket,
                ']' => Token::RBracket,
                '+' => Token::Plus,
                '*' => Token::Star,
                '=' => Token::Eq,
                '<' => match self.take_if(|ch| ch == '=') {
                    Some(_) => Token::Le,
                    None => Token::Lt,
                },
                '>' => match self.take_if(|ch| ch == '=') {
                    Some(_) => Token::Ge,
                    None => Token::Gt,
                },
                '!' => match self.take_if(|ch| ch == '=') {
                    Some(_) => Token::Ne,
                    None => bail!("unexpected character `!`"),
                },
                '-' => match self.peek_char() {
                    Some(next) if next.is_ascii_digit() => {
                        let mut number = String::from("-");
                        self.number(&mut number);
                        Token::Number(number)
                    }
                    _ => Token::Minus,
                },
                '\'' => Token::Str(self.string()?),
                ch if ch.is_ascii_hexdigit() && self.is_uuid_tail(ch) => {
                    let mut uuid = String::with_capacity(36);
                    uuid.push(ch);
                    uuid.push_str(&self.src[..35]);
                    self.consume(35);
                    Token::Uuid(uuid)
                }
                '0' if matches!(self.peek_char(), Some('x' | 'X')) => {
                    self.consume(1);

                    let mut hex = String::new();
                    while let Some(ch) = self.take_if(|ch| ch.is_ascii_hexdigit()) {
                        hex.push(ch);
                    }

                    Token::Blob(hex)
                }
                ch if ch.is_ascii_digit() => {
                    let mut number = String::new();
                    number.push(ch);
                    self.number(&mut number);
                    Token::Number(number)
                }
                ch if ch.is_alphabetic() || ch == '_' => {
                    let mut ident = String::new();
                    ident.push(ch);

                    while let Some(ch) = self.take_if(ident_ch) {
                        ident.push(ch);
                    }

                    Token::Ident(ident)
                }
                ch => bail!("unexpected character {ch:?}"),
            };

            self.next.push_back(token);
        }

        Ok(())
    }

    /// Reads the rest of a number: digits, a fraction and an exponent.
    fn number(&mut self, dst: &mut String) {
        while let Some(ch) = self.take_if(|ch| ch.is_ascii_digit()) {
            dst.push(ch);
        }

        if self.peek_char() == Some('.')
            && self.peek_char_n(1).is_some_and(|ch| ch.is_ascii_digit())
        {
            self.consume(1);
            dst.push('.');
            while let Some(ch) = self.take_if(|ch| ch.is_ascii_digit()) {
                dst.push(ch);
            }
        }

        if let Some(e) = self.take_if(|ch| ch == 'e' || ch == 'E') {
            dst.push(e);
            if let Some(sign) = self.take_if(|ch| ch == '-' || ch == '+') {
                dst.push(sign);
            }
            while let Some(ch) = self.take_if(|ch| ch.is_ascii_digit()) {
                dst.push(ch);
            }
        }
    }

    /// Reads a single-quoted string after its opening quote.
    fn string(&mut self) -> Result<String> {
        let mut s = String::new();

        loop {
            match self.try_next_char() {
                Some('\'') if self.peek_char() == Some('\'') => {
                    self.consume(1);
                    s.push('\'');
                }
                Some('\'') => return Ok(s),
                Some(ch) => s.push(ch),
                None => bail!("unterminated string literal"),
            }
        }
    }

    /// Whether `first` and the 35 characters after it form a hyphenated
    /// UUID (8-4-4-4-12).
    fn is_uuid_tail(&self, first: char) -> bool {
        let Some(tail) = self.src.get(..35) else {
            return false;
        };

        let hyphens = [8, 13, 18, 23];
        let shape = std::iter::once(first)
            .chain(tail.chars())
            .enumerate()
            .all(|(i, ch)| {
                if hyphens.contains(&i) {
                    ch == '-'
                } else {
                    ch.is_ascii_hexdigit()
                }
            });

        shape && !self.src[35..].starts_with(ident_ch)
    }

    fn try_next_char(&mut self) -> Option<char> {
        match self.src.chars().next() {
            Some(ch) => {
                self.consume(ch.len_utf8());
                Some(ch)
            }
            None => None,
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.peek_char_n(0)
    }

    fn peek_char_n(&mut self, n: usize) -> Option<char> {
        self.src.chars().nth(n)
    }

    fn take_if<P>(&mut self, predicate: P) -> Option<char>
    where
        P: FnOnce(char) -> bool,
    {
        match self.peek_char() {
            Some(ch) if predicate(ch) => {
                self.consume(ch.len_utf8());
                Some(ch)
            }
            _ => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                '/' if self.peek_char_n(1) == Some('*') => {
                    self.consume(2);
                    self.skip_block_comment();
                }
                '-' if self.peek_char_n(1) == Some('-') => self.skip_line_comment(),
                ch if ch.is_whitespace() => {
                    self.consume(ch.len_utf8());
                }
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                '*' => {
                    self.consume(1);

                    if self.peek_char() == Some('/') {
                        self.consume(1);
                        return;
                    }
                }
                _ => {
                    self.consume(ch.len_utf8());
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                '\n' => {
                    self.consume(1);
                    return;
                }
                _ => self.consume(ch.len_utf8()),
            }
        }
    }

    fn consume(&mut self, amount: usize) {
        let (_, src) = self.src.split_at(amount);
        self.src = src;
    }
}

fn ident_ch(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}
