use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identifier or keyword. Keywords are matched case-insensitively.
    Ident(String),

    /// Single-quoted string, with `''` unescaped
    Str(String),

    /// Integer or decimal number, including a leading `-`
    Number(String),

    /// Hyphenated UUID
    Uuid(String),

    /// `0x` blob literal, without the prefix
    Blob(String),

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    SemiColon,
    Colon,
    Period,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
}

impl Token {
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Ident(ident) if ident.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(ident) => write!(f, "`{ident}`"),
            Token::Str(s) => write!(f, "'{s}'"),
            Token::Number(n) => f.write_str(n),
            Token::Uuid(uuid) => f.write_str(uuid),
            Token::Blob(hex) => write!(f, "0x{hex}"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::LBrace => f.write_str("`{`"),
            Token::RBrace => f.write_str("`}`"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::Comma => f.write_str("`,`"),
            Token::SemiColon => f.write_str("`;`"),
            Token::Colon => f.write_str("`:`"),
            Token::Period => f.write_str("`.`"),
            Token::Eq => f.write_str("`=`"),
            Token::Ne => f.write_str("`!=`"),
            Token::Lt => f.write_str("`<`"),
            Token::Le => f.write_str("`<=`"),
            Token::Gt => f.write_str("`>`"),
            Token::Ge => f.write_str("`>=`"),
            Token::Plus => f.write_str("`+`"),
            Token::Minus => f.write_str("`-`"),
            Token::Star => f.write_str("`*`"),
        }
    }
}
