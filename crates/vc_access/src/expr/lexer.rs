use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use logos::Logos;

/// A token of the lambda syntax.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("|")]
    Pipe,
    #[token("=>")]
    FatArrow,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("::")]
    ColonColon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[token("as")]
    As,
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    Str(String),
    /// Unicode identifiers (XID), raw ones (`r#type`) without their prefix.
    #[regex(r"(r#)?[\p{XID_Start}_]\p{XID_Continue}*", ident)]
    Ident(String),
}

fn ident(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    String::from(slice.strip_prefix("r#").unwrap_or(slice))
}

/// Strips the quotes and resolves `\n`, `\t`, `\\`, `\"`.
fn unescape(quoted: &str) -> Option<String> {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        out.push(match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            c @ ('\\' | '"' | '\'') => c,
            _ => return None,
        });
    }
    Some(out)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::OrOr => "||",
            Self::AndAnd => "&&",
            Self::Pipe => "|",
            Self::FatArrow => "=>",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Bang => "!",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::ColonColon => "::",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::As => "as",
            Self::Bool(v) => return write!(f, "{v}"),
            Self::Int(v) => return write!(f, "{v}"),
            Self::Float(v) => return write!(f, "{v:?}"),
            Self::Str(v) => return write!(f, "{v:?}"),
            Self::Ident(v) => v,
        };
        f.write_str(text)
    }
}

/// Splits `source` into tokens with their byte ranges.
///
/// Returns the byte range of the first unrecognized input on failure.
pub(crate) fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, Range<usize>> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(span),
        })
        .collect()
}
