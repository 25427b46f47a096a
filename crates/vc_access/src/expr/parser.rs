//! Recursive descent parser for lambdas, with precedence climbing for
//! binary operators.
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `||`
//! 2. `&&`
//! 3. `==`, `!=`, `<`, `<=`, `>`, `>=`
//! 4. `+`, `-`
//! 5. `*`, `/`, `%`
//! 6. `as`
//! 7. Unary `-`, `!`
//! 8. Postfix: `.member`, `.method(args)`, `[index]`

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use super::lexer::{Token, tokenize};
use super::{BinaryOp, Expr, Lambda, Literal, UnaryOp};
use crate::InvalidPath;

/// Parses a lambda written as `|x| body` or `x => body`.
///
/// A parameter named `_` binds nothing: every name of the body is then a
/// [`Expr::Variable`].
///
/// # Examples
///
/// ```
/// use vc_access::expr::{Expr, parse_lambda};
///
/// let lambda = parse_lambda("|x| x.nested.text").unwrap();
/// assert_eq!(lambda.body(), &Expr::param("x").member("nested").member("text"));
///
/// let lambda = parse_lambda("o => (o.nested as Inner).id").unwrap();
/// assert_eq!(lambda.body(), &Expr::param("o").member("nested").cast("Inner").member("id"));
/// ```
pub fn parse_lambda(source: &str) -> Result<Lambda, InvalidPath> {
    let tokens = tokenize(source).map_err(|span| InvalidPath::Syntax {
        offset: span.start,
        message: format!("unrecognized input `{}`", &source[span]),
    })?;

    let mut stream = TokenStream::new(&tokens, source.len());
    let param = parse_head(&mut stream)?;
    let body = Parser { param: &param }.parse_expr(&mut stream, 0)?;

    if let Some(token) = stream.peek() {
        return Err(stream.error(format!("unexpected `{token}` after the lambda body")));
    }

    Ok(Lambda::new(param, body))
}

// -----------------------------------------------------------------------------
// TokenStream

/// Nesting limit for parentheses, unary operators, operands and type
/// arguments, keeping the recursion off the end of the stack.
const MAX_DEPTH: usize = 128;

struct TokenStream<'a> {
    tokens: &'a [(Token, Range<usize>)],
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'a> TokenStream<'a> {
    fn new(tokens: &'a [(Token, Range<usize>)], end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        }
    }

    fn descend(&mut self) -> Result<(), InvalidPath> {
        if self.depth == MAX_DEPTH {
            return Err(self.error(String::from("expression nested too deeply")));
        }
        self.depth += 1;
        Ok(())
    }

    #[inline]
    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Byte offset of the current token, or the source length at the end.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.end, |(_, span)| span.start)
    }

    fn error(&self, message: String) -> InvalidPath {
        InvalidPath::Syntax {
            offset: self.offset(),
            message,
        }
    }

    fn unexpected(&self, context: &str) -> InvalidPath {
        match self.peek() {
            Some(token) => self.error(format!("expected {context}, found `{token}`")),
            None => self.error(format!("expected {context}, found end of input")),
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), InvalidPath> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(&format!("`{expected}`")))
        }
    }

    fn expect_ident(&mut self, context: &str) -> Result<&'a str, InvalidPath> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(name.as_str())
            }
            _ => Err(self.unexpected(context)),
        }
    }
}

// -----------------------------------------------------------------------------
// Grammar

fn parse_head(stream: &mut TokenStream) -> Result<String, InvalidPath> {
    match (stream.peek(), stream.peek_nth(1)) {
        (Some(Token::Pipe), _) => {
            stream.advance();
            let param = stream.expect_ident("a parameter name")?;
            stream.expect(Token::Pipe)?;
            Ok(String::from(param))
        }
        (Some(Token::Ident(param)), Some(Token::FatArrow)) => {
            stream.pos += 2;
            Ok(param.clone())
        }
        _ => Err(stream.unexpected("a lambda `|x| ...` or `x => ...`")),
    }
}

fn binary_op_info(token: &Token) -> Option<(u8, BinaryOp)> {
    match token {
        Token::OrOr => Some((10, BinaryOp::Or)),
        Token::AndAnd => Some((20, BinaryOp::And)),
        Token::EqEq => Some((30, BinaryOp::Eq)),
        Token::NotEq => Some((30, BinaryOp::Ne)),
        Token::Lt => Some((30, BinaryOp::Lt)),
        Token::LtEq => Some((30, BinaryOp::Le)),
        Token::Gt => Some((30, BinaryOp::Gt)),
        Token::GtEq => Some((30, BinaryOp::Ge)),
        Token::Plus => Some((40, BinaryOp::Add)),
        Token::Minus => Some((40, BinaryOp::Sub)),
        Token::Star => Some((50, BinaryOp::Mul)),
        Token::Slash => Some((50, BinaryOp::Div)),
        Token::Percent => Some((50, BinaryOp::Rem)),
        _ => None,
    }
}

const CAST_PREC: u8 = 60;

struct Parser<'p> {
    param: &'p str,
}

impl Parser<'_> {
    fn parse_expr(&self, stream: &mut TokenStream, min_prec: u8) -> Result<Expr, InvalidPath> {
        stream.descend()?;
        let expr = self.parse_binary(stream, min_prec)?;
        stream.ascend();
        Ok(expr)
    }

    fn parse_binary(&self, stream: &mut TokenStream, min_prec: u8) -> Result<Expr, InvalidPath> {
        let mut left = self.parse_prefix(stream)?;

        while let Some(token) = stream.peek() {
            if *token == Token::As {
                if CAST_PREC < min_prec {
                    break;
                }
                stream.advance();
                let ty = parse_type(stream)?;
                left = left.cast(ty);
                continue;
            }

            let Some((prec, op)) = binary_op_info(token) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            stream.advance();
            // all binary operators are left associative
            let right = self.parse_expr(stream, prec + 1)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_prefix(&self, stream: &mut TokenStream) -> Result<Expr, InvalidPath> {
        let op = match stream.peek() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Bang) => UnaryOp::Not,
            _ => return self.parse_postfix(stream),
        };
        stream.advance();
        stream.descend()?;
        let operand = self.parse_prefix(stream)?;
        stream.ascend();
        Ok(Expr::unary(op, operand))
    }

    fn parse_postfix(&self, stream: &mut TokenStream) -> Result<Expr, InvalidPath> {
        let mut expr = self.parse_atom(stream)?;

        loop {
            match stream.peek() {
                Some(Token::Dot) => {
                    stream.advance();
                    let name = stream.expect_ident("a member name after `.`")?;
                    expr = if stream.peek() == Some(&Token::LParen) {
                        let args = self.parse_call_args(stream)?;
                        expr.method_call(name, args)
                    } else {
                        expr.member(name)
                    };
                }
                Some(Token::LBracket) => {
                    stream.advance();
                    let index = self.parse_expr(stream, 0)?;
                    stream.expect(Token::RBracket)?;
                    expr = expr.index(index);
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_atom(&self, stream: &mut TokenStream) -> Result<Expr, InvalidPath> {
        let expr = match stream.peek() {
            Some(Token::Int(v)) => Expr::constant(Literal::Int(*v)),
            Some(Token::Float(v)) => Expr::constant(Literal::Float(*v)),
            Some(Token::Str(v)) => Expr::constant(Literal::Str(v.clone())),
            Some(Token::Bool(v)) => Expr::constant(Literal::Bool(*v)),
            Some(Token::LParen) => {
                stream.advance();
                let inner = self.parse_expr(stream, 0)?;
                stream.expect(Token::RParen)?;
                return Ok(inner);
            }
            Some(Token::Ident(_)) => return self.parse_name(stream),
            _ => return Err(stream.unexpected("an expression")),
        };
        stream.advance();
        Ok(expr)
    }

    fn parse_name(&self, stream: &mut TokenStream) -> Result<Expr, InvalidPath> {
        let path = parse_path(stream)?;

        if stream.peek() == Some(&Token::LParen) {
            let args = self.parse_call_args(stream)?;
            return Ok(Expr::call(path, args));
        }

        if self.param != "_" && path == self.param {
            Ok(Expr::Parameter(path))
        } else {
            Ok(Expr::Variable(path))
        }
    }

    fn parse_call_args(&self, stream: &mut TokenStream) -> Result<Vec<Expr>, InvalidPath> {
        stream.expect(Token::LParen)?;

        let mut args = Vec::new();
        while stream.peek() != Some(&Token::RParen) {
            args.push(self.parse_expr(stream, 0)?);

            if stream.peek() != Some(&Token::RParen) {
                stream.expect(Token::Comma)?;
            }
        }

        stream.expect(Token::RParen)?;
        Ok(args)
    }
}

/// `ident ("::" ident)*`
fn parse_path(stream: &mut TokenStream) -> Result<String, InvalidPath> {
    let mut path = String::from(stream.expect_ident("a name")?);
    while stream.peek() == Some(&Token::ColonColon) {
        stream.advance();
        path.push_str("::");
        path.push_str(stream.expect_ident("a name after `::`")?);
    }
    Ok(path)
}

/// `path ("<" type ("," type)* ">")?`
fn parse_type(stream: &mut TokenStream) -> Result<String, InvalidPath> {
    let mut ty = parse_path(stream)?;
    if stream.peek() != Some(&Token::Lt) {
        return Ok(ty);
    }

    stream.advance();
    ty.push('<');
    stream.descend()?;
    loop {
        ty.push_str(&parse_type(stream)?);
        match stream.peek() {
            Some(Token::Comma) => ty.push_str(", "),
            Some(Token::Gt) => break,
            _ => return Err(stream.unexpected("`,` or `>` in type arguments")),
        }
        stream.advance();
    }
    stream.advance();
    stream.ascend();
    ty.push('>');
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::NodeKind;
    use alloc::vec;

    fn body(source: &str) -> Expr {
        parse_lambda(source).unwrap().into_body()
    }

    fn syntax_offset(source: &str) -> usize {
        match parse_lambda(source) {
            Err(InvalidPath::Syntax { offset, .. }) => offset,
            other => panic!("expected a syntax error, found {other:?}"),
        }
    }

    #[test]
    fn heads() {
        assert_eq!(parse_lambda("|x| x").unwrap().param(), "x");
        assert_eq!(parse_lambda("item => item.id").unwrap().param(), "item");
        assert_eq!(body("|_| x"), Expr::var("x"));
        assert_eq!(body("|_| _"), Expr::var("_"));
    }

    #[test]
    fn members_and_casts() {
        assert_eq!(
            body("|x| x.a.b"),
            Expr::param("x").member("a").member("b")
        );
        assert_eq!(
            body("|x| (x.a as Inner).b"),
            Expr::param("x").member("a").cast("Inner").member("b")
        );
        assert_eq!(
            body("|x| x.a as Option<Box<Inner>>"),
            Expr::param("x").member("a").cast("Option<Box<Inner>>")
        );
        assert_eq!(body("|x| y.a"), Expr::var("y").member("a"));
    }

    #[test]
    fn other_nodes() {
        assert_eq!(body("|x| 1").kind(), NodeKind::Constant);
        assert_eq!(body("|x| f(x)").kind(), NodeKind::Call);
        assert_eq!(body("|x| std::mem::take(x)").kind(), NodeKind::Call);
        assert_eq!(body("|x| x.len()").kind(), NodeKind::MethodCall);
        assert_eq!(body("|x| x.items[0]").kind(), NodeKind::Index);
        assert_eq!(body("|x| !x.flag").kind(), NodeKind::Unary);
        assert_eq!(body("|x| x.a == 1").kind(), NodeKind::Binary);
        assert_eq!(body("|x| core::f64::consts::PI").kind(), NodeKind::Variable);
    }

    #[test]
    fn precedence() {
        let one = || Expr::constant(Literal::Int(1));
        let two = || Expr::constant(Literal::Int(2));

        assert_eq!(
            body("|x| 1 + 2 * x"),
            Expr::binary(
                BinaryOp::Add,
                one(),
                Expr::binary(BinaryOp::Mul, two(), Expr::param("x"))
            )
        );
        assert_eq!(
            body("|x| 1 - 2 - x"),
            Expr::binary(
                BinaryOp::Sub,
                Expr::binary(BinaryOp::Sub, one(), two()),
                Expr::param("x")
            )
        );
        assert_eq!(
            body("|x| -x.a as i64"),
            Expr::unary(UnaryOp::Neg, Expr::param("x").member("a")).cast("i64")
        );
        assert_eq!(
            body("|x| x.f(1, 2)"),
            Expr::param("x").method_call("f", vec![one(), two()])
        );
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(syntax_offset(""), 0);
        assert_eq!(syntax_offset("x.id"), 0);
        assert_eq!(syntax_offset("|x| x."), 6);
        assert_eq!(syntax_offset("|x| x.id)"), 8);
        assert_eq!(syntax_offset("|x| (x.id"), 9);
        assert_eq!(syntax_offset("|x| x.id @"), 9);
        assert_eq!(syntax_offset("|x| x as Option<i32"), 19);
    }

    #[test]
    fn nesting_limit() {
        let nested = |depth: usize| format!("|x| {}x.id{}", "(".repeat(depth), ")".repeat(depth));

        assert_eq!(body(&nested(100)), Expr::param("x").member("id"));
        assert!(matches!(
            parse_lambda(&nested(500)),
            Err(InvalidPath::Syntax { message, .. }) if message == "expression nested too deeply"
        ));

        let negations = format!("|x| {}x.id", "-".repeat(500));
        assert!(matches!(
            parse_lambda(&negations),
            Err(InvalidPath::Syntax { message, .. }) if message == "expression nested too deeply"
        ));

        let generics = format!("|x| x as {}i32{}", "Box<".repeat(500), ">".repeat(500));
        assert!(matches!(
            parse_lambda(&generics),
            Err(InvalidPath::Syntax { message, .. }) if message == "expression nested too deeply"
        ));
    }
}
