use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// NodeKind

/// The kind of an [`Expr`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Parameter,
    Variable,
    Member,
    Cast,
    Constant,
    Call,
    MethodCall,
    Index,
    Unary,
    Binary,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parameter => "parameter",
            Self::Variable => "variable",
            Self::Member => "member",
            Self::Cast => "cast",
            Self::Constant => "constant",
            Self::Call => "call",
            Self::MethodCall => "method call",
            Self::Index => "index",
            Self::Unary => "unary",
            Self::Binary => "binary",
        }
    }
}

impl fmt::Display for NodeKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// Operators & literals

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

/// A constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

// -----------------------------------------------------------------------------
// Expr

/// A node of a lambda body.
///
/// Only `Parameter`, `Member` and `Cast` can form a member path, the other
/// kinds exist so that a rejected path can name what it contains.
///
/// # Examples
///
/// ```
/// use vc_access::expr::{Expr, NodeKind};
///
/// let expr = Expr::param("x").member("nested").cast("Inner").member("text");
/// assert_eq!(expr.kind(), NodeKind::Member);
/// assert_eq!(expr.to_string(), "(x.nested as Inner).text");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The lambda parameter.
    Parameter(String),
    /// Any other name, `::` separated segments are kept together.
    Variable(String),
    Member {
        target: Box<Expr>,
        name: String,
    },
    Cast {
        operand: Box<Expr>,
        ty: String,
    },
    Constant(Literal),
    Call {
        path: String,
        args: Vec<Expr>,
    },
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    #[inline]
    pub fn param(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    #[inline]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    #[inline]
    pub fn constant(value: Literal) -> Self {
        Self::Constant(value)
    }

    #[inline]
    pub fn call(path: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            path: path.into(),
            args,
        }
    }

    #[inline]
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    #[inline]
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Accesses the member `name` of this expression.
    #[inline]
    pub fn member(self, name: impl Into<String>) -> Self {
        Self::Member {
            target: Box::new(self),
            name: name.into(),
        }
    }

    /// Casts this expression to the type named `ty`.
    #[inline]
    pub fn cast(self, ty: impl Into<String>) -> Self {
        Self::Cast {
            operand: Box::new(self),
            ty: ty.into(),
        }
    }

    #[inline]
    pub fn method_call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::MethodCall {
            receiver: Box::new(self),
            method: method.into(),
            args,
        }
    }

    #[inline]
    pub fn index(self, index: Expr) -> Self {
        Self::Index {
            target: Box::new(self),
            index: Box::new(index),
        }
    }

    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Parameter(_) => NodeKind::Parameter,
            Self::Variable(_) => NodeKind::Variable,
            Self::Member { .. } => NodeKind::Member,
            Self::Cast { .. } => NodeKind::Cast,
            Self::Constant(_) => NodeKind::Constant,
            Self::Call { .. } => NodeKind::Call,
            Self::MethodCall { .. } => NodeKind::MethodCall,
            Self::Index { .. } => NodeKind::Index,
            Self::Unary { .. } => NodeKind::Unary,
            Self::Binary { .. } => NodeKind::Binary,
        }
    }

    // Operands that would re-associate when printed bare.
    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cast { .. } | Self::Unary { .. } | Self::Binary { .. } => write!(f, "({self})"),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

fn fmt_args(args: &[Expr], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("(")?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(arg, f)?;
    }
    f.write_str(")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(name) | Self::Variable(name) => f.write_str(name),
            Self::Member { target, name } => {
                target.fmt_operand(f)?;
                write!(f, ".{name}")
            }
            Self::Cast { operand, ty } => {
                operand.fmt_operand(f)?;
                write!(f, " as {ty}")
            }
            Self::Constant(value) => fmt::Display::fmt(value, f),
            Self::Call { path, args } => {
                f.write_str(path)?;
                fmt_args(args, f)
            }
            Self::MethodCall {
                receiver,
                method,
                args,
            } => {
                receiver.fmt_operand(f)?;
                write!(f, ".{method}")?;
                fmt_args(args, f)
            }
            Self::Index { target, index } => {
                target.fmt_operand(f)?;
                write!(f, "[{index}]")
            }
            Self::Unary { op, operand } => {
                f.write_str(op.as_str())?;
                operand.fmt_operand(f)
            }
            Self::Binary { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {} ", op.as_str())?;
                right.fmt_operand(f)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Lambda

/// A one-parameter lambda, `|x| body`.
///
/// # Examples
///
/// ```
/// use vc_access::expr::{Expr, Lambda};
///
/// let lambda = Lambda::new("x", Expr::param("x").member("id"));
/// assert_eq!(lambda.param(), "x");
/// assert_eq!(lambda.to_string(), "|x| x.id");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    param: String,
    body: Expr,
}

impl Lambda {
    #[inline]
    pub fn new(param: impl Into<String>, body: Expr) -> Self {
        Self {
            param: param.into(),
            body,
        }
    }

    #[inline]
    pub fn param(&self) -> &str {
        &self.param
    }

    #[inline]
    pub fn body(&self) -> &Expr {
        &self.body
    }

    #[inline]
    pub fn into_body(self) -> Expr {
        self.body
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}| {}", self.param, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn kinds() {
        assert_eq!(Expr::param("x").kind(), NodeKind::Parameter);
        assert_eq!(Expr::constant(Literal::Int(1)).kind(), NodeKind::Constant);
        assert_eq!(
            Expr::param("x").method_call("len", vec![]).kind(),
            NodeKind::MethodCall
        );
        assert_eq!(NodeKind::MethodCall.to_string(), "method call");
    }

    #[test]
    fn display() {
        let expr = Expr::binary(
            BinaryOp::Add,
            Expr::param("x").member("id"),
            Expr::constant(Literal::Int(1)),
        );
        assert_eq!(expr.to_string(), "x.id + 1");

        let expr = Expr::unary(UnaryOp::Neg, Expr::param("x").member("id"));
        assert_eq!(expr.to_string(), "-x.id");

        let expr = Expr::call("f", vec![Expr::param("x")]).index(Expr::var("i"));
        assert_eq!(expr.to_string(), "f(x)[i]");

        let expr = Expr::constant(Literal::Str("a\"b".into()));
        assert_eq!(expr.to_string(), r#""a\"b""#);
    }
}
