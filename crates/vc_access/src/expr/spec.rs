use alloc::string::String;

use super::{Lambda, parse_lambda};
use crate::InvalidPath;

/// Something that describes a member path: lambda source text or an
/// already built [`Lambda`].
///
/// # Examples
///
/// ```
/// use vc_access::expr::{Expr, Lambda, PathSpec};
///
/// let parsed = "|x| x.id".into_lambda().unwrap();
/// let built = Lambda::new("x", Expr::param("x").member("id"));
/// assert_eq!(parsed, built.into_lambda().unwrap());
/// ```
pub trait PathSpec {
    fn into_lambda(self) -> Result<Lambda, InvalidPath>;
}

impl PathSpec for &str {
    #[inline]
    fn into_lambda(self) -> Result<Lambda, InvalidPath> {
        parse_lambda(self)
    }
}

impl PathSpec for &String {
    #[inline]
    fn into_lambda(self) -> Result<Lambda, InvalidPath> {
        parse_lambda(self)
    }
}

impl PathSpec for String {
    #[inline]
    fn into_lambda(self) -> Result<Lambda, InvalidPath> {
        parse_lambda(&self)
    }
}

impl PathSpec for Lambda {
    #[inline]
    fn into_lambda(self) -> Result<Lambda, InvalidPath> {
        Ok(self)
    }
}

impl PathSpec for &Lambda {
    #[inline]
    fn into_lambda(self) -> Result<Lambda, InvalidPath> {
        Ok(self.clone())
    }
}
