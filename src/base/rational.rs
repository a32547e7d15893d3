use crate::base::*;

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// An exact fraction of two arbitrary-precision integers.
///
/// A `Rational` is always kept in lowest terms, with the sign carried by the numerator and a
/// positive denominator. Zero is stored as `0/1`. This makes the representation of each value
/// unique, so the derived `PartialEq` and `Hash` coincide with numeric equality.
///
/// Arithmetic never mutates its operands: the operators take references (or values) and produce
/// a new `Rational`. The compound assignments `+=`, `-=` and `*=` replace the receiver with the
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: Number,
    denom: Number
}

impl Rational {
    /// Constructs `numer / denom`, reduced to lowest terms. Fails if `denom` is zero.
    pub fn new(numer: impl Into<Number>, denom: impl Into<Number>) -> Result<Rational, BaseError> {
        let (numer, denom) = (numer.into(), denom.into());
        if denom.is_zero() {
            return Err("division by zero".into());
        }
        Ok(Self::reduced(numer, denom))
    }

    /// Divides out the common factor and moves the sign to the numerator. `denom` must be nonzero.
    fn reduced(numer: Number, denom: Number) -> Rational {
        debug_assert!(!denom.is_zero());
        let gcd = numer.gcd(&denom);
        let (numer, denom) = (numer / &gcd, denom / gcd);
        if denom.is_negative() {
            Rational{numer: -numer, denom: -denom}
        } else {
            Rational{numer, denom}
        }
    }

    pub fn zero() -> Rational {
        Rational{numer: Number::zero(), denom: Number::one()}
    }

    pub fn one() -> Rational {
        Rational{numer: Number::one(), denom: Number::one()}
    }

    pub fn numer(&self) -> &Number {
        &self.numer
    }

    /// The denominator, always positive.
    pub fn denom(&self) -> &Number {
        &self.denom
    }

    pub fn into_parts(self) -> (Number, Number) {
        (self.numer, self.denom)
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// Returns `1 / self` as a new value. Fails for zero.
    pub fn recip(&self) -> Result<Rational, BaseError> {
        if self.is_zero() {
            return Err("division by zero".into());
        }
        Ok(match self.numer.is_negative() {
            true => Rational{numer: -&self.denom, denom: -&self.numer},
            false => Rational{numer: self.denom.clone(), denom: self.numer.clone()}
        })
    }

    /// Divides `self` by `rhs` by multiplying with the reciprocal of `rhs`. Fails if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Rational) -> Result<Rational, BaseError> {
        Ok(self * &rhs.recip()?)
    }

    fn add_impl(&self, rhs: &Rational, negate: bool) -> Rational {
        let lcm = self.denom.lcm(&rhs.denom);
        let lhs_numer = &self.numer * (&lcm / &self.denom);
        let rhs_numer = &rhs.numer * (&lcm / &rhs.denom);
        let numer = if negate { lhs_numer - rhs_numer } else { lhs_numer + rhs_numer };
        Self::reduced(numer, lcm)
    }

    fn mul_impl(&self, rhs: &Rational) -> Rational {
        // Cross-cancel first so that the products stay small and need no further reduction.
        let gcd1 = self.numer.gcd(&rhs.denom);
        let gcd2 = self.denom.gcd(&rhs.numer);
        let numer = (&self.numer / &gcd1) * (&rhs.numer / &gcd2);
        let denom = (&self.denom / gcd2) * (&rhs.denom / gcd1);
        Rational{numer, denom}
    }
}

impl Default for Rational {
    fn default() -> Rational {
        Rational::zero()
    }
}

impl From<Number> for Rational {
    fn from(numer: Number) -> Rational {
        Rational{numer, denom: Number::one()}
    }
}

impl From<i64> for Rational {
    fn from(numer: i64) -> Rational {
        Rational::from(Number::from(numer))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Rational) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&self.denom * &other.numer))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            write!(f, "0")
        } else if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{} / {}", self.numer, self.denom)
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational{numer: -&self.numer, denom: self.denom.clone()}
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational{numer: -self.numer, denom: self.denom}
    }
}

impl Add<&Rational> for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        self.add_impl(rhs, false)
    }
}

impl Sub<&Rational> for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self.add_impl(rhs, true)
    }
}

impl Mul<&Rational> for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        self.mul_impl(rhs)
    }
}

/// # Panics
///
/// Panics if `rhs` is zero. Use [`Rational::checked_div`] to get an error instead.
impl Div<&Rational> for &Rational {
    type Output = Rational;

    fn div(self, rhs: &Rational) -> Rational {
        match self.checked_div(rhs) {
            Ok(quot) => quot,
            Err(err) => panic!("{err}")
        }
    }
}

// Adding an integer keeps the fraction reduced: gcd(n + k·d, d) = gcd(n, d).
impl Add<&Number> for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Number) -> Rational {
        Rational{numer: &self.numer + rhs * &self.denom, denom: self.denom.clone()}
    }
}

impl Sub<&Number> for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Number) -> Rational {
        Rational{numer: &self.numer - rhs * &self.denom, denom: self.denom.clone()}
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $rhs:ty) => {
        impl $imp<$rhs> for Rational {
            type Output = Rational;

            fn $method(self, rhs: $rhs) -> Rational {
                (&self).$method(&rhs)
            }
        }

        impl $imp<&$rhs> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &$rhs) -> Rational {
                (&self).$method(rhs)
            }
        }
    }
}

forward_binop!(Add, add, Rational);
forward_binop!(Sub, sub, Rational);
forward_binop!(Mul, mul, Rational);
forward_binop!(Div, div, Rational);
forward_binop!(Add, add, Number);
forward_binop!(Sub, sub, Number);

macro_rules! forward_assign {
    ($imp:ident, $method:ident, $op:tt) => {
        impl $imp<&Rational> for Rational {
            fn $method(&mut self, rhs: &Rational) {
                *self = &*self $op rhs;
            }
        }

        impl $imp<Rational> for Rational {
            fn $method(&mut self, rhs: Rational) {
                *self = &*self $op &rhs;
            }
        }
    }
}

forward_assign!(AddAssign, add_assign, +);
forward_assign!(SubAssign, sub_assign, -);
forward_assign!(MulAssign, mul_assign, *);
