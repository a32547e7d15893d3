pub(crate) use num::{Integer, One, Signed, Zero};

mod rational;
mod error;
pub mod stop;
pub mod tracing;

pub use rational::Rational;
pub use error::*;

/// The arbitrary-precision integer type underlying [`Rational`].
pub type Number = num::BigInt;
