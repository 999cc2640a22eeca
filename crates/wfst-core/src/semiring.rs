// Weight algebra: the Semiring trait and the stock floating-point semirings

use std::fmt::Debug;

/// Tolerance used when comparing floating-point weights.
pub const WEIGHT_DELTA: f64 = 1.0 / 1024.0;

/// Abstract weight algebra parameterizing every operation.
///
/// Implementations must satisfy the semiring laws: `plus` and `times` are
/// associative, `zero` is the identity of `plus` and absorbing for `times`,
/// and `one` is the identity of `times`. All methods are pure.
///
/// A semiring value is bound to each automaton. Two automata can only be
/// combined when their semiring values compare equal.
pub trait Semiring: Clone + Debug + PartialEq {
    /// The weight type this algebra operates on.
    type Weight: Copy + Debug + PartialEq;

    /// Short human-readable name, used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Identity of `plus`, absorbing for `times`. Marks non-final states.
    fn zero(&self) -> Self::Weight;

    /// Identity of `times`.
    fn one(&self) -> Self::Weight;

    /// Combines the weights of alternative paths.
    fn plus(&self, a: Self::Weight, b: Self::Weight) -> Self::Weight;

    /// Extends a path weight by another weight.
    fn times(&self, a: Self::Weight, b: Self::Weight) -> Self::Weight;

    /// Weight transform applied to every arc when an automaton is reversed.
    fn reverse(&self, a: Self::Weight) -> Self::Weight;

    /// Returns `false` for values outside the carrier set (e.g. NaN).
    fn is_member(&self, a: Self::Weight) -> bool;

    /// Equality up to the algebra's numerical tolerance.
    fn approx_eq(&self, a: Self::Weight, b: Self::Weight) -> bool;

    /// Returns `true` unless `a` equals `zero` within tolerance.
    fn is_not_zero(&self, a: Self::Weight) -> bool {
        !self.approx_eq(a, self.zero())
    }

    /// Returns `true` if `a` equals `zero` within tolerance.
    fn is_zero(&self, a: Self::Weight) -> bool {
        !self.is_not_zero(a)
    }
}

/// Float comparison shared by the stock semirings. Infinities compare equal
/// only to an infinity of the same sign.
fn float_approx_eq(a: f64, b: f64) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= WEIGHT_DELTA
}

/// Tropical semiring over `f64`: `plus` is `min`, `times` is `+`.
///
/// `zero` is `+inf`, `one` is `0.0`. Weights are usually negative log
/// probabilities, so lower is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TropicalSemiring;

impl Semiring for TropicalSemiring {
    type Weight = f64;

    fn name(&self) -> &'static str {
        "tropical"
    }

    fn zero(&self) -> f64 {
        f64::INFINITY
    }

    fn one(&self) -> f64 {
        0.0
    }

    fn plus(&self, a: f64, b: f64) -> f64 {
        if !self.is_member(a) || !self.is_member(b) {
            return f64::NEG_INFINITY;
        }
        a.min(b)
    }

    fn times(&self, a: f64, b: f64) -> f64 {
        if !self.is_member(a) || !self.is_member(b) {
            return f64::NEG_INFINITY;
        }
        if a == f64::INFINITY || b == f64::INFINITY {
            return f64::INFINITY;
        }
        a + b
    }

    fn reverse(&self, a: f64) -> f64 {
        a
    }

    fn is_member(&self, a: f64) -> bool {
        !a.is_nan() && a != f64::NEG_INFINITY
    }

    fn approx_eq(&self, a: f64, b: f64) -> bool {
        float_approx_eq(a, b)
    }
}

/// Log semiring over `f64`: `plus` is `-ln(e^-a + e^-b)`, `times` is `+`.
///
/// Shares `zero`/`one` with the tropical semiring but sums over paths
/// instead of keeping the best one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSemiring;

impl Semiring for LogSemiring {
    type Weight = f64;

    fn name(&self) -> &'static str {
        "log"
    }

    fn zero(&self) -> f64 {
        f64::INFINITY
    }

    fn one(&self) -> f64 {
        0.0
    }

    fn plus(&self, a: f64, b: f64) -> f64 {
        if !self.is_member(a) || !self.is_member(b) {
            return f64::NEG_INFINITY;
        }
        if a == f64::INFINITY {
            return b;
        }
        if b == f64::INFINITY {
            return a;
        }
        // -ln(e^-a + e^-b) = min - ln(1 + e^-(max - min))
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        lo - (-(hi - lo)).exp().ln_1p()
    }

    fn times(&self, a: f64, b: f64) -> f64 {
        if !self.is_member(a) || !self.is_member(b) {
            return f64::NEG_INFINITY;
        }
        if a == f64::INFINITY || b == f64::INFINITY {
            return f64::INFINITY;
        }
        a + b
    }

    fn reverse(&self, a: f64) -> f64 {
        a
    }

    fn is_member(&self, a: f64) -> bool {
        !a.is_nan() && a != f64::NEG_INFINITY
    }

    fn approx_eq(&self, a: f64, b: f64) -> bool {
        float_approx_eq(a, b)
    }
}

/// Probability semiring over non-negative `f64`: ordinary `+` and `*`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbabilitySemiring;

impl Semiring for ProbabilitySemiring {
    type Weight = f64;

    fn name(&self) -> &'static str {
        "probability"
    }

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn plus(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    fn times(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    fn reverse(&self, a: f64) -> f64 {
        a
    }

    fn is_member(&self, a: f64) -> bool {
        !a.is_nan() && a >= 0.0
    }

    fn approx_eq(&self, a: f64, b: f64) -> bool {
        float_approx_eq(a, b)
    }
}
