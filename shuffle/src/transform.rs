use log::debug;
use modular::{
    ModularError, mod_add, mod_mul, mod_sub, modular_divide, modular_inverse, modular_power,
    modulo,
};

use crate::op::ShuffleOp;

/// `p -> a*p + b (mod n)`: the card at position `p` moves to this position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffineTransform {
    a: i128,
    b: i128,
    n: i128,
}

impl AffineTransform {
    pub fn new(a: i128, b: i128, n: i128) -> Self {
        Self {
            a: modulo(a, n),
            b: modulo(b, n),
            n,
        }
    }

    pub fn identity(n: i128) -> Self {
        Self::new(1, 0, n)
    }

    pub fn a(&self) -> i128 {
        self.a
    }

    pub fn b(&self) -> i128 {
        self.b
    }

    pub fn apply_op(self, op: ShuffleOp) -> Self {
        let n = self.n;
        match op {
            ShuffleOp::NewStack => {
                // y0 = ax+b (mod n)
                // y1 = -y0-1 (mod n)
                //    = -ax-(b+1) (mod n)
                Self {
                    a: mod_sub(0, self.a, n),
                    b: modulo(-self.b - 1, n),
                    n,
                }
            }
            ShuffleOp::Cut(k) => {
                // y0 = ax + b (mod n)
                // y1 = ax + b - k (mod n)
                let k = modulo(k as i128, n);
                Self {
                    a: self.a,
                    b: mod_sub(self.b, k, n),
                    n,
                }
            }
            ShuffleOp::Increment(k) => {
                // y0 = ax + b (mod n)
                // y1 = kax + kb (mod n)
                let k = k as i128;
                Self {
                    a: mod_mul(self.a, k, n),
                    b: mod_mul(self.b, k, n),
                    n,
                }
            }
        }
    }

    /// One full pass of `ops`, applied in order.
    pub fn compose(ops: &[ShuffleOp], n: i128) -> Self {
        let mut t = Self::identity(n);
        for &op in ops.iter() {
            t = t.apply_op(op);
            debug!("{:<28} a={} b={}", op.to_string(), t.a, t.b);
        }
        t
    }

    /// `other` applied after `self`.
    pub fn then(self, other: Self) -> Self {
        debug_assert_eq!(self.n, other.n);
        let n = self.n;
        Self {
            a: mod_mul(other.a, self.a, n),
            b: mod_add(mod_mul(other.a, self.b, n), other.b, n),
            n,
        }
    }

    pub fn apply(&self, p: i128) -> i128 {
        mod_add(mod_mul(p, self.a, self.n), self.b, self.n)
    }

    /// Position that `apply` sends to `x`.
    pub fn unapply(&self, x: i128) -> Result<i128, ModularError> {
        // y = ax + b (mod n)
        // x = (y-b) / a (mod n)
        modular_divide(mod_sub(x, self.b, self.n), self.a, self.n)
    }

    pub fn invert(self) -> Result<Self, ModularError> {
        let a_inv = modular_inverse(self.a, self.n)?;
        Ok(Self {
            a: a_inv,
            b: mod_sub(0, mod_mul(a_inv, self.b, self.n), self.n),
            n: self.n,
        })
    }

    /// `self` applied `reps` times, via the geometric series closed form.
    pub fn repeat(self, reps: u64) -> Result<Self, ModularError> {
        // y1 = ax + b
        // y2 = a(ax + b) + b
        //    = a^2x + ab + b
        // yn = a^n x + (a^n - 1) b / (a - 1)
        let n = self.n;
        match reps {
            0 => return Ok(Self::identity(n)),
            1 => return Ok(self),
            _ => {}
        }
        let an = modular_power(self.a, reps, n);
        let b = if self.a == 1 % n {
            // yn = x + reps * b
            mod_mul(self.b, reps as i128, n)
        } else {
            let series = modular_divide(mod_sub(an, 1, n), mod_sub(self.a, 1, n), n)?;
            mod_mul(series, self.b, n)
        };
        Ok(Self { a: an, b, n })
    }

    /// `self` applied `reps` times by square-and-multiply on composition.
    pub fn repeat_by_squaring(self, reps: u64) -> Self {
        let mut res = Self::identity(self.n);
        let mut t = self;
        let mut exp = reps;

        while exp != 0 {
            if exp & 1 == 1 {
                res = res.then(t);
            }
            exp >>= 1;
            t = t.then(t);
        }
        res
    }
}
