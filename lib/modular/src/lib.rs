use num_integer::Integer;
use thiserror::Error;

/// Largest supported modulus. Residues stay below `2^126`, so `a + a` never
/// overflows inside the double-and-add fallback of [`mod_mul`].
pub const MAX_MODULUS: i128 = i128::MAX >> 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModularError {
    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: i128, modulus: i128 },
    #[error("modulus {0} is out of range")]
    InvalidModulus(i128),
}

/// The infallible helpers below assume `n` already passed this check.
pub fn check_modulus(n: i128) -> Result<i128, ModularError> {
    if (1..=MAX_MODULUS).contains(&n) {
        Ok(n)
    } else {
        Err(ModularError::InvalidModulus(n))
    }
}

/// Canonical residue of `a` in `[0, n)`, negative `a` included.
pub fn modulo(a: i128, n: i128) -> i128 {
    debug_assert!(n > 0);
    a.mod_floor(&n)
}

pub fn mod_add(lhs: i128, rhs: i128, n: i128) -> i128 {
    modulo(modulo(lhs, n) + modulo(rhs, n), n)
}

pub fn mod_sub(lhs: i128, rhs: i128, n: i128) -> i128 {
    modulo(modulo(lhs, n) - modulo(rhs, n), n)
}

pub fn mod_mul(lhs: i128, rhs: i128, n: i128) -> i128 {
    let a = modulo(lhs, n);
    let b = modulo(rhs, n);
    if let Some(p) = a.checked_mul(b) {
        p % n
    } else {
        let mut sum = 0;
        let mut a = a;
        let mut b = b;

        while b != 0 {
            if b & 1 == 1 {
                sum = (sum + a) % n;
            }
            a = (a + a) % n;
            b >>= 1;
        }
        sum
    }
}

/// Returns `(g, x, y)` with `a*x + b*y = g` and `g = gcd(a, b) >= 0`.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1, 0);
    let (mut old_y, mut y) = (0, 1);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }

    if old_r < 0 {
        (-old_r, -old_x, -old_y)
    } else {
        (old_r, old_x, old_y)
    }
}

pub fn modular_inverse(b: i128, n: i128) -> Result<i128, ModularError> {
    let n = check_modulus(n)?;
    let (g, x, _) = extended_gcd(modulo(b, n), n);
    if g == 1 {
        Ok(modulo(x, n))
    } else {
        Err(ModularError::NoInverse {
            value: b,
            modulus: n,
        })
    }
}

pub fn modular_divide(a: i128, b: i128, n: i128) -> Result<i128, ModularError> {
    let inv = modular_inverse(b, n)?;
    Ok(mod_mul(a, inv, n))
}

/// `base^exponent mod n` by repeated squaring. `base^0` is `1 mod n` for every
/// base, zero included.
pub fn modular_power(base: i128, exponent: u64, n: i128) -> i128 {
    let mut res = 1 % n;
    let mut b = modulo(base, n);
    let mut exp = exponent;

    while exp != 0 {
        if exp & 1 == 1 {
            res = mod_mul(res, b, n);
        }
        exp >>= 1;
        b = mod_mul(b, b, n);
    }
    res
}
