use std::{fmt, num::ParseIntError, str::FromStr};

use log::warn;
use modular::{ModularError, mod_mul, modular_divide, modulo};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleOp {
    Cut(i64),
    Increment(u64),
    NewStack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Reject any line that is not one of the three instructions.
    #[default]
    Strict,
    /// Accept an instruction followed by trailing text, and read anything
    /// else as `deal into new stack`.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOp {
    #[error("unrecognized shuffle")]
    Unrecognized,
    #[error("increment must be positive")]
    ZeroIncrement,
    #[error(transparent)]
    Number(#[from] ParseIntError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: {text:?}")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    #[source]
    pub kind: InvalidOp,
}

impl ShuffleOp {
    pub fn parse(input: &str, mode: ParseMode) -> Result<Vec<Self>, ParseError> {
        input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_no, line)| Self::parse_line(line, line_no, mode))
            .collect()
    }

    pub fn parse_line(line: &str, line_no: usize, mode: ParseMode) -> Result<Self, ParseError> {
        match (line.parse(), mode) {
            (Ok(op), _) => Ok(op),
            (Err(kind), ParseMode::Lenient) => {
                if let Some(op) = Self::parse_prefix(line) {
                    warn!("line {}: trailing text ignored: {:?}", line_no, line);
                    return Ok(op);
                }
                warn!("line {}: {}: {:?}, dealing into new stack", line_no, kind, line);
                Ok(ShuffleOp::NewStack)
            }
            (Err(kind), ParseMode::Strict) => Err(ParseError {
                line: line_no,
                text: line.to_owned(),
                kind,
            }),
        }
    }

    /// Reads an instruction off the start of `line`, ignoring anything after the
    /// number. Zero increments and numbers that do not fit are still rejected.
    fn parse_prefix(line: &str) -> Option<Self> {
        static CUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^cut ([+-]?[0-9]+)").unwrap());
        static INCREMENT: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^deal with increment ([0-9]+)").unwrap());
        if let Some(caps) = CUT.captures(line) {
            let (_, [n]) = caps.extract();
            n.parse::<i64>().ok().map(ShuffleOp::Cut)
        } else if let Some(caps) = INCREMENT.captures(line) {
            let (_, [n]) = caps.extract();
            n.parse::<u64>().ok().filter(|&n| n > 0).map(ShuffleOp::Increment)
        } else {
            None
        }
    }

    /// Where the card at position `p` lands after this shuffle.
    pub fn position_after(self, p: i128, n: i128) -> i128 {
        match self {
            ShuffleOp::NewStack => n - 1 - modulo(p, n),
            ShuffleOp::Cut(k) => modulo(p - k as i128, n),
            ShuffleOp::Increment(k) => mod_mul(p, k as i128, n),
        }
    }

    /// Where the card now at position `p` was before this shuffle.
    pub fn position_before(self, p: i128, n: i128) -> Result<i128, ModularError> {
        match self {
            ShuffleOp::NewStack => Ok(n - 1 - modulo(p, n)),
            ShuffleOp::Cut(k) => Ok(modulo(p + k as i128, n)),
            ShuffleOp::Increment(k) => modular_divide(p, k as i128, n),
        }
    }
}

impl FromStr for ShuffleOp {
    type Err = InvalidOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static CUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^cut (-?[0-9]+)$").unwrap());
        static INCREMENT: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^deal with increment ([0-9]+)$").unwrap());
        if let Some(caps) = CUT.captures(s) {
            let (_, [n]) = caps.extract();
            Ok(ShuffleOp::Cut(n.parse()?))
        } else if let Some(caps) = INCREMENT.captures(s) {
            let (_, [n]) = caps.extract();
            match n.parse()? {
                0 => Err(InvalidOp::ZeroIncrement),
                n => Ok(ShuffleOp::Increment(n)),
            }
        } else if s == "deal into new stack" {
            Ok(ShuffleOp::NewStack)
        } else {
            Err(InvalidOp::Unrecognized)
        }
    }
}

impl fmt::Display for ShuffleOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShuffleOp::Cut(n) => write!(f, "cut {}", n),
            ShuffleOp::Increment(n) => write!(f, "deal with increment {}", n),
            ShuffleOp::NewStack => write!(f, "deal into new stack"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let ops = ShuffleOp::parse(include_str!("shuffle4.txt"), ParseMode::Strict).unwrap();
        assert_eq!(ops.len(), 10);
        assert_eq!(ops[0], ShuffleOp::NewStack);
        assert_eq!(ops[1], ShuffleOp::Cut(-2));
        assert_eq!(ops[2], ShuffleOp::Increment(7));
        assert_eq!(ops[9], ShuffleOp::Cut(-1));
    }

    #[test]
    fn test_parse_whitespace() {
        let ops = ShuffleOp::parse("  cut 3 \n\n\tdeal into new stack\n", ParseMode::Strict);
        assert_eq!(ops, Ok(vec![ShuffleOp::Cut(3), ShuffleOp::NewStack]));
    }

    #[test]
    fn test_strict() {
        let err = ShuffleOp::parse("cut 1\ndeal into old stack\n", ParseMode::Strict).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.text, "deal into old stack");
        assert_eq!(err.kind, InvalidOp::Unrecognized);

        let err = ShuffleOp::parse("deal with increment 0", ParseMode::Strict).unwrap_err();
        assert_eq!(err.kind, InvalidOp::ZeroIncrement);

        let err = ShuffleOp::parse("cut 99999999999999999999", ParseMode::Strict).unwrap_err();
        assert!(matches!(err.kind, InvalidOp::Number(_)));

        let err = ShuffleOp::parse("deal with increment -3", ParseMode::Strict).unwrap_err();
        assert_eq!(err.kind, InvalidOp::Unrecognized);

        let err = ShuffleOp::parse("cut 3 cards", ParseMode::Strict).unwrap_err();
        assert_eq!(err.kind, InvalidOp::Unrecognized);
    }

    #[test]
    fn test_lenient() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ops = ShuffleOp::parse(
            "cut -5\nshuffle thoroughly\ndeal with increment 0\ndeal with increment 3\n\
             cut 99999999999999999999\ncut 3 cards\ndeal with increment 7x\ncut +2\n",
            ParseMode::Lenient,
        );
        assert_eq!(
            ops,
            Ok(vec![
                ShuffleOp::Cut(-5),
                ShuffleOp::NewStack,
                ShuffleOp::NewStack,
                ShuffleOp::Increment(3),
                ShuffleOp::NewStack,
                ShuffleOp::Cut(3),
                ShuffleOp::Increment(7),
                ShuffleOp::Cut(2),
            ])
        );
    }

    #[test]
    fn test_display() {
        for line in include_str!("shuffle4.txt").lines() {
            let op: ShuffleOp = line.parse().unwrap();
            assert_eq!(op.to_string(), line);
        }
    }

    #[test]
    fn test_track_card() {
        let n = 10;
        assert_eq!(ShuffleOp::NewStack.position_after(0, n), 9);
        assert_eq!(ShuffleOp::Cut(3).position_after(3, n), 0);
        assert_eq!(ShuffleOp::Cut(3).position_after(0, n), 7);
        assert_eq!(ShuffleOp::Cut(-4).position_after(6, n), 0);
        assert_eq!(ShuffleOp::Increment(3).position_after(4, n), 2);

        let ops = ShuffleOp::parse(include_str!("shuffle4.txt"), ParseMode::Strict).unwrap();
        for p in 0..n {
            let mut q = p;
            for op in ops.iter() {
                q = op.position_after(q, n);
            }
            for op in ops.iter().rev() {
                q = op.position_before(q, n).unwrap();
            }
            assert_eq!(q, p);
        }

        assert!(ShuffleOp::Increment(5).position_before(1, n).is_err());
    }
}
