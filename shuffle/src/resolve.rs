use log::info;
use modular::{ModularError, check_modulus};

use crate::{config::Config, op::ShuffleOp, transform::AffineTransform};

/// Answer to "which card ends at `position` after `reps` passes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub single: AffineTransform,
    pub repeated: AffineTransform,
    pub position: i128,
    pub card: i128,
}

impl Resolution {
    /// Where `card` sits after the same `reps` passes.
    pub fn position_of(&self, card: i128) -> i128 {
        self.repeated.apply(card)
    }
}

pub fn resolve(ops: &[ShuffleOp], config: &Config) -> Result<Resolution, ModularError> {
    let n = check_modulus(config.deck_size())?;
    let single = AffineTransform::compose(ops, n);
    info!("line: A={}, B={}", single.a(), single.b());

    let repeated = single.repeat(config.reps())?;
    info!("reps: A={}, B={}", repeated.a(), repeated.b());

    // x = (x' - B) / A (mod n)
    let card = repeated.unapply(config.position())?;
    Ok(Resolution {
        single,
        repeated,
        position: config.position(),
        card,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{deck::Deck, op::ParseMode};
    use proptest::prelude::*;

    fn parse(input: &str) -> Vec<ShuffleOp> {
        ShuffleOp::parse(input, ParseMode::Strict).unwrap()
    }

    #[test]
    fn test_simulated() {
        let ops = parse(include_str!("shuffle1.txt"));
        let config = Config::new(10007, 1, 0).unwrap();
        let res = resolve(&ops, &config).unwrap();
        let deck = Deck::shuffled(&ops, 10007, 1);
        assert_eq!(res.card, deck.cards()[0] as i128);
        assert_eq!(res.card, 0);

        for x in [1, 2019, 10006] {
            let config = Config::new(10007, 1, x).unwrap();
            let res = resolve(&ops, &config).unwrap();
            assert_eq!(res.card, deck.cards()[x as usize] as i128);
        }
    }

    #[test]
    fn test_simulated_multiple() {
        let ops = parse(include_str!("shuffle_test.txt"));
        let deck = Deck::shuffled(&ops, 10007, 5);
        for x in [0, 1, 2020, 5003, 10006] {
            let config = Config::new(10007, 5, x).unwrap();
            let res = resolve(&ops, &config).unwrap();
            assert_eq!(res.card, deck.cards()[x as usize] as i128);
            assert_eq!(res.position_of(res.card), x);
        }
    }

    #[test]
    fn test_zero_reps() {
        let ops = parse(include_str!("shuffle_test.txt"));
        let config = Config::new(119315717514047, 0, 2020).unwrap();
        let res = resolve(&ops, &config).unwrap();
        assert_eq!((res.repeated.a(), res.repeated.b()), (1, 0));
        assert_eq!(res.card, 2020);
    }

    #[test]
    fn test_one_rep() {
        let ops = parse(include_str!("shuffle4.txt"));
        let config = Config::new(10007, 1, 2019).unwrap();
        let res = resolve(&ops, &config).unwrap();
        assert_eq!(res.repeated, res.single);
    }

    #[test]
    fn test_non_prime_deck() {
        let ops = parse(include_str!("shuffle4.txt"));
        let deck = Deck::shuffled(&ops, 10, 1);
        for x in 0..10 {
            let res = resolve(&ops, &Config::new(10, 1, x).unwrap()).unwrap();
            assert_eq!(res.card, deck.cards()[x as usize] as i128);
        }

        // increment 5 cannot be undone in a deck of 10
        let ops = [ShuffleOp::Increment(5)];
        let err = resolve(&ops, &Config::new(10, 1, 0).unwrap()).unwrap_err();
        assert_eq!(
            err,
            ModularError::NoInverse {
                value: 5,
                modulus: 10
            }
        );
    }

    fn arb_op() -> impl Strategy<Value = ShuffleOp> {
        prop_oneof![
            Just(ShuffleOp::NewStack),
            any::<i64>().prop_map(ShuffleOp::Cut),
            (1u64..1_000_000).prop_map(ShuffleOp::Increment),
        ]
    }

    proptest! {
        #[test]
        fn resolve_round_trip(
            ops in prop::collection::vec(arb_op(), 0..40),
            reps in any::<u64>(),
            position in 0i128..119315717514047,
        ) {
            let config = Config::new(119315717514047, reps, position).unwrap();
            let res = resolve(&ops, &config).unwrap();
            prop_assert_eq!(res.position_of(res.card), position);
            let forward = res.single.repeat_by_squaring(reps);
            prop_assert_eq!(forward.apply(res.card), position);
        }

        #[test]
        fn closed_form_matches_squaring(
            ops in prop::collection::vec(arb_op(), 0..40),
            reps in any::<u64>(),
        ) {
            let single = AffineTransform::compose(&ops, 119315717514047);
            let repeated = single.repeat(reps).unwrap();
            prop_assert_eq!(repeated, single.repeat_by_squaring(reps));
        }
    }
}
