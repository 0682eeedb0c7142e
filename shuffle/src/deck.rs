use crate::op::ShuffleOp;

/// A deck laid out card by card. Only practical for small decks; used to
/// check the affine transforms against the real thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<usize>,
}

impl Deck {
    /// Factory order: card `i` at position `i`.
    pub fn new(n: usize) -> Self {
        Deck {
            cards: (0..n).collect(),
        }
    }

    pub fn shuffled(ops: &[ShuffleOp], n: usize, reps: u64) -> Self {
        let mut deck = Self::new(n);
        for _ in 0..reps {
            deck.shuffle(ops);
        }
        deck
    }

    pub fn cards(&self) -> &[usize] {
        &self.cards
    }

    pub fn position_of(&self, card: usize) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    pub fn shuffle(&mut self, ops: &[ShuffleOp]) {
        for &op in ops {
            self.exec(op);
        }
    }

    pub fn exec(&mut self, op: ShuffleOp) {
        let len = self.cards.len();
        if len == 0 {
            return;
        }
        match op {
            ShuffleOp::NewStack => {
                self.cards.reverse();
            }
            ShuffleOp::Cut(n) => {
                let n0 = (n.unsigned_abs() % len as u64) as usize;
                if n > 0 {
                    self.cards.rotate_left(n0);
                } else if n < 0 {
                    self.cards.rotate_right(n0);
                }
            }
            ShuffleOp::Increment(n) => {
                let step = (n % len as u64) as usize;
                let space = self.cards.clone();
                for (i, x) in space.into_iter().enumerate() {
                    self.cards[(i * step) % len] = x;
                }
            }
        }
    }
}
