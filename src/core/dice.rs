//! Dice: two face values per roll plus the turn's move budget.
//!
//! One roll per turn populates `available_moves`: the two face values, or
//! four copies of the value on doubles. Executing a move consumes one value
//! into `used_moves`; the turn's coordinator resets the budget when the
//! turn ends. The randomness behind `roll` is an injected [`DiceRng`].

use smallvec::SmallVec;

use crate::core::rng::DiceRng;
use crate::error::GameError;

/// The dice and the per-turn move budget they grant.
#[derive(Clone, Debug)]
pub struct Dice {
    rng: DiceRng,
    die_a: u8,
    die_b: u8,
    rolled: bool,
    /// Face values still usable this turn. At most four (doubles).
    available: SmallVec<[u8; 4]>,
    /// Face values already consumed this turn.
    used: SmallVec<[u8; 4]>,
}

impl Dice {
    /// Create dice over an injected randomness source.
    #[must_use]
    pub fn new(rng: DiceRng) -> Self {
        Self {
            rng,
            die_a: 0,
            die_b: 0,
            rolled: false,
            available: SmallVec::new(),
            used: SmallVec::new(),
        }
    }

    /// Create dice with a deterministic seeded source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(DiceRng::seeded(seed))
    }

    /// Roll both dice and populate the move budget.
    ///
    /// Doubles grant four uses of the value; otherwise each face once.
    /// Fails with [`GameError::DiceAlreadyRolled`] while unconsumed moves
    /// remain from a prior roll in the same turn.
    pub fn roll(&mut self) -> Result<(u8, u8), GameError> {
        if self.rolled && !self.available.is_empty() {
            return Err(GameError::DiceAlreadyRolled);
        }

        let (a, b) = self.rng.roll_pair();
        self.die_a = a;
        self.die_b = b;
        self.rolled = true;
        self.used.clear();
        self.available.clear();
        if a == b {
            self.available.extend(std::iter::repeat(a).take(4));
        } else {
            self.available.push(a);
            self.available.push(b);
        }

        Ok((a, b))
    }

    /// The face values of the last roll, `(0, 0)` before the first roll.
    #[must_use]
    pub fn values(&self) -> (u8, u8) {
        (self.die_a, self.die_b)
    }

    /// Whether the dice have been rolled this turn.
    #[must_use]
    pub fn is_rolled(&self) -> bool {
        self.rolled
    }

    /// Whether the last roll was doubles.
    #[must_use]
    pub fn is_double(&self) -> bool {
        self.rolled && self.die_a == self.die_b
    }

    /// Face values still usable this turn, in consumption order.
    #[must_use]
    pub fn available_moves(&self) -> &[u8] {
        &self.available
    }

    /// Face values consumed this turn.
    #[must_use]
    pub fn used_moves(&self) -> &[u8] {
        &self.used
    }

    /// Whether `value` can currently be consumed.
    #[must_use]
    pub fn can_use(&self, value: u8) -> bool {
        self.available.contains(&value)
    }

    /// The distinct face values still available (one or two entries).
    #[must_use]
    pub fn distinct_available(&self) -> SmallVec<[u8; 2]> {
        let mut distinct: SmallVec<[u8; 2]> = SmallVec::new();
        for &value in &self.available {
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }
        distinct
    }

    /// Consume one instance of `value` from the budget.
    ///
    /// Fails with [`GameError::InvalidDiceValue`] when `value` is outside
    /// [1, 6] or not currently available.
    pub fn consume(&mut self, value: u8) -> Result<(), GameError> {
        if !(1..=6).contains(&value) {
            return Err(GameError::InvalidDiceValue { value });
        }
        match self.available.iter().position(|&v| v == value) {
            Some(pos) => {
                self.available.remove(pos);
                self.used.push(value);
                Ok(())
            }
            None => Err(GameError::InvalidDiceValue { value }),
        }
    }

    /// Whether any budget remains.
    #[must_use]
    pub fn has_moves_left(&self) -> bool {
        !self.available.is_empty()
    }

    /// Clear the roll and both budgets. Invoked at every turn start.
    pub fn reset(&mut self) {
        self.die_a = 0;
        self.die_b = 0;
        self.rolled = false;
        self.available.clear();
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let dice = Dice::with_seed(42);
        assert_eq!(dice.values(), (0, 0));
        assert!(!dice.is_rolled());
        assert!(!dice.is_double());
        assert!(!dice.has_moves_left());
        assert!(dice.available_moves().is_empty());
        assert!(dice.used_moves().is_empty());
    }

    #[test]
    fn test_roll_normal() {
        let mut dice = Dice::new(DiceRng::fixed([4, 6]));
        let (a, b) = dice.roll().unwrap();

        assert_eq!((a, b), (4, 6));
        assert!(dice.is_rolled());
        assert!(!dice.is_double());
        assert_eq!(dice.available_moves(), &[4, 6]);
    }

    #[test]
    fn test_roll_doubles_grants_four() {
        let mut dice = Dice::new(DiceRng::fixed([5, 5]));
        dice.roll().unwrap();

        assert!(dice.is_double());
        assert_eq!(dice.available_moves(), &[5, 5, 5, 5]);
        assert_eq!(dice.distinct_available().as_slice(), &[5]);
    }

    #[test]
    fn test_roll_with_pending_moves_fails() {
        let mut dice = Dice::new(DiceRng::fixed([3, 6]));
        dice.roll().unwrap();

        assert_eq!(dice.roll(), Err(GameError::DiceAlreadyRolled));

        // Consuming everything frees the dice for the next roll.
        dice.consume(3).unwrap();
        dice.consume(6).unwrap();
        assert!(dice.roll().is_ok());
    }

    #[test]
    fn test_consume() {
        let mut dice = Dice::new(DiceRng::fixed([3, 6]));
        dice.roll().unwrap();

        dice.consume(3).unwrap();
        assert_eq!(dice.available_moves(), &[6]);
        assert_eq!(dice.used_moves(), &[3]);

        dice.consume(6).unwrap();
        assert!(!dice.has_moves_left());
        assert_eq!(dice.used_moves(), &[3, 6]);
    }

    #[test]
    fn test_consume_unavailable_fails() {
        let mut dice = Dice::new(DiceRng::fixed([2, 4]));
        dice.roll().unwrap();

        assert_eq!(dice.consume(6), Err(GameError::InvalidDiceValue { value: 6 }));

        dice.consume(2).unwrap();
        assert_eq!(dice.consume(2), Err(GameError::InvalidDiceValue { value: 2 }));
    }

    #[test]
    fn test_consume_out_of_range_fails() {
        let mut dice = Dice::new(DiceRng::fixed([2, 4]));
        dice.roll().unwrap();

        assert_eq!(dice.consume(0), Err(GameError::InvalidDiceValue { value: 0 }));
        assert_eq!(dice.consume(7), Err(GameError::InvalidDiceValue { value: 7 }));
    }

    #[test]
    fn test_consume_doubles_four_times() {
        let mut dice = Dice::new(DiceRng::fixed([4, 4]));
        dice.roll().unwrap();

        for _ in 0..4 {
            dice.consume(4).unwrap();
        }
        assert!(!dice.has_moves_left());
        assert_eq!(dice.consume(4), Err(GameError::InvalidDiceValue { value: 4 }));
    }

    #[test]
    fn test_can_use() {
        let mut dice = Dice::new(DiceRng::fixed([2, 5]));
        assert!(!dice.can_use(2));

        dice.roll().unwrap();
        assert!(dice.can_use(2));
        assert!(dice.can_use(5));
        assert!(!dice.can_use(3));
    }

    #[test]
    fn test_distinct_available() {
        let mut dice = Dice::new(DiceRng::fixed([2, 5]));
        dice.roll().unwrap();
        assert_eq!(dice.distinct_available().as_slice(), &[2, 5]);

        dice.consume(2).unwrap();
        assert_eq!(dice.distinct_available().as_slice(), &[5]);
    }

    #[test]
    fn test_reset_then_roll() {
        let mut dice = Dice::new(DiceRng::fixed([3, 3, 1, 2]));
        dice.roll().unwrap();
        dice.reset();

        assert!(!dice.is_rolled());
        assert_eq!(dice.values(), (0, 0));
        assert!(!dice.has_moves_left());

        // Reset followed by roll always yields a fresh budget: two distinct
        // values with two moves, or doubles with four.
        let (a, b) = dice.roll().unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(dice.available_moves().len(), 2);
    }

    #[test]
    fn test_seeded_budget_shape() {
        for seed in 0..50 {
            let mut dice = Dice::with_seed(seed);
            let (a, b) = dice.roll().unwrap();
            if a == b {
                assert_eq!(dice.available_moves(), &[a, a, a, a]);
            } else {
                assert_eq!(dice.available_moves(), &[a, b]);
            }
        }
    }
}
