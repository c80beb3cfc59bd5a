//! A small integer calculator exercised by generated feature suites.

use thiserror::Error;

/// Errors reported by [`Calculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalculatorError {
    /// The running total left the `i64` range.
    #[error("the total overflowed")]
    Overflow,
    /// Undo was requested with an empty history.
    #[error("nothing to undo")]
    NothingToUndo,
}

/// Running total with an undo history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    total: i64,
    history: Vec<i64>,
}

impl Calculator {
    /// Calculator showing zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the total.
    ///
    /// # Errors
    /// Returns [`CalculatorError::Overflow`] when the total would overflow.
    pub fn add(&mut self, amount: i64) -> Result<i64, CalculatorError> {
        let total = self
            .total
            .checked_add(amount)
            .ok_or(CalculatorError::Overflow)?;
        self.history.push(self.total);
        self.total = total;
        Ok(total)
    }

    /// Subtract `amount` from the total.
    ///
    /// # Errors
    /// Returns [`CalculatorError::Overflow`] when the total would overflow.
    pub fn subtract(&mut self, amount: i64) -> Result<i64, CalculatorError> {
        let negated = amount.checked_neg().ok_or(CalculatorError::Overflow)?;
        self.add(negated)
    }

    /// Restore the total from before the last operation.
    ///
    /// # Errors
    /// Returns [`CalculatorError::NothingToUndo`] when there is no history.
    pub fn undo(&mut self) -> Result<i64, CalculatorError> {
        self.total = self.history.pop().ok_or(CalculatorError::NothingToUndo)?;
        Ok(self.total)
    }

    /// Reset the total and forget the history.
    pub fn clear(&mut self) {
        self.total = 0;
        self.history.clear();
    }

    /// Current total.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Number of operations that can be undone.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_walks_back_through_history() {
        let mut calc = Calculator::new();
        assert_eq!(calc.add(5), Ok(5));
        assert_eq!(calc.subtract(2), Ok(3));
        assert_eq!(calc.undo(), Ok(5));
        assert_eq!(calc.undo(), Ok(0));
        assert_eq!(calc.undo(), Err(CalculatorError::NothingToUndo));
    }

    #[test]
    fn overflow_leaves_the_total_untouched() {
        let mut calc = Calculator::new();
        assert_eq!(calc.add(i64::MAX), Ok(i64::MAX));
        assert_eq!(calc.add(1), Err(CalculatorError::Overflow));
        assert_eq!(calc.total(), i64::MAX);
    }
}
