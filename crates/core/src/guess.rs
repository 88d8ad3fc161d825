use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A guess within this many percent of the actual total counts as correct.
pub const CORRECT_GUESS_MARGIN_PERCENT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub guess: Money,
    pub actual: Money,
    pub is_correct: bool,
    /// Distance from the actual total as a percentage, one decimal place.
    /// `None` when the actual total is zero or the figure does not fit.
    pub percent_off: Option<Decimal>,
}

/// Grade a guess against a bill total using decimal arithmetic only.
///
/// A zero (or negative) actual total can never be guessed correctly, and
/// neither can a guess whose distance from the total overflows.
pub fn grade_guess(guess: Money, actual: Money) -> GuessOutcome {
    let ungraded = GuessOutcome { guess, actual, is_correct: false, percent_off: None };
    if !actual.is_positive() {
        return ungraded;
    }
    let Some(diff) = guess.checked_abs_diff(actual).map(Money::as_decimal) else {
        return ungraded;
    };
    let margin_fraction = Decimal::new(i64::from(CORRECT_GUESS_MARGIN_PERCENT), 2);
    let Some(margin) = actual.as_decimal().checked_mul(margin_fraction) else {
        return ungraded;
    };
    let percent_off = diff
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|d| d.checked_div(actual.as_decimal()))
        .map(|p| p.round_dp(1));

    GuessOutcome {
        guess,
        actual,
        is_correct: diff <= margin,
        percent_off,
    }
}
