pub mod guess;
pub mod money;

pub use guess::{grade_guess, GuessOutcome, CORRECT_GUESS_MARGIN_PERCENT};
pub use money::{Money, MoneyError};
