use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Cards dealt to each seat per round.
pub const HAND_SIZE: usize = 3;
/// Tricks in a full round.
pub const TRICKS_PER_ROUND: usize = 3;
/// Trick wins that decide a round early.
pub const TRICKS_TO_WIN: u8 = 2;
/// Score at which a team wins the match (overshoot allowed).
pub const WIN_SCORE: u8 = 12;

/// Points a round is worth. Escalates 1 → 3 → 6 → 9 → 12 and never decreases
/// within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stake {
    One,
    Three,
    Six,
    Nine,
    Twelve,
}

impl Stake {
    pub const fn value(self) -> u8 {
        match self {
            Stake::One => 1,
            Stake::Three => 3,
            Stake::Six => 6,
            Stake::Nine => 9,
            Stake::Twelve => 12,
        }
    }
}

impl From<Stake> for u8 {
    fn from(stake: Stake) -> Self {
        stake.value()
    }
}

impl TryFrom<u8> for Stake {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Stake::One),
            3 => Ok(Stake::Three),
            6 => Ok(Stake::Six),
            9 => Ok(Stake::Nine),
            12 => Ok(Stake::Twelve),
            other => Err(DomainError::validation_other(format!(
                "{other} is not a stake value"
            ))),
        }
    }
}

/// Next rung of the escalation ladder; `None` at twelve.
pub fn next_stake(current: Stake) -> Option<Stake> {
    match current {
        Stake::One => Some(Stake::Three),
        Stake::Three => Some(Stake::Six),
        Stake::Six => Some(Stake::Nine),
        Stake::Nine => Some(Stake::Twelve),
        Stake::Twelve => None,
    }
}

pub fn require_next_stake(current: Stake) -> Result<Stake, DomainError> {
    next_stake(current).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::StakeAtMaximum,
            "Stake is already twelve",
        )
    })
}

/// Points awarded for winning a round at `stake`.
pub fn points_for(stake: Stake) -> u8 {
    stake.value()
}

pub fn has_won(score: u8) -> bool {
    score >= WIN_SCORE
}
