//! Inverse link functions.

use crate::core::types::*;
use serde::{Deserialize, Serialize};

/// Canonical inverse link of a loss family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    /// `μ = s`
    Identity,
    /// `μ = 1 / (1 + e^{-s})`
    Sigmoid,
    /// `μ = e^s`
    Exp,
}

impl Link {
    /// Link for a loss kind.
    pub fn from_loss(loss: LossType) -> Self {
        match loss {
            LossType::Mse => Link::Identity,
            LossType::Logistic => Link::Sigmoid,
            LossType::Poisson | LossType::Gamma | LossType::Tweedie => Link::Exp,
        }
    }

    /// Map a linear score to the response scale.
    #[inline]
    pub fn apply(&self, score: Score) -> Score {
        match self {
            Link::Identity => score,
            Link::Sigmoid => 1.0 / (1.0 + (-score).exp()),
            Link::Exp => score.exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(Link::from_loss(LossType::Mse).apply(-2.5), -2.5);
        assert_eq!(Link::from_loss(LossType::Logistic).apply(0.0), 0.5);
        assert_eq!(Link::from_loss(LossType::Gamma).apply(0.0), 1.0);
        assert_eq!(Link::from_loss(LossType::Tweedie), Link::Exp);
    }

    #[test]
    fn test_sigmoid_saturates_without_nan() {
        let link = Link::Sigmoid;
        assert_eq!(link.apply(-1000.0), 0.0);
        assert_eq!(link.apply(1000.0), 1.0);
    }
}
