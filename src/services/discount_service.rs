use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscountError {
    #[error("Discount could not be applied to {amount}: {reason}")]
    NotApplicable { amount: f64, reason: String },
}

/// Turns a checkout amount into the discounted amount.
pub trait DiscountPolicy: Send + Sync {
    fn apply(&self, amount: f64) -> Result<f64, DiscountError>;
}

/// Takes `percentage` percent off. The percentage is not range-checked here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageDiscountPolicy {
    percentage: f64,
}

impl PercentageDiscountPolicy {
    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }
}

impl DiscountPolicy for PercentageDiscountPolicy {
    fn apply(&self, amount: f64) -> Result<f64, DiscountError> {
        Ok(amount - (amount * self.percentage) / 100.0)
    }
}
