use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::info;

use crate::models::payment::Payment;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment of {amount} was declined: {reason}")]
    Declined { amount: f64, reason: String },

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Finalizes payment for an amount.
pub trait PaymentSink: Send + Sync {
    fn pay(&self, amount: f64) -> Result<(), PaymentError>;
}

/// Prints each payment and keeps a receipt for it. Never fails.
#[derive(Debug, Default)]
pub struct ConsolePaymentSink {
    payments: Mutex<Vec<Payment>>,
}

impl ConsolePaymentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receipts recorded so far, oldest first.
    pub fn payments(&self) -> Vec<Payment> {
        self.payments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PaymentSink for ConsolePaymentSink {
    fn pay(&self, amount: f64) -> Result<(), PaymentError> {
        let payment = Payment::new(amount);
        info!("Recording payment {} for {}", payment.id, amount);
        println!("Processing payment for total: {}", amount);

        self.payments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(payment);
        Ok(())
    }
}
