use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    models::cart::Cart,
    services::{DiscountError, DiscountPolicy, PaymentError, PaymentSink},
};

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Discount error: {0}")]
    Discount(#[from] DiscountError),

    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),
}

pub struct Checkout {
    cart: Cart,
    payment_sink: Arc<dyn PaymentSink>,
    discount: Option<Arc<dyn DiscountPolicy>>,
}

impl Checkout {
    pub fn new(
        cart: Cart,
        payment_sink: Arc<dyn PaymentSink>,
        discount: Option<Arc<dyn DiscountPolicy>>,
    ) -> Self {
        Self {
            cart,
            payment_sink,
            discount,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Subtotal with the discount applied, if there is one. Nothing is paid.
    pub fn total(&self) -> Result<f64, CheckoutError> {
        let subtotal = self.cart.subtotal();
        debug!("Checkout subtotal for {} items: {}", self.cart.len(), subtotal);

        match &self.discount {
            Some(policy) => {
                let discounted = policy.apply(subtotal)?;
                debug!("Discount applied: {} -> {}", subtotal, discounted);
                Ok(discounted)
            }
            None => Ok(subtotal),
        }
    }

    /// Computes the total and pays it through the sink exactly once.
    /// Failures from the discount policy or the sink are returned as-is;
    /// nothing is retried.
    pub fn process(&self) -> Result<(), CheckoutError> {
        let amount = self.total()?;

        self.payment_sink.pay(amount).map_err(|e| {
            error!("Payment of {} failed: {}", amount, e);
            CheckoutError::Payment(e)
        })?;

        info!("Checkout processed for total: {}", amount);
        Ok(())
    }
}
