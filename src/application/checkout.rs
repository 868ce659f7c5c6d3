use super::cart::Cart;
use crate::domain::payment::{NewPayment, Payment, PaymentRequest};
use crate::domain::ports::PaymentStore;
use crate::domain::validation::validate_payment;
use crate::error::{Result, ShopError};
use std::sync::Arc;

/// States of a single checkout. `Rejected` and `Accepted` are terminal.
#[derive(Debug)]
pub enum CheckoutState {
    Received(PaymentRequest),
    Validating(PaymentRequest),
    Rejected(ShopError),
    Accepted(NewPayment),
}

impl CheckoutState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Received(_) => "received",
            Self::Validating(_) => "validating",
            Self::Rejected(_) => "rejected",
            Self::Accepted(_) => "accepted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Accepted(_))
    }

    /// Moves one step forward. Terminal states stay where they are.
    pub fn advance(self) -> Self {
        match self {
            Self::Received(request) => Self::Validating(request),
            Self::Validating(request) => match validate_payment(&request) {
                Ok(payment) => Self::Accepted(payment),
                Err(err) => Self::Rejected(err),
            },
            terminal => terminal,
        }
    }
}

/// Validates a payment, records it and empties the purchaser's cart.
///
/// From the client's view this is all-or-nothing: a rejected or failed
/// checkout leaves no payment behind and the cart untouched, and a
/// successful one always leaves the cart empty.
#[derive(Clone)]
pub struct Checkout {
    payments: Arc<dyn PaymentStore>,
}

impl Checkout {
    pub fn new(payments: Arc<dyn PaymentStore>) -> Self {
        Self { payments }
    }

    pub async fn checkout(&self, cart: &Cart, request: PaymentRequest) -> Result<Payment> {
        let guard = cart.lock().await;

        let mut state = CheckoutState::Received(request);
        let pending = loop {
            state = match state {
                CheckoutState::Accepted(payment) => break payment,
                CheckoutState::Rejected(err) => {
                    tracing::info!(cart = %guard.cart_id(), reason = %err, "payment rejected");
                    return Err(err);
                }
                state => {
                    let next = state.advance();
                    tracing::debug!(cart = %guard.cart_id(), state = next.name(), "checkout advanced");
                    next
                }
            };
        };

        let payment = self.payments.insert(pending.complete()).await.inspect_err(|err| {
            tracing::error!(cart = %guard.cart_id(), error = %err, "failed to persist payment");
        })?;

        if let Err(err) = guard.clear().await {
            tracing::error!(
                cart = %guard.cart_id(),
                payment_id = payment.id,
                error = %err,
                "failed to clear cart, rolling back payment"
            );
            if let Err(undo) = self.payments.remove(payment.id).await {
                tracing::error!(payment_id = payment.id, error = %undo, "payment rollback failed");
            }
            return Err(err);
        }

        tracing::info!(
            cart = %guard.cart_id(),
            payment_id = payment.id,
            amount = %payment.amount.value(),
            "checkout completed"
        );
        Ok(payment)
    }

    pub async fn history(&self) -> Result<Vec<Payment>> {
        self.payments.all().await
    }
}
