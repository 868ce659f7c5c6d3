use crate::error::ShopError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A strictly positive payment amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, ShopError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ShopError::validation("amount", "payment amount is invalid"))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ShopError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Payment lifecycle. The only transition is `Pending -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

/// Raw payment fields as submitted by a client. Missing fields decode as
/// empty so they fail validation with a field-specific message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
}

/// A payment that passed validation and has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub amount: Amount,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
    pub status: PaymentStatus,
}

impl NewPayment {
    /// Moves the payment to `Completed`. There is no way back.
    pub fn complete(mut self) -> Self {
        self.status = PaymentStatus::Completed;
        self
    }

    pub fn with_id(self, id: u32) -> Payment {
        Payment {
            id,
            amount: self.amount,
            card_number: self.card_number,
            card_holder: self.card_holder,
            expiry_date: self.expiry_date,
            cvv: self.cvv,
            status: self.status,
        }
    }
}

/// A persisted payment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: u32,
    pub amount: Amount,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
    pub status: PaymentStatus,
}
