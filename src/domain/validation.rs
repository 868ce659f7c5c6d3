//! Payment field checks.
//!
//! Rules run in a fixed order and the first violation is returned, so a given
//! payload always produces the same message.

use super::payment::{Amount, NewPayment, PaymentRequest, PaymentStatus};
use crate::error::ShopError;

const CARD_NUMBER_DIGITS: usize = 16;

/// Validates a payment request and returns the normalized pending payment.
///
/// The card number is stored with spaces stripped. The expiry year is not
/// bounded and a date in the past is accepted.
pub fn validate_payment(request: &PaymentRequest) -> Result<NewPayment, ShopError> {
    let card_number = validate_card_number(&request.card_number)?;

    if request.card_holder.trim().is_empty() {
        return Err(ShopError::validation(
            "cardHolder",
            "card holder is required",
        ));
    }

    if request.expiry_date.trim().is_empty() {
        return Err(ShopError::validation(
            "expiryDate",
            "expiry date is required",
        ));
    }
    if !is_valid_expiry_date(&request.expiry_date) {
        return Err(ShopError::validation(
            "expiryDate",
            "invalid expiry date format",
        ));
    }

    if request.cvv.trim().is_empty() {
        return Err(ShopError::validation("cvv", "CVV is required"));
    }
    if !(3..=4).contains(&request.cvv.len()) || !is_numeric(&request.cvv) {
        return Err(ShopError::validation("cvv", "invalid CVV format"));
    }

    let amount = Amount::new(request.amount)?;

    Ok(NewPayment {
        amount,
        card_number,
        card_holder: request.card_holder.clone(),
        expiry_date: request.expiry_date.clone(),
        cvv: request.cvv.clone(),
        status: PaymentStatus::Pending,
    })
}

fn validate_card_number(raw: &str) -> Result<String, ShopError> {
    if raw.trim().is_empty() {
        return Err(ShopError::validation(
            "cardNumber",
            "card number is required",
        ));
    }
    let digits: String = raw.chars().filter(|c| *c != ' ').collect();
    if digits.len() != CARD_NUMBER_DIGITS || !is_numeric(&digits) {
        return Err(ShopError::validation(
            "cardNumber",
            "invalid card number format",
        ));
    }
    Ok(digits)
}

/// True when every character is an ASCII decimal digit. Empty input passes;
/// callers check presence first.
pub fn is_numeric(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Checks the `MM/YY` shape with a month between 1 and 12.
pub fn is_valid_expiry_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    if bytes.len() != 5 || bytes.get(2) != Some(&b'/') {
        return false;
    }
    let (Some(month), Some(year)) = (date.get(..2), date.get(3..)) else {
        return false;
    };
    if !is_numeric(month) || !is_numeric(year) {
        return false;
    }
    month
        .parse::<u8>()
        .is_ok_and(|month| (1..=12).contains(&month))
}
