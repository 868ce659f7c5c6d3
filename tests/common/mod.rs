use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

pub const VALID_CARD: &str = "4242 4242 4242 4242";

pub fn payment(amount: &str, card_number: &str, expiry_date: &str, cvv: &str) -> Value {
    json!({
        "op": "create_payment",
        "amount": amount,
        "cardNumber": card_number,
        "cardHolder": "Test User",
        "expiryDate": expiry_date,
        "cvv": cvv,
    })
}

pub fn write_requests(path: &Path, requests: &[Value]) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(path)?);
    for request in requests {
        writeln!(out, "{request}")?;
    }
    out.flush()
}

/// Parses the binary's stdout into one JSON value per response line.
pub fn responses(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("response is not JSON"))
        .collect()
}

/// Writes a random shopping session against the demo catalog: cart adds
/// across `sessions` sessions, with a payment attempt after every tenth
/// request. Roughly a third of payments carry a bad CVV.
///
/// Returns the number of requests written.
pub fn generate_session_traffic(path: &Path, requests: usize, sessions: u32) -> Result<usize, Error> {
    let mut rng = rand::thread_rng();
    let cvvs = ["123", "4567", "12", "abc"];
    let mut out = BufWriter::new(File::create(path)?);

    for i in 1..=requests {
        let session = format!("s{}", rng.gen_range(1..=sessions));
        let request = if i % 10 == 0 {
            let mut request = payment("10.00", VALID_CARD, "12/25", cvvs.choose(&mut rng).unwrap_or(&"123"));
            request["session"] = json!(session);
            request
        } else {
            json!({
                "op": "add_cart_item",
                "session": session,
                "productId": rng.gen_range(1..=4),
                "quantity": rng.gen_range(1..=3),
            })
        };
        writeln!(out, "{request}")?;
    }
    out.flush()?;
    Ok(requests)
}
