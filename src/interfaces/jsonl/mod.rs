//! JSON-lines framing: one request in, one response out, per line.

pub mod request_reader;
pub mod response_writer;

use crate::application::shop::Shop;
use crate::error::{Result, ShopError};
use crate::interfaces::api::{self, Response};
use request_reader::RequestReader;
use response_writer::ResponseWriter;
use std::io::{BufRead, Write};

/// Answers every request from `reader`, in order, on `writer`.
///
/// Undecodable lines get a client-error response and processing continues.
/// Only I/O failures on the streams themselves stop the loop. Returns the
/// number of responses written.
pub async fn serve<R: BufRead, W: Write>(
    shop: &Shop,
    reader: RequestReader<R>,
    writer: &mut ResponseWriter<W>,
) -> Result<usize> {
    let mut handled = 0;
    for request in reader.requests() {
        let response = match request {
            Ok(request) => api::handle(shop, request).await,
            Err(ShopError::Io(err)) => return Err(ShopError::Io(err)),
            Err(err) => Response::failure(&err),
        };
        writer.write(&response)?;
        handled += 1;
    }
    writer.flush()?;
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CartScope;
    use crate::infrastructure::in_memory::{
        InMemoryCartStore, InMemoryPaymentStore, InMemoryProductStore,
    };
    use crate::seed::seed_demo_catalog;

    #[tokio::test]
    async fn test_serve_checkout_script() {
        let shop = Shop::new(
            Box::new(InMemoryProductStore::new()),
            Box::new(InMemoryCartStore::new()),
            Box::new(InMemoryPaymentStore::new()),
            CartScope::Shared,
        );
        seed_demo_catalog(shop.catalog()).await.unwrap();

        let script = r#"{"op":"add_cart_item","productId":2,"quantity":1}
garbage
{"op":"create_payment","amount":1999.99,"cardNumber":"4242 4242 4242 4242","cardHolder":"Test User","expiryDate":"12/25","cvv":"123"}
{"op":"list_cart"}
"#;
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        let handled = serve(&shop, RequestReader::new(script.as_bytes()), &mut writer)
            .await
            .unwrap();
        assert_eq!(handled, 4);

        let responses: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses[0]["status"], "success");
        assert_eq!(responses[1]["status"], "client_error");
        assert_eq!(responses[2]["body"]["status"], "completed");
        assert_eq!(responses[3]["body"], serde_json::json!([]));
    }
}
