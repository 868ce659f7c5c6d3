//! Request and response payloads for the routing layer.
//!
//! A transport wrapper decodes a [`Request`], passes it to [`handle`], and
//! maps the returned [`Status`] onto its own codes.

use crate::application::shop::Shop;
use crate::domain::cart::CartLine;
use crate::domain::payment::{Payment, PaymentRequest};
use crate::domain::product::{NewProduct, Product};
use crate::error::{Result, ShopError, Status};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    ListProducts {
        min_price: Option<Decimal>,
    },
    GetProduct {
        id: u32,
    },
    CreateProduct {
        name: String,
        #[serde(default)]
        description: String,
        price: Decimal,
        #[serde(default)]
        image_url: String,
    },
    UpdateProduct {
        id: u32,
        name: String,
        #[serde(default)]
        description: String,
        price: Decimal,
        #[serde(default)]
        image_url: String,
    },
    DeleteProduct {
        id: u32,
    },
    ListCart {
        session: Option<String>,
    },
    AddCartItem {
        session: Option<String>,
        product_id: u32,
        #[serde(default)]
        quantity: i64,
    },
    ListPayments,
    CreatePayment {
        session: Option<String>,
        #[serde(default)]
        amount: Decimal,
        #[serde(default)]
        card_number: String,
        #[serde(default)]
        card_holder: String,
        #[serde(default)]
        expiry_date: String,
        #[serde(default)]
        cvv: String,
    },
}

impl Request {
    /// Decodes one JSON request. Any decoding problem is a client error.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|err| {
            tracing::warn!(error = %err, "malformed request payload");
            ShopError::validation("payload", "invalid request payload")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Product(Product),
    Products(Vec<Product>),
    CartLine(CartLine),
    CartLines(Vec<CartLine>),
    Payment(Payment),
    Payments(Vec<Payment>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl Response {
    pub fn success(body: Body) -> Self {
        Self {
            status: Status::Success,
            body: Some(body),
            error: None,
            field: None,
        }
    }

    /// Builds the client-facing failure. Server errors are logged here and
    /// reported without detail.
    pub fn failure(err: &ShopError) -> Self {
        let status = err.status();
        if status == Status::ServerError {
            tracing::error!(error = %err, "request failed");
        }
        let field = match err {
            ShopError::Validation { field, .. } => Some(*field),
            _ => None,
        };
        Self {
            status,
            body: None,
            error: Some(err.public_message()),
            field,
        }
    }
}

impl From<Result<Body>> for Response {
    fn from(result: Result<Body>) -> Self {
        match result {
            Ok(body) => Self::success(body),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Runs one request against the shop.
pub async fn handle(shop: &Shop, request: Request) -> Response {
    dispatch(shop, request).await.into()
}

async fn dispatch(shop: &Shop, request: Request) -> Result<Body> {
    match request {
        Request::ListProducts { min_price } => {
            shop.list_products(min_price).await.map(Body::Products)
        }
        Request::GetProduct { id } => shop.get_product(id).await.map(Body::Product),
        Request::CreateProduct {
            name,
            description,
            price,
            image_url,
        } => {
            let product = NewProduct::new(name, description, price, image_url)?;
            shop.create_product(product).await.map(Body::Product)
        }
        Request::UpdateProduct {
            id,
            name,
            description,
            price,
            image_url,
        } => {
            let product = NewProduct::new(name, description, price, image_url)?;
            shop.update_product(id, product).await.map(Body::Product)
        }
        Request::DeleteProduct { id } => shop.delete_product(id).await.map(Body::Product),
        Request::ListCart { session } => shop
            .list_cart(session.as_deref())
            .await
            .map(Body::CartLines),
        Request::AddCartItem {
            session,
            product_id,
            quantity,
        } => shop
            .add_to_cart(session.as_deref(), product_id, quantity)
            .await
            .map(Body::CartLine),
        Request::ListPayments => shop.list_payments().await.map(Body::Payments),
        Request::CreatePayment {
            session,
            amount,
            card_number,
            card_holder,
            expiry_date,
            cvv,
        } => {
            let request = PaymentRequest {
                amount,
                card_number,
                card_holder,
                expiry_date,
                cvv,
            };
            shop.create_payment(session.as_deref(), request)
                .await
                .map(Body::Payment)
        }
    }
}
