use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::receipts::domain::Receipt;
use crate::receipts::service::ReceiptService;
use crate::receipts::store::InMemoryReceiptStore;
use crate::receipts::validation::parse_receipt;

pub(super) fn target_payload() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" }
        ],
        "total": "6.49"
    })
}

pub(super) fn corner_market_payload() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Coke Zero", "price": "1.25" },
            { "shortDescription": "Hersheys Bar", "price": "1.00" }
        ],
        "total": "6.75"
    })
}

pub(super) fn target_full_cart_payload() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

/// `base` with `field` replaced (or removed when `value` is `None`).
pub(super) fn with_field(mut base: Value, field: &str, value: Option<Value>) -> Value {
    let fields = base.as_object_mut().expect("fixture is an object");
    match value {
        Some(value) => {
            fields.insert(field.to_string(), value);
        }
        None => {
            fields.remove(field);
        }
    }
    base
}

pub(super) fn receipt(payload: &Value) -> Receipt {
    parse_receipt(payload).expect("fixture is a valid receipt")
}

pub(super) fn build_service() -> (ReceiptService<InMemoryReceiptStore>, Arc<InMemoryReceiptStore>) {
    let store = Arc::new(InMemoryReceiptStore::new());
    let service = ReceiptService::new(store.clone());
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
