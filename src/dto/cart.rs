use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Cart, Medicine};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub medicine_id: Uuid,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    /// 0 removes the line item.
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLine {
    pub medicine: Medicine,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartWithItems {
    pub cart: Cart,
    pub items: Vec<CartLine>,
    /// Sum of price x quantity, formatted to two decimals.
    pub total_price: String,
    /// Number of distinct line items, not summed quantity.
    pub item_count: usize,
}
