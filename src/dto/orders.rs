use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Medicine, Order, OrderItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub shipping_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
}

/// Partial update of the forward-moving fields only.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderLine {
    pub item: OrderItem,
    pub medicine: Medicine,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderWithItems>,
}
