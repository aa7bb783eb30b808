use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;

/// Render integer cents as a 2-decimal amount, e.g. 2550 -> "25.50".
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Forward-only lifecycle: pending -> processing -> shipped -> delivered,
    /// with cancellation possible until the order has shipped. Staying in the
    /// same state is a no-op, not a violation.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        ) || self == next
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((self, next), (Unpaid, Paid) | (Paid, Refunded)) || self == next
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status '{other}'")),
        }
    }
}

/// Public user shape; the password hash and refresh token never leave the
/// service layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub image: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::users::Model> for User {
    fn from(model: entity::users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            image: model.image,
            gender: model.gender,
            phone: model.phone,
            address: model.address,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pharmacy {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::pharmacies::Model> for Pharmacy {
    fn from(model: entity::pharmacies::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            address: model.address,
            phone: model.phone,
            email: model.email,
            image: model.image,
            is_active: model.is_active,
            owner_id: model.owner_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::categories::Model> for Category {
    fn from(model: entity::categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Integer cents.
    pub price: i64,
    pub image: Option<String>,
    pub substance: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::medicines::Model> for Medicine {
    fn from(model: entity::medicines::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image: model.image,
            substance: model.substance,
            category_id: model.category_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::carts::Model> for Cart {
    fn from(model: entity::carts::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub cart_id: Uuid,
    pub medicine_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<entity::cart_items::Model> for CartItem {
    fn from(model: entity::cart_items::Model) -> Self {
        Self {
            cart_id: model.cart_id,
            medicine_id: model.medicine_id,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PharmacyMedicine {
    pub pharmacy_id: Uuid,
    pub medicine_id: Uuid,
    pub price: i64,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::pharmacy_medicines::Model> for PharmacyMedicine {
    fn from(model: entity::pharmacy_medicines::Model) -> Self {
        Self {
            pharmacy_id: model.pharmacy_id,
            medicine_id: model.medicine_id,
            price: model.price,
            stock_quantity: model.stock_quantity,
            is_available: model.is_available,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    /// Integer cents, frozen at checkout.
    pub total_amount: i64,
    pub shipping_address: String,
    pub payment_method: String,
    pub payment_status: String,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::orders::Model> for Order {
    fn from(model: entity::orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status,
            total_amount: model.total_amount,
            shipping_address: model.shipping_address,
            payment_method: model.payment_method,
            payment_status: model.payment_status,
            tracking_number: model.tracking_number,
            notes: model.notes,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub order_id: Uuid,
    pub medicine_id: Uuid,
    pub quantity: i32,
    /// Price at time of purchase, in integer cents.
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl From<entity::order_items::Model> for OrderItem {
    fn from(model: entity::order_items::Model) -> Self {
        Self {
            order_id: model.order_id,
            medicine_id: model.medicine_id,
            quantity: model.quantity,
            price: model.price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pharmacy_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::reviews::Model> for Review {
    fn from(model: entity::reviews::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            pharmacy_id: model.pharmacy_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WishlistEntry {
    pub user_id: Uuid,
    pub medicine_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<entity::wishlist::Model> for WishlistEntry {
    fn from(model: entity::wishlist::Model) -> Self {
        Self {
            user_id: model.user_id,
            medicine_id: model.medicine_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_format_to_two_decimals() {
        assert_eq!(format_cents(2550), "25.50");
        assert_eq!(format_cents(1000), "10.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
    }

    #[test]
    fn order_status_moves_forward_only() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Processing.can_transition_to(Cancelled));

        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Shipped.can_transition_to(Processing));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn same_status_is_a_noop_transition() {
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Shipped));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Paid));
    }

    #[test]
    fn payment_status_never_reverts() {
        use PaymentStatus::*;
        assert!(Unpaid.can_transition_to(Paid));
        assert!(Paid.can_transition_to(Refunded));
        assert!(!Paid.can_transition_to(Unpaid));
        assert!(!Refunded.can_transition_to(Paid));
        assert!(!Unpaid.can_transition_to(Refunded));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for s in ["pending", "processing", "shipped", "delivered", "cancelled"] {
            assert_eq!(s.parse::<OrderStatus>().unwrap().as_str(), s);
        }
        assert!("unknown".parse::<OrderStatus>().is_err());
    }
}
