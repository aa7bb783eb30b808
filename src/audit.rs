use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Mutations worth a durable trail. Reads are never audited.
#[derive(Debug, Clone, Copy)]
pub enum AuditAction {
    Signup,
    ChangePassword,
    CartAdd,
    Checkout,
    OrderStatusUpdate,
    MedicineCreate,
    MedicineDelete,
    PharmacyCreate,
    ReviewCreate,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Signup => "signup",
            AuditAction::ChangePassword => "change_password",
            AuditAction::CartAdd => "cart_add",
            AuditAction::Checkout => "checkout",
            AuditAction::OrderStatusUpdate => "order_status_update",
            AuditAction::MedicineCreate => "medicine_create",
            AuditAction::MedicineDelete => "medicine_delete",
            AuditAction::PharmacyCreate => "pharmacy_create",
            AuditAction::ReviewCreate => "review_create",
        }
    }

    fn resource(self) -> &'static str {
        match self {
            AuditAction::Signup | AuditAction::ChangePassword => "users",
            AuditAction::CartAdd => "cart_items",
            AuditAction::Checkout | AuditAction::OrderStatusUpdate => "orders",
            AuditAction::MedicineCreate | AuditAction::MedicineDelete => "medicines",
            AuditAction::PharmacyCreate => "pharmacies",
            AuditAction::ReviewCreate => "reviews",
        }
    }
}

async fn insert_entry(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: AuditAction,
    metadata: Option<Value>,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action.as_str())
    .bind(action.resource())
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// Best-effort: an audit failure must never fail the request it describes.
pub async fn record(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: AuditAction,
    metadata: Option<Value>,
) {
    if let Err(err) = insert_entry(pool, user_id, action, metadata).await {
        tracing::warn!(error = %err, action = action.as_str(), "audit log failed");
    }
}
