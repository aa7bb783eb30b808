use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Medicine;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMedicineRequest {
    pub name: String,
    pub description: Option<String>,
    /// Integer cents.
    pub price: i64,
    pub image: Option<String>,
    pub substance: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMedicineRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub substance: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MedicineList {
    pub items: Vec<Medicine>,
}
