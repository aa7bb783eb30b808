use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Medicine, Pharmacy};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePharmacyRequest {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePharmacyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PharmacyList {
    pub items: Vec<Pharmacy>,
}

/// Upsert payload for per-pharmacy price/stock of a medicine.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPharmacyMedicineRequest {
    /// Integer cents.
    pub price: i64,
    pub stock_quantity: i32,
    pub is_available: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PharmacyStockLine {
    pub medicine: Medicine,
    pub price: i64,
    pub stock_quantity: i32,
    pub is_available: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PharmacyStockList {
    pub items: Vec<PharmacyStockLine>,
}
