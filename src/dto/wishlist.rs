use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Medicine;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToWishlistRequest {
    pub medicine_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistMedicines {
    pub items: Vec<Medicine>,
}
