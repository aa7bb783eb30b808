use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lightweight projection used by the catalog search endpoint.
#[derive(Debug, FromQueryResult, Serialize, ToSchema)]
pub struct SearchHit {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    pub pharmacies: Vec<SearchHit>,
    pub medicines: Vec<SearchHit>,
}
