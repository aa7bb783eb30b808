use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        (page, per_page)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MedicineQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PharmacyQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Exact match against the owning user's phone number.
    pub owner_phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchQuery {
    pub q: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        let p = Pagination {
            page: None,
            per_page: None,
        };
        assert_eq!(p.normalize(), (1, 20));

        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100));
    }
}
