use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{Condition, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::{
    dto::search::{SearchHit, SearchResults},
    entity::{
        Medicines, Pharmacies,
        medicines::Column as MedicineCol,
        pharmacies::Column as PharmacyCol,
    },
    error::AppResult,
    repository::Repository,
};

const SEARCH_LIMIT: u64 = 10;

#[derive(Clone)]
pub struct SearchService {
    medicines: Repository<Medicines>,
    pharmacies: Repository<Pharmacies>,
}

impl SearchService {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            medicines: Repository::new(conn.clone()),
            pharmacies: Repository::new(conn),
        }
    }

    /// Lightweight typeahead over medicines and pharmacies. Only the columns
    /// the result cards need are selected.
    pub async fn search(&self, term: &str) -> AppResult<SearchResults> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(SearchResults {
                medicines: Vec::new(),
                pharmacies: Vec::new(),
            });
        }
        let pattern = format!("%{term}%");

        let medicine_select = Medicines::find()
            .select_only()
            .column(MedicineCol::Id)
            .column(MedicineCol::Name)
            .column(MedicineCol::Image)
            .filter(
                Condition::any()
                    .add(Expr::col(MedicineCol::Name).ilike(pattern.clone()))
                    .add(Expr::col(MedicineCol::Substance).ilike(pattern.clone())),
            );
        let medicines: Vec<SearchHit> = self
            .medicines
            .find_many_projected(medicine_select, SEARCH_LIMIT)
            .await?;

        let pharmacy_select = Pharmacies::find()
            .select_only()
            .column(PharmacyCol::Id)
            .column(PharmacyCol::Name)
            .column(PharmacyCol::Image)
            .filter(
                Condition::any()
                    .add(Expr::col(PharmacyCol::Name).ilike(pattern.clone()))
                    .add(Expr::col(PharmacyCol::Address).ilike(pattern)),
            );
        let pharmacies: Vec<SearchHit> = self
            .pharmacies
            .find_many_projected(pharmacy_select, SEARCH_LIMIT)
            .await?;

        Ok(SearchResults {
            medicines,
            pharmacies,
        })
    }
}
