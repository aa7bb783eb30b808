use sea_orm::{ColumnTrait, Condition, DatabaseConnection};
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};

use crate::{
    dto::users::DashboardStats,
    entity::{
        Medicines, Orders, Pharmacies, Reviews, Users,
        users::Column as UserCol,
    },
    error::AppResult,
    repository::{Filtered, Repository},
};

#[derive(Clone)]
pub struct AdminService {
    users: Repository<Users>,
    medicines: Repository<Medicines>,
    orders: Repository<Orders>,
    pharmacies: Repository<Pharmacies>,
    reviews: Repository<Reviews>,
}

impl AdminService {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            users: Repository::new(conn.clone()),
            medicines: Repository::new(conn.clone()),
            orders: Repository::new(conn.clone()),
            pharmacies: Repository::new(conn.clone()),
            reviews: Repository::new(conn),
        }
    }

    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            users: self.users.count_all().await?,
            medicines: self.medicines.count_all().await?,
            orders: self.orders.count_all().await?,
            pharmacies: self.pharmacies.count_all().await?,
            reviews: self.reviews.count_all().await?,
        })
    }

    pub async fn list_users(
        &self,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> AppResult<Filtered<crate::entity::users::Model>> {
        let mut filter = Condition::all();
        if let Some(term) = search.filter(|s| !s.trim().is_empty()) {
            let pattern = format!("%{}%", term.trim());
            filter = filter.add(
                Condition::any()
                    .add(Expr::col(UserCol::Name).ilike(pattern.clone()))
                    .add(Expr::col(UserCol::Email).ilike(pattern)),
            );
        }
        Ok(self.users.find_all_filtered(filter, limit, page).await?)
    }
}
