use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, extension::postgres::PgExpr};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Order as SortOrder, Set};
use uuid::Uuid;

use crate::{
    dto::medicines::{CreateMedicineRequest, UpdateMedicineRequest},
    entity::medicines::{ActiveModel as MedicineActive, Column, Entity as Medicines, Model},
    error::{AppError, AppResult},
    repository::{Filtered, Repository},
    services::category_service::CategoryService,
};

#[derive(Clone)]
pub struct MedicineService {
    medicines: Repository<Medicines>,
    categories: CategoryService,
}

impl MedicineService {
    pub fn new(conn: DatabaseConnection, categories: CategoryService) -> Self {
        Self {
            medicines: Repository::new(conn),
            categories,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Model> {
        self.medicines
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Medicine"))
    }

    /// Catalog listing; the count is scoped by the same search/category
    /// predicate as the page.
    pub async fn list(
        &self,
        q: Option<&str>,
        category_id: Option<Uuid>,
        limit: u64,
        page: u64,
    ) -> AppResult<Filtered<Model>> {
        let mut condition = Condition::all();
        if let Some(q) = q.filter(|q| !q.is_empty()) {
            let pattern = format!("%{q}%");
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(Column::Substance).ilike(pattern)),
            );
        }
        if let Some(category_id) = category_id {
            condition = condition.add(Column::CategoryId.eq(category_id));
        }

        Ok(self
            .medicines
            .find_all_filtered(condition, limit, page)
            .await?)
    }

    pub async fn find_by_category(&self, category_id: Uuid) -> AppResult<Vec<Model>> {
        self.categories.find_by_id(category_id).await?;
        Ok(self
            .medicines
            .find_many_ordered(
                Column::CategoryId.eq(category_id),
                Column::CreatedAt,
                SortOrder::Desc,
            )
            .await?)
    }

    pub async fn create(&self, payload: CreateMedicineRequest) -> AppResult<Model> {
        if let Some(category_id) = payload.category_id {
            self.categories.find_by_id(category_id).await?;
        }
        let active = MedicineActive {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name),
            description: Set(payload.description),
            price: Set(payload.price),
            image: Set(payload.image),
            substance: Set(payload.substance),
            category_id: Set(payload.category_id),
            created_at: NotSet,
            updated_at: NotSet,
        };
        Ok(self.medicines.create(active).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateMedicineRequest) -> AppResult<Model> {
        self.find_by_id(id).await?;
        if let Some(category_id) = payload.category_id {
            self.categories.find_by_id(category_id).await?;
        }

        let mut patch = MedicineActive {
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        if let Some(name) = payload.name {
            patch.name = Set(name);
        }
        if let Some(description) = payload.description {
            patch.description = Set(Some(description));
        }
        if let Some(price) = payload.price {
            patch.price = Set(price);
        }
        if let Some(image) = payload.image {
            patch.image = Set(Some(image));
        }
        if let Some(substance) = payload.substance {
            patch.substance = Set(Some(substance));
        }
        if let Some(category_id) = payload.category_id {
            patch.category_id = Set(Some(category_id));
        }

        let updated = self.medicines.update_by_id(id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Medicine"))
    }

    /// Stores the already-uploaded image URL; blob storage itself lives
    /// outside this service.
    pub async fn update_image(&self, id: Uuid, image_url: String) -> AppResult<Model> {
        self.find_by_id(id).await?;
        let patch = MedicineActive {
            image: Set(Some(image_url)),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        let updated = self.medicines.update_by_id(id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Medicine"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.find_by_id(id).await?;
        self.medicines.delete_by_id(id).await?;
        Ok(())
    }
}
