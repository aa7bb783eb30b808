use sea_orm::ActiveValue::NotSet;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    entity::{
        Medicines, Wishlist,
        wishlist::{ActiveModel as WishlistActive, Column},
    },
    error::{AppError, AppResult},
    repository::Repository,
    services::medicine_service::MedicineService,
};

#[derive(Clone)]
pub struct WishlistService {
    wishlist: Repository<Wishlist>,
    medicines: MedicineService,
}

impl WishlistService {
    pub fn new(conn: DatabaseConnection, medicines: MedicineService) -> Self {
        Self {
            wishlist: Repository::new(conn),
            medicines,
        }
    }

    pub async fn get_wishlist(
        &self,
        user_id: Uuid,
    ) -> AppResult<Vec<crate::entity::medicines::Model>> {
        let rows = Wishlist::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Medicines)
            .all(self.wishlist.conn())
            .await?;

        Ok(rows.into_iter().filter_map(|(_, medicine)| medicine).collect())
    }

    /// Idempotent: adding a medicine already on the list returns the
    /// existing row.
    pub async fn add_to_wishlist(
        &self,
        user_id: Uuid,
        medicine_id: Uuid,
    ) -> AppResult<crate::entity::wishlist::Model> {
        self.medicines.find_by_id(medicine_id).await?;

        let pair = Condition::all()
            .add(Column::UserId.eq(user_id))
            .add(Column::MedicineId.eq(medicine_id));
        if let Some(existing) = self.wishlist.find_first(pair).await? {
            return Ok(existing);
        }

        let active = WishlistActive {
            user_id: Set(user_id),
            medicine_id: Set(medicine_id),
            created_at: NotSet,
        };
        Ok(self.wishlist.create(active).await?)
    }

    pub async fn remove_from_wishlist(&self, user_id: Uuid, medicine_id: Uuid) -> AppResult<()> {
        let deleted = self
            .wishlist
            .delete(
                Condition::all()
                    .add(Column::UserId.eq(user_id))
                    .add(Column::MedicineId.eq(medicine_id)),
            )
            .await?;

        if deleted.is_empty() {
            return Err(AppError::NotFound("Wishlist item"));
        }
        Ok(())
    }
}
