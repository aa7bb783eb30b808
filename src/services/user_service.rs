use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    dto::users::UpdateProfileRequest,
    entity::{Users, users::ActiveModel as UserActive},
    error::{AppError, AppResult},
    repository::Repository,
};

#[derive(Clone)]
pub struct UserService {
    users: Repository<Users>,
}

impl UserService {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            users: Repository::new(conn),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<crate::entity::users::Model> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("User"))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> AppResult<crate::entity::users::Model> {
        self.find_by_id(id).await?;

        let mut patch = UserActive {
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        if let Some(name) = req.name {
            patch.name = Set(name);
        }
        if let Some(gender) = req.gender {
            patch.gender = Set(Some(gender));
        }
        if let Some(phone) = req.phone {
            patch.phone = Set(Some(phone));
        }
        if let Some(address) = req.address {
            patch.address = Set(Some(address));
        }
        if let Some(image) = req.image {
            patch.image = Set(Some(image));
        }

        self.users
            .update_by_id(id, patch)
            .await?
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("User"))
    }
}
