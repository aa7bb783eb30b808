use sea_orm::ActiveValue::NotSet;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    dto::categories::{CreateCategoryRequest, UpdateCategoryRequest},
    entity::categories::{ActiveModel as CategoryActive, Entity as Categories, Model},
    error::{AppError, AppResult},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoryService {
    categories: Repository<Categories>,
}

impl CategoryService {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            categories: Repository::new(conn),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Model> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Category"))
    }

    pub async fn list(&self, page: u64, limit: u64) -> AppResult<crate::repository::Paginated<Model>> {
        Ok(self.categories.find_all_paginated(page, limit).await?)
    }

    pub async fn create(&self, payload: CreateCategoryRequest) -> AppResult<Model> {
        let active = CategoryActive {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name),
            description: Set(payload.description),
            created_at: NotSet,
        };
        Ok(self.categories.create(active).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCategoryRequest) -> AppResult<Model> {
        let current = self.find_by_id(id).await?;
        if payload.name.is_none() && payload.description.is_none() {
            return Ok(current);
        }

        let mut patch = CategoryActive::default();
        if let Some(name) = payload.name {
            patch.name = Set(name);
        }
        if let Some(description) = payload.description {
            patch.description = Set(Some(description));
        }

        let updated = self.categories.update_by_id(id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Category"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.find_by_id(id).await?;
        self.categories.delete_by_id(id).await?;
        Ok(())
    }
}
