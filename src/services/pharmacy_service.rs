use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order as SortOrder,
    QueryFilter, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::{
    dto::pharmacies::{
        CreatePharmacyRequest, PharmacyStockLine, SetPharmacyMedicineRequest,
        UpdatePharmacyRequest,
    },
    entity::{
        Medicines, PharmacyMedicines,
        pharmacies::{
            ActiveModel as PharmacyActive, Column as PharmacyCol, Entity as Pharmacies, Model,
            Relation as PharmacyRel,
        },
        pharmacy_medicines::{ActiveModel as StockActive, Column as StockCol},
        users::Column as UserCol,
    },
    error::{AppError, AppResult},
    repository::{Filtered, Paginated, Repository},
};

#[derive(Clone)]
pub struct PharmacyService {
    pharmacies: Repository<Pharmacies>,
    stock: Repository<PharmacyMedicines>,
}

impl PharmacyService {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            pharmacies: Repository::new(conn.clone()),
            stock: Repository::new(conn),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Model> {
        self.pharmacies
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Pharmacy"))
    }

    pub async fn list(&self, page: u64, limit: u64) -> AppResult<Paginated<Model>> {
        Ok(self.pharmacies.find_all_paginated(page, limit).await?)
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Model>> {
        Ok(self
            .pharmacies
            .find_many_ordered(
                PharmacyCol::OwnerId.eq(owner_id),
                PharmacyCol::CreatedAt,
                SortOrder::Desc,
            )
            .await?)
    }

    /// Pharmacies whose owner has the given phone number. The join is built
    /// here, typed against the schema, and handed to the generic paginator.
    pub async fn find_by_owner_phone(
        &self,
        phone: &str,
        limit: u64,
        page: u64,
    ) -> AppResult<Filtered<Model>> {
        let select = Pharmacies::find()
            .join(JoinType::InnerJoin, PharmacyRel::Owner.def())
            .filter(UserCol::Phone.eq(phone));
        Ok(self.pharmacies.find_all_from(select, limit, page).await?)
    }

    pub async fn create(
        &self,
        owner_id: Option<Uuid>,
        payload: CreatePharmacyRequest,
    ) -> AppResult<Model> {
        let active = PharmacyActive {
            id: Set(Uuid::new_v4()),
            name: Set(payload.name),
            description: Set(payload.description),
            address: Set(payload.address),
            phone: Set(payload.phone),
            email: Set(payload.email),
            image: Set(payload.image),
            is_active: Set(true),
            owner_id: Set(owner_id),
            created_at: NotSet,
            updated_at: NotSet,
        };
        Ok(self.pharmacies.create(active).await?)
    }

    pub async fn update(&self, id: Uuid, payload: UpdatePharmacyRequest) -> AppResult<Model> {
        self.find_by_id(id).await?;

        let mut patch = PharmacyActive {
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        if let Some(name) = payload.name {
            patch.name = Set(name);
        }
        if let Some(description) = payload.description {
            patch.description = Set(Some(description));
        }
        if let Some(address) = payload.address {
            patch.address = Set(address);
        }
        if let Some(phone) = payload.phone {
            patch.phone = Set(phone);
        }
        if let Some(email) = payload.email {
            patch.email = Set(email);
        }
        if let Some(image) = payload.image {
            patch.image = Set(Some(image));
        }

        let updated = self.pharmacies.update_by_id(id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Pharmacy"))
    }

    pub async fn toggle_status(&self, id: Uuid) -> AppResult<Model> {
        let pharmacy = self.find_by_id(id).await?;
        let patch = PharmacyActive {
            is_active: Set(!pharmacy.is_active),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        let updated = self.pharmacies.update_by_id(id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Pharmacy"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.find_by_id(id).await?;
        self.pharmacies.delete_by_id(id).await?;
        Ok(())
    }

    /// Upsert of the per-pharmacy price/stock row for a medicine.
    pub async fn set_medicine(
        &self,
        pharmacy_id: Uuid,
        medicine_id: Uuid,
        payload: SetPharmacyMedicineRequest,
    ) -> AppResult<crate::entity::pharmacy_medicines::Model> {
        self.find_by_id(pharmacy_id).await?;

        let active = StockActive {
            pharmacy_id: Set(pharmacy_id),
            medicine_id: Set(medicine_id),
            price: Set(payload.price),
            stock_quantity: Set(payload.stock_quantity),
            is_available: Set(payload.is_available.unwrap_or(true)),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let on_conflict = OnConflict::columns([StockCol::PharmacyId, StockCol::MedicineId])
            .update_columns([StockCol::Price, StockCol::StockQuantity, StockCol::IsAvailable])
            .value(StockCol::UpdatedAt, Expr::current_timestamp())
            .to_owned();

        let row = PharmacyMedicines::insert(active)
            .on_conflict(on_conflict)
            .exec_with_returning(self.stock.conn())
            .await?;
        Ok(row)
    }

    pub async fn list_stock(&self, pharmacy_id: Uuid) -> AppResult<Vec<PharmacyStockLine>> {
        self.find_by_id(pharmacy_id).await?;

        let rows = PharmacyMedicines::find()
            .filter(StockCol::PharmacyId.eq(pharmacy_id))
            .find_also_related(Medicines)
            .all(self.stock.conn())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(stock, medicine)| {
                medicine.map(|m| PharmacyStockLine {
                    medicine: m.into(),
                    price: stock.price,
                    stock_quantity: stock.stock_quantity,
                    is_available: stock.is_available,
                })
            })
            .collect())
    }
}
