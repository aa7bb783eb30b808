use sea_orm::entity::prelude::*;

/// Per-pharmacy price, stock and availability for a medicine.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pharmacy_medicines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pharmacy_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub medicine_id: Uuid,
    pub price: i64,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pharmacies::Entity",
        from = "Column::PharmacyId",
        to = "super::pharmacies::Column::Id"
    )]
    Pharmacy,
    #[sea_orm(
        belongs_to = "super::medicines::Entity",
        from = "Column::MedicineId",
        to = "super::medicines::Column::Id"
    )]
    Medicine,
}

impl Related<super::medicines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medicine.def()
    }
}

impl Related<super::pharmacies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pharmacy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
