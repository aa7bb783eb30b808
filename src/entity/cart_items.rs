use sea_orm::entity::prelude::*;

/// Line item. The composite key keeps at most one row per (cart, medicine).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cart_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub medicine_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::carts::Entity",
        from = "Column::CartId",
        to = "super::carts::Column::Id"
    )]
    Cart,
    #[sea_orm(
        belongs_to = "super::medicines::Entity",
        from = "Column::MedicineId",
        to = "super::medicines::Column::Id"
    )]
    Medicine,
}

impl Related<super::carts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::medicines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medicine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
