use sea_orm::entity::prelude::*;

/// Order line item. `price` is the medicine price frozen at order time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub medicine_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::medicines::Entity",
        from = "Column::MedicineId",
        to = "super::medicines::Column::Id"
    )]
    Medicine,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::medicines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medicine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
