use sea_orm::entity::prelude::*;

/// One review per (user, pharmacy) pair, enforced at the service layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub pharmacy_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::pharmacies::Entity",
        from = "Column::PharmacyId",
        to = "super::pharmacies::Column::Id"
    )]
    Pharmacy,
}

impl Related<super::pharmacies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pharmacy.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
