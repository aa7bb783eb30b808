use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::{
    dto::cart::{CartLine, CartWithItems},
    entity::{
        CartItems, Medicines,
        cart_items::{ActiveModel as CartItemActive, Column as CartItemCol},
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts},
    },
    error::{AppError, AppResult},
    models::format_cents,
    repository::Repository,
    services::medicine_service::MedicineService,
};

/// Owns the one-cart-per-user lifecycle and line-item mutation.
#[derive(Clone)]
pub struct CartService {
    carts: Repository<Carts>,
    items: Repository<CartItems>,
    medicines: MedicineService,
}

impl CartService {
    pub fn new(conn: DatabaseConnection, medicines: MedicineService) -> Self {
        Self {
            carts: Repository::new(conn.clone()),
            items: Repository::new(conn),
            medicines,
        }
    }

    /// Idempotent lookup-or-create. Two concurrent calls for a fresh user can
    /// both miss the find; the unique index on `carts.user_id` rejects the
    /// second insert and the loser falls back to the winner's row.
    pub async fn find_or_create_cart(&self, user_id: Uuid) -> AppResult<crate::entity::carts::Model> {
        if let Some(cart) = self.carts.find_first(CartCol::UserId.eq(user_id)).await? {
            return Ok(cart);
        }

        let active = CartActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            is_active: Set(true),
            created_at: NotSet,
            updated_at: NotSet,
        };

        match self.carts.create(active).await {
            Ok(cart) => Ok(cart),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => self
                .carts
                .find_first(CartCol::UserId.eq(user_id))
                .await?
                .ok_or(AppError::NotFound("Cart")),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn get_cart_with_items(&self, user_id: Uuid) -> AppResult<CartWithItems> {
        let cart = self.find_or_create_cart(user_id).await?;

        let rows = CartItems::find()
            .filter(CartItemCol::CartId.eq(cart.id))
            .find_also_related(Medicines)
            .all(self.items.conn())
            .await?;

        let mut total_cents: i64 = 0;
        let mut items = Vec::with_capacity(rows.len());
        for (line, medicine) in rows {
            let Some(medicine) = medicine else {
                tracing::warn!(cart_id = %line.cart_id, medicine_id = %line.medicine_id,
                    "cart line without medicine row");
                continue;
            };
            total_cents += medicine.price * i64::from(line.quantity);
            items.push(CartLine {
                medicine: medicine.into(),
                quantity: line.quantity,
            });
        }

        let item_count = items.len();
        Ok(CartWithItems {
            cart: cart.into(),
            items,
            total_price: format_cents(total_cents),
            item_count,
        })
    }

    /// Adds a line item, or atomically increments the quantity when the
    /// (cart, medicine) line already exists. The upsert replaces the older
    /// read-then-write pattern, which lost updates under concurrent adds.
    pub async fn add_item_to_cart(
        &self,
        user_id: Uuid,
        medicine_id: Uuid,
        quantity: Option<i32>,
    ) -> AppResult<crate::entity::cart_items::Model> {
        let quantity = quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(AppError::InvalidInput(
                "quantity must be at least 1".into(),
            ));
        }

        let cart = self.find_or_create_cart(user_id).await?;
        self.medicines.find_by_id(medicine_id).await?;

        let active = CartItemActive {
            cart_id: Set(cart.id),
            medicine_id: Set(medicine_id),
            quantity: Set(quantity),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let on_conflict = OnConflict::columns([CartItemCol::CartId, CartItemCol::MedicineId])
            .value(
                CartItemCol::Quantity,
                Expr::col((CartItems, CartItemCol::Quantity)).add(quantity),
            )
            .value(CartItemCol::UpdatedAt, Expr::current_timestamp())
            .to_owned();

        let item = CartItems::insert(active)
            .on_conflict(on_conflict)
            .exec_with_returning(self.items.conn())
            .await?;

        Ok(item)
    }

    /// Overwrites the quantity of an existing line; quantity 0 removes it.
    pub async fn update_cart_item(
        &self,
        user_id: Uuid,
        medicine_id: Uuid,
        quantity: i32,
    ) -> AppResult<Option<crate::entity::cart_items::Model>> {
        if quantity == 0 {
            self.remove_item_from_cart(user_id, medicine_id).await?;
            return Ok(None);
        }
        if quantity < 0 {
            return Err(AppError::InvalidInput(
                "quantity must not be negative".into(),
            ));
        }

        let cart = self.require_cart(user_id).await?;
        let line_filter = Condition::all()
            .add(CartItemCol::CartId.eq(cart.id))
            .add(CartItemCol::MedicineId.eq(medicine_id));

        if self.items.find_first(line_filter.clone()).await?.is_none() {
            return Err(AppError::NotFound("Cart item"));
        }

        let patch = CartItemActive {
            quantity: Set(quantity),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        let updated = self.items.update(line_filter, patch).await?;
        Ok(updated.into_iter().next())
    }

    /// Removes a line item. A missing line is not an error; a missing cart is.
    pub async fn remove_item_from_cart(
        &self,
        user_id: Uuid,
        medicine_id: Uuid,
    ) -> AppResult<Vec<crate::entity::cart_items::Model>> {
        let cart = self.require_cart(user_id).await?;
        let deleted = self
            .items
            .delete(
                Condition::all()
                    .add(CartItemCol::CartId.eq(cart.id))
                    .add(CartItemCol::MedicineId.eq(medicine_id)),
            )
            .await?;
        Ok(deleted)
    }

    pub async fn clear_cart(&self, user_id: Uuid) -> AppResult<()> {
        let cart = self.require_cart(user_id).await?;
        self.items
            .delete(Condition::all().add(CartItemCol::CartId.eq(cart.id)))
            .await?;
        Ok(())
    }

    async fn require_cart(&self, user_id: Uuid) -> AppResult<crate::entity::carts::Model> {
        self.carts
            .find_first(CartCol::UserId.eq(user_id))
            .await?
            .ok_or(AppError::NotFound("Cart"))
    }
}
