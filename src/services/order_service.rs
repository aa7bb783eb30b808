use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order as SortOrder,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderLine, OrderWithItems, UpdateOrderStatusRequest},
    entity::{
        Medicines, OrderItems, Orders,
        cart_items::{Column as CartItemCol, Entity as CartItemsEntity},
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol},
    },
    error::{AppError, AppResult},
    models::{OrderStatus, PaymentStatus},
    repository::Repository,
    services::cart_service::CartService,
};

/// Converts carts into immutable orders and walks their status lifecycle.
#[derive(Clone)]
pub struct OrderService {
    orders: Repository<Orders>,
    carts: CartService,
    conn: DatabaseConnection,
}

impl OrderService {
    pub fn new(conn: DatabaseConnection, carts: CartService) -> Self {
        Self {
            orders: Repository::new(conn.clone()),
            carts,
            conn,
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<crate::entity::orders::Model> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Order"))
    }

    /// Snapshot the user's cart into an order. Order insert, item inserts and
    /// cart-item deletion commit or roll back together; a medicine deleted
    /// between the cart read and the item insert aborts the transaction via
    /// its foreign key, leaving the cart intact and the call retriable.
    pub async fn create_order_from_cart(
        &self,
        user_id: Uuid,
        payload: CreateOrderRequest,
    ) -> AppResult<crate::entity::orders::Model> {
        let cart_view = self.carts.get_cart_with_items(user_id).await?;

        if cart_view.items.is_empty() {
            return Err(AppError::InvalidState(
                "cannot create an order from an empty cart".into(),
            ));
        }

        let total_amount: i64 = cart_view
            .items
            .iter()
            .map(|line| line.medicine.price * i64::from(line.quantity))
            .sum();

        let txn = self.conn.begin().await?;

        let order = OrderActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            status: Set(OrderStatus::Pending.as_str().to_owned()),
            total_amount: Set(total_amount),
            shipping_address: Set(payload.shipping_address),
            payment_method: Set(payload.payment_method),
            payment_status: Set(PaymentStatus::Unpaid.as_str().to_owned()),
            tracking_number: Set(None),
            notes: Set(payload.notes),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&txn)
        .await?;

        for line in &cart_view.items {
            // Freeze the price as it was when the cart was read.
            OrderItemActive {
                order_id: Set(order.id),
                medicine_id: Set(line.medicine.id),
                quantity: Set(line.quantity),
                price: Set(line.medicine.price),
                created_at: NotSet,
            }
            .insert(&txn)
            .await?;
        }

        CartItemsEntity::delete_many()
            .filter(CartItemCol::CartId.eq(cart_view.cart.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(order_id = %order.id, user_id = %user_id, total_amount,
            "order created from cart");

        Ok(order)
    }

    pub async fn get_order_with_items(&self, order_id: Uuid) -> AppResult<OrderWithItems> {
        let order = self.find_by_id(order_id).await?;

        let rows = OrderItems::find()
            .filter(OrderItemCol::OrderId.eq(order.id))
            .find_also_related(Medicines)
            .all(self.orders.conn())
            .await?;

        let items = rows
            .into_iter()
            .filter_map(|(item, medicine)| {
                medicine.map(|m| OrderLine {
                    item: item.into(),
                    medicine: m.into(),
                })
            })
            .collect();

        Ok(OrderWithItems {
            order: order.into(),
            items,
        })
    }

    /// Every order of the user, newest first, each expanded with its items.
    pub async fn get_user_orders(&self, user_id: Uuid) -> AppResult<Vec<OrderWithItems>> {
        let orders = self
            .orders
            .find_many_ordered(
                OrderCol::UserId.eq(user_id),
                OrderCol::CreatedAt,
                SortOrder::Desc,
            )
            .await?;

        let mut expanded = Vec::with_capacity(orders.len());
        for order in orders {
            expanded.push(self.get_order_with_items(order.id).await?);
        }
        Ok(expanded)
    }

    /// Partial update of status, payment status and tracking number, gated by
    /// the forward-only state machines.
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        payload: UpdateOrderStatusRequest,
    ) -> AppResult<crate::entity::orders::Model> {
        let order = self.find_by_id(order_id).await?;

        let mut patch = OrderActive {
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        if let Some(next) = payload.status.as_deref() {
            let current: OrderStatus = order
                .status
                .parse()
                .map_err(AppError::InvalidInput)?;
            let next: OrderStatus = next.parse().map_err(AppError::InvalidInput)?;
            if !current.can_transition_to(next) {
                return Err(AppError::InvalidState(format!(
                    "order status cannot move from {current} to {next}"
                )));
            }
            patch.status = Set(next.as_str().to_owned());
        }

        if let Some(next) = payload.payment_status.as_deref() {
            let current: PaymentStatus = order
                .payment_status
                .parse()
                .map_err(AppError::InvalidInput)?;
            let next: PaymentStatus = next.parse().map_err(AppError::InvalidInput)?;
            if !current.can_transition_to(next) {
                return Err(AppError::InvalidState(format!(
                    "payment status cannot move from {current} to {next}"
                )));
            }
            patch.payment_status = Set(next.as_str().to_owned());
        }

        if let Some(tracking) = payload.tracking_number {
            patch.tracking_number = Set(Some(tracking));
        }

        let updated = self.orders.update_by_id(order_id, patch).await?;
        updated
            .into_iter()
            .next()
            .ok_or(AppError::NotFound("Order"))
    }
}
