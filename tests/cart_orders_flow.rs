use pharmacy_market_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        medicines::UpdateMedicineRequest,
        orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    },
    entity::{Medicines, medicines::ActiveModel as MedicineActive, users::ActiveModel as UserActive},
    error::AppError,
    repository::Repository,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Full flow: cart lifecycle, checkout, price freeze and status transitions.
#[tokio::test]
async fn cart_and_checkout_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let user_id = create_user(&state, "user@example.com").await?;

    // Two calls, one cart.
    let cart_a = state.carts.find_or_create_cart(user_id).await?;
    let cart_b = state.carts.find_or_create_cart(user_id).await?;
    assert_eq!(cart_a.id, cart_b.id);

    let mut medicines = seed_medicines(
        &state,
        vec![("Aspirin 100mg", 1000), ("Vitamin D3", 550)],
    )
    .await?;
    let vitamin = medicines.pop().expect("vitamin");
    let aspirin = medicines.pop().expect("aspirin");

    // Adding the same medicine twice increments the line, not the line count.
    state.carts.add_item_to_cart(user_id, aspirin.id, None).await?;
    state
        .carts
        .add_item_to_cart(user_id, aspirin.id, Some(1))
        .await?;
    state
        .carts
        .add_item_to_cart(user_id, vitamin.id, Some(1))
        .await?;

    let cart = state.carts.get_cart_with_items(user_id).await?;
    assert_eq!(cart.item_count, 2);
    let aspirin_line = cart
        .items
        .iter()
        .find(|line| line.medicine.id == aspirin.id)
        .expect("aspirin line");
    assert_eq!(aspirin_line.quantity, 2);
    // 2 * 10.00 + 1 * 5.50
    assert_eq!(cart.total_price, "25.50");

    // Setting quantity to zero removes the line.
    let removed = state.carts.update_cart_item(user_id, vitamin.id, 0).await?;
    assert!(removed.is_none());
    let cart = state.carts.get_cart_with_items(user_id).await?;
    assert_eq!(cart.item_count, 1);

    // Checkout freezes prices and empties the cart.
    let order = state
        .orders
        .create_order_from_cart(
            user_id,
            CreateOrderRequest {
                shipping_address: "1 Main Street".into(),
                payment_method: "cash".into(),
                notes: None,
            },
        )
        .await?;
    assert_eq!(order.total_amount, 2000);
    assert_eq!(order.status, "pending");

    let cart = state.carts.get_cart_with_items(user_id).await?;
    assert_eq!(cart.item_count, 0);

    // A later price change must not leak into the placed order.
    state
        .medicines
        .update(
            aspirin.id,
            UpdateMedicineRequest {
                name: None,
                description: None,
                price: Some(9999),
                image: None,
                substance: None,
                category_id: None,
            },
        )
        .await?;
    let detail = state.orders.get_order_with_items(order.id).await?;
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].item.price, 1000);

    // pending -> processing is allowed; going back is not.
    let updated = state
        .orders
        .update_order_status(
            order.id,
            UpdateOrderStatusRequest {
                status: Some("processing".into()),
                payment_status: None,
                tracking_number: None,
            },
        )
        .await?;
    assert_eq!(updated.status, "processing");

    let err = state
        .orders
        .update_order_status(
            order.id,
            UpdateOrderStatusRequest {
                status: Some("pending".into()),
                payment_status: None,
                tracking_number: None,
            },
        )
        .await
        .expect_err("backwards transition must fail");
    assert!(matches!(err, AppError::InvalidState(_)));

    // The cart is empty again after checkout; a second checkout must fail.
    let err = state
        .orders
        .create_order_from_cart(
            user_id,
            CreateOrderRequest {
                shipping_address: "1 Main Street".into(),
                payment_method: "cash".into(),
                notes: None,
            },
        )
        .await
        .expect_err("empty cart must not produce an order");
    assert!(matches!(err, AppError::InvalidState(_)));

    // Delete returns the removed rows from its own RETURNING clause; a
    // repeat finds nothing to remove.
    let spare = seed_medicines(&state, vec![("Saline Spray", 300)])
        .await?
        .pop()
        .expect("spare medicine");
    let repo = Repository::<Medicines>::new(state.orm.clone());
    let deleted = repo.delete_by_id(spare.id).await?;
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id, spare.id);
    assert!(repo.delete_by_id(spare.id).await?.is_empty());

    Ok(())
}

// Allow skipping when no DB is configured in the environment.
async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, cart_items, carts, wishlist, reviews, pharmacy_medicines, audit_logs, verifications, medicines, categories, pharmacies, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(Some(AppState::new(pool, orm, "test-secret".into())))
}

async fn create_user(state: &AppState, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set("Test User".into()),
        email: Set(email.to_string()),
        role: Set("user".into()),
        password_hash: Set("dummy".into()),
        image: Set(None),
        gender: Set(None),
        phone: Set(None),
        address: Set(None),
        refresh_token: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

async fn seed_medicines(
    state: &AppState,
    rows: Vec<(&str, i64)>,
) -> anyhow::Result<Vec<pharmacy_market_api::entity::medicines::Model>> {
    let repo = Repository::<Medicines>::new(state.orm.clone());
    let values = rows
        .into_iter()
        .map(|(name, price)| MedicineActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(None),
            price: Set(price),
            image: Set(None),
            substance: Set(None),
            category_id: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        })
        .collect();

    Ok(repo.create_many(values).await?)
}
