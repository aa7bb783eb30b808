use pharmacy_market_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        pharmacies::CreatePharmacyRequest,
        reviews::{CreateReviewRequest, UpdateReviewRequest},
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Review lifecycle: one review per user per pharmacy, bounded ratings,
// aggregated stats, author-only edits.
#[tokio::test]
async fn review_rules_and_rating_stats() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let alice = create_user(&state, "alice@example.com").await?;
    let bob = create_user(&state, "bob@example.com").await?;

    let pharmacy = state
        .pharmacies
        .create(
            None,
            CreatePharmacyRequest {
                name: "Corner Pharmacy".into(),
                description: None,
                address: "2 Side Street".into(),
                phone: "+15550101".into(),
                email: "corner@example.com".into(),
                image: None,
            },
        )
        .await?;

    // Out-of-range rating is rejected before anything is written.
    let err = state
        .reviews
        .create_review(
            alice,
            CreateReviewRequest {
                pharmacy_id: pharmacy.id,
                rating: 6,
                comment: None,
            },
        )
        .await
        .expect_err("rating 6 must be rejected");
    assert!(matches!(err, AppError::InvalidInput(_)));

    let alice_review = state
        .reviews
        .create_review(
            alice,
            CreateReviewRequest {
                pharmacy_id: pharmacy.id,
                rating: 5,
                comment: Some("great service".into()),
            },
        )
        .await?;

    // Second review by the same user for the same pharmacy conflicts.
    let err = state
        .reviews
        .create_review(
            alice,
            CreateReviewRequest {
                pharmacy_id: pharmacy.id,
                rating: 3,
                comment: None,
            },
        )
        .await
        .expect_err("duplicate review must conflict");
    assert!(matches!(err, AppError::Conflict(_)));

    state
        .reviews
        .create_review(
            bob,
            CreateReviewRequest {
                pharmacy_id: pharmacy.id,
                rating: 4,
                comment: None,
            },
        )
        .await?;

    let stats = state.reviews.get_pharmacy_rating_stats(pharmacy.id).await?;
    assert_eq!(stats.total_reviews, 2);
    assert_eq!(stats.average_rating, 4.5);

    // Only the author may edit.
    let err = state
        .reviews
        .update_review(
            alice_review.id,
            bob,
            UpdateReviewRequest {
                rating: Some(1),
                comment: None,
            },
        )
        .await
        .expect_err("foreign update must be forbidden");
    assert!(matches!(err, AppError::Forbidden));

    let updated = state
        .reviews
        .update_review(
            alice_review.id,
            alice,
            UpdateReviewRequest {
                rating: Some(4),
                comment: None,
            },
        )
        .await?;
    assert_eq!(updated.rating, 4);

    // (4 + 4) / 2
    let stats = state.reviews.get_pharmacy_rating_stats(pharmacy.id).await?;
    assert_eq!(stats.average_rating, 4.0);

    state.reviews.delete_review(alice_review.id, alice).await?;
    let stats = state.reviews.get_pharmacy_rating_stats(pharmacy.id).await?;
    assert_eq!(stats.total_reviews, 1);

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
