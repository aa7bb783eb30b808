use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod doc;
pub mod health;
pub mod medicines;
pub mod orders;
pub mod params;
pub mod pharmacies;
pub mod reviews;
pub mod search;
pub mod users;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/medicines", medicines::router())
        .nest("/categories", categories::router())
        .nest("/pharmacies", pharmacies::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/reviews", reviews::router())
        .nest("/wishlist", wishlist::router())
        .nest("/search", search::router())
        .nest("/admin", admin::router())
}
