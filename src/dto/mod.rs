pub mod auth;
pub mod cart;
pub mod categories;
pub mod medicines;
pub mod orders;
pub mod pharmacies;
pub mod reviews;
pub mod search;
pub mod users;
pub mod wishlist;
