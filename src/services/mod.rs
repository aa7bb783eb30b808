pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod category_service;
pub mod medicine_service;
pub mod order_service;
pub mod pharmacy_service;
pub mod review_service;
pub mod search_service;
pub mod user_service;
pub mod wishlist_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use cart_service::CartService;
pub use category_service::CategoryService;
pub use medicine_service::MedicineService;
pub use order_service::OrderService;
pub use pharmacy_service::PharmacyService;
pub use review_service::ReviewService;
pub use search_service::SearchService;
pub use user_service::UserService;
pub use wishlist_service::WishlistService;
