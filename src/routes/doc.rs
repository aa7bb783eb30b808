use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{
            AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
            RefreshRequest, ResetPasswordRequest, SignupRequest, TokenPair,
        },
        cart::{AddToCartRequest, CartLine, CartWithItems, UpdateCartItemRequest},
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        medicines::{CreateMedicineRequest, MedicineList, UpdateMedicineRequest},
        orders::{CreateOrderRequest, OrderLine, OrderList, OrderWithItems, UpdateOrderStatusRequest},
        pharmacies::{
            CreatePharmacyRequest, PharmacyList, PharmacyStockLine, PharmacyStockList,
            SetPharmacyMedicineRequest, UpdatePharmacyRequest,
        },
        reviews::{CreateReviewRequest, RatingStats, ReviewList, UpdateReviewRequest},
        search::{SearchHit, SearchResults},
        users::{DashboardStats, UpdateProfileRequest, UserList},
        wishlist::{AddToWishlistRequest, WishlistMedicines},
    },
    models::{
        Cart, CartItem, Category, Medicine, Order, OrderItem, Pharmacy, PharmacyMedicine, Review,
        User, WishlistEntry,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, cart, categories, health, medicines, orders, params, pharmacies, reviews, search, users, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        auth::refresh,
        auth::change_password,
        auth::forgot_password,
        auth::reset_password,
        users::get_me,
        users::update_me,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::list_orders,
        orders::checkout,
        orders::get_order,
        medicines::list_medicines,
        medicines::get_medicine,
        medicines::create_medicine,
        medicines::update_medicine,
        medicines::update_medicine_image,
        medicines::delete_medicine,
        categories::list_categories,
        categories::get_category,
        categories::list_category_medicines,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        pharmacies::list_pharmacies,
        pharmacies::list_my_pharmacies,
        pharmacies::get_pharmacy,
        pharmacies::create_pharmacy,
        pharmacies::update_pharmacy,
        pharmacies::toggle_pharmacy_status,
        pharmacies::delete_pharmacy,
        pharmacies::list_pharmacy_stock,
        pharmacies::set_pharmacy_medicine,
        reviews::create_review,
        reviews::list_my_reviews,
        reviews::list_pharmacy_reviews,
        reviews::pharmacy_rating_stats,
        reviews::update_review,
        reviews::delete_review,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        search::search,
        admin::dashboard_stats,
        admin::list_users,
        admin::update_order_status
    ),
    components(
        schemas(
            User,
            Pharmacy,
            Category,
            Medicine,
            PharmacyMedicine,
            Cart,
            CartItem,
            Order,
            OrderItem,
            Review,
            WishlistEntry,
            SignupRequest,
            LoginRequest,
            RefreshRequest,
            ChangePasswordRequest,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            TokenPair,
            AuthResponse,
            UpdateProfileRequest,
            AddToCartRequest,
            UpdateCartItemRequest,
            CartLine,
            CartWithItems,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            OrderLine,
            OrderWithItems,
            OrderList,
            CreateMedicineRequest,
            UpdateMedicineRequest,
            MedicineList,
            medicines::UpdateImageRequest,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CreatePharmacyRequest,
            UpdatePharmacyRequest,
            PharmacyList,
            SetPharmacyMedicineRequest,
            PharmacyStockLine,
            PharmacyStockList,
            CreateReviewRequest,
            UpdateReviewRequest,
            ReviewList,
            RatingStats,
            AddToWishlistRequest,
            WishlistMedicines,
            SearchHit,
            SearchResults,
            DashboardStats,
            UserList,
            params::Pagination,
            params::MedicineQuery,
            params::PharmacyQuery,
            params::UserQuery,
            params::SearchQuery,
            Meta,
            ApiResponse<User>,
            ApiResponse<CartWithItems>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>,
            ApiResponse<MedicineList>,
            ApiResponse<PharmacyList>,
            ApiResponse<CategoryList>,
            ApiResponse<ReviewList>,
            ApiResponse<SearchResults>,
            ApiResponse<DashboardStats>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Profile endpoints"),
        (name = "Medicines", description = "Medicine catalog endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Pharmacies", description = "Pharmacy endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Reviews", description = "Review endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Search", description = "Catalog search endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
