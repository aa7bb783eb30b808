use crate::{
    db::{DbPool, OrmConn},
    services::{
        AdminService, AuthService, CartService, CategoryService, MedicineService, OrderService,
        PharmacyService, ReviewService, SearchService, UserService, WishlistService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub auth: AuthService,
    pub users: UserService,
    pub categories: CategoryService,
    pub medicines: MedicineService,
    pub pharmacies: PharmacyService,
    pub carts: CartService,
    pub orders: OrderService,
    pub reviews: ReviewService,
    pub wishlist: WishlistService,
    pub search: SearchService,
    pub admin: AdminService,
}

impl AppState {
    pub fn new(pool: DbPool, orm: OrmConn, jwt_secret: String) -> Self {
        let categories = CategoryService::new(orm.clone());
        let medicines = MedicineService::new(orm.clone(), categories.clone());
        let pharmacies = PharmacyService::new(orm.clone());
        let carts = CartService::new(orm.clone(), medicines.clone());
        let orders = OrderService::new(orm.clone(), carts.clone());
        let reviews = ReviewService::new(orm.clone(), pharmacies.clone());
        let wishlist = WishlistService::new(orm.clone(), medicines.clone());

        Self {
            auth: AuthService::new(orm.clone(), jwt_secret),
            users: UserService::new(orm.clone()),
            search: SearchService::new(orm.clone()),
            admin: AdminService::new(orm.clone()),
            categories,
            medicines,
            pharmacies,
            carts,
            orders,
            reviews,
            wishlist,
            pool,
            orm,
        }
    }
}
