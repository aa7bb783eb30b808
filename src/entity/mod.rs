pub mod cart_items;
pub mod carts;
pub mod categories;
pub mod medicines;
pub mod order_items;
pub mod orders;
pub mod pharmacies;
pub mod pharmacy_medicines;
pub mod reviews;
pub mod users;
pub mod verifications;
pub mod wishlist;

pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use categories::Entity as Categories;
pub use medicines::Entity as Medicines;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use pharmacies::Entity as Pharmacies;
pub use pharmacy_medicines::Entity as PharmacyMedicines;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
pub use verifications::Entity as Verifications;
pub use wishlist::Entity as Wishlist;
