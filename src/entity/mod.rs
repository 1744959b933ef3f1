pub mod categories;
pub mod movements;
pub mod products;
pub mod sale_lines;
pub mod sales;
pub mod users;

pub use categories::Entity as Categories;
pub use movements::Entity as Movements;
pub use products::Entity as Products;
pub use sale_lines::Entity as SaleLines;
pub use sales::Entity as Sales;
pub use users::Entity as Users;
