pub mod auth;
pub mod categories;
pub mod movements;
pub mod products;
pub mod sales;
