pub mod auth;
pub mod clients;
pub mod employees;
pub mod products;
pub mod reports;
pub mod sales;
