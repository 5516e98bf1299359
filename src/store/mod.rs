//! Repository layer: every function works on a borrowed connection so the
//! Tauri commands and the tests share one code path.

pub mod clients;
pub mod employees;
pub mod products;
pub mod sales;
