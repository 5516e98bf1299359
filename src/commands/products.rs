use crate::db::DatabaseExt;
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::store::products;
use tauri::AppHandle;

#[tauri::command]
pub fn get_products(app: AppHandle) -> Result<Vec<Product>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    products::list_products(&conn).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_product(app: AppHandle, id: i64) -> Result<Product, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    products::get_product(&conn, id).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn create_product(app: AppHandle, product: CreateProduct) -> Result<Product, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    products::create_product(&conn, product).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_product(app: AppHandle, product: UpdateProduct) -> Result<Product, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    products::update_product(&conn, product).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_product(app: AppHandle, id: i64) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    products::delete_product(&conn, id).map_err(|e| e.to_string())
}
