use crate::db::DatabaseExt;
use crate::models::{Client, UpdateClient};
use crate::store::clients;
use tauri::AppHandle;

#[tauri::command]
pub fn get_clients(app: AppHandle) -> Result<Vec<Client>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    clients::list_clients(&conn).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_client(app: AppHandle, id: i64) -> Result<Client, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    clients::get_client(&conn, id).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn create_client(app: AppHandle, name: String) -> Result<Client, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    clients::create_client(&conn, &name).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_client(app: AppHandle, client: UpdateClient) -> Result<Client, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    clients::update_client(&conn, client).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_client(app: AppHandle, id: i64) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    clients::delete_client(&conn, id).map_err(|e| e.to_string())
}
