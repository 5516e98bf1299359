use crate::db::DatabaseExt;
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::store::employees;
use tauri::AppHandle;

#[tauri::command]
pub fn get_employees(app: AppHandle) -> Result<Vec<Employee>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    employees::list_employees(&conn).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_employee(app: AppHandle, id: i64) -> Result<Employee, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    employees::get_employee(&conn, id).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn create_employee(app: AppHandle, employee: NewEmployee) -> Result<Employee, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    employees::create_employee(&conn, employee).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_employee(app: AppHandle, employee: UpdateEmployee) -> Result<Employee, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    employees::update_employee(&conn, employee).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn delete_employee(app: AppHandle, id: i64) -> Result<(), String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    employees::delete_employee(&conn, id).map_err(|e| e.to_string())
}
