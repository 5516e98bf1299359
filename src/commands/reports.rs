use crate::db::DatabaseExt;
use crate::reports::{self, ChartSeries, EmployeeDetailReport, EmployeeSalesSummary};
use crate::store::{employees, sales};
use tauri::AppHandle;

#[tauri::command]
pub fn get_employee_sales_report(app: AppHandle) -> Result<Vec<EmployeeSalesSummary>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let all_sales = sales::list_sales(&conn).map_err(|e| e.to_string())?;
    let all_employees = employees::list_employees(&conn).map_err(|e| e.to_string())?;

    Ok(reports::employee_sales_report(&all_sales, &all_employees))
}

#[tauri::command]
pub fn get_employee_detail(app: AppHandle, id: i64) -> Result<EmployeeDetailReport, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let all_sales = sales::list_sales(&conn).map_err(|e| e.to_string())?;
    let all_employees = employees::list_employees(&conn).map_err(|e| e.to_string())?;

    reports::employee_detail(&all_sales, &all_employees, id)
        .ok_or_else(|| "Employee not found".to_string())
}

#[tauri::command]
pub fn get_daily_totals(app: AppHandle) -> Result<ChartSeries, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let all_sales = sales::list_sales(&conn).map_err(|e| e.to_string())?;
    Ok(reports::daily_totals(&all_sales))
}
