use crate::auth::{self, SessionStore};
use crate::backup::SalesBackup;
use crate::cart::{Cart, CartItem};
use crate::checkout::{self, SaleDraft};
use crate::db::DatabaseExt;
use crate::models::Sale;
use crate::sales_view::{self, SaleRow};
use crate::store::{products, sales};
use crate::ticket::{self, Ticket};
use serde::Serialize;
use std::sync::Mutex;
use tauri::{AppHandle, Manager};

/// Cart of the sales-entry session in progress
#[derive(Default)]
pub struct CartState {
    pub cart: Mutex<Cart>,
}

#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items().to_vec(),
            total: cart.total(),
        }
    }
}

#[tauri::command]
pub fn get_cart(app: AppHandle) -> Result<CartView, String> {
    let state = app.state::<CartState>();
    let cart = state.cart.lock().map_err(|e| e.to_string())?;

    Ok(CartView::from(&*cart))
}

#[tauri::command]
pub fn cart_add_product(app: AppHandle, product_id: i64) -> Result<CartView, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;
    let product = products::get_product(&conn, product_id).map_err(|e| e.to_string())?;

    let state = app.state::<CartState>();
    let mut cart = state.cart.lock().map_err(|e| e.to_string())?;
    cart.add_product(&product);

    Ok(CartView::from(&*cart))
}

#[tauri::command]
pub fn cart_set_quantity(app: AppHandle, product_id: i64, quantity: i32) -> Result<CartView, String> {
    let state = app.state::<CartState>();
    let mut cart = state.cart.lock().map_err(|e| e.to_string())?;
    cart.set_quantity(product_id, quantity);

    Ok(CartView::from(&*cart))
}

#[tauri::command]
pub fn cart_remove_product(app: AppHandle, product_id: i64) -> Result<CartView, String> {
    let state = app.state::<CartState>();
    let mut cart = state.cart.lock().map_err(|e| e.to_string())?;
    cart.remove(product_id);

    Ok(CartView::from(&*cart))
}

#[tauri::command]
pub fn cart_clear(app: AppHandle) -> Result<CartView, String> {
    let state = app.state::<CartState>();
    let mut cart = state.cart.lock().map_err(|e| e.to_string())?;
    cart.clear();

    Ok(CartView::from(&*cart))
}

/// Blank sales form: today's date and the signed-in employee, when one matches.
#[tauri::command]
pub fn new_sale_draft(app: AppHandle) -> Result<SaleDraft, String> {
    let session = app
        .state::<SessionStore>()
        .load()
        .map_err(|e| e.to_string())?;

    let employee_id = match session {
        Some(session) => {
            let db = app.db();
            let conn = db.conn.lock().map_err(|e| e.to_string())?;
            auth::authenticated_employee(&conn, &session)
                .map_err(|e| e.to_string())?
                .map(|e| e.id)
        }
        None => None,
    };

    Ok(SaleDraft::today(employee_id))
}

#[tauri::command]
pub fn checkout(app: AppHandle, draft: SaleDraft) -> Result<Sale, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let state = app.state::<CartState>();
    let mut cart = state.cart.lock().map_err(|e| e.to_string())?;

    let backup = app.state::<SalesBackup>();
    let now_ms = chrono::Utc::now().timestamp_millis();

    let sale = checkout::checkout(&conn, Some(backup.inner()), &draft, &cart, now_ms)
        .map_err(|e| e.to_string())?;
    cart.clear();

    Ok(sale)
}

#[tauri::command]
pub fn get_sales(app: AppHandle) -> Result<Vec<Sale>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    sales::list_sales(&conn).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_sale(app: AppHandle, id: i64) -> Result<Sale, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    sales::get_sale(&conn, id).map_err(|e| e.to_string())
}

/// Sales table, newest first, formatted for display
#[tauri::command]
pub fn get_sale_rows(app: AppHandle) -> Result<Vec<SaleRow>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let all = sales::list_sales(&conn).map_err(|e| e.to_string())?;
    Ok(sales_view::sale_rows(&all))
}

#[tauri::command]
pub fn get_last_ticket(app: AppHandle) -> Result<Option<Ticket>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    ticket::latest_ticket(&conn).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn render_last_ticket(app: AppHandle, width: Option<usize>) -> Result<Option<String>, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    let last = ticket::latest_ticket(&conn).map_err(|e| e.to_string())?;
    Ok(last.map(|t| t.render(width.unwrap_or(ticket::DEFAULT_WIDTH))))
}

/// Import a backup file (the configured one when `path` is empty). Returns the number of new sales.
/// Last sale written to the backup file, independent of the database
#[tauri::command]
pub fn get_last_backup_sale(app: AppHandle) -> Result<Option<Sale>, String> {
    app.state::<SalesBackup>().last().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn import_sales_backup(app: AppHandle, path: Option<String>) -> Result<usize, String> {
    let db = app.db();
    let conn = db.conn.lock().map_err(|e| e.to_string())?;

    match path.filter(|p| !p.trim().is_empty()) {
        Some(p) => SalesBackup::new(p).import_into(&conn),
        None => app.state::<SalesBackup>().import_into(&conn),
    }
    .map_err(|e| e.to_string())
}
