pub mod auth;
pub mod backup;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod sales_view;
pub mod store;
pub mod ticket;
pub mod validation;

#[cfg(feature = "desktop")]
mod commands;


#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use auth::SessionStore;
    use backup::SalesBackup;
    use commands::{auth as session, clients, employees, products, reports, sales};
    use config::AppConfig;
    use db::Database;
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            let config = AppConfig::load(&data_dir)?;
            logging::init(&config.log_filter);
            tracing::info!(data_dir = %data_dir.display(), api = %config.api_base_url, "starting");

            let db = Database::new(app.handle(), &config)?;
            db.initialize()?;
            app.manage(db);

            app.manage(SalesBackup::new(data_dir.join(&config.backup_file)));
            app.manage(SessionStore::new(data_dir.join(&config.session_file)));
            app.manage(sales::CartState::default());
            app.manage(config);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Auth
            session::login,
            session::register,
            session::logout,
            session::get_session,
            session::get_authenticated_employee,
            // Employees
            employees::get_employees,
            employees::get_employee,
            employees::create_employee,
            employees::update_employee,
            employees::delete_employee,
            // Clients
            clients::get_clients,
            clients::get_client,
            clients::create_client,
            clients::update_client,
            clients::delete_client,
            // Products
            products::get_products,
            products::get_product,
            products::create_product,
            products::update_product,
            products::delete_product,
            // Cart and checkout
            sales::get_cart,
            sales::cart_add_product,
            sales::cart_set_quantity,
            sales::cart_remove_product,
            sales::cart_clear,
            sales::new_sale_draft,
            sales::checkout,
            // Sales and tickets
            sales::get_sales,
            sales::get_sale,
            sales::get_sale_rows,
            sales::get_last_ticket,
            sales::render_last_ticket,
            sales::get_last_backup_sale,
            sales::import_sales_backup,
            // Reports
            reports::get_employee_sales_report,
            reports::get_employee_detail,
            reports::get_daily_totals,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
