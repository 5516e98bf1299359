use crate::error::PosResult;
use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::Mutex;

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> PosResult<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "opened database");

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> PosResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database {
            conn: Mutex::new(conn),
        };
        db.initialize()?;
        Ok(db)
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());

        conn.execute_batch(
            "
            -- Employees
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                joining_date DATE NOT NULL,
                image TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Clients
            CREATE TABLE IF NOT EXISTS clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Product catalog
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                image TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Sales; id is the checkout timestamp in milliseconds
            CREATE TABLE IF NOT EXISTS sales (
                id INTEGER PRIMARY KEY,
                date DATE NOT NULL,
                total REAL NOT NULL,
                employee_id INTEGER NOT NULL,
                employee_name TEXT NOT NULL,
                client_name TEXT NOT NULL,
                payment_method TEXT NOT NULL,
                amount_received REAL NOT NULL DEFAULT 0,
                card_reference TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Sale lines, snapshot of product name and price
            CREATE TABLE IF NOT EXISTS sale_lines (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sale_id INTEGER NOT NULL,
                product_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price REAL NOT NULL,
                FOREIGN KEY (sale_id) REFERENCES sales(id)
            );
            ",
        )?;

        // Pass the locked connection so migrations don't deadlock
        Self::migrate_conn(&conn)?;

        Ok(())
    }

    fn migrate_conn(conn: &Connection) -> Result<()> {
        let columns = |table: &str| -> Result<Vec<String>> {
            let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(1))?
                .collect::<Result<Vec<_>>>()?;
            Ok(names)
        };

        // Databases created before images were supported
        if !columns("employees")?.contains(&"image".to_string()) {
            conn.execute("ALTER TABLE employees ADD COLUMN image TEXT", [])?;
        }
        if !columns("products")?.contains(&"image".to_string()) {
            conn.execute("ALTER TABLE products ADD COLUMN image TEXT", [])?;
        }
        if !columns("sales")?.contains(&"card_reference".to_string()) {
            conn.execute("ALTER TABLE sales ADD COLUMN card_reference TEXT", [])?;
        }

        Ok(())
    }
}

#[cfg(feature = "desktop")]
mod desktop {
    use super::Database;
    use crate::config::AppConfig;
    use crate::error::{PosError, PosResult};
    use tauri::{AppHandle, Manager};

    impl Database {
        pub fn new(app_handle: &AppHandle, config: &AppConfig) -> PosResult<Self> {
            let app_dir = app_handle
                .path()
                .app_data_dir()
                .map_err(|e| PosError::Config(e.to_string()))?;

            Database::open(&app_dir.join(&config.database_file))
        }
    }

    pub trait DatabaseExt {
        fn db(&self) -> &Database;
    }

    impl DatabaseExt for AppHandle {
        fn db(&self) -> &Database {
            self.state::<Database>().inner()
        }
    }
}

#[cfg(feature = "desktop")]
pub use desktop::DatabaseExt;
