use crate::error::{PosError, PosResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::validation;
use rusqlite::{Connection, OptionalExtension, Row};

fn map_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        image: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn list_products(conn: &Connection) -> PosResult<Vec<Product>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, price, image, created_at
         FROM products
         ORDER BY name",
    )?;

    let products = stmt
        .query_map([], map_product)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(products)
}

pub fn get_product(conn: &Connection, id: i64) -> PosResult<Product> {
    conn.query_row(
        "SELECT id, name, price, image, created_at FROM products WHERE id = ?1",
        [id],
        map_product,
    )
    .optional()?
    .ok_or_else(|| PosError::not_found("Product"))
}

pub fn create_product(conn: &Connection, product: CreateProduct) -> PosResult<Product> {
    let name = validation::required("Name", &product.name)?;
    let price = validation::price(product.price)?;
    let image = product.image.filter(|i| !i.trim().is_empty());

    conn.execute(
        "INSERT INTO products (name, price, image) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, price, image],
    )?;

    let id = conn.last_insert_rowid();
    tracing::info!(id, name = %name, price, "created product");

    get_product(conn, id)
}

pub fn update_product(conn: &Connection, product: UpdateProduct) -> PosResult<Product> {
    let name = validation::required("Name", &product.name)?;
    let price = validation::price(product.price)?;
    let image = product.image.filter(|i| !i.trim().is_empty());

    let changed = conn.execute(
        "UPDATE products SET name = ?1, price = ?2, image = ?3 WHERE id = ?4",
        rusqlite::params![name, price, image, product.id],
    )?;
    if changed == 0 {
        return Err(PosError::not_found("Product"));
    }

    tracing::info!(id = product.id, "updated product");
    get_product(conn, product.id)
}

/// Sale lines hold their own name and price, so history is unaffected.
pub fn delete_product(conn: &Connection, id: i64) -> PosResult<()> {
    let changed = conn.execute("DELETE FROM products WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(PosError::not_found("Product"));
    }

    tracing::info!(id, "deleted product");
    Ok(())
}
