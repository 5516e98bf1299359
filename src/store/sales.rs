use crate::error::{PosError, PosResult};
use crate::models::{NewSale, PaymentMethod, Sale, SaleLine};
use rusqlite::{Connection, OptionalExtension, Row};

const SELECT_SALE: &str = "SELECT id, date, total, employee_id, employee_name, client_name,
        payment_method, amount_received, card_reference
     FROM sales";

fn map_sale(row: &Row) -> rusqlite::Result<Sale> {
    let method: String = row.get(6)?;
    let payment_method = PaymentMethod::parse(&method).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            format!("unknown payment method: {}", method).into(),
        )
    })?;

    Ok(Sale {
        id: row.get(0)?,
        date: row.get(1)?,
        lines: Vec::new(),
        total: row.get(2)?,
        employee_id: row.get(3)?,
        employee_name: row.get(4)?,
        client_name: row.get(5)?,
        payment_method,
        amount_received: row.get(7)?,
        card_reference: row.get(8)?,
    })
}

fn load_lines(conn: &Connection, sale_id: i64) -> PosResult<Vec<SaleLine>> {
    let mut stmt = conn.prepare(
        "SELECT product_id, name, quantity, unit_price
         FROM sale_lines
         WHERE sale_id = ?1
         ORDER BY id",
    )?;

    let lines = stmt
        .query_map([sale_id], |row| {
            Ok(SaleLine {
                product_id: row.get(0)?,
                name: row.get(1)?,
                quantity: row.get(2)?,
                unit_price: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines)
}

fn with_lines(conn: &Connection, mut sale: Sale) -> PosResult<Sale> {
    sale.lines = load_lines(conn, sale.id)?;
    Ok(sale)
}

/// Sale ids come from the checkout clock; on collision take the next free id.
pub fn next_sale_id(conn: &Connection, now_ms: i64) -> PosResult<i64> {
    let max_id: i64 = conn.query_row("SELECT COALESCE(MAX(id), 0) FROM sales", [], |row| {
        row.get(0)
    })?;
    let next = max_id
        .checked_add(1)
        .ok_or_else(|| PosError::validation("No sale id left after the highest stored id"))?;
    Ok(now_ms.max(next))
}

pub fn sale_exists(conn: &Connection, id: i64) -> PosResult<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM sales WHERE id = ?1", [id], |row| {
        row.get(0)
    })?;
    Ok(count > 0)
}

/// Insert a sale and its lines under the given id in one transaction.
pub fn insert_sale(conn: &Connection, sale: &Sale) -> PosResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO sales (id, date, total, employee_id, employee_name, client_name,
            payment_method, amount_received, card_reference)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            sale.id,
            sale.date,
            sale.total,
            sale.employee_id,
            sale.employee_name,
            sale.client_name,
            sale.payment_method.as_str(),
            sale.amount_received,
            sale.card_reference,
        ],
    )?;

    for line in &sale.lines {
        tx.execute(
            "INSERT INTO sale_lines (sale_id, product_id, name, quantity, unit_price)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![sale.id, line.product_id, line.name, line.quantity, line.unit_price],
        )?;
    }

    tx.commit()?;
    Ok(())
}

pub fn record_sale(conn: &Connection, sale: NewSale, now_ms: i64) -> PosResult<Sale> {
    let id = next_sale_id(conn, now_ms)?;
    let sale = sale.into_sale(id);

    insert_sale(conn, &sale)?;
    tracing::info!(
        id,
        total = sale.total,
        employee_id = sale.employee_id,
        lines = sale.lines.len(),
        "recorded sale"
    );

    Ok(sale)
}

pub fn list_sales(conn: &Connection) -> PosResult<Vec<Sale>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_SALE))?;

    let sales = stmt
        .query_map([], map_sale)?
        .collect::<Result<Vec<_>, _>>()?;

    sales.into_iter().map(|sale| with_lines(conn, sale)).collect()
}

pub fn get_sale(conn: &Connection, id: i64) -> PosResult<Sale> {
    let sale = conn
        .query_row(&format!("{} WHERE id = ?1", SELECT_SALE), [id], map_sale)
        .optional()?
        .ok_or_else(|| PosError::not_found("Sale"))?;

    with_lines(conn, sale)
}

/// The most recently recorded sale, if any.
pub fn last_sale(conn: &Connection) -> PosResult<Option<Sale>> {
    let sale = conn
        .query_row(
            &format!("{} ORDER BY id DESC LIMIT 1", SELECT_SALE),
            [],
            map_sale,
        )
        .optional()?;

    sale.map(|s| with_lines(conn, s)).transpose()
}
