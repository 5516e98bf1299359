use crate::error::{PosError, PosResult};
use crate::models::{Client, UpdateClient};
use crate::validation;
use rusqlite::{Connection, OptionalExtension, Row};

fn map_client(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn list_clients(conn: &Connection) -> PosResult<Vec<Client>> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM clients ORDER BY name")?;

    let clients = stmt
        .query_map([], map_client)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(clients)
}

pub fn get_client(conn: &Connection, id: i64) -> PosResult<Client> {
    conn.query_row(
        "SELECT id, name, created_at FROM clients WHERE id = ?1",
        [id],
        map_client,
    )
    .optional()?
    .ok_or_else(|| PosError::not_found("Client"))
}

pub fn create_client(conn: &Connection, name: &str) -> PosResult<Client> {
    let name = validation::required("Name", name)?;

    conn.execute("INSERT INTO clients (name) VALUES (?1)", [&name])?;

    let id = conn.last_insert_rowid();
    tracing::info!(id, name = %name, "created client");

    get_client(conn, id)
}

pub fn update_client(conn: &Connection, client: UpdateClient) -> PosResult<Client> {
    let name = validation::required("Name", &client.name)?;

    let changed = conn.execute(
        "UPDATE clients SET name = ?1 WHERE id = ?2",
        rusqlite::params![name, client.id],
    )?;
    if changed == 0 {
        return Err(PosError::not_found("Client"));
    }

    get_client(conn, client.id)
}

pub fn delete_client(conn: &Connection, id: i64) -> PosResult<()> {
    let changed = conn.execute("DELETE FROM clients WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(PosError::not_found("Client"));
    }

    tracing::info!(id, "deleted client");
    Ok(())
}
