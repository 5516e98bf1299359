use crate::error::{PosError, PosResult};
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::validation;
use rusqlite::{Connection, OptionalExtension, Row};

const SELECT_EMPLOYEE: &str =
    "SELECT id, name, email, joining_date, image, created_at FROM employees";

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        joining_date: row.get(3)?,
        image: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn list_employees(conn: &Connection) -> PosResult<Vec<Employee>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_EMPLOYEE))?;

    let employees = stmt
        .query_map([], map_employee)?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = employees.len(), "listed employees");
    Ok(employees)
}

pub fn get_employee(conn: &Connection, id: i64) -> PosResult<Employee> {
    conn.query_row(&format!("{} WHERE id = ?1", SELECT_EMPLOYEE), [id], map_employee)
        .optional()?
        .ok_or_else(|| PosError::not_found("Employee"))
}

pub fn find_employee_by_email(conn: &Connection, email: &str) -> PosResult<Option<Employee>> {
    let employee = conn
        .query_row(
            &format!("{} WHERE email = ?1", SELECT_EMPLOYEE),
            [email.trim().to_lowercase()],
            map_employee,
        )
        .optional()?;
    Ok(employee)
}

struct EmployeeForm {
    name: String,
    email: String,
    joining_date: String,
    image: Option<String>,
}

fn validate_form(
    name: &str,
    email: &str,
    joining_date: &str,
    image: Option<String>,
) -> PosResult<EmployeeForm> {
    Ok(EmployeeForm {
        name: validation::required("Name", name)?,
        email: validation::email(email)?,
        joining_date: validation::date("Joining date", joining_date)?
            .format(validation::DATE_FORMAT)
            .to_string(),
        image: image.filter(|i| !i.trim().is_empty()),
    })
}

fn ensure_email_free(conn: &Connection, email: &str, except_id: Option<i64>) -> PosResult<()> {
    if let Some(existing) = find_employee_by_email(conn, email)? {
        if Some(existing.id) != except_id {
            return Err(PosError::validation(format!(
                "An employee with email {} already exists",
                email
            )));
        }
    }
    Ok(())
}

pub fn create_employee(conn: &Connection, employee: NewEmployee) -> PosResult<Employee> {
    let form = validate_form(
        &employee.name,
        &employee.email,
        &employee.joining_date,
        employee.image,
    )?;
    ensure_email_free(conn, &form.email, None)?;

    conn.execute(
        "INSERT INTO employees (name, email, joining_date, image) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![form.name, form.email, form.joining_date, form.image],
    )?;

    let id = conn.last_insert_rowid();
    tracing::info!(id, name = %form.name, "created employee");

    get_employee(conn, id)
}

pub fn update_employee(conn: &Connection, employee: UpdateEmployee) -> PosResult<Employee> {
    let form = validate_form(
        &employee.name,
        &employee.email,
        &employee.joining_date,
        employee.image,
    )?;
    ensure_email_free(conn, &form.email, Some(employee.id))?;

    let changed = conn.execute(
        "UPDATE employees SET name = ?1, email = ?2, joining_date = ?3, image = ?4 WHERE id = ?5",
        rusqlite::params![form.name, form.email, form.joining_date, form.image, employee.id],
    )?;

    if changed == 0 {
        return Err(PosError::not_found("Employee"));
    }

    tracing::info!(id = employee.id, "updated employee");
    get_employee(conn, employee.id)
}

/// Recorded sales keep the employee's name, so deleting never touches them.
pub fn delete_employee(conn: &Connection, id: i64) -> PosResult<()> {
    let changed = conn.execute("DELETE FROM employees WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(PosError::not_found("Employee"));
    }

    tracing::info!(id, "deleted employee");
    Ok(())
}
