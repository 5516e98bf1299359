use crate::backup::SalesBackup;
use crate::cart::Cart;
use crate::error::{PosError, PosResult};
use crate::models::{Client, Employee, NewSale, PaymentMethod, Sale};
use crate::store::{clients, employees, sales};
use crate::validation;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Header fields of the sales-entry form.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SaleDraft {
    pub date: String,
    pub employee_id: Option<i64>,
    pub client_id: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub amount_received: f64,
    pub card_reference: Option<String>,
}

impl SaleDraft {
    /// Draft dated today, attributed to the signed-in employee when known.
    pub fn today(employee_id: Option<i64>) -> Self {
        SaleDraft {
            date: chrono::Local::now()
                .format(validation::DATE_FORMAT)
                .to_string(),
            employee_id,
            payment_method: Some(PaymentMethod::Cash),
            ..Default::default()
        }
    }
}

/// Cash must cover the total; card payments are settled by the terminal.
pub fn validate_payment(method: PaymentMethod, amount_received: f64, total: f64) -> PosResult<()> {
    if method == PaymentMethod::Cash && amount_received < total {
        return Err(PosError::InsufficientPayment {
            total,
            received: amount_received,
        });
    }
    Ok(())
}

pub fn build_sale(
    draft: &SaleDraft,
    cart: &Cart,
    employees: &[Employee],
    clients: &[Client],
) -> PosResult<NewSale> {
    let (employee_id, client_id, method) =
        match (draft.employee_id, draft.client_id, draft.payment_method) {
            (Some(e), Some(c), Some(m)) if !draft.date.trim().is_empty() => (e, c, m),
            _ => return Err(PosError::validation("Please complete all fields")),
        };
    if cart.is_empty() {
        return Err(PosError::EmptyCart);
    }

    let date = validation::date("Date", &draft.date)?;

    let employee = employees
        .iter()
        .find(|e| e.id == employee_id)
        .ok_or_else(|| PosError::not_found("Employee"))?;
    let client = clients
        .iter()
        .find(|c| c.id == client_id)
        .ok_or_else(|| PosError::not_found("Client"))?;

    let total = cart.total();
    validate_payment(method, draft.amount_received, total)?;

    let (amount_received, card_reference) = match method {
        PaymentMethod::Cash => (draft.amount_received, None),
        PaymentMethod::Card => (
            total,
            draft
                .card_reference
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        ),
    };

    Ok(NewSale {
        date: date.format(validation::DATE_FORMAT).to_string(),
        lines: cart.lines(),
        total,
        employee_id: employee.id,
        employee_name: employee.name.clone(),
        client_name: client.name.clone(),
        payment_method: method,
        amount_received,
        card_reference,
    })
}

/// Validate, persist and back up a sale. The caller clears the cart on success.
pub fn checkout(
    conn: &Connection,
    backup: Option<&SalesBackup>,
    draft: &SaleDraft,
    cart: &Cart,
    now_ms: i64,
) -> PosResult<Sale> {
    let employees = employees::list_employees(conn)?;
    let clients = clients::list_clients(conn)?;

    let new_sale = build_sale(draft, cart, &employees, &clients).map_err(|e| {
        tracing::warn!(error = %e, "checkout rejected");
        e
    })?;

    let sale = sales::record_sale(conn, new_sale, now_ms)?;

    if let Some(backup) = backup {
        if let Err(e) = backup.append(&sale) {
            tracing::warn!(error = %e, sale_id = sale.id, "could not write sales backup");
        }
    }

    Ok(sale)
}
