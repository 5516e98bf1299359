use crate::models::{PaymentMethod, Sale, SaleLine};
use crate::validation::DATE_FORMAT;
use chrono::{DateTime, NaiveDate};
use serde::Serialize;

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Sale dates are `YYYY-MM-DD`, but legacy backups may carry full timestamps.
pub fn parse_sale_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

pub fn format_sale_date(value: &str) -> String {
    if value.trim().is_empty() {
        return "Date not available".to_string();
    }
    match parse_sale_date(value) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => "Invalid date".to_string(),
    }
}

/// Last four characters of a card reference, or `None` when there is nothing to show.
pub fn card_suffix(reference: Option<&str>) -> Option<String> {
    let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;
    let chars: Vec<char> = reference.chars().collect();
    let start = chars.len().saturating_sub(4);
    Some(chars[start..].iter().collect())
}

pub fn payment_label(method: PaymentMethod, card_reference: Option<&str>) -> String {
    match method {
        PaymentMethod::Cash => "Cash".to_string(),
        PaymentMethod::Card => format!(
            "Card (******{})",
            card_suffix(card_reference).unwrap_or_else(|| "XXXX".to_string())
        ),
    }
}

pub fn line_summary(line: &SaleLine) -> String {
    format!("{} (x{}) - ${:.2}", line.name, line.quantity, line.unit_price)
}

/// Newest first; sales whose date cannot be read go to the end.
pub fn sorted_by_date_desc(sales: &[Sale]) -> Vec<Sale> {
    let mut sorted = sales.to_vec();
    sorted.sort_by(|a, b| {
        let da = parse_sale_date(&a.date);
        let db = parse_sale_date(&b.date);
        db.cmp(&da)
    });
    sorted
}

/// One row of the sales table, already formatted for display.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SaleRow {
    pub id: i64,
    pub date: String,
    pub products: Vec<String>,
    pub employee: String,
    pub client: String,
    pub total: String,
    pub payment: String,
}

impl From<&Sale> for SaleRow {
    fn from(sale: &Sale) -> Self {
        let employee = if !sale.employee_name.trim().is_empty() {
            sale.employee_name.clone()
        } else if sale.employee_id > 0 {
            sale.employee_id.to_string()
        } else {
            "Not specified".to_string()
        };
        let client = if sale.client_name.trim().is_empty() {
            "Not specified".to_string()
        } else {
            sale.client_name.clone()
        };

        SaleRow {
            id: sale.id,
            date: format_sale_date(&sale.date),
            products: sale.lines.iter().map(line_summary).collect(),
            employee,
            client,
            total: format!("${:.2}", sale.total),
            payment: payment_label(sale.payment_method, sale.card_reference.as_deref()),
        }
    }
}

pub fn sale_rows(sales: &[Sale]) -> Vec<SaleRow> {
    sorted_by_date_desc(sales).iter().map(SaleRow::from).collect()
}
