use crate::error::PosResult;
use crate::models::{PaymentMethod, Sale};
use crate::sales_view::{card_suffix, format_sale_date};
use crate::store::sales;
use rusqlite::Connection;
use serde::Serialize;

pub const DEFAULT_WIDTH: usize = 48;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TicketLine {
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Receipt for one sale, shaped for both the web view and the printer.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Ticket {
    pub sale_id: i64,
    pub date: String,
    pub employee: String,
    pub client: String,
    pub payment_method: PaymentMethod,
    /// `*1234` for card payments with a reference
    pub card: Option<String>,
    pub lines: Vec<TicketLine>,
    pub total: f64,
    pub amount_received: f64,
    pub change: f64,
}

impl Ticket {
    pub fn from_sale(sale: &Sale) -> Self {
        let lines = sale
            .lines
            .iter()
            .map(|l| {
                // Legacy lines may have a zero quantity; print them as one unit
                let quantity = l.quantity.max(1);
                TicketLine {
                    name: l.name.clone(),
                    quantity,
                    unit_price: l.unit_price,
                    subtotal: l.unit_price * quantity as f64,
                }
            })
            .collect();

        let (card, change) = match sale.payment_method {
            PaymentMethod::Cash => (None, sale.amount_received - sale.total),
            PaymentMethod::Card => (
                card_suffix(sale.card_reference.as_deref()).map(|s| format!("*{}", s)),
                0.0,
            ),
        };

        Ticket {
            sale_id: sale.id,
            date: format_sale_date(&sale.date),
            employee: sale.employee_name.clone(),
            client: sale.client_name.clone(),
            payment_method: sale.payment_method,
            card,
            lines,
            total: sale.total,
            amount_received: sale.amount_received,
            change,
        }
    }

    /// Plain-text receipt, `width` columns wide.
    pub fn render(&self, width: usize) -> String {
        let width = width.max(32);
        let name_width = width - 25;
        let mut out = String::new();

        out.push_str(&center("PURCHASE TICKET", width));
        out.push_str(&center(&format!("Date: {}", self.date), width));
        out.push_str(&separator(width, '-'));

        out.push_str(&format!("Employee: {}\n", self.employee));
        out.push_str(&format!("Client: {}\n", self.client));
        let method = match self.payment_method {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
        };
        out.push_str(&format!("Payment method: {}\n", method));
        if let Some(card) = &self.card {
            out.push_str(&format!("Card: {}\n", card));
        }
        out.push_str(&separator(width, '-'));

        out.push_str(&format!(
            "{:<nw$} {:>5} {:>8} {:>9}\n",
            "PRODUCT",
            "QTY",
            "PRICE",
            "SUBTOTAL",
            nw = name_width
        ));
        if self.lines.is_empty() {
            out.push_str(&center("No products", width));
        }
        for line in &self.lines {
            let name: String = line.name.chars().take(name_width).collect();
            out.push_str(&format!(
                "{:<nw$} {:>5} {:>8.2} {:>9.2}\n",
                name,
                line.quantity,
                line.unit_price,
                line.subtotal,
                nw = name_width
            ));
        }
        out.push_str(&separator(width, '='));

        out.push_str(&amount_line("Total:", self.total, width));
        if self.payment_method == PaymentMethod::Cash {
            out.push_str(&amount_line("Cash received:", self.amount_received, width));
            out.push_str(&amount_line("Change:", self.change, width));
        }
        out.push_str(&separator(width, '-'));

        out.push_str(&center("Thank you for your purchase!", width));
        out.push_str(&center("Come back soon", width));
        out
    }
}

/// Ticket for the most recent sale; `None` when nothing has been sold yet.
pub fn latest_ticket(conn: &Connection) -> PosResult<Option<Ticket>> {
    Ok(sales::last_sale(conn)?.map(|s| Ticket::from_sale(&s)))
}

fn separator(width: usize, ch: char) -> String {
    format!("{}\n", ch.to_string().repeat(width))
}

fn center(text: &str, width: usize) -> String {
    let padded = format!("{:^width$}", text, width = width);
    format!("{}\n", padded.trim_end())
}

fn amount_line(label: &str, amount: f64, width: usize) -> String {
    let value = format!("${:.2}", amount);
    let spaces = width.saturating_sub(label.chars().count() + value.len());
    format!("{}{}{}\n", label, " ".repeat(spaces), value)
}
