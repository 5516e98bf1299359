use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub joining_date: String,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub joining_date: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub joining_date: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateClient {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[serde(alias = "efectivo")]
    Cash,
    #[serde(alias = "tarjeta")]
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" | "efectivo" => Some(PaymentMethod::Cash),
            "card" | "tarjeta" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

/// One line of a recorded sale; name and price are copied from the product at checkout.
/// Aliases accept the field names of legacy browser backups.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaleLine {
    #[serde(alias = "id")]
    pub product_id: i64,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "cantidad", default = "default_quantity")]
    pub quantity: i32,
    #[serde(alias = "precio", default)]
    pub unit_price: f64,
}

impl SaleLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Sale {
    pub id: i64,
    #[serde(alias = "fecha")]
    pub date: String,
    #[serde(alias = "productos", default)]
    pub lines: Vec<SaleLine>,
    #[serde(default)]
    pub total: f64,
    #[serde(alias = "empleado", deserialize_with = "int_or_string")]
    pub employee_id: i64,
    #[serde(alias = "empleadoNombre", default)]
    pub employee_name: String,
    #[serde(alias = "cliente", default)]
    pub client_name: String,
    #[serde(alias = "metodoPago")]
    pub payment_method: PaymentMethod,
    #[serde(alias = "montoRecibido", default)]
    pub amount_received: f64,
    #[serde(alias = "tarjetaNumero", default)]
    pub card_reference: Option<String>,
}

/// A sale ready to be persisted, before it has an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub date: String,
    pub lines: Vec<SaleLine>,
    pub total: f64,
    pub employee_id: i64,
    pub employee_name: String,
    pub client_name: String,
    pub payment_method: PaymentMethod,
    pub amount_received: f64,
    pub card_reference: Option<String>,
}

impl NewSale {
    pub fn into_sale(self, id: i64) -> Sale {
        Sale {
            id,
            date: self.date,
            lines: self.lines,
            total: self.total,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            client_name: self.client_name,
            payment_method: self.payment_method,
            amount_received: self.amount_received,
            card_reference: self.card_reference,
        }
    }
}

// Legacy backups stored the employee id as a string.
fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
