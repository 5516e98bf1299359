use crate::models::{Product, SaleLine};
use serde::{Deserialize, Serialize};

/// Largest quantity a single cart line can hold.
pub const MAX_QUANTITY: i32 = 9_999;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i32,
}

impl CartItem {
    pub fn subtotal(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

/// Products picked during one sales-entry session, in the order they were added.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit; a product already in the cart gets its quantity bumped.
    pub fn add_product(&mut self, product: &Product) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1).min(MAX_QUANTITY),
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Quantities below 1 are ignored; use `remove` to drop a line.
    /// Anything above `MAX_QUANTITY` is capped.
    pub fn set_quantity(&mut self, product_id: i64, quantity: i32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity.min(MAX_QUANTITY);
        }
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|i| i.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn lines(&self) -> Vec<SaleLine> {
        self.items
            .iter()
            .map(|i| SaleLine {
                product_id: i.product.id,
                name: i.product.name.clone(),
                quantity: i.quantity,
                unit_price: i.product.price,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("P{}", id),
            price,
            image: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn adding_same_product_bumps_quantity() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.5));
        cart.add_product(&product(2, 1.0));
        cart.add_product(&product(1, 2.5));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 2);
        assert!((cart.total() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn quantity_below_one_is_ignored() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 3.0));
        cart.set_quantity(1, 4);
        cart.set_quantity(1, 0);
        cart.set_quantity(99, 7);

        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn quantity_is_capped() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 2.0));
        cart.set_quantity(1, i32::MAX);
        assert_eq!(cart.items()[0].quantity, MAX_QUANTITY);

        cart.add_product(&product(1, 2.0));
        assert_eq!(cart.items()[0].quantity, MAX_QUANTITY);
        assert!(cart.total() > 0.0);
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_product(&product(1, 3.0));
        cart.add_product(&product(2, 3.0));
        cart.remove(1);
        assert_eq!(cart.items()[0].product.id, 2);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }
}
