//! # Cart
//!
//! The cart value and its transitions.
//!
//! ## Replace, Never Mutate
//! Every transition borrows the current cart and returns a **new** one.
//! The caller decides when (and whether) the new value replaces the old:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Frontend Action        Transition                 Result               │
//! │  ───────────────        ──────────                 ──────               │
//! │                                                                         │
//! │  Add (new product) ───► with_product(p) ─────────► [..., {p, 1}]        │
//! │                                                                         │
//! │  Add (in cart) ───────► incremented(id, stock) ──► amount + 1           │
//! │                                                                         │
//! │  Change Quantity ─────► with_amount(id, n, stock) ► amount = n          │
//! │                                                                         │
//! │  Click Remove ────────► without(id) ─────────────► entry dropped        │
//! │                                                                         │
//! │  Any rule broken ─────► Err(CoreError) ──────────► old cart untouched   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries keep their position: increments and quantity changes rewrite the
//! entry in place, removals close the gap, new products go to the end.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartEntry, Product, ProductId, StockLevel};
use crate::validation::{validate_amount, validate_entries};

/// An ordered set of cart entries, unique by product id.
///
/// ## Invariants
/// - Entries are unique by product id
/// - Every amount is at least 1
///
/// Both hold for any `Cart` value: the only constructors are the empty cart,
/// [`Cart::from_entries`] (validated) and the transitions below.
///
/// ## Serialization
/// A cart serializes as a bare JSON array of [`CartEntry`] objects, the exact
/// shape written to local storage. Deserialization runs the same validation
/// as [`Cart::from_entries`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Builds a cart from raw entries, enforcing the invariants.
    pub fn from_entries(entries: Vec<CartEntry>) -> CoreResult<Self> {
        validate_entries(&entries)?;
        Ok(Cart { entries })
    }

    /// Parses a cart from its persisted JSON form.
    ///
    /// ## Errors
    /// - `CorruptCart` if the text is not a JSON array of entries
    /// - `Validation` if entries break an invariant
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let entries: Vec<CartEntry> =
            serde_json::from_str(json).map_err(|e| CoreError::CorruptCart(e.to_string()))?;
        Cart::from_entries(entries)
    }

    /// Serializes the cart to its persisted JSON form.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(&self.entries).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Returns the entries in cart order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Consumes the cart, returning its entries.
    pub fn into_entries(self) -> Vec<CartEntry> {
        self.entries
    }

    /// Finds the entry for a product.
    pub fn find(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == product_id)
    }

    /// Checks whether a product has an entry.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Returns the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total quantity of all entries, clamped at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.entries
            .iter()
            .map(|e| e.amount)
            .fold(0, i64::saturating_add)
    }

    /// Calculates the subtotal across all entries.
    pub fn subtotal(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Summarizes the cart for display.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Appends a product with an amount of one.
    ///
    /// ## Errors
    /// - `AlreadyInCart` if the product has an entry; use [`Cart::incremented`]
    pub fn with_product(&self, product: Product) -> CoreResult<Cart> {
        if self.contains(product.id) {
            return Err(CoreError::AlreadyInCart(product.id));
        }

        let mut entries = self.entries.clone();
        entries.push(CartEntry::new(product));
        Ok(Cart { entries })
    }

    /// Raises a product's amount by one, bounded by `stock`.
    ///
    /// ## Errors
    /// - `ProductNotInCart` if the product has no entry
    /// - `InsufficientStock` if `amount + 1` exceeds `stock`
    pub fn incremented(&self, product_id: ProductId, stock: StockLevel) -> CoreResult<Cart> {
        let current = self
            .find(product_id)
            .ok_or(CoreError::ProductNotInCart(product_id))?;

        self.replace_amount(product_id, current.amount.saturating_add(1), stock)
    }

    /// Sets a product's amount, bounded by `stock`.
    ///
    /// ## Errors
    /// - `InvalidAmount` if `amount < 1`
    /// - `ProductNotInCart` if the product has no entry
    /// - `InsufficientStock` if `amount` exceeds `stock`
    pub fn with_amount(
        &self,
        product_id: ProductId,
        amount: i64,
        stock: StockLevel,
    ) -> CoreResult<Cart> {
        if validate_amount(amount).is_err() {
            return Err(CoreError::InvalidAmount(amount));
        }

        if !self.contains(product_id) {
            return Err(CoreError::ProductNotInCart(product_id));
        }

        self.replace_amount(product_id, amount, stock)
    }

    /// Drops a product's entry, keeping the others in order.
    ///
    /// ## Errors
    /// - `ProductNotInCart` if the product has no entry
    pub fn without(&self, product_id: ProductId) -> CoreResult<Cart> {
        if !self.contains(product_id) {
            return Err(CoreError::ProductNotInCart(product_id));
        }

        let entries = self
            .entries
            .iter()
            .filter(|e| e.id() != product_id)
            .cloned()
            .collect();
        Ok(Cart { entries })
    }

    /// Returns an empty cart.
    pub fn cleared(&self) -> Cart {
        Cart::new()
    }

    fn replace_amount(
        &self,
        product_id: ProductId,
        amount: i64,
        stock: StockLevel,
    ) -> CoreResult<Cart> {
        if !stock.allows(amount) {
            return Err(CoreError::InsufficientStock {
                product_id,
                available: stock.amount,
                requested: amount,
            });
        }

        let entries = self
            .entries
            .iter()
            .map(|e| {
                if e.id() == product_id {
                    e.with_amount(amount)
                } else {
                    e.clone()
                }
            })
            .collect();
        Ok(Cart { entries })
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<CartEntry>::deserialize(deserializer)?;
        Cart::from_entries(entries).map_err(de::Error::custom)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products.
    pub item_count: u32,

    /// Sum of all amounts.
    #[ts(type = "number")]
    pub total_quantity: i64,

    /// Sum of all line totals.
    #[ts(type = "number")]
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: u32::try_from(cart.len()).unwrap_or(u32::MAX),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, price_cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(price_cents),
            format!("https://cdn.example.com/{}.jpg", id),
        )
    }

    fn ids(cart: &Cart) -> Vec<u32> {
        cart.entries().iter().map(|e| e.id().get()).collect()
    }

    fn cart_of(items: &[(u32, i64)]) -> Cart {
        let entries = items
            .iter()
            .map(|&(id, amount)| CartEntry::new(product(id, 1000)).with_amount(amount))
            .collect();
        Cart::from_entries(entries).unwrap()
    }

    #[test]
    fn test_with_product_appends_with_amount_one() {
        let cart = cart_of(&[(1, 2)]);
        let next = cart.with_product(product(5, 13990)).unwrap();

        assert_eq!(ids(&next), vec![1, 5]);
        assert_eq!(next.find(ProductId::new(5)).unwrap().amount, 1);
        // Original untouched
        assert_eq!(ids(&cart), vec![1]);
    }

    #[test]
    fn test_with_product_rejects_existing() {
        let cart = cart_of(&[(5, 1)]);
        assert_eq!(
            cart.with_product(product(5, 1000)),
            Err(CoreError::AlreadyInCart(ProductId::new(5)))
        );
    }

    #[test]
    fn test_incremented_up_to_stock() {
        let mut cart = Cart::new().with_product(product(5, 1000)).unwrap();
        let stock = StockLevel::new(3);

        cart = cart.incremented(ProductId::new(5), stock).unwrap();
        cart = cart.incremented(ProductId::new(5), stock).unwrap();
        assert_eq!(cart.find(ProductId::new(5)).unwrap().amount, 3);

        let err = cart.incremented(ProductId::new(5), stock).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                product_id: ProductId::new(5),
                available: 3,
                requested: 4,
            }
        );
    }

    #[test]
    fn test_incremented_keeps_position() {
        let cart = cart_of(&[(1, 1), (2, 1), (3, 1)]);
        let next = cart.incremented(ProductId::new(2), StockLevel::new(10)).unwrap();

        assert_eq!(ids(&next), vec![1, 2, 3]);
        assert_eq!(next.find(ProductId::new(2)).unwrap().amount, 2);
        assert_eq!(next.find(ProductId::new(1)).unwrap().amount, 1);
    }

    #[test]
    fn test_with_amount_sets_exact_value() {
        let cart = cart_of(&[(5, 2)]);
        let next = cart
            .with_amount(ProductId::new(5), 7, StockLevel::new(10))
            .unwrap();
        assert_eq!(next.find(ProductId::new(5)).unwrap().amount, 7);
    }

    #[test]
    fn test_with_amount_rules() {
        let cart = cart_of(&[(5, 2)]);
        let stock = StockLevel::new(10);

        assert_eq!(
            cart.with_amount(ProductId::new(5), 0, stock),
            Err(CoreError::InvalidAmount(0))
        );
        assert_eq!(
            cart.with_amount(ProductId::new(8), 1, stock),
            Err(CoreError::ProductNotInCart(ProductId::new(8)))
        );
        assert!(matches!(
            cart.with_amount(ProductId::new(5), 11, stock),
            Err(CoreError::InsufficientStock { requested: 11, .. })
        ));
    }

    #[test]
    fn test_without_preserves_order() {
        let cart = cart_of(&[(1, 1), (2, 3), (3, 1)]);
        let next = cart.without(ProductId::new(2)).unwrap();

        assert_eq!(ids(&next), vec![1, 3]);
        assert_eq!(
            cart.without(ProductId::new(9)),
            Err(CoreError::ProductNotInCart(ProductId::new(9)))
        );
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new()
            .with_product(product(1, 999))
            .unwrap()
            .with_product(product(2, 250))
            .unwrap()
            .with_amount(ProductId::new(2), 4, StockLevel::new(5))
            .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.subtotal.cents(), 1999);
    }

    #[test]
    fn test_totals_of_oversized_saved_cart_clamp() {
        let json = r#"[
            {"id": 1, "title": "A", "price": 5e16, "image": "", "amount": 1},
            {"id": 2, "title": "B", "price": 5e16, "image": "", "amount": 1}
        ]"#;
        let cart = Cart::from_json(json).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal.cents(), i64::MAX);
        assert_eq!(totals.total_quantity, 2);
    }

    #[test]
    fn test_total_quantity_clamps() {
        let cart = cart_of(&[(1, i64::MAX), (2, 1)]);
        assert_eq!(cart.total_quantity(), i64::MAX);
        assert_eq!(cart.totals().total_quantity, i64::MAX);
    }

    #[test]
    fn test_json_shape_and_reload() {
        let cart = cart_of(&[(5, 2), (1, 1)]);
        let json = cart.to_json().unwrap();

        assert!(json.starts_with('['));
        assert_eq!(Cart::from_json(&json).unwrap(), cart);
    }

    #[test]
    fn test_from_json_rejects_bad_data() {
        assert!(matches!(
            Cart::from_json("not json"),
            Err(CoreError::CorruptCart(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"{"id": 1}"#),
            Err(CoreError::CorruptCart(_))
        ));
        assert!(matches!(
            Cart::from_json(r#"[{"id": 1, "title": "A", "price": 1, "image": "", "amount": 0}]"#),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let dupes = r#"[
            {"id": 1, "title": "A", "price": 1, "image": "", "amount": 1},
            {"id": 1, "title": "A", "price": 1, "image": "", "amount": 2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(dupes).is_err());
    }
}
