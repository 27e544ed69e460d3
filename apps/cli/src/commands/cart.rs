//! # Cart Commands
//!
//! One cart operation per invocation, then the resulting cart.
//!
//! ## Cart Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $ stockcart show                                                      │
//! │                                                                         │
//! │     ID  PRODUCT                          QTY        PRICE     SUBTOTAL  │
//! │      5  Tênis Runner                       2      $139.90      $279.80  │
//! │      2  Chinelo                            1       $20.00       $20.00  │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  2 products, 3 units                              TOTAL        $299.80  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use clap::Subcommand;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockcart_core::{Cart, CartEntry, CartTotals, ProductId, UpdateProductAmount};

use crate::state::{CartStorage, CartStore, InventoryClient, Notifier};

const TITLE_WIDTH: usize = 30;

/// Cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the cart
    Show,

    /// Add one unit of a product
    Add {
        /// Inventory product id
        product_id: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Inventory product id
        product_id: u32,
    },

    /// Set the quantity of a product already in the cart
    Update {
        /// Inventory product id
        product_id: u32,

        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Empty the cart
    Clear,
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartEntry>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.entries().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Runs one command against the store and returns the cart afterwards.
pub async fn execute<I, N, S>(store: &CartStore<I, N, S>, command: &CartCommand) -> CartResponse
where
    I: InventoryClient,
    N: Notifier,
    S: CartStorage,
{
    debug!(?command, "Executing cart command");

    match *command {
        CartCommand::Show => {}
        CartCommand::Add { product_id } => store.add_product(ProductId::new(product_id)).await,
        CartCommand::Remove { product_id } => {
            store.remove_product(ProductId::new(product_id)).await
        }
        CartCommand::Update { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId::new(product_id),
                    amount,
                })
                .await
        }
        CartCommand::Clear => store.clear().await,
    }

    CartResponse::from(&store.cart())
}

/// Formats the cart as a fixed-width table.
pub fn render_table(response: &CartResponse) -> String {
    if response.items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<width$} {:>5} {:>12} {:>12}",
        "ID",
        "PRODUCT",
        "QTY",
        "PRICE",
        "SUBTOTAL",
        width = TITLE_WIDTH
    );

    for entry in &response.items {
        let _ = writeln!(
            out,
            "{:>6}  {:<width$} {:>5} {:>12} {:>12}",
            entry.id(),
            truncate(&entry.product.title, TITLE_WIDTH),
            entry.amount,
            entry.product.price.to_string(),
            entry.line_total().to_string(),
            width = TITLE_WIDTH
        );
    }

    let totals = &response.totals;
    let rule = "─".repeat(6 + 2 + TITLE_WIDTH + 1 + 5 + 1 + 12 + 1 + 12);
    let summary = format!(
        "{} {}, {} {}",
        totals.item_count,
        plural(totals.item_count as i64, "product", "products"),
        totals.total_quantity,
        plural(totals.total_quantity, "unit", "units")
    );
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{:<width$} {:>12} {:>12}",
        summary,
        "TOTAL",
        totals.subtotal.to_string(),
        width = 6 + 2 + TITLE_WIDTH + 1 + 5
    );

    out
}

fn plural(count: i64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
