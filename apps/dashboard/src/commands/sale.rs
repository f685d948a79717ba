//! # Sale Commands

use fluir_core::{Money, Sale};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DashboardState;

/// Sale form contents, as typed by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSaleRequest {
    pub product_name: String,
    /// Decimal text, `.` or `,` separator.
    pub unit_price: String,
    pub quantity: i64,
}

/// Records a sale stamped with the current instant.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add_sale({ productName, unitPrice: "49,90", quantity: 3 })            │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  1. Parse unit price text ──► Money (cents)                             │
/// │  2. Ledger append ──────────► validate, total = price × qty             │
/// │  3. Return the recorded Sale                                            │
/// │                                                                         │
/// │  Any failure: VALIDATION_ERROR, ledger unchanged                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn add_sale(state: &DashboardState, request: AddSaleRequest) -> Result<Sale, ApiError> {
    debug!(product = %request.product_name, "add_sale command");

    let unit_price: Money = request.unit_price.parse()?;
    let sale = state.with_dashboard_mut(|d| {
        d.ledger
            .append(&request.product_name, unit_price, request.quantity)
    })?;

    info!(
        sale_id = %sale.id(),
        product = %sale.product_name(),
        total = %sale.total(),
        "Sale recorded"
    );
    Ok(sale)
}

/// All sales in insertion order.
pub fn list_sales(state: &DashboardState) -> Vec<Sale> {
    debug!("list_sales command");
    state.with_dashboard(|d| d.ledger.all().to_vec())
}
