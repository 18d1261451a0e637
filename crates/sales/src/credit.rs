//! Dealer credit checks.

use dealerdesk_core::Amount;
use dealerdesk_dealers::Dealer;

use crate::order::Order;

/// Credit granted to dealers that have no credit limit on record.
pub const DEFAULT_CREDIT_LIMIT: Amount = Amount::from_euros(300_000);

/// Credit available to `dealer`.
///
/// A recorded limit is returned as-is, zero included; only a missing limit
/// falls back to [`DEFAULT_CREDIT_LIMIT`]. `current_order` is the order being
/// edited and is not yet deducted.
pub fn calculate_available_credit(dealer: &Dealer, current_order: Option<&Order>) -> Amount {
    let available = dealer.credit_limit.unwrap_or(DEFAULT_CREDIT_LIMIT);
    tracing::debug!(
        dealer_id = %dealer.id,
        editing_order = ?current_order.map(|o| o.id),
        available = %available,
        "calculated available credit"
    );
    available
}

/// Whether `dealer` has enough credit for an order of `order_amount`.
pub fn can_place_order(dealer: &Dealer, order_amount: Amount) -> bool {
    order_amount <= calculate_available_credit(dealer, None)
}
