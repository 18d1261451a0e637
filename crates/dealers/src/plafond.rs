//! Plafond (dealer credit ceiling) display rules.

use dealerdesk_core::Amount;

use crate::dealer::Dealer;

/// Anything that can be shown as a plafond.
///
/// Implemented for raw amounts, dealers, references and options, so that
/// [`format_plafond`] accepts every shape the UI hands it.
pub trait Plafond {
    /// Amount to display, or `None` when there is nothing to show.
    fn plafond(&self) -> Option<Amount>;
}

impl Plafond for Amount {
    fn plafond(&self) -> Option<Amount> {
        Some(*self)
    }
}

impl Plafond for Dealer {
    /// `nuovo_plafond` wins whenever it is present, zero included; otherwise
    /// the credit limit; otherwise zero.
    fn plafond(&self) -> Option<Amount> {
        Some(self.nuovo_plafond.or(self.credit_limit).unwrap_or(Amount::ZERO))
    }
}

impl<T: Plafond + ?Sized> Plafond for &T {
    fn plafond(&self) -> Option<Amount> {
        (**self).plafond()
    }
}

impl<T: Plafond> Plafond for Option<T> {
    fn plafond(&self) -> Option<Amount> {
        self.as_ref().and_then(Plafond::plafond)
    }
}

/// Format a plafond as `"<grouped amount> €"`; missing input shows `"0 €"`.
pub fn format_plafond<P: Plafond + ?Sized>(value: &P) -> String {
    let amount = value.plafond().unwrap_or(Amount::ZERO);
    let formatted = format!("{} €", format_amount(amount));
    tracing::trace!(cents = amount.cents(), %formatted, "formatted plafond");
    formatted
}

/// Thousands-grouped amount with `,` separators.
///
/// Cents are only shown when non-zero, without trailing zeros
/// (`1500.50` → `1,500.5`).
pub fn format_amount(amount: Amount) -> String {
    let cents = amount.cents().unsigned_abs();
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    if amount.is_negative() {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if fraction != 0 {
        let digits = format!("{fraction:02}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}
