use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{InvoiceError, Result};
use crate::images::LogoImage;

/// One billed line: a name, how many, and the price of one.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl InvoiceLineItem {
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        InvoiceLineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price` at full precision, or `None` when the
    /// product does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Everything printed above the item table, plus the tax rate and
/// currency label the table needs.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
    pub company_name: String,
    pub customer_name: String,
    pub customer_email: String,
    /// Display label only; never used in arithmetic.
    pub currency_symbol: String,
    /// Percentage in `[0, 100]`.
    pub tax_percent: Decimal,
    /// Sampled once when the header is built. Every date and time
    /// printed on the page derives from this value.
    pub issued_at: NaiveDateTime,
    pub logo: Option<LogoImage>,
}

impl InvoiceHeader {
    /// Build a header stamped with the current local time.
    pub fn new(
        company_name: impl Into<String>,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        currency_symbol: impl Into<String>,
        tax_percent: Decimal,
    ) -> Self {
        InvoiceHeader {
            company_name: company_name.into(),
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            currency_symbol: currency_symbol.into(),
            tax_percent,
            issued_at: Local::now().naive_local(),
            logo: None,
        }
    }

    /// Replace the issue timestamp. Needed for reproducible output.
    pub fn issued_at(mut self, at: NaiveDateTime) -> Self {
        self.issued_at = at;
        self
    }

    pub fn with_logo(mut self, logo: LogoImage) -> Self {
        self.logo = Some(logo);
        self
    }

    /// `YYYY-MM-DD`
    pub fn issue_date(&self) -> String {
        self.issued_at.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM:SS`
    pub fn issue_time(&self) -> String {
        self.issued_at.format("%H:%M:%S").to_string()
    }

    /// Reject headers that would print a nonsensical document.
    pub fn validate(&self) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(InvoiceError::invalid_input("customer name is empty"));
        }
        if self.customer_email.trim().is_empty() {
            return Err(InvoiceError::invalid_input("customer email is empty"));
        }
        Ok(())
    }
}
