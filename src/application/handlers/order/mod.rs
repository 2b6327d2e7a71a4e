//! Order operations: listing, checkout, and webhook reconciliation.

#[cfg(test)]
pub(crate) mod testing;

mod create_invoice;
mod create_payment_intent;
mod handle_payment_webhook;
mod list_orders;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceHandler, CreateInvoiceResult};
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use list_orders::{ListOrdersHandler, ListOrdersQuery};
