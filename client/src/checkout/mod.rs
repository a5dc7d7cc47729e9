// client/src/checkout/mod.rs

//! Checkout through the hosted payment page, and the signed callback that
//! confirms a payment.

pub mod handoff;
pub mod ledger;
pub mod signature;

pub use handoff::{CheckoutHandoff, CheckoutOutcome};
pub use ledger::{PaymentCallback, PaymentLedger, PaymentRecord, PaymentStatus};
pub use signature::{CallbackVerifier, SIGNATURE_HEADER};
