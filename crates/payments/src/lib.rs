//! Payments domain module.

pub mod payment;

pub use payment::{NewPayment, Payment, PaymentMethod, PaymentTarget};
