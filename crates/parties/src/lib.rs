//! Parties domain module: suppliers and B2B customers.

pub mod party;

pub use party::{
    B2BCustomer, CustomerType, NewCustomer, NewSupplier, PartyCode, PartyKind, Supplier,
};
