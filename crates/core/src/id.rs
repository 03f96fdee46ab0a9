//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! impl_uuid_newtype {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::validation(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(
    /// Identifier of a user (actor identity).
    UserId,
    "UserId"
);
impl_uuid_newtype!(
    /// Identifier of a catalog product.
    ProductId,
    "ProductId"
);
impl_uuid_newtype!(
    /// Identifier of a supplier.
    SupplierId,
    "SupplierId"
);
impl_uuid_newtype!(
    /// Identifier of a B2B customer.
    CustomerId,
    "CustomerId"
);
impl_uuid_newtype!(
    /// Identifier of a warehouse (carried as opaque metadata on documents).
    WarehouseId,
    "WarehouseId"
);
impl_uuid_newtype!(
    /// Identifier of a purchase order.
    PurchaseOrderId,
    "PurchaseOrderId"
);
impl_uuid_newtype!(
    /// Identifier of a goods received note.
    GrnId,
    "GrnId"
);
impl_uuid_newtype!(
    /// Identifier of a purchase invoice.
    PurchaseInvoiceId,
    "PurchaseInvoiceId"
);
impl_uuid_newtype!(
    /// Identifier of a sales quotation.
    QuotationId,
    "QuotationId"
);
impl_uuid_newtype!(
    /// Identifier of a sales order.
    SalesOrderId,
    "SalesOrderId"
);
impl_uuid_newtype!(
    /// Identifier of a sales invoice.
    SalesInvoiceId,
    "SalesInvoiceId"
);
impl_uuid_newtype!(
    /// Identifier of a payment record.
    PaymentId,
    "PaymentId"
);
impl_uuid_newtype!(
    /// Identifier of one inventory log row.
    InventoryLogId,
    "InventoryLogId"
);
impl_uuid_newtype!(
    /// Groups the log rows written by one multi-product transaction.
    StockTxnId,
    "StockTxnId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_string() {
        let id = ProductId::new();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<SupplierId>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
