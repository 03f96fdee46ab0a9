//! Manual stock movements, bulk entries, and trail reconciliation.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use anvil_auth::{Actor, Permission, PermissionGate};
use anvil_core::{DomainError, DomainResult, ProductId};
use anvil_inventory::{InventoryLog, StockContext, StockSource, TransactionType};
use anvil_parties::PartyKind;

use crate::engine::StockAdjustmentEngine;
use crate::store::LedgerStore;

/// A single manual correction.
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    /// Signed delta; positive adds stock, negative removes it.
    pub delta: i64,
    pub reason: String,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkEntryDirection {
    Inward,
    Outward,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkEntryLine {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

/// A multi-product inward or outward entry sharing one invoice context.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkEntry {
    pub direction: BulkEntryDirection,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub party_kind: Option<PartyKind>,
    #[serde(default)]
    pub counterparty: Option<String>,
    pub lines: Vec<BulkEntryLine>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of replaying a product's trail from zero.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub product_id: ProductId,
    pub current_stock: i64,
    pub replayed_stock: i64,
    pub log_rows: usize,
    pub consistent: bool,
}

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<LedgerStore>,
    gate: Arc<PermissionGate>,
}

impl InventoryService {
    pub fn new(store: Arc<LedgerStore>, gate: Arc<PermissionGate>) -> Self {
        Self { store, gate }
    }

    /// One manual adjustment with a reason; writes one `manual` log row.
    pub fn adjust_stock(&self, actor: &Actor, input: StockAdjustment) -> DomainResult<i64> {
        self.gate.authorize(actor, &Permission::scoped("inventory", "manage"))?;
        if input.delta == 0 {
            return Err(DomainError::validation("adjustment delta cannot be zero"));
        }
        let reason = input.reason.trim().to_string();
        if reason.is_empty() {
            return Err(DomainError::validation("adjustment reason cannot be empty"));
        }
        let actor_id = actor.id;
        let (product_id, delta) = (input.product_id, input.delta);
        let new_stock = self.store.transaction(move |state| {
            StockAdjustmentEngine::adjust(
                state,
                product_id,
                delta,
                TransactionType::Manual,
                input.unit_price,
                StockContext::new(StockSource::ManualAdjustment).with_reason(reason),
                None,
                actor_id,
                Utc::now(),
            )
        })?;
        info!(product = %product_id, delta, new_stock, "stock adjusted");
        Ok(new_stock)
    }

    /// Multi-product entry; one log row per line, all rows share a txn id
    /// and counterparty snapshot. All-or-nothing.
    pub fn record_bulk_entry(&self, actor: &Actor, input: BulkEntry) -> DomainResult<Vec<i64>> {
        self.gate.authorize(actor, &Permission::scoped("inventory", "manage"))?;
        if input.lines.is_empty() {
            return Err(DomainError::validation("bulk entry must have at least one line"));
        }
        let mut context = StockContext::new(StockSource::BulkEntry);
        if let Some(number) = &input.invoice_number {
            context = context.with_document(number.parse()?);
        }
        if let (Some(kind), Some(name)) = (input.party_kind, input.counterparty.clone()) {
            context = context.with_counterparty(kind, name);
        }
        let actor_id = actor.id;
        let line_count = input.lines.len();
        let levels = self.store.transaction(move |state| {
            let now = Utc::now();
            let mut levels = Vec::with_capacity(input.lines.len());
            for line in &input.lines {
                if line.quantity <= 0 {
                    return Err(DomainError::validation(format!(
                        "bulk entry quantity must be positive, got {}",
                        line.quantity
                    )));
                }
                let (delta, transaction_type) = match input.direction {
                    BulkEntryDirection::Inward => (line.quantity, TransactionType::Inward),
                    BulkEntryDirection::Outward => (-line.quantity, TransactionType::Outward),
                };
                levels.push(StockAdjustmentEngine::adjust(
                    state,
                    line.product_id,
                    delta,
                    transaction_type,
                    line.unit_price,
                    context.clone(),
                    input.notes.clone(),
                    actor_id,
                    now,
                )?);
            }
            Ok(levels)
        })?;
        info!(lines = line_count, "bulk inventory entry recorded");
        Ok(levels)
    }

    /// The trail, optionally filtered by product, in insertion order.
    pub fn inventory_logs(
        &self,
        actor: &Actor,
        product_id: Option<ProductId>,
    ) -> DomainResult<Vec<InventoryLog>> {
        self.gate.authorize(actor, &Permission::scoped("inventory", "view"))?;
        Ok(self.store.read(|state| {
            state
                .inventory_log()
                .iter()
                .filter(|row| product_id.is_none_or(|id| row.product_id == id))
                .cloned()
                .collect()
        }))
    }

    /// Replay a product's trail from zero and compare against live stock.
    pub fn reconcile_product(
        &self,
        actor: &Actor,
        product_id: ProductId,
    ) -> DomainResult<Reconciliation> {
        self.gate.authorize(actor, &Permission::scoped("inventory", "view"))?;
        self.store.read(|state| {
            let current_stock = state.product(product_id)?.stock();
            let rows: Vec<_> = state
                .inventory_log()
                .iter()
                .filter(|row| row.product_id == product_id)
                .collect();
            let replayed_stock: i64 = rows.iter().map(|row| row.delta()).sum();
            Ok(Reconciliation {
                product_id,
                current_stock,
                replayed_stock,
                log_rows: rows.len(),
                consistent: replayed_stock == current_stock,
            })
        })
    }
}
