//! Purchase-side document operations: orders, goods receipts, invoices.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use anvil_auth::{Actor, Permission, PermissionGate};
use anvil_core::{DomainError, DomainResult, GrnId, PurchaseInvoiceId, PurchaseOrderId};
use anvil_inventory::{StockContext, StockSource, TransactionType};
use anvil_parties::PartyKind;
use anvil_purchasing::{
    GoodsReceivedNote, NewGrn, NewPurchaseInvoice, NewPurchaseOrder, PurchaseInvoice,
    PurchaseOrder,
};

use crate::engine::{BalanceAdjustmentEngine, StockAdjustmentEngine};
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct PurchasingService {
    store: Arc<LedgerStore>,
    gate: Arc<PermissionGate>,
}

impl PurchasingService {
    pub fn new(store: Arc<LedgerStore>, gate: Arc<PermissionGate>) -> Self {
        Self { store, gate }
    }

    pub fn create_purchase_order(
        &self,
        actor: &Actor,
        input: NewPurchaseOrder,
    ) -> DomainResult<PurchaseOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_orders", "manage"))?;
        let actor_id = actor.id;
        let po = self.store.transaction(move |state| {
            state.supplier(input.supplier_id)?;
            for line in &input.items {
                state.product(line.product_id)?;
            }
            let po = PurchaseOrder::create(input, actor_id, Utc::now())?;
            let id = po.id;
            state.insert_purchase_order(po)?;
            state.purchase_order(id).cloned()
        })?;
        info!(number = %po.number, total = %po.totals.total, "purchase order created");
        Ok(po)
    }

    pub fn submit_purchase_order(
        &self,
        actor: &Actor,
        id: PurchaseOrderId,
    ) -> DomainResult<PurchaseOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_orders", "manage"))?;
        self.store.transaction(|state| {
            state.purchase_order_mut(id)?.submit()?;
            state.purchase_order(id).cloned()
        })
    }

    pub fn approve_purchase_order(
        &self,
        actor: &Actor,
        id: PurchaseOrderId,
    ) -> DomainResult<PurchaseOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_orders", "approve"))?;
        self.store.transaction(|state| {
            state.purchase_order_mut(id)?.approve()?;
            state.purchase_order(id).cloned()
        })
    }

    pub fn cancel_purchase_order(
        &self,
        actor: &Actor,
        id: PurchaseOrderId,
    ) -> DomainResult<PurchaseOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_orders", "manage"))?;
        self.store.transaction(|state| {
            state.purchase_order_mut(id)?.cancel()?;
            state.purchase_order(id).cloned()
        })
    }

    /// Book a goods receipt: stock in, one inward log row per line, and the
    /// linked purchase order advanced to Received or PartiallyReceived based
    /// on cumulative coverage. All-or-nothing.
    pub fn create_grn(&self, actor: &Actor, input: NewGrn) -> DomainResult<GoodsReceivedNote> {
        self.gate.authorize(actor, &Permission::scoped("grn", "manage"))?;
        let actor_id = actor.id;
        let grn = self.store.transaction(move |state| {
            let now = Utc::now();
            let supplier_name = state.supplier(input.supplier_id)?.name.clone();
            if let Some(po_id) = input.po_id {
                let po = state.purchase_order(po_id)?;
                if po.supplier_id != input.supplier_id {
                    return Err(DomainError::validation(format!(
                        "purchase order {} belongs to a different supplier",
                        po.number
                    )));
                }
                if !po.can_receive() {
                    return Err(DomainError::invalid_transition(format!(
                        "purchase order {} cannot accept receipts from {:?}",
                        po.number, po.status
                    )));
                }
            }
            for line in &input.items {
                state.product(line.product_id)?;
            }

            let grn = GoodsReceivedNote::create(input, actor_id, now)?;
            let grn_id = grn.id;
            let po_id = grn.po_id;
            let items = grn.items.clone();
            let context = StockContext::new(StockSource::GoodsReceipt)
                .with_document(grn.number.clone())
                .with_counterparty(PartyKind::Supplier, supplier_name);
            state.insert_grn(grn)?;

            for item in &items {
                StockAdjustmentEngine::adjust(
                    state,
                    item.product_id,
                    item.received_quantity,
                    TransactionType::Inward,
                    Some(item.unit_price),
                    context.clone(),
                    None,
                    actor_id,
                    now,
                )?;
            }

            if let Some(po_id) = po_id {
                let fully_received = {
                    let po = state.purchase_order(po_id)?;
                    po.items.iter().all(|line| {
                        let received: i64 = state
                            .completed_grns_for_po(po_id)
                            .map(|g| g.received_quantity(line.product_id))
                            .sum();
                        received >= po.ordered_quantity(line.product_id)
                    })
                };
                state.purchase_order_mut(po_id)?.record_receipt(fully_received)?;
            }
            state.grn(grn_id).cloned()
        })?;
        info!(number = %grn.number, lines = grn.items.len(), "GRN booked");
        Ok(grn)
    }

    /// Cancel a receipt, reversing the received stock with outward rows.
    /// Fails with `InsufficientStock` if the goods already left the
    /// warehouse.
    pub fn cancel_grn(&self, actor: &Actor, id: GrnId) -> DomainResult<GoodsReceivedNote> {
        self.gate.authorize(actor, &Permission::scoped("grn", "manage"))?;
        let actor_id = actor.id;
        let grn = self.store.transaction(move |state| {
            let now = Utc::now();
            state.grn_mut(id)?.cancel()?;
            let grn = state.grn(id)?.clone();
            let context = StockContext::new(StockSource::GoodsReceiptReversal)
                .with_document(grn.number.clone());
            for item in &grn.items {
                StockAdjustmentEngine::adjust(
                    state,
                    item.product_id,
                    -item.received_quantity,
                    TransactionType::Outward,
                    Some(item.unit_price),
                    context.clone(),
                    None,
                    actor_id,
                    now,
                )?;
            }
            Ok(grn)
        })?;
        info!(number = %grn.number, "GRN cancelled");
        Ok(grn)
    }

    /// Book a payable: totals, GST split, due date, supplier balance up by
    /// the invoice total.
    pub fn create_purchase_invoice(
        &self,
        actor: &Actor,
        input: NewPurchaseInvoice,
    ) -> DomainResult<PurchaseInvoice> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_invoices", "manage"))?;
        let actor_id = actor.id;
        let invoice = self.store.transaction(move |state| {
            state.supplier(input.supplier_id)?;
            if let Some(grn_id) = input.grn_id {
                state.grn(grn_id)?;
            }
            for line in &input.items {
                state.product(line.product_id)?;
            }
            let invoice = PurchaseInvoice::create(input, actor_id, Utc::now())?;
            let id = invoice.id;
            let supplier_id = invoice.supplier_id;
            let total = invoice.totals.total;
            state.insert_purchase_invoice(invoice)?;
            BalanceAdjustmentEngine::adjust_supplier(state, supplier_id, total)?;
            state.purchase_invoice(id).cloned()
        })?;
        info!(number = %invoice.number, total = %invoice.totals.total, "purchase invoice booked");
        Ok(invoice)
    }

    /// Cancel an unpaid payable and reverse the supplier balance.
    pub fn cancel_purchase_invoice(
        &self,
        actor: &Actor,
        id: PurchaseInvoiceId,
    ) -> DomainResult<PurchaseInvoice> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_invoices", "manage"))?;
        let invoice = self.store.transaction(|state| {
            state.purchase_invoice_mut(id)?.cancel()?;
            let invoice = state.purchase_invoice(id)?.clone();
            BalanceAdjustmentEngine::adjust_supplier(
                state,
                invoice.supplier_id,
                -invoice.totals.total,
            )?;
            Ok(invoice)
        })?;
        info!(number = %invoice.number, "purchase invoice cancelled");
        Ok(invoice)
    }

    pub fn get_purchase_order(
        &self,
        actor: &Actor,
        id: PurchaseOrderId,
    ) -> DomainResult<PurchaseOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_orders", "view"))?;
        self.store.read(|state| state.purchase_order(id).cloned())
    }

    pub fn list_purchase_orders(&self, actor: &Actor) -> DomainResult<Vec<PurchaseOrder>> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_orders", "view"))?;
        Ok(self
            .store
            .read(|state| state.purchase_orders_iter().cloned().collect()))
    }

    pub fn get_grn(&self, actor: &Actor, id: GrnId) -> DomainResult<GoodsReceivedNote> {
        self.gate.authorize(actor, &Permission::scoped("grn", "view"))?;
        self.store.read(|state| state.grn(id).cloned())
    }

    pub fn list_grns(&self, actor: &Actor) -> DomainResult<Vec<GoodsReceivedNote>> {
        self.gate.authorize(actor, &Permission::scoped("grn", "view"))?;
        Ok(self.store.read(|state| state.grns_iter().cloned().collect()))
    }

    pub fn get_purchase_invoice(
        &self,
        actor: &Actor,
        id: PurchaseInvoiceId,
    ) -> DomainResult<PurchaseInvoice> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_invoices", "view"))?;
        self.store.read(|state| state.purchase_invoice(id).cloned())
    }

    pub fn list_purchase_invoices(&self, actor: &Actor) -> DomainResult<Vec<PurchaseInvoice>> {
        self.gate
            .authorize(actor, &Permission::scoped("purchase_invoices", "view"))?;
        Ok(self
            .store
            .read(|state| state.purchase_invoices_iter().cloned().collect()))
    }
}
