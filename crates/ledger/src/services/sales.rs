//! Sales-side document operations: quotations, orders, invoices.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use anvil_auth::{Actor, Permission, PermissionGate};
use anvil_core::{DomainError, DomainResult, QuotationId, SalesInvoiceId, SalesOrderId};
use anvil_inventory::{StockContext, StockSource, TransactionType};
use anvil_parties::PartyKind;
use anvil_sales::{
    NewQuotation, NewSalesInvoice, NewSalesOrder, SalesInvoice, SalesOrder, SalesQuotation,
};

use crate::engine::{BalanceAdjustmentEngine, StockAdjustmentEngine};
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct SalesService {
    store: Arc<LedgerStore>,
    gate: Arc<PermissionGate>,
}

impl SalesService {
    pub fn new(store: Arc<LedgerStore>, gate: Arc<PermissionGate>) -> Self {
        Self { store, gate }
    }

    pub fn create_quotation(
        &self,
        actor: &Actor,
        input: NewQuotation,
    ) -> DomainResult<SalesQuotation> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_quotations", "manage"))?;
        let actor_id = actor.id;
        self.store.transaction(move |state| {
            state.customer(input.customer_id)?;
            for line in &input.items {
                state.product(line.product_id)?;
            }
            let quotation = SalesQuotation::create(input, actor_id, Utc::now())?;
            let id = quotation.id;
            state.insert_quotation(quotation)?;
            state.quotation(id).cloned()
        })
    }

    pub fn send_quotation(&self, actor: &Actor, id: QuotationId) -> DomainResult<SalesQuotation> {
        self.quotation_transition(actor, id, |q| q.send())
    }

    pub fn accept_quotation(&self, actor: &Actor, id: QuotationId) -> DomainResult<SalesQuotation> {
        self.quotation_transition(actor, id, |q| q.accept())
    }

    pub fn reject_quotation(&self, actor: &Actor, id: QuotationId) -> DomainResult<SalesQuotation> {
        self.quotation_transition(actor, id, |q| q.reject())
    }

    pub fn expire_quotation(&self, actor: &Actor, id: QuotationId) -> DomainResult<SalesQuotation> {
        self.quotation_transition(actor, id, |q| q.expire())
    }

    fn quotation_transition(
        &self,
        actor: &Actor,
        id: QuotationId,
        apply: impl FnOnce(&mut SalesQuotation) -> DomainResult<()>,
    ) -> DomainResult<SalesQuotation> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_quotations", "manage"))?;
        self.store.transaction(move |state| {
            apply(state.quotation_mut(id)?)?;
            state.quotation(id).cloned()
        })
    }

    /// Create a sales order. Validates referents only; stock is not reserved
    /// until approval.
    pub fn create_sales_order(
        &self,
        actor: &Actor,
        input: NewSalesOrder,
    ) -> DomainResult<SalesOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "manage"))?;
        let actor_id = actor.id;
        let order = self.store.transaction(move |state| {
            state.customer(input.customer_id)?;
            if let Some(quotation_id) = input.quotation_id {
                state.quotation(quotation_id)?;
            }
            for line in &input.items {
                state.product(line.product_id)?;
            }
            let order = SalesOrder::create(input, actor_id, Utc::now())?;
            let id = order.id;
            state.insert_sales_order(order)?;
            state.sales_order(id).cloned()
        })?;
        info!(number = %order.number, total = %order.totals.total, "sales order created");
        Ok(order)
    }

    /// Pending → Confirmed, deducting stock for every line. Any shortfall
    /// aborts the whole transition.
    pub fn approve_sales_order(&self, actor: &Actor, id: SalesOrderId) -> DomainResult<SalesOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "approve"))?;
        let actor_id = actor.id;
        let order = self.store.transaction(move |state| {
            let now = Utc::now();
            state.sales_order_mut(id)?.confirm()?;
            let order = state.sales_order(id)?.clone();
            let customer_name = state.customer(order.customer_id)?.name.clone();
            let context = StockContext::new(StockSource::SalesOrder)
                .with_document(order.number.clone())
                .with_counterparty(PartyKind::Customer, customer_name);
            for item in &order.items {
                StockAdjustmentEngine::adjust(
                    state,
                    item.product_id,
                    -item.quantity,
                    TransactionType::Outward,
                    Some(item.unit_price),
                    context.clone(),
                    None,
                    actor_id,
                    now,
                )?;
            }
            Ok(order)
        })?;
        info!(number = %order.number, "sales order approved");
        Ok(order)
    }

    pub fn mark_sales_order_partially_delivered(
        &self,
        actor: &Actor,
        id: SalesOrderId,
    ) -> DomainResult<SalesOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "manage"))?;
        self.store.transaction(|state| {
            state.sales_order_mut(id)?.mark_partially_delivered()?;
            state.sales_order(id).cloned()
        })
    }

    pub fn mark_sales_order_delivered(
        &self,
        actor: &Actor,
        id: SalesOrderId,
    ) -> DomainResult<SalesOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "manage"))?;
        self.store.transaction(|state| {
            state.sales_order_mut(id)?.mark_delivered()?;
            state.sales_order(id).cloned()
        })
    }

    /// Cancel an order. Confirmed-or-later orders get their reserved stock
    /// restored; pending orders never held any.
    pub fn cancel_sales_order(&self, actor: &Actor, id: SalesOrderId) -> DomainResult<SalesOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "manage"))?;
        let actor_id = actor.id;
        let order = self.store.transaction(move |state| {
            let now = Utc::now();
            let had_reservation = state.sales_order(id)?.has_reserved_stock();
            state.sales_order_mut(id)?.cancel()?;
            let order = state.sales_order(id)?.clone();
            if had_reservation {
                let context = StockContext::new(StockSource::SalesOrderCancellation)
                    .with_document(order.number.clone());
                for item in &order.items {
                    StockAdjustmentEngine::adjust(
                        state,
                        item.product_id,
                        item.quantity,
                        TransactionType::Inward,
                        Some(item.unit_price),
                        context.clone(),
                        None,
                        actor_id,
                        now,
                    )?;
                }
            }
            Ok(order)
        })?;
        info!(number = %order.number, "sales order cancelled");
        Ok(order)
    }

    /// Book a receivable. Direct invoices (no linked order) deduct stock
    /// here; order-linked invoices must not, the order already did.
    pub fn create_sales_invoice(
        &self,
        actor: &Actor,
        input: NewSalesInvoice,
    ) -> DomainResult<SalesInvoice> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_invoices", "manage"))?;
        let actor_id = actor.id;
        let invoice = self.store.transaction(move |state| {
            let now = Utc::now();
            let customer_name = state.customer(input.customer_id)?.name.clone();
            if let Some(order_id) = input.sales_order_id {
                let order = state.sales_order(order_id)?;
                if order.customer_id != input.customer_id {
                    return Err(DomainError::validation(format!(
                        "sales order {} belongs to a different customer",
                        order.number
                    )));
                }
            }
            for line in &input.items {
                state.product(line.product_id)?;
            }
            let invoice = SalesInvoice::create(input, actor_id, now)?;
            let id = invoice.id;
            let customer_id = invoice.customer_id;
            let total = invoice.total;
            let direct = invoice.is_direct();
            let items = invoice.items.clone();
            let context = StockContext::new(StockSource::SalesInvoice)
                .with_document(invoice.number.clone())
                .with_counterparty(PartyKind::Customer, customer_name);
            state.insert_sales_invoice(invoice)?;
            BalanceAdjustmentEngine::adjust_customer(state, customer_id, total)?;
            if direct {
                for item in &items {
                    StockAdjustmentEngine::adjust(
                        state,
                        item.product_id,
                        -item.quantity,
                        TransactionType::Outward,
                        Some(item.unit_price),
                        context.clone(),
                        None,
                        actor_id,
                        now,
                    )?;
                }
            }
            state.sales_invoice(id).cloned()
        })?;
        info!(number = %invoice.number, total = %invoice.total, "sales invoice booked");
        Ok(invoice)
    }

    /// Void an unpaid invoice: customer balance reversed, stock restored for
    /// direct invoices, balance due zeroed.
    pub fn void_sales_invoice(
        &self,
        actor: &Actor,
        id: SalesInvoiceId,
    ) -> DomainResult<SalesInvoice> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_invoices", "void"))?;
        let actor_id = actor.id;
        let invoice = self.store.transaction(move |state| {
            let now = Utc::now();
            state.sales_invoice_mut(id)?.void()?;
            let invoice = state.sales_invoice(id)?.clone();
            BalanceAdjustmentEngine::adjust_customer(state, invoice.customer_id, -invoice.total)?;
            if invoice.is_direct() {
                let context = StockContext::new(StockSource::SalesInvoiceVoid)
                    .with_document(invoice.number.clone());
                for item in &invoice.items {
                    StockAdjustmentEngine::adjust(
                        state,
                        item.product_id,
                        item.quantity,
                        TransactionType::Inward,
                        Some(item.unit_price),
                        context.clone(),
                        None,
                        actor_id,
                        now,
                    )?;
                }
            }
            Ok(invoice)
        })?;
        info!(number = %invoice.number, "sales invoice voided");
        Ok(invoice)
    }

    pub fn get_quotation(&self, actor: &Actor, id: QuotationId) -> DomainResult<SalesQuotation> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_quotations", "view"))?;
        self.store.read(|state| state.quotation(id).cloned())
    }

    pub fn list_quotations(&self, actor: &Actor) -> DomainResult<Vec<SalesQuotation>> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_quotations", "view"))?;
        Ok(self.store.read(|state| state.quotations_iter().cloned().collect()))
    }

    pub fn get_sales_order(&self, actor: &Actor, id: SalesOrderId) -> DomainResult<SalesOrder> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "view"))?;
        self.store.read(|state| state.sales_order(id).cloned())
    }

    pub fn list_sales_orders(&self, actor: &Actor) -> DomainResult<Vec<SalesOrder>> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_orders", "view"))?;
        Ok(self.store.read(|state| state.sales_orders_iter().cloned().collect()))
    }

    pub fn get_sales_invoice(
        &self,
        actor: &Actor,
        id: SalesInvoiceId,
    ) -> DomainResult<SalesInvoice> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_invoices", "view"))?;
        self.store.read(|state| state.sales_invoice(id).cloned())
    }

    pub fn list_sales_invoices(&self, actor: &Actor) -> DomainResult<Vec<SalesInvoice>> {
        self.gate
            .authorize(actor, &Permission::scoped("sales_invoices", "view"))?;
        Ok(self
            .store
            .read(|state| state.sales_invoices_iter().cloned().collect()))
    }
}
