//! Payment posting against purchase and sales invoices.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use anvil_auth::{Actor, Permission, PermissionGate};
use anvil_core::{DomainError, DomainResult, PaymentId};
use anvil_payments::{NewPayment, Payment, PaymentTarget};

use crate::engine::BalanceAdjustmentEngine;
use crate::store::LedgerStore;

#[derive(Clone)]
pub struct PaymentService {
    store: Arc<LedgerStore>,
    gate: Arc<PermissionGate>,
}

impl PaymentService {
    pub fn new(store: Arc<LedgerStore>, gate: Arc<PermissionGate>) -> Self {
        Self { store, gate }
    }

    /// Post a payment: invoice `paid_amount` up, counterparty balance down,
    /// invoice status advanced to PartiallyPaid/Paid. The payment record
    /// itself is immutable once committed.
    pub fn record_payment(&self, actor: &Actor, input: NewPayment) -> DomainResult<Payment> {
        self.gate.authorize(actor, &Permission::scoped("payments", "manage"))?;
        let actor_id = actor.id;
        let payment = self.store.transaction(move |state| {
            let payment = Payment::record(input, actor_id, Utc::now())?;
            match payment.target {
                PaymentTarget::Purchase {
                    invoice_id,
                    supplier_id,
                } => {
                    let invoice = state.purchase_invoice(invoice_id)?;
                    if invoice.supplier_id != supplier_id {
                        return Err(DomainError::validation(format!(
                            "payment {} names a supplier that does not match invoice {}",
                            payment.number, invoice.number
                        )));
                    }
                    state.purchase_invoice_mut(invoice_id)?.apply_payment(payment.amount)?;
                    BalanceAdjustmentEngine::adjust_supplier(state, supplier_id, -payment.amount)?;
                }
                PaymentTarget::Sales {
                    invoice_id,
                    customer_id,
                } => {
                    let invoice = state.sales_invoice(invoice_id)?;
                    if invoice.customer_id != customer_id {
                        return Err(DomainError::validation(format!(
                            "payment {} names a customer that does not match invoice {}",
                            payment.number, invoice.number
                        )));
                    }
                    state.sales_invoice_mut(invoice_id)?.apply_payment(payment.amount)?;
                    BalanceAdjustmentEngine::adjust_customer(state, customer_id, -payment.amount)?;
                }
            }
            let id = payment.id;
            state.insert_payment(payment)?;
            state.payment(id).cloned()
        })?;
        info!(number = %payment.number, amount = %payment.amount, "payment recorded");
        Ok(payment)
    }

    pub fn get_payment(&self, actor: &Actor, id: PaymentId) -> DomainResult<Payment> {
        self.gate.authorize(actor, &Permission::scoped("payments", "view"))?;
        self.store.read(|state| state.payment(id).cloned())
    }

    pub fn list_payments(&self, actor: &Actor) -> DomainResult<Vec<Payment>> {
        self.gate.authorize(actor, &Permission::scoped("payments", "view"))?;
        Ok(self.store.read(|state| state.payments_iter().cloned().collect()))
    }
}
