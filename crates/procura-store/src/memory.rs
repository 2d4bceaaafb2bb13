//! In-memory storage backend.
//!
//! Implements the same contract as the PostgreSQL backend (ordering,
//! filters, one-shot transitions) over a `Vec` behind an async lock. Used by
//! unit and integration tests; no durability.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use procura_core::{
    Decision, ListFilter, NewRequest, PurchaseRequest, RequestId, RequestStats, RequestStatus,
};

use crate::error::{Result, StoreError};
use crate::Store;

/// In-memory request store.
#[derive(Debug)]
pub struct MemoryStore {
    requests: RwLock<Vec<PurchaseRequest>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(filter: &ListFilter, request: &PurchaseRequest) -> bool {
    if let Some(range) = &filter.date_range {
        if !range.contains(request.created_at) {
            return false;
        }
    }
    if let Some(payment_method) = &filter.payment_method {
        if request.payment_method != *payment_method {
            return false;
        }
    }
    if let Some(text) = &filter.search_text {
        let needle = text.to_lowercase();
        if !request.vendor_name.to_lowercase().contains(&needle)
            && !request.requester_name.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if request.status != status {
            return false;
        }
    }
    true
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_request(&self, new: NewRequest) -> Result<PurchaseRequest> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = PurchaseRequest {
            id: RequestId::new(id),
            requester_name: new.requester_name,
            requester_email: new.requester_email,
            vendor_name: new.vendor_name,
            vendor_tax_id: new.vendor_tax_id,
            amount_cents: new.amount_cents,
            payment_method: new.payment_method,
            cost_center: new.cost_center,
            attachment_reference: new.attachment_reference,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };

        self.requests.write().await.push(request.clone());
        Ok(request)
    }

    async fn get_request(&self, id: RequestId) -> Result<Option<PurchaseRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.iter().find(|r| r.id == id).cloned())
    }

    async fn transition(&self, id: RequestId, decision: Decision) -> Result<PurchaseRequest> {
        let mut requests = self.requests.write().await;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;

        if request.status.is_terminal() {
            return Err(StoreError::InvalidTransition {
                id,
                status: request.status,
            });
        }

        request.status = decision.status();
        Ok(request.clone())
    }

    async fn list_requests(&self, filter: &ListFilter) -> Result<Vec<PurchaseRequest>> {
        let requests = self.requests.read().await;
        let mut matched: Vec<PurchaseRequest> = requests
            .iter()
            .filter(|r| matches(filter, r))
            .cloned()
            .collect();

        // Same contract as the SQL ordering: work queue first, newest-first
        // within each status group, id as the tiebreak.
        matched.sort_by(|a, b| {
            a.status
                .rank()
                .cmp(&b.status.rank())
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(matched)
    }

    async fn stats(&self) -> Result<RequestStats> {
        let requests = self.requests.read().await;
        let mut stats = RequestStats::default();
        for request in requests.iter() {
            match request.status {
                RequestStatus::Pending => {
                    stats.pending += 1;
                    stats.pending_amount_cents += request.amount_cents;
                }
                RequestStatus::Approved => {
                    stats.approved += 1;
                    stats.approved_amount_cents += request.amount_cents;
                }
                RequestStatus::Rejected => stats.rejected += 1,
            }
        }
        Ok(stats)
    }
}
