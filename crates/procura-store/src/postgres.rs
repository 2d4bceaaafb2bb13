//! PostgreSQL storage backend.
//!
//! Filters are composed as parameterized predicate clauses through
//! [`sqlx::QueryBuilder`]; user input never reaches the query text itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use procura_core::{
    Decision, ListFilter, NewRequest, PurchaseRequest, RequestId, RequestStats, RequestStatus,
};

use crate::error::{Result, StoreError};
use crate::Store;

const COLUMNS: &str = "id, requester_name, requester_email, vendor_name, vendor_tax_id, \
                       amount_cents, payment_method, cost_center, attachment_reference, \
                       status, created_at";

/// Work-queue ordering: pending first, then approved, then rejected,
/// newest-first within each group. The id tiebreak keeps the order
/// deterministic for rows created within the same timestamp granule.
const ORDERING: &str = " ORDER BY CASE status \
                        WHEN 'pending' THEN 0 \
                        WHEN 'approved' THEN 1 \
                        ELSE 2 END, \
                        created_at DESC, id DESC";

/// PostgreSQL-backed request store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool (for migrations and health checks).
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn status_to_db(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "pending",
        RequestStatus::Approved => "approved",
        RequestStatus::Rejected => "rejected",
    }
}

fn status_from_db(raw: &str) -> Result<RequestStatus> {
    match raw {
        "pending" => Ok(RequestStatus::Pending),
        "approved" => Ok(RequestStatus::Approved),
        "rejected" => Ok(RequestStatus::Rejected),
        other => Err(StoreError::Decode(format!("unknown status column value: {other}"))),
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RequestRow {
    id: i64,
    requester_name: String,
    requester_email: String,
    vendor_name: String,
    vendor_tax_id: String,
    amount_cents: i64,
    payment_method: String,
    cost_center: Option<String>,
    attachment_reference: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for PurchaseRequest {
    type Error = StoreError;

    fn try_from(row: RequestRow) -> Result<Self> {
        Ok(Self {
            id: RequestId::new(row.id),
            requester_name: row.requester_name,
            requester_email: row.requester_email,
            vendor_name: row.vendor_name,
            vendor_tax_id: row.vendor_tax_id,
            amount_cents: row.amount_cents,
            payment_method: row.payment_method,
            cost_center: row.cost_center,
            attachment_reference: row.attachment_reference,
            status: status_from_db(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    pending: i64,
    approved: i64,
    rejected: i64,
    approved_amount_cents: i64,
    pending_amount_cents: i64,
}

#[async_trait]
impl Store for PgStore {
    async fn create_request(&self, new: NewRequest) -> Result<PurchaseRequest> {
        let row: RequestRow = sqlx::query_as(&format!(
            "INSERT INTO purchase_requests \
             (requester_name, requester_email, vendor_name, vendor_tax_id, \
              amount_cents, payment_method, cost_center, attachment_reference) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        ))
        .bind(&new.requester_name)
        .bind(&new.requester_email)
        .bind(&new.vendor_name)
        .bind(&new.vendor_tax_id)
        .bind(new.amount_cents)
        .bind(&new.payment_method)
        .bind(&new.cost_center)
        .bind(&new.attachment_reference)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, "purchase request row inserted");
        row.try_into()
    }

    async fn get_request(&self, id: RequestId) -> Result<Option<PurchaseRequest>> {
        let row: Option<RequestRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM purchase_requests WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn transition(&self, id: RequestId, decision: Decision) -> Result<PurchaseRequest> {
        // Conditional on the row still being pending: the terminal edge is
        // one-shot even under concurrent decisions on the same id.
        let updated: Option<RequestRow> = sqlx::query_as(&format!(
            "UPDATE purchase_requests SET status = $1 \
             WHERE id = $2 AND status = 'pending' \
             RETURNING {COLUMNS}"
        ))
        .bind(status_to_db(decision.status()))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(row) => {
                tracing::debug!(id = row.id, status = %decision.status(), "status updated");
                row.try_into()
            }
            None => match self.get_request(id).await? {
                Some(existing) => Err(StoreError::InvalidTransition {
                    id,
                    status: existing.status,
                }),
                None => Err(StoreError::NotFound { id }),
            },
        }
    }

    async fn list_requests(&self, filter: &ListFilter) -> Result<Vec<PurchaseRequest>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM purchase_requests WHERE TRUE"));

        if let Some(range) = &filter.date_range {
            let (start, end) = range.bounds_utc();
            qb.push(" AND created_at >= ").push_bind(start);
            qb.push(" AND created_at <= ").push_bind(end);
        }
        if let Some(payment_method) = &filter.payment_method {
            qb.push(" AND payment_method = ").push_bind(payment_method);
        }
        if let Some(text) = &filter.search_text {
            let pattern = format!("%{}%", escape_like(text));
            qb.push(" AND (vendor_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR requester_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status_to_db(status));
        }
        qb.push(ORDERING);

        let rows: Vec<RequestRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn stats(&self) -> Result<RequestStats> {
        let row: StatsRow = sqlx::query_as(
            "SELECT \
               COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
               COUNT(*) FILTER (WHERE status = 'approved') AS approved, \
               COUNT(*) FILTER (WHERE status = 'rejected') AS rejected, \
               COALESCE(SUM(amount_cents) FILTER (WHERE status = 'approved'), 0)::BIGINT \
                 AS approved_amount_cents, \
               COALESCE(SUM(amount_cents) FILTER (WHERE status = 'pending'), 0)::BIGINT \
                 AS pending_amount_cents \
             FROM purchase_requests",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(RequestStats {
            pending: row.pending,
            approved: row.approved,
            rejected: row.rejected,
            approved_amount_cents: row.approved_amount_cents,
            pending_amount_cents: row.pending_amount_cents,
        })
    }
}

/// Escape LIKE metacharacters so search text matches literally.
fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
