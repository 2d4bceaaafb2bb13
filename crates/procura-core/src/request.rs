//! Purchase request types and submission validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Identifier of a purchase request.
///
/// Ids are store-assigned and monotonically ordered by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(i64);

impl RequestId {
    /// Wrap a raw store-assigned id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Return the underlying integer id.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Approval status of a purchase request.
///
/// Serialized with the Spanish labels the frontend and the email templates
/// use. `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting an administrator decision.
    #[serde(rename = "Pendiente")]
    Pending,

    /// Approved by an administrator.
    #[serde(rename = "Aprobado")]
    Approved,

    /// Rejected by an administrator.
    #[serde(rename = "Rechazado")]
    Rejected,
}

impl RequestStatus {
    /// Spanish wire label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Approved => "Aprobado",
            Self::Rejected => "Rechazado",
        }
    }

    /// Sort rank for the administrative work queue: unresolved requests
    /// first, then approved, then rejected.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a status label cannot be parsed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for RequestStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pendiente" => Ok(Self::Pending),
            "Aprobado" => Ok(Self::Approved),
            "Rechazado" => Ok(Self::Rejected),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// An administrator decision on a pending request.
///
/// This is deliberately narrower than [`RequestStatus`]: a transition can
/// only target a terminal status, never `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Approve the request.
    Approved,
    /// Reject the request.
    Rejected,
}

impl Decision {
    /// The status a request ends up in after this decision.
    #[must_use]
    pub const fn status(self) -> RequestStatus {
        match self {
            Self::Approved => RequestStatus::Approved,
            Self::Rejected => RequestStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Aprobado" => Ok(Self::Approved),
            "Rechazado" => Ok(Self::Rejected),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A purchase request record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Store-assigned id.
    pub id: RequestId,

    /// Name of the employee who submitted the request.
    pub requester_name: String,

    /// Email of the requester; the sole channel for decision notifications.
    pub requester_email: String,

    /// Vendor the purchase would be made from.
    pub vendor_name: String,

    /// Vendor tax identifier (NIT).
    pub vendor_tax_id: String,

    /// Requested amount in integer cents.
    pub amount_cents: i64,

    /// Payment method (short categorical string).
    pub payment_method: String,

    /// Cost center the purchase is charged to, if any.
    pub cost_center: Option<String>,

    /// Reference (URL or path) to the uploaded quotation, if one was
    /// supplied at submission. Never mutated afterward.
    pub attachment_reference: Option<String>,

    /// Current approval status.
    pub status: RequestStatus,

    /// When the request was submitted. Set once, immutable.
    pub created_at: DateTime<Utc>,
}

impl PurchaseRequest {
    /// Requested amount in currency units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn amount_units(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }
}

/// A validated submission, ready to be persisted.
///
/// Construct through [`SubmitInput::validate`]; invariants (non-empty
/// required fields, non-negative amount) hold by construction.
#[derive(Debug, Clone)]
pub struct NewRequest {
    /// Name of the requester.
    pub requester_name: String,
    /// Email of the requester.
    pub requester_email: String,
    /// Vendor name.
    pub vendor_name: String,
    /// Vendor tax identifier.
    pub vendor_tax_id: String,
    /// Amount in integer cents, non-negative.
    pub amount_cents: i64,
    /// Payment method.
    pub payment_method: String,
    /// Optional cost center.
    pub cost_center: Option<String>,
    /// Optional quotation reference, already persisted to attachment storage.
    pub attachment_reference: Option<String>,
}

/// Raw submission fields as they arrive from the multipart form.
///
/// Every required field is optional here; [`SubmitInput::validate`] collects
/// all offending fields into one [`ValidationError`].
#[derive(Debug, Default, Clone)]
pub struct SubmitInput {
    /// `responsable` form field.
    pub requester_name: Option<String>,
    /// `correo` form field.
    pub requester_email: Option<String>,
    /// `proveedor` form field.
    pub vendor_name: Option<String>,
    /// `nit` form field.
    pub vendor_tax_id: Option<String>,
    /// `valor` form field, decimal currency units.
    pub amount: Option<String>,
    /// `medioPago` form field.
    pub payment_method: Option<String>,
    /// `centroCostos` form field.
    pub cost_center: Option<String>,
    /// Reference returned by attachment storage for the `cotizacion` file.
    pub attachment_reference: Option<String>,
}

impl SubmitInput {
    /// Validate the raw form fields into a [`NewRequest`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every missing or malformed
    /// field (wire names). The store must not be touched before this check.
    pub fn validate(self) -> Result<NewRequest, ValidationError> {
        let mut bad = Vec::new();

        let requester_name = required(self.requester_name, "responsable", &mut bad);
        let requester_email = required(self.requester_email, "correo", &mut bad);
        if !requester_email.is_empty() && !requester_email.contains('@') {
            bad.push("correo");
        }
        let vendor_name = required(self.vendor_name, "proveedor", &mut bad);
        let vendor_tax_id = required(self.vendor_tax_id, "nit", &mut bad);
        let payment_method = required(self.payment_method, "medioPago", &mut bad);

        let amount_cents = match self.amount.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_amount_cents(raw).unwrap_or_else(|| {
                bad.push("valor");
                0
            }),
            _ => {
                bad.push("valor");
                0
            }
        };

        if !bad.is_empty() {
            return Err(ValidationError::new(bad));
        }

        Ok(NewRequest {
            requester_name,
            requester_email,
            vendor_name,
            vendor_tax_id,
            amount_cents,
            payment_method,
            cost_center: self
                .cost_center
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            attachment_reference: self.attachment_reference,
        })
    }
}

fn required(value: Option<String>, field: &'static str, bad: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            bad.push(field);
            String::new()
        }
    }
}

/// Parse a decimal currency amount into non-negative integer cents.
///
/// Accepts plain digits with an optional fraction of at most two digits
/// (`"200"`, `"199.5"`, `"199.99"`). Returns `None` for anything else,
/// including negative values and overflow.
#[must_use]
pub fn parse_amount_cents(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (units, frac) = match raw.split_once('.') {
        Some((u, f)) => (u, f),
        None => (raw, ""),
    };

    if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let units: i64 = units.parse().ok()?;
    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse::<i64>().ok()?,
    };

    units.checked_mul(100)?.checked_add(frac_cents)
}
