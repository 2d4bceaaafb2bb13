//! Core types and utilities for procura.
//!
//! This crate provides the foundational types used throughout the
//! purchase-request approval service:
//!
//! - **Requests**: [`PurchaseRequest`], [`RequestStatus`], [`Decision`]
//! - **Submission**: [`NewRequest`] with field validation
//! - **Querying**: [`ListFilter`], [`DateRange`], [`RequestStats`]
//!
//! # Amounts
//!
//! Monetary amounts are stored as `i64` integer cents to avoid floating
//! point precision issues. Wire values are decimal currency units with at
//! most two fraction digits and are parsed with [`parse_amount_cents`].
//!
//! # Status wire names
//!
//! Statuses serialize with the Spanish labels the administrative frontend
//! expects: `Pendiente`, `Aprobado`, `Rechazado`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod filter;
pub mod request;

pub use error::ValidationError;
pub use filter::{DateRange, ListFilter, RequestStats};
pub use request::{
    parse_amount_cents, Decision, NewRequest, ParseStatusError, PurchaseRequest, RequestId,
    RequestStatus, SubmitInput,
};
