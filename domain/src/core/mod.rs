//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] - a validated user query to pose to the council
//! - [`role::Role`] - the fixed set of specialist identities
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod query;
pub mod role;
