//! Credit Ledger Service Library
//!
//! This library is the core of the credit ledger: per-wallet balances of
//! non-monetary credits served through transactional deposit / debit / hold /
//! release / adjust operations with strict balance invariants.
//!
//! # Modules
//!
//! * `api` - Contains the HTTP interface (axum routes, DTOs, error mapping).
//! * `domain` - Contains the domain entities, errors and ports.
//! * `infrastructure` - Contains the PostgreSQL stores and the keyed lock.
//! * `use_cases` - Contains the application workflows, including the
//!   transaction orchestrator and its operation handlers.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;
