pub mod entities;
pub mod error;
pub mod locking;
pub mod pagination;
pub mod repository;
pub mod transactions;
pub mod types;
