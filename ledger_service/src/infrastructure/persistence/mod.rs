pub mod balance_store;
pub mod credit_type_repository;
pub mod models;
pub mod transaction_repository;
pub mod wallet_repository;
