pub mod credit_type_routes;
pub mod error;
pub mod routes;
pub mod transaction_routes;
pub mod wallet_routes;
