pub mod create_credit_type;
pub mod create_wallet;
pub mod delete_credit_type;
pub mod delete_wallet;
pub mod get_credit_type;
pub mod get_transaction;
pub mod get_wallet;
pub mod handlers;
pub mod list_credit_types;
pub mod list_transactions;
pub mod list_wallets;
pub mod process_transaction;
pub mod update_credit_type;
pub mod update_wallet;
