pub mod locking;
pub mod persistence;
