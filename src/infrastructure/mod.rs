pub mod clients;
pub mod observability;
pub mod persistence;
