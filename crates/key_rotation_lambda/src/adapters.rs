pub mod identity;
pub mod secret_store;
