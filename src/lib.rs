pub mod games;
pub mod store;
