pub mod filter;
pub mod rank;
pub mod resolve;
pub mod service;
