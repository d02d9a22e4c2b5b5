pub mod browse;
pub mod criteria;
pub mod pricing;
pub mod property;
