pub mod abandonment;
pub mod registry;
