//! CLI command implementations

pub mod analyze;
pub mod checkout;
pub mod plans;
pub mod render;
pub mod sections;
pub mod techniques;
