pub mod provider;
pub mod wordpress;

pub use provider::{ContentRule, Provider};
pub use wordpress::default_providers;
