//! 코어 레지스트리 계층

pub mod errors;
pub mod registry;

pub use registry::StrategyRegistry;
