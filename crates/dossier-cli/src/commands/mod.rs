//! Command implementations.

pub mod claim;
pub mod run;
pub mod validate;

pub use self::claim::execute_claim;
pub use self::run::execute_run;
pub use self::validate::execute_validate;
