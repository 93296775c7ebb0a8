//! Command implementations.

pub mod config;
pub mod dossier;
pub mod match_cmd;
pub mod normalize;

pub use self::config::execute_config;
pub use self::dossier::execute_dossier;
pub use self::match_cmd::execute_match;
pub use self::normalize::execute_normalize;
