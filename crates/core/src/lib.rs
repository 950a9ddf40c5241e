pub mod condition;
pub mod config;
pub mod logging;
pub mod reward;
pub mod value;

pub use condition::*;
pub use config::Config;
pub use logging::*;
pub use reward::*;
pub use value::*;
