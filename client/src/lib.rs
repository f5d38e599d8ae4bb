pub mod backend;
pub mod config;
pub mod error;
pub mod login;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod payload;
pub mod program;

pub mod prelude {
    pub use crate::backend::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::login::*;
    pub use crate::payload::*;
    pub use crate::program::*;
}
