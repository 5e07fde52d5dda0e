//! Shared plumbing for the OCP fixture generator workspace: error helpers, logging setup, and the
//! date handling used by both the config layer and the command line.

pub mod errors;
pub mod logging;
pub mod time;

pub mod prelude {
    pub use crate::errors::*;
}

#[cfg(test)]
mod tests;
