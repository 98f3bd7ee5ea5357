pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod locator;
pub mod logging;
pub mod mime;
pub mod resolver;
pub mod window;

#[cfg(test)]
mod test_support;

pub use error::{AppError, AppResult, LoadError};
pub use locator::ResourceLocator;
pub use resolver::{Classification, Resolver};
