pub mod rest;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod mock;

pub use rest::RestBackend;
pub use traits::PropertyBackend;
pub use types::{ListingPage, PageRequest};
