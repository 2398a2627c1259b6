//! Backend client module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::ApiClient;
pub use error::ApiError;
pub use traits::{FileUpload, FormApi};

#[cfg(test)]
pub use error::RequestFailure;
#[cfg(test)]
pub use traits::MockFormApi;
