pub mod error;
pub mod http;
pub mod traits;

pub use error::{ClientError, Operation};
pub use http::HttpBackend;
pub use traits::MovieBackend;
