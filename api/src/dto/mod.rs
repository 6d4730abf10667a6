pub mod error;

pub use error::{AuthRejection, ErrorResponseExt};
