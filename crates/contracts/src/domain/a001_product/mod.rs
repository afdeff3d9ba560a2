pub mod aggregate;
pub mod upload;

pub use aggregate::{Product, ProductPage};
pub use upload::{FailedRow, UploadResult};
