//! Public types for the Riftgate API.

mod args;
mod region;
mod request;
mod response;

pub use args::ArgList;
pub(crate) use args::PATH_VALUE;
pub use region::Region;
pub use request::{RequestDescriptor, RequestDescriptorBuilder};
pub use response::Response;
