pub mod errors;
pub mod pagination;
pub mod query;
pub mod response;

pub use errors::*;
pub use pagination::*;
pub use query::*;
pub use response::*;
