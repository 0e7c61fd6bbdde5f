//! Record resolution: typed requests, record encoders, and the router.

pub mod encode;
pub mod request;
pub mod router;

mod error;

pub use error::ResolveError;
pub use request::{RecordCall, ResolveRequest};
pub use router::{Router, ETH_COIN_TYPE};
