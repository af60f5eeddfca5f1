//! HTTP handlers, one module per resource.
//!
//! Handlers only extract, delegate to a service and pick the status code; every failure goes
//! through `ApiError`. Guards are applied by the routers, except where a handler needs the
//! caller's identity and takes `AuthUser` itself.

pub mod bloggers;
pub mod comments;
pub mod posts;
pub mod users;

pub use bloggers::*;
pub use comments::*;
pub use posts::*;
pub use users::*;
