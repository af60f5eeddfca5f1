//! Entity services: the layer between the handlers and the repositories.
//!
//! A service checks that the entities a request refers to exist, builds the record to store and
//! turns stored records into view DTOs. Services are cheap to clone (they only hold `Arc`s) and
//! live inside `AppState`.

mod bloggers;
mod comments;
mod posts;
mod users;

pub use bloggers::BloggersService;
pub use comments::CommentsService;
pub use posts::PostsService;
pub use users::{TokenSettings, UsersService};
