//! Router Module Index
//!
//! Routes are grouped by the guard in front of them rather than by resource, so the access
//! rule of an endpoint is decided by which file it is registered in. `create_router` layers the
//! matching middleware over each group and merges them; groups may share a path as long as they
//! register different methods on it.

/// Unguarded reads, login and health.
pub mod public;

/// Routes behind the Basic-auth `AdminGuard`: every blogger/post mutation and user administration.
pub mod admin;

/// Routes behind the Bearer `AuthUser` guard: anything acting as a specific user.
pub mod authenticated;
