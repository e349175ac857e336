//! Request-scoped helpers for session state and access control.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
