//! Domain-level frontend features and their shared logic. Routes import these
//! modules to keep view code focused while the auth flow and the identity client
//! live in a dedicated feature area.

pub mod auth;
