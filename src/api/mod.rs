//! Contest HTTP Service
//!
//! REST surface for pick submission and pool administration. Mutating
//! requests are serialized through the shared state's store lock.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
