//! API route definitions
//!
//! The primary API is GraphQL at /graphql. The only REST endpoints are
//! the health probes, which must stay reachable without a GraphQL client.

pub mod health;
