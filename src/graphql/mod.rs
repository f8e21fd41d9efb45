//! GraphQL API for the book catalog
//!
//! This module provides a read-only GraphQL API using async-graphql.
//! Query resolvers live in domain-specific files under `queries/`, each
//! defining a struct merged into the root via `MergedObject`.

pub mod helpers;
pub mod queries;
mod schema;
pub mod types;

pub use schema::{CatalogSchema, build_schema};
pub use types::{Author, Book};
