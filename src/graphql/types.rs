//! GraphQL type definitions
//!
//! These types mirror our database records but are decorated with async-graphql attributes.

use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A book author
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Author {
    /// Author id in the catalog store
    pub id: i32,
    /// Display name
    pub name: String,
}

/// A catalog book together with its author
#[derive(Debug, Clone, SimpleObject, Serialize, Deserialize)]
pub struct Book {
    /// Book id in the catalog store
    pub id: i32,
    /// Book title
    pub title: String,
    /// The book's author; every book has exactly one
    pub author: Author,
}
