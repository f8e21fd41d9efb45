// Helper functions shared across GraphQL query modules.

use crate::db::BookRecord;
use crate::graphql::types::{Author, Book};

/// Convert a BookRecord from the database to a GraphQL Book type
pub(crate) fn book_record_to_graphql(r: BookRecord) -> Book {
    Book {
        id: r.id,
        title: r.title,
        author: Author {
            id: r.author.id,
            name: r.author.name,
        },
    }
}
