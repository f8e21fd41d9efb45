//! Book database repository
//!
//! Every book query joins books to authors on the foreign key. Optional
//! filters are collected into an ordered list of typed clauses before
//! rendering, so a given filter set always produces the same statement
//! text and bind sequence.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::error::CatalogError;

/// Author columns carried on every joined book row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: i32,
    pub name: String,
}

/// Book record from the database with its joined author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: i32,
    pub title: String,
    pub author: AuthorRecord,
}

/// Filter options for querying books
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Keep books whose author id is in this set
    pub author_ids: Option<Vec<i32>>,
    /// Case-insensitive substring match against the title
    pub search: Option<String>,
    /// Cap on the number of returned rows; zero means uncapped
    pub limit: Option<i64>,
}

/// A value bound to one `$n` placeholder in the rendered statement
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BindValue {
    IdList(Vec<i32>),
    Text(String),
    Int(i64),
}

/// One conditional WHERE clause
///
/// Each variant renders its own placeholder and carries its own bind
/// value, so the statement text and the bind sequence cannot drift apart.
#[derive(Debug, Clone)]
enum FilterClause {
    AuthorIds(Vec<i32>),
    TitleSearch(String),
}

impl FilterClause {
    fn render(&self, param: usize) -> (String, BindValue) {
        match self {
            FilterClause::AuthorIds(ids) => (
                format!("b.author_id = ANY(${})", param),
                BindValue::IdList(ids.clone()),
            ),
            FilterClause::TitleSearch(term) => (
                format!("b.title ILIKE ${}", param),
                // The raw term is wrapped here and bound as a parameter,
                // never spliced into the statement text.
                BindValue::Text(format!("%{}%", term)),
            ),
        }
    }
}

const BASE_QUERY: &str =
    "SELECT b.id, b.title, a.id, a.name FROM books b JOIN authors a ON b.author_id = a.id";

/// Render a filter set into one parameterized statement
///
/// Clause order is fixed: author ids, then title search, then the limit.
pub(crate) fn build_books_query(filter: &BookFilter) -> (String, Vec<BindValue>) {
    let mut clauses = Vec::new();

    if let Some(ids) = &filter.author_ids {
        if !ids.is_empty() {
            clauses.push(FilterClause::AuthorIds(ids.clone()));
        }
    }
    if let Some(term) = &filter.search {
        if !term.is_empty() {
            clauses.push(FilterClause::TitleSearch(term.clone()));
        }
    }

    let mut sql = BASE_QUERY.to_string();
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    for clause in &clauses {
        let (condition, value) = clause.render(binds.len() + 1);
        conditions.push(condition);
        binds.push(value);
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    // A limit of exactly zero means uncapped, not zero rows. Negative
    // values pass through unvalidated; the store rejects them.
    if let Some(limit) = filter.limit {
        if limit != 0 {
            binds.push(BindValue::Int(limit));
            sql.push_str(&format!(" LIMIT ${}", binds.len()));
        }
    }

    (sql, binds)
}

/// Build a book record from the four joined columns
///
/// books.author_id is non-nullable in the store, so a null author field
/// means the row is corrupt rather than merely unmatched.
pub(crate) fn book_from_columns(
    id: i32,
    title: String,
    author_id: Option<i32>,
    author_name: Option<String>,
) -> Result<BookRecord, CatalogError> {
    let author_id =
        author_id.ok_or_else(|| CatalogError::MalformedRow("null author id".to_string()))?;
    let author_name =
        author_name.ok_or_else(|| CatalogError::MalformedRow("null author name".to_string()))?;

    Ok(BookRecord {
        id,
        title,
        author: AuthorRecord {
            id: author_id,
            name: author_name,
        },
    })
}

fn book_from_row(row: &PgRow) -> Result<BookRecord, CatalogError> {
    let malformed = |e: sqlx::Error| CatalogError::MalformedRow(e.to_string());

    book_from_columns(
        row.try_get(0).map_err(malformed)?,
        row.try_get(1).map_err(malformed)?,
        row.try_get(2).map_err(malformed)?,
        row.try_get(3).map_err(malformed)?,
    )
}

/// Book repository for read queries
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List books matching the filter, in store order
    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<BookRecord>, CatalogError> {
        let (sql, binds) = build_books_query(filter);

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = match value {
                BindValue::IdList(ids) => query.bind(ids),
                BindValue::Text(text) => query.bind(text),
                BindValue::Int(n) => query.bind(n),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;

        tracing::debug!(rows = rows.len(), statement = %sql, "Books fetched");

        rows.iter().map(book_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn filter(
        author_ids: Option<Vec<i32>>,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> BookFilter {
        BookFilter {
            author_ids,
            search: search.map(str::to_string),
            limit,
        }
    }

    #[test]
    fn no_filters_emits_bare_join() {
        let (sql, binds) = build_books_query(&BookFilter::default());

        assert_eq!(
            sql,
            "SELECT b.id, b.title, a.id, a.name FROM books b JOIN authors a ON b.author_id = a.id"
        );
        assert!(binds.is_empty());
    }

    #[test]
    fn author_ids_alone_binds_one_id_list() {
        let (sql, binds) = build_books_query(&filter(Some(vec![1, 7]), None, None));

        assert!(sql.ends_with("WHERE b.author_id = ANY($1)"), "{}", sql);
        assert_eq!(binds, vec![BindValue::IdList(vec![1, 7])]);
    }

    #[test]
    fn search_alone_binds_wrapped_pattern() {
        let (sql, binds) = build_books_query(&filter(None, Some("alg"), None));

        assert!(sql.ends_with("WHERE b.title ILIKE $1"), "{}", sql);
        assert_eq!(binds, vec![BindValue::Text("%alg%".to_string())]);
    }

    #[test]
    fn author_ids_clause_precedes_search_clause() {
        let (sql, binds) = build_books_query(&filter(Some(vec![3]), Some("sea"), Some(5)));

        assert!(
            sql.ends_with("WHERE b.author_id = ANY($1) AND b.title ILIKE $2 LIMIT $3"),
            "{}",
            sql
        );
        assert_eq!(
            binds,
            vec![
                BindValue::IdList(vec![3]),
                BindValue::Text("%sea%".to_string()),
                BindValue::Int(5),
            ]
        );
    }

    #[test]
    fn identical_filters_render_identical_statements() {
        let f = filter(Some(vec![2, 4]), Some("rust"), Some(10));

        assert_eq!(build_books_query(&f), build_books_query(&f));
    }

    #[test]
    fn limit_zero_means_uncapped() {
        let (sql, binds) = build_books_query(&filter(None, None, Some(0)));

        assert!(!sql.contains("LIMIT"), "{}", sql);
        assert!(binds.is_empty());
    }

    #[test]
    fn negative_limit_passes_through() {
        let (sql, binds) = build_books_query(&filter(None, None, Some(-1)));

        assert!(sql.ends_with("LIMIT $1"), "{}", sql);
        assert_eq!(binds, vec![BindValue::Int(-1)]);
    }

    #[test]
    fn well_formed_columns_build_nested_record() {
        let record = book_from_columns(
            10,
            "Algorithms".to_string(),
            Some(1),
            Some("Ada".to_string()),
        )
        .unwrap();

        assert_eq!(
            record,
            BookRecord {
                id: 10,
                title: "Algorithms".to_string(),
                author: AuthorRecord {
                    id: 1,
                    name: "Ada".to_string(),
                },
            }
        );
    }

    #[test]
    fn null_author_id_is_malformed() {
        let result =
            book_from_columns(10, "Algorithms".to_string(), None, Some("Ada".to_string()));

        assert_matches!(result, Err(CatalogError::MalformedRow(_)));
    }

    #[test]
    fn null_author_name_is_malformed() {
        let result = book_from_columns(10, "Algorithms".to_string(), Some(1), None);

        assert_matches!(result, Err(CatalogError::MalformedRow(_)));
    }

    #[test]
    fn mapping_preserves_row_order_and_count() {
        let rows = vec![
            (10, "Algorithms", 1, "Ada"),
            (11, "Analysis", 1, "Ada"),
            (12, "Basics", 2, "Barbara"),
        ];

        let records: Vec<BookRecord> = rows
            .into_iter()
            .map(|(id, title, author_id, author_name)| {
                book_from_columns(
                    id,
                    title.to_string(),
                    Some(author_id),
                    Some(author_name.to_string()),
                )
            })
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![10, 11, 12]
        );
        // The same author on consecutive rows is rebuilt per row, equal in
        // value but never shared between books.
        assert_eq!(records[0].author, records[1].author);
    }
}
