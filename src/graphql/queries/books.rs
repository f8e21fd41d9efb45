use super::prelude::*;

/// Collapse blank arguments before they reach the query builder
///
/// An empty search string or an empty author-id list filters nothing and
/// is treated exactly like an absent argument.
fn normalize_filter(
    author_ids: Option<Vec<i32>>,
    search: Option<String>,
    limit: Option<i64>,
) -> BookFilter {
    BookFilter {
        author_ids: author_ids.filter(|ids| !ids.is_empty()),
        search: search.filter(|s| !s.is_empty()),
        limit,
    }
}

#[derive(Default)]
pub struct BookQueries;

#[Object]
impl BookQueries {
    /// List books, optionally filtered by author ids, a title substring,
    /// and a result cap
    async fn books(
        &self,
        ctx: &Context<'_>,
        author_ids: Option<Vec<i32>>,
        search: Option<String>,
        limit: Option<i64>,
    ) -> Result<Vec<Book>> {
        let db = ctx.data_unchecked::<Database>();

        let filter = normalize_filter(author_ids, search, limit);

        let records = db
            .books()
            .list(&filter)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(records.into_iter().map(book_record_to_graphql).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_search_is_treated_as_absent() {
        let filter = normalize_filter(None, Some(String::new()), None);

        assert_eq!(filter.search, None);
    }

    #[test]
    fn empty_author_id_list_is_treated_as_absent() {
        let filter = normalize_filter(Some(Vec::new()), None, None);

        assert_eq!(filter.author_ids, None);
    }

    #[test]
    fn present_arguments_pass_through_unchanged() {
        let filter = normalize_filter(Some(vec![1, 2]), Some("alg".to_string()), Some(5));

        assert_eq!(filter.author_ids, Some(vec![1, 2]));
        assert_eq!(filter.search, Some("alg".to_string()));
        assert_eq!(filter.limit, Some(5));
    }

    #[test]
    fn limit_zero_is_kept_for_the_builder_to_ignore() {
        let filter = normalize_filter(None, None, Some(0));

        assert_eq!(filter.limit, Some(0));
    }
}
