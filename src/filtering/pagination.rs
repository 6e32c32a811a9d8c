use sea_orm::QuerySelect;
use url::form_urlencoded;

use crate::models::{Pagination, PaginationMetadata};

/// Apply `LIMIT`/`OFFSET` for a page.
///
/// A page size of zero or less leaves the query unchanged. The offset is only applied for a
/// positive page number.
pub fn apply_pagination<Q: QuerySelect>(query: Q, pagination: &Pagination) -> Q {
    let Some(limit) = pagination.limit() else {
        return query;
    };

    tracing::debug!(limit, offset = ?pagination.offset(), "Applying pagination");
    let query = query.limit(limit);
    match pagination.offset() {
        Some(offset) => query.offset(offset),
        None => query,
    }
}

/// Rewrite `base_uri` to point at `page`, keeping every other query parameter.
fn page_link(base_uri: &str, page: u64, page_size: u64) -> String {
    let (path, query) = base_uri.split_once('?').unwrap_or((base_uri, ""));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key != "page" && key != "pageSize" {
            serializer.append_pair(&key, &value);
        }
    }
    serializer
        .append_pair("page", &page.to_string())
        .append_pair("pageSize", &page_size.to_string());

    format!("{path}?{}", serializer.finish())
}

/// Page count and prev/next links for a result of `total_items` rows.
///
/// Without pagination, or with a page size of zero or less, everything fits on one page and no
/// links are produced. A page number below 1 is treated as page 1.
#[must_use]
pub fn pagination_metadata(
    pagination: Option<&Pagination>,
    total_items: u64,
    base_uri: &str,
) -> PaginationMetadata {
    let Some((pagination, page_size)) =
        pagination.and_then(|p| p.limit().map(|size| (p, size)))
    else {
        return PaginationMetadata {
            total_pages: 1,
            total_items,
            prev: None,
            next: None,
        };
    };

    let total_pages = total_items.div_ceil(page_size);
    let current = u64::try_from(pagination.page).unwrap_or(0).max(1);

    PaginationMetadata {
        total_pages,
        total_items,
        prev: (current > 1).then(|| page_link(base_uri, current - 1, page_size)),
        next: (current < total_pages).then(|| page_link(base_uri, current + 1, page_size)),
    }
}
