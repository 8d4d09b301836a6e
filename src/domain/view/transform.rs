//! The list transformer: filter, stable sort, paginate.
//!
//! Everything here is a pure function of its inputs; list pages call [`transform`] again after
//! every view action or collection patch.

use super::state::{SortDirection, SortSpec, ViewState};
use crate::domain::model::CatalogEntity;
use std::num::NonZeroUsize;

/// One rendered page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a, E> {
    pub items: Vec<&'a E>,
    pub total_items: usize,
    pub total_pages: usize,
    /// The page actually shown after clamping (1 when the collection is empty).
    pub page: usize,
}

/// Case-insensitive substring match on each record's searchable field. An empty term keeps
/// every record. Input order is preserved.
pub fn filter_records<'a, E: CatalogEntity>(records: &'a [E], term: &str) -> Vec<&'a E> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.search_text().to_lowercase().contains(&needle))
        .collect()
}

/// Stable in-place sort; ties keep their relative order in both directions.
pub fn sort_records<E: CatalogEntity>(records: &mut [&E], sort: SortSpec<E::Field>) {
    records.sort_by(|a, b| {
        let ord = a
            .sort_value(sort.field)
            .total_cmp(&b.sort_value(sort.field));
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get())
}

pub fn transform<'a, E: CatalogEntity>(
    records: &'a [E],
    view: &ViewState<E::Field>,
    page_size: NonZeroUsize,
) -> PageView<'a, E> {
    let mut filtered = filter_records(records, &view.search);
    sort_records(&mut filtered, view.sort);

    let total_items = filtered.len();
    let total_pages = total_pages(total_items, page_size);
    let page = view.page.clamp(1, total_pages.max(1));

    let size = page_size.get();
    let start = ((page - 1) * size).min(total_items);
    let end = (page * size).min(total_items);
    let items = filtered[start..end].to_vec();

    PageView {
        items,
        total_items,
        total_pages,
        page,
    }
}
