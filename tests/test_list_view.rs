//! List transformer, view reducer and selection: the pure parts of a list page.

mod common;

use catalog_admin::domain::view::{filter_records, transform};
use catalog_admin::{
    BookField, EntityId, GenreField, Selection, SortDirection, ViewAction, ViewState,
};
use common::{book, genre, ids, numbered_books, priced_book, titles};
use std::num::NonZeroUsize;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn sorted_by(field: BookField, direction: SortDirection) -> ViewState<BookField> {
    ViewState::new(BookField::Id).reduce(ViewAction::SetSort(field, direction), 0)
}

#[test]
fn twelve_books_sorted_by_title_span_three_pages() {
    let books = numbered_books(12);
    let mut view = sorted_by(BookField::Title, SortDirection::Ascending);

    let first = transform(&books, &view, size(5));
    assert_eq!(first.total_items, 12);
    assert_eq!(first.total_pages, 3);
    assert_eq!(
        titles(&first.items),
        vec!["Book 01", "Book 02", "Book 03", "Book 04", "Book 05"]
    );

    view = view.reduce(ViewAction::GoToPage(3), first.total_pages);
    let last = transform(&books, &view, size(5));
    assert_eq!(last.page, 3);
    assert_eq!(titles(&last.items), vec!["Book 11", "Book 12"]);
}

#[test]
fn search_keeps_matches_in_input_order() {
    let books = vec![book(1, "Dune"), book(2, "Dune Messiah"), book(3, "Foundation")];

    let matches = filter_records(&books, "Dune");
    assert_eq!(titles(&matches), vec!["Dune", "Dune Messiah"]);

    let view = ViewState::new(BookField::Id).reduce(ViewAction::Search("Dune".into()), 1);
    let page = transform(&books, &view, size(5));
    assert_eq!(titles(&page.items), vec!["Dune", "Dune Messiah"]);
    assert_eq!(page.total_items, 2);
}

#[test]
fn search_is_case_insensitive_and_empty_term_matches_all() {
    let books = vec![book(1, "Dune"), book(2, "The DUNE Encyclopedia"), book(3, "Emma")];
    assert_eq!(filter_records(&books, "dune").len(), 2);
    assert_eq!(filter_records(&books, "").len(), 3);
    assert!(filter_records(&books, "zzz").is_empty());
}

#[test]
fn filtering_is_idempotent() {
    let books = vec![
        book(1, "Dune"),
        book(2, "Children of Dune"),
        book(3, "Emma"),
        book(4, "Dune Messiah"),
    ];
    let once: Vec<_> = filter_records(&books, "dune").into_iter().cloned().collect();
    let twice: Vec<_> = filter_records(&once, "dune").into_iter().cloned().collect();
    assert_eq!(once, twice);
}

#[test]
fn pages_partition_the_filtered_collection() {
    for count in 0..=13 {
        let books = numbered_books(count);
        for page_size in 1..=6 {
            let mut view = ViewState::new(BookField::Id);
            let first = transform(&books, &view, size(page_size));
            let mut seen = 0;
            for p in 1..=first.total_pages {
                view = view.reduce(ViewAction::GoToPage(p), first.total_pages);
                let page = transform(&books, &view, size(page_size));
                assert_eq!(page.page, p);
                if p < first.total_pages {
                    assert_eq!(page.items.len(), page_size);
                }
                seen += page.items.len();
            }
            assert_eq!(seen, first.total_items, "count={} size={}", count, page_size);
        }
    }
}

#[test]
fn empty_collection_has_no_pages() {
    let books = numbered_books(0);
    let page = transform(&books, &ViewState::new(BookField::Id), size(5));
    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.page, 1);
    assert!(page.items.is_empty());
}

#[test]
fn page_is_clamped_before_slicing() {
    let books = numbered_books(7);
    let mut view = ViewState::new(BookField::Id);
    view.page = 40;
    let page = transform(&books, &view, size(5));
    assert_eq!(page.page, 2);
    assert_eq!(ids(&page.items), vec!["6", "7"]);

    view.page = 0;
    let page = transform(&books, &view, size(5));
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 5);
}

#[test]
fn sort_is_stable_in_both_directions() {
    // Two pairs of equal prices; ids record input order.
    let books = vec![
        priced_book(1, "A", 10.0, "2020-01-01", "x"),
        priced_book(2, "B", 5.0, "2020-01-01", "x"),
        priced_book(3, "C", 10.0, "2020-01-01", "x"),
        priced_book(4, "D", 5.0, "2020-01-01", "x"),
    ];

    let asc = transform(&books, &sorted_by(BookField::Price, SortDirection::Ascending), size(10));
    assert_eq!(ids(&asc.items), vec!["2", "4", "1", "3"]);

    let desc = transform(&books, &sorted_by(BookField::Price, SortDirection::Descending), size(10));
    assert_eq!(ids(&desc.items), vec!["1", "3", "2", "4"]);
}

#[test]
fn descending_reverses_ascending_for_distinct_keys() {
    let books = vec![
        priced_book(1, "Middlemarch", 12.0, "1871-12-01", "George Eliot"),
        priced_book(2, "Dune", 9.5, "1965-08-01", "Frank Herbert"),
        priced_book(3, "Emma", 7.25, "1815-12-23", "Jane Austen"),
        priced_book(4, "Ulysses", 15.0, "1922-02-02", "James Joyce"),
    ];
    for field in [
        BookField::Title,
        BookField::Price,
        BookField::PublicationDate,
        BookField::Author,
    ] {
        let asc = transform(&books, &sorted_by(field, SortDirection::Ascending), size(10));
        let desc = transform(&books, &sorted_by(field, SortDirection::Descending), size(10));
        let mut reversed = ids(&asc.items);
        reversed.reverse();
        assert_eq!(ids(&desc.items), reversed, "field {:?}", field);
    }
}

#[test]
fn sort_follows_field_types() {
    let books = vec![
        priced_book(10, "Ten", 100.0, "2001-01-01", "b"),
        priced_book(2, "Two", 9.0, "1999-12-31", "a"),
        priced_book(1, "One", 10.5, "2000-06-15", "c"),
    ];

    // Ids compare numerically, not as text.
    let by_id = transform(&books, &sorted_by(BookField::Id, SortDirection::Ascending), size(10));
    assert_eq!(ids(&by_id.items), vec!["1", "2", "10"]);

    let by_price = transform(&books, &sorted_by(BookField::Price, SortDirection::Ascending), size(10));
    assert_eq!(ids(&by_price.items), vec!["2", "1", "10"]);

    let by_date = transform(
        &books,
        &sorted_by(BookField::PublicationDate, SortDirection::Ascending),
        size(10),
    );
    assert_eq!(ids(&by_date.items), vec!["2", "1", "10"]);
}

#[test]
fn large_integer_ids_keep_their_order() {
    // Both ids round to the same f64.
    let books = vec![book(9_007_199_254_740_993, "Later"), book(9_007_199_254_740_992, "Earlier")];

    let asc = transform(&books, &sorted_by(BookField::Id, SortDirection::Ascending), size(10));
    assert_eq!(ids(&asc.items), vec!["9007199254740992", "9007199254740993"]);

    let desc = transform(&books, &sorted_by(BookField::Id, SortDirection::Descending), size(10));
    assert_eq!(ids(&desc.items), vec!["9007199254740993", "9007199254740992"]);
}

#[test]
fn missing_values_sort_first() {
    let books = vec![
        priced_book(1, "Priced", 3.0, "2000-01-01", "a"),
        book(2, "Unpriced"),
    ];
    let asc = transform(&books, &sorted_by(BookField::Price, SortDirection::Ascending), size(10));
    assert_eq!(ids(&asc.items), vec!["2", "1"]);
}

#[test]
fn header_click_toggles_or_resets_direction() {
    let view = ViewState::new(BookField::Id);
    assert_eq!(view.sort.direction, SortDirection::Ascending);

    let view = view.reduce(ViewAction::SortBy(BookField::Id), 1);
    assert_eq!(view.sort.field, BookField::Id);
    assert_eq!(view.sort.direction, SortDirection::Descending);

    let view = view.reduce(ViewAction::SortBy(BookField::Price), 1);
    assert_eq!(view.sort.field, BookField::Price);
    assert_eq!(view.sort.direction, SortDirection::Ascending);
}

#[test]
fn page_navigation_stays_in_range() {
    let view = ViewState::new(GenreField::Name);
    let view = view.reduce(ViewAction::PrevPage, 3);
    assert_eq!(view.page, 1);

    let view = view.reduce(ViewAction::NextPage, 3).reduce(ViewAction::NextPage, 3);
    assert_eq!(view.page, 3);
    let view = view.reduce(ViewAction::NextPage, 3);
    assert_eq!(view.page, 3);

    let view = view.reduce(ViewAction::GoToPage(7), 3);
    assert_eq!(view.page, 3);
    let view = view.reduce(ViewAction::GoToPage(0), 3);
    assert_eq!(view.page, 3);

    // A new search starts over on the first page.
    let view = view.reduce(ViewAction::Search("sci".into()), 3);
    assert_eq!(view.page, 1);
    assert_eq!(view.search, "sci");
}

#[test]
fn select_all_is_scoped_to_the_filtered_set() {
    let genres = vec![
        genre(1, "Science Fiction"),
        genre(2, "Fantasy"),
        genre(3, "Science"),
        genre(4, "History"),
    ];
    let mut selection = Selection::new();
    selection.toggle(&EntityId::from(4));

    let visible: Vec<&EntityId> = filter_records(&genres, "science")
        .into_iter()
        .map(|g| &g.genre_id)
        .collect();

    assert!(!selection.all_selected(visible.iter().copied()));
    assert!(selection.toggle_all(&visible));
    assert!(selection.contains(&EntityId::from(1)));
    assert!(selection.contains(&EntityId::from(3)));
    assert!(!selection.contains(&EntityId::from(2)));
    assert!(selection.all_selected(visible.iter().copied()));
    assert_eq!(selection.len(), 3);

    // Toggling again clears exactly the filtered ids; the earlier pick survives.
    assert!(!selection.toggle_all(&visible));
    assert_eq!(selection.ids().cloned().collect::<Vec<_>>(), vec![EntityId::from(4)]);
}

#[test]
fn select_all_on_empty_filter_selects_nothing() {
    let mut selection = Selection::new();
    assert!(!selection.all_selected(Vec::<&EntityId>::new()));
    assert!(!selection.toggle_all(&[]));
    assert!(selection.is_empty());
}

#[test]
fn selection_is_pruned_to_loaded_ids() {
    let mut selection = Selection::new();
    for id in [1, 2, 3] {
        selection.toggle(&EntityId::from(id));
    }
    let loaded = [EntityId::from(2), EntityId::from(3), EntityId::from(9)];
    selection.retain_loaded(loaded.iter());
    assert_eq!(
        selection.ids().cloned().collect::<Vec<_>>(),
        vec![EntityId::from(2), EntityId::from(3)]
    );
}
