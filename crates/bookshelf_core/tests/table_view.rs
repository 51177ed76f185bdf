use bookshelf_core::{
    BookDraft, Catalog, Rating, ReadFilter, SearchQuery, SortColumn, SortOrder, TableView,
};

fn catalog(dir: &tempfile::TempDir) -> Catalog {
    let catalog = Catalog::open(dir.path().join("books.db")).unwrap();
    for draft in [
        BookDraft::new("b-title", "Zed", "Shelf 2").rated(Rating::new(10)),
        BookDraft::new("a-title", "Amy", "Shelf 10").read(true),
        BookDraft::new("c-title", "Bob", "Shelf 1")
            .read(true)
            .rated(Rating::new(2)),
    ] {
        catalog.create(&draft).unwrap();
    }
    catalog
}

#[test]
fn query_applies_filter_then_sort() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog(&dir);

    let view = TableView::query(
        &catalog,
        &SearchQuery::new("title").with_filter(ReadFilter::Read),
        Some(SortOrder::ascending(SortColumn::Title)),
    )
    .unwrap();

    let titles = view
        .rows
        .iter()
        .map(|row| row.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["a-title", "c-title"]);
}

#[test]
fn text_columns_sort_lexicographically() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog(&dir);

    let view = TableView::query(
        &catalog,
        &SearchQuery::default(),
        Some(SortOrder::ascending(SortColumn::Location)),
    )
    .unwrap();
    let locations = view
        .rows
        .iter()
        .map(|row| row.location.as_str())
        .collect::<Vec<_>>();
    assert_eq!(locations, vec!["Shelf 1", "Shelf 10", "Shelf 2"]);
}

#[test]
fn rating_sorts_descending_after_second_click() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog(&dir);

    let order = SortOrder::from_clicks([SortColumn::Rating, SortColumn::Rating]);
    let view = TableView::query(&catalog, &SearchQuery::default(), order).unwrap();
    let ratings = view
        .rows
        .iter()
        .map(|row| row.rating.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ratings, vec!["10", "2", "N/A"]);
}

#[test]
fn empty_book_list_renders_empty_view() {
    let view = TableView::from_books(&[], Some(SortOrder::ascending(SortColumn::Id)));
    assert!(view.is_empty());
    assert_eq!(view.len(), 0);
}
