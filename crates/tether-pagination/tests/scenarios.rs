use std::rc::Rc;

use tether_pagination::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn letters() -> Rc<[&'static str]> {
    Rc::from(vec!["a", "b", "c", "d", "e"])
}

#[test]
fn static_source_first_page() {
    init_logging();
    let pages = Pagination::new(vec![1, 2, 3, 4, 5, 6, 7], PaginationOptions::default().with_size(3)).unwrap();
    pollster::block_on(pages.settle()).unwrap();

    assert_eq!(pages.items(), vec![1, 2, 3]);
    assert_eq!(pages.count(), 3);
    assert!(pages.has_next());
    assert!(!pages.has_prev());
}

#[test]
fn static_source_next_page() {
    let pages = Pagination::new(vec![1, 2, 3, 4, 5, 6, 7], PaginationOptions::default().with_size(3)).unwrap();
    pollster::block_on(pages.settle()).unwrap();

    pages.next();
    pollster::block_on(pages.settle()).unwrap();

    assert_eq!(pages.page(), 2);
    assert_eq!(pages.items(), vec![4, 5, 6]);
    assert!(pages.has_prev());
    assert!(pages.has_next());
}

#[test]
fn async_single_page_is_not_navigable() {
    let source = Source::paged(|_page, _size| async {
        Ok(PagedResult::new(vec!["a", "b"], 1, 2, 2))
    });
    let pages = Pagination::new(source, PaginationOptions::default().with_size(2)).unwrap();
    pollster::block_on(pages.settle()).unwrap();

    assert_eq!(pages.items(), vec!["a", "b"]);
    assert_eq!(pages.count(), 1);
    assert!(!pages.has_pages());
    assert!(!pages.is_first());
    assert!(!pages.is_last());
    assert!(!pages.is_loading());
}

#[test]
fn append_grows_from_empty_state() {
    init_logging();
    let data = letters();
    let source = Source::paged(move |page, size| {
        let result = slice(&data, Params::new(page, size));
        async move { Ok(result) }
    });
    let pages = Pagination::new(source, PaginationOptions::default().with_size(2)).unwrap();
    assert!(pages.items().is_empty());

    pollster::block_on(pages.append()).unwrap();
    assert_eq!(pages.items(), vec!["a", "b"]);
    assert_eq!(pages.page(), 1);
    assert_eq!(pages.total(), 5);

    pollster::block_on(pages.append()).unwrap();
    assert_eq!(pages.items(), vec!["a", "b", "c", "d"]);
    assert_eq!(pages.page(), 2);
    assert_eq!(pages.total(), 5);

    // the initial request was dropped by the first append
    assert!(!pages.has_scheduled());
    pollster::block_on(pages.settle()).unwrap();
    assert_eq!(pages.items().len(), 4);
}

#[test]
fn refresh_replaces_after_append() {
    let pages = Pagination::new(vec![1, 2, 3, 4, 5, 6], PaginationOptions::default().with_size(2)).unwrap();
    pollster::block_on(pages.settle()).unwrap();
    pollster::block_on(pages.append()).unwrap();
    assert_eq!(pages.items(), vec![1, 2, 3, 4]);

    pollster::block_on(pages.refresh()).unwrap();
    assert_eq!(pages.items(), vec![3, 4]);
}

#[test]
fn source_errors_pass_through_unchanged() {
    #[derive(Debug, thiserror::Error)]
    #[error("quota exceeded")]
    struct Quota;

    let source = Source::<u8>::paged(|_page, _size| async { Err(anyhow::Error::new(Quota)) });
    let pages = Pagination::new(source, PaginationOptions::default()).unwrap();

    match pollster::block_on(pages.refresh()) {
        Err(PaginationError::Source(err)) => assert!(err.downcast_ref::<Quota>().is_some()),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
