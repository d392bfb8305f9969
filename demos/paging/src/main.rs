use std::rc::Rc;

use tether_core::Loading;
use tether_pagination::*;

fn print_page<T: std::fmt::Debug + Clone>(label: &str, pages: &Pagination<T>) {
    let nav = pages.navigation();
    println!(
        "{label}: page {}/{} {:?} (total {}, prev: {}, next: {})",
        pages.page(),
        nav.count,
        pages.items(),
        pages.total(),
        nav.has_prev(),
        nav.has_next(),
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // In-memory list, sliced on demand.
    let colors = Pagination::new(
        vec!["red", "orange", "yellow", "green", "blue", "indigo", "violet"],
        PaginationOptions::default(),
    )?;
    pollster::block_on(colors.settle())?;
    print_page("colors", &colors);

    colors.next();
    pollster::block_on(colors.settle())?;
    print_page("colors", &colors);

    colors.set_size(5)?;
    pollster::block_on(colors.settle())?;
    print_page("colors", &colors);

    // "Remote" source sharing a loading tracker with whatever else the app runs.
    let loading = Loading::new();
    loading.subscribe(|busy| log::info!("busy: {busy}"));

    let rows: Rc<[u32]> = (1..=23).collect();
    let feed = Pagination::with_loading(
        Source::paged(move |page, size| {
            let rows = rows.clone();
            async move { Ok(slice(&rows, Params::new(page, size))) }
        }),
        PaginationOptions::default().with_size(10),
        loading,
    )?;

    pollster::block_on(feed.settle())?;
    while feed.has_next() {
        pollster::block_on(feed.append())?;
    }
    print_page("feed", &feed);

    Ok(())
}
