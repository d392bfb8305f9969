#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::*;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(None));

        let called_clone = called.clone();
        sig.subscribe(move |v| {
            *called_clone.borrow_mut() = Some(*v);
        });

        sig.set(42);
        assert_eq!(*called.borrow(), Some(42));
    }

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let sig = signal((1usize, 3usize));
        let hits = Rc::new(Cell::new(0));
        sig.subscribe({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        });

        assert!(!sig.set_if_changed((1, 3)));
        assert_eq!(hits.get(), 0);

        assert!(sig.set_if_changed((2, 3)));
        assert_eq!(hits.get(), 1);
        assert_eq!(sig.get(), (2, 3));
    }

    #[test]
    fn test_unsubscribe() {
        let sig = signal(0);
        let hits = Rc::new(Cell::new(0));
        let id = sig.subscribe({
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        });

        sig.set(1);
        assert!(sig.unsubscribe(id));
        assert!(!sig.unsubscribe(id));
        sig.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_write_back() {
        // clamp to at most 10 from inside the subscriber
        let sig = signal(0);
        let writer = sig.clone();
        sig.subscribe(move |v| {
            if *v > 10 {
                writer.set(10);
            }
        });

        sig.set(25);
        assert_eq!(sig.get(), 10);
    }

    #[test]
    fn test_watch_dispose() {
        let sig = signal(0);
        let seen = Rc::new(Cell::new(0));
        let stop = sig.watch({
            let seen = seen.clone();
            move |v| seen.set(*v)
        });

        sig.set(3);
        stop.run();
        stop.run();
        sig.set(4);

        assert_eq!(seen.get(), 3);
        assert!(stop.is_disposed());
    }

    #[test]
    fn test_dispose_runs_once_across_clones() {
        let runs = Rc::new(Cell::new(0));
        let d = Dispose::new({
            let runs = runs.clone();
            move || runs.set(runs.get() + 1)
        });
        let d2 = d.clone();

        d.run();
        d2.run();
        assert_eq!(runs.get(), 1);
        assert!(Dispose::noop().is_disposed());
    }

    #[test]
    fn test_loading_is_reentrant() {
        let loading = Loading::new();
        assert!(!loading.is_loading());

        let outer = loading.begin();
        let inner = loading.begin();
        assert_eq!(loading.count(), 2);

        drop(inner);
        assert!(loading.is_loading());
        drop(outer);
        assert!(!loading.is_loading());
    }

    #[test]
    fn test_show_until_counts_before_first_poll() {
        let loading = Loading::new();
        let fut = loading.show_until(async { 7 });
        assert!(loading.is_loading());

        assert_eq!(pollster::block_on(fut), 7);
        assert!(!loading.is_loading());
    }

    #[test]
    fn test_show_until_releases_on_error() {
        let loading = Loading::new();
        let out: Result<(), &str> = pollster::block_on(loading.show_until(async { Err("boom") }));

        assert_eq!(out, Err("boom"));
        assert_eq!(loading.count(), 0);
    }

    #[test]
    fn test_show_until_releases_on_drop() {
        let loading = Loading::new();
        let fut = loading.show_until(std::future::pending::<()>());
        assert_eq!(loading.count(), 1);

        drop(fut);
        assert_eq!(loading.count(), 0);
    }

    #[test]
    fn test_loading_subscribe_reports_flips_only() {
        let loading = Loading::new();
        let flips = Rc::new(RefCell::new(Vec::new()));
        loading.subscribe({
            let flips = flips.clone();
            move |busy| flips.borrow_mut().push(busy)
        });

        let a = loading.begin();
        let b = loading.begin();
        drop(a);
        drop(b);

        assert_eq!(*flips.borrow(), vec![true, false]);
    }
}
