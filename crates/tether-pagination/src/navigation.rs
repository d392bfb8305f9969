use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NavFlags: u8 {
        /// More than one page exists.
        const HAS_PAGES = 1 << 0;
        const HAS_PREV  = 1 << 1;
        const HAS_NEXT  = 1 << 2;
        const IS_FIRST  = 1 << 3;
        const IS_LAST   = 1 << 4;
    }
}

/// Navigation predicates derived from a settled `(page, size, total)`.
///
/// Everything except `count` requires more than one page: a single-page or
/// empty collection is neither first nor last, and cannot move either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Navigation {
    pub count: usize,
    pub flags: NavFlags,
}

impl Navigation {
    pub fn derive(page: usize, size: usize, total: usize) -> Self {
        let count = page_count(total, size);
        let mut flags = NavFlags::empty();
        if count > 1 {
            flags |= NavFlags::HAS_PAGES;
            flags.set(NavFlags::HAS_PREV, page > 1);
            flags.set(NavFlags::HAS_NEXT, page < count);
            flags.set(NavFlags::IS_FIRST, page == 1);
            flags.set(NavFlags::IS_LAST, page == count);
        }
        Self { count, flags }
    }

    pub fn has_pages(&self) -> bool {
        self.flags.contains(NavFlags::HAS_PAGES)
    }

    pub fn has_prev(&self) -> bool {
        self.flags.contains(NavFlags::HAS_PREV)
    }

    pub fn has_next(&self) -> bool {
        self.flags.contains(NavFlags::HAS_NEXT)
    }

    pub fn is_first(&self) -> bool {
        self.flags.contains(NavFlags::IS_FIRST)
    }

    pub fn is_last(&self) -> bool {
        self.flags.contains(NavFlags::IS_LAST)
    }
}

/// `ceil(total / size)`, or 0 for an empty collection or a zero size.
pub fn page_count(total: usize, size: usize) -> usize {
    if size == 0 { 0 } else { total.div_ceil(size) }
}
