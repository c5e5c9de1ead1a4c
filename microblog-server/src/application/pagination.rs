/// Posts shown per listing page.
pub const PAGE_SIZE: usize = 10;

/// One fixed-size slice of an ordered result set, with the metadata the
/// templates need for navigation.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slices `items` into the requested page. The raw query parameter is
/// parsed leniently: absent or unparsable values mean page 1, and numbers
/// past either end clamp to the nearest valid page. An empty result set
/// still yields one valid, empty page.
pub fn paginate<T>(items: Vec<T>, raw_page: Option<&str>) -> Page<T> {
    let requested = raw_page
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1);

    let total_count = items.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE).max(1);
    let number = requested.min(total_pages);

    let items = items
        .into_iter()
        .skip((number - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Page {
        items,
        number,
        total_pages,
        total_count,
    }
}
