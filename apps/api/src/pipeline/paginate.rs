/// Outcome of asking for one display page.
#[derive(Debug, PartialEq, Eq)]
pub enum Pagination<'a, T> {
    Page {
        items: &'a [T],
        page_number: usize,
        total_pages: usize,
    },
    /// The requested page lies past the end. Not an error: the caller shows
    /// "only N pages available".
    OutOfRange { total_pages: usize },
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Positional slice `[(page_number - 1) * page_size, page_number * page_size)`.
/// `page_number` is 1-based.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Pagination<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    if page_number == 0 || page_number > total_pages {
        return Pagination::OutOfRange { total_pages };
    }

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Pagination::Page {
        items: &items[start..end],
        page_number,
        total_pages,
    }
}
