//! Offset pagination window.

/// Largest page size a window accepts.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Which slice of the remote rows has been requested.
///
/// `offset` only ever moves in whole `page_size` steps, so it stays a
/// multiple of the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: usize,
    page_size: usize,
}

impl PageWindow {
    /// The first page. Returns `None` unless `page_size` is in
    /// `1..=MAX_PAGE_SIZE`.
    pub fn first(page_size: usize) -> Option<Self> {
        (1..=MAX_PAGE_SIZE).contains(&page_size).then_some(Self {
            offset: 0,
            page_size,
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.page_size)
    }

    /// The window directly after this one.
    pub fn next(&self) -> Self {
        Self {
            offset: self.end(),
            page_size: self.page_size,
        }
    }

    /// Back to the first page.
    pub fn reset(&self) -> Self {
        Self {
            offset: 0,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert!(PageWindow::first(0).is_none());
        assert!(PageWindow::first(MAX_PAGE_SIZE + 1).is_none());
        assert!(PageWindow::first(usize::MAX).is_none());
        assert_eq!(PageWindow::first(MAX_PAGE_SIZE).unwrap().end(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_next_advances_to_previous_end() {
        let first = PageWindow::first(20).unwrap();
        let second = first.next();
        let third = second.next();

        assert_eq!((first.offset(), first.end()), (0, 20));
        assert_eq!((second.offset(), second.end()), (20, 40));
        assert_eq!(third.offset() % 20, 0);
        assert_eq!(third.reset(), first);
    }
}
