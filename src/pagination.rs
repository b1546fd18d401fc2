use std::num::NonZeroU32;

use serde::Deserialize;

/// The `?page=` query parameter shared by every feed.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Anything that isn't an integer selects the first page.
    pub fn number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: NonZeroU32,
}

/// Where a page sits in a collection of `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub offset: i64,
    pub limit: i64,
}

impl Paginator {
    pub fn new(per_page: NonZeroU32) -> Paginator {
        Paginator { per_page }
    }

    pub fn per_page(&self) -> i64 {
        i64::from(self.per_page.get())
    }

    /// Computes the total number of pages needed to display `count` items.
    /// An empty collection still has one (empty) page.
    pub fn num_pages(&self, count: i64) -> i64 {
        if count <= 0 {
            1
        } else {
            (count + self.per_page() - 1) / self.per_page()
        }
    }

    /// Resolves a requested page number, clamping it into `1..=num_pages`.
    pub fn span(&self, count: i64, requested: i64) -> PageSpan {
        let num_pages = self.num_pages(count);
        let number = requested.clamp(1, num_pages);
        PageSpan {
            number,
            num_pages,
            count: count.max(0),
            offset: (number - 1) * self.per_page(),
            limit: self.per_page(),
        }
    }

    /// Pages through a collection that is already in memory.
    pub fn paginate<T>(&self, items: Vec<T>, requested: i64) -> Page<T> {
        let span = self.span(items.len() as i64, requested);
        let items = items
            .into_iter()
            .skip(span.offset as usize)
            .take(span.limit as usize)
            .collect();
        Page::new(items, span)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, span: PageSpan) -> Page<T> {
        Page {
            items,
            number: span.number,
            num_pages: span.num_pages,
            count: span.count,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<i64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<i64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(per_page: u32) -> Paginator {
        Paginator::new(NonZeroU32::new(per_page).unwrap())
    }

    #[test]
    fn total_pages() {
        let p = paginator(10);
        assert_eq!(p.num_pages(0), 1);
        assert_eq!(p.num_pages(1), 1);
        assert_eq!(p.num_pages(10), 1);
        assert_eq!(p.num_pages(11), 2);
        assert_eq!(p.num_pages(13), 2);
    }

    #[test]
    fn second_page_holds_the_remainder() {
        let page = paginator(10).paginate((0..13).collect(), 2);
        assert_eq!(page.items, vec![10, 11, 12]);
        assert!(page.has_previous());
        assert!(!page.has_next());
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.next_page_number(), None);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let p = paginator(10);
        assert_eq!(p.span(13, 99).number, 2);
        assert_eq!(p.span(13, 0).number, 1);
        assert_eq!(p.span(13, -4).offset, 0);

        let page = p.paginate((0..13).collect::<Vec<i32>>(), 7);
        assert_eq!(page.number, 2);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let page = paginator(10).paginate(Vec::<i32>::new(), 3);
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.is_empty());
        assert!(!page.has_next() && !page.has_previous());
    }

    #[test]
    fn garbage_page_parameter_means_first_page() {
        let query = |page: Option<&str>| PageQuery { page: page.map(str::to_owned) };
        assert_eq!(query(None).number(), 1);
        assert_eq!(query(Some("abc")).number(), 1);
        assert_eq!(query(Some("")).number(), 1);
        assert_eq!(query(Some("3")).number(), 3);
    }
}
