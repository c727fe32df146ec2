//! Client-side filtering and pagination for the read-only catalogue views.

/// A row that can be matched against the filter box.
pub trait Searchable {
    /// Text fields the filter is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Rows whose fields contain `filter`, ignoring case, in their original order.
///
/// A blank filter keeps every row.
pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], filter: &str) -> Vec<&'a T> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 50;

    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit: limit.max(1),
        }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// One page of rows as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    pub rows: Vec<T>,
    pub page: Page,
    /// Inferred: a full page means there may be more rows after it.
    pub has_more: bool,
}

impl<T> PageView<T> {
    pub fn from_response(rows: Vec<T>, page: Page) -> Self {
        let has_more = rows.len() as u64 >= u64::from(page.limit);
        Self {
            rows,
            page,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn filter_matches_any_field_ignoring_case() {
        let rows = [
            Row("IMSA WeatherTech", "2024"),
            Row("FIA WEC", "2024"),
            Row("Michelin Pilot Challenge", "2023"),
        ];

        let names: Vec<_> = filter_rows(&rows, "wec").iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["FIA WEC"]);

        let names: Vec<_> = filter_rows(&rows, "2023").iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["Michelin Pilot Challenge"]);

        assert_eq!(filter_rows(&rows, "  ").len(), 3);
        assert!(filter_rows(&rows, "nascar").is_empty());
    }

    #[test]
    fn full_page_implies_more() {
        let page = Page::new(0, 2);
        assert!(PageView::from_response(vec![1, 2], page).has_more);
        assert!(!PageView::from_response(vec![1], page).has_more);
        assert!(!PageView::<i32>::from_response(Vec::new(), page).has_more);
        assert_eq!(page.next(), Page::new(2, 2));
    }

    #[test]
    fn zero_limit_is_clamped() {
        assert_eq!(Page::new(10, 0).limit, 1);
    }
}
