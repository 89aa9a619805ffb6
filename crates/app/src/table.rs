//! Local list state: filter, sort, paginate
//!
//! Filtering is a case-insensitive substring match over each row's
//! searchable fields. Sorting is stable and case-insensitive on the
//! selected column. Pagination partitions the filtered, sorted sequence
//! into fixed-size windows; the current page is clamped so it never runs
//! past the last page when the collection changes size.

use teachportal_client::{Student, Teacher};

/// Sort direction, flipped by re-selecting the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Comparable projection of one column of one row.
///
/// Text sorts lexicographically (callers lowercase it), numbers
/// numerically; a column projects to one variant only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(u64),
    Text(String),
}

/// Row projection used by [`TableState`] for filtering and sorting
pub trait TableRow {
    /// Field values the free-text filter matches against
    fn searchable(&self) -> Vec<String>;

    /// Sort value for a column key; unknown keys sort as empty text
    fn sort_value(&self, key: &str) -> SortValue;
}

impl TableRow for Student {
    fn searchable(&self) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
        ]
    }

    fn sort_value(&self, key: &str) -> SortValue {
        let value = match key {
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "email" => &self.email,
            _ => "",
        };
        SortValue::Text(value.to_lowercase())
    }
}

impl TableRow for Teacher {
    fn searchable(&self) -> Vec<String> {
        let mut fields = vec![self.display_name()];
        fields.extend(self.email.clone());
        fields.extend(self.user_name.clone());
        fields
    }

    fn sort_value(&self, key: &str) -> SortValue {
        match key {
            "students" => SortValue::Number(self.student_count),
            _ => SortValue::Text(self.display_name().to_lowercase()),
        }
    }
}

/// Filter/sort/page state over a list of rows. Pages are 1-based.
#[derive(Debug, Clone)]
pub struct TableState<T> {
    rows: Vec<T>,
    query: String,
    sort_key: String,
    direction: SortDirection,
    page: usize,
    page_size: usize,
}

impl<T: TableRow + Clone> TableState<T> {
    pub fn new(sort_key: &str, page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            query: String::new(),
            sort_key: sort_key.to_string(),
            direction: SortDirection::Ascending,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the backing rows, keeping the page within bounds
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.page = self.page.min(self.total_pages());
    }

    /// Insert a row at the front, the way a freshly created record shows up
    pub fn prepend_row(&mut self, row: T) {
        self.rows.insert(0, row);
    }

    /// Update the free-text filter; resets to the first page
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 1;
    }

    /// Update the page size; resets to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Select a sort column. Re-selecting the active column flips the
    /// direction; a new column starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key == key {
            self.direction = self.direction.flip();
        } else {
            self.sort_key = key.to_string();
            self.direction = SortDirection::Ascending;
        }
    }

    /// Jump to a page, clamped to `[1, total_pages]`
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, clamped against the filtered row count
    pub fn current_page(&self) -> usize {
        self.page.min(self.total_pages())
    }

    pub fn total_pages(&self) -> usize {
        let filtered = self.filtered_sorted().len();
        (filtered.div_ceil(self.page_size)).max(1)
    }

    /// All rows passing the filter, in sort order
    pub fn filtered_sorted(&self) -> Vec<T> {
        let needle = self.query.trim().to_lowercase();
        let mut rows: Vec<T> = if needle.is_empty() {
            self.rows.clone()
        } else {
            self.rows
                .iter()
                .filter(|row| {
                    row.searchable()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect()
        };

        // Vec::sort_by is stable, so equal keys keep their arrival order
        rows.sort_by(|a, b| {
            let ordering = a.sort_value(&self.sort_key).cmp(&b.sort_value(&self.sort_key));
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    /// The rows on the current page
    pub fn visible(&self) -> Vec<T> {
        let rows = self.filtered_sorted();
        let start = (self.current_page() - 1) * self.page_size;
        rows.into_iter().skip(start).take(self.page_size).collect()
    }
}
