use common::DateRange;

/// Filter for financial entry reads. Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub category_id: Option<i32>,
    /// Case-insensitive substring of the entry label.
    pub label_contains: Option<String>,
    /// Inclusive day range on the entry timestamp.
    pub range: Option<DateRange>,
}

impl EntryFilter {
    pub fn within(range: DateRange) -> Self {
        Self {
            range: Some(range),
            ..Default::default()
        }
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn label(mut self, needle: impl Into<String>) -> Self {
        self.label_contains = Some(needle.into());
        self
    }
}
