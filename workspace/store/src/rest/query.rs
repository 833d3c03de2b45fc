use std::fmt::Display;

use chrono::NaiveDate;
use common::DateRange;

/// A PostgREST read: the table plus its URL query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Query {
    pub table: &'static str,
    pub params: Vec<(String, String)>,
}

impl Query {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            params: Vec::new(),
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("eq.{value}"))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("gte.{value}"))
    }

    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, format!("lt.{value}"))
    }

    /// Case-insensitive substring match.
    pub fn contains(self, column: &str, needle: &str) -> Self {
        self.filter(column, format!("ilike.*{needle}*"))
    }

    /// Whole days of `range` on a date or timestamp column.
    pub fn within(self, column: &str, range: DateRange) -> Self {
        self.gte(column, day(range.start))
            .lt(column, day(range.end_exclusive()))
    }

    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, rows: usize) -> Self {
        self.params.push(("limit".to_string(), rows.to_string()));
        self
    }

    fn filter(mut self, column: &str, expression: String) -> Self {
        self.params.push((column.to_string(), expression));
        self
    }
}

pub(crate) fn day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
