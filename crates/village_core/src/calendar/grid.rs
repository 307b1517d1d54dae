//! Month grid construction for calendar rendering.
//!
//! # Invariants
//! - `cells` starts with one blank per weekday before day 1 (Sunday = 0).
//! - One cell per day follows; no trailing padding completes the last row.

use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Year/month pair outside the representable calendar.
    InvalidMonth { year: i32, month: u32 },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth { year, month } => {
                write!(f, "invalid calendar month: {year}-{month:02}")
            }
        }
    }
}

impl Error for CalendarError {}

/// Navigation direction for month paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

/// Displayed month with its grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    leading_blanks: u32,
    days_in_month: u32,
    cells: Vec<Option<u32>>,
}

impl MonthGrid {
    /// Builds the grid for `month` (1-12) of `year`.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        let invalid = CalendarError::InvalidMonth { year, month };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(invalid.clone())?;
        let (next_year, next_month) = shift(year, month, MonthStep::Next);
        // Day 0 of next month is the last day of this one.
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|next_first| next_first.pred_opt())
            .ok_or(invalid)?;

        let leading_blanks = first.weekday().num_days_from_sunday();
        let days_in_month = last.day();
        let cells = std::iter::repeat(None)
            .take(leading_blanks as usize)
            .chain((1..=days_in_month).map(Some))
            .collect();

        Ok(Self {
            year,
            month,
            leading_blanks,
            days_in_month,
            cells,
        })
    }

    /// Builds the grid for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, CalendarError> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn leading_blanks(&self) -> u32 {
        self.leading_blanks
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// Blank cells are `None`, day cells carry the day of month.
    pub fn cells(&self) -> &[Option<u32>] {
        &self.cells
    }

    /// Grid rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(7)
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Heading such as `March 2025`.
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    /// Zero-padded `YYYY-MM-DD` key for `day`, or `None` when out of range.
    pub fn date_key_for(&self, day: u32) -> Option<String> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        Some(format!("{:04}-{:02}-{:02}", self.year, self.month, day))
    }

    /// Grid for the adjacent month.
    pub fn step(&self, step: MonthStep) -> Result<Self, CalendarError> {
        let (year, month) = shift(self.year, self.month, step);
        Self::new(year, month)
    }

    pub fn previous(&self) -> Result<Self, CalendarError> {
        self.step(MonthStep::Previous)
    }

    pub fn next(&self) -> Result<Self, CalendarError> {
        self.step(MonthStep::Next)
    }
}

fn shift(year: i32, month: u32, step: MonthStep) -> (i32, u32) {
    match step {
        MonthStep::Next if month >= 12 => (year.saturating_add(1), 1),
        MonthStep::Next => (year, month + 1),
        MonthStep::Previous if month <= 1 => (year.saturating_sub(1), 12),
        MonthStep::Previous => (year, month - 1),
    }
}
