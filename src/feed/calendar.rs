//! # feed::calendar
//!
//! Exchange calendar: Monday–Friday minus a holiday list.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::feed::TradingCalendar;

#[derive(Debug, Clone, Default)]
pub struct WeekdayCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl WeekdayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self { holidays: holidays.into_iter().collect() }
    }

    pub fn with_holidays(mut self, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(holidays);
        self
    }
}

impl TradingCalendar for WeekdayCalendar {
    fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
