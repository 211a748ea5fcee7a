//! Calendar locales: month/weekday names and date formats.
//!
//! The picker and the chart tooltips format dates through a
//! [`CalendarLocale`] handed to them at construction, chosen from the
//! configured locale list with [`calendar_locale`].

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

pub trait CalendarLocale: Send + Sync + fmt::Debug {
    /// BCP 47 language tag.
    fn tag(&self) -> &'static str;

    /// Standalone month name, `month` in `1..=12`.
    fn month_name(&self, month: u32) -> &'static str;

    fn weekday_short(&self, weekday: Weekday) -> &'static str;

    /// Numeric short date (`dateStyle: short`).
    fn format_short(&self, date: NaiveDate) -> String;

    /// Abbreviated month date (`dateStyle: medium`).
    fn format_medium(&self, date: NaiveDate) -> String;
}

/// Pick the first supported locale from an ordered list; English otherwise.
pub fn calendar_locale<S: AsRef<str>>(tags: &[S]) -> Arc<dyn CalendarLocale> {
    for tag in tags {
        let language = tag.as_ref().split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "ru" => return Arc::new(Russian),
            "en" => return Arc::new(English),
            _ => {}
        }
    }
    Arc::new(English)
}

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

#[derive(Debug, Clone, Copy, Default)]
pub struct English;

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl CalendarLocale for English {
    fn tag(&self) -> &'static str {
        "en"
    }

    fn month_name(&self, month: u32) -> &'static str {
        EN_MONTHS[month_index(month)]
    }

    fn weekday_short(&self, weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    fn format_short(&self, date: NaiveDate) -> String {
        format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100)
    }

    fn format_medium(&self, date: NaiveDate) -> String {
        let month = &self.month_name(date.month())[..3];
        format!("{month} {}, {}", date.day(), date.year())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Russian;

const RU_MONTHS: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь", "июль", "август", "сентябрь",
    "октябрь", "ноябрь", "декабрь",
];

const RU_MONTHS_SHORT: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

impl CalendarLocale for Russian {
    fn tag(&self) -> &'static str {
        "ru"
    }

    fn month_name(&self, month: u32) -> &'static str {
        RU_MONTHS[month_index(month)]
    }

    fn weekday_short(&self, weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "пн",
            Weekday::Tue => "вт",
            Weekday::Wed => "ср",
            Weekday::Thu => "чт",
            Weekday::Fri => "пт",
            Weekday::Sat => "сб",
            Weekday::Sun => "вс",
        }
    }

    fn format_short(&self, date: NaiveDate) -> String {
        date.format("%d.%m.%Y").to_string()
    }

    fn format_medium(&self, date: NaiveDate) -> String {
        format!(
            "{} {} {} г.",
            date.day(),
            RU_MONTHS_SHORT[month_index(date.month())],
            date.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_supported_tag_wins() {
        assert_eq!(calendar_locale(&["ru", "en"]).tag(), "ru");
        assert_eq!(calendar_locale(&["de-DE", "en-US"]).tag(), "en");
        assert_eq!(calendar_locale::<&str>(&[]).tag(), "en");
    }

    #[test]
    fn test_english_formats() {
        assert_eq!(English.format_short(date(2024, 1, 5)), "1/5/24");
        assert_eq!(English.format_medium(date(2024, 9, 15)), "Sep 15, 2024");
        assert_eq!(English.month_name(12), "December");
    }

    #[test]
    fn test_russian_formats() {
        assert_eq!(Russian.format_short(date(2024, 1, 5)), "05.01.2024");
        assert_eq!(Russian.format_medium(date(2024, 5, 1)), "1 мая 2024 г.");
        assert_eq!(Russian.weekday_short(Weekday::Mon), "пн");
    }
}
