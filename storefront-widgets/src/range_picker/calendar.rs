//! Month calendars for the range picker.

use chrono::{Datelike, Months, NaiveDate, NaiveTime, Weekday};
use domtree::{Content, Element};
use storefront_api::query::iso_timestamp;

use crate::locale::CalendarLocale;

pub(super) const CELL_CLASS: &str = "rangepicker__cell";
pub(super) const SELECTED_FROM: &str = "rangepicker__selected-from";
pub(super) const SELECTED_TO: &str = "rangepicker__selected-to";
pub(super) const SELECTED_BETWEEN: &str = "rangepicker__selected-between";

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Current highlight: a committed range, or a start date awaiting its end.
#[derive(Debug, Clone, Copy)]
pub(super) struct Highlight {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl Highlight {
    fn class_for(&self, date: NaiveDate) -> Option<&'static str> {
        if date == self.from {
            return Some(SELECTED_FROM);
        }
        match self.to {
            Some(to) if date == to => Some(SELECTED_TO),
            Some(to) if date > self.from && date < to => Some(SELECTED_BETWEEN),
            _ => None,
        }
    }
}

/// ISO value carried by a day cell: midnight UTC.
pub(super) fn cell_value(date: NaiveDate) -> String {
    iso_timestamp(&date.and_time(NaiveTime::MIN).and_utc())
}

pub(super) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub(super) fn shift_month(month: NaiveDate, forward: bool) -> NaiveDate {
    let step = Months::new(1);
    let shifted = if forward {
        month.checked_add_months(step)
    } else {
        month.checked_sub_months(step)
    };
    shifted.unwrap_or(month)
}

/// One month: indicator, weekday header and the day grid.
pub(super) fn month_calendar(
    picker_id: &str,
    month: NaiveDate,
    highlight: &Highlight,
    locale: &dyn CalendarLocale,
) -> Element {
    let name = locale.month_name(month.month());

    Element::div()
        .class("rangepicker__calendar")
        .child(
            Element::div().class("rangepicker__month-indicator").child(
                Element::new("time")
                    .attr("datetime", name)
                    .content(Content::Text(name.to_string())),
            ),
        )
        .child(
            Element::div()
                .class("rangepicker__day-of-week")
                .children(WEEK.iter().map(|day| {
                    Element::div().content(Content::Text(locale.weekday_short(*day).to_string()))
                })),
        )
        .child(
            Element::div()
                .class("rangepicker__date-grid")
                .children(days_of(month).map(|date| day_cell(picker_id, date, highlight))),
        )
}

fn days_of(month: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let first = first_of_month(month);
    first
        .iter_days()
        .take_while(move |date| date.month() == first.month())
}

fn day_cell(picker_id: &str, date: NaiveDate, highlight: &Highlight) -> Element {
    let mut cell = Element::button(date.day().to_string())
        .id(format!("{picker_id}-day-{date}"))
        .class(CELL_CLASS)
        .data("value", cell_value(date));

    if date.day() == 1 {
        let start = date.weekday().number_from_monday();
        cell.set_style("--start-from", start.to_string());
    }
    if let Some(class) = highlight.class_for(date) {
        cell.add_class(class);
    }

    cell
}
