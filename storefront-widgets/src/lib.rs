//! Storefront admin widgets.
//!
//! Components render to [`domtree`] element trees and talk to the backend
//! through a [`JsonFetcher`](storefront_api::JsonFetcher):
//!
//! - [`SortableTable`]: sortable, paginated table with local or remote
//!   sorting and infinite scroll
//! - [`DoubleSlider`]: two-thumb range slider emitting `range-select`
//! - [`RangePicker`]: two-month calendar emitting `date-select`
//! - [`ColumnChart`]: column chart of a date-keyed series
//!
//! Every component registers its document listeners per instance and
//! releases all of them in `destroy`.

pub mod chart;
pub mod collate;
pub mod error;
pub mod events;
pub mod locale;
pub mod range_picker;
pub mod slider;
pub mod table;
pub mod throttle;

pub use chart::{ChartConfig, ColumnChart};
pub use collate::{CodepointCollator, Collator, LocaleCollator};
pub use error::{ConfigError, Error};
pub use events::{EventResult, WidgetEvent};
pub use locale::{CalendarLocale, calendar_locale};
pub use range_picker::{PickerConfig, RangePicker};
pub use slider::{DoubleSlider, SliderConfig};
pub use table::{Column, LoadOutcome, SortType, SortableTable, TableConfig};
pub use throttle::Throttle;
