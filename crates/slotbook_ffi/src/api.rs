//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose reservation and calendar use-cases to Dart via FRB.
//! - Keep the schedule list on the UI side: every call receives the current
//!   items and returns replacement items.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failed mutations return the input items unchanged.
//! - Item ids are decimal strings of core `IntervalId`s.

use log::warn;
use slotbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ClockIds, Interval, MonthCell, OwnerDirectory, ScheduleDraft, ScheduleService, ScheduleSet,
    YearMonth,
};
use std::sync::OnceLock;

const OWNERS_PATH_ENV: &str = "SLOTBOOK_OWNERS_PATH";
static OWNER_DIRECTORY: OnceLock<OwnerDirectory> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Reservation as held by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    /// Decimal interval id.
    pub id: String,
    pub owner: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    /// `HH:MM`
    pub end_time: String,
}

/// Roster entry for the owner picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerItem {
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
}

/// Envelope for add/delete calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleActionResponse {
    /// Whether the mutation was applied.
    pub ok: bool,
    /// Replacement item list, latest start first.
    pub items: Vec<ScheduleItem>,
    /// Id of the created or deleted schedule.
    pub schedule_id: Option<String>,
    /// `validation|order|conflict|not_found|ids_exhausted|duplicate_id|invalid_items`
    /// on failure.
    pub reason: Option<String>,
    /// Human-readable message for the form banner.
    pub message: String,
}

impl ScheduleActionResponse {
    fn success(message: impl Into<String>, items: Vec<ScheduleItem>, schedule_id: String) -> Self {
        Self {
            ok: true,
            items,
            schedule_id: Some(schedule_id),
            reason: None,
            message: message.into(),
        }
    }

    fn failure(reason: &str, message: impl Into<String>, items: Vec<ScheduleItem>) -> Self {
        Self {
            ok: false,
            items,
            schedule_id: None,
            reason: Some(reason.to_string()),
            message: message.into(),
        }
    }
}

/// List-view row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRowItem {
    pub id: String,
    pub owner: String,
    pub color: Option<String>,
    pub start_label: String,
    pub end_label: String,
}

/// Envelope for list-view rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleListResponse {
    pub ok: bool,
    pub rows: Vec<ScheduleRowItem>,
    pub message: String,
}

/// Reservation chip inside a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntryItem {
    pub id: String,
    pub owner: String,
    pub color: Option<String>,
    /// `HH:MM - HH:MM`
    pub time_label: String,
}

/// One calendar grid cell; `day = None` for leading blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCellItem {
    pub day: Option<u32>,
    pub entries: Vec<CalendarEntryItem>,
}

/// Envelope for calendar-view rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonthResponse {
    pub ok: bool,
    pub year: i32,
    pub month: u32,
    /// Header such as `March 2024`.
    pub title: String,
    pub weekday_labels: Vec<String>,
    pub cells: Vec<CalendarCellItem>,
    pub message: String,
}

/// Viewed month after navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarShiftResponse {
    pub ok: bool,
    pub year: i32,
    pub month: u32,
    pub message: String,
}

/// Returns the configured owner roster.
///
/// Reads `SLOTBOOK_OWNERS_PATH` once; falls back to the default roster.
#[flutter_rust_bridge::frb(sync)]
pub fn owner_roster() -> Vec<OwnerItem> {
    owner_directory()
        .owners()
        .iter()
        .map(|owner| OwnerItem {
            name: owner.name.clone(),
            color: owner.color.clone(),
        })
        .collect()
}

/// Validates and admits one reservation.
///
/// # FFI contract
/// - Sync call, no I/O.
/// - Never panics.
/// - On rejection `items` is returned unchanged and `reason` is set.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_add(
    items: Vec<ScheduleItem>,
    owner: String,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
) -> ScheduleActionResponse {
    let schedules = match to_schedule_set(&items) {
        Ok(set) => set,
        Err(message) => {
            return ScheduleActionResponse::failure("invalid_items", message, items);
        }
    };

    let draft = ScheduleDraft::new(owner, start_date, start_time, end_date, end_time);
    let mut service = schedule_service(&schedules);
    match service.add_schedule(&schedules, &draft) {
        Ok(admitted) => ScheduleActionResponse::success(
            "Schedule added.",
            to_items(&admitted.schedules),
            admitted.id.to_string(),
        ),
        Err(err) => ScheduleActionResponse::failure(err.reason_code(), err.to_string(), items),
    }
}

/// Deletes one reservation by id.
///
/// # FFI contract
/// - Sync call, no I/O.
/// - Never panics.
/// - Remaining items keep their order.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_delete(items: Vec<ScheduleItem>, schedule_id: String) -> ScheduleActionResponse {
    let schedules = match to_schedule_set(&items) {
        Ok(set) => set,
        Err(message) => {
            return ScheduleActionResponse::failure("invalid_items", message, items);
        }
    };
    let id = match schedule_id.trim().parse::<u64>() {
        Ok(id) => id,
        Err(_) => {
            return ScheduleActionResponse::failure(
                "not_found",
                format!("schedule not found: {schedule_id}"),
                items,
            );
        }
    };

    let service = schedule_service(&schedules);
    match service.delete_schedule(&schedules, id) {
        Ok(remaining) => {
            ScheduleActionResponse::success("Schedule deleted.", to_items(&remaining), id.to_string())
        }
        Err(err) => ScheduleActionResponse::failure(err.reason_code(), err.to_string(), items),
    }
}

/// Builds list-view rows in item order.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_rows(items: Vec<ScheduleItem>) -> ScheduleListResponse {
    match to_schedule_set(&items) {
        Ok(schedules) => {
            let rows = schedule_service(&schedules)
                .list_rows(&schedules)
                .into_iter()
                .map(|row| ScheduleRowItem {
                    id: row.id.to_string(),
                    owner: row.owner,
                    color: row.color,
                    start_label: row.start_label,
                    end_label: row.end_label,
                })
                .collect::<Vec<_>>();
            let message = if rows.is_empty() {
                "No schedules yet.".to_string()
            } else {
                format!("{} schedule(s).", rows.len())
            };
            ScheduleListResponse {
                ok: true,
                rows,
                message,
            }
        }
        Err(message) => ScheduleListResponse {
            ok: false,
            rows: Vec::new(),
            message,
        },
    }
}

/// Builds the calendar grid for `year-month`.
///
/// # FFI contract
/// - `month` is 1-based.
/// - Never panics; invalid input yields `ok = false` and no cells.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month(items: Vec<ScheduleItem>, year: i32, month: u32) -> CalendarMonthResponse {
    let view = to_schedule_set(&items).and_then(|schedules| {
        schedule_service(&schedules)
            .month_view_at(&schedules, year, month)
            .map_err(|err| err.to_string())
    });

    match view {
        Ok(view) => CalendarMonthResponse {
            ok: true,
            year,
            month,
            title: view.title,
            weekday_labels: view
                .weekday_labels
                .iter()
                .map(|label| label.to_string())
                .collect(),
            cells: view.cells.into_iter().map(to_cell_item).collect(),
            message: String::new(),
        },
        Err(message) => CalendarMonthResponse {
            ok: false,
            year,
            month,
            title: String::new(),
            weekday_labels: Vec::new(),
            cells: Vec::new(),
            message,
        },
    }
}

/// Moves the viewed month by `delta` months with year rollover.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_shift(year: i32, month: u32, delta: i32) -> CalendarShiftResponse {
    match YearMonth::new(year, month).and_then(|current| current.shifted(delta)) {
        Ok(moved) => CalendarShiftResponse {
            ok: true,
            year: moved.year(),
            month: moved.month(),
            message: String::new(),
        },
        Err(err) => CalendarShiftResponse {
            ok: false,
            year,
            month,
            message: err.to_string(),
        },
    }
}

fn owner_directory() -> &'static OwnerDirectory {
    OWNER_DIRECTORY.get_or_init(|| {
        let Ok(raw) = std::env::var(OWNERS_PATH_ENV) else {
            return OwnerDirectory::default();
        };
        let path = raw.trim();
        if path.is_empty() {
            return OwnerDirectory::default();
        }
        OwnerDirectory::load(path).unwrap_or_else(|err| {
            warn!(
                "event=owner_roster_load module=ffi status=fallback error={}",
                err
            );
            OwnerDirectory::default()
        })
    })
}

fn schedule_service(schedules: &ScheduleSet) -> ScheduleService<ClockIds> {
    ScheduleService::new(
        owner_directory().clone(),
        ClockIds::resume_after(schedules.latest_id()),
    )
}

fn to_schedule_set(items: &[ScheduleItem]) -> Result<ScheduleSet, String> {
    let intervals = items
        .iter()
        .map(to_interval)
        .collect::<Result<Vec<_>, _>>()?;
    ScheduleSet::from_intervals(intervals).map_err(|err| err.to_string())
}

fn to_interval(item: &ScheduleItem) -> Result<Interval, String> {
    let id = item
        .id
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid schedule id `{}`", item.id))?;
    let draft = ScheduleDraft::new(
        item.owner.as_str(),
        item.start_date.as_str(),
        item.start_time.as_str(),
        item.end_date.as_str(),
        item.end_time.as_str(),
    );
    let candidate = draft
        .parse()
        .map_err(|err| format!("invalid schedule {id}: {err}"))?;
    Interval::new(id, candidate).map_err(|err| format!("invalid schedule {id}: {err}"))
}

fn to_items(schedules: &ScheduleSet) -> Vec<ScheduleItem> {
    schedules
        .iter()
        .map(|interval| {
            let draft = ScheduleDraft::from(interval);
            ScheduleItem {
                id: interval.id.to_string(),
                owner: draft.owner,
                start_date: draft.start_date,
                start_time: draft.start_time,
                end_date: draft.end_date,
                end_time: draft.end_time,
            }
        })
        .collect()
}

fn to_cell_item(cell: MonthCell) -> CalendarCellItem {
    match cell {
        MonthCell::Blank => CalendarCellItem {
            day: None,
            entries: Vec::new(),
        },
        MonthCell::Day { day, entries } => CalendarCellItem {
            day: Some(day),
            entries: entries
                .into_iter()
                .map(|entry| CalendarEntryItem {
                    id: entry.id.to_string(),
                    owner: entry.owner,
                    color: entry.color,
                    time_label: entry.time_label,
                })
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_month, calendar_shift, core_version, init_logging, owner_roster, ping,
        schedule_add, schedule_delete, schedule_rows, ScheduleActionResponse, ScheduleItem,
    };

    fn add(
        items: Vec<ScheduleItem>,
        owner: &str,
        start: (&str, &str),
        end: (&str, &str),
    ) -> ScheduleActionResponse {
        schedule_add(
            items,
            owner.to_string(),
            start.0.to_string(),
            start.1.to_string(),
            end.0.to_string(),
            end.1.to_string(),
        )
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn owner_roster_defaults_to_four_owners() {
        assert_eq!(owner_roster().len(), 4);
    }

    #[test]
    fn schedule_add_then_conflict_keeps_items() {
        let first = add(Vec::new(), "John Smith", ("2024-03-01", "09:00"), ("2024-03-01", "10:00"));
        assert!(first.ok, "{}", first.message);
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].start_time, "09:00");

        let second = add(
            first.items.clone(),
            "Jane Doe",
            ("2024-03-01", "09:30"),
            ("2024-03-01", "11:00"),
        );
        assert!(!second.ok);
        assert_eq!(second.reason.as_deref(), Some("conflict"));
        assert_eq!(second.message, "please select a time after 2024-03-01 10:00");
        assert_eq!(second.items, first.items);
    }

    #[test]
    fn schedule_add_issues_increasing_ids() {
        let first = add(Vec::new(), "John Smith", ("2024-03-01", "09:00"), ("2024-03-01", "10:00"));
        let second = add(
            first.items.clone(),
            "Jane Doe",
            ("2024-03-05", "09:00"),
            ("2024-03-05", "10:00"),
        );
        assert!(second.ok, "{}", second.message);
        let first_id: u64 = first.schedule_id.unwrap().parse().unwrap();
        let second_id: u64 = second.schedule_id.unwrap().parse().unwrap();
        assert!(second_id > first_id);
    }

    #[test]
    fn schedule_add_reports_missing_fields() {
        let response = add(Vec::new(), "", ("2024-03-01", "09:00"), ("2024-03-01", "10:00"));
        assert!(!response.ok);
        assert_eq!(response.reason.as_deref(), Some("validation"));
    }

    #[test]
    fn schedule_delete_removes_item() {
        let first = add(Vec::new(), "John Smith", ("2024-03-01", "09:00"), ("2024-03-01", "10:00"));
        let id = first.schedule_id.clone().unwrap();

        let deleted = schedule_delete(first.items, id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(deleted.items.is_empty());
        assert_eq!(deleted.schedule_id, Some(id));

        let missing = schedule_delete(Vec::new(), "12".to_string());
        assert_eq!(missing.reason.as_deref(), Some("not_found"));
    }

    #[test]
    fn invalid_items_are_rejected_without_panicking() {
        let broken = vec![ScheduleItem {
            id: "abc".to_string(),
            owner: "John Smith".to_string(),
            start_date: "2024-03-01".to_string(),
            start_time: "09:00".to_string(),
            end_date: "2024-03-01".to_string(),
            end_time: "10:00".to_string(),
        }];
        let response = schedule_rows(broken.clone());
        assert!(!response.ok);
        let month = calendar_month(broken, 2024, 3);
        assert!(!month.ok);
    }

    fn item(id: &str, day: &str) -> ScheduleItem {
        ScheduleItem {
            id: id.to_string(),
            owner: "John Smith".to_string(),
            start_date: day.to_string(),
            start_time: "09:00".to_string(),
            end_date: day.to_string(),
            end_time: "10:00".to_string(),
        }
    }

    #[test]
    fn duplicate_item_ids_are_rejected_as_invalid_items() {
        let items = vec![item("7", "2024-03-01"), item("7", "2024-03-02")];

        let deleted = schedule_delete(items.clone(), "7".to_string());
        assert!(!deleted.ok);
        assert_eq!(deleted.reason.as_deref(), Some("invalid_items"));
        assert_eq!(deleted.items, items);

        let added = add(items.clone(), "Jane Doe", ("2024-03-09", "09:00"), ("2024-03-09", "10:00"));
        assert_eq!(added.reason.as_deref(), Some("invalid_items"));
        assert!(!schedule_rows(items).ok);
    }

    #[test]
    fn schedule_add_after_max_id_fails_without_panicking() {
        let items = vec![item(&u64::MAX.to_string(), "2024-03-01")];
        let response = add(items.clone(), "Jane Doe", ("2024-03-09", "09:00"), ("2024-03-09", "10:00"));
        assert!(!response.ok);
        assert_eq!(response.reason.as_deref(), Some("ids_exhausted"));
        assert_eq!(response.items, items);
    }

    #[test]
    fn calendar_month_lays_out_march_2024() {
        let first = add(Vec::new(), "John Smith", ("2024-03-01", "09:00"), ("2024-03-01", "10:00"));
        let month = calendar_month(first.items, 2024, 3);
        assert!(month.ok, "{}", month.message);
        assert_eq!(month.title, "March 2024");
        assert_eq!(month.cells.len(), 36);
        assert_eq!(month.cells[5].day, Some(1));
        assert_eq!(month.cells[5].entries[0].time_label, "09:00 - 10:00");
        assert_eq!(month.cells[5].entries[0].color.as_deref(), Some("#FFB3BA"));
    }

    #[test]
    fn calendar_shift_rolls_over_years() {
        let next = calendar_shift(2024, 12, 1);
        assert_eq!((next.year, next.month), (2025, 1));
        let previous = calendar_shift(2024, 1, -1);
        assert_eq!((previous.year, previous.month), (2023, 12));
        assert!(!calendar_shift(2024, 13, 1).ok);
    }
}
