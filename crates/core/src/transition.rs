use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::api::TaskClient;
use crate::dates::{format_wire_datetime, parse_wire_datetime};
use crate::model::{is_special_tag, Quadrant, Task, TaskPatch};

/// Compute the tag delta for moving a task to `target`: all three special
/// tags are stripped, then the target's tag appended (Q4 appends nothing).
/// Relative order of the remaining tags is untouched, and planning a move
/// into the current quadrant yields the same tag set back.
pub fn plan_quadrant_move(task: &Task, target: Quadrant) -> TaskPatch {
    let mut tags: Vec<String> = task
        .tags
        .iter()
        .filter(|tag| !is_special_tag(tag.trim()))
        .cloned()
        .collect();
    if let Some(tag) = target.special_tag() {
        tags.push(tag.to_string());
    }
    TaskPatch {
        tags: Some(tags),
        ..Default::default()
    }
}

/// Plan and push a quadrant move. On success the caller patches its
/// in-memory list via [`merge_updated`]; on `None` nothing changed anywhere.
pub fn apply_quadrant_move(client: &TaskClient, task: &Task, target: Quadrant) -> Option<Task> {
    let patch = plan_quadrant_move(task, target);
    client.update_task_fields(&task.id, &task.project_id, &patch, task)
}

/// Compute the date delta for rescheduling to `new_local_date` in the
/// viewer's zone. The original time-of-day is preserved (noon local when the
/// task had no date to take it from), converted to UTC, and written in the
/// remote wire shape to both `startDate` and `dueDate`.
pub fn plan_date_move(task: &Task, new_local_date: NaiveDate, offset: FixedOffset) -> TaskPatch {
    let time_of_day = task
        .due_date
        .as_deref()
        .and_then(parse_wire_datetime)
        .map(|instant| instant.with_timezone(&offset).time())
        .unwrap_or_else(default_time_of_day);

    let local = new_local_date.and_time(time_of_day);
    let instant = Utc.from_utc_datetime(&(local - offset));
    let wire = format_wire_datetime(instant);

    TaskPatch {
        tags: None,
        start_date: Some(wire.clone()),
        due_date: Some(wire),
    }
}

pub fn apply_date_move(
    client: &TaskClient,
    task: &Task,
    new_local_date: NaiveDate,
    offset: FixedOffset,
) -> Option<Task> {
    let patch = plan_date_move(task, new_local_date, offset);
    client.update_task_fields(&task.id, &task.project_id, &patch, task)
}

/// Optimistic local patch after a successful write: replace the matching
/// entry by id, keeping its position. No reordering, no re-fetch. Returns
/// false when the id is unknown (the caller's list was stale).
pub fn merge_updated(tasks: &mut [Task], updated: Task) -> bool {
    match tasks.iter_mut().find(|task| task.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

fn default_time_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}
