use std::collections::HashSet;

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use crate::dates::local_day;
use crate::model::{ContextId, Quadrant, Task, COMPLETED_STATUS, FAST_TAG, IMPORTANT_TAG, THINK_TAG};

pub fn is_completed(task: &Task) -> bool {
    task.status == COMPLETED_STATUS
}

/// Normalized tag set: trimmed, empties dropped, duplicates collapsed.
pub fn tags_of(task: &Task) -> HashSet<&str> {
    task.tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Map a task's tags to its quadrant. Precedence is fixed: fast, then
/// important, then think; first match wins when several special tags are
/// (abnormally) present at once. The tie-break is presumed accidental in
/// the data but preserved exactly for compatibility.
pub fn classify_quadrant(task: &Task) -> Quadrant {
    let tags = tags_of(task);
    for (tag, quadrant) in [
        (FAST_TAG, Quadrant::Q1),
        (IMPORTANT_TAG, Quadrant::Q2),
        (THINK_TAG, Quadrant::Q3),
    ] {
        if tags.contains(tag) {
            return quadrant;
        }
    }
    Quadrant::Q4
}

/// Date-bucket membership against a caller-supplied "today" (never
/// wall-clock inside the predicate) in the viewer's zone. Undated tasks
/// match only [`ContextId::All`].
pub fn matches_context(
    task: &Task,
    context: ContextId,
    today: NaiveDate,
    offset: FixedOffset,
) -> bool {
    if context == ContextId::All {
        return true;
    }
    let Some(due_day) = task.due_date.as_deref().and_then(|raw| local_day(raw, offset)) else {
        return false;
    };
    match context {
        ContextId::All => true,
        ContextId::Today => due_day == today,
        ContextId::Yesterday => today.pred_opt().is_some_and(|day| due_day == day),
        ContextId::Tomorrow => today.succ_opt().is_some_and(|day| due_day == day),
        ContextId::Overdue => due_day < today,
        ContextId::Future => due_day > today,
    }
}

pub fn filter_by_context(
    tasks: &[Task],
    context: ContextId,
    today: NaiveDate,
    offset: FixedOffset,
) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| matches_context(task, context, today, offset))
        .cloned()
        .collect()
}

/// The 2x2 matrix: open tasks partitioned by quadrant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatrixView {
    pub q1: Vec<Task>,
    pub q2: Vec<Task>,
    pub q3: Vec<Task>,
    pub q4: Vec<Task>,
}

impl MatrixView {
    pub fn quadrant(&self, quadrant: Quadrant) -> &[Task] {
        match quadrant {
            Quadrant::Q1 => &self.q1,
            Quadrant::Q2 => &self.q2,
            Quadrant::Q3 => &self.q3,
            Quadrant::Q4 => &self.q4,
        }
    }

    fn bucket_mut(&mut self, quadrant: Quadrant) -> &mut Vec<Task> {
        match quadrant {
            Quadrant::Q1 => &mut self.q1,
            Quadrant::Q2 => &mut self.q2,
            Quadrant::Q3 => &mut self.q3,
            Quadrant::Q4 => &mut self.q4,
        }
    }

    pub fn stats(&self) -> QuadrantStats {
        QuadrantStats {
            q1: self.q1.len(),
            q2: self.q2.len(),
            q3: self.q3.len(),
            q4: self.q4.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuadrantStats {
    pub q1: usize,
    pub q2: usize,
    pub q3: usize,
    pub q4: usize,
}

impl QuadrantStats {
    pub fn count(&self, quadrant: Quadrant) -> usize {
        match quadrant {
            Quadrant::Q1 => self.q1,
            Quadrant::Q2 => self.q2,
            Quadrant::Q3 => self.q3,
            Quadrant::Q4 => self.q4,
        }
    }

    pub fn total(&self) -> usize {
        self.q1 + self.q2 + self.q3 + self.q4
    }
}

/// Bucket open tasks by quadrant. Completed tasks are dropped first; matrix
/// membership is undefined for them.
pub fn partition_into_quadrants(tasks: &[Task]) -> MatrixView {
    let mut view = MatrixView::default();
    for task in tasks {
        if is_completed(task) {
            continue;
        }
        view.bucket_mut(classify_quadrant(task)).push(task.clone());
    }
    view
}

/// Dated tasks first, ascending by the raw date string (the fixed-width UTC
/// wire format makes lexicographic order chronological), then undated tasks
/// in their original relative order. Stable throughout.
pub fn sort_by_due_date(tasks: &[Task]) -> Vec<Task> {
    let mut dated: Vec<Task> = tasks
        .iter()
        .filter(|task| task.due_date.is_some())
        .cloned()
        .collect();
    dated.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    dated.extend(tasks.iter().filter(|task| task.due_date.is_none()).cloned());
    dated
}
