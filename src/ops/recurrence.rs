use chrono::{Days, Months, NaiveDate};
use tracing::debug;

use crate::model::task::RecurrenceKind;

/// Expand a recurrence rule into the full, finite sequence of days it
/// covers: deterministic, strictly increasing, starting at `start`
/// inclusive. The length is the rule's fixed horizon (365/52/12/5).
///
/// Monthly anchors past the end of a short month land on the last day of
/// that month (chrono's month arithmetic).
pub fn expand(start: NaiveDate, kind: RecurrenceKind) -> Vec<NaiveDate> {
    let horizon = kind.horizon();
    let mut days = Vec::with_capacity(horizon);
    for i in 0..horizon as u64 {
        let next = match kind {
            RecurrenceKind::Daily => start.checked_add_days(Days::new(i)),
            RecurrenceKind::Weekly => start.checked_add_days(Days::new(7 * i)),
            RecurrenceKind::Monthly => start.checked_add_months(Months::new(i as u32)),
            RecurrenceKind::Yearly => start.checked_add_months(Months::new(12 * i as u32)),
        };
        // only reachable at the edge of chrono's representable range
        let Some(day) = next else { break };
        days.push(day);
    }
    debug!(start = %start, ?kind, count = days.len(), "expanded recurrence");
    days
}
