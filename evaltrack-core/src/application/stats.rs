use crate::domain::{CoarseStatus, EvaluationRequest};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-evaluator workload summary served to the dashboard.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub name: String,
    pub open_tasks: u64,
    pub closed_tasks: u64,
    pub canceled_tasks: u64,
    /// Completed / total, rounded to a whole percent.
    pub completion_rate: u64,
    /// Share of tasks completed on or before their `dateNeeded`, formatted
    /// with two decimals.
    pub efficiency_rate: String,
    pub tasks: Vec<EvaluationRequest>,
}

/// Aggregates request tallies per assignee. With `evaluator` given, the
/// result is exactly one entry for that evaluator, zeroed when they have no
/// assigned requests at all.
pub fn compute_member_stats(requests: &[EvaluationRequest], evaluator: Option<&str>) -> Vec<MemberStats> {
    let mut grouped: BTreeMap<String, Vec<&EvaluationRequest>> = BTreeMap::new();
    for request in requests {
        let Some(assignee) = request.assigned_to.as_deref() else {
            continue;
        };
        if let Some(wanted) = evaluator {
            if assignee != wanted {
                continue;
            }
        }
        grouped.entry(assignee.to_string()).or_default().push(request);
    }

    if let Some(wanted) = evaluator {
        grouped.entry(wanted.to_string()).or_default();
    }

    grouped.into_iter().map(|(name, tasks)| summarize(name, &tasks)).collect()
}

fn summarize(name: String, tasks: &[&EvaluationRequest]) -> MemberStats {
    let mut open = 0;
    let mut closed = 0;
    let mut canceled = 0;
    for task in tasks {
        match task.status {
            CoarseStatus::Ongoing => open += 1,
            CoarseStatus::Completed => closed += 1,
            CoarseStatus::Canceled => canceled += 1,
            CoarseStatus::Pending => {}
        }
    }

    let total = open + closed + canceled;
    let completion_rate = if total > 0 { (closed * 100 + total / 2) / total } else { 0 };

    let timely = tasks
        .iter()
        .filter(|task| match (task.completed_at, task.date_needed.as_deref().and_then(parse_date_needed_millis)) {
            (Some(completed), Some(needed_by)) => completed <= needed_by,
            _ => false,
        })
        .count();
    let efficiency_rate = if tasks.is_empty() {
        "0.00".to_string()
    } else {
        format!("{:.2}", timely as f64 / tasks.len() as f64 * 100.0)
    };

    MemberStats {
        name,
        open_tasks: open,
        closed_tasks: closed,
        canceled_tasks: canceled,
        completion_rate,
        efficiency_rate,
        tasks: tasks.iter().map(|t| (*t).clone()).collect(),
    }
}

/// Parses a `YYYY-MM-DD` deadline into epoch millis at the END of that day,
/// so completing any time on the due date still counts as timely.
fn parse_date_needed_millis(value: &str) -> Option<u64> {
    let mut parts = value.splitn(3, '-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    let days = days_from_civil(year, month, day);
    if days < 0 {
        return None;
    }
    Some((days as u64 + 1) * 86_400_000 - 1)
}

// Howard Hinnant's civil-date algorithm: days since 1970-01-01.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) as i64 + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestDraft;
    use crate::foundation::ReferenceNumber;

    fn task(assignee: &str, status: CoarseStatus, date_needed: Option<&str>, completed_at: Option<u64>) -> EvaluationRequest {
        let draft = RequestDraft {
            email: "buyer@example.com".into(),
            name: "Buyer".into(),
            assigned_to: Some(assignee.to_string()),
            date_needed: date_needed.map(|s| s.to_string()),
            ..Default::default()
        };
        let mut record = EvaluationRequest::from_draft(uuid::Uuid::new_v4().to_string(), ReferenceNumber::from_seq(1), 0, draft);
        record.status = status;
        record.completed_at = completed_at;
        record
    }

    #[test]
    fn test_days_from_civil_known_dates() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1970, 1, 2), 1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
    }

    #[test]
    fn test_counts_by_status() {
        let requests = vec![
            task("jo", CoarseStatus::Ongoing, None, None),
            task("jo", CoarseStatus::Completed, None, None),
            task("jo", CoarseStatus::Completed, None, None),
            task("jo", CoarseStatus::Canceled, None, None),
            task("mia", CoarseStatus::Ongoing, None, None),
        ];
        let stats = compute_member_stats(&requests, None);
        assert_eq!(stats.len(), 2);

        let jo = stats.iter().find(|s| s.name == "jo").unwrap();
        assert_eq!((jo.open_tasks, jo.closed_tasks, jo.canceled_tasks), (1, 2, 1));
        assert_eq!(jo.completion_rate, 50);
        assert_eq!(jo.tasks.len(), 4);
    }

    #[test]
    fn test_efficiency_counts_on_time_completions() {
        // Due 2024-06-01; one finished the day before, one a week late.
        let on_time = parse_date_needed_millis("2024-06-01").unwrap() - 86_400_000;
        let late = parse_date_needed_millis("2024-06-01").unwrap() + 7 * 86_400_000;
        let requests = vec![
            task("jo", CoarseStatus::Completed, Some("2024-06-01"), Some(on_time)),
            task("jo", CoarseStatus::Completed, Some("2024-06-01"), Some(late)),
        ];
        let stats = compute_member_stats(&requests, Some("jo"));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].efficiency_rate, "50.00");
    }

    #[test]
    fn test_unknown_evaluator_gets_zeroed_entry() {
        let stats = compute_member_stats(&[], Some("ghost"));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "ghost");
        assert_eq!(stats[0].completion_rate, 0);
        assert_eq!(stats[0].efficiency_rate, "0.00");
        assert!(stats[0].tasks.is_empty());
    }

    #[test]
    fn test_unassigned_requests_are_ignored() {
        let mut unassigned = task("jo", CoarseStatus::Ongoing, None, None);
        unassigned.assigned_to = None;
        let stats = compute_member_stats(&[unassigned], None);
        assert!(stats.is_empty());
    }
}
