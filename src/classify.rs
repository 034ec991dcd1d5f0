//! Stateless predicates over a single activity.
//!
//! "Realized" and "not realized" do not cover every status: pending
//! documentation and unrecognized values belong to neither and simply drop
//! out of both totals.
use crate::types::{Activity, Status};

pub fn is_task(activity: &Activity) -> bool {
    activity.is_task
}

pub fn is_work_order(activity: &Activity) -> bool {
    !activity.is_task
}

pub fn is_work_order_without_ticket(activity: &Activity) -> bool {
    activity.status == Status::WorkOrderWithoutTicket
}

pub fn is_realized_status(status: Status) -> bool {
    matches!(
        status,
        Status::Success | Status::Partial | Status::Rollback | Status::Authorized
    )
}

pub fn is_not_realized_status(status: Status) -> bool {
    matches!(
        status,
        Status::NotExecuted | Status::Canceled | Status::WorkOrderWithoutTicket
    )
}

pub fn is_realized(activity: &Activity) -> bool {
    is_realized_status(activity.status)
}

pub fn is_not_realized(activity: &Activity) -> bool {
    is_not_realized_status(activity.status)
}
