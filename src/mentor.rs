//! Mentor/student relationships.
//!
//! A mentor shares a link carrying `share_id`; holders of that link can see
//! each student's monthly summary. The share id comes from configuration.

use crate::aggregate::{MonthlyMetrics, TradeAggregator};
use crate::errors::{JournalError, JournalResult};
use crate::journal::{Month, Trade};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "accountIds")]
    pub account_ids: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Mentor {
    pub name: String,
    #[serde(skip)]
    pub share_id: String,
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct StudentSummary {
    pub student: Student,
    pub metrics: MonthlyMetrics,
}

impl Mentor {
    pub fn new(name: impl Into<String>, share_id: impl Into<String>, students: Vec<Student>) -> Self {
        Self {
            name: name.into(),
            share_id: share_id.into(),
            students,
        }
    }

    #[inline]
    pub fn accepts(&self, share_id: &str) -> bool {
        !self.share_id.is_empty() && self.share_id == share_id
    }

    pub fn student(&self, id: &str) -> JournalResult<&Student> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| JournalError::NotFound(format!("student {id}")))
    }
}

impl Student {
    #[inline]
    pub fn owns(&self, trade: &Trade) -> bool {
        self.account_ids.iter().any(|a| *a == trade.account_id)
    }
}

/// Monthly metrics for one student, restricted to their accounts.
pub fn student_metrics(
    aggregator: &TradeAggregator,
    student: &Student,
    trades: &[Trade],
    month: Month,
) -> MonthlyMetrics {
    aggregator.aggregate_month(trades.iter().filter(|t| student.owns(t)), month)
}

/// One summary per student, in roster order.
pub fn summarize_students(
    aggregator: &TradeAggregator,
    mentor: &Mentor,
    trades: &[Trade],
    month: Month,
) -> Vec<StudentSummary> {
    mentor
        .students
        .iter()
        .map(|student| StudentSummary {
            student: student.clone(),
            metrics: student_metrics(aggregator, student, trades, month),
        })
        .collect()
}
