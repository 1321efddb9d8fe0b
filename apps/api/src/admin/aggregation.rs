//! Aggregation View — per-candidate averages across every stored interview.
//!
//! Pure projection over `list_interview_records()`; the handler fetches fresh
//! records on every request.

use serde::Serialize;
use uuid::Uuid;

use crate::models::interview::StoredInterviewRecord;

pub const EMPTY_MESSAGE: &str = "No interviews recorded yet.";
pub const CHART_TITLE: &str = "Candidate Performance Overview";
const UNKNOWN_NAME: &str = "Unknown";

/// One row of the candidate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRow {
    pub record_id: Uuid,
    pub name: String,
    pub email: String,
    pub position: String,
    pub experience: String,
    pub avg_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub avg_score: u32,
    pub email: String,
    pub position: String,
    pub experience: String,
}

/// Bar chart of average score by candidate name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredQuestion {
    pub number: usize,
    pub question: String,
    pub answer: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDetail {
    pub record_id: Uuid,
    pub name: String,
    pub avg_score: u32,
    pub timestamp: f64,
    pub answers: Vec<AnsweredQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub rows: Vec<CandidateRow>,
    pub chart: BarChart,
    pub details: Vec<RecordDetail>,
}

/// Rounded mean of the scores, 0 for an empty list.
/// Ties round to even (84.5 → 84, 85.5 → 86).
pub fn average_score(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    let mean = sum as f64 / scores.len() as f64;
    mean.round_ties_even() as u32
}

fn display_name(record: &StoredInterviewRecord) -> String {
    let name = record.candidate_info.name.trim();
    if name.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        name.to_string()
    }
}

pub fn build_overview(records: &[(Uuid, StoredInterviewRecord)]) -> AdminOverview {
    let mut rows = Vec::with_capacity(records.len());
    let mut details = Vec::with_capacity(records.len());

    for (record_id, record) in records {
        let info = &record.candidate_info;
        let name = display_name(record);
        let avg_score = average_score(&record.scores);

        rows.push(CandidateRow {
            record_id: *record_id,
            name: name.clone(),
            email: info.email.clone(),
            position: info.position.clone(),
            experience: info.experience.clone(),
            avg_score,
        });

        let answers = record
            .questions
            .iter()
            .zip(&record.responses)
            .zip(&record.scores)
            .enumerate()
            .map(|(i, ((q, a), &score))| AnsweredQuestion {
                number: i + 1,
                question: q.clone(),
                answer: a.clone(),
                score,
            })
            .collect();

        details.push(RecordDetail {
            record_id: *record_id,
            name,
            avg_score,
            timestamp: record.timestamp,
            answers,
        });
    }

    let points = rows
        .iter()
        .map(|r| ChartPoint {
            name: r.name.clone(),
            avg_score: r.avg_score,
            email: r.email.clone(),
            position: r.position.clone(),
            experience: r.experience.clone(),
        })
        .collect();

    AdminOverview {
        empty: records.is_empty(),
        message: records.is_empty().then_some(EMPTY_MESSAGE),
        rows,
        chart: BarChart {
            title: CHART_TITLE,
            x_label: "Candidate",
            y_label: "Avg. Score",
            points,
        },
        details,
    }
}
