use crate::models::subject::LevelInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 客户端提交的答题记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub level: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    #[serde(default)]
    pub selected_index: Option<usize>,
}

/// 单题作答详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub selected_index: Option<usize>,
    pub is_correct: bool,
    pub order: usize,
}

/// 成绩报告
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub subject_id: String,
    pub subject_name: String,
    pub level: LevelInfo,
    pub generated_at: DateTime<Utc>,
    pub reason: String,
    pub total_questions: usize,
    pub answered_count: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub unanswered_count: usize,
    /// 正确率百分比（四舍五入），未作答时为 0
    pub accuracy: u32,
    pub questions: Vec<QuestionDetail>,
}
