//! 成绩报告服务
//!
//! 只做一件事：把答题记录与等级题目逐题比对，汇总成报告。

use crate::error::ApiError;
use crate::models::{Level, PerformanceReport, QuestionDetail, ReportRequest, Subject};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::info;

/// 默认的结束原因
pub const DEFAULT_REASON: &str = "completed";

/// 生成成绩报告
///
/// # 参数
/// - `subject`: 科目
/// - `level`: 作答的等级
/// - `request`: 答题记录；同一题多次出现时以最后一次为准
/// - `generated_at`: 报告时间
///
/// # 返回
/// 答题记录中出现不属于该等级的题目ID时返回 `UnknownQuestion`
pub fn build_report(
    subject: &Subject,
    level: &Level,
    request: &ReportRequest,
    generated_at: DateTime<Utc>,
) -> Result<PerformanceReport, ApiError> {
    let mut selections: HashMap<&str, Option<usize>> = HashMap::new();
    for answer in &request.answers {
        if level.find_question(&answer.question_id).is_none() {
            return Err(ApiError::UnknownQuestion {
                id: answer.question_id.clone(),
            });
        }
        selections.insert(answer.question_id.as_str(), answer.selected_index);
    }

    let details: Vec<QuestionDetail> = level
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected_index = selections.get(question.id.as_str()).copied().flatten();
            QuestionDetail {
                id: question.id.clone(),
                prompt: question.prompt.clone(),
                options: question.options.clone(),
                correct_index: question.correct_index,
                selected_index,
                is_correct: selected_index.is_some_and(|s| question.is_correct(s)),
                order: index + 1,
            }
        })
        .collect();

    let total_questions = details.len();
    let answered_count = details.iter().filter(|d| d.selected_index.is_some()).count();
    let correct_count = details.iter().filter(|d| d.is_correct).count();

    let report = PerformanceReport {
        subject_id: subject.id().to_string(),
        subject_name: subject.name().to_string(),
        level: level.info(),
        generated_at,
        reason: request
            .reason
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string()),
        total_questions,
        answered_count,
        correct_count,
        incorrect_count: answered_count - correct_count,
        unanswered_count: total_questions - answered_count,
        accuracy: accuracy(correct_count, answered_count),
        questions: details,
    };

    info!(
        "📝 {} 等级 {} 报告: 正确 {}/{} (已答 {}/{})",
        report.subject_id,
        report.level.number,
        report.correct_count,
        report.answered_count,
        report.answered_count,
        report.total_questions
    );

    Ok(report)
}

/// 正确率百分比，四舍五入；未作答时为 0
pub fn accuracy(correct: usize, answered: usize) -> u32 {
    if answered == 0 {
        return 0;
    }
    (correct as f64 / answered as f64 * 100.0).round() as u32
}
