//! 题目接口 `/api/questions`
//!
//! - `GET /` 全部科目概览
//! - `GET /:subject_id` 科目概览 + 等级摘要；带 `?level=N` 时返回该等级全部题目（含答案）
//! - `POST /:subject_id/report` 根据答题记录生成成绩报告

use crate::api::AppState;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{
    Level, LevelInfo, LevelSummary, PerformanceReport, Question, ReportRequest, Subject,
    SubjectOverview,
};
use crate::services::report_service;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct SubjectCatalog {
    pub subjects: Vec<SubjectOverview>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectLevels {
    pub subject_id: String,
    pub subject_name: String,
    pub overview: SubjectOverview,
    pub levels: Vec<LevelSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelQuestions {
    pub subject_id: String,
    pub subject_name: String,
    pub level: LevelInfo,
    pub questions: Vec<Question>,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subjects))
        .route("/:subject_id", get(get_subject_questions))
        .route("/:subject_id/report", post(submit_report))
}

async fn list_subjects(State(state): State<AppState>) -> Json<SubjectCatalog> {
    Json(SubjectCatalog {
        subjects: state.bank.overviews(),
    })
}

async fn get_subject_questions(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(pairs) = query.map_err(|_| ApiError::InvalidLevelParameter)?;
    let subject_id = subject_id.to_lowercase();
    let subject = state
        .bank
        .get_subject(&subject_id)
        .ok_or(ApiError::SubjectNotFound)?;

    let Some(raw_level) = first_level_param(&pairs) else {
        return Ok(Json(SubjectLevels {
            subject_id,
            subject_name: subject.name().to_string(),
            overview: subject.overview(),
            levels: subject.level_summaries(),
        })
        .into_response());
    };

    let number = parse_level_param(raw_level)?;
    let level = find_level(subject, number).ok_or(ApiError::LevelNotFound)?;
    debug!(
        "返回 {} 等级 {} 的 {} 道题",
        subject_id,
        level.number,
        level.questions.len()
    );

    Ok(Json(LevelQuestions {
        subject_id,
        subject_name: subject.name().to_string(),
        level: level.info(),
        questions: level.questions.clone(),
    })
    .into_response())
}

async fn submit_report(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> AppResult<Json<PerformanceReport>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::invalid_payload(rejection.body_text()))?;

    let subject = state
        .bank
        .get_subject(&subject_id)
        .ok_or(ApiError::SubjectNotFound)?;

    if request.level < 1 {
        return Err(ApiError::InvalidLevelParameter.into());
    }
    let level = find_level(subject, request.level as u64).ok_or(ApiError::LevelNotFound)?;

    let report = report_service::build_report(subject, level, &request, Utc::now())?;
    Ok(Json(report))
}

/// 参数重复时取第一个 `level`
fn first_level_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == "level")
        .map(|(_, value)| value.as_str())
}

fn find_level(subject: &Subject, number: u64) -> Option<&Level> {
    u32::try_from(number).ok().and_then(|n| subject.level(n))
}

/// 按 `parseInt(value, 10)` 的规则解析等级参数
///
/// 忽略前导空白，允许一个正负号，读取开头的连续数字，其后的字符忽略。
/// 没有数字或结果小于 1 时返回 `InvalidLevelParameter`；超出范围的大数按最大值处理。
pub(crate) fn parse_level_param(raw: &str) -> Result<u64, ApiError> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return Err(ApiError::InvalidLevelParameter);
    }

    let value = rest[..digits_len].parse::<u64>().unwrap_or(u64::MAX);
    if value < 1 {
        return Err(ApiError::InvalidLevelParameter);
    }
    Ok(value)
}
