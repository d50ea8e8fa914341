use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库构建错误
    #[error("题库错误: {0}")]
    Bank(#[from] BankError),
    /// 请求处理错误
    #[error("请求错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题库构建错误（启动期）
#[derive(Debug, Error)]
pub enum BankError {
    /// 科目ID重复
    #[error("科目ID重复: {id}")]
    DuplicateSubject { id: String },
    /// 科目ID为空
    #[error("科目ID不能为空")]
    EmptySubjectId,
    /// 同一科目内等级编号重复
    #[error("科目 {subject} 的等级编号重复: {level}")]
    DuplicateLevel { subject: String, level: u32 },
    /// 等级编号为 0
    #[error("科目 {subject} 的等级编号必须从 1 开始")]
    ZeroLevel { subject: String },
    /// 模板中出现未知占位符
    #[error("科目 {subject} 的模板包含未知占位符: {{{placeholder}}}")]
    UnknownPlaceholder { subject: String, placeholder: String },
    /// correct_option 不在选项中
    #[error("科目 {subject} 第 {ordinal} 个模板的答案 '{option}' 不在选项中")]
    CorrectOptionNotFound {
        subject: String,
        ordinal: usize,
        option: String,
    },
    /// 未给出答案
    #[error("科目 {subject} 第 {ordinal} 个模板缺少 correct_index 或 correct_option")]
    MissingAnswer { subject: String, ordinal: usize },
    /// 同时给出两种答案
    #[error("科目 {subject} 第 {ordinal} 个模板不能同时指定 correct_index 和 correct_option")]
    AmbiguousAnswer { subject: String, ordinal: usize },
}

/// 请求处理错误，直接映射为 HTTP 响应 `{message}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No questions found for this subject.")]
    SubjectNotFound,
    #[error("No questions available for this level.")]
    LevelNotFound,
    #[error("Level must be a positive integer.")]
    InvalidLevelParameter,
    #[error("Unknown question id: {id}")]
    UnknownQuestion { id: String },
    #[error("Invalid request body: {reason}")]
    InvalidPayload { reason: String },
    #[error("Not Found - {path}")]
    RouteNotFound { path: String },
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SubjectNotFound
            | ApiError::LevelNotFound
            | ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidLevelParameter | ApiError::UnknownQuestion { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidPayload { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::debug!("请求被拒绝 ({}): {}", status, self);
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Api(e) => e.into_response(),
            other => {
                tracing::error!("❌ 未处理的错误: {}", other);
                ApiError::Internal.into_response()
            }
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// CLIENT_URL 不是合法的 Origin
    #[error("CLIENT_URL 不是合法的来源地址: {value}")]
    InvalidClientUrl { value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建科目重复错误
    pub fn duplicate_subject(id: impl Into<String>) -> Self {
        AppError::Bank(BankError::DuplicateSubject { id: id.into() })
    }

    /// 创建请求体无效错误
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        AppError::Api(ApiError::InvalidPayload {
            reason: reason.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(ApiError::SubjectNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::LevelNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidLevelParameter.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnknownQuestion { id: "x".into() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidPayload { reason: "x".into() }.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_non_api_errors_become_500() {
        let response = AppError::duplicate_subject("english").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::invalid_payload("bad").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_placeholder_message_keeps_braces() {
        let err = BankError::UnknownPlaceholder {
            subject: "english".into(),
            placeholder: "lvl".into(),
        };
        assert!(err.to_string().contains("{lvl}"));
    }
}
