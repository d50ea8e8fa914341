//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use crate::config::Config;
use crate::models::SubjectOverview;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`；未设置时默认 `info`，详细模式下为 `debug`。
/// 重复调用不会报错（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 题库服务启动");
    info!("🌐 监听地址: {}", config.bind_address());
    info!("🔗 允许来源: {}", config.client_url);
    if let Some(dir) = &config.question_bank_dir {
        info!("📁 额外科目目录: {}", dir);
    }
    info!("{}", "=".repeat(60));
}

/// 记录单个科目加载完成
pub fn log_subject_loaded(overview: &SubjectOverview) {
    info!(
        "✓ 科目 {} ({}): {} 个等级, {} 道题",
        overview.id, overview.name, overview.total_levels, overview.total_questions
    );
}

/// 记录题库构建完成
///
/// # 参数
/// - `subjects`: 科目数
/// - `levels`: 等级总数
/// - `questions`: 题目总数
pub fn log_bank_ready(subjects: usize, levels: usize, questions: usize) {
    info!("{}", "─".repeat(60));
    info!(
        "📚 题库就绪: {} 个科目, {} 个等级, {} 道题",
        subjects, levels, questions
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
