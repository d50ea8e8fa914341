//! # Exam Prep Server
//!
//! 备考练习的题库服务：启动时把各科目的题目模板按等级展开成题库，
//! 通过 REST 接口只读提供。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Data）
//! - `models/` - 题目模板、题目、科目、等级、成绩报告
//! - `models/loaders` - 从 TOML 读取科目源
//! - `data/` - 编译进二进制的内置科目（English、Mathematics）
//!
//! ### ② 业务能力层（Services）
//! - `bank_builder` - 模板 × 等级 展开为具体题目
//! - `QuestionBank` - 只读题库，按科目/等级查询
//! - `report_service` - 根据答题记录生成成绩报告
//!
//! ### ③ 接口层（API）
//! - `api/` - axum 路由：`/health`、`/api/questions`
//!
//! ### ④ 应用层
//! - `App` - 加载配置、构建题库、启动 HTTP 服务
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use api::{build_router, AppState};
pub use app::App;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult};
pub use models::{Question, QuestionTemplate, Subject};
pub use services::QuestionBank;
