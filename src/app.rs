//! 应用生命周期：初始化（构建题库）→ 运行（监听 HTTP）→ 收到 Ctrl-C 后优雅退出

use crate::api::{self, AppState};
use crate::config::Config;
use crate::data;
use crate::models::load_all_subject_sources;
use crate::services::QuestionBank;
use crate::utils::logging::{log_bank_ready, log_startup};
use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用：加载科目源并构建题库
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let bank = load_bank(&config).await?;
        let stats = bank.stats();
        log_bank_ready(stats.subjects, stats.levels, stats.questions);

        Ok(Self {
            config,
            state: AppState::new(bank),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 构建路由
    pub fn router(&self) -> Result<Router> {
        Ok(api::build_router(
            self.state.clone(),
            &self.config.client_url,
        )?)
    }

    /// 运行 HTTP 服务，直到收到 Ctrl-C
    pub async fn run(self) -> Result<()> {
        let router = self.router()?;
        let address = self.config.bind_address();

        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("无法监听地址: {}", address))?;
        info!("✓ 服务已启动: http://{}", address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP 服务异常退出")?;

        info!("👋 服务已停止");
        Ok(())
    }
}

/// 加载内置科目和额外目录中的科目，构建题库
async fn load_bank(config: &Config) -> Result<QuestionBank> {
    info!("\n📁 正在加载科目...");
    let mut sources = data::builtin_sources()?;

    if let Some(dir) = &config.question_bank_dir {
        let extra = load_all_subject_sources(dir).await?;
        if extra.is_empty() {
            warn!("⚠️ 目录 {} 中没有可用的科目文件", dir);
        }
        sources.extend(extra);
    }

    Ok(QuestionBank::from_sources(sources)?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ 无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在停止服务...");
}
