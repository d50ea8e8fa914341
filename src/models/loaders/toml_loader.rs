use crate::error::{BankError, FileError};
use crate::models::question::{CorrectIndex, QuestionTemplate, TemplateField};
use crate::models::subject::{LevelDescriptor, SubjectDefinition, SubjectInfo};
use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;

/// 一个科目的 TOML 源文件
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectSource {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub headline: String,
    pub description: String,
    #[serde(default)]
    pub templates: Vec<TemplateSource>,
    #[serde(default)]
    pub levels: Vec<LevelDescriptor>,
}

/// TOML 中的题目模板
///
/// `prompt` 和 `options` 可以包含 `{level}`、`{ordinal}` 占位符。
/// 答案用 `correct_index` 或 `correct_option` 二选一给出。
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSource {
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: Option<usize>,
    #[serde(default)]
    pub correct_option: Option<String>,
}

impl SubjectSource {
    /// 转换为可展开的科目定义，ID 统一转小写
    pub fn into_definition(self) -> Result<SubjectDefinition, BankError> {
        let id = self.id.trim().to_lowercase();
        if id.is_empty() {
            return Err(BankError::EmptySubjectId);
        }

        let templates = self
            .templates
            .into_iter()
            .enumerate()
            .map(|(i, source)| template_from_source(&id, i + 1, source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SubjectDefinition {
            info: SubjectInfo {
                id,
                name: self.name,
                badge: self.badge,
                headline: self.headline,
                description: self.description,
            },
            templates,
            descriptors: self.levels,
        })
    }
}

fn template_from_source(
    subject: &str,
    ordinal: usize,
    source: TemplateSource,
) -> Result<QuestionTemplate, BankError> {
    let correct_index = match (source.correct_index, &source.correct_option) {
        (Some(index), None) => CorrectIndex::Fixed(index),
        (None, Some(text)) => {
            let index = source
                .options
                .iter()
                .position(|option| option == text)
                .ok_or_else(|| BankError::CorrectOptionNotFound {
                    subject: subject.to_string(),
                    ordinal,
                    option: text.clone(),
                })?;
            CorrectIndex::Fixed(index)
        }
        (None, None) => {
            return Err(BankError::MissingAnswer {
                subject: subject.to_string(),
                ordinal,
            })
        }
        (Some(_), Some(_)) => {
            return Err(BankError::AmbiguousAnswer {
                subject: subject.to_string(),
                ordinal,
            })
        }
    };

    let prompt = compile_text(subject, source.prompt)?;
    let option_fields = source
        .options
        .into_iter()
        .map(|option| compile_text(subject, option))
        .collect::<Result<Vec<_>, _>>()?;

    let options = if option_fields
        .iter()
        .all(|field| matches!(field, TemplateField::Fixed(_)))
    {
        TemplateField::Fixed(option_fields.iter().map(|f| f.resolve(0, 0)).collect())
    } else {
        TemplateField::generated(move |level, ordinal| {
            option_fields
                .iter()
                .map(|field| field.resolve(level, ordinal))
                .collect()
        })
    };

    Ok(QuestionTemplate {
        prompt,
        options,
        correct_index,
    })
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z_]+)\}").expect("占位符正则无效"))
}

/// 把文本编译为模板字段：含占位符则为生成型，否则为固定值
fn compile_text(subject: &str, text: String) -> Result<TemplateField<String>, BankError> {
    let mut has_placeholder = false;
    for caps in placeholder_pattern().captures_iter(&text) {
        match &caps[1] {
            "level" | "ordinal" => has_placeholder = true,
            other => {
                return Err(BankError::UnknownPlaceholder {
                    subject: subject.to_string(),
                    placeholder: other.to_string(),
                })
            }
        }
    }

    if !has_placeholder {
        return Ok(TemplateField::Fixed(text));
    }

    Ok(TemplateField::generated(move |level, ordinal| {
        render_placeholders(&text, level, ordinal)
    }))
}

/// 替换 `{level}` 和 `{ordinal}` 占位符
pub fn render_placeholders(text: &str, level: u32, ordinal: u32) -> String {
    text.replace("{level}", &level.to_string())
        .replace("{ordinal}", &ordinal.to_string())
}

/// 解析 TOML 文本为科目源
///
/// # 参数
/// - `content`: TOML 内容
/// - `origin`: 来源（文件路径或内置名称，用于错误信息）
pub fn parse_subject_source(content: &str, origin: &str) -> Result<SubjectSource, FileError> {
    toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
        path: origin.to_string(),
        source,
    })
}

/// 从 TOML 文件加载科目源
pub async fn load_subject_source(toml_file_path: &Path) -> Result<SubjectSource, FileError> {
    let origin = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: origin.clone(),
            source,
        })?;

    parse_subject_source(&content, &origin)
}

/// 从文件夹中加载所有科目 TOML 文件（按文件名排序）
///
/// 单个文件加载失败只记录警告并跳过。
pub async fn load_all_subject_sources(folder_path: &str) -> Result<Vec<SubjectSource>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut sources = Vec::with_capacity(toml_files.len());
    for path in toml_files {
        tracing::info!(
            "正在加载科目文件: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_subject_source(&path).await {
            Ok(source) => {
                tracing::info!(
                    "成功加载科目 {}: {} 个模板, {} 个等级",
                    source.id,
                    source.templates.len(),
                    source.levels.len()
                );
                sources.push(source);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(sources)
}
