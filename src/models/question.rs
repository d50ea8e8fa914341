use crate::utils::logging::truncate_text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// 根据 (等级, 序号) 生成字段值的函数
pub type Generator<T> = Arc<dyn Fn(u32, u32) -> T + Send + Sync>;

/// 根据 (等级, 序号, 已生成的选项) 计算正确答案索引的函数
pub type IndexGenerator = Arc<dyn Fn(u32, u32, &[String]) -> usize + Send + Sync>;

/// 模板字段：固定值，或由等级和序号生成
#[derive(Clone)]
pub enum TemplateField<T> {
    Fixed(T),
    Generated(Generator<T>),
}

impl<T: Clone> TemplateField<T> {
    /// 以 `(level, ordinal)` 求出字段的具体值
    pub fn resolve(&self, level: u32, ordinal: u32) -> T {
        match self {
            TemplateField::Fixed(value) => value.clone(),
            TemplateField::Generated(generate) => generate(level, ordinal),
        }
    }

    /// 用闭包构造生成型字段
    pub fn generated(f: impl Fn(u32, u32) -> T + Send + Sync + 'static) -> Self {
        TemplateField::Generated(Arc::new(f))
    }
}

impl<T: fmt::Debug> fmt::Debug for TemplateField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateField::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            TemplateField::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// 正确答案索引：固定值，或根据生成后的选项推导
#[derive(Clone)]
pub enum CorrectIndex {
    Fixed(usize),
    Generated(IndexGenerator),
}

impl CorrectIndex {
    pub fn resolve(&self, level: u32, ordinal: u32, options: &[String]) -> usize {
        match self {
            CorrectIndex::Fixed(index) => *index,
            CorrectIndex::Generated(generate) => generate(level, ordinal, options),
        }
    }

    pub fn generated(f: impl Fn(u32, u32, &[String]) -> usize + Send + Sync + 'static) -> Self {
        CorrectIndex::Generated(Arc::new(f))
    }
}

impl fmt::Debug for CorrectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectIndex::Fixed(index) => f.debug_tuple("Fixed").field(index).finish(),
            CorrectIndex::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/// 题目模板
///
/// 按科目编写，不区分等级；构建题库时对每个等级各展开一次。
#[derive(Debug, Clone)]
pub struct QuestionTemplate {
    pub prompt: TemplateField<String>,
    pub options: TemplateField<Vec<String>>,
    pub correct_index: CorrectIndex,
}

impl QuestionTemplate {
    /// 创建全部字段固定的模板
    pub fn fixed(prompt: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            prompt: TemplateField::Fixed(prompt.into()),
            options: TemplateField::Fixed(options),
            correct_index: CorrectIndex::Fixed(correct_index),
        }
    }

    /// 展开为某一等级下的具体题目
    ///
    /// # 参数
    /// - `subject_id`: 科目ID（用于生成题目ID）
    /// - `level`: 等级编号
    /// - `ordinal`: 模板序号（从1开始）
    pub fn materialize(&self, subject_id: &str, level: u32, ordinal: u32) -> Question {
        let prompt = self.prompt.resolve(level, ordinal);
        let options = self.options.resolve(level, ordinal);
        let correct_index = self.correct_index.resolve(level, ordinal, &options);

        Question {
            id: Question::make_id(subject_id, level, ordinal),
            prompt,
            options,
            correct_index,
        }
    }
}

/// 具体题目（构建后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    /// 题目ID格式：`{subject}-l{level}-q{ordinal}`
    pub fn make_id(subject_id: &str, level: u32, ordinal: u32) -> String {
        format!("{}-l{}-q{}", subject_id, level, ordinal)
    }

    /// 判断所选选项是否正确
    pub fn is_correct(&self, selected_index: usize) -> bool {
        selected_index == self.correct_index
    }

    /// 正确答案索引是否落在选项范围内
    pub fn has_valid_answer(&self) -> bool {
        self.correct_index < self.options.len()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [选项: {}, 答案: {}]",
            self.id,
            truncate_text(&self.prompt, 60),
            self.options.len(),
            self.correct_index
        )
    }
}
