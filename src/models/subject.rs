use crate::models::question::{Question, QuestionTemplate};
use serde::{Deserialize, Serialize};

/// 等级描述（每个科目编写一次）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// 等级编号；缺省时取数组位置 + 1
    #[serde(default)]
    pub level: Option<u32>,
    pub title: String,
    pub summary: String,
    pub duration_minutes: u32,
    pub focus: String,
}

/// 科目的展示信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub headline: String,
    pub description: String,
}

/// 科目定义：展开前的原始数据
#[derive(Debug, Clone)]
pub struct SubjectDefinition {
    pub info: SubjectInfo,
    pub templates: Vec<QuestionTemplate>,
    pub descriptors: Vec<LevelDescriptor>,
}

/// 等级（派生数据）：描述字段 + 该等级的题目
#[derive(Debug, Clone)]
pub struct Level {
    pub number: u32,
    pub title: String,
    pub summary: String,
    pub duration_minutes: u32,
    pub focus: String,
    pub questions: Vec<Question>,
}

impl Level {
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            level: self.number,
            title: self.title.clone(),
            summary: self.summary.clone(),
            duration_minutes: self.duration_minutes,
            focus: self.focus.clone(),
            question_count: self.questions.len(),
        }
    }

    pub fn info(&self) -> LevelInfo {
        LevelInfo {
            number: self.number,
            title: self.title.clone(),
            summary: self.summary.clone(),
            duration_minutes: self.duration_minutes,
            focus: self.focus.clone(),
        }
    }

    pub fn find_question(&self, question_id: &str) -> Option<(usize, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .find(|(_, q)| q.id == question_id)
    }
}

/// 科目
#[derive(Debug, Clone)]
pub struct Subject {
    pub info: SubjectInfo,
    pub levels: Vec<Level>,
}

impl Subject {
    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn level(&self, number: u32) -> Option<&Level> {
        self.levels.iter().find(|level| level.number == number)
    }

    pub fn total_questions(&self) -> usize {
        self.levels.iter().map(|level| level.questions.len()).sum()
    }

    pub fn overview(&self) -> SubjectOverview {
        SubjectOverview {
            id: self.info.id.clone(),
            name: self.info.name.clone(),
            badge: self.info.badge.clone(),
            headline: self.info.headline.clone(),
            description: self.info.description.clone(),
            total_levels: self.levels.len(),
            total_questions: self.total_questions(),
        }
    }

    pub fn level_summaries(&self) -> Vec<LevelSummary> {
        self.levels.iter().map(Level::summary).collect()
    }
}

/// 等级摘要（不含题目）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub level: u32,
    pub title: String,
    pub summary: String,
    pub duration_minutes: u32,
    pub focus: String,
    pub question_count: usize,
}

/// 等级元信息，用于题目列表和成绩报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    pub number: u32,
    pub title: String,
    pub summary: String,
    pub duration_minutes: u32,
    pub focus: String,
}

/// 科目概览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectOverview {
    pub id: String,
    pub name: String,
    pub badge: String,
    pub headline: String,
    pub description: String,
    pub total_levels: usize,
    pub total_questions: usize,
}
