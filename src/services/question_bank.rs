//! 题库服务 - 进程内只读题库
//!
//! 启动时构建一次，之后只读，可放进 `Arc` 在请求间共享。
//! 所有查询对科目ID大小写不敏感，查不到时返回 `None`。

use crate::error::{AppError, AppResult, BankError};
use crate::models::{
    Level, LevelSummary, Question, Subject, SubjectOverview, SubjectSource,
};
use crate::services::bank_builder::build_subject;
use crate::utils::logging;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 题库统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BankStats {
    pub subjects: usize,
    pub levels: usize,
    pub questions: usize,
}

/// 题库
#[derive(Debug, Default)]
pub struct QuestionBank {
    subjects: Vec<Subject>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由科目源构建题库（按给定顺序注册）
    pub fn from_sources(sources: Vec<SubjectSource>) -> AppResult<Self> {
        let mut bank = Self::new();
        for source in sources {
            let subject = build_subject(source.into_definition()?);
            logging::log_subject_loaded(&subject.overview());
            bank.register(subject)?;
        }
        Ok(bank)
    }

    /// 注册科目；科目ID重复、等级编号为 0 或重复时报错
    pub fn register(&mut self, mut subject: Subject) -> AppResult<()> {
        let key = subject.info.id.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(AppError::duplicate_subject(key));
        }
        check_level_numbers(&key, &subject)?;
        subject.info.id = key.clone();

        debug!("注册科目: {}", key);
        self.index.insert(key, self.subjects.len());
        self.subjects.push(subject);
        Ok(())
    }

    /// 按ID查找科目（大小写不敏感，空ID返回 None）
    pub fn get_subject(&self, subject_id: &str) -> Option<&Subject> {
        if subject_id.is_empty() {
            return None;
        }
        self.index
            .get(&subject_id.to_lowercase())
            .map(|&i| &self.subjects[i])
    }

    pub fn get_level(&self, subject_id: &str, level_number: u32) -> Option<&Level> {
        self.get_subject(subject_id)?.level(level_number)
    }

    /// 每个等级的描述字段 + 题目数量
    pub fn get_levels_summary(&self, subject_id: &str) -> Option<Vec<LevelSummary>> {
        self.get_subject(subject_id).map(Subject::level_summaries)
    }

    /// 某个等级的全部题目（等级编号精确匹配）
    pub fn get_questions_for_level(
        &self,
        subject_id: &str,
        level_number: u32,
    ) -> Option<&[Question]> {
        self.get_level(subject_id, level_number)
            .map(|level| level.questions.as_slice())
    }

    pub fn get_subject_overview(&self, subject_id: &str) -> Option<SubjectOverview> {
        self.get_subject(subject_id).map(Subject::overview)
    }

    /// 全部科目（注册顺序）
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn overviews(&self) -> Vec<SubjectOverview> {
        self.subjects.iter().map(Subject::overview).collect()
    }

    pub fn stats(&self) -> BankStats {
        BankStats {
            subjects: self.subjects.len(),
            levels: self.subjects.iter().map(|s| s.levels.len()).sum(),
            questions: self.subjects.iter().map(Subject::total_questions).sum(),
        }
    }
}

/// 等级编号决定题目ID，必须 >= 1 且在科目内唯一
fn check_level_numbers(subject_id: &str, subject: &Subject) -> Result<(), BankError> {
    let mut seen = HashSet::new();
    for level in &subject.levels {
        if level.number == 0 {
            return Err(BankError::ZeroLevel {
                subject: subject_id.to_string(),
            });
        }
        if !seen.insert(level.number) {
            return Err(BankError::DuplicateLevel {
                subject: subject_id.to_string(),
                level: level.number,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use crate::models::parse_subject_source;

    fn physics_with_levels(levels: &str) -> SubjectSource {
        let content = format!(
            r#"
id = "physics"
name = "Physics"
badge = "Science"
headline = "Physics drills"
description = "Forces and motion."

[[templates]]
prompt = "Level {{level}}: unit of force?"
options = ["Joule", "Newton"]
correct_index = 1
{}"#,
            levels
        );
        parse_subject_source(&content, "physics.toml").unwrap()
    }

    fn builtin() -> QuestionBank {
        QuestionBank::from_sources(data::builtin_sources().unwrap()).unwrap()
    }

    #[test]
    fn test_every_subject_has_templates_times_levels() {
        let bank = builtin();
        for subject in bank.subjects() {
            let overview = bank.get_subject_overview(subject.id()).unwrap();
            assert_eq!(overview.total_levels, 5);
            assert_eq!(overview.total_questions, 10 * 5);
        }
        assert_eq!(
            bank.stats(),
            BankStats {
                subjects: 2,
                levels: 10,
                questions: 100
            }
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let bank = builtin();
        let upper = bank.get_subject("ENGLISH").unwrap();
        let lower = bank.get_subject("english").unwrap();
        assert!(std::ptr::eq(upper, lower));
        assert_eq!(
            bank.get_questions_for_level("MatheMatics", 2).unwrap().len(),
            10
        );
    }

    #[test]
    fn test_unknown_or_empty_subject_returns_none() {
        let bank = builtin();
        assert!(bank.get_subject("").is_none());
        assert!(bank.get_subject("history").is_none());
        assert!(bank.get_levels_summary("history").is_none());
        assert!(bank.get_questions_for_level("history", 1).is_none());
        assert!(bank.get_subject_overview("history").is_none());
    }

    #[test]
    fn test_unknown_level_returns_none() {
        let bank = builtin();
        assert!(bank.get_questions_for_level("english", 0).is_none());
        assert!(bank.get_questions_for_level("english", 6).is_none());
    }

    #[test]
    fn test_level_questions_have_expected_ids() {
        let bank = builtin();
        for n in 1..=5 {
            let questions = bank.get_questions_for_level("english", n).unwrap();
            assert_eq!(questions.len(), 10);
            for (k, question) in questions.iter().enumerate() {
                assert_eq!(question.id, format!("english-l{}-q{}", n, k + 1));
                assert!(question.has_valid_answer());
            }
        }
    }

    #[test]
    fn test_summaries_add_up_to_overview() {
        let bank = builtin();
        let summaries = bank.get_levels_summary("mathematics").unwrap();
        let overview = bank.get_subject_overview("mathematics").unwrap();

        assert_eq!(summaries.len(), overview.total_levels);
        let sum: usize = summaries.iter().map(|s| s.question_count).sum();
        assert_eq!(sum, overview.total_questions);
        assert_eq!(summaries[0].title, "Level 1 · Core Skills");
        assert_eq!(summaries[4].duration_minutes, 18);
    }

    #[test]
    fn test_duplicate_subject_is_rejected() {
        let mut sources = data::builtin_sources().unwrap();
        let mut copy = sources[0].clone();
        copy.id = copy.id.to_uppercase();
        sources.push(copy);

        let err = QuestionBank::from_sources(sources).unwrap_err();
        assert!(matches!(
            err,
            AppError::Bank(BankError::DuplicateSubject { ref id }) if id == "english"
        ));
    }

    #[test]
    fn test_level_number_colliding_with_position_is_rejected() {
        let source = physics_with_levels(
            r#"
[[levels]]
level = 2
title = "Declared two"
summary = "s"
duration_minutes = 10
focus = "f"

[[levels]]
title = "Second by position"
summary = "s"
duration_minutes = 10
focus = "f"
"#,
        );

        let err = QuestionBank::from_sources(vec![source]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Bank(BankError::DuplicateLevel { ref subject, level: 2 }) if subject == "physics"
        ));
    }

    #[test]
    fn test_level_zero_is_rejected() {
        let source = physics_with_levels(
            r#"
[[levels]]
level = 0
title = "Zero"
summary = "s"
duration_minutes = 10
focus = "f"
"#,
        );

        let err = QuestionBank::from_sources(vec![source]).unwrap_err();
        assert!(matches!(err, AppError::Bank(BankError::ZeroLevel { .. })));
    }

    #[test]
    fn test_distinct_levels_give_unique_question_ids() {
        let source = physics_with_levels(
            r#"
[[levels]]
level = 3
title = "Three"
summary = "s"
duration_minutes = 10
focus = "f"

[[levels]]
title = "Second by position"
summary = "s"
duration_minutes = 10
focus = "f"
"#,
        );

        let bank = QuestionBank::from_sources(vec![source]).unwrap();
        let ids: HashSet<_> = bank
            .get_subject("physics")
            .unwrap()
            .levels
            .iter()
            .flat_map(|l| l.questions.iter().map(|q| q.id.clone()))
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("physics-l3-q1"));
        assert!(ids.contains("physics-l2-q1"));
    }

    #[test]
    fn test_overviews_keep_registration_order() {
        let ids: Vec<_> = builtin().overviews().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["english", "mathematics"]);
    }
}
