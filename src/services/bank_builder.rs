//! 题库构建 - 把科目模板按等级展开为具体题目
//!
//! 纯函数：输入模板列表和等级描述，输出 `Vec<Level>`。
//! 对每个等级、每个模板调用一次生成函数，
//! 因此 T 个模板 × L 个等级恰好得到 T×L 道题。

use crate::models::{Level, LevelDescriptor, QuestionTemplate, Subject, SubjectDefinition};
use tracing::{debug, warn};

/// 按等级描述展开模板
///
/// # 参数
/// - `subject_id`: 科目ID（用于题目ID）
/// - `templates`: 题目模板，按顺序编号（从1开始）
/// - `descriptors`: 等级描述；未声明等级编号时取数组位置 + 1
///
/// 正确答案索引不做强制校验，越界时只记录警告。
pub fn build_levels(
    subject_id: &str,
    templates: &[QuestionTemplate],
    descriptors: &[LevelDescriptor],
) -> Vec<Level> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let number = descriptor.level.unwrap_or(index as u32 + 1);

            let questions = templates
                .iter()
                .enumerate()
                .map(|(i, template)| {
                    let question = template.materialize(subject_id, number, i as u32 + 1);
                    if !question.has_valid_answer() {
                        warn!("⚠️ 答案索引超出选项范围: {}", question);
                    }
                    question
                })
                .collect::<Vec<_>>();

            debug!(
                "科目 {} 等级 {}: 生成 {} 道题",
                subject_id,
                number,
                questions.len()
            );

            Level {
                number,
                title: descriptor.title.clone(),
                summary: descriptor.summary.clone(),
                duration_minutes: descriptor.duration_minutes,
                focus: descriptor.focus.clone(),
                questions,
            }
        })
        .collect()
}

/// 由科目定义构建完整科目
pub fn build_subject(definition: SubjectDefinition) -> Subject {
    let levels = build_levels(
        &definition.info.id,
        &definition.templates,
        &definition.descriptors,
    );

    Subject {
        info: definition.info,
        levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorrectIndex, TemplateField};
    use std::collections::HashSet;

    fn descriptor(level: Option<u32>, title: &str) -> LevelDescriptor {
        LevelDescriptor {
            level,
            title: title.to_string(),
            summary: format!("{} summary", title),
            duration_minutes: 12,
            focus: "focus".to_string(),
        }
    }

    fn templates(count: usize) -> Vec<QuestionTemplate> {
        (0..count)
            .map(|i| QuestionTemplate {
                prompt: TemplateField::generated(move |level, ordinal| {
                    format!("T{} at level {} ordinal {}", i, level, ordinal)
                }),
                options: TemplateField::Fixed(vec!["a".into(), "b".into(), "c".into()]),
                correct_index: CorrectIndex::Fixed(i % 3),
            })
            .collect()
    }

    #[test]
    fn test_cross_product_counts_and_ids() {
        let descriptors: Vec<_> = (1..=5)
            .map(|n| descriptor(Some(n), &format!("Level {}", n)))
            .collect();
        let levels = build_levels("english", &templates(10), &descriptors);

        assert_eq!(levels.len(), 5);
        let total: usize = levels.iter().map(|l| l.questions.len()).sum();
        assert_eq!(total, 50);

        let ids: HashSet<_> = levels
            .iter()
            .flat_map(|l| l.questions.iter().map(|q| q.id.clone()))
            .collect();
        assert_eq!(ids.len(), 50);

        assert_eq!(levels[2].questions[0].id, "english-l3-q1");
        assert_eq!(levels[2].questions[9].id, "english-l3-q10");
        assert_eq!(levels[2].questions[9].prompt, "T9 at level 3 ordinal 10");
    }

    #[test]
    fn test_missing_level_number_uses_position() {
        let descriptors = vec![
            descriptor(None, "first"),
            descriptor(Some(7), "declared"),
            descriptor(None, "third"),
        ];
        let levels = build_levels("mathematics", &templates(2), &descriptors);

        let numbers: Vec<_> = levels.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 7, 3]);
        assert_eq!(levels[1].questions[1].id, "mathematics-l7-q2");
        assert_eq!(levels[1].title, "declared");
    }

    #[test]
    fn test_correct_index_generator_sees_options() {
        let template = QuestionTemplate {
            prompt: TemplateField::Fixed("Which is last?".into()),
            options: TemplateField::generated(|level, _| {
                (0..level).map(|n| n.to_string()).collect()
            }),
            correct_index: CorrectIndex::generated(|_, _, options| options.len() - 1),
        };
        let descriptors = vec![descriptor(Some(2), "two"), descriptor(Some(4), "four")];
        let levels = build_levels("x", &[template], &descriptors);

        assert_eq!(levels[0].questions[0].correct_index, 1);
        assert_eq!(levels[1].questions[0].correct_index, 3);
    }

    #[test]
    fn test_no_templates_gives_empty_levels() {
        let levels = build_levels("empty", &[], &[descriptor(Some(1), "only")]);
        assert_eq!(levels.len(), 1);
        assert!(levels[0].questions.is_empty());
    }
}
