//! 内置科目数据（编译进二进制）

use crate::error::FileError;
use crate::models::{parse_subject_source, SubjectSource};

/// 内置科目源：(名称, TOML 内容)，按注册顺序排列
pub const BUILTIN_SUBJECTS: &[(&str, &str)] = &[
    ("english.toml", include_str!("english.toml")),
    ("mathematics.toml", include_str!("mathematics.toml")),
];

/// 解析全部内置科目源
pub fn builtin_sources() -> Result<Vec<SubjectSource>, FileError> {
    BUILTIN_SUBJECTS
        .iter()
        .map(|(name, content)| parse_subject_source(content, &format!("builtin:{}", name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sources_parse() {
        let sources = builtin_sources().unwrap();
        assert_eq!(sources.len(), 2);
        for source in &sources {
            assert_eq!(source.templates.len(), 10);
            assert_eq!(source.levels.len(), 5);
        }
        assert_eq!(sources[0].id, "english");
        assert_eq!(sources[1].id, "mathematics");
    }
}
