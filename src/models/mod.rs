pub mod loaders;
pub mod question;
pub mod report;
pub mod subject;

pub use loaders::{load_all_subject_sources, load_subject_source, parse_subject_source, SubjectSource};
pub use question::{CorrectIndex, Question, QuestionTemplate, TemplateField};
pub use report::{AnswerRecord, PerformanceReport, QuestionDetail, ReportRequest};
pub use subject::{
    Level, LevelDescriptor, LevelInfo, LevelSummary, Subject, SubjectDefinition, SubjectInfo,
    SubjectOverview,
};
