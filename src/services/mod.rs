pub mod bank_builder;
pub mod question_bank;
pub mod report_service;

pub use bank_builder::{build_levels, build_subject};
pub use question_bank::{BankStats, QuestionBank};
pub use report_service::build_report;
