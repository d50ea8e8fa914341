pub mod toml_loader;

pub use toml_loader::{
    load_all_subject_sources, load_subject_source, parse_subject_source, render_placeholders,
    SubjectSource, TemplateSource,
};
