pub mod grading;
pub mod loaders;
pub mod paper;
pub mod question;
pub mod subject;

pub use grading::{Assessment, GradingResult};
pub use loaders::{load_all_papers, load_paper};
pub use paper::{ExamPaper, ExtractionReport, PageReader, PageText, QuestionBank, SubjectStats};
pub use question::{
    ClassifiedQuestion, Classification, Difficulty, ExtractedQuestion, QuestionCandidate,
    QuestionType, TextBlock,
};
pub use subject::Subject;
