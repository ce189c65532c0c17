pub mod classifier;
pub mod grader;
pub mod review_writer;
pub mod scorer;
pub mod segmenter;
pub mod similarity;
pub mod synthesizer;

pub use classifier::QuestionClassifier;
pub use grader::AnswerGrader;
pub use review_writer::ReviewWriter;
pub use scorer::{CandidateScorer, Selection};
pub use segmenter::BlockSegmenter;
pub use synthesizer::AnswerSynthesizer;
