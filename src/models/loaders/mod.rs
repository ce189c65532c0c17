pub mod paper_loader;

pub use paper_loader::{load_all_papers, load_paper, parse_text_paper};
