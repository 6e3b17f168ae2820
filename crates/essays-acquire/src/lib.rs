pub mod extract;
pub mod fetch;
pub mod index;
pub mod output;
pub mod run;

pub use extract::{ContentRule, FontFaceRule};
pub use fetch::Fetcher;
pub use run::{process_page, run, ConvertedEssay};
