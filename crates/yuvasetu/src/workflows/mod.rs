pub mod import;
pub mod matching;
