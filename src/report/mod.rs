//! Allure-compatible result records and their persistence.

pub mod allure;
pub mod types;

pub use allure::{is_valid_result_filename, load_result, result_filename, write_result};
pub use types::{Attachment, Label, TestResult, TestStatus};
