/// Input validation utilities
use crate::constants::{EMAIL_REGEX_PATTERN, MAX_EMAIL_LENGTH};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_REGEX_PATTERN).expect("email pattern is valid"));

/// True when `email` looks like a deliverable address
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}
