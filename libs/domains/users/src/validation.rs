//! Field rules for [`User`].
//!
//! Every rule is evaluated, in order, and every violated rule contributes its
//! message. Nothing here errors; callers decide what an unsuccessful
//! [`ValidationResult`] means.

use regex::Regex;
use std::sync::LazyLock;

use crate::user::User;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 30;
pub const EMAIL_MIN_LEN: usize = 10;
pub const EMAIL_MAX_LEN: usize = 180;

/// Accepts `local@domain.tld` and `local@[1.2.3.4]` style addresses.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([\w\-.]+)@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.)|(([\w\-]+\.)+))([a-zA-Z]{2,4}|[0-9]{1,3})(\]?)$",
    )
    .unwrap()
});

pub const MISSING_USER: &str = "User must not be empty";

/// Outcome of validating a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub ok: bool,
    pub messages: Vec<String>,
}

impl ValidationResult {
    fn from_messages(messages: Vec<String>) -> Self {
        Self {
            ok: messages.is_empty(),
            messages,
        }
    }
}

struct Rule {
    passes: fn(&User) -> bool,
    message: &'static str,
}

const fn rule(passes: fn(&User) -> bool, message: &'static str) -> Rule {
    Rule { passes, message }
}

fn chars(value: &str) -> usize {
    value.chars().count()
}

fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

fn name_present(user: &User) -> bool {
    not_blank(&user.name)
}

fn name_min(user: &User) -> bool {
    chars(&user.name) >= NAME_MIN_LEN
}

fn name_max(user: &User) -> bool {
    chars(&user.name) <= NAME_MAX_LEN
}

fn password_present(user: &User) -> bool {
    not_blank(&user.password)
}

fn password_min(user: &User) -> bool {
    chars(&user.password) >= PASSWORD_MIN_LEN
}

fn password_max(user: &User) -> bool {
    chars(&user.password) <= PASSWORD_MAX_LEN
}

fn email_present(user: &User) -> bool {
    not_blank(&user.email)
}

fn email_min(user: &User) -> bool {
    chars(&user.email) >= EMAIL_MIN_LEN
}

fn email_max(user: &User) -> bool {
    chars(&user.email) <= EMAIL_MAX_LEN
}

fn email_format(user: &User) -> bool {
    EMAIL_REGEX.is_match(&user.email)
}

const USER_RULES: &[Rule] = &[
    rule(name_present, "Name must not be empty"),
    rule(name_min, "Name must be at least 3 characters"),
    rule(name_max, "Name must be at most 100 characters"),
    rule(password_present, "Password must not be empty"),
    rule(password_min, "Password must be at least 6 characters"),
    rule(password_max, "Password must be at most 30 characters"),
    rule(email_present, "Email must not be empty"),
    rule(email_min, "Email must be at least 10 characters"),
    rule(email_max, "Email must be at most 180 characters"),
    rule(email_format, "Email format is invalid"),
];

/// Run every user rule and collect the messages of those that fail.
pub fn validate_user(user: Option<&User>) -> ValidationResult {
    let Some(user) = user else {
        return ValidationResult::from_messages(vec![MISSING_USER.to_string()]);
    };

    let messages = USER_RULES
        .iter()
        .filter(|rule| !(rule.passes)(user))
        .map(|rule| rule.message.to_string())
        .collect();

    ValidationResult::from_messages(messages)
}
