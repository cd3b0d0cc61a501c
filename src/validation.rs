use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    aggregator::check_rating,
    errors::FieldErrors,
    models::{
        NewPlatform, NewReview, NewTitle, PlatformPayload, ReviewPayload, TitlePayload,
        user::{LoginPayload, RegisterPayload},
    },
};

pub const PLATFORM_NAME_MAX: usize = 40;
pub const PLATFORM_DESCRIPTION_MAX: usize = 150;
pub const PLATFORM_WEBSITE_MAX: usize = 100;
pub const TITLE_MAX: usize = 250;
pub const REVIEW_DESCRIPTION_MAX: usize = 200;
pub const USERNAME_MAX: usize = 150;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)https?://([a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*|\[[0-9a-f:.]+\])(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("URL pattern is valid")
});

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Required, non-blank, at most `max` characters.
fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: Option<usize>,
) -> String {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return String::new();
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
    } else if let Some(max) = max {
        check_max_len(errors, field, trimmed, max);
    }
    trimmed.to_string()
}

fn check_max_len(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this field has no more than {max} characters."),
        );
    }
}

pub fn is_valid_url(value: &str) -> bool {
    URL_RE.is_match(value)
}

pub fn validate_platform(payload: PlatformPayload) -> Result<NewPlatform, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required_text(
        &mut errors,
        "name",
        payload.name.as_deref(),
        Some(PLATFORM_NAME_MAX),
    );
    let description = required_text(
        &mut errors,
        "description",
        payload.description.as_deref(),
        Some(PLATFORM_DESCRIPTION_MAX),
    );
    let website = required_text(
        &mut errors,
        "website",
        payload.website.as_deref(),
        Some(PLATFORM_WEBSITE_MAX),
    );
    if !website.is_empty() && !is_valid_url(&website) {
        errors.add("website", "Enter a valid URL.");
    }

    errors.finish(NewPlatform {
        name,
        description,
        website,
    })
}

/// Shape checks only; whether the platform exists is decided against the store.
pub fn validate_title(payload: TitlePayload) -> Result<NewTitle, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = required_text(
        &mut errors,
        "title",
        payload.title.as_deref(),
        Some(TITLE_MAX),
    );
    let storyline = required_text(&mut errors, "storyline", payload.storyline.as_deref(), None);

    let platform_id = payload.platform.unwrap_or_else(|| {
        errors.add("platform", REQUIRED);
        0
    });

    errors.finish(NewTitle {
        title,
        storyline,
        platform_id,
        active: payload.active.unwrap_or(true),
    })
}

pub fn validate_review(payload: ReviewPayload) -> Result<NewReview, FieldErrors> {
    let mut errors = FieldErrors::new();

    let rating = match payload.rating {
        None => {
            errors.add("rating", REQUIRED);
            0
        }
        Some(rating) => check_rating(rating).unwrap_or_else(|rating_errors| {
            for message in rating_errors.get("rating").unwrap_or_default() {
                errors.add("rating", message.clone());
            }
            0
        }),
    };

    let description = payload.description.map(|d| d.trim().to_string());
    if let Some(description) = description.as_deref() {
        check_max_len(
            &mut errors,
            "description",
            description,
            REVIEW_DESCRIPTION_MAX,
        );
    }

    errors.finish(NewReview {
        rating,
        description,
        active: payload.active.unwrap_or(true),
    })
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn validate_registration(payload: RegisterPayload) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = required_text(
        &mut errors,
        "username",
        payload.username.as_deref(),
        Some(USERNAME_MAX),
    );
    if !username.is_empty() && !USERNAME_RE.is_match(&username) {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }

    let email = required_text(&mut errors, "email", payload.email.as_deref(), None);
    if !email.is_empty() && !EMAIL_RE.is_match(&email) {
        errors.add("email", "Enter a valid email address.");
    }

    let password = payload.password.unwrap_or_default();
    if password.is_empty() {
        errors.add("password", REQUIRED);
    }

    match payload.password2.as_deref() {
        None | Some("") => errors.add("password2", REQUIRED),
        Some(confirm) if !password.is_empty() && confirm != password => {
            errors.add("password", "Passwords must match")
        }
        Some(_) => {}
    }

    errors.finish(Registration {
        username,
        email,
        password,
    })
}

pub fn validate_login(payload: LoginPayload) -> Result<(String, String), FieldErrors> {
    let mut errors = FieldErrors::new();
    let username = required_text(&mut errors, "username", payload.username.as_deref(), None);
    let password = payload.password.unwrap_or_default();
    if password.is_empty() {
        errors.add("password", REQUIRED);
    }
    errors.finish((username, password))
}
