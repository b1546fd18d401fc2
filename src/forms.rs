use serde::{Deserialize, Deserializer};
use sqlx::SqlitePool;
use validator::{Validate, ValidationErrors};

use crate::{
    models::{
        groups::Group,
        posts::PostChanges,
        users::{is_valid_username, User},
    },
    AppResult,
};

/// Treats a blank form field as absent and trims the rest.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty()))
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(String::deserialize(deserializer)?.trim().to_owned())
}

/// Flattens validation errors into messages, in field order.
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field}: {}", error.code),
            })
        })
        .collect()
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PostForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Text is required."))]
    pub text: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 255, message = "Image path is too long."))]
    pub image: Option<String>,
}

impl PostForm {
    /// Validates the form, including that the chosen group exists.
    pub async fn clean(&self, db_pool: &SqlitePool) -> AppResult<Result<PostChanges, Vec<String>>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => messages(&errors),
        };

        let mut group_id = None;
        if let Some(raw) = self.group.as_deref() {
            let group = match raw.parse::<i64>() {
                Ok(id) => Group::get(db_pool, id).await?,
                Err(_) => None,
            };
            match group {
                Some(group) => group_id = Some(group.id),
                None => errors.push("Select a valid group.".to_owned()),
            }
        }

        if !errors.is_empty() {
            return Ok(Err(errors));
        }
        Ok(Ok(PostChanges {
            text: self.text.clone(),
            group_id,
            image: self.image.clone(),
        }))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Comment text is required."))]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default, deserialize_with = "trimmed")]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 150, message = "Username must be 1 to 150 characters."))]
    pub username: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "First name is too long."))]
    pub first_name: String,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Last name is too long."))]
    pub last_name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    pub async fn clean(&self, db_pool: &SqlitePool) -> AppResult<Vec<String>> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => messages(&errors),
        };

        if !self.username.is_empty() && !is_valid_username(&self.username) {
            errors.push("Username may contain only letters, digits and @/./+/-/_.".to_owned());
        } else if User::find_by_username(db_pool, &self.username).await?.is_some() {
            errors.push("A user with that username already exists.".to_owned());
        }
        if self.password1 != self.password2 {
            errors.push("The two password fields didn't match.".to_owned());
        }

        Ok(errors)
    }
}
