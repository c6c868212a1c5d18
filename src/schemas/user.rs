use garde::Validate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::password::check_strength;
use crate::database::models::User;

/// Roles an account may hold
pub const ROLES: &[&str] = &["developer", "producer", "expert"];

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9]+[.\-_])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+$")
        .expect("email pattern compiles")
});

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterPayload {
    #[garde(required, length(min = 1, max = 128))]
    pub username: Option<String>,
    #[garde(required, custom(strong_password))]
    pub password: Option<String>,
    #[garde(length(max = 128), custom(email_address))]
    pub email: Option<String>,
    #[garde(custom(known_role))]
    pub role: Option<String>,
}

fn strong_password(value: &Option<String>, _context: &()) -> garde::Result {
    match value {
        Some(password) => check_strength(password).map_err(garde::Error::new),
        None => Ok(()),
    }
}

fn email_address(value: &Option<String>, _context: &()) -> garde::Result {
    match value {
        Some(email) if !EMAIL.is_match(email) => Err(garde::Error::new("not a valid email address")),
        _ => Ok(()),
    }
}

fn known_role(value: &Option<String>, _context: &()) -> garde::Result {
    match value {
        Some(role) if !ROLES.contains(&role.as_str()) => Err(garde::Error::new(format!(
            "must be one of: {}",
            ROLES.join(", ")
        ))),
        _ => Ok(()),
    }
}

/// Login body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    #[garde(required, length(min = 1))]
    pub username: Option<String>,
    #[garde(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterPayload {
        RegisterPayload {
            username: Some("sommelier".to_string()),
            password: Some("Tannin#2024".to_string()),
            email: Some("somm@example.com".to_string()),
            role: Some("expert".to_string()),
        }
    }

    fn failed_fields(payload: &RegisterPayload) -> Vec<String> {
        match payload.validate() {
            Ok(()) => Vec::new(),
            Err(report) => report.iter().map(|(path, _)| path.to_string()).collect(),
        }
    }

    #[test]
    fn complete_registration_is_valid() {
        assert!(failed_fields(&registration()).is_empty());
    }

    #[test]
    fn weak_password_is_rejected() {
        let mut payload = registration();
        payload.password = Some("password".to_string());
        assert_eq!(failed_fields(&payload), vec!["password"]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut payload = registration();
        payload.email = Some("not-an-email".to_string());
        assert_eq!(failed_fields(&payload), vec!["email"]);
    }

    #[test]
    fn email_and_role_are_optional() {
        let mut payload = registration();
        payload.email = None;
        payload.role = None;
        assert!(failed_fields(&payload).is_empty());
    }

    #[test]
    fn dotted_email_is_accepted() {
        let mut payload = registration();
        payload.email = Some("first.last@cellar.co.uk".to_string());
        assert!(failed_fields(&payload).is_empty());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut payload = registration();
        payload.role = Some("admin".to_string());
        assert_eq!(failed_fields(&payload), vec!["role"]);
    }

    #[test]
    fn view_omits_password() {
        let user = User {
            id: 7,
            username: "sommelier".to_string(),
            password: "$argon2id$...".to_string(),
            email: None,
            role: Some("expert".to_string()),
        };
        let json = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "sommelier");
    }
}
