//! Users and their partial updates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{non_blank, Email, MAX_USERNAME_LEN};
use crate::{PasswordDigest, ValidationError};

pub type UserId = i64;

/// Stored user, including the password digest. Never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// What other resources and responses see of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Validated input for a new user or a full replacement
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: Email,
    pub password: PasswordDigest,
}

impl NewUser {
    pub fn new(
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ValidationError> {
        let username = non_blank(username, "username", MAX_USERNAME_LEN)?;
        let email = Email::new(email)?;
        let password = password_digest(password)?;
        Ok(Self {
            username,
            email,
            password,
        })
    }
}

/// Partial user update; only the present fields are written
#[derive(Debug, Clone, PartialEq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<Email>,
    pub password: Option<PasswordDigest>,
}

impl UserPatch {
    /// Validate the supplied fields. An update with nothing in it is an error.
    pub fn new(
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ValidationError> {
        let patch = Self {
            username: username
                .map(|u| non_blank(Some(u), "username", MAX_USERNAME_LEN))
                .transpose()?,
            email: email.map(|e| Email::new(Some(e))).transpose()?,
            password: password.map(|p| password_digest(Some(p))).transpose()?,
        };
        if patch.username.is_none() && patch.email.is_none() && patch.password.is_none() {
            return Err(ValidationError::NoChanges);
        }
        Ok(patch)
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.as_str().to_owned();
        }
        if let Some(password) = &self.password {
            user.password = password.clone();
        }
    }
}

impl From<NewUser> for UserPatch {
    fn from(user: NewUser) -> Self {
        Self {
            username: Some(user.username),
            email: Some(user.email),
            password: Some(user.password),
        }
    }
}

fn password_digest(password: Option<String>) -> Result<PasswordDigest, ValidationError> {
    let password = password.ok_or(ValidationError::Missing { field: "password" })?;
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "password" });
    }
    Ok(PasswordDigest::of(&password))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> User {
        User {
            id: 7,
            username: "ada".into(),
            email: "ada@example.org".into(),
            password: PasswordDigest::of("analytical"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn new_user_digests_password() {
        let user = NewUser::new(
            Some("ada".into()),
            Some("ada@example.org".into()),
            Some("analytical".into()),
        )
        .unwrap();
        assert!(user.password.matches("analytical"));
        assert_ne!(user.password.as_str(), "analytical");
    }

    #[test]
    fn new_user_requires_all_fields() {
        let err = NewUser::new(Some("ada".into()), None, Some("pw".into())).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "email" });
    }

    #[test]
    fn empty_patch_rejected() {
        assert_eq!(
            UserPatch::new(None, None, None).unwrap_err(),
            ValidationError::NoChanges
        );
    }

    #[test]
    fn email_only_patch_leaves_rest() {
        let mut user = ada();
        let before = user.clone();
        UserPatch::new(None, Some("countess@example.org".into()), None)
            .unwrap()
            .apply(&mut user);

        assert_eq!(user.email, "countess@example.org");
        assert_eq!(user.username, before.username);
        assert_eq!(user.password, before.password);
    }

    #[test]
    fn public_view_has_no_password() {
        let json = serde_json::to_value(ada().public()).unwrap();
        assert_eq!(json["username"], "ada");
        assert!(json.get("password").is_none());
    }
}
