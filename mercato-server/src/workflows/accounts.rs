//! User accounts. Responses never carry the password digest.

use mercato_core::{NewUser, PublicUser, UserId, UserPatch};

use crate::error::{Error, Result};
use crate::store::MarketStore;

pub struct Accounts<'a> {
    store: &'a dyn MarketStore,
}

impl<'a> Accounts<'a> {
    pub fn new(store: &'a dyn MarketStore) -> Self {
        Self { store }
    }

    pub async fn register(&self, input: NewUser) -> Result<PublicUser> {
        let user = self.store.insert_user(&input).await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user.into())
    }

    pub async fn get(&self, id: UserId) -> Result<PublicUser> {
        self.store
            .get_user(id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| Error::not_found("user", id))
    }

    /// Full replacement: every field is rewritten.
    pub async fn replace(&self, id: UserId, input: NewUser) -> Result<PublicUser> {
        self.update(id, UserPatch::from(input)).await
    }

    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<PublicUser> {
        let user = self
            .store
            .update_user(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found("user", id))?;
        tracing::info!(
            user_id = user.id,
            username = patch.username.is_some(),
            email = patch.email.is_some(),
            password = patch.password.is_some(),
            "user updated"
        );
        Ok(user.into())
    }
}
