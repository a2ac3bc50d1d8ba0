use crate::accounts::AccountDirectory;
use crate::clients::missing_pk;
use crate::error::{FieldErrors, PortfolioError};
use crate::model::{AccountId, Profile, ProfileCreate, ProfileId, ProfileUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, ResourceClient, StoreError};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for interacting with the Profile actor.
///
/// Profiles must point at an account known to the [`AccountDirectory`].
#[derive(Clone)]
pub struct ProfileClient {
    inner: ResourceClient<Profile>,
    accounts: Arc<AccountDirectory>,
}

impl ProfileClient {
    pub fn new(inner: ResourceClient<Profile>, accounts: Arc<AccountDirectory>) -> Self {
        Self { inner, accounts }
    }

    fn check_account(&self, account: AccountId) -> Result<(), PortfolioError> {
        if self.accounts.contains(account) {
            Ok(())
        } else {
            Err(FieldErrors::single("user", missing_pk(account.0)).into())
        }
    }
}

#[async_trait]
impl ActorClient<Profile> for ProfileClient {
    type Error = PortfolioError;

    fn inner(&self) -> &ResourceClient<Profile> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        PortfolioError::from(e)
    }

    #[instrument(skip(self))]
    async fn create(&self, params: ProfileCreate) -> Result<Profile, PortfolioError> {
        self.check_account(params.user)?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: ProfileId, update: ProfileUpdate) -> Result<Profile, PortfolioError> {
        if let Some(account) = update.user {
            self.check_account(account)?;
        }
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
