//! Accounts allowed to sign in over HTTP Basic authentication.
//!
//! The directory answers two questions: do these credentials belong to an account, and
//! does an account with this id exist. Profiles point at accounts by id.

use crate::model::AccountId;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    password: String,
}

impl Account {
    pub fn new(id: AccountId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parses `id:username:password`. The password may itself contain `:`.
impl FromStr for Account {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(id), Some(username), Some(password)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err("expected id:username:password".to_string());
        };
        let id = id
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid account id {id:?}"))?;
        let username = username.trim();
        if username.is_empty() {
            return Err("account username may not be empty".to_string());
        }
        Ok(Account::new(AccountId(id), username, password))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// The account these credentials belong to, if any.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .find(|account| account.username == username && account.password == password)
            .map(|account| account.id)
    }

    pub fn contains(&self, id: AccountId) -> bool {
        self.accounts.iter().any(|account| account.id == id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account() {
        let account: Account = "2:editor:s3cr:et".parse().unwrap();
        assert_eq!(account, Account::new(AccountId(2), "editor", "s3cr:et"));

        assert!("editor:secret".parse::<Account>().is_err());
        assert!("x:editor:secret".parse::<Account>().is_err());
        assert!("3: :secret".parse::<Account>().is_err());
    }

    #[test]
    fn test_authenticate() {
        let directory = AccountDirectory::new(vec![
            Account::new(AccountId(1), "admin", "pw"),
            Account::new(AccountId(2), "editor", "other"),
        ]);

        assert_eq!(directory.authenticate("editor", "other"), Some(AccountId(2)));
        assert_eq!(directory.authenticate("editor", "pw"), None);
        assert_eq!(directory.authenticate("nobody", "pw"), None);
        assert!(directory.contains(AccountId(1)));
        assert!(!directory.contains(AccountId(9)));
        assert!(!format!("{:?}", directory).contains("other"));
    }
}
