//! Account and wallet types
//!
//! Only the fields the fee engine reads. Persistence lives elsewhere.

use crate::ids::{AccountId, WalletId};
use crate::numeric::WalletCurrency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, e.g. "dealer" or "bankowner"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRole(String);

impl AccountRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountRole {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Account paying the fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AccountRole>,
}

impl Account {
    /// Create an account without a role
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            role: None,
        }
    }

    /// Create an account with a role
    pub fn with_role(id: impl Into<AccountId>, role: impl Into<AccountRole>) -> Self {
        Self {
            id: id.into(),
            role: Some(role.into()),
        }
    }

    /// Check whether the account carries the given role
    pub fn has_role(&self, role: &AccountRole) -> bool {
        self.role.as_ref() == Some(role)
    }
}

/// Wallet the payment is sent from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub currency: WalletCurrency,
}

impl Wallet {
    pub fn new(id: impl Into<WalletId>, currency: WalletCurrency) -> Self {
        Self {
            id: id.into(),
            currency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_creation() {
        let account = Account::new("accountId1");
        assert_eq!(account.id.as_str(), "accountId1");
        assert!(account.role.is_none());
    }

    #[test]
    fn test_account_role() {
        let account = Account::with_role("internalId", "dealer");
        assert!(account.has_role(&AccountRole::new("dealer")));
        assert!(!account.has_role(&AccountRole::new("bankowner")));
    }

    #[test]
    fn test_account_serialization() {
        let account = Account::new("accountId4");
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, r#"{"id":"accountId4"}"#);

        let with_role: Account =
            serde_json::from_str(r#"{"id":"accountId2","role":"dealer"}"#).unwrap();
        assert_eq!(with_role.role, Some(AccountRole::new("dealer")));
    }

    #[test]
    fn test_wallet_creation() {
        let wallet = Wallet::new("walletId", WalletCurrency::Btc);
        assert_eq!(wallet.id.as_str(), "walletId");
        assert_eq!(wallet.currency, WalletCurrency::Btc);
    }
}
