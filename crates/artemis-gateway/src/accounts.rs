//! Multi-account aggregation for the cloud light backend

use std::sync::Arc;

use artemis_core::{AccountDevice, GatewayError, GatewayResult, LightBackend};
use futures::future::join_all;
use tracing::{debug, warn};

/// The configured light accounts, in configuration order.
///
/// Index 0 is the primary account. Indices are stable for the lifetime of
/// the gateway and are what clients send back as `apiKeyIndex`.
#[derive(Clone, Default)]
pub struct LightAccounts {
    accounts: Vec<Arc<dyn LightBackend>>,
}

impl LightAccounts {
    pub fn new(accounts: Vec<Arc<dyn LightBackend>>) -> Self {
        Self { accounts }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Resolve an account index from the caller
    pub fn account(&self, index: i64) -> GatewayResult<&Arc<dyn LightBackend>> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.accounts.get(i))
            .ok_or(GatewayError::InvalidSelector {
                index,
                count: self.accounts.len(),
            })
    }

    /// List devices across every account.
    ///
    /// Accounts are queried concurrently. The merged list keeps configuration
    /// order, then each account's own order; nothing is de-duplicated. A
    /// failing account is logged and contributes nothing.
    pub async fn list_all_devices(&self) -> Vec<AccountDevice> {
        let results = join_all(self.accounts.iter().map(|account| account.list_devices())).await;

        let mut all_devices = Vec::new();
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(devices) => {
                    debug!(account = index, count = devices.len(), "Account listed devices");
                    all_devices.extend(devices.into_iter().map(|device| AccountDevice {
                        device,
                        api_key_index: index,
                    }));
                }
                Err(e) => {
                    warn!(account = index, error = %e, "Failed to list devices for account");
                }
            }
        }

        all_devices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{device, MockLights};
    use pretty_assertions::assert_eq;

    fn accounts(mocks: Vec<MockLights>) -> LightAccounts {
        LightAccounts::new(
            mocks
                .into_iter()
                .map(|m| Arc::new(m) as Arc<dyn LightBackend>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_failed_account_is_skipped() {
        let accounts = accounts(vec![
            MockLights::with_devices(vec![device("a1"), device("a2")]),
            MockLights::failing(),
        ]);

        let devices = accounts.list_all_devices().await;
        let ids: Vec<_> = devices.iter().map(|d| (d.device.id.as_str(), d.api_key_index)).collect();
        assert_eq!(ids, vec![("a1", 0), ("a2", 0)]);
    }

    #[tokio::test]
    async fn test_order_and_duplicates_preserved() {
        let accounts = accounts(vec![
            MockLights::with_devices(vec![device("x"), device("shared")]).delayed(30),
            MockLights::with_devices(vec![device("shared"), device("y")]),
        ]);

        let devices = accounts.list_all_devices().await;
        let ids: Vec<_> = devices.iter().map(|d| (d.device.id.as_str(), d.api_key_index)).collect();
        assert_eq!(
            ids,
            vec![("x", 0), ("shared", 0), ("shared", 1), ("y", 1)]
        );
    }

    #[tokio::test]
    async fn test_all_failing_is_empty_not_error() {
        let accounts = accounts(vec![
            MockLights::failing(),
            MockLights::failing(),
        ]);
        assert!(accounts.list_all_devices().await.is_empty());
        assert!(LightAccounts::default().list_all_devices().await.is_empty());
    }

    #[test]
    fn test_account_selector() {
        let accounts = accounts(vec![
            MockLights::default(),
            MockLights::default(),
        ]);
        assert!(accounts.account(0).is_ok());
        assert!(accounts.account(1).is_ok());
        assert!(matches!(
            accounts.account(2),
            Err(GatewayError::InvalidSelector { index: 2, count: 2 })
        ));
        assert!(matches!(
            accounts.account(-1),
            Err(GatewayError::InvalidSelector { index: -1, .. })
        ));
    }
}
