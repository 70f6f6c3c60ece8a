//! System configuration endpoints

use super::encode_segment;
use crate::client::{AuthenticatedClient, ClientError};
use crate::types::{ConfigEntry, ConfigValueBody};
use serde::de::IgnoredAny;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct ConfigApi<'a> {
    client: &'a AuthenticatedClient,
}

impl AuthenticatedClient {
    pub const fn config(&self) -> ConfigApi<'_> {
        ConfigApi { client: self }
    }
}

impl ConfigApi<'_> {
    fn key_path(&self, key: &str) -> Result<String, ClientError> {
        encode_segment(key)
            .map(|segment| format!("/config/{segment}"))
            .map_err(|err| self.client.report(err))
    }

    /// Custom entries with their remarks
    pub async fn list(&self) -> Result<Vec<ConfigEntry>, ClientError> {
        let req = self.client.get("/config/list");
        self.client.execute(req).await
    }

    /// Value of one key, `None` when unset
    pub async fn get(&self, key: &str) -> Result<Option<Value>, ClientError> {
        let req = self.client.get(&self.key_path(key)?);
        self.client.execute(req).await
    }

    /// Write one key; the body is `{"value": ...}`
    pub async fn set(&self, key: &str, value: impl Into<Value>) -> Result<(), ClientError> {
        let body = ConfigValueBody {
            value: value.into(),
        };
        let req = self.client.put(&self.key_path(key)?).json(&body);
        self.client.execute::<IgnoredAny>(req).await.map(|_| ())
    }

    pub async fn delete(&self, key: &str) -> Result<(), ClientError> {
        let req = self.client.delete(&self.key_path(key)?);
        self.client.execute::<IgnoredAny>(req).await.map(|_| ())
    }

    /// Full snapshot, system values merged with custom entries
    pub async fn get_all(&self) -> Result<BTreeMap<String, Value>, ClientError> {
        let req = self.client.get("/config/all");
        self.client.execute(req).await
    }
}
