//! Message endpoints

use crate::client::{AuthenticatedClient, ClientError};
use crate::types::{MessageQuery, MessageRecord, MessageStats, Page};
use serde::de::IgnoredAny;

pub struct MessageApi<'a> {
    client: &'a AuthenticatedClient,
}

impl AuthenticatedClient {
    pub const fn message(&self) -> MessageApi<'_> {
        MessageApi { client: self }
    }
}

impl MessageApi<'_> {
    pub async fn list(&self, query: &MessageQuery) -> Result<Page<MessageRecord>, ClientError> {
        let req = self.client.get("/message/list").query(query);
        self.client.execute(req).await
    }

    pub async fn detail(&self, id: i64) -> Result<MessageRecord, ClientError> {
        let req = self.client.get(&format!("/message/{id}"));
        self.client.execute(req).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let req = self.client.delete(&format!("/message/{id}"));
        self.client.execute::<IgnoredAny>(req).await.map(|_| ())
    }

    /// Counts per source and for today
    pub async fn stats(&self) -> Result<MessageStats, ClientError> {
        let req = self.client.get("/message/stats");
        self.client.execute(req).await
    }
}
