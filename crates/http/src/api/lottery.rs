//! Public lottery signup

use crate::client::{ClientError, PublicClient};
use crate::types::{JoinLotteryRequest, JoinLotteryResponse};

/// Lottery endpoints, only reachable through the public client
pub struct LotteryApi<'a> {
    client: &'a PublicClient,
}

impl PublicClient {
    pub const fn lottery(&self) -> LotteryApi<'_> {
        LotteryApi { client: self }
    }
}

impl LotteryApi<'_> {
    /// Sign up for today's draw
    pub async fn join_lottery(
        &self,
        request: &JoinLotteryRequest,
    ) -> Result<JoinLotteryResponse, ClientError> {
        let req = self.client.post("/lottery/join").json(request);
        self.client.execute(req).await
    }
}
