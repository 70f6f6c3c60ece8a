//! Dashboard endpoints

use crate::client::{AuthenticatedClient, ClientError};
use crate::types::{DashboardStats, TodayBirthday, TodoItem};

/// Read-only widgets of the dashboard page
pub struct DashboardApi<'a> {
    client: &'a AuthenticatedClient,
}

impl AuthenticatedClient {
    pub const fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi { client: self }
    }
}

impl DashboardApi<'_> {
    /// Message, birthday and contact counters
    pub async fn stats(&self) -> Result<DashboardStats, ClientError> {
        let req = self.client.get("/dashboard/stats");
        self.client.execute(req).await
    }

    /// Today's unfinished tasks, at most five
    pub async fn todos(&self) -> Result<Vec<TodoItem>, ClientError> {
        let req = self.client.get("/dashboard/todos");
        self.client.execute(req).await
    }

    /// Birthdays falling on today
    pub async fn birthdays(&self) -> Result<Vec<TodayBirthday>, ClientError> {
        let req = self.client.get("/dashboard/birthdays");
        self.client.execute(req).await
    }
}
