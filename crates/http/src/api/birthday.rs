//! Birthday reminder endpoints

use crate::client::{AuthenticatedClient, ClientError};
use crate::types::{
    BirthdayQuery, BirthdayRecord, BirthdayUpdate, CreatedBirthday, NewBirthday, Page,
    TodayBirthday,
};
use serde::de::IgnoredAny;

pub struct BirthdayApi<'a> {
    client: &'a AuthenticatedClient,
}

impl AuthenticatedClient {
    pub const fn birthday(&self) -> BirthdayApi<'_> {
        BirthdayApi { client: self }
    }
}

impl BirthdayApi<'_> {
    /// List reminders, filter passed as query parameters
    pub async fn list(&self, query: &BirthdayQuery) -> Result<Page<BirthdayRecord>, ClientError> {
        let req = self.client.get("/birthday/list").query(query);
        self.client.execute(req).await
    }

    pub async fn add(&self, birthday: &NewBirthday) -> Result<CreatedBirthday, ClientError> {
        let req = self.client.post("/birthday").json(birthday);
        self.client.execute(req).await
    }

    pub async fn update(&self, id: i64, update: &BirthdayUpdate) -> Result<(), ClientError> {
        let req = self.client.put(&format!("/birthday/{id}")).json(update);
        self.client.execute::<IgnoredAny>(req).await.map(|_| ())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let req = self.client.delete(&format!("/birthday/{id}"));
        self.client.execute::<IgnoredAny>(req).await.map(|_| ())
    }

    pub async fn get_today_birthdays(&self) -> Result<Vec<TodayBirthday>, ClientError> {
        let req = self.client.get("/birthday/today");
        self.client.execute(req).await
    }
}
