//! Request and response payloads of the admin backend

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Current administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: u64,
}

/// Birthday listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthdayQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Substring match on the name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Stored birthday reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub id: i64,
    pub name: String,
    /// `YYYY-MM-DD`, year 1900 when unknown
    pub birth_date: String,
    pub calendar_type: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// New birthday reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBirthday {
    pub name: String,
    pub birth_date: String,
    /// `solar` or `lunar`
    #[serde(default = "default_calendar_type")]
    pub calendar_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_calendar_type() -> String {
    "solar".to_string()
}

/// Partial update of a birthday reminder; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BirthdayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Identifier assigned to a created reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBirthday {
    pub id: i64,
}

/// Someone whose birthday is today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayBirthday {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub age: Option<i64>,
}

/// Custom configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub config_key: String,
    pub config_value: String,
    #[serde(default)]
    pub remark: String,
}

/// Body of a configuration write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValueBody {
    pub value: JsonValue,
}

/// Message listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Matches content or sender
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Inclusive, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Stored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub source: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub msg_type: Option<String>,
    /// Only present on the detail endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<JsonValue>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Message counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    #[serde(default)]
    pub by_source: BTreeMap<String, u64>,
    #[serde(default)]
    pub today: u64,
}

/// Lottery signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinLotteryRequest {
    pub name: String,
}

/// Lottery signup confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinLotteryResponse {
    pub message: String,
    pub name: String,
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub today_messages: u64,
    #[serde(default)]
    pub today_birthdays: u64,
    #[serde(default)]
    pub total_messages: u64,
    /// Distinct senders seen so far
    #[serde(default)]
    pub total_contacts: u64,
}

/// Unfinished task scheduled for today
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(default)]
    pub doc_name: String,
    pub text: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub schedule_date: String,
    #[serde(default)]
    pub block_id: String,
}
