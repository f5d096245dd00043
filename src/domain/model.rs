use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// CSV 中的一筆物件資料，所有欄位保留原始文字
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyRecord {
    pub location: String,
    pub bhk: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub rent: String,
    pub furnishing: String,
    pub parking: String,
    pub contact: String,
    pub photos_link: String,
}

impl PropertyRecord {
    /// CSV 標頭必須包含的欄位 (大小寫敏感)
    pub const REQUIRED_COLUMNS: [&'static str; 8] = [
        "location",
        "bhk",
        "type",
        "rent",
        "furnishing",
        "parking",
        "contact",
        "photos_link",
    ];
}

/// 依來源順序保存的物件表，載入後不可變
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    records: Vec<PropertyRecord>,
}

impl PropertyTable {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 下拉選單用：排序後不重複的地點與 BHK
    pub fn filter_options(&self) -> FilterOptions {
        let mut locations: Vec<String> = self
            .records
            .iter()
            .map(|r| r.location.clone())
            .filter(|v| !v.is_empty())
            .collect();
        locations.sort();
        locations.dedup();

        let mut bhks: Vec<String> = self
            .records
            .iter()
            .map(|r| r.bhk.clone())
            .filter(|v| !v.is_empty())
            .collect();
        bhks.sort();
        bhks.dedup();

        FilterOptions { locations, bhks }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub bhks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub location: String,
    pub bhk: String,
}

impl SearchFilter {
    pub fn new(location: impl Into<String>, bhk: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            bhk: bhk.into(),
        }
    }
}

/// 單次發送用的訊息，發送完即丟棄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// 供應商回傳的訊息識別碼
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub message_id: MessageId,
    pub to: String,
    pub sent_at: DateTime<Utc>,
}
