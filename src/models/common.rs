//! Common types and utilities shared across models.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Record identifier as issued by the backend.
pub type RecordId = u64;

/// Single-record response envelope: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

/// Paginated list as returned inside the envelope:
/// `{ "data": { "data": [...], "current_page", "last_page", "total" } }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            last_page: self.last_page,
            total: self.total,
        }
    }
}

/// Page position of a list, without its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            total: 0,
        }
    }
}

/// Anything the list stores can key by id
pub trait Identified {
    fn id(&self) -> RecordId;
}

/// Backend dates arrive either as `2024-01-15` or as a full timestamp
/// (`2024-01-15T00:00:00.000000Z`). Only the calendar day matters here.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub mod api_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_api_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
    }
}

pub mod api_date_opt {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => parse_api_date(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
        }
    }
}

/// Prices come back from the backend as either numbers or decimal strings
pub mod amount {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(t) => t
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", t))),
        }
    }
}
