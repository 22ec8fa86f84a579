//! Domain models and data structures
//!
//! This module contains the receipt types accepted by the API and the
//! response bodies it returns. Validation lives here too, since it only
//! looks at the shape of the data.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Largest accepted total or price, in cents (999,999,999.99).
const MAX_AMOUNT_CENTS: i64 = 99_999_999_999;

/// Purchase date as sent by the client (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PurchaseDate(pub String);

impl PurchaseDate {
    pub fn parse(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT).ok()
    }
}

impl From<&str> for PurchaseDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Purchase time as sent by the client (`HH:MM`, 24-hour)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PurchaseTime(pub String);

impl PurchaseTime {
    pub fn parse(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.0, TIME_FORMAT).ok()
    }

    /// Minutes since midnight, if the time parses.
    pub fn minutes_since_midnight(&self) -> Option<u32> {
        self.parse().map(|t| t.hour() * 60 + t.minute())
    }
}

impl From<&str> for PurchaseTime {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single line item on a receipt
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    pub price: Decimal,
}

impl Item {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.short_description.trim().is_empty() {
            return Err(ValidationError::ItemDescription);
        }
        if !is_valid_amount(self.price) {
            return Err(ValidationError::ItemPrice);
        }
        Ok(())
    }
}

/// Receipt submitted for processing
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Receipt {
    pub retailer: String,
    #[serde(rename = "purchaseDate")]
    pub purchase_date: PurchaseDate,
    #[serde(rename = "purchaseTime")]
    pub purchase_time: PurchaseTime,
    pub items: Vec<Item>,
    pub total: Decimal,
}

impl Receipt {
    /// Checks every field a scoring pass relies on.
    ///
    /// Fields are checked in wire order and the first failure is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retailer.trim().is_empty() {
            return Err(ValidationError::Retailer);
        }
        if self.purchase_date.parse().is_none() {
            return Err(ValidationError::PurchaseDate(self.purchase_date.0.clone()));
        }
        if self.purchase_time.parse().is_none() {
            return Err(ValidationError::PurchaseTime(self.purchase_time.0.clone()));
        }
        if self.items.is_empty() {
            return Err(ValidationError::MissingItems);
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate().map_err(|source| ValidationError::Item {
                position: index + 1,
                source: Box::new(source),
            })?;
        }
        if !is_valid_amount(self.total) {
            return Err(ValidationError::Total);
        }
        Ok(())
    }
}

/// Amounts are non-negative, bounded, and carry at most two decimal places.
fn is_valid_amount(amount: Decimal) -> bool {
    !amount.is_sign_negative()
        && amount <= Decimal::new(MAX_AMOUNT_CENTS, 2)
        && amount.normalize().scale() <= 2
}

/// Returned when a receipt is processed
#[derive(Debug, Serialize, Deserialize)]
pub struct ReceiptResponse {
    pub id: Uuid,
}

/// Returned when querying points for a receipt
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// Health check body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn item(description: &str, price: &str) -> Item {
        Item {
            short_description: description.to_string(),
            price: price.parse().unwrap(),
        }
    }

    pub fn target_receipt() -> Receipt {
        Receipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".into(),
            purchase_time: "13:01".into(),
            items: vec![
                item("Mountain Dew 12PK", "6.49"),
                item("Emils Cheese Pizza", "12.25"),
                item("Knorr Creamy Chicken", "1.26"),
                item("Doritos Nacho Cheese", "3.35"),
                item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            total: "35.35".parse().unwrap(),
        }
    }

    pub fn corner_market_receipt() -> Receipt {
        Receipt {
            retailer: "M&M Corner Market".to_string(),
            purchase_date: "2022-03-20".into(),
            purchase_time: "14:33".into(),
            items: vec![
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
            ],
            total: "9.00".parse().unwrap(),
        }
    }
}
