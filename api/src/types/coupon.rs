//! Coupon payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a coupon discounts the price
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discountValue` is a percentage (0-100)
    Percentage,
    /// `discountValue` is an amount in reais
    FixedAmount,
}

/// A discount coupon
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Coupon id
    pub id: String,
    /// Code typed by the buyer
    pub code: String,
    /// Discount kind
    pub discount_type: DiscountType,
    /// Percentage or amount, per `discount_type`
    pub discount_value: f64,
    /// Restricts the coupon to one event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Usage cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    /// Times used so far
    #[serde(default)]
    pub used_count: u32,
}

/// `POST /coupons/validate` body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    /// Code typed by the buyer
    pub code: String,
    /// Event being purchased
    pub event_id: String,
}

/// Result of a coupon check
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    /// Whether the coupon applies
    pub valid: bool,
    /// The coupon, when found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
    /// Discount in reais
    #[serde(default)]
    pub discount_amount: f64,
    /// Price after discount
    #[serde(default)]
    pub final_amount: f64,
    /// Server explanation, mostly for invalid coupons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
