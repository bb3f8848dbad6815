//! Inbound frame action payload
//!
//! Clients POST a JSON body with an `untrustedData` object. Only the pressed
//! button and the callback URL drive navigation; the previous page travels in
//! the URL's `page` query parameter so no server-side session is needed.

use crate::catalog::Catalog;
use crate::error::{FrameError, Result};
use crate::navigation::NavigationRequest;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

/// Query parameter carrying the page the viewer was looking at
pub const PAGE_PARAM: &str = "page";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    pub untrusted_data: UntrustedData,

    /// Signed message, not verified
    #[serde(default)]
    pub trusted_data: Option<Value>,
}

/// Client-reported action data
///
/// Only `buttonIndex` and `url` are interpreted; the rest is carried as raw
/// JSON so that an unexpected shape there never fails a request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default)]
    pub fid: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub message_hash: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub network: Option<Value>,
    /// Kept loosely typed so that a wrong type reports as invalid input
    #[serde(default)]
    pub button_index: Option<Value>,
    #[serde(default)]
    pub cast_id: Option<Value>,
}

impl FrameRequest {
    /// Parse a raw request body
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Farcaster id of the viewer, when the client sent one
    pub fn fid(&self) -> Option<u64> {
        match self.untrusted_data.fid.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The 1-based index of the pressed button
    pub fn pressed_button(&self) -> Result<u32> {
        let value = self
            .untrusted_data
            .button_index
            .as_ref()
            .ok_or_else(|| FrameError::InvalidInput("missing buttonIndex".to_string()))?;

        let index = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
        .ok_or_else(|| FrameError::InvalidInput(format!("buttonIndex is not a positive integer: {}", value)))?;

        if index == 0 {
            return Err(FrameError::InvalidInput("buttonIndex must be at least 1".to_string()));
        }

        u32::try_from(index)
            .map_err(|_| FrameError::InvalidInput(format!("buttonIndex {} is too large", index)))
    }

    /// The unclamped previous page encoded in the callback URL
    pub fn previous_page(&self) -> Result<i64> {
        let url = self
            .untrusted_data
            .url
            .as_deref()
            .ok_or_else(|| FrameError::InvalidInput("missing url".to_string()))?;
        previous_page_from_url(url)
    }

    /// Decode the navigation request
    ///
    /// A previous page outside the catalog is invalid input: the pressed
    /// button cannot be checked against a page that does not exist.
    pub fn navigation_request(&self, catalog: &Catalog) -> Result<NavigationRequest> {
        let pressed_button = self.pressed_button()?;
        let page = self.previous_page()?;
        let previous_page = u32::try_from(page)
            .ok()
            .filter(|p| (1..=catalog.size()).contains(p))
            .ok_or_else(|| {
                FrameError::InvalidInput(format!(
                    "page {} is outside the guide (1..={})",
                    page,
                    catalog.size()
                ))
            })?;
        Ok(NavigationRequest::new(previous_page, pressed_button))
    }
}

/// Read the `page` query parameter of a callback URL
///
/// The value's leading integer is used, so `4abc` and `4.5` both mean page 4.
/// A missing parameter, or one that does not start with a number, means
/// page 1. The URL itself must parse.
pub fn previous_page_from_url(raw: &str) -> Result<i64> {
    let url = Url::parse(raw)?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == PAGE_PARAM)
        .and_then(|(_, value)| leading_integer(&value))
        .unwrap_or(1);
    Ok(page)
}

/// Parse an optionally signed run of leading digits, saturating at the i64 range
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
