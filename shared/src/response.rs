//! Wire envelopes for list and aggregate endpoints
//!
//! The center API returns list payloads as `{ data, totalPages, totalResults }`
//! and aggregate payloads as flat camelCase objects. Amount fields may arrive
//! as `null` from the backend and are normalized to zero at deserialization.

use crate::util::null_as_zero;
use serde::{Deserialize, Serialize};

/// Paginated list payload
///
/// `totalPages` and `totalResults` describe the full filtered set, while
/// `data` carries only the requested page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// Items for the requested page
    pub data: Vec<T>,
    /// Total number of pages for the current filter (always >= 1)
    pub total_pages: u32,
    /// Total number of items for the current filter
    pub total_results: u64,
}

impl<T> Paginated<T> {
    /// Create a paginated payload from a page of items and the full-set count
    pub fn new(data: Vec<T>, total_results: u64, limit: u32) -> Self {
        Self {
            data,
            total_pages: total_pages_for(total_results, limit),
            total_results,
        }
    }

    /// Empty payload (one empty page)
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total_pages: 1,
            total_results: 0,
        }
    }

    /// Slice one page out of the full filtered set
    ///
    /// `page` is 1-based; out-of-range pages yield an empty `data` vector
    /// while the totals still describe the full set.
    pub fn from_full_set(items: Vec<T>, page: u32, limit: u32) -> Self {
        let total_results = items.len() as u64;
        let limit = limit.max(1);
        let page = page.max(1);
        // Offset in u64: page and limit come off the wire and their
        // product can exceed u32
        let start = u64::from(page - 1) * u64::from(limit);
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        let data: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Self {
            data,
            total_pages: total_pages_for(total_results, limit),
            total_results,
        }
    }
}

fn total_pages_for(total_results: u64, limit: u32) -> u32 {
    let limit = limit.max(1) as u64;
    if total_results > 0 {
        ((total_results + limit - 1) / limit) as u32
    } else {
        1
    }
}

/// Aggregate totals over student payments for a billing period
///
/// Returned by `GET /api/payments/total`. Amounts are VND in integer units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    /// Sum of final billed amounts across the full filtered set
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total: i64,
    /// Sum of amounts actually collected
    #[serde(default, deserialize_with = "null_as_zero")]
    pub paid: i64,
}

/// Aggregate income/expense totals over other-transactions for a period
///
/// Returned by `GET /api/transactions/summary`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Sum of income transaction amounts
    #[serde(default, deserialize_with = "null_as_zero")]
    pub income: i64,
    /// Sum of expense transaction amounts
    #[serde(default, deserialize_with = "null_as_zero")]
    pub expense: i64,
}
