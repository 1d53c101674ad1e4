//! # Pagination over Typed Maps
//!
//! Bounded, ordered pages over a [`Map`].
//!
//! ## Cursor Semantics
//!
//! - `next_key` is the map key of the first entry NOT returned. Feeding it
//!   back as `key` resumes exactly there (inclusive), in either direction.
//! - `next_key == None` means the page reached the end of the data, so K
//!   entries paged with limit L take exactly ceil(K / L) requests.
//! - `key` and `offset` are mutually exclusive.
//! - `total` is only computed for offset-based requests with `count_total`;
//!   key-based requests would have to rescan from the start to count.

use super::collections::{Map, ValueCodec};
use super::entities::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use super::errors::ModuleError;
use crate::ports::{key_successor, KeyValueStore, Order};
use serde::{Deserialize, Serialize};

/// Page selection sent with a bulk query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Resume cursor from a previous `PageResponse::next_key`.
    pub key: Option<Vec<u8>>,
    /// Number of entries to skip. Only valid without `key`.
    pub offset: u64,
    /// Page size. Zero selects the default limit.
    pub limit: u64,
    /// Report the total number of entries (offset-based requests only).
    pub count_total: bool,
    /// Iterate in descending key order.
    pub reverse: bool,
}

impl PageRequest {
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Request the page that starts at a previous `next_key`.
    pub fn after(key: Vec<u8>, limit: u64) -> Self {
        Self {
            key: Some(key),
            limit,
            ..Default::default()
        }
    }
}

/// Continuation data returned with a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Cursor for the next page; `None` at the end of the data.
    pub next_key: Option<Vec<u8>>,
    /// Total entry count, when requested and computed.
    pub total: Option<u64>,
}

/// Default and maximum page sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PageLimits {
    /// Effective page size for a requested limit.
    pub fn clamp(&self, requested: u64) -> u64 {
        if requested == 0 {
            self.default_limit
        } else {
            requested.min(self.max_limit)
        }
    }
}

/// Read one page of `map`, converting each entry with `convert`.
pub fn paginate<S, V, C, T, F>(
    store: &S,
    map: &Map<V, C>,
    request: Option<&PageRequest>,
    limits: PageLimits,
    mut convert: F,
) -> Result<(Vec<T>, PageResponse), ModuleError>
where
    S: KeyValueStore + ?Sized,
    C: ValueCodec<V>,
    F: FnMut(Vec<u8>, V) -> Result<T, ModuleError>,
{
    let default_request = PageRequest::default();
    let request = request.unwrap_or(&default_request);

    if request.key.is_some() && request.offset > 0 {
        return Err(ModuleError::InvalidRequest(
            "either offset or key is expected, got both".to_string(),
        ));
    }

    let limit = usize::try_from(limits.clamp(request.limit))
        .map_err(|_| ModuleError::InvalidRequest("page limit out of range".to_string()))?;
    let order = if request.reverse {
        Order::Descending
    } else {
        Order::Ascending
    };

    match &request.key {
        Some(key) => paginate_by_key(store, map, key, order, limit, &mut convert),
        None => {
            let offset = usize::try_from(request.offset)
                .map_err(|_| ModuleError::InvalidRequest("offset out of range".to_string()))?;
            paginate_by_offset(store, map, offset, limit, order, request.count_total, &mut convert)
        }
    }
}

fn paginate_by_key<S, V, C, T, F>(
    store: &S,
    map: &Map<V, C>,
    key: &[u8],
    order: Order,
    limit: usize,
    convert: &mut F,
) -> Result<(Vec<T>, PageResponse), ModuleError>
where
    S: KeyValueStore + ?Sized,
    C: ValueCodec<V>,
    F: FnMut(Vec<u8>, V) -> Result<T, ModuleError>,
{
    // The cursor entry itself belongs to this page in both directions.
    let upper;
    let iter = match order {
        Order::Ascending => map.range(store, Some(key), None, order)?,
        Order::Descending => {
            upper = key_successor(key);
            map.range(store, None, Some(upper.as_slice()), order)?
        }
    };

    let mut items = Vec::with_capacity(limit.min(DEFAULT_PAGE_LIMIT as usize));
    let mut next_key = None;
    for entry in iter {
        let (entry_key, value) = entry?;
        if items.len() == limit {
            next_key = Some(entry_key);
            break;
        }
        items.push(convert(entry_key, value)?);
    }

    Ok((
        items,
        PageResponse {
            next_key,
            total: None,
        },
    ))
}

fn paginate_by_offset<S, V, C, T, F>(
    store: &S,
    map: &Map<V, C>,
    offset: usize,
    limit: usize,
    order: Order,
    count_total: bool,
    convert: &mut F,
) -> Result<(Vec<T>, PageResponse), ModuleError>
where
    S: KeyValueStore + ?Sized,
    C: ValueCodec<V>,
    F: FnMut(Vec<u8>, V) -> Result<T, ModuleError>,
{
    let end = offset.saturating_add(limit);
    let mut items = Vec::with_capacity(limit.min(DEFAULT_PAGE_LIMIT as usize));
    let mut next_key = None;
    let mut count = 0usize;

    for entry in map.range(store, None, None, order)? {
        let (entry_key, value) = entry?;
        count += 1;
        if count <= offset {
            continue;
        }
        if count <= end {
            items.push(convert(entry_key, value)?);
            continue;
        }
        if next_key.is_none() {
            next_key = Some(entry_key);
        }
        if !count_total {
            break;
        }
    }

    Ok((
        items,
        PageResponse {
            next_key,
            total: count_total.then_some(count as u64),
        },
    ))
}
