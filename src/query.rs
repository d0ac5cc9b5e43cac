//! Read-only query surface
//!
//! Collection queries are paginated with an offset/limit scheme so hosts
//! can expose them over RPC without unbounded responses. Scalar state is
//! readable directly through the accessor methods on the module.

use serde::{Deserialize, Serialize};

use crate::genesis::{BurnLimit, UsedNonce};
use crate::module::{CctpModule, Context, RemoteTokenMessenger, TokenPair};
use crate::protocol::Attester;
use crate::state::StateStore;

pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Offset/limit pagination request. A zero limit falls back to
/// [`DEFAULT_PAGE_LIMIT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

/// One page of results plus the total collection size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// Offset of the next page, absent on the last page.
    pub next_offset: Option<u64>,
    pub total: u64,
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let limit = if page.limit == 0 {
        DEFAULT_PAGE_LIMIT
    } else {
        page.limit
    };
    let items: Vec<T> = items
        .into_iter()
        .skip(page.offset as usize)
        .take(limit as usize)
        .collect();
    let end = page.offset + items.len() as u64;
    PageResponse {
        items,
        next_offset: (end < total).then_some(end),
        total,
    }
}

impl<S: StateStore, F, R> CctpModule<S, F, R> {
    pub fn query_attesters(&self, page: PageRequest) -> PageResponse<Attester> {
        paginate(self.get_all_attesters(&Context::default()), page)
    }

    pub fn query_token_pairs(&self, page: PageRequest) -> PageResponse<TokenPair> {
        paginate(self.get_all_token_pairs(&Context::default()), page)
    }

    pub fn query_remote_token_messengers(
        &self,
        page: PageRequest,
    ) -> PageResponse<RemoteTokenMessenger> {
        paginate(self.get_all_remote_token_messengers(&Context::default()), page)
    }

    pub fn query_used_nonces(&self, page: PageRequest) -> PageResponse<UsedNonce> {
        let nonces = self
            .get_used_nonces(&Context::default())
            .into_iter()
            .map(|(source_domain, nonce)| UsedNonce { source_domain, nonce })
            .collect();
        paginate(nonces, page)
    }

    pub fn query_per_message_burn_limits(&self, page: PageRequest) -> PageResponse<BurnLimit> {
        let limits = self
            .get_per_message_burn_limits(&Context::default())
            .into_iter()
            .map(|(denom, amount)| BurnLimit { denom, amount })
            .collect();
        paginate(limits, page)
    }
}
