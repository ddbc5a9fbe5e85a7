//! Service layer for backend calls.
//!
//! This module contains:
//! - Public board listing (`BoardQueryService`)
//! - Public board search (`BoardSearchService`)
//! - Admin student roster (`RosterService`)

mod board;
mod roster;
mod search;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::session::Session;
use crate::transport::{ApiRequest, Transport};
use crate::utils::envelope::decode_list;

pub use board::BoardQueryService;
pub(crate) use board::ensure_filterable;
pub use roster::RosterService;
pub use search::BoardSearchService;

/// Send an authenticated request and decode a list-shaped envelope.
async fn fetch_list<T: DeserializeOwned>(
    transport: &dyn Transport,
    session: &Session,
    request: ApiRequest,
    fallback: &str,
) -> Result<Vec<T>> {
    let token = session.credential()?;
    let response = transport.get(&request, token).await?;
    decode_list(response.status, &response.body, fallback)
}
