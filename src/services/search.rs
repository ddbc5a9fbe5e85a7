// src/services/search.rs

//! Public board free-text search service.

use std::sync::Arc;

use crate::error::Result;
use crate::models::BoardItem;
use crate::session::Session;
use crate::transport::{ApiRequest, Transport};

const SEARCH_PATH: &str = "/api/chats/search";
const FALLBACK_MESSAGE: &str = "search failed";

/// Service for searching the public board.
#[derive(Clone)]
pub struct BoardSearchService {
    transport: Arc<dyn Transport>,
}

impl BoardSearchService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Search the board. `query` is forwarded verbatim; callers only search
    /// with non-empty text.
    pub async fn search_board(&self, session: &Session, query: &str) -> Result<Vec<BoardItem>> {
        let request = ApiRequest::new(SEARCH_PATH).param("query", query);
        let items: Vec<BoardItem> =
            super::fetch_list(self.transport.as_ref(), session, request, FALLBACK_MESSAGE).await?;
        log::debug!("Search '{}' returned {} items", query, items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::transport::testing::FakeTransport;

    #[tokio::test]
    async fn query_is_forwarded_verbatim() {
        let fake = Arc::new(FakeTransport::ok(r#"{"success":true,"data":[]}"#));
        let service = BoardSearchService::new(Arc::clone(&fake) as Arc<dyn Transport>);
        service
            .search_board(&Session::new("tok"), " ADOPT  dorm ")
            .await
            .unwrap();

        let sent = &fake.requests()[0];
        assert_eq!(sent.path, "/api/chats/search");
        assert_eq!(sent.query_value("query"), Some(" ADOPT  dorm "));
        assert_eq!(sent.query.len(), 1);
    }

    #[tokio::test]
    async fn unauthenticated_search_is_not_dispatched() {
        let fake = Arc::new(FakeTransport::ok(r#"{"success":true,"data":[]}"#));
        let service = BoardSearchService::new(Arc::clone(&fake) as Arc<dyn Transport>);
        let result = service.search_board(&Session::anonymous(), "x").await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn failed_search_uses_search_fallback() {
        let fake = Arc::new(FakeTransport::ok(r#"{"success":false,"message":""}"#));
        let service = BoardSearchService::new(Arc::clone(&fake) as Arc<dyn Transport>);
        let err = service.search_board(&Session::new("tok"), "x").await.unwrap_err();
        assert_eq!(err.to_string(), "search failed");
    }
}
