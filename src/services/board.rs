// src/services/board.rs

//! Public board list service.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{BoardFilter, BoardItem, Tag};
use crate::session::Session;
use crate::transport::{ApiRequest, Transport};

const BOARD_PATH: &str = "/api/chats";
const FALLBACK_MESSAGE: &str = "failed to load board posts";

/// Service for listing the public board with date/tag filters.
#[derive(Clone)]
pub struct BoardQueryService {
    transport: Arc<dyn Transport>,
}

impl BoardQueryService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the board list, preserving server ordering.
    ///
    /// Fails with `Unauthenticated` or `InvalidFilter` before anything is
    /// sent.
    pub async fn fetch_board(&self, session: &Session, filter: &BoardFilter) -> Result<Vec<BoardItem>> {
        session.credential()?;
        if let Some(tag) = &filter.tag {
            ensure_filterable(tag)?;
        }

        let request = Self::build_request(filter);
        let items: Vec<BoardItem> =
            super::fetch_list(self.transport.as_ref(), session, request, FALLBACK_MESSAGE).await?;
        log::debug!("Fetched {} board items", items.len());
        Ok(items)
    }

    fn build_request(filter: &BoardFilter) -> ApiRequest {
        let mut request = ApiRequest::new(BOARD_PATH);
        if let Some(order) = filter.date_order {
            request = request.param("datefilter", order.as_str());
        }
        if let Some(tag) = &filter.tag {
            request = request.param("tag", tag.as_str());
        }
        request
    }
}

/// Reject tags the list endpoint does not filter by.
pub(crate) fn ensure_filterable(tag: &Tag) -> Result<()> {
    if tag.is_filterable() {
        Ok(())
    } else {
        Err(AppError::invalid_filter(format!(
            "only ADOPT or REJECT can be used as a tag filter, got {}",
            tag
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::view::{TagClass, format_date_in};
    use crate::models::DateOrder;
    use crate::transport::RawResponse;
    use crate::transport::testing::FakeTransport;
    use chrono::Utc;

    const ONE_ITEM: &str = r#"{"success":true,"data":[{"chatRoomId":1,"best":true,"likeCnt":3,"dislikeCnt":0,"title":"t","tag":"ADOPT","author":"a","createdAt":"2024-01-05T00:00:00Z"}]}"#;

    fn service(fake: &Arc<FakeTransport>) -> BoardQueryService {
        BoardQueryService::new(Arc::clone(fake) as Arc<dyn Transport>)
    }

    #[tokio::test]
    async fn fetch_recent_decodes_items() {
        let fake = Arc::new(FakeTransport::ok(ONE_ITEM));
        let items = service(&fake)
            .fetch_board(&Session::new("tok"), &BoardFilter::new(DateOrder::Recent))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(TagClass::of(&items[0]), TagClass::Best);
        assert_eq!(format_date_in(&items[0].created_at, &Utc), "2024.01.05");

        let sent = fake.requests();
        assert_eq!(sent[0].path, "/api/chats");
        assert_eq!(sent[0].query, vec![("datefilter".to_string(), "RECENT".to_string())]);
        assert_eq!(fake.tokens(), vec!["tok".to_string()]);
    }

    #[tokio::test]
    async fn absent_params_are_omitted() {
        let fake = Arc::new(FakeTransport::ok(r#"{"success":true,"data":[]}"#));
        service(&fake)
            .fetch_board(&Session::new("tok"), &BoardFilter::default())
            .await
            .unwrap();
        assert!(fake.requests()[0].query.is_empty());
    }

    #[tokio::test]
    async fn tag_filter_is_sent() {
        let fake = Arc::new(FakeTransport::ok(r#"{"success":true,"data":[]}"#));
        let filter = BoardFilter::new(DateOrder::Oldest).with_tag(Tag::Reject);
        service(&fake).fetch_board(&Session::new("tok"), &filter).await.unwrap();

        let sent = &fake.requests()[0];
        assert_eq!(sent.query_value("datefilter"), Some("OLDEST"));
        assert_eq!(sent.query_value("tag"), Some("REJECT"));
    }

    #[tokio::test]
    async fn non_filterable_tags_never_reach_the_network() {
        let fake = Arc::new(FakeTransport::ok(ONE_ITEM));
        for tag in [Tag::InProgress, Tag::End, Tag::Other("BOGUS".into())] {
            let filter = BoardFilter::default().with_tag(tag);
            let result = service(&fake).fetch_board(&Session::new("tok"), &filter).await;
            assert!(matches!(result, Err(AppError::InvalidFilter(_))));
        }
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn missing_token_fails_first() {
        let fake = Arc::new(FakeTransport::ok(ONE_ITEM));
        let filter = BoardFilter::default().with_tag(Tag::InProgress);
        let result = service(&fake).fetch_board(&Session::anonymous(), &filter).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
        assert!(fake.requests().is_empty());
    }

    #[tokio::test]
    async fn rejection_uses_fallback_message() {
        let fake = Arc::new(
            FakeTransport::ok("").then(Default::default(), RawResponse::new(403, r#"{"success":false}"#)),
        );
        let err = service(&fake)
            .fetch_board(&Session::new("tok"), &BoardFilter::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }
}
