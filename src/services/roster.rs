// src/services/roster.rs

//! Admin student roster service.

use std::sync::Arc;

use crate::error::Result;
use crate::models::Student;
use crate::session::Session;
use crate::transport::{ApiRequest, Transport};

const USERS_PATH: &str = "/api/admin/users";
const FALLBACK_MESSAGE: &str = "failed to load students";

/// Service for the admin user listing.
#[derive(Clone)]
pub struct RosterService {
    transport: Arc<dyn Transport>,
}

impl RosterService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch every student visible to the current admin.
    pub async fn list_students(&self, session: &Session) -> Result<Vec<Student>> {
        let students: Vec<Student> = super::fetch_list(
            self.transport.as_ref(),
            session,
            ApiRequest::new(USERS_PATH),
            FALLBACK_MESSAGE,
        )
        .await?;
        log::info!("Loaded {} students", students.len());
        Ok(students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::transport::testing::FakeTransport;

    #[tokio::test]
    async fn lists_students() {
        let fake = Arc::new(FakeTransport::ok(
            r#"{"success":true,"data":[{"userId":1,"email":"a@x.kr","name":"A"},{"userId":2,"email":"b@x.kr","name":"B"}]}"#,
        ));
        let service = RosterService::new(Arc::clone(&fake) as Arc<dyn Transport>);
        let students = service.list_students(&Session::new("tok")).await.unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[1].email, "b@x.kr");
        assert_eq!(fake.paths(), vec!["/api/admin/users".to_string()]);
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let fake = Arc::new(FakeTransport::ok(""));
        let service = RosterService::new(Arc::clone(&fake) as Arc<dyn Transport>);
        let err = service.list_students(&Session::new("tok")).await.unwrap_err();
        assert!(matches!(err, AppError::RequestRejected { .. }));
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn requires_token() {
        let fake = Arc::new(FakeTransport::ok(""));
        let service = RosterService::new(Arc::clone(&fake) as Arc<dyn Transport>);
        assert!(matches!(
            service.list_students(&Session::anonymous()).await,
            Err(AppError::Unauthenticated)
        ));
    }
}
