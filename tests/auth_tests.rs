use qboard::dashboard::auth::{session_id_from_cookie_header, SessionStore, SESSION_COOKIE};
use qboard::store::StoreError;

mod helpers;
use helpers::disconnected_store;

// =========================================================================================
// 1. COOKIE PARSING
// =========================================================================================

mod cookies {
    use super::*;

    #[test]
    fn finds_the_session_cookie_among_others() {
        let header = format!("theme=dark; {}=abc-123; lang=en", SESSION_COOKIE);
        assert_eq!(
            session_id_from_cookie_header(&header),
            Some("abc-123".to_string())
        );
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(session_id_from_cookie_header("theme=dark; lang=en"), None);
        assert_eq!(session_id_from_cookie_header(""), None);
    }

    #[test]
    fn cookie_name_must_match_exactly() {
        let header = format!("x{}=abc", SESSION_COOKIE);
        assert_eq!(session_id_from_cookie_header(&header), None);
    }

    #[test]
    fn tolerates_whitespace_between_pairs() {
        let header = format!("  {}=id-1 ; theme=dark", SESSION_COOKIE);
        assert_eq!(
            session_id_from_cookie_header(&header),
            Some("id-1".to_string())
        );
    }
}

// =========================================================================================
// 2. SESSION STORE (degraded)
// =========================================================================================

mod sessions {
    use super::*;

    #[tokio::test]
    async fn create_fails_when_the_store_is_unreachable() {
        let sessions = SessionStore::new(disconnected_store(), 3600);

        let err = sessions.create("admin").await.expect_err("store is down");
        assert!(matches!(err, StoreError::Unavailable));
    }

    #[tokio::test]
    async fn validate_fails_when_the_store_is_unreachable() {
        let sessions = SessionStore::new(disconnected_store(), 3600);

        let err = sessions
            .validate("some-id")
            .await
            .expect_err("store is down");
        assert!(matches!(err, StoreError::Unavailable));
    }
}
