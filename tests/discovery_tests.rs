use qboard::discovery::{discover, parse_queue_key, queue_names_from_keys};
use qboard::queues::QueueVariant;

mod helpers;
use helpers::{bull_config, disconnected_store, keys};

// =========================================================================================
// 1. KEY PARSING
// =========================================================================================

mod parsing {
    use super::*;

    #[test]
    fn extracts_the_middle_segment() {
        assert_eq!(parse_queue_key("bull", "bull:video:waiting"), Some("video"));
    }

    #[test]
    fn name_stops_at_the_first_colon_after_the_prefix() {
        assert_eq!(parse_queue_key("bull", "bull:video:1:lock"), Some("video"));
    }

    #[test]
    fn rejects_keys_without_a_suffix() {
        assert_eq!(parse_queue_key("bull", "bull:video"), None);
        assert_eq!(parse_queue_key("bull", "bull:video:"), None);
    }

    #[test]
    fn rejects_empty_name_segments() {
        assert_eq!(parse_queue_key("bull", "bull::waiting"), None);
    }

    #[test]
    fn rejects_the_bare_prefix() {
        assert_eq!(parse_queue_key("bull", "bull"), None);
        assert_eq!(parse_queue_key("bull", "bull:"), None);
    }

    #[test]
    fn rejects_keys_under_a_different_prefix() {
        assert_eq!(parse_queue_key("bull", "other:video:waiting"), None);
    }

    #[test]
    fn prefix_containing_a_colon_is_matched_literally() {
        assert_eq!(parse_queue_key("app:bull", "app:bull:mail:wait"), Some("mail"));
        assert_eq!(parse_queue_key("app:bull", "app:other:mail:wait"), None);
    }
}

// =========================================================================================
// 2. NAME EXTRACTION (dedupe + sort)
// =========================================================================================

mod extraction {
    use super::*;

    #[test]
    fn worked_example_from_the_key_layout() {
        let ks = keys(&[
            "myprefix:queueA:waiting",
            "myprefix:queueA:active",
            "myprefix:queueB:waiting",
        ]);
        assert_eq!(
            queue_names_from_keys("myprefix", &ks),
            vec!["queueA".to_string(), "queueB".to_string()]
        );
    }

    #[test]
    fn names_are_deduplicated_and_sorted() {
        let ks = keys(&[
            "bull:zeta:wait",
            "bull:alpha:active",
            "bull:zeta:failed",
            "bull:mid:wait",
            "bull:alpha:wait",
        ]);
        assert_eq!(
            queue_names_from_keys("bull", &ks),
            vec!["alpha".to_string(), "mid".to_string(), "zeta".to_string()]
        );
    }

    #[test]
    fn empty_listing_yields_no_names() {
        assert!(queue_names_from_keys("bull", &[]).is_empty());
    }

    #[test]
    fn malformed_keys_are_skipped() {
        let ks = keys(&["bull:good:wait", "bull:orphan", "bull::wait", "bull"]);
        assert_eq!(queue_names_from_keys("bull", &ks), vec!["good".to_string()]);
    }

    #[test]
    fn extraction_is_idempotent_over_an_unchanged_key_set() {
        let ks = keys(&["bull:b:wait", "bull:a:wait", "bull:a:active"]);
        let first = queue_names_from_keys("bull", &ks);
        let second = queue_names_from_keys("bull", &ks);
        assert_eq!(first, second);
    }
}

// =========================================================================================
// 3. DEGRADED MODE (store unreachable)
// =========================================================================================

mod degraded {
    use super::*;

    #[tokio::test]
    async fn listing_failure_yields_an_empty_board() {
        let store = disconnected_store();
        let config = bull_config("bull", QueueVariant::Bull);

        let handles = discover(&store, &config).await;
        assert!(handles.is_empty());
    }

    #[tokio::test]
    async fn listing_failure_is_not_variant_specific() {
        let store = disconnected_store();
        let config = bull_config("bull", QueueVariant::BullMq);

        let handles = discover(&store, &config).await;
        assert!(handles.is_empty());
    }
}
