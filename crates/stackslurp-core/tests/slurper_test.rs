use async_trait::async_trait;
use serde_json::{json, Value};
use stackslurp_core::{
    DeliveryConfig, IterationOutcome, Slurper, SlurperConfig, SourceProvider,
    StackExchangeProvider,
};
use stackslurp_rackspace::{IdentityClient, QueueClient};
use stackslurp_stackexchange::QuestionSource;
use stackslurp_types::{
    AuthToken, EnqueueReceipt, OriginId, RawQuestion, Result, SlurpError, TagFilter, Watermark,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Search source returning a fixed page for every site
struct FakeExchange {
    questions: Vec<RawQuestion>,
    calls: AtomicUsize,
    seen_since: Mutex<Vec<i64>>,
}

impl FakeExchange {
    fn new(questions: Vec<RawQuestion>) -> Arc<Self> {
        Arc::new(Self {
            questions,
            calls: AtomicUsize::new(0),
            seen_since: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl QuestionSource for FakeExchange {
    async fn search(
        &self,
        since: Watermark,
        _tags: &TagFilter,
        _site: &str,
        _api_key: Option<&str>,
    ) -> Result<Vec<RawQuestion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_since.lock().unwrap().push(since.as_secs());
        Ok(self.questions.clone())
    }
}

/// Search source that always fails
struct BrokenExchange {
    calls: AtomicUsize,
}

#[async_trait]
impl QuestionSource for BrokenExchange {
    async fn search(
        &self,
        _since: Watermark,
        _tags: &TagFilter,
        site: &str,
        _api_key: Option<&str>,
    ) -> Result<Vec<RawQuestion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SlurpError::SourceQueryFailed {
            site: site.to_string(),
            cause: "HTTP 502".to_string(),
        })
    }
}

#[derive(Default)]
struct FakeIdentity {
    calls: AtomicUsize,
    reject: bool,
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn authenticate(&self, _username: &str, _api_key: &str) -> Result<AuthToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(SlurpError::AuthenticationFailed("HTTP 401".to_string()));
        }
        Ok(AuthToken::new("seemslegit"))
    }
}

struct FakeQueue {
    client_id: Uuid,
    batches: Mutex<Vec<Vec<Value>>>,
    attempts: AtomicUsize,
    reject: bool,
}

impl FakeQueue {
    fn new(reject: bool) -> Arc<Self> {
        Arc::new(Self {
            client_id: Uuid::new_v4(),
            batches: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            reject,
        })
    }

    fn sent(&self) -> Vec<Value> {
        self.batches.lock().unwrap().iter().flatten().cloned().collect()
    }
}

#[async_trait]
impl QueueClient for FakeQueue {
    fn client_id(&self) -> Uuid {
        self.client_id
    }

    async fn enqueue(
        &self,
        messages: &[Value],
        queue: &str,
        _endpoint: &str,
        token: &AuthToken,
        _ttl: u32,
    ) -> Result<EnqueueReceipt> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        assert_eq!(token.as_str(), "seemslegit");
        if self.reject {
            return Err(SlurpError::EnqueueFailed {
                queue: queue.to_string(),
                status: Some(503),
                body: "unavailable".to_string(),
            });
        }
        self.batches.lock().unwrap().push(messages.to_vec());
        Ok(EnqueueReceipt {
            partial: false,
            resources: messages
                .iter()
                .enumerate()
                .map(|(i, _)| format!("/v1/queues/{}/messages/{}", queue, i))
                .collect(),
        })
    }
}

fn two_questions() -> Vec<RawQuestion> {
    serde_json::from_value(json!([
        {
            "answer_count": 0,
            "creation_date": 1388784322,
            "is_answered": false,
            "last_activity_date": 1388784322,
            "link": "http://stackoverflow.com/questions/20912948/color-detection-using-opencv-python",
            "owner": {"display_name": "Vipul Sharma", "user_id": 2840136},
            "question_id": 20912948,
            "score": 0,
            "tags": ["python", "opencv"],
            "title": "color detection using opencv python",
            "view_count": 11
        },
        {
            "answer_count": 1,
            "creation_date": 1388773319,
            "is_answered": false,
            "last_activity_date": 1388785067,
            "link": "http://stackoverflow.com/questions/20910273/is-there-an-alternative-to-parse-qs-that-handles-semi-colons",
            "owner": {"display_name": "Kyle Kelley", "user_id": 700228},
            "question_id": 20910273,
            "score": 3,
            "tags": ["python", "http", "mocking", "stackexchange", "httpretty"],
            "title": "Is there an alternative to parse_qs that handles semi-colons?",
            "view_count": 25
        }
    ]))
    .unwrap()
}

fn questions_dated(dates: &[i64]) -> Vec<RawQuestion> {
    dates
        .iter()
        .enumerate()
        .map(|(i, d)| RawQuestion::new(i as u64, format!("http://blog.fict.io/{}", i), "t", *d))
        .collect()
}

fn config(since: i64) -> SlurperConfig {
    SlurperConfig::new(
        Watermark::new(since),
        DeliveryConfig::new(
            "testing",
            "https://dfw.queues.api.rackspacecloud.com/v1/",
            "user",
            "rackspace_api",
        ),
    )
    .with_poll_interval(Duration::from_millis(10))
}

fn provider(source: Arc<dyn QuestionSource>, sites: &[&str]) -> Arc<dyn SourceProvider> {
    Arc::new(
        StackExchangeProvider::new(
            source,
            sites.iter().map(|s| s.to_string()).collect(),
            TagFilter::from(vec!["python".to_string(), "ruby".to_string()]),
        )
        .with_api_key(Some("THE_SE_KEY".to_string())),
    )
}

#[tokio::test]
async fn test_initial_watermark_is_configured_start() {
    let slurper = Slurper::new(
        provider(FakeExchange::new(Vec::new()), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        FakeQueue::new(false),
        config(1388594252),
    )
    .unwrap();

    assert_eq!(slurper.watermark(), Watermark::new(1388594252));
    assert_eq!(slurper.iterations(), 0);
}

#[tokio::test]
async fn test_end_to_end_two_questions() {
    let exchange = FakeExchange::new(two_questions());
    let identity = Arc::new(FakeIdentity::default());
    let queue = FakeQueue::new(false);

    let mut slurper = Slurper::new(
        provider(exchange.clone(), &["stackoverflow", "serverfault"]),
        identity.clone(),
        queue.clone(),
        config(1388594252),
    )
    .unwrap();

    let outcome = slurper.run_once().await;

    assert_eq!(slurper.watermark().as_secs(), 1388784322 + 1);
    assert_eq!(*exchange.seen_since.lock().unwrap(), vec![1388594252, 1388594252]);
    assert_eq!(identity.calls.load(Ordering::SeqCst), 1);

    match outcome {
        IterationOutcome::Delivered { events, report } => {
            assert_eq!(events, 4);
            assert_eq!(report.batches, 1);
            assert_eq!(report.messages, 4);
            assert_eq!(report.resources, 4);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let sent = queue.sent();
    let origin_ids: Vec<&Value> = sent.iter().map(|e| &e["origin_id"]).collect();
    assert!(origin_ids.contains(&&json!(20912948)));
    assert!(origin_ids.contains(&&json!(20910273)));
    assert_eq!(sent[0]["reporter"], json!(format!("stackslurp v{}", env!("CARGO_PKG_VERSION"))));
    assert_eq!(sent[1]["extra"]["owner"]["user_id"], json!(700228));

    let parsed: stackslurp_types::Event = serde_json::from_value(sent[0].clone()).unwrap();
    assert_eq!(parsed.origin_id, Some(OriginId::Numeric(20912948)));
}

#[tokio::test]
async fn test_next_iteration_queries_from_advanced_watermark() {
    let exchange = FakeExchange::new(two_questions());
    let mut slurper = Slurper::new(
        provider(exchange.clone(), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        FakeQueue::new(false),
        config(1388594252),
    )
    .unwrap();

    slurper.run_once().await;
    slurper.run_once().await;

    assert_eq!(
        *exchange.seen_since.lock().unwrap(),
        vec![1388594252, 1388784323]
    );
}

#[tokio::test]
async fn test_watermark_uses_max_creation_date() {
    let mut slurper = Slurper::new(
        provider(FakeExchange::new(questions_dated(&[100, 250, 90])), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        FakeQueue::new(false),
        config(1),
    )
    .unwrap();

    slurper.run_once().await;
    assert_eq!(slurper.watermark().as_secs(), 251);
}

#[tokio::test]
async fn test_empty_results_leave_watermark_and_send_nothing() {
    let identity = Arc::new(FakeIdentity::default());
    let queue = FakeQueue::new(false);
    let mut slurper = Slurper::new(
        provider(FakeExchange::new(Vec::new()), &["stackoverflow"]),
        identity.clone(),
        queue.clone(),
        config(1388594252),
    )
    .unwrap();

    let outcome = slurper.run_once().await;

    assert!(matches!(outcome, IterationOutcome::Idle));
    assert_eq!(slurper.watermark().as_secs(), 1388594252);
    assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    assert_eq!(queue.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_zero_sites_is_a_no_op() {
    let exchange = FakeExchange::new(two_questions());
    let queue = FakeQueue::new(false);
    let mut slurper = Slurper::new(
        provider(exchange.clone(), &[]),
        Arc::new(FakeIdentity::default()),
        queue.clone(),
        config(7),
    )
    .unwrap();

    assert!(matches!(slurper.run_once().await, IterationOutcome::Idle));
    assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
    assert_eq!(slurper.watermark().as_secs(), 7);
}

#[tokio::test]
async fn test_fetch_failure_keeps_watermark_and_skips_send() {
    let identity = Arc::new(FakeIdentity::default());
    let queue = FakeQueue::new(false);
    let mut slurper = Slurper::new(
        provider(
            Arc::new(BrokenExchange { calls: AtomicUsize::new(0) }),
            &["stackoverflow"],
        ),
        identity.clone(),
        queue.clone(),
        config(1388594252),
    )
    .unwrap();

    let outcome = slurper.run_once().await;

    match outcome {
        IterationOutcome::FetchFailed(SlurpError::SourceQueryFailed { site, .. }) => {
            assert_eq!(site, "stackoverflow")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(slurper.watermark().as_secs(), 1388594252);
    assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    assert_eq!(queue.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_failure_does_not_stop_loop() {
    let exchange = Arc::new(BrokenExchange { calls: AtomicUsize::new(0) });
    let mut slurper = Slurper::new(
        provider(exchange.clone(), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        FakeQueue::new(false),
        config(1388594252),
    )
    .unwrap();

    slurper
        .run_until(tokio::time::sleep(Duration::from_millis(200)))
        .await;

    assert!(slurper.iterations() >= 2);
    assert!(exchange.calls.load(Ordering::SeqCst) >= 2);
    assert_eq!(slurper.watermark().as_secs(), 1388594252);
}

#[tokio::test]
async fn test_send_failure_does_not_roll_back_watermark() {
    let queue = FakeQueue::new(true);
    let mut slurper = Slurper::new(
        provider(FakeExchange::new(two_questions()), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        queue.clone(),
        config(1388594252),
    )
    .unwrap();

    let outcome = slurper.run_once().await;

    match outcome {
        IterationOutcome::SendFailed { events, error } => {
            assert_eq!(events, 2);
            assert!(matches!(error, SlurpError::EnqueueFailed { status: Some(503), .. }));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(slurper.watermark().as_secs(), 1388784323);
    assert_eq!(queue.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_send_failure_does_not_stop_loop() {
    let queue = FakeQueue::new(true);
    let mut slurper = Slurper::new(
        provider(FakeExchange::new(two_questions()), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        queue.clone(),
        config(1388594252),
    )
    .unwrap();

    slurper
        .run_until(tokio::time::sleep(Duration::from_millis(200)))
        .await;

    assert!(slurper.iterations() >= 2);
    assert!(queue.attempts.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_authentication_failure_skips_enqueue() {
    let identity = Arc::new(FakeIdentity {
        calls: AtomicUsize::new(0),
        reject: true,
    });
    let queue = FakeQueue::new(false);
    let mut slurper = Slurper::new(
        provider(FakeExchange::new(two_questions()), &["stackoverflow"]),
        identity,
        queue.clone(),
        config(1388594252),
    )
    .unwrap();

    let outcome = slurper.run_once().await;

    assert!(matches!(
        outcome,
        IterationOutcome::SendFailed { error: SlurpError::AuthenticationFailed(_), .. }
    ));
    assert!(outcome.is_failure());
    assert_eq!(queue.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_batches_are_bounded_and_ordered() {
    let dates: Vec<i64> = (1..=23).collect();
    let identity = Arc::new(FakeIdentity::default());
    let queue = FakeQueue::new(false);
    let mut slurper = Slurper::new(
        provider(FakeExchange::new(questions_dated(&dates)), &["stackoverflow"]),
        identity.clone(),
        queue.clone(),
        config(0),
    )
    .unwrap();

    slurper.run_once().await;

    let batches = queue.batches.lock().unwrap().clone();
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|b| b.len() <= 10));
    assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![10, 10, 3]);
    assert_eq!(identity.calls.load(Ordering::SeqCst), 1);

    let urls: Vec<String> = queue
        .sent()
        .iter()
        .map(|e| e["url"].as_str().unwrap().to_string())
        .collect();
    let expected: Vec<String> = (0..23).map(|i| format!("http://blog.fict.io/{}", i)).collect();
    assert_eq!(urls, expected);
}

#[tokio::test]
async fn test_invalid_config_is_rejected_at_construction() {
    let bad = SlurperConfig::new(
        Watermark::new(1),
        DeliveryConfig::new("", "https://queues.example.com", "user", "key"),
    );
    let result = Slurper::new(
        provider(FakeExchange::new(Vec::new()), &["stackoverflow"]),
        Arc::new(FakeIdentity::default()),
        FakeQueue::new(false),
        bad,
    );

    assert!(matches!(result, Err(SlurpError::ConfigInvalid(_))));
}
