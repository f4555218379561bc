use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reforge_protocols::Message;

use super::*;

struct MockProvider {
    response: String,
    fail: bool,
    delay_ms: u64,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    fn respond_with(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            fail: false,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            response: String::new(),
            fail: true,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn slow(response: &str, delay_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            fail: false,
            delay_ms,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

#[async_trait]
impl LLMProvider for MockProvider {
    fn id(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        messages: &[Message],
        _options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(user) = messages.last() {
            self.prompts.lock().push(user.content.clone());
        }
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail {
            return Err(ProviderError::Network("mock failure".to_string()));
        }
        Ok(self.response.clone())
    }
}

fn test_config() -> Arc<LLMConfig> {
    let mut config = LLMConfig::default();
    config.enhancement.enabled = true;
    config.enhancement.fill_quiet_period_ms = 50;
    config.enhancement.press_quiet_period_ms = 50;
    config.enhancement.pending_wait_budget_secs = 5;
    Arc::new(config)
}

fn session_with(provider: Arc<MockProvider>) -> EnhancementSession {
    EnhancementSession::new(provider, test_config())
}

fn click(selector: &str) -> Action {
    Action::Click {
        selector: selector.to_string(),
        button: None,
        click_count: None,
        target_info: None,
    }
}

fn fill(selector: &str, text: &str) -> Action {
    Action::Fill {
        selector: selector.to_string(),
        text: text.to_string(),
        target_info: None,
    }
}

fn ctx(start_time: u64) -> ActionContext {
    ActionContext::new(vec![], "", start_time)
}

#[tokio::test]
async fn test_click_enhancement_scenario() {
    let provider = MockProvider::respond_with("```js\nawait page.click('#submit');\n```");
    let session = session_with(provider);

    let result = session
        .enhance_action("page.click('#submit')", &click("#submit"), &ctx(1000))
        .await;
    assert_eq!(result, "await page.click('#submit');");
}

#[tokio::test]
async fn test_second_call_with_same_key_is_cached() {
    let provider = MockProvider::respond_with("```js\nenhanced();\n```");
    let session = session_with(provider.clone());
    let action = click("#submit");

    let first = session.enhance_action("orig();", &action, &ctx(1000)).await;
    let second = session.enhance_action("orig();", &action, &ctx(1000)).await;

    assert_eq!(first, "enhanced();");
    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_calls_with_same_key_join() {
    let provider = MockProvider::slow("```js\nenhanced();\n```", 100);
    let session = session_with(provider.clone());
    let action = click("#submit");

    let ctx_a = ctx(1000);
    let ctx_b = ctx(1000);
    let (a, b) = tokio::join!(
        session.enhance_action("orig();", &action, &ctx_a),
        session.enhance_action("orig();", &action, &ctx_b),
    );

    assert_eq!(a, "enhanced();");
    assert_eq!(a, b);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_different_keys_dispatch_independently() {
    let provider = MockProvider::respond_with("```js\nenhanced();\n```");
    let session = session_with(provider.clone());

    session
        .enhance_action("a();", &click("#a"), &ctx(1000))
        .await;
    session
        .enhance_action("b();", &click("#b"), &ctx(2000))
        .await;

    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_provider_failure_returns_exact_original() {
    let provider = MockProvider::failing();
    let session = session_with(provider.clone());
    let original = "await page.click('#submit');";

    let result = session
        .enhance_action(original, &click("#submit"), &ctx(1000))
        .await;

    assert_eq!(result, original);
    assert_eq!(provider.call_count(), 1);
    // Failures are not cached; nothing is pending afterwards either.
    assert!(session.cached_enhancement("click:1000").is_none());
    assert!(session.inner.state.lock().pending.is_empty());
}

#[tokio::test]
async fn test_disabled_session_never_calls_provider() {
    let provider = MockProvider::respond_with("```js\nenhanced();\n```");
    let config = Arc::new(LLMConfig::default());
    let session = EnhancementSession::new(provider.clone(), config);

    let result = session
        .enhance_action("orig();", &click("#a"), &ctx(1))
        .await;
    let script = session.enhance_complete_script("orig();").await;

    assert_eq!(result, "orig();");
    assert_eq!(script, "orig();");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_keystroke_kind_returns_original_immediately() {
    let provider = MockProvider::slow("```js\nenhanced();\n```", 200);
    let session = session_with(provider.clone());

    let result = session
        .enhance_action("fill('#q', 'r')", &fill("#q", "r"), &ctx(1000))
        .await;

    assert_eq!(result, "fill('#q', 'r')");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_debounce_dispatches_once_for_rapid_occurrences() {
    let provider = MockProvider::respond_with("```js\nawait page.fill('#q', 'rust');\n```");
    let session = session_with(provider.clone());

    // Three keystrokes on the same element inside the quiet period.
    session
        .enhance_action("fill r", &fill("#q", "r"), &ctx(1000))
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    session
        .enhance_action("fill ru", &fill("#q", "ru"), &ctx(1010))
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    session
        .enhance_action("fill rust", &fill("#q", "rust"), &ctx(1020))
        .await;

    // Let the quiet period elapse and the completion settle.
    tokio::time::sleep(Duration::from_millis(150)).await;
    session.wait_for_all_pending().await;

    assert_eq!(provider.call_count(), 1);

    // Keyed to the first occurrence's start time...
    let cached = session.cached_enhancement(&keys::completion_key("fill", 1000));
    assert_eq!(cached.as_deref(), Some("await page.fill('#q', 'rust');"));

    // ...but carrying the last occurrence's payload.
    let prompt = provider.last_prompt().unwrap();
    assert!(prompt.contains("rust"));
    assert!(prompt.contains("fill rust"));
}

#[tokio::test]
async fn test_debounce_tracks_elements_separately() {
    let provider = MockProvider::respond_with("```js\nenhanced();\n```");
    let session = session_with(provider.clone());

    session
        .enhance_action("a", &fill("#a", "x"), &ctx(1000))
        .await;
    session
        .enhance_action("b", &fill("#b", "y"), &ctx(1001))
        .await;

    tokio::time::sleep(Duration::from_millis(150)).await;
    session.wait_for_all_pending().await;

    assert_eq!(provider.call_count(), 2);
    assert!(session
        .cached_enhancement(&keys::completion_key("fill", 1000))
        .is_some());
    assert!(session
        .cached_enhancement(&keys::completion_key("fill", 1001))
        .is_some());
}

#[tokio::test]
async fn test_wait_for_all_pending_is_a_barrier() {
    let provider = MockProvider::slow("```js\nenhanced();\n```", 100);
    let session = session_with(provider.clone());

    let task = {
        let session = session.clone();
        tokio::spawn(async move {
            session
                .enhance_action("orig();", &click("#a"), &ctx(1000))
                .await
        })
    };
    // Let the spawned call register its pending request.
    tokio::time::sleep(Duration::from_millis(10)).await;

    session.wait_for_all_pending().await;

    assert_eq!(
        session.cached_enhancement("click:1000").as_deref(),
        Some("enhanced();")
    );
    assert_eq!(task.await.unwrap(), "enhanced();");
}

#[tokio::test]
async fn test_wait_for_all_pending_with_nothing_pending() {
    let provider = MockProvider::respond_with("x");
    let session = session_with(provider);
    session.wait_for_all_pending().await;
}

#[tokio::test]
async fn test_script_failure_returns_exact_original() {
    let provider = MockProvider::failing();
    let session = session_with(provider);
    let original = "await page.click('#a');\nawait page.click('#b');";

    let result = session.enhance_complete_script(original).await;
    assert_eq!(result, original);
}

#[tokio::test]
async fn test_script_safety_check_rejects_dropped_operations() {
    let original = "await page.click('#a');\n".repeat(10);
    let rewrite = format!("```js\n{}```", "await page.click('#a');\n".repeat(8));

    let provider = MockProvider::respond_with(&rewrite);
    let session = session_with(provider);

    let result = session.enhance_complete_script(&original).await;
    assert_eq!(result, original);
}

#[tokio::test]
async fn test_script_safety_check_accepts_at_threshold() {
    let original = "await page.click('#a');\n".repeat(10);
    let kept = "await page.click('#a');\n".repeat(9);
    let rewrite = format!("```js\n{kept}```");

    let provider = MockProvider::respond_with(&rewrite);
    let session = session_with(provider);

    let result = session.enhance_complete_script(&original).await;
    assert_eq!(result, kept.trim());
}

#[tokio::test]
async fn test_script_cache_keyed_by_content() {
    let provider = MockProvider::respond_with("```js\nawait page.click('#a');\n```");
    let session = session_with(provider.clone());
    let original = "await page.click('#a');";

    let first = session.enhance_complete_script(original).await;
    let second = session.enhance_complete_script(original).await;

    assert_eq!(first, second);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_unfenced_response_used_whole() {
    let provider = MockProvider::respond_with("  await page.click('#submit');  ");
    let session = session_with(provider);

    let result = session
        .enhance_action("orig();", &click("#submit"), &ctx(1))
        .await;
    assert_eq!(result, "await page.click('#submit');");
}

#[tokio::test]
async fn test_empty_response_falls_back_to_original() {
    let provider = MockProvider::respond_with("   ");
    let session = session_with(provider);

    let result = session
        .enhance_action("orig();", &click("#submit"), &ctx(1))
        .await;
    assert_eq!(result, "orig();");
}
