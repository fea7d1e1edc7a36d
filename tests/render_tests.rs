// tests/render_tests.rs

use std::{
    io,
    sync::{Arc, Mutex},
};

use catalog::{
    error::RenderError,
    render::{
        HtmlSanitizer, MarkdownConverter, NO_DESCRIPTION, Rendered, SafeRenderer, TracingWarnLog,
        WarnLog, render_markdown,
    },
    utils::{
        html::{
            ALLOWED_ATTRIBUTES, ALLOWED_TAGS, AllowList, AllowListSanitizer,
            DESCRIPTION_ALLOW_LIST,
        },
        markdown::{Dialect, GfmConverter, MarkdownOptions},
    },
};

/// Collects warnings instead of emitting them.
#[derive(Default)]
struct RecordingLog(Mutex<Vec<String>>);

impl RecordingLog {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl WarnLog for RecordingLog {
    fn warn(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

/// `fmt` writer target that keeps everything in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_warnings<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    logs.contents()
}

struct FailingConverter;

impl MarkdownConverter for FailingConverter {
    fn to_html(&self, _text: &str, _dialect: Dialect) -> Result<String, RenderError> {
        Err(RenderError::Convert("unexpected end of input".to_string()))
    }
}

struct FailingSanitizer;

impl HtmlSanitizer for FailingSanitizer {
    fn sanitize(&self, _html: &str, _allow: &AllowList) -> Result<String, RenderError> {
        Err(RenderError::Sanitize("parser exploded".to_string()))
    }
}

fn recording_renderer(options: MarkdownOptions) -> (SafeRenderer, Arc<RecordingLog>) {
    let log = Arc::new(RecordingLog::default());
    let renderer = SafeRenderer::new(
        GfmConverter::new(options),
        AllowListSanitizer,
        Arc::clone(&log),
    );
    (renderer, log)
}

#[test]
fn blank_input_yields_placeholder() {
    let (renderer, log) = recording_renderer(MarkdownOptions::default());

    for text in [None, Some(""), Some("   "), Some("\n\t \r\n"), Some("\u{3000}")] {
        assert_eq!(renderer.render(text), NO_DESCRIPTION, "input {:?}", text);
    }
    assert_eq!(render_markdown(None), "No description provided.");
    assert!(log.messages().is_empty());
}

#[test]
fn blank_input_skips_conversion() {
    let log = Arc::new(RecordingLog::default());
    let renderer = SafeRenderer::new(FailingConverter, AllowListSanitizer, Arc::clone(&log));

    assert_eq!(renderer.render(Some("  ")), NO_DESCRIPTION);
    assert!(log.messages().is_empty());
}

#[test]
fn script_is_stripped_with_its_content() {
    let html = render_markdown(Some("**bold** <script>alert(1)</script>"));

    assert!(html.contains("<p><strong>bold</strong>"));
    assert!(!html.contains("<script"));
    assert!(!html.contains("alert(1)"));
}

#[test]
fn allowed_constructs_survive() {
    let source = "# Title\n\
                  ###### Small\n\n\
                  Some *em*, **strong**, `code` and ~~gone~~.\n\n\
                  > quoted\n\n\
                  - one\n\
                  - two\n\n\
                  1. first\n\n\
                  ---\n\n\
                  [docs](https://example.com \"Docs\")\n";

    let html = render_markdown(Some(source));

    for fragment in [
        "<h1>Title</h1>",
        "<h6>Small</h6>",
        "<em>em</em>",
        "<strong>strong</strong>",
        "<code>code</code>",
        "<del>gone</del>",
        "<blockquote>",
        "<ul>",
        "<ol>",
        "<li>one</li>",
        "<hr>",
        r#"<a href="https://example.com" title="Docs">docs</a>"#,
    ] {
        assert!(html.contains(fragment), "missing {} in {}", fragment, html);
    }
}

#[test]
fn code_blocks_lose_language_class() {
    let html = render_markdown(Some("```rust\nlet x = 1;\n```"));

    assert!(html.contains("<pre><code>let x = 1;"));
    assert!(!html.contains("class="));
}

#[test]
fn disallowed_tags_are_stripped_not_escaped() {
    let html = render_markdown(Some("<div><span>inside</span></div>\n\nafter"));

    assert!(html.contains("inside"));
    assert!(!html.contains("<div"));
    assert!(!html.contains("<span"));
    assert!(!html.contains("&lt;"));
}

#[test]
fn gfm_tables_and_task_lists_are_reduced_to_allowed_tags() {
    let html = render_markdown(Some("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n"));

    assert!(!html.contains("<table"));
    assert!(!html.contains("<td"));
    assert!(!html.contains("<input"));
    assert!(html.contains('1'));
    assert!(html.contains("<li>"));
    assert!(html.contains("done"));
}

#[test]
fn dangerous_attributes_and_urls_are_removed() {
    let html = render_markdown(Some(
        "<a href=\"https://example.com\" onclick=\"steal()\">x</a> [y](javascript:alert(1))",
    ));

    assert!(!html.contains("onclick"));
    assert!(!html.contains("steal"));
    assert!(!html.contains("javascript"));
    assert!(html.contains(r#"href="https://example.com""#));
}

#[test]
fn rel_and_target_are_kept_as_written() {
    let html = render_markdown(Some(
        r#"<a href="https://example.com" rel="nofollow" target="_blank">out</a>"#,
    ));

    assert!(html.contains(r#"rel="nofollow""#));
    assert!(html.contains(r#"target="_blank""#));
    assert!(!html.contains("noopener"));
}

#[test]
fn soft_breaks_follow_hard_wrap_option() {
    let wrapped = render_markdown(Some("line one\nline two"));
    assert!(wrapped.contains("<br>"));

    let (renderer, _) = recording_renderer(MarkdownOptions {
        hard_wrap: false,
        ..MarkdownOptions::default()
    });
    let unwrapped = renderer.render(Some("line one\nline two"));
    assert!(!unwrapped.contains("<br"));
    assert!(unwrapped.contains("line one\nline two"));
}

#[test]
fn sanitizing_sanitized_output_changes_nothing() {
    let source = "## Notes & caveats\n\n\
                  A \"quoted\" [link](https://example.com/a?b=1&c=2 \"t\") and `x < y`.\n\n\
                  ```\nfn main() {}\n```\n\n\
                  * <em>inline</em>\n";

    let once = render_markdown(Some(source));
    let twice = AllowListSanitizer
        .sanitize(&once, &DESCRIPTION_ALLOW_LIST)
        .unwrap();

    assert_eq!(once, twice);
}

#[test]
fn allow_listed_html_passes_through_unchanged() {
    let html = r#"<p><strong>a</strong> and <em>b</em> <a href="https://example.com" title="t">c</a></p>"#;

    let cleaned = AllowListSanitizer
        .sanitize(html, &DESCRIPTION_ALLOW_LIST)
        .unwrap();

    assert_eq!(cleaned, html);
}

#[test]
fn sanitizer_honours_a_custom_allow_list() {
    let allow = AllowList::new(&["p", "script"], &["title"]);

    let cleaned = AllowListSanitizer
        .sanitize(r#"<p title="t"><strong>x</strong></p>"#, &allow)
        .unwrap();

    assert_eq!(cleaned, r#"<p title="t">x</p>"#);
}

#[test]
fn conversion_failure_returns_raw_text_and_warns() {
    let log = Arc::new(RecordingLog::default());
    let renderer = SafeRenderer::new(FailingConverter, AllowListSanitizer, Arc::clone(&log));

    let raw = "raw *text* <b>kept</b>";
    assert_eq!(renderer.render(Some(raw)), raw);

    let messages = log.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Markdown render failed:"));
    assert!(messages[0].contains("unexpected end of input"));
}

#[test]
fn sanitization_failure_returns_raw_text_not_partial_html() {
    let log = Arc::new(RecordingLog::default());
    let renderer = SafeRenderer::new(GfmConverter::default(), FailingSanitizer, Arc::clone(&log));

    assert_eq!(renderer.render(Some("**bold**")), "**bold**");
    assert!(log.messages()[0].contains("parser exploded"));
}

#[test]
fn oversized_input_falls_back_to_raw_text() {
    let (renderer, log) = recording_renderer(MarkdownOptions {
        max_input_bytes: 8,
        ..MarkdownOptions::default()
    });

    let raw = "**longer than eight bytes**";
    assert_eq!(renderer.render(Some(raw)), raw);
    assert!(log.messages()[0].contains("limit is 8 bytes"));

    assert_eq!(renderer.render(Some("*short*")), "<p><em>short</em></p>\n");
}

#[test]
fn commonmark_dialect_has_no_strikethrough() {
    let converter = GfmConverter::default();

    let gfm = converter.to_html("~~x~~", Dialect::Gfm).unwrap();
    let plain = converter.to_html("~~x~~", Dialect::CommonMark).unwrap();

    assert!(gfm.contains("<del>x</del>"));
    assert!(!plain.contains("<del>"));
}

#[test]
fn renders_concurrently() {
    let expected = render_markdown(Some("- a\n- **b**"));

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| render_markdown(Some("- a\n- **b**"))))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn render_detailed_reports_the_path_taken() {
    let renderer = SafeRenderer::new(
        FailingConverter,
        AllowListSanitizer,
        Arc::new(RecordingLog::default()),
    );

    assert_eq!(
        renderer.render_detailed(None),
        Rendered::Html(NO_DESCRIPTION.to_string())
    );

    let failed = renderer.render_detailed(Some("<b>raw</b>"));
    assert!(failed.is_fallback());
    assert_eq!(failed, Rendered::Fallback("<b>raw</b>".to_string()));

    let ok = SafeRenderer::default().render_detailed(Some("*fine*"));
    assert!(!ok.is_fallback());
    assert_eq!(ok.into_string(), "<p><em>fine</em></p>\n");
}

#[test]
fn tracing_log_emits_a_warn_event() {
    let output = capture_warnings(|| TracingWarnLog.warn("Markdown render failed: boom"));

    assert!(output.contains("WARN"), "{}", output);
    assert!(output.contains("Markdown render failed: boom"), "{}", output);
}

#[test]
fn default_renderer_warns_through_tracing_on_fallback() {
    let renderer = SafeRenderer::with_defaults(MarkdownOptions {
        max_input_bytes: 8,
        ..MarkdownOptions::default()
    });

    let mut rendered = String::new();
    let output = capture_warnings(|| rendered = renderer.render(Some("**too long for it**")));

    assert_eq!(rendered, "**too long for it**");
    assert!(output.contains("WARN"), "{}", output);
    assert!(output.contains("limit is 8 bytes"), "{}", output);
}

#[test]
fn equal_and_different_allow_lists_sanitize_independently() {
    let html = r#"<p><strong>a</strong> <a href="https://example.com" rel="me">b</a></p>"#;
    let rebuilt = AllowList::new(ALLOWED_TAGS, ALLOWED_ATTRIBUTES);
    let narrow = AllowList::new(&["p"], &[]);

    let from_static = AllowListSanitizer
        .sanitize(html, &DESCRIPTION_ALLOW_LIST)
        .unwrap();
    let from_rebuilt = AllowListSanitizer.sanitize(html, &rebuilt).unwrap();
    let from_narrow = AllowListSanitizer.sanitize(html, &narrow).unwrap();

    assert_eq!(from_static, html);
    assert_eq!(from_rebuilt, from_static);
    assert_eq!(from_narrow, "<p>a b</p>");
}
