use std::sync::OnceLock;

use async_trait::async_trait;
use feed_rs::parser;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::domain::FeedEntry;
use crate::errors::{NewsTagError, NewsTagResult};
use crate::sources::traits::FeedSource;

pub struct RssAtomSource {
    client: Client,
}

impl RssAtomSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_and_parse(&self, url: &str) -> NewsTagResult<feed_rs::model::Feed> {
        Url::parse(url).map_err(|e| NewsTagError::InvalidUrl(format!("{}: {}", url, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NewsTagError::HttpStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let bytes = response.bytes().await?;

        Self::parse_bytes(&bytes)
    }

    fn parse_bytes(bytes: &[u8]) -> NewsTagResult<feed_rs::model::Feed> {
        parser::parse(bytes).map_err(|e| NewsTagError::FeedParse(e.to_string()))
    }

    fn entries_from_feed(feed: feed_rs::model::Feed) -> Vec<FeedEntry> {
        feed.entries
            .into_iter()
            .map(|entry| {
                let title = entry
                    .title
                    .map(|t| t.content.trim().to_string())
                    .unwrap_or_default();

                let link = entry
                    .links
                    .into_iter()
                    .next()
                    .map(|l| l.href)
                    .unwrap_or_default();

                // Yahoo! topic feeds ship no description, so this is often None.
                // feed-rs marks every RSS description as text/html and hands back
                // entity-decoded text, so only flatten when real tags are present.
                let summary = entry.summary.map(|s| {
                    if contains_markup(&s.content) {
                        html_to_text(&s.content)
                    } else {
                        s.content.trim().to_string()
                    }
                });

                FeedEntry::new(title, summary, link)
            })
            .collect()
    }

    /// Parse entries from raw feed bytes
    pub fn entries_from_bytes(bytes: &[u8]) -> NewsTagResult<Vec<FeedEntry>> {
        Self::parse_bytes(bytes).map(Self::entries_from_feed)
    }
}

#[async_trait]
impl FeedSource for RssAtomSource {
    async fn fetch_entries(&self, url: &str) -> NewsTagResult<Vec<FeedEntry>> {
        let parsed = self.fetch_and_parse(url).await?;
        Ok(Self::entries_from_feed(parsed))
    }
}

/// True when the text holds at least one well-formed start, end or void tag
fn contains_markup(text: &str) -> bool {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("tag pattern is valid")
    })
    .is_match(text)
}

/// Extract plain text from HTML content
fn html_to_text(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
        // Add space after block elements to preserve word boundaries
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" | "li" => text.push(' '),
                _ => {}
            }
        }
    }

    // Collapse whitespace and trim
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;

    // Sample RSS feed (based on Yahoo! News topics format)
    const SAMPLE_RSS: &[u8] = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Yahoo!ニュース・トピックス - IT</title>
    <link>https://news.yahoo.co.jp/categories/it</link>
    <description>Yahoo! JAPANのニュース・トピックスで取り上げている最新の見出しを提供しています。</description>
    <item>
      <title>新型スマホ 予約開始</title>
      <link>https://news.yahoo.co.jp/pickup/0000001</link>
      <pubDate>Tue, 14 Oct 2025 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>生成AI 規制案まとまる</title>
      <link>https://news.yahoo.co.jp/pickup/0000002</link>
      <description><![CDATA[<p>政府は生成AIの<b>利用指針</b>を公表した。</p><p>年内施行へ。</p>]]></description>
    </item>
    <item>
      <title>通信障害 復旧</title>
      <link>https://news.yahoo.co.jp/pickup/0000003</link>
      <description>   </description>
    </item>
  </channel>
</rss>"#
        .as_bytes();

    const SAMPLE_ATOM: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Tech Blog</title>
  <link href="https://example.com/"/>
  <id>https://example.com/feed.atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
  <entry>
    <title>Understanding WebAssembly</title>
    <link href="https://example.com/posts/wasm-intro"/>
    <id>https://example.com/posts/wasm-intro</id>
    <updated>2024-01-15T12:00:00Z</updated>
    <summary>A binary instruction format for a stack-based virtual machine.</summary>
  </entry>
</feed>"#;

    fn rss_with_items(count: usize) -> String {
        let items: String = (1..=count)
            .map(|i| {
                format!(
                    "<item><title>Item {i}</title><link>https://example.com/{i}</link></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Many</title>{items}</channel></rss>"#
        )
    }

    #[test]
    fn test_rss_missing_summary_uses_title() {
        let entries = RssAtomSource::entries_from_bytes(SAMPLE_RSS).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].title, "新型スマホ 予約開始");
        assert_eq!(entries[0].summary, "新型スマホ 予約開始");
        assert_eq!(entries[0].link, "https://news.yahoo.co.jp/pickup/0000001");
    }

    #[test]
    fn test_rss_html_summary_flattened() {
        let entries = RssAtomSource::entries_from_bytes(SAMPLE_RSS).unwrap();
        assert_eq!(entries[1].summary, "政府は生成AIの利用指針を公表した。 年内施行へ。");
    }

    #[test]
    fn test_rss_blank_summary_uses_title() {
        let entries = RssAtomSource::entries_from_bytes(SAMPLE_RSS).unwrap();
        assert_eq!(entries[2].summary, "通信障害 復旧");
    }

    #[test]
    fn test_atom_summary_and_link() {
        let entries = RssAtomSource::entries_from_bytes(SAMPLE_ATOM).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Understanding WebAssembly");
        assert_eq!(
            entries[0].summary,
            "A binary instruction format for a stack-based virtual machine."
        );
        assert_eq!(entries[0].link, "https://example.com/posts/wasm-intro");
    }

    #[test]
    fn test_entries_keep_document_order() {
        let entries = RssAtomSource::entries_from_bytes(rss_with_items(12).as_bytes()).unwrap();
        assert_eq!(entries.len(), 12);
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles[0], "Item 1");
        assert_eq!(titles[11], "Item 12");
    }

    #[test]
    fn test_invalid_bytes_is_parse_error() {
        let err = RssAtomSource::entries_from_bytes(b"definitely not xml").unwrap_err();
        assert!(matches!(err, NewsTagError::FeedParse(_)));
    }

    #[test]
    fn test_escaped_angle_bracket_in_plain_summary_kept() {
        let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Biz</title>
  <item><title>T1</title><link>https://example.com/1</link><description>売上はA&lt;B社の順 と発表</description></item>
  <item><title>T2</title><link>https://example.com/2</link><description>1 &lt; 2 &amp;&amp; 3 &gt; 2</description></item>
</channel></rss>"#;

        let entries = RssAtomSource::entries_from_bytes(rss.as_bytes()).unwrap();
        assert_eq!(entries[0].summary, "売上はA<B社の順 と発表");
        assert_eq!(entries[1].summary, "1 < 2 && 3 > 2");
    }

    #[test]
    fn test_contains_markup() {
        assert!(contains_markup("<p>text</p>"));
        assert!(contains_markup("line<br/>break"));
        assert!(contains_markup(r#"<a href="https://example.com">link</a>"#));
        assert!(!contains_markup("A<B社の順"));
        assert!(!contains_markup("1 < 2 && 3 > 2"));
        assert!(!contains_markup("plain text"));
    }

    #[test]
    fn test_html_to_text_collapses_whitespace() {
        assert_eq!(
            html_to_text("<div>one</div>\n\n<div>two   three</div>"),
            "one two three"
        );
        assert_eq!(html_to_text("a<br>b"), "a b");
    }

    async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route(
                "/feed.xml",
                get(|| async {
                    (
                        [(reqwest::header::CONTENT_TYPE, "application/rss+xml")],
                        SAMPLE_RSS,
                    )
                }),
            )
            .route(
                "/missing.xml",
                get(|| async { (StatusCode::NOT_FOUND, "gone").into_response() }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    #[tokio::test]
    async fn test_fetch_entries_over_http() {
        let (base, server_task) = spawn_test_server().await;
        let source = RssAtomSource::new(Client::new());

        let entries = source
            .fetch_entries(&format!("{base}/feed.xml"))
            .await
            .expect("feed should be fetched");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].title, "生成AI 規制案まとまる");

        server_task.abort();
    }

    #[tokio::test]
    async fn test_fetch_entries_error_status_propagates() {
        let (base, server_task) = spawn_test_server().await;
        let source = RssAtomSource::new(Client::new());

        let err = source
            .fetch_entries(&format!("{base}/missing.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsTagError::HttpStatus { status: 404, .. }));

        server_task.abort();
    }

    #[tokio::test]
    async fn test_fetch_entries_invalid_url() {
        let source = RssAtomSource::new(Client::new());
        let err = source.fetch_entries("not a url").await.unwrap_err();
        assert!(matches!(err, NewsTagError::InvalidUrl(_)));
    }
}
