// Shared fixtures for the integration tests: page builders, a deterministic
// vitals estimator, and wiremock site setup.

use std::sync::Arc;
use std::time::Duration;

use seo_analyzer::{Config, LogFormat, LogLevel, SeoEngine, VitalsEstimate, VitalsEstimator};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Title of the well-formed page; exactly 45 characters.
#[allow(dead_code)]
pub const GOOD_TITLE: &str = "Acme Coffee Roasters | Fresh Coffee Delivered";

const SENTENCES: &[&str] = &[
    "We roast small batches of coffee every weekday morning.",
    "Each lot is cupped twice before it reaches our shelves.",
    "Farmers in Ethiopia and Colombia grow most of our beans.",
    "Light roasts keep the fruit and floral notes intact.",
    "Darker profiles bring out chocolate, caramel and toasted nut flavors.",
    "Subscriptions ship on the day the beans leave the roaster.",
    "Our brewing guides cover pour over, espresso and cold brew.",
    "Grind size matters more than most people expect at home.",
    "Water temperature around ninety degrees works for most methods.",
    "Wholesale partners receive training for their baristas on site.",
    "Packaging is compostable and the valve keeps oxygen out.",
    "Questions about an order reach a real person within hours.",
];

/// Roughly 360 words of plain prose split into twelve paragraphs.
#[allow(dead_code)]
pub fn article_body() -> String {
    (0..12)
        .map(|p| {
            let sentences: Vec<&str> = (0..3).map(|s| SENTENCES[(p * 3 + s) % SENTENCES.len()]).collect();
            format!("<p>{}</p>", sentences.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A page that satisfies nearly every check: metadata, one h1, ten images
/// with alt text, social tags, an Organization JSON-LD block and enough
/// content.
#[allow(dead_code)]
pub fn good_page(url: &str) -> String {
    let images: String = (0..10)
        .map(|i| {
            format!(
                r#"<img src="/img/bean-{i}.jpg" srcset="/img/bean-{i}@2x.jpg 2x" alt="Coffee bean lot {i}" width="400" height="300">"#
            )
        })
        .collect();
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <meta name="description" content="Acme Coffee Roasters sources, roasts and ships specialty coffee beans within 48 hours of roasting. Subscriptions, brewing guides and wholesale.">
  <meta name="keywords" content="coffee, beans, roasting">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="theme-color" content="#4a2c2a">
  <link rel="canonical" href="{url}">
  <link rel="apple-touch-icon" href="/apple-touch-icon.png">
  <link rel="stylesheet" href="/styles.css">
  <style>@media (max-width: 600px) {{ nav {{ display: none; }} }}</style>
  <meta property="og:title" content="Acme Coffee Roasters">
  <meta property="og:description" content="Specialty coffee, roasted to order.">
  <meta property="og:image" content="{url}og.png">
  <meta property="og:url" content="{url}">
  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:title" content="Acme Coffee Roasters">
  <meta name="twitter:description" content="Specialty coffee, roasted to order.">
  <meta name="twitter:image" content="{url}og.png">
  <script type="application/ld+json">
  {{"@context": "https://schema.org", "@type": "Organization", "name": "Acme Coffee Roasters", "url": "{url}", "logo": "{url}logo.png"}}
  </script>
</head>
<body>
  <nav><a href="/">Home</a> <a href="/shop">Shop</a></nav>
  <main>
    <h1>Fresh roasted coffee, delivered</h1>
    <time datetime="2025-05-20">May 20, 2025</time>
    <h2>Our beans</h2>
    <h2>Brewing</h2>
    <h3>Pour over</h3>
    <h3>Espresso</h3>
    {body}
    <ul><li>Single origin</li><li>Blends</li><li>Decaf</li></ul>
    {images}
    <iframe src="https://www.youtube.com/embed/abc123" title="Roastery tour"></iframe>
  </main>
  <a href="https://www.instagram.com/acmecoffee">Instagram</a>
  <a href="https://www.facebook.com/acmecoffee">Facebook</a>
  <a href="https://www.youtube.com/@acmecoffee">YouTube</a>
  <script async src="https://www.googletagmanager.com/gtag/js?id=G-ABC123XYZ9"></script>
</body>
</html>"##,
        title = GOOD_TITLE,
        url = url,
        body = article_body(),
        images = images,
    )
}

/// A page with no title, no h1 and no structured data.
#[allow(dead_code)]
pub fn bare_page() -> String {
    "<html><head></head><body><p>Welcome to the site. We sell things.</p>\
     <img src=\"/a.png\"></body></html>"
        .to_string()
}

/// Vitals estimator with fixed, good FID and CLS.
pub struct FixedEstimator;

impl VitalsEstimator for FixedEstimator {
    fn estimate(&self, fetch_latency_ms: u64) -> VitalsEstimate {
        VitalsEstimate::from_latency(fetch_latency_ms, 40.0, 0.02, "fixed test estimate")
    }
}

#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        timeout_seconds: 5,
        probe_timeout_seconds: 1,
        user_agent: "seo_analyzer_test/1.0".to_string(),
        vitals_seed: Some(7),
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}

/// Engine with the fixed estimator and short timeouts.
#[allow(dead_code)]
pub fn test_engine() -> SeoEngine {
    SeoEngine::new(&test_config())
        .expect("engine")
        .with_estimator(Arc::new(FixedEstimator))
}

/// Serves `html` at `/` and, when requested, 200s for the robots.txt and
/// sitemap.xml probes. Anything else answers 404.
#[allow(dead_code)]
pub async fn mount_site(server: &MockServer, html: String, robots: bool, sitemap: bool) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(html),
        )
        .mount(server)
        .await;
    for (present, file) in [(robots, "/robots.txt"), (sitemap, "/sitemap.xml")] {
        if present {
            Mock::given(method("HEAD"))
                .and(path(file))
                .respond_with(ResponseTemplate::new(200))
                .mount(server)
                .await;
        }
    }
}

/// Makes `file` answer slower than any probe timeout used in tests.
#[allow(dead_code)]
pub async fn mount_slow_probe(server: &MockServer, file: &str) {
    Mock::given(method("HEAD"))
        .and(path(file))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(server)
        .await;
}
