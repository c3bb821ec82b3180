//! Distributed tracing support.
//!
//! # Responsibilities
//! - Name a trace segment per inbound request from its `Host`
//! - Extract or start an X-Ray style trace context (`X-Amzn-Trace-Id`)
//! - Run the request inside a `segment` span and echo the trace id back
//! - Derive subsegment headers for downstream calls
//!
//! # Design Decisions
//! - Segments are `tracing` spans; exporting them is left to the subscriber
//! - A malformed incoming header starts a fresh trace instead of failing
//!   the request

use std::fmt;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Request, State},
    http::{header::HOST, HeaderValue},
    middleware::Next,
    response::Response,
};
use rand::Rng;
use tracing::{field, Instrument};

use crate::config::TracingConfig;
use crate::http::RequestIdExt;
use crate::observability::metrics;

/// Header carrying the trace context.
pub const TRACE_HEADER: &str = "x-amzn-trace-id";

/// Chooses the segment name for an inbound request.
///
/// The request host becomes the name when it matches `recognized_hosts`;
/// otherwise the fallback name is used.
#[derive(Debug, Clone)]
pub struct SegmentNamer {
    fallback: String,
    recognized_hosts: String,
}

impl SegmentNamer {
    pub fn new(fallback: impl Into<String>, recognized_hosts: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            recognized_hosts: recognized_hosts.into(),
        }
    }

    pub fn from_config(config: &TracingConfig) -> Self {
        Self::new(&config.fallback_name, &config.recognized_hosts)
    }

    pub fn name<'a>(&'a self, host: Option<&'a str>) -> &'a str {
        match host {
            Some(h) if wildcard_match(&self.recognized_hosts, h) => h,
            _ => &self.fallback,
        }
    }
}

/// Case-insensitive wildcard match: `*` matches any run, `?` one character.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    if pattern == "*" {
        return true;
    }

    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    let t: Vec<char> = text.to_lowercase().chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|c| *c == '*')
}

/// Parsed `X-Amzn-Trace-Id` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceHeader {
    pub root: String,
    pub parent: Option<String>,
    pub sampled: Option<bool>,
}

impl TraceHeader {
    /// Parse a header value. Returns `None` when no valid root is present.
    pub fn parse(value: &str) -> Option<Self> {
        let mut root = None;
        let mut parent = None;
        let mut sampled = None;

        for part in value.split(';') {
            let Some((key, val)) = part.trim().split_once('=') else {
                continue;
            };
            match key.trim() {
                "Root" if is_valid_root(val.trim()) => root = Some(val.trim().to_string()),
                "Parent" if is_hex_id(val.trim()) => parent = Some(val.trim().to_string()),
                "Sampled" => {
                    sampled = match val.trim() {
                        "1" => Some(true),
                        "0" => Some(false),
                        _ => None,
                    }
                }
                _ => {}
            }
        }

        Some(Self {
            root: root?,
            parent,
            sampled,
        })
    }

    /// Start a new trace.
    pub fn new_root(sampled: bool) -> Self {
        Self {
            root: new_trace_id(),
            parent: None,
            sampled: Some(sampled),
        }
    }

    /// Header for a downstream call made within this trace.
    pub fn subsegment(&self) -> Self {
        Self {
            root: self.root.clone(),
            parent: Some(new_segment_id()),
            sampled: self.sampled,
        }
    }

    /// The value echoed back to the caller: root and sampling decision only.
    pub fn response_value(&self) -> String {
        match self.sampled {
            Some(s) => format!("Root={};Sampled={}", self.root, u8::from(s)),
            None => format!("Root={}", self.root),
        }
    }
}

impl fmt::Display for TraceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root={}", self.root)?;
        if let Some(parent) = &self.parent {
            write!(f, ";Parent={}", parent)?;
        }
        if let Some(sampled) = self.sampled {
            write!(f, ";Sampled={}", u8::from(sampled))?;
        }
        Ok(())
    }
}

fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_hex_id(s: &str) -> bool {
    is_hex(s, 16)
}

fn is_valid_root(s: &str) -> bool {
    let mut parts = s.split('-');
    matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some("1"), Some(epoch), Some(unique), None) if is_hex(epoch, 8) && is_hex(unique, 24)
    )
}

/// `1-<epoch seconds, 8 hex>-<96 random bits, 24 hex>`
pub fn new_trace_id() -> String {
    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let unique: u128 = rand::thread_rng().gen::<u128>() & ((1u128 << 96) - 1);
    format!("1-{:08x}-{:024x}", epoch as u32, unique)
}

/// 64 random bits as 16 hex digits.
pub fn new_segment_id() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}

/// State for the segment middleware.
#[derive(Debug, Clone)]
pub struct SegmentContext {
    pub namer: Arc<SegmentNamer>,
    pub sample_rate: f64,
}

impl SegmentContext {
    pub fn from_config(config: &TracingConfig) -> Self {
        Self {
            namer: Arc::new(SegmentNamer::from_config(config)),
            sample_rate: config.sample_rate,
        }
    }

    fn decide_sampling(&self) -> bool {
        rand::thread_rng().gen_bool(self.sample_rate.clamp(0.0, 1.0))
    }

    /// Trace context for an incoming header value.
    pub fn resolve(&self, incoming: Option<&str>) -> TraceHeader {
        match incoming.and_then(TraceHeader::parse) {
            Some(mut header) => {
                if header.sampled.is_none() {
                    header.sampled = Some(self.decide_sampling());
                }
                header
            }
            None => TraceHeader::new_root(self.decide_sampling()),
        }
    }
}

/// Middleware wrapping every request in a named segment span.
///
/// The resolved [`TraceHeader`] is stored in the request extensions so
/// handlers can propagate it downstream.
pub async fn trace_segment(
    State(ctx): State<SegmentContext>,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(|h| h.split(':').next().unwrap_or(h).to_string())
        .or_else(|| request.uri().host().map(str::to_string));
    let segment_name = ctx.namer.name(host.as_deref()).to_string();

    let incoming = request
        .headers()
        .get(TRACE_HEADER)
        .and_then(|v| v.to_str().ok());
    let trace = ctx.resolve(incoming);

    let request_id = request.request_id().unwrap_or("unknown").to_string();

    let method = request.method().to_string();
    let span = tracing::info_span!(
        "segment",
        segment.name = %segment_name,
        trace_id = %trace.root,
        request_id = %request_id,
        http.method = %method,
        http.path = %request.uri().path(),
        http.status = field::Empty,
        latency_ms = field::Empty,
    );

    request.extensions_mut().insert(trace.clone());

    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    span.record("http.status", status.as_u16());
    span.record("latency_ms", start.elapsed().as_millis() as u64);

    if let Ok(value) = HeaderValue::from_str(&trace.response_value()) {
        response.headers_mut().insert(TRACE_HEADER, value);
    }

    metrics::record_request(&method, status.as_u16(), &segment_name, start);

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_named_after_recognized_host() {
        let namer = SegmentNamer::new("myApp", "youtube.googleapis.com");
        assert_eq!(namer.name(Some("youtube.googleapis.com")), "youtube.googleapis.com");
        assert_eq!(namer.name(Some("YouTube.GoogleAPIs.com")), "YouTube.GoogleAPIs.com");
        assert_eq!(namer.name(Some("localhost")), "myApp");
        assert_eq!(namer.name(None), "myApp");
    }

    #[test]
    fn wildcard_patterns() {
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("*.example.com", "api.example.com"));
        assert!(!wildcard_match("*.example.com", "example.com"));
        assert!(wildcard_match("api-?.local", "api-1.local"));
        assert!(!wildcard_match("api-?.local", "api-12.local"));
        assert!(wildcard_match("a*b*c", "aXXbYYc"));
        assert!(!wildcard_match("a*b*c", "aXXbYY"));
        assert!(wildcard_match("", ""));
        assert!(!wildcard_match("", "x"));
    }

    #[test]
    fn parses_full_header() {
        let header = TraceHeader::parse(
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1",
        )
        .unwrap();
        assert_eq!(header.root, "1-5759e988-bd862e3fe1be46a994272793");
        assert_eq!(header.parent.as_deref(), Some("53995c3f42cd8ad8"));
        assert_eq!(header.sampled, Some(true));
        assert_eq!(
            header.to_string(),
            "Root=1-5759e988-bd862e3fe1be46a994272793;Parent=53995c3f42cd8ad8;Sampled=1"
        );
    }

    #[test]
    fn rejects_header_without_valid_root() {
        assert!(TraceHeader::parse("Parent=53995c3f42cd8ad8;Sampled=1").is_none());
        assert!(TraceHeader::parse("Root=2-5759e988-bd862e3fe1be46a994272793").is_none());
        assert!(TraceHeader::parse("Root=1-xyz-abc").is_none());
        assert!(TraceHeader::parse("").is_none());
    }

    #[test]
    fn generated_ids_have_expected_shape() {
        let root = new_trace_id();
        assert!(is_valid_root(&root), "bad root {root}");
        assert!(is_hex_id(&new_segment_id()));
    }

    #[test]
    fn subsegment_keeps_root_and_sampling() {
        let header = TraceHeader::new_root(false);
        let sub = header.subsegment();
        assert_eq!(sub.root, header.root);
        assert_eq!(sub.sampled, Some(false));
        assert!(sub.parent.is_some());
        assert!(sub.to_string().contains(";Parent="));
    }

    #[test]
    fn resolve_fills_missing_sampling_decision() {
        let ctx = SegmentContext {
            namer: Arc::new(SegmentNamer::new("myApp", "*")),
            sample_rate: 0.0,
        };

        let kept = ctx.resolve(Some("Root=1-5759e988-bd862e3fe1be46a994272793"));
        assert_eq!(kept.root, "1-5759e988-bd862e3fe1be46a994272793");
        assert_eq!(kept.sampled, Some(false));

        let fresh = ctx.resolve(Some("garbage"));
        assert_ne!(fresh.root, kept.root);
        assert_eq!(fresh.response_value(), format!("Root={};Sampled=0", fresh.root));
    }
}
