//! HTTP header name constants.
//!
//! Response headers are stored lowercased on `RawDocument`, so every constant
//! here is lowercase as well.

// Security headers
/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "content-security-policy";
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "x-frame-options";

// Caching
pub const HEADER_CACHE_CONTROL: &str = "cache-control";
pub const HEADER_EXPIRES: &str = "expires";
pub const HEADER_ETAG: &str = "etag";
pub const HEADER_LAST_MODIFIED: &str = "last-modified";

// Transfer
pub const HEADER_CONTENT_ENCODING: &str = "content-encoding";
/// Server-Timing header (performance metrics)
pub const HEADER_SERVER_TIMING: &str = "server-timing";

/// Content encodings that count as compressed transfer.
pub const COMPRESSED_ENCODINGS: &[&str] = &["gzip", "br", "deflate", "zstd"];
