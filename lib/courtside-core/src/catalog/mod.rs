//! Ready-made request definitions for the NBA APIs.
//!
//! The catalog is pure data: every entry is a static [`RequestDefinition`] built on
//! one of the three API families below. Callers can define their own entries the
//! same way.
//!
//! | Family             | Base URI               | Module    |
//! |--------------------|------------------------|-----------|
//! | [`DATA_API`]       | `http://data.nba.net`  | [`data`]  |
//! | [`STATS_API`]      | `http://stats.nba.com` | [`stats`] |
//! | [`NBA_API`]        | `http://api.nba.net`   |           |
//!
//! [`RequestDefinition`]: crate::RequestDefinition

use std::sync::{Arc, LazyLock};

use http::header::{ACCEPT_LANGUAGE, HOST, HeaderValue, ORIGIN, REFERER, USER_AGENT};

use crate::request::ApiFamily;

pub mod data;
pub mod params;
pub mod stats;

/// The static JSON feeds of `data.nba.net`.
pub static DATA_API: LazyLock<Arc<ApiFamily>> = LazyLock::new(|| {
    Arc::new(ApiFamily::new("data", "http://data.nba.net").expect("a valid base uri"))
});

/// The `stats.nba.com` API; it rejects requests that do not look like a browser.
pub static STATS_API: LazyLock<Arc<ApiFamily>> = LazyLock::new(|| {
    let family = ApiFamily::new("stats", "http://stats.nba.com")
        .expect("a valid base uri")
        .with_header(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36",
            ),
        )
        .with_header(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.8"))
        .with_header(REFERER, HeaderValue::from_static("http://stats.nba.com/"));
    Arc::new(family)
});

/// The `api.nba.net` API.
pub static NBA_API: LazyLock<Arc<ApiFamily>> = LazyLock::new(|| {
    let family = ApiFamily::new("api", "http://api.nba.net")
        .expect("a valid base uri")
        .with_header(ORIGIN, HeaderValue::from_static("http://api.nba.net"))
        .with_header(HOST, HeaderValue::from_static("api.nba.net"));
    Arc::new(family)
});
