//! Shared fixtures for the integration tests: a deterministic emulator
//! (fixed clock, exact matcher, fixed rater) and a signed-request builder.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderMap, HeaderValue, Method};
use vumock::{
    authorization_header, Clock, Database, DatabaseState, ExactMatcher, FixedClock, FixedRater,
    KeyFamily, MockConfig, MockVuforia, NewTarget, RequestDescriptor, SignedParts,
};

pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub struct Harness {
    pub mock: MockVuforia,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    /// Deterministic emulator with one registered working database.
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let mock = MockVuforia::with_parts(
            Arc::new(ExactMatcher),
            Arc::new(FixedRater(3)),
            clock.clone(),
            MockConfig::default(),
        );
        mock.add_database(test_database(DatabaseState::Working))
            .expect("registering the fixture database");
        Self { mock, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// A request signed with the fixture database's keys and a date header
    /// matching the fake clock.
    pub fn signed_request(
        &self,
        family: KeyFamily,
        method: Method,
        path: &str,
        body: &[u8],
    ) -> RequestDescriptor {
        let (access_key, secret_key) = match family {
            KeyFamily::Server => ("server-access", "server-secret"),
            KeyFamily::Client => ("client-access", "client-secret"),
        };
        let date = self.now().format(DATE_FORMAT).to_string();
        let content_type = if method == Method::POST || method == Method::PUT {
            "application/json"
        } else {
            ""
        };
        let parts = SignedParts {
            method: method.as_str(),
            content_type,
            date: &date,
            path,
            body,
        };
        let authorization = authorization_header(access_key, secret_key, &parts);

        let mut headers = HeaderMap::new();
        if !content_type.is_empty() {
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_str(content_type).expect("static content type"),
            );
        }
        headers.insert(
            http::header::DATE,
            HeaderValue::from_str(&date).expect("formatted date is ascii"),
        );
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&authorization).expect("header value"),
        );
        RequestDescriptor::new(method, path, headers, Bytes::copy_from_slice(body))
    }
}

pub fn test_database(state: DatabaseState) -> Database {
    Database::new(
        "test-db",
        "server-access",
        "server-secret",
        "client-access",
        "client-secret",
        state,
    )
}

/// A small valid PNG whose pixel color distinguishes payloads.
pub fn png_bytes(r: u8, g: u8, b: u8) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([r, g, b]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("in-memory png encode");
    out.into_inner()
}

pub fn new_target(name: &str, image: Vec<u8>, processing_seconds: f64) -> NewTarget {
    NewTarget {
        name: name.to_string(),
        width: 1.0,
        image,
        active_flag: None,
        processing_seconds: Some(processing_seconds),
        application_metadata: None,
    }
}
