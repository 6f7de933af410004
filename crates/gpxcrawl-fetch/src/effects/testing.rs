//! Scripted HTTP client and GPX fixtures for tests of crawl components.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::effects::http::{HttpClient, HttpResponse};
use crate::error::Result;

type Responder = Box<dyn Fn(&str, usize) -> Result<HttpResponse> + Send + Sync>;

/// An [`HttpClient`] that answers from a script and records every request.
///
/// A queued script is consumed first; once it is empty the responder (if
/// any) is asked, and without one an empty GPX page is returned.
pub struct ScriptedClient {
    script:    Mutex<VecDeque<Result<HttpResponse>>>,
    responder: Option<Responder>,
    latency:   Duration,
    calls:     Mutex<Vec<(String, Instant)>>,
}

impl ScriptedClient {
    /// Answer requests from `responses` in order.
    pub fn sequence(responses: impl IntoIterator<Item = Result<HttpResponse>>) -> Self {
        Self {
            script:    Mutex::new(responses.into_iter().collect()),
            responder: None,
            latency:   Duration::ZERO,
            calls:     Mutex::new(Vec::new()),
        }
    }

    /// Answer each request with `responder(url, call_index)`.
    pub fn with_responder(
        responder: impl Fn(&str, usize) -> Result<HttpResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Some(Box::new(responder)),
            ..Self::sequence(Vec::new())
        }
    }

    /// Delay every response by `latency`.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.lock_calls().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> { self.lock_calls().iter().map(|(_, at)| *at).collect() }

    pub fn call_count(&self) -> usize { self.lock_calls().len() }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(String, Instant)>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, url: &str) -> Result<HttpResponse> {
        let index = {
            let mut calls = self.lock_calls();
            calls.push((url.to_string(), Instant::now()));
            calls.len() - 1
        };
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match (scripted, &self.responder) {
            (Some(response), _) => response,
            (None, Some(responder)) => responder(url, index),
            (None, None) => Ok(empty_page()),
        }
    }
}

impl HttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.respond(url);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        response
    }
}

/// A 200 GPX page holding `points` trackpoints, tagged with `label` so pages
/// can be told apart once concatenated.
pub fn track_page(label: &str, points: usize) -> HttpResponse {
    let mut body = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<gpx version=\"1.0\" creator=\"{label}\">\n<trk><trkseg>\n"
    );
    for i in 0..points {
        body.push_str(&format!(
            "<trkpt lat=\"25.{i:04}\" lon=\"-80.{i:04}\"/>\n"
        ));
    }
    body.push_str("</trkseg></trk>\n</gpx>\n");
    HttpResponse::new(200, body)
}

/// The 200 response the API sends once a bbox has no more points.
pub fn empty_page() -> HttpResponse {
    HttpResponse::new(
        200,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<gpx version=\"1.0\" creator=\"OpenStreetMap.org\">\n</gpx>\n",
    )
}

pub fn status(code: u16) -> HttpResponse { HttpResponse::new(code, format!("HTTP {code}")) }
