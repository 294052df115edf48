// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2011-2024 Michael Büsch <m@bues.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use anyhow::{self as ah, Context as _};
use std::{fmt, io::Write};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const MIME_HTML: &str = "text/html; charset=UTF-8";
pub const MIME_TEXT: &str = "text/plain; charset=UTF-8";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HttpStatus {
    #[default]
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    PayloadTooLarge = 413,
    UnprocessableEntity = 422,
    InternalServerError = 500,
}

impl HttpStatus {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::PayloadTooLarge => "Payload Too Large",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Ordered HTTP response headers.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Get a header value. The name is matched case insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable HTTP response.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Response {
    status: HttpStatus,
    headers: Headers,
    body: String,
}

impl Response {
    fn new(body: String, status: HttpStatus, mime: &str) -> Self {
        Self {
            status,
            headers: Headers(vec![(CONTENT_TYPE.to_string(), mime.to_string())]),
            body,
        }
    }

    /// Create an HTML response.
    pub fn html(body: impl Into<String>, status: HttpStatus) -> Self {
        Self::new(body.into(), status, MIME_HTML)
    }

    /// Create a plain text response.
    pub fn text(body: impl Into<String>, status: HttpStatus) -> Self {
        Self::new(body.into(), status, MIME_TEXT)
    }

    pub fn not_found() -> Self {
        Self::html(format!("<h1>{}</h1>", HttpStatus::NotFound), HttpStatus::NotFound)
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::text(format!("{}: {msg}", HttpStatus::BadRequest), HttpStatus::BadRequest)
    }

    pub fn payload_too_large(msg: &str) -> Self {
        Self::text(
            format!("{}: {msg}", HttpStatus::PayloadTooLarge),
            HttpStatus::PayloadTooLarge,
        )
    }

    pub fn internal_error(msg: &str) -> Self {
        Self::text(
            format!("{}: {msg}", HttpStatus::InternalServerError),
            HttpStatus::InternalServerError,
        )
    }

    /// Return a copy of this response with one additional header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.0.push((name.to_string(), value.to_string()));
        self
    }

    pub fn status(&self) -> u16 {
        self.status.code()
    }

    pub fn http_status(&self) -> HttpStatus {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Emit the response in CGI format:
    /// Status line, headers, an empty line and the body.
    ///
    /// This consumes the response.
    pub fn send(self, w: &mut impl Write) -> ah::Result<()> {
        let mut head = format!("Status: {}\n", self.status);
        for (name, value) in self.headers.iter() {
            head.push_str(&format!("{name}: {value}\n"));
        }
        head.push('\n');
        w.write_all(head.as_bytes()).context("Write response headers")?;
        w.write_all(self.body.as_bytes()).context("Write response body")?;
        w.flush().context("Flush response")
    }
}

impl From<ah::Result<Response>> for Response {
    fn from(response: ah::Result<Response>) -> Self {
        match response {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Failed to generate response: {e:#}");
                Self::internal_error("Failed to generate page.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html() {
        let r = Response::html("<h1>Test</h1>", HttpStatus::Ok);
        assert_eq!(r.status(), 200);
        assert_eq!(r.body(), "<h1>Test</h1>");
        assert_eq!(r.headers().get("Content-Type"), Some("text/html; charset=UTF-8"));
        assert_eq!(r.headers().get("content-type"), Some("text/html; charset=UTF-8"));
        assert_eq!(r.headers().len(), 1);

        let r = Response::html("<h1>Not Found</h1>", HttpStatus::NotFound);
        assert_eq!(r.status(), 404);
        assert_eq!(r.body(), "<h1>Not Found</h1>");

        assert_eq!(Response::html("", HttpStatus::Ok).body(), "");
        let special = "<p>Caratteri speciali: àèéìòù €</p>";
        assert_eq!(Response::html(special, HttpStatus::Ok).body(), special);
    }

    #[test]
    fn test_status_codes() {
        for (status, code) in [
            (HttpStatus::Ok, 200),
            (HttpStatus::BadRequest, 400),
            (HttpStatus::NotFound, 404),
            (HttpStatus::PayloadTooLarge, 413),
            (HttpStatus::UnprocessableEntity, 422),
            (HttpStatus::InternalServerError, 500),
        ] {
            let r = Response::html("<html></html>", status);
            assert_eq!(r.status(), code);
            assert_eq!(r.http_status(), status);
        }
        assert_eq!(HttpStatus::UnprocessableEntity.to_string(), "422 Unprocessable Entity");
    }

    #[test]
    fn test_accessors_are_stable() {
        let r = Response::html("<p>Test</p>", HttpStatus::Ok);
        assert_eq!(r.status(), r.status());
        assert_eq!(r.body(), r.body());
        assert_eq!(r.headers(), r.headers());
    }

    #[test]
    fn test_not_found() {
        let r = Response::not_found();
        assert_eq!(r.status(), 404);
        assert!(r.body().contains("404 Not Found"));
    }

    #[test]
    fn test_with_header() {
        let r = Response::html("x", HttpStatus::Ok).with_header("X-Test", "1");
        assert_eq!(r.headers().len(), 2);
        assert_eq!(r.headers().get("x-test"), Some("1"));
        assert_eq!(
            r.headers().iter().next(),
            Some((CONTENT_TYPE, MIME_HTML))
        );
    }

    #[test]
    fn test_send() {
        let mut out = Vec::new();
        Response::html("<h1>Test Output</h1>", HttpStatus::Ok)
            .send(&mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Status: 200 OK\nContent-Type: text/html; charset=UTF-8\n\n<h1>Test Output</h1>"
        );

        let mut out = Vec::new();
        Response::not_found().send(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Status: 404 Not Found\n"));
        assert!(out.ends_with("\n\n<h1>404 Not Found</h1>"));
    }

    #[test]
    fn test_from_result() {
        let result: ah::Result<Response> = Ok(Response::html("ok", HttpStatus::Ok));
        let r: Response = result.into();
        assert_eq!(r.status(), 200);
        let result: ah::Result<Response> = Err(ah::format_err!("broken"));
        let r: Response = result.into();
        assert_eq!(r.status(), 500);
        assert_eq!(r.headers().get(CONTENT_TYPE), Some(MIME_TEXT));
    }
}

// vim: ts=4 sw=4 expandtab
