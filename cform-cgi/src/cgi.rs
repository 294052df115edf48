// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{config::CgiConfig, formfields::FormFields, urlencoded};
use anyhow::{self as ah, format_err as err};
use cform_app::{App, FieldMap, Request, Response, ServerVars, VAR_METHOD, VAR_URI};
use std::{
    collections::HashMap,
    env,
    ffi::OsString,
    io::{Read, Write},
    time::Instant,
};

const MAX_CGIENV_LEN: usize = 1024 * 4;
const MAX_CGIENV_U64_LEN: usize = 20;

const CGIENV_NAMES: [&str; 6] = [
    "REQUEST_METHOD",
    "REQUEST_URI",
    "PATH_INFO",
    "QUERY_STRING",
    "CONTENT_LENGTH",
    "CONTENT_TYPE",
];

const MIME_URLENCODED: &str = "application/x-www-form-urlencoded";
const MIME_MULTIPART: &str = "multipart/form-data";

const RUNTIME_HEADER: &str = "X-Cform-Cgi-Runtime";

/// Snapshot of the CGI environment variables.
#[derive(Clone, Debug, Default)]
pub struct CgiEnv {
    vars: HashMap<String, OsString>,
}

impl CgiEnv {
    /// Capture the CGI variables from the process environment.
    pub fn from_process() -> Self {
        let vars = CGIENV_NAMES
            .iter()
            .filter_map(|name| env::var_os(name).map(|v| (name.to_string(), v)))
            .collect();
        Self { vars }
    }

    #[cfg(test)]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let vars = pairs
            .into_iter()
            .map(|(n, v)| (n.to_string(), OsString::from(v)))
            .collect();
        Self { vars }
    }

    fn get(&self, name: &str) -> ah::Result<OsString> {
        let value = self.vars.get(name).cloned().unwrap_or_default();
        if value.len() <= MAX_CGIENV_LEN {
            Ok(value)
        } else {
            Err(err!("Environment variable '{name}' is too long."))
        }
    }

    fn get_str(&self, name: &str) -> ah::Result<String> {
        if let Ok(s) = self.get(name)?.into_string() {
            Ok(s)
        } else {
            Err(err!("Environment variable '{name}' is not valid UTF-8."))
        }
    }

    fn get_u64(&self, name: &str) -> ah::Result<u64> {
        let value = self.get_str(name)?;
        let value = value.trim();
        if value.is_empty() {
            Ok(0)
        } else if value.len() <= MAX_CGIENV_U64_LEN {
            Ok(value.parse::<u64>()?)
        } else {
            Err(err!("Environment variable '{name}' is too long (u64)."))
        }
    }
}

/// Return the MIME type essence, without parameters.
fn mime_essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_lowercase()
}

pub struct Cgi {
    env: CgiEnv,
    config: CgiConfig,
    app: App,
}

impl Cgi {
    pub fn new(env: CgiEnv, config: CgiConfig) -> Self {
        Self {
            env,
            config,
            app: App::new(),
        }
    }

    fn reject(response: Response, reason: &str) -> Response {
        tracing::warn!(status = response.status(), "Rejected request: {reason}");
        response
    }

    fn read_fields(&self, input: &mut impl Read) -> Result<FieldMap, Response> {
        let body_len = self.env.get_u64("CONTENT_LENGTH").map_err(|e| {
            Self::reject(Response::bad_request("Invalid CONTENT_LENGTH."), &e.to_string())
        })?;
        if body_len == 0 {
            return Ok(FieldMap::new());
        }
        if body_len > self.config.max_post_body() {
            return Err(Self::reject(
                Response::payload_too_large("POST: CONTENT_LENGTH is too large."),
                &format!("body length {body_len}"),
            ));
        }
        let body_type = self.env.get_str("CONTENT_TYPE").map_err(|e| {
            Self::reject(Response::bad_request("Invalid CONTENT_TYPE."), &e.to_string())
        })?;

        let Ok(body_len) = usize::try_from(body_len) else {
            return Err(Self::reject(
                Response::payload_too_large("POST: CONTENT_LENGTH is too large."),
                "body length",
            ));
        };
        let mut body = vec![0; body_len];
        if let Err(e) = input.read_exact(&mut body) {
            tracing::error!("CGI stdin read failed: {e}");
            return Err(Response::internal_error("CGI stdin read failed."));
        }

        match mime_essence(&body_type).as_str() {
            MIME_URLENCODED => urlencoded::decode(&String::from_utf8_lossy(&body)).map_err(|e| {
                Self::reject(
                    Response::bad_request("POST: Invalid urlencoded body."),
                    &e.to_string(),
                )
            }),
            MIME_MULTIPART => {
                match FormFields::new_blocking(&body, &body_type, self.config.max_post_body()) {
                    Ok(fields) => Ok(fields.into_items()),
                    Err(e) => Err(Self::reject(
                        Response::bad_request("POST: Invalid form-data body."),
                        &format!("{e:#}"),
                    )),
                }
            }
            other => {
                tracing::warn!("Ignoring POST body of type '{other}'");
                Ok(FieldMap::new())
            }
        }
    }

    /// Build the [Request] from the CGI environment and the request body.
    ///
    /// If the request is malformed, the error response is returned instead.
    pub fn request(&self, input: &mut impl Read) -> Result<Request, Response> {
        let bad = |e: ah::Error| Self::reject(Response::bad_request(&e.to_string()), "environment");

        let meth = self.env.get_str("REQUEST_METHOD").map_err(bad)?;
        let query = self.env.get_str("QUERY_STRING").map_err(bad)?;
        let mut uri = self.env.get_str("REQUEST_URI").map_err(bad)?;
        if uri.is_empty() {
            uri = self.env.get_str("PATH_INFO").map_err(bad)?;
            if !query.is_empty() {
                uri = format!("{uri}?{query}");
            }
        }

        let mut server = ServerVars::new();
        server.insert(VAR_METHOD.to_string(), meth);
        server.insert(VAR_URI.to_string(), uri);

        let fields = if server[VAR_METHOD].trim().eq_ignore_ascii_case("POST") {
            self.read_fields(input)?
        } else {
            FieldMap::new()
        };

        let query = urlencoded::decode(&query).map_err(|e| {
            Self::reject(Response::bad_request("Invalid QUERY_STRING in URI."), &e.to_string())
        })?;

        Ok(Request::new(query, fields, &server))
    }

    /// Handle the request and emit the response exactly once.
    pub fn run(&self, input: &mut impl Read, output: &mut impl Write) -> ah::Result<()> {
        let start_stamp = if self.config.debug() {
            Some(Instant::now())
        } else {
            None
        };

        let mut response = match self.request(input) {
            Ok(request) => self.app.handle(&request),
            Err(response) => response,
        };

        if let Some(start_stamp) = start_stamp {
            let runtime = start_stamp.elapsed().as_micros();
            response = response.with_header(RUNTIME_HEADER, &format!("{runtime} us"));
        }

        response.send(output)
    }
}


// vim: ts=4 sw=4 expandtab
