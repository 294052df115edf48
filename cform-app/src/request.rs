// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::field::FieldMap;
use std::collections::HashMap;

/// Server and environment metadata (e.g. the CGI variables).
pub type ServerVars = HashMap<String, String>;

pub const VAR_METHOD: &str = "REQUEST_METHOD";
pub const VAR_URI: &str = "REQUEST_URI";

const DEFAULT_METHOD: &str = "GET";
const DEFAULT_PATH: &str = "/";

/// Extract the path component from a request URI.
/// Query string and fragment are dropped.
fn uri_path(uri: &str) -> &str {
    let end = uri.find(['?', '#']).unwrap_or(uri.len());
    let path = &uri[..end];
    if path.is_empty() {
        DEFAULT_PATH
    } else {
        path
    }
}

/// Immutable snapshot of one HTTP request.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Request {
    method: String,
    path: String,
    query: FieldMap,
    fields: FieldMap,
}

impl Request {
    /// Create a request from the decoded query, the submitted
    /// form fields and the server metadata.
    pub fn new(query: FieldMap, fields: FieldMap, server: &ServerVars) -> Self {
        let method = server
            .get(VAR_METHOD)
            .map(|m| m.trim().to_uppercase())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string());
        let path = uri_path(server.get(VAR_URI).map(|u| u.as_str()).unwrap_or_default());
        Self {
            method,
            path: path.to_string(),
            query,
            fields,
        }
    }

    /// The upper case request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The URI path without query string and fragment.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The decoded query string. It is not interpreted.
    pub fn query(&self) -> &FieldMap {
        &self.query
    }

    /// The submitted form fields.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{field_map, FieldValue};

    fn server(pairs: &[(&str, &str)]) -> ServerVars {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    fn req(pairs: &[(&str, &str)]) -> Request {
        Request::new(FieldMap::new(), FieldMap::new(), &server(pairs))
    }

    #[test]
    fn test_method() {
        assert_eq!(req(&[(VAR_METHOD, "GET")]).method(), "GET");
        assert_eq!(req(&[(VAR_METHOD, "post")]).method(), "POST");
        assert_eq!(req(&[(VAR_METHOD, " Post ")]).method(), "POST");
        assert_eq!(req(&[]).method(), "GET");
        assert_eq!(req(&[(VAR_METHOD, "")]).method(), "GET");
        for m in ["PUT", "DELETE", "PATCH", "OPTIONS", "HEAD"] {
            assert_eq!(req(&[(VAR_METHOD, m)]).method(), m);
        }
    }

    #[test]
    fn test_path() {
        assert_eq!(req(&[(VAR_URI, "/submit?x=1")]).path(), "/submit");
        assert_eq!(req(&[(VAR_URI, "/test")]).path(), "/test");
        assert_eq!(req(&[(VAR_URI, "/")]).path(), "/");
        assert_eq!(req(&[(VAR_URI, "/page?x=1#section")]).path(), "/page");
        assert_eq!(req(&[(VAR_URI, "/page#a?b")]).path(), "/page");
        assert_eq!(req(&[(VAR_URI, "?x=1")]).path(), "/");
        assert_eq!(req(&[(VAR_URI, "")]).path(), "/");
        assert_eq!(req(&[]).path(), "/");
    }

    #[test]
    fn test_fields() {
        let fields = field_map([("name", "Mario"), ("email", "mario@test.com")]);
        let r = Request::new(FieldMap::new(), fields.clone(), &server(&[]));
        assert_eq!(r.fields(), &fields);
        assert!(req(&[]).fields().is_empty());
    }

    #[test]
    fn test_fields_copy_is_independent() {
        let r = Request::new(
            FieldMap::new(),
            field_map([("name", "Mario")]),
            &server(&[]),
        );
        let mut copy = r.fields().clone();
        copy.insert("name".to_string(), "Luigi".into());
        assert_eq!(r.fields(), &field_map([("name", "Mario")]));
        assert_eq!(r.fields(), r.fields());
    }

    #[test]
    fn test_query() {
        let r = Request::new(
            field_map([("x", "1")]),
            FieldMap::new(),
            &server(&[(VAR_URI, "/?x=1")]),
        );
        assert_eq!(r.query().get("x"), Some(&FieldValue::from("1")));
        assert_eq!(r.path(), "/");
    }
}

// vim: ts=4 sw=4 expandtab
