// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

/// All submitted fields of one request, by field name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// One submitted field value, in whatever shape the transport delivered it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FieldValue {
    Text(String),
    /// Raw bytes. Not necessarily valid UTF-8.
    Bytes(Vec<u8>),
    Int(i64),
    Bool(bool),
    /// `name[]=a&name[]=b`
    List(Vec<FieldValue>),
    /// `name[a]=x&name[b]=y`
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Coerce the value into text.
    ///
    /// This never fails. Structured values (lists and maps) have no
    /// text representation and coerce to the empty string.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Self::Int(i) => i.to_string(),
            Self::Bool(true) => "1".to_string(),
            Self::Bool(false) => String::new(),
            Self::List(_) | Self::Map(_) => String::new(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        match String::from_utf8(b) {
            Ok(s) => Self::Text(s),
            Err(e) => Self::Bytes(e.into_bytes()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Build a [FieldMap] from `(name, value)` pairs.
pub fn field_map<'a, V, I>(pairs: I) -> FieldMap
where
    V: Into<FieldValue>,
    I: IntoIterator<Item = (&'a str, V)>,
{
    pairs
        .into_iter()
        .map(|(n, v)| (n.to_string(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(FieldValue::from("Mario").to_text(), "Mario");
        assert_eq!(FieldValue::Int(123).to_text(), "123");
        assert_eq!(FieldValue::Int(-7).to_text(), "-7");
        assert_eq!(FieldValue::Bool(true).to_text(), "1");
        assert_eq!(FieldValue::Bool(false).to_text(), "");
        assert_eq!(FieldValue::Bytes(b"ab\xFFc".to_vec()).to_text(), "ab\u{FFFD}c");
        let list = FieldValue::List(vec!["array".into(), "value".into()]);
        assert_eq!(list.to_text(), "");
        assert_eq!(FieldValue::Map(BTreeMap::new()).to_text(), "");
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(
            FieldValue::from(b"Jos\xC3\xA9".to_vec()),
            FieldValue::Text("José".to_string())
        );
        assert_eq!(
            FieldValue::from(b"\xC3".to_vec()),
            FieldValue::Bytes(b"\xC3".to_vec())
        );
    }

    #[test]
    fn test_field_map() {
        let m = field_map([("name", "Mario"), ("email", "mario@example.com")]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("name"), Some(&FieldValue::from("Mario")));
    }
}

// vim: ts=4 sw=4 expandtab
