// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{self as ah, format_err as err};
use cform_app::{FieldMap, FieldValue};
use querystrong::QueryStrong;

const MAX_PAIRS: usize = 256;

fn convert(value: &querystrong::Value) -> FieldValue {
    match value {
        querystrong::Value::String(v) => FieldValue::Text(v.to_string()),
        querystrong::Value::List(l) => FieldValue::List(l.iter().map(convert).collect()),
        querystrong::Value::Map(m) => FieldValue::Map(
            m.iter()
                .map(|(k, v)| (k.to_string(), convert(v)))
                .collect(),
        ),
        _ => FieldValue::Text(String::new()),
    }
}

/// Decode an `application/x-www-form-urlencoded` string.
///
/// Only the first [MAX_PAIRS] pairs are decoded.
/// Bracketed keys (`name[]`, `name[key]`) produce nested values.
pub fn decode(s: &str) -> ah::Result<FieldMap> {
    let s: Vec<&str> = s
        .split('&')
        .filter(|p| !p.is_empty())
        .take(MAX_PAIRS)
        .collect();
    let s = s.join("&").replace('+', "%20");

    let q = QueryStrong::parse(&s).map_err(|_| err!("Invalid urlencoded string."))?;
    let mut fields = FieldMap::new();
    if let Some(q) = q.as_map() {
        for (n, v) in q {
            fields.insert(n.to_string(), convert(v));
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cform_app::field_map;
    use std::collections::BTreeMap;

    #[test]
    fn test_decode() {
        assert_eq!(
            decode("name=Mario+Rossi&email=mario%40example.com&message=Ciao%2C%20mondo").unwrap(),
            field_map([
                ("name", "Mario Rossi"),
                ("email", "mario@example.com"),
                ("message", "Ciao, mondo"),
            ])
        );
        assert_eq!(decode("").unwrap(), FieldMap::new());
        assert_eq!(decode("a=%C3%A0%E2%82%AC").unwrap(), field_map([("a", "à€")]));
        assert_eq!(
            decode("m=%3Cb%3Ehi%3C%2Fb%3E%0D%0Aok").unwrap(),
            field_map([("m", "<b>hi</b>\r\nok")])
        );
    }

    #[test]
    fn test_decode_list() {
        let fields = decode("name[]=array&name[]=value&x=1").unwrap();
        assert_eq!(
            fields.get("name"),
            Some(&FieldValue::List(vec!["array".into(), "value".into()]))
        );
        assert_eq!(fields.get("x"), Some(&FieldValue::from("1")));
    }

    #[test]
    fn test_decode_map() {
        let fields = decode("name[first]=Mario&name[last]=Rossi").unwrap();
        let mut map = BTreeMap::new();
        map.insert("first".to_string(), FieldValue::from("Mario"));
        map.insert("last".to_string(), FieldValue::from("Rossi"));
        assert_eq!(fields.get("name"), Some(&FieldValue::Map(map)));
    }

    #[test]
    fn test_decode_nested() {
        let fields = decode("name[a][b]=x&email=e").unwrap();
        let mut inner = BTreeMap::new();
        inner.insert("b".to_string(), FieldValue::from("x"));
        let mut outer = BTreeMap::new();
        outer.insert("a".to_string(), FieldValue::Map(inner));
        assert_eq!(fields.get("name"), Some(&FieldValue::Map(outer)));
        assert_eq!(fields.get("email"), Some(&FieldValue::from("e")));
        // Structured values never become text.
        assert_eq!(fields["name"].to_text(), "");
    }

    #[test]
    fn test_pair_limit() {
        let s: Vec<String> = (0..MAX_PAIRS + 10).map(|i| format!("f{i}=v")).collect();
        assert_eq!(decode(&s.join("&")).unwrap().len(), MAX_PAIRS);
    }
}

// vim: ts=4 sw=4 expandtab
