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
use cform_app::{FieldMap, FieldValue};
use multer::{parse_boundary, Constraints, Multipart, SizeLimit};
use tokio::runtime;

const LIMIT_PER_FIELD: u64 = 1024 * 128;

/// Decoder for `multipart/form-data` bodies.
pub struct FormFields {
    items: FieldMap,
}

impl FormFields {
    pub async fn new(body: &[u8], body_mime: &str, limit: u64) -> ah::Result<Self> {
        let boundary = parse_boundary(body_mime).context("Parse form-data boundary")?;
        let sizelim = SizeLimit::new()
            .whole_stream(limit)
            .per_field(LIMIT_PER_FIELD.min(limit));
        let constr = Constraints::new().size_limit(sizelim);
        let mut multipart = Multipart::with_reader_with_constraints(body, boundary, constr);
        let mut items = FieldMap::new();
        while let Some(field) = multipart.next_field().await.context("Multipart field")? {
            let Some(name) = field.name() else {
                continue;
            };
            let name = name.to_string();
            let data = field.bytes().await.context("Multipart field data")?;
            let value = FieldValue::from(data.to_vec());
            if let Some(name) = name.strip_suffix("[]") {
                let entry = items
                    .entry(name.to_string())
                    .or_insert_with(|| FieldValue::List(Vec::new()));
                match entry {
                    FieldValue::List(list) => list.push(value),
                    other => *other = FieldValue::List(vec![value]),
                }
            } else {
                items.insert(name, value);
            }
        }
        Ok(Self { items })
    }

    /// Decode the body on a throw-away current-thread runtime.
    pub fn new_blocking(body: &[u8], body_mime: &str, limit: u64) -> ah::Result<Self> {
        runtime::Builder::new_current_thread()
            .build()
            .context("Tokio runtime builder")?
            .block_on(Self::new(body, body_mime, limit))
    }

    pub fn into_items(self) -> FieldMap {
        self.items
    }
}


// vim: ts=4 sw=4 expandtab
