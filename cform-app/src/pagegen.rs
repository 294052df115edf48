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

use crate::validator::{Field, FieldErrors, FormData};
use anyhow as ah;
use std::{fmt::Write as _, writeln as ln};

const DEFAULT_HTML_ALLOC: usize = 1024 * 4;

pub const TITLE_FORM: &str = "Form contatti";
pub const TITLE_ERRORS: &str = "Correggi gli errori";
pub const TITLE_THANKS: &str = "Grazie";

/// Escape text for the HTML body and for quoted attribute values.
/// `&`, `<`, `>`, `"` and `'` are all escaped.
pub fn html_safe_escape(text: &str) -> String {
    html_escape::encode_safe(text).to_string()
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Nome",
        Field::Email => "Email",
        Field::Message => "Messaggio",
    }
}

#[rustfmt::skip]
fn generate_head(b: &mut String, title: &str) -> ah::Result<()> {
    ln!(b, r#"<!DOCTYPE html>"#)?;
    ln!(b, r#"<html lang="it">"#)?;
    ln!(b, r#"<head>"#)?;
    ln!(b, r#"    <meta charset="UTF-8" />"#)?;
    ln!(b, r#"    <meta name="viewport" content="width=device-width, initial-scale=1" />"#)?;
    ln!(b, r#"    <title>{title}</title>"#)?;
    ln!(b, r#"</head>"#)?;
    Ok(())
}

#[rustfmt::skip]
fn generate_field(
    b: &mut String,
    field: Field,
    old: &FormData,
    errors: &FieldErrors,
) -> ah::Result<()> {
    let name = field.as_str();
    let label = field_label(field);
    let value = html_safe_escape(old.get(field));

    ln!(b, r#"        <div class="field">"#)?;
    ln!(b, r#"            <label for="{name}">{label}</label>"#)?;
    match field {
        Field::Message => {
            ln!(b, r#"            <textarea id="{name}" name="{name}" rows="6">{value}</textarea>"#)?;
        }
        Field::Email => {
            ln!(b, r#"            <input type="email" id="{name}" name="{name}" value="{value}" />"#)?;
        }
        Field::Name => {
            ln!(b, r#"            <input type="text" id="{name}" name="{name}" value="{value}" />"#)?;
        }
    }
    if let Some(error) = errors.get(&field) {
        let error = html_safe_escape(error);
        ln!(b, r#"            <p class="error">{error}</p>"#)?;
    }
    ln!(b, r#"        </div>"#)?;
    Ok(())
}

/// Generate the contact form page.
///
/// `old` holds the previously submitted and sanitized values.
/// If `errors` is not empty, the page asks to correct the errors.
#[rustfmt::skip]
pub fn generate_form(old: &FormData, errors: &FieldErrors) -> ah::Result<String> {
    let mut b = String::with_capacity(DEFAULT_HTML_ALLOC);

    let (title, heading) = if errors.is_empty() {
        (TITLE_FORM.to_string(), TITLE_FORM)
    } else {
        (format!("{TITLE_FORM} - {TITLE_ERRORS}"), TITLE_ERRORS)
    };

    generate_head(&mut b, &title)?;
    ln!(b, r#"<body>"#)?;
    ln!(b, r#"    <h1>{heading}</h1>"#)?;
    ln!(b, r#"    <form method="post" action="/submit" novalidate>"#)?;
    for field in Field::ALL {
        generate_field(&mut b, field, old, errors)?;
    }
    ln!(b, r#"        <button type="submit">Invia</button>"#)?;
    ln!(b, r#"    </form>"#)?;
    ln!(b, r#"</body>"#)?;
    ln!(b, r#"</html>"#)?;
    Ok(b)
}

/// Generate the confirmation page after a successful submission.
#[rustfmt::skip]
pub fn generate_thanks(data: &FormData) -> ah::Result<String> {
    let mut b = String::with_capacity(DEFAULT_HTML_ALLOC);
    let name = html_safe_escape(&data.name);

    generate_head(&mut b, TITLE_THANKS)?;
    ln!(b, r#"<body>"#)?;
    ln!(b, r#"    <h1>{TITLE_THANKS}, {name}!</h1>"#)?;
    ln!(b, r#"    <p>Il tuo messaggio è stato ricevuto.</p>"#)?;
    ln!(b, r#"    <p><a href="/">Torna alla form</a></p>"#)?;
    ln!(b, r#"</body>"#)?;
    ln!(b, r#"</html>"#)?;
    Ok(b)
}


// vim: ts=4 sw=4 expandtab
