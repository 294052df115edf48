// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![forbid(unsafe_code)]

//! Contact form application core.
//!
//! One [Request] goes in, one [Response] comes out.
//! Nothing in here touches the process environment or performs I/O,
//! except for [Response::send].

mod app;
mod controller;
mod email;
mod field;
mod pagegen;
mod request;
mod response;
mod sanitize;
mod validator;

pub use crate::{
    app::{route, Action, App},
    controller::FormController,
    email::is_valid_email,
    field::{field_map, FieldMap, FieldValue},
    pagegen::html_safe_escape,
    request::{Request, ServerVars, VAR_METHOD, VAR_URI},
    response::{Headers, HttpStatus, Response, CONTENT_TYPE, MIME_HTML, MIME_TEXT},
    sanitize::{collapse_whitespace, sanitize, sanitize_text, strip_tags},
    validator::{
        ContactFormValidator, Field, FieldErrors, FieldOutcome, FieldValidator, FormData,
        ValidationResult,
    },
};

// vim: ts=4 sw=4 expandtab
