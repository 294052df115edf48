// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    pagegen::{generate_form, generate_thanks},
    request::Request,
    response::{HttpStatus, Response},
    validator::{ContactFormValidator, FieldErrors, FormData},
};

/// Actions of the contact form.
#[derive(Clone, Debug, Default)]
pub struct FormController {
    validator: ContactFormValidator,
}

impl FormController {
    pub fn new(validator: ContactFormValidator) -> Self {
        Self { validator }
    }

    /// Show the empty contact form.
    pub fn show_form(&self, _request: &Request) -> Response {
        generate_form(&FormData::default(), &FieldErrors::new())
            .map(|body| Response::html(body, HttpStatus::Ok))
            .into()
    }

    /// Validate a submitted form.
    ///
    /// On errors the form is shown again with the sanitized values
    /// and the error messages.
    pub fn handle_submit(&self, request: &Request) -> Response {
        let result = self.validator.validate(request.fields());
        if result.is_valid() {
            generate_thanks(&result.data)
                .map(|body| Response::html(body, HttpStatus::Ok))
                .into()
        } else {
            generate_form(&result.data, &result.errors)
                .map(|body| Response::html(body, HttpStatus::UnprocessableEntity))
                .into()
        }
    }
}


// vim: ts=4 sw=4 expandtab
