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
    controller::FormController, request::Request, response::Response,
    validator::ContactFormValidator,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    ShowForm,
    HandleSubmit,
}

/// The route table. The first matching `(method, path)` wins.
const ROUTES: [(&str, &str, Action); 2] = [
    ("GET", "/", Action::ShowForm),
    ("POST", "/submit", Action::HandleSubmit),
];

/// Find the action for a request method and path.
pub fn route(method: &str, path: &str) -> Option<Action> {
    ROUTES
        .iter()
        .find(|(m, p, _)| *m == method && *p == path)
        .map(|(_, _, action)| *action)
}

/// The contact form application.
#[derive(Clone, Debug, Default)]
pub struct App {
    controller: FormController,
}

impl App {
    pub fn new() -> Self {
        Self::with_controller(FormController::new(ContactFormValidator::new()))
    }

    pub fn with_controller(controller: FormController) -> Self {
        Self { controller }
    }

    /// Handle one request.
    pub fn handle(&self, request: &Request) -> Response {
        let method = request.method();
        let path = request.path();
        let action = route(method, path);
        tracing::debug!(method, path, ?action, "Routing request");
        match action {
            Some(Action::ShowForm) => self.controller.show_form(request),
            Some(Action::HandleSubmit) => self.controller.handle_submit(request),
            None => Response::not_found(),
        }
    }
}


// vim: ts=4 sw=4 expandtab
