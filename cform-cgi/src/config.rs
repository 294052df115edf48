// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use anyhow::{self as ah, format_err as err, Context as _};
use configparser::ini::Ini;
use std::path::Path;

const SECT: &str = "CFORM-CGI";

const DEFAULT_MAX_POST_BODY: u64 = 1024 * 1024;
const DEFAULT_LOG_FILTER: &str = "warn";

fn parse_u64(s: &str) -> ah::Result<u64> {
    let s = s.trim();
    if let Some(s) = s.strip_prefix("0x") {
        Ok(u64::from_str_radix(s, 16)?)
    } else {
        Ok(s.parse::<u64>()?)
    }
}

fn parse_bool(s: &str) -> ah::Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(err!("Invalid boolean string")),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CgiConfig {
    max_post_body: u64,
    debug: bool,
    log_filter: String,
}

impl Default for CgiConfig {
    fn default() -> Self {
        Self {
            max_post_body: DEFAULT_MAX_POST_BODY,
            debug: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CgiConfig {
    /// Load the configuration file.
    pub fn load(path: &Path) -> ah::Result<Self> {
        let mut ini = Ini::new_cs();
        if let Err(e) = ini.load(path) {
            return Err(err!("Failed to load configuration {}: {e}", path.display()));
        }
        Self::from_ini(&ini)
    }

    /// Parse the configuration from a string.
    #[cfg(test)]
    pub fn parse(text: &str) -> ah::Result<Self> {
        let mut ini = Ini::new_cs();
        if let Err(e) = ini.read(text.to_string()) {
            return Err(err!("Failed to parse configuration: {e}"));
        }
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> ah::Result<Self> {
        let mut conf = Self::default();
        if let Some(v) = ini.get(SECT, "max-post-body") {
            conf.max_post_body = parse_u64(&v).context("max-post-body")?;
        }
        if let Some(v) = ini.get(SECT, "debug") {
            conf.debug = parse_bool(&v).context("debug")?;
        }
        if let Some(v) = ini.get(SECT, "log-filter") {
            conf.log_filter = v.trim().to_string();
        }
        Ok(conf)
    }

    /// Maximum accepted POST body length, in bytes.
    pub fn max_post_body(&self) -> u64 {
        self.max_post_body
    }

    /// Emit the runtime debug header.
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}


// vim: ts=4 sw=4 expandtab
