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

mod cgi;
mod config;
mod formfields;
mod urlencoded;

use crate::{
    cgi::{Cgi, CgiEnv},
    config::CgiConfig,
};
use anyhow::{self as ah, format_err as err};
use cform_app::Response;
use clap::Parser;
use std::{io, path::PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CFORM_LOG";

#[derive(Parser, Debug, Clone)]
struct Opts {
    /// Path to the configuration file.
    /// The built-in defaults are used, if not given.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(config: &CgiConfig) -> ah::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    // stderr ends up in the webserver error log.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| err!("Failed to initialize logging: {e}"))
}

fn main() -> ah::Result<()> {
    let opts = Opts::parse();

    let config = match &opts.config {
        Some(path) => match CgiConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                Response::internal_error("Configuration failed.").send(&mut io::stdout())?;
                return Err(e);
            }
        },
        None => CgiConfig::default(),
    };
    if let Err(e) = init_logging(&config) {
        Response::internal_error("Logging setup failed.").send(&mut io::stdout())?;
        return Err(e);
    }

    let cgi = Cgi::new(CgiEnv::from_process(), config);
    cgi.run(&mut io::stdin().lock(), &mut io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        let config = CgiConfig::default();
        let _ = init_logging(&config);
        let e = init_logging(&config).unwrap_err();
        assert!(e.to_string().starts_with("Failed to initialize logging"));
    }
}

// vim: ts=4 sw=4 expandtab
