// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::field::FieldValue;

type Chars<'a> = peekable_fwd_bwd::Peekable<std::str::Chars<'a>, 1, 1>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum StripState {
    Text,
    Tag { depth: usize, quote: Option<char> },
    Comment { dashes: usize },
}

/// Remove all markup tags from `text`.
///
/// Only the tags themselves are removed. Text enclosed by tags stays
/// visible, e.g. `<b>Mario</b>` becomes `Mario`.
/// A `<` that is followed by whitespace or the end of the text does not
/// open a tag and is kept.
/// An unterminated tag swallows the rest of the text.
pub fn strip_tags(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    let mut it = Chars::new(text.chars());
    let mut state = StripState::Text;

    while let Some(c) = it.next() {
        state = match state {
            StripState::Text => {
                if c != '<' {
                    ret.push(c);
                    StripState::Text
                } else if it.peek().is_none_or(|n| n.is_whitespace()) {
                    ret.push(c);
                    StripState::Text
                } else if it.peek() == Some(&'!') {
                    it.next();
                    if it.peek() == Some(&'-') {
                        it.next();
                        if it.peek() == Some(&'-') {
                            it.next();
                            StripState::Comment { dashes: 0 }
                        } else {
                            StripState::Tag { depth: 1, quote: None }
                        }
                    } else {
                        StripState::Tag { depth: 1, quote: None }
                    }
                } else {
                    StripState::Tag { depth: 1, quote: None }
                }
            }
            StripState::Tag { depth, quote: Some(q) } => {
                if c == q {
                    StripState::Tag { depth, quote: None }
                } else {
                    StripState::Tag { depth, quote: Some(q) }
                }
            }
            StripState::Tag { depth, quote: None } => match c {
                '"' | '\'' => StripState::Tag { depth, quote: Some(c) },
                '<' => StripState::Tag { depth: depth + 1, quote: None },
                '>' if depth <= 1 => StripState::Text,
                '>' => StripState::Tag { depth: depth - 1, quote: None },
                _ => StripState::Tag { depth, quote: None },
            },
            StripState::Comment { dashes } => match c {
                '-' => StripState::Comment { dashes: dashes + 1 },
                '>' if dashes >= 2 => StripState::Text,
                _ => StripState::Comment { dashes: 0 },
            },
        };
    }
    ret
}

/// Replace every run of whitespace (including newlines and tabs)
/// by a single space character.
pub fn collapse_whitespace(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                ret.push(' ');
            }
            in_space = true;
        } else {
            ret.push(c);
            in_space = false;
        }
    }
    ret
}

/// Normalize a text value: Strip tags, collapse whitespace and trim.
/// The order of these steps matters.
pub fn sanitize_text(text: &str) -> String {
    collapse_whitespace(&strip_tags(text)).trim().to_string()
}

/// Coerce a submitted value to text and normalize it.
///
/// An absent value sanitizes to the empty string.
pub fn sanitize(value: Option<&FieldValue>) -> String {
    match value {
        Some(value) => sanitize_text(&value.to_text()),
        None => String::new(),
    }
}


// vim: ts=4 sw=4 expandtab
