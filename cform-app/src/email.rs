// -*- coding: utf-8 -*-
//
// Simple contact form
//
// Copyright (C) 2024 Michael Büsch <m@bues.ch>
//
// Licensed under the Apache License version 2.0
// or the MIT license, at your option.
// SPDX-License-Identifier: Apache-2.0 OR MIT

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const LOCALEXTRA: &str = "!#$%&'*+/=?^_`{|}~-.";
const LABELEXTRA: &str = "-";

const ADDRSEP: char = '@';
const LABELSEP: char = '.';

const MAX_ADDR_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;
const MIN_TLD_LEN: usize = 2;

#[inline]
fn is_alnum(c: char) -> bool {
    UPPERCASE.contains(c) || LOWERCASE.contains(c) || NUMBERS.contains(c)
}

/// Check the local part (before the `@`).
fn check_local(local: &str) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_LEN {
        return false;
    }
    if local.starts_with(LABELSEP) || local.ends_with(LABELSEP) || local.contains("..") {
        return false;
    }
    local.chars().all(|c| is_alnum(c) || LOCALEXTRA.contains(c))
}

/// Check one dot separated domain label.
fn check_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with(LABELEXTRA)
        && !label.ends_with(LABELEXTRA)
        && label.chars().all(|c| is_alnum(c) || LABELEXTRA.contains(c))
}

/// Check the domain part (after the `@`).
fn check_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }
    let labels: Vec<&str> = domain.split(LABELSEP).collect();
    if labels.len() < 2 || !labels.iter().all(|l| check_label(l)) {
        return false;
    }
    // The top level domain is alphabetic.
    labels.last().is_some_and(|tld| {
        tld.len() >= MIN_TLD_LEN
            && tld
                .chars()
                .all(|c| UPPERCASE.contains(c) || LOWERCASE.contains(c))
    })
}

/// Conservative `local@domain.tld` email address format check.
///
/// Quoted local parts, IP address literals and internationalized
/// addresses are not accepted.
pub fn is_valid_email(addr: &str) -> bool {
    if addr.len() > MAX_ADDR_LEN {
        return false;
    }
    let Some((local, domain)) = addr.split_once(ADDRSEP) else {
        return false;
    };
    // Exactly one '@'.
    if domain.contains(ADDRSEP) {
        return false;
    }
    check_local(local) && check_domain(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@example.com"));
        assert!(is_valid_email("user+tag@example.co.uk"));
        assert!(is_valid_email("test123@test-domain.com"));
        assert!(is_valid_email("a@mail.sub.example.org"));
        assert!(is_valid_email("O'Neill@example.ie"));
        assert!(is_valid_email("UPPER@EXAMPLE.COM"));
    }

    #[test]
    fn test_invalid() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plaintext"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user space@example.com"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user@example.123"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user@example-.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("user.@example.com"));
        assert!(!is_valid_email("us..er@example.com"));
        assert!(!is_valid_email("user@example.com."));
        assert!(!is_valid_email("usér@example.com"));
        assert!(!is_valid_email("<user>@example.com"));
    }

    #[test]
    fn test_length_limits() {
        let local = "a".repeat(MAX_LOCAL_LEN);
        assert!(is_valid_email(&format!("{local}@example.com")));
        let local = "a".repeat(MAX_LOCAL_LEN + 1);
        assert!(!is_valid_email(&format!("{local}@example.com")));
        let label = "b".repeat(MAX_LABEL_LEN + 1);
        assert!(!is_valid_email(&format!("a@{label}.com")));
    }
}

// vim: ts=4 sw=4 expandtab
