/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for input validation and parsing functions

extern crate core as jumper_core;

use jumper_core::input::*;

#[test]
fn test_port_in_range() {
    let port = port_in_range("8080").unwrap();
    assert_eq!(port, 8080);

    let port = port_in_range("65535").unwrap();
    assert_eq!(port, 65535);

    let port = port_in_range("65536").unwrap_err();
    assert_eq!(port, "port not in range 1-65535");

    let port = port_in_range("0").unwrap_err();
    assert_eq!(port, "port not in range 1-65535");
}

#[test]
fn test_greater_than_zero() {
    let num = greater_than_zero::<u32>("1").unwrap();
    assert_eq!(num, 1);

    assert!(greater_than_zero::<usize>("0").is_err());
    assert!(greater_than_zero::<usize>("abc").is_err());
}

#[test]
fn test_load_secret_missing_file_is_empty() {
    assert_eq!(load_secret("/nonexistent/secret/file"), "");
}

#[test]
fn test_validate_username() {
    assert!(validate_username("alice").is_ok());
    assert!(validate_username("ab").is_err());
    assert!(validate_username("with space").is_err());
    assert!(validate_username(&"a".repeat(41)).is_err());
}

#[test]
fn test_validate_action_name() {
    assert!(validate_action_name("deploy").is_ok());
    assert!(validate_action_name("ab").is_err());
    assert!(validate_action_name(&"a".repeat(26)).is_err());
}

#[test]
fn test_validate_display_name() {
    assert!(validate_display_name("Operations Team").is_ok());
    assert!(validate_display_name("   ").is_err());
    assert!(validate_display_name(&"a".repeat(61)).is_err());
}

#[test]
fn test_validate_description() {
    assert!(validate_description("short").is_ok());
    assert!(validate_description(&"a".repeat(501)).is_err());
}

#[test]
fn test_validate_email() {
    assert!(validate_email("user@example.com").is_ok());
    assert!(validate_email("not-an-email").is_err());
}

#[test]
fn test_validate_link_url() {
    assert!(validate_link_url("https://example.com").is_ok());
    assert!(validate_link_url("http://example.com/path").is_ok());
    assert!(validate_link_url("ftp://example.com").is_err());
    assert!(validate_link_url("not a url").is_err());
}

#[test]
fn test_validate_image_filename() {
    assert!(validate_image_filename("photo.png").is_ok());
    assert!(validate_image_filename("photo.JPG").is_ok());
    assert!(validate_image_filename("photo.gif").is_err());
    assert!(validate_image_filename("archive.tar.gz").is_err());
}

#[test]
fn test_validate_password() {
    assert!(validate_password("Password1").is_ok());
    assert!(validate_password("short1A").is_err());
    assert!(validate_password("alllowercase1").is_err());
    assert!(validate_password("ALLUPPERCASE1").is_err());
    assert!(validate_password("NoDigitsHere").is_err());
}
