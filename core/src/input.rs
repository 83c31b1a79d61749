/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use email_address::EmailAddress;
use url::Url;

use super::consts::{IMAGE_EXTENSIONS, PORT_RANGE};

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

pub fn load_secret(f: &str) -> String {
    let s = std::fs::read_to_string(f).unwrap_or_default();
    s.trim().to_string()
}

pub fn validate_username(s: &str) -> Result<(), String> {
    if s.len() < 4 {
        return Err("Username must be at least 4 characters long".to_string());
    }

    if s.len() > 40 {
        return Err("Username cannot exceed 40 characters".to_string());
    }

    if s.contains(char::is_whitespace) {
        return Err("Username cannot contain whitespace".to_string());
    }

    Ok(())
}

pub fn validate_action_name(s: &str) -> Result<(), String> {
    if s.len() < 3 {
        return Err("Name must be at least 3 characters long".to_string());
    }

    if s.len() > 25 {
        return Err("Name cannot exceed 25 characters".to_string());
    }

    Ok(())
}

pub fn validate_display_name(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if s.len() > 60 {
        return Err("Name cannot exceed 60 characters".to_string());
    }

    Ok(())
}

pub fn validate_description(s: &str) -> Result<(), String> {
    if s.len() > 500 {
        return Err("Description cannot exceed 500 characters".to_string());
    }

    Ok(())
}

pub fn validate_email(s: &str) -> Result<(), String> {
    if EmailAddress::is_valid(s) {
        Ok(())
    } else {
        Err(format!("`{}` is not a valid email address", s))
    }
}

pub fn validate_link_url(s: &str) -> Result<(), String> {
    let url = Url::parse(s).map_err(|e| format!("Invalid URL: {}", e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err("URL must use http or https".to_string());
    }

    Ok(())
}

pub fn validate_image_filename(s: &str) -> Result<(), String> {
    let extension = s.rsplit('.').next().unwrap_or_default().to_lowercase();

    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "File extension must be one of: {}",
            IMAGE_EXTENSIONS.join(", ")
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password cannot exceed 128 characters".to_string());
    }

    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_uppercase {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    if !has_lowercase {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !has_digit {
        return Err("Password must contain at least one digit".to_string());
    }

    Ok(())
}
