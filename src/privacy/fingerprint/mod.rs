// src/privacy/fingerprint/mod.rs
//! What a User-Agent header gives away about the browser, OS and device.

use crate::models::UserAgentDetails;

const UNKNOWN: &str = "Unknown";

// Windows NT kernel versions and the release names users know them by.
const WINDOWS_VERSIONS: &[(&str, &str)] = &[
    ("10.0", "Windows 10"),
    ("6.3", "Windows 8.1"),
    ("6.2", "Windows 8"),
    ("6.1", "Windows 7"),
    ("6.0", "Windows Vista"),
    ("5.2", "Windows XP x64"),
    ("5.1", "Windows XP"),
];

pub fn parse_user_agent(user_agent: &str) -> UserAgentDetails {
    UserAgentDetails {
        user_agent: user_agent.to_string(),
        browser: detect_browser(user_agent),
        os: detect_os(user_agent),
        device: detect_device(user_agent).to_string(),
    }
}

// The token following `marker`, up to the next whitespace.
fn token_after<'a>(user_agent: &'a str, marker: &str) -> Option<&'a str> {
    user_agent
        .split_once(marker)
        .and_then(|(_, rest)| rest.split_whitespace().next())
}

// Chromium derivatives also carry "Chrome/" and "Safari/", so they are checked first.
fn detect_browser(user_agent: &str) -> String {
    if let Some(version) = token_after(user_agent, "Firefox/") {
        return format!("Firefox {}", version);
    }
    if let Some(version) = token_after(user_agent, "Edg/") {
        return format!("Edge {}", version);
    }
    if let Some(version) = token_after(user_agent, "OPR/").or_else(|| token_after(user_agent, "Opera/")) {
        return format!("Opera {}", version);
    }
    if let Some(version) = token_after(user_agent, "Chrome/") {
        return format!("Chrome {}", version);
    }
    if user_agent.contains("Safari/") {
        let version = token_after(user_agent, "Version/").unwrap_or(UNKNOWN);
        return format!("Safari {}", version);
    }
    UNKNOWN.to_string()
}

fn detect_os(user_agent: &str) -> String {
    if user_agent.contains("Windows NT") {
        let version = user_agent
            .split_once("Windows NT ")
            .and_then(|(_, rest)| rest.split(|c| c == ';' || c == ')').next())
            .map(str::trim);

        return match version {
            Some(v) => WINDOWS_VERSIONS
                .iter()
                .find(|(nt, _)| *nt == v)
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| format!("Windows (NT {})", v)),
            None => "Windows".to_string(),
        };
    }

    // Android reports "Linux" and iOS reports "like Mac OS X", so the mobile checks go first.
    if user_agent.contains("Android") {
        "Android".to_string()
    } else if user_agent.contains("iPhone") || user_agent.contains("iPad") || user_agent.contains("iOS") {
        "iOS".to_string()
    } else if user_agent.contains("Macintosh") {
        "macOS".to_string()
    } else if user_agent.contains("Linux") {
        "Linux".to_string()
    } else {
        UNKNOWN.to_string()
    }
}

fn detect_device(user_agent: &str) -> &'static str {
    if user_agent.contains("Mobile") {
        "Mobile"
    } else if user_agent.contains("Tablet") || user_agent.contains("iPad") {
        "Tablet"
    } else {
        "Desktop"
    }
}
