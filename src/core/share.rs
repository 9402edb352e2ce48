//! Sharing links from the terminal.
//!
//! Clipboard copies use the OSC 52 escape sequence, which most modern
//! terminal emulators (and tmux with `set-clipboard on`) forward to the
//! system clipboard. Social shares open the platform's share URL in the
//! default browser.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    #[error("could not write to the clipboard: {0}")]
    Clipboard(#[source] std::io::Error),

    #[error("could not open {url}: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Clipboard,
    Twitter,
    LinkedIn,
}

impl SharePlatform {
    pub fn label(self) -> &'static str {
        match self {
            SharePlatform::Clipboard => "Clipboard",
            SharePlatform::Twitter => "Twitter",
            SharePlatform::LinkedIn => "LinkedIn",
        }
    }
}

/// Web share URL for a platform. Twitter posts `text`; LinkedIn shares `url`.
pub fn share_url(platform: SharePlatform, url: &str, text: &str) -> Option<String> {
    match platform {
        SharePlatform::Clipboard => None,
        SharePlatform::Twitter => Some(format!(
            "https://twitter.com/intent/tweet?text={}",
            urlencoding::encode(text)
        )),
        SharePlatform::LinkedIn => Some(format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            urlencoding::encode(url)
        )),
    }
}

/// OSC 52 "set clipboard" sequence carrying `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) -> Result<(), ShareError> {
    out.write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| out.flush())
        .map_err(ShareError::Clipboard)
}

/// Share `url` on `platform`. Clipboard shares copy the bare link.
pub fn share_link(platform: SharePlatform, url: &str, text: &str) -> Result<(), ShareError> {
    match share_url(platform, url, text) {
        None => copy_to_clipboard(&mut std::io::stdout(), url),
        Some(target) => {
            log::info!("Opening {} share for {url}", platform.label());
            open_in_browser(&target)
        }
    }
}

/// Open `url` with the system's default handler.
pub fn open_in_browser(url: &str) -> Result<(), ShareError> {
    open::that(url).map_err(|source| ShareError::Browser {
        url: url.to_string(),
        source,
    })
}
