// src/infrastructure/security/cookie.rs
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "sid";

/// Attributes shared by the session cookie and its removal.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub domain: Option<String>,
}

/// Signs session ids as `<id>.<HMAC-SHA256, base64url>`.
#[derive(Clone)]
pub struct SessionCookieSigner {
    mac: HmacSha256,
    settings: CookieSettings,
}

impl SessionCookieSigner {
    pub fn new(secret: &str, settings: CookieSettings) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())?,
            settings,
        })
    }

    pub fn sign(&self, session_id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(session_id.as_bytes());
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{session_id}.{tag}")
    }

    /// Return the session id when the signature matches.
    pub fn verify(&self, value: &str) -> Option<String> {
        let (session_id, tag) = value.rsplit_once('.')?;
        if session_id.is_empty() {
            return None;
        }
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;
        let mut mac = self.mac.clone();
        mac.update(session_id.as_bytes());
        mac.verify_slice(&tag).ok()?;
        Some(session_id.to_string())
    }

    /// `Set-Cookie` value carrying a signed session id.
    pub fn issue(&self, session_id: &str, max_age_secs: u64) -> String {
        self.render(&self.sign(session_id), max_age_secs)
    }

    /// `Set-Cookie` value that clears the session cookie.
    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age_secs: u64) -> String {
        let mut cookie =
            format!("{SESSION_COOKIE}={value}; Path=/; HttpOnly; Max-Age={max_age_secs}");
        if self.settings.secure {
            cookie.push_str("; SameSite=None; Secure");
        } else {
            cookie.push_str("; SameSite=Lax");
        }
        if let Some(domain) = &self.settings.domain {
            cookie.push_str("; Domain=");
            cookie.push_str(domain);
        }
        cookie
    }
}
