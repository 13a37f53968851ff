//! One-time notifications that survive a redirect.
//!
//! The queue lives in a signed cookie. `push` appends a message, `take`
//! hands the whole queue to the page being rendered and clears it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tower_cookies::cookie::Cookie;
use tower_cookies::{Cookies, Key};

pub const FLASH_COOKIE: &str = "flash";

pub fn push(cookies: &Cookies, key: &Key, message: impl Into<String>) {
	let jar = cookies.signed(key);
	let mut queue = jar.get(FLASH_COOKIE)
		.map(|c| decode(c.value()))
		.unwrap_or_default();
	queue.push(message.into());

	let Some(value) = encode(&queue) else { return };
	jar.add(
		Cookie::build((FLASH_COOKIE, value))
			.path("/")
			.http_only(true)
			.build()
	);
}

pub fn take(cookies: &Cookies, key: &Key) -> Vec<String> {
	let jar = cookies.signed(key);
	// a tampered cookie fails verification and reads as absent
	let Some(cookie) = jar.get(FLASH_COOKIE) else {
		// drop an unsigned leftover, if any, so it does not linger
		if cookies.get(FLASH_COOKIE).is_some() {
			cookies.remove(removal());
		}
		return Vec::new();
	};
	jar.remove(removal());
	decode(cookie.value())
}

fn removal() -> Cookie<'static> {
	Cookie::build(FLASH_COOKIE).path("/").build()
}

fn encode(queue: &[String]) -> Option<String> {
	match serde_json::to_vec(queue) {
		Ok(json) => Some(URL_SAFE_NO_PAD.encode(json)),
		Err(e) => {
			tracing::warn!(error = %e, "could not encode flash queue");
			None
		},
	}
}

fn decode(value: &str) -> Vec<String> {
	URL_SAFE_NO_PAD.decode(value).ok()
		.and_then(|json| serde_json::from_slice(&json).ok())
		.unwrap_or_default()
}
