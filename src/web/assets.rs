//! Fire-and-forget image loading
//!
//! Each request spawns a future that fetches and decodes the image, then posts
//! the result to a shared inbox. Demos drain the inbox at the start of a frame
//! and upload whatever arrived.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::DemoError;
use crate::renderer::{RgbaImage, decode_rgba};

/// Completed loads keyed by whatever the demo uses to tell them apart
pub struct AssetInbox<K> {
    done: Rc<RefCell<Vec<(K, Result<RgbaImage, DemoError>)>>>,
}

impl<K: 'static> Default for AssetInbox<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: 'static> AssetInbox<K> {
    pub fn new() -> Self {
        Self {
            done: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn request(&mut self, key: K, url: &str) {
        let done = self.done.clone();
        let url = url.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_image(&url).await;
            if let Err(e) = &result {
                log::warn!("Asset {} failed: {}", url, e);
            }
            done.borrow_mut().push((key, result));
        });
    }

    /// Take every load that finished since the last call
    pub fn drain(&mut self) -> Vec<(K, Result<RgbaImage, DemoError>)> {
        std::mem::take(&mut *self.done.borrow_mut())
    }
}

async fn fetch_image(url: &str) -> Result<RgbaImage, DemoError> {
    let fetch_err = |reason: String| DemoError::Fetch {
        url: url.to_string(),
        reason,
    };
    let window = super::dom::window()?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fetch_err(format!("{:?}", e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| fetch_err("not a Response".to_string()))?;
    if !response.ok() {
        return Err(fetch_err(format!("HTTP {}", response.status())));
    }

    let buffer = response
        .array_buffer()
        .map_err(|e| fetch_err(format!("{:?}", e)))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| fetch_err(format!("{:?}", e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    decode_rgba(&bytes)
}
