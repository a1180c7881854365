// this_file: crates/textsrc/src/host.rs

//! An in-process graphics host
//!
//! [`MemoryHost`] keeps textures as byte vectors and records every call it
//! receives. The CLI renders through it and tests use the call log to
//! check ordering and scope discipline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;

use textsrc_core::{
    error::{Result, TextureError},
    types::{Canvas, PixelBuffer, TextureFormat},
    GraphicsHost, TextureId,
};

/// One call received by a [`MemoryHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    EnterGraphics,
    LeaveGraphics,
    Create {
        texture: TextureId,
        width: u32,
        height: u32,
    },
    CreateFailed {
        width: u32,
        height: u32,
    },
    Destroy(TextureId),
    Update(TextureId),
    Draw(TextureId),
}

struct StoredTexture {
    width: u32,
    height: u32,
    format: TextureFormat,
    data: Vec<u8>,
}

/// Textures in memory, calls on record
#[derive(Default)]
pub struct MemoryHost {
    textures: Mutex<HashMap<TextureId, StoredTexture>>,
    events: Mutex<Vec<HostEvent>>,
    next_id: AtomicU64,
    depth: AtomicUsize,
    fail_creates: AtomicBool,
    outside_scope_calls: AtomicUsize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `create_texture` fail until switched off again
    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Every call so far, oldest first
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().clone()
    }

    pub fn clear_events(&self) {
        self.events.lock().clear();
    }

    /// Number of live textures
    pub fn texture_count(&self) -> usize {
        self.textures.lock().len()
    }

    pub fn texture_size(&self, texture: TextureId) -> Option<Canvas> {
        self.textures
            .lock()
            .get(&texture)
            .map(|stored| Canvas::new(stored.width, stored.height))
    }

    /// Copy of a texture's current pixels
    pub fn texture_pixels(&self, texture: TextureId) -> Option<PixelBuffer> {
        self.textures.lock().get(&texture).map(|stored| match stored.format {
            TextureFormat::Rgba8 => PixelBuffer {
                width: stored.width,
                height: stored.height,
                data: stored.data.clone(),
            },
        })
    }

    /// Whether the graphics context is currently held
    pub fn in_graphics(&self) -> bool {
        self.depth.load(Ordering::SeqCst) > 0
    }

    /// Texture calls made without holding the graphics context
    pub fn outside_scope_calls(&self) -> usize {
        self.outside_scope_calls.load(Ordering::SeqCst)
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().push(event);
    }

    fn check_scope(&self, op: &str) {
        if !self.in_graphics() {
            log::warn!("{} called outside the graphics context", op);
            self.outside_scope_calls.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl GraphicsHost for MemoryHost {
    fn enter_graphics(&self) {
        self.depth.fetch_add(1, Ordering::SeqCst);
        self.record(HostEvent::EnterGraphics);
    }

    fn leave_graphics(&self) {
        let _ = self
            .depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |depth| {
                depth.checked_sub(1)
            });
        self.record(HostEvent::LeaveGraphics);
    }

    fn create_texture(
        &self,
        width: u32,
        height: u32,
        format: TextureFormat,
        data: &[u8],
    ) -> Result<TextureId> {
        self.check_scope("create_texture");

        let expected = width as usize * height as usize * format.bytes_per_pixel() as usize;
        if self.fail_creates.load(Ordering::SeqCst) || width == 0 || height == 0 {
            self.record(HostEvent::CreateFailed { width, height });
            return Err(TextureError::CreationFailed { width, height }.into());
        }
        if data.len() != expected {
            self.record(HostEvent::CreateFailed { width, height });
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }

        let texture = TextureId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.textures.lock().insert(
            texture,
            StoredTexture {
                width,
                height,
                format,
                data: data.to_vec(),
            },
        );
        self.record(HostEvent::Create {
            texture,
            width,
            height,
        });
        Ok(texture)
    }

    fn destroy_texture(&self, texture: TextureId) {
        self.check_scope("destroy_texture");
        if self.textures.lock().remove(&texture).is_none() {
            log::warn!("destroy_texture: unknown texture {}", texture.0);
        }
        self.record(HostEvent::Destroy(texture));
    }

    fn update_texture(&self, texture: TextureId, data: &[u8], stride: u32) -> Result<()> {
        self.check_scope("update_texture");

        let mut textures = self.textures.lock();
        let stored = textures
            .get_mut(&texture)
            .ok_or(TextureError::UnknownHandle(texture.0))?;

        let row = stored.width * stored.format.bytes_per_pixel();
        let expected = stored.data.len();
        if stride != row || data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }

        stored.data.copy_from_slice(data);
        drop(textures);
        self.record(HostEvent::Update(texture));
        Ok(())
    }

    fn draw_sprite(&self, texture: TextureId, _x: u32, _y: u32, _width: u32, _height: u32) {
        self.record(HostEvent::Draw(texture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsrc_core::GraphicsScope;

    fn pixels(width: u32, height: u32, fill: u8) -> Vec<u8> {
        vec![fill; (width * height * 4) as usize]
    }

    #[test]
    fn test_scope_enters_and_leaves() {
        let host = MemoryHost::new();
        {
            let _scope = GraphicsScope::enter(&host);
            assert!(host.in_graphics());
        }
        assert!(!host.in_graphics());
        assert_eq!(
            host.events(),
            vec![HostEvent::EnterGraphics, HostEvent::LeaveGraphics]
        );
    }

    #[test]
    fn test_create_update_destroy() {
        let host = MemoryHost::new();
        let scope = GraphicsScope::enter(&host);

        let texture = scope
            .host()
            .create_texture(32, 32, TextureFormat::Rgba8, &pixels(32, 32, 1))
            .unwrap();
        assert_eq!(host.texture_size(texture), Some(Canvas::new(32, 32)));

        scope
            .host()
            .update_texture(texture, &pixels(32, 32, 7), 128)
            .unwrap();
        let stored = host.texture_pixels(texture).unwrap();
        assert!(stored.data.iter().all(|&byte| byte == 7));

        scope.host().destroy_texture(texture);
        assert_eq!(host.texture_count(), 0);
        drop(scope);
        assert_eq!(host.outside_scope_calls(), 0);
    }

    #[test]
    fn test_update_rejects_wrong_size() {
        let host = MemoryHost::new();
        let texture = host
            .create_texture(32, 32, TextureFormat::Rgba8, &pixels(32, 32, 0))
            .unwrap();
        assert!(host.update_texture(texture, &pixels(34, 32, 0), 136).is_err());
        assert!(host.update_texture(TextureId(99), &pixels(32, 32, 0), 128).is_err());
        // no scope was held for any of these
        assert_eq!(host.outside_scope_calls(), 3);
    }

    #[test]
    fn test_failing_creates() {
        let host = MemoryHost::new();
        host.set_fail_creates(true);
        let result = host.create_texture(32, 32, TextureFormat::Rgba8, &pixels(32, 32, 0));
        assert!(result.is_err());
        assert_eq!(host.texture_count(), 0);
        assert_eq!(
            host.events(),
            vec![HostEvent::CreateFailed {
                width: 32,
                height: 32
            }]
        );

        host.set_fail_creates(false);
        assert!(host
            .create_texture(32, 32, TextureFormat::Rgba8, &pixels(32, 32, 0))
            .is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let host = MemoryHost::new();
        let a = host
            .create_texture(32, 32, TextureFormat::Rgba8, &pixels(32, 32, 0))
            .unwrap();
        let b = host
            .create_texture(32, 32, TextureFormat::Rgba8, &pixels(32, 32, 0))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(host.texture_count(), 2);
    }
}
