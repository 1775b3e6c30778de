#![forbid(unsafe_code)]

//! Overlay mount points.
//!
//! An overlay is a full-viewport layer drawn after the base frame and
//! composed on top of it. Widgets that need to escape their own area (menus,
//! dropdowns, tooltips) render into an overlay through an [`OverlayHandle`]
//! instead of into the frame they were given, the terminal analogue of a DOM
//! portal.
//!
//! Mount points are registered once by the host under a name and the returned
//! handle is passed explicitly to the widgets that use it. Rendering through a
//! handle whose mount point does not exist is an error, never a silent no-op:
//! the widget would otherwise never become visible.
//!
//! # Invariants
//!
//! 1. Mount point names are unique within a host.
//! 2. A handle never aliases a different mount point, even after the one it
//!    was issued for is unregistered.
//! 3. Layers compose and hit-test in registration order (last on top).

use std::fmt;

use crate::frame::{Frame, HitData, HitId, HitRegion};
use mlui_core::geometry::Size;

/// Conventional name of the shared overlay layer.
pub const DEFAULT_OVERLAY_ID: &str = "overlay_container";

/// Handle to a registered overlay mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u32);

impl OverlayHandle {
    /// Raw key of the handle.
    #[inline]
    pub const fn key(self) -> u32 {
        self.0
    }
}

/// Errors raised by [`OverlayHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    /// The handle's mount point is not registered (never was, or was removed).
    MissingMountPoint(OverlayHandle),
    /// A mount point with this name is already registered.
    DuplicateMountPoint(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMountPoint(handle) => {
                write!(f, "overlay mount point #{} is not registered", handle.key())
            }
            Self::DuplicateMountPoint(name) => {
                write!(f, "overlay mount point {name:?} is already registered")
            }
        }
    }
}

impl std::error::Error for OverlayError {}

#[derive(Debug)]
struct OverlayRoot {
    handle: OverlayHandle,
    name: String,
    frame: Frame,
}

/// Registry of overlay layers for one viewport.
#[derive(Debug)]
pub struct OverlayHost {
    size: Size,
    roots: Vec<OverlayRoot>,
    next_key: u32,
}

impl OverlayHost {
    /// Create an empty host for a viewport of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            roots: Vec::new(),
            next_key: 0,
        }
    }

    /// Create a host with the conventional [`DEFAULT_OVERLAY_ID`] layer.
    pub fn with_default_layer(size: Size) -> (Self, OverlayHandle) {
        let mut host = Self::new(size);
        let handle = host.push_root(DEFAULT_OVERLAY_ID.to_owned());
        (host, handle)
    }

    /// Viewport size shared by every layer.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of registered mount points.
    #[inline]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether no mount point is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Register a new mount point.
    pub fn register(&mut self, name: impl Into<String>) -> Result<OverlayHandle, OverlayError> {
        let name = name.into();
        if self.roots.iter().any(|root| root.name == name) {
            return Err(OverlayError::DuplicateMountPoint(name));
        }
        Ok(self.push_root(name))
    }

    fn push_root(&mut self, name: String) -> OverlayHandle {
        let handle = OverlayHandle(self.next_key);
        self.next_key += 1;
        mlui_core::debug!(overlay = %name, key = handle.key(), "overlay mount point registered");
        self.roots.push(OverlayRoot {
            handle,
            name,
            frame: Frame::with_hit_grid(self.size.width, self.size.height),
        });
        handle
    }

    /// Remove a mount point. Returns `false` if it was not registered.
    pub fn unregister(&mut self, handle: OverlayHandle) -> bool {
        let before = self.roots.len();
        self.roots.retain(|root| root.handle != handle);
        before != self.roots.len()
    }

    /// Look up a mount point by name.
    pub fn handle(&self, name: &str) -> Option<OverlayHandle> {
        self.roots
            .iter()
            .find(|root| root.name == name)
            .map(|root| root.handle)
    }

    /// Whether the handle's mount point is registered.
    pub fn contains(&self, handle: OverlayHandle) -> bool {
        self.roots.iter().any(|root| root.handle == handle)
    }

    /// The layer frame behind a handle.
    pub fn frame(&self, handle: OverlayHandle) -> Result<&Frame, OverlayError> {
        self.roots
            .iter()
            .find(|root| root.handle == handle)
            .map(|root| &root.frame)
            .ok_or(OverlayError::MissingMountPoint(handle))
    }

    /// Mutable layer frame behind a handle.
    pub fn frame_mut(&mut self, handle: OverlayHandle) -> Result<&mut Frame, OverlayError> {
        self.roots
            .iter_mut()
            .find(|root| root.handle == handle)
            .map(|root| &mut root.frame)
            .ok_or(OverlayError::MissingMountPoint(handle))
    }

    /// Clear every layer before a new render pass.
    pub fn clear(&mut self) {
        for root in &mut self.roots {
            root.frame.clear();
        }
    }

    /// Resize every layer to a new viewport size, discarding their contents.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        for root in &mut self.roots {
            root.frame = Frame::with_hit_grid(size.width, size.height);
        }
    }

    /// Compose all layers over `target`, in registration order.
    pub fn compose(&self, target: &mut Frame) {
        for root in &self.roots {
            target.buffer.overlay_from(&root.frame.buffer);
        }
    }

    /// Hit test the layers from top to bottom.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(OverlayHandle, HitId, HitRegion, HitData)> {
        self.roots.iter().rev().find_map(|root| {
            root.frame
                .hit_test(x, y)
                .map(|(id, region, data)| (root.handle, id, region, data))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use mlui_core::geometry::Rect;

    #[test]
    fn default_layer_is_registered() {
        let (host, handle) = OverlayHost::with_default_layer(Size::new(10, 4));
        assert_eq!(host.handle(DEFAULT_OVERLAY_ID), Some(handle));
        assert!(host.contains(handle));
        assert_eq!(host.frame(handle).unwrap().size(), Size::new(10, 4));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut host = OverlayHost::new(Size::new(4, 4));
        host.register("menus").unwrap();
        assert_eq!(
            host.register("menus"),
            Err(OverlayError::DuplicateMountPoint("menus".into()))
        );
    }

    #[test]
    fn unregistered_handle_is_missing() {
        let mut host = OverlayHost::new(Size::new(4, 4));
        let handle = host.register("menus").unwrap();
        assert!(host.unregister(handle));
        assert!(!host.unregister(handle));
        assert_eq!(
            host.frame_mut(handle).err(),
            Some(OverlayError::MissingMountPoint(handle))
        );
    }

    #[test]
    fn handles_are_not_reused() {
        let mut host = OverlayHost::new(Size::new(4, 4));
        let first = host.register("a").unwrap();
        host.unregister(first);
        let second = host.register("a").unwrap();
        assert_ne!(first, second);
        assert!(host.frame(first).is_err());
    }

    #[test]
    fn compose_draws_layers_over_base() {
        let (mut host, handle) = OverlayHost::with_default_layer(Size::new(3, 1));
        host.frame_mut(handle)
            .unwrap()
            .buffer
            .set(2, 0, Cell::from_char('!'));

        let mut base = Frame::new(3, 1);
        base.buffer.fill(base.bounds(), Cell::from_char('.'));
        host.compose(&mut base);
        assert_eq!(base.buffer.row_text(0), "..!");
    }

    #[test]
    fn top_layer_wins_hit_test() {
        let mut host = OverlayHost::new(Size::new(4, 1));
        let lower = host.register("lower").unwrap();
        let upper = host.register("upper").unwrap();
        host.frame_mut(lower).unwrap().register_hit(
            Rect::new(0, 0, 4, 1),
            HitId::new(1),
            HitRegion::Content,
            0,
        );
        host.frame_mut(upper).unwrap().register_hit(
            Rect::new(2, 0, 1, 1),
            HitId::new(2),
            HitRegion::Row,
            5,
        );

        assert_eq!(host.hit_test(2, 0).map(|h| h.0), Some(upper));
        assert_eq!(host.hit_test(0, 0).map(|h| h.0), Some(lower));
    }

    #[test]
    fn resize_and_clear_reset_layers() {
        let (mut host, handle) = OverlayHost::with_default_layer(Size::new(2, 2));
        host.frame_mut(handle)
            .unwrap()
            .buffer
            .set(0, 0, Cell::from_char('x'));
        host.clear();
        assert!(host.frame(handle).unwrap().buffer.get(0, 0).unwrap().is_empty());

        host.resize(Size::new(5, 3));
        assert_eq!(host.frame(handle).unwrap().size(), Size::new(5, 3));
    }
}
