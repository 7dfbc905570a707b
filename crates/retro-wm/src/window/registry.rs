//! Window registry: which windows exist, which one is focused

use std::cell::RefCell;
use std::collections::HashSet;

use serde::Serialize;

use crate::bus::{EventBus, WindowEvent};
use crate::error::{Result, WmError};
use super::{WindowId, WindowRecord};

/// Per-window visibility
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Content shown
    Visible,
    /// Content hidden, taskbar button kept
    Minimized,
}

/// Authoritative store of window records and the active-focus pointer.
///
/// The registry is a passive broadcaster: every operation records its effect
/// and publishes one event. Windows interpret the events themselves. No
/// borrow is held while publishing, so handlers may call back into it.
pub struct WindowRegistry {
    bus: EventBus,
    /// Registered windows in registration order
    records: RefCell<Vec<WindowRecord>>,
    /// Minimized flags, including latent (unregistered) windows
    minimized: RefCell<HashSet<WindowId>>,
    /// Focused window, `None` when nothing is active
    active: RefCell<Option<WindowId>>,
}

impl WindowRegistry {
    /// Create a registry publishing on `bus`
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            records: RefCell::new(Vec::new()),
            minimized: RefCell::new(HashSet::new()),
            active: RefCell::new(None),
        }
    }

    /// Bus the registry publishes on
    #[inline]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register a window, absorbing rejections.
    ///
    /// Returns `true` when a `WindowAdded` event was published.
    pub fn register(&self, record: WindowRecord) -> bool {
        match self.try_register(record) {
            Ok(()) => true,
            Err(WmError::EmptyWindowId) => {
                log::warn!("window registered without an id, ignoring");
                false
            }
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    /// Register a window, reporting why nothing was published
    pub fn try_register(&self, record: WindowRecord) -> Result<()> {
        if record.id.is_empty() {
            return Err(WmError::EmptyWindowId);
        }

        {
            let mut records = self.records.borrow_mut();
            if records.iter().any(|r| r.id == record.id) {
                return Err(WmError::DuplicateWindow(record.id));
            }
            records.push(record.clone());
        }

        self.bus.publish(&WindowEvent::WindowAdded { record });
        Ok(())
    }

    /// Remove a window record.
    ///
    /// The active pointer is left untouched even when it names `id`; picking
    /// a fallback is up to listeners of `WindowRemoved`. A latent minimized
    /// flag for `id` is dropped silently.
    pub fn unregister(&self, id: &WindowId) {
        let removed = {
            let mut records = self.records.borrow_mut();
            let before = records.len();
            records.retain(|r| &r.id != id);
            records.len() != before
        };
        self.minimized.borrow_mut().remove(id);

        if !removed {
            log::debug!("unregister of unknown window {id}");
            return;
        }

        self.bus.publish(&WindowEvent::WindowRemoved { id: id.clone() });
    }

    // =========================================================================
    // Visibility and focus
    // =========================================================================

    /// Mark a window minimized.
    ///
    /// Unregistered ids get a floating flag that only the window itself
    /// observes (latent window).
    pub fn minimize(&self, id: &WindowId) {
        if id.is_empty() {
            log::debug!("minimize without a window id");
            return;
        }
        self.minimized.borrow_mut().insert(id.clone());
        self.bus.publish(&WindowEvent::WindowMinimized { id: id.clone() });
    }

    /// Mark a window visible
    pub fn restore(&self, id: &WindowId) {
        if id.is_empty() {
            log::debug!("restore without a window id");
            return;
        }
        self.minimized.borrow_mut().remove(id);
        self.bus.publish(&WindowEvent::WindowRestored { id: id.clone() });
    }

    /// Move the focus pointer; `None` clears it.
    ///
    /// Visibility is not touched: focusing a minimized window leaves it
    /// minimized.
    pub fn focus(&self, id: Option<&WindowId>) {
        let id = id.cloned();
        *self.active.borrow_mut() = id.clone();
        self.bus.publish(&WindowEvent::ActiveWindowChanged { id });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Currently focused window
    pub fn active(&self) -> Option<WindowId> {
        self.active.borrow().clone()
    }

    /// Check if `id` is the focused window
    pub fn is_active(&self, id: &WindowId) -> bool {
        self.active.borrow().as_ref() == Some(id)
    }

    /// Registered record for `id`
    pub fn get(&self, id: &WindowId) -> Option<WindowRecord> {
        self.records.borrow().iter().find(|r| &r.id == id).cloned()
    }

    /// Check if `id` is registered
    pub fn contains(&self, id: &WindowId) -> bool {
        self.records.borrow().iter().any(|r| &r.id == id)
    }

    /// Registered records in registration order
    pub fn records(&self) -> Vec<WindowRecord> {
        self.records.borrow().clone()
    }

    /// Number of registered windows
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Check if no window is registered
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Visibility of `id`; `None` when the registry knows nothing about it
    pub fn visibility(&self, id: &WindowId) -> Option<Visibility> {
        if self.minimized.borrow().contains(id) {
            Some(Visibility::Minimized)
        } else if self.contains(id) {
            Some(Visibility::Visible)
        } else {
            None
        }
    }

    /// Check if `id` carries a minimized flag
    pub fn is_minimized(&self, id: &WindowId) -> bool {
        self.minimized.borrow().contains(id)
    }

    /// Minimized windows that never registered
    pub fn latent_ids(&self) -> Vec<WindowId> {
        let records = self.records.borrow();
        let mut ids: Vec<WindowId> = self
            .minimized
            .borrow()
            .iter()
            .filter(|id| !records.iter().any(|r| &r.id == *id))
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}
