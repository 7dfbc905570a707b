//! Bus topics and their payloads

use serde::Serialize;

use crate::window::{WindowId, WindowRecord};

/// Closed set of topics carried by the [`EventBus`](super::EventBus)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// A window record entered the registry
    WindowAdded,
    /// A window record left the registry
    WindowRemoved,
    /// A window was asked to hide its content
    WindowMinimized,
    /// A window was asked to show its content again
    WindowRestored,
    /// The focus pointer moved
    ActiveWindowChanged,
}

impl Topic {
    /// Every topic, in declaration order
    pub const ALL: [Topic; 5] = [
        Topic::WindowAdded,
        Topic::WindowRemoved,
        Topic::WindowMinimized,
        Topic::WindowRestored,
        Topic::ActiveWindowChanged,
    ];

    /// Wire name of the topic
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::WindowAdded => "window_added",
            Topic::WindowRemoved => "window_removed",
            Topic::WindowMinimized => "window_minimized",
            Topic::WindowRestored => "window_restored",
            Topic::ActiveWindowChanged => "active_window_changed",
        }
    }

    /// Parse a wire name
    pub fn from_name(name: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|topic| topic.as_str() == name)
    }
}

/// Event published on the bus
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowEvent {
    /// Registration payload of a newly registered window
    WindowAdded {
        #[serde(flatten)]
        record: WindowRecord,
    },
    WindowRemoved { id: WindowId },
    WindowMinimized { id: WindowId },
    WindowRestored { id: WindowId },
    /// `None` means no window is active
    ActiveWindowChanged { id: Option<WindowId> },
}

impl WindowEvent {
    /// Topic this event is delivered under
    pub fn topic(&self) -> Topic {
        match self {
            WindowEvent::WindowAdded { .. } => Topic::WindowAdded,
            WindowEvent::WindowRemoved { .. } => Topic::WindowRemoved,
            WindowEvent::WindowMinimized { .. } => Topic::WindowMinimized,
            WindowEvent::WindowRestored { .. } => Topic::WindowRestored,
            WindowEvent::ActiveWindowChanged { .. } => Topic::ActiveWindowChanged,
        }
    }

    /// Window the event refers to, if any
    pub fn window_id(&self) -> Option<&WindowId> {
        match self {
            WindowEvent::WindowAdded { record } => Some(&record.id),
            WindowEvent::WindowRemoved { id }
            | WindowEvent::WindowMinimized { id }
            | WindowEvent::WindowRestored { id } => Some(id),
            WindowEvent::ActiveWindowChanged { id } => id.as_ref(),
        }
    }

    /// Check whether the event targets `id`
    #[inline]
    pub fn is_for(&self, id: &WindowId) -> bool {
        self.window_id() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_names_round_trip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_name(topic.as_str()), Some(topic));
        }
        assert_eq!(Topic::from_name("modal_visibility_changed"), None);
    }

    #[test]
    fn test_event_topic_and_target() {
        let id = WindowId::new("w1");
        let event = WindowEvent::WindowMinimized { id: id.clone() };
        assert_eq!(event.topic(), Topic::WindowMinimized);
        assert!(event.is_for(&id));

        let none = WindowEvent::ActiveWindowChanged { id: None };
        assert_eq!(none.window_id(), None);
        assert!(!none.is_for(&id));
    }

    #[test]
    fn test_event_json_shape() {
        let added = WindowEvent::WindowAdded {
            record: WindowRecord::new("w1", "Notepad"),
        };
        let json = serde_json::to_value(&added).unwrap();
        assert_eq!(json["type"], "window_added");
        assert_eq!(json["id"], "w1");
        assert_eq!(json["title"], "Notepad");
        assert_eq!(json["hasButton"], true);

        let cleared = WindowEvent::ActiveWindowChanged { id: None };
        let json = serde_json::to_value(&cleared).unwrap();
        assert_eq!(json["type"], "active_window_changed");
        assert!(json["id"].is_null());
    }
}
