//! Widgets: synthetic components embedded in screens (badges, headers).
//! Their ids carry the widget prefix so their appear events are never
//! taken for scenes.

use uuid::Uuid;

use crate::host::Registrar;
use crate::host::layout::{Layout, Options, Props};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: String,
    pub name: String,
}

impl Widget {
    /// Creates a widget with a fresh id `<prefix><name>-<uuid>`.
    pub fn new(prefix: &str, name: &str) -> Self {
        Self {
            id: format!("{prefix}{name}-{}", Uuid::new_v4().simple()),
            name: name.to_string(),
        }
    }

    pub fn layout(&self, props: &Props) -> Layout {
        Layout::component(&self.id, &self.name, props.clone(), Options::new())
    }

    pub fn register(&self, registrar: &mut dyn Registrar) {
        registrar.register(&self.name, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    #[test]
    fn test_ids_are_prefixed_and_unique() {
        let a = Widget::new("widget-", "Badge");
        let b = Widget::new("widget-", "Badge");
        assert!(a.id.starts_with("widget-Badge-"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_register_and_layout() {
        let widget = Widget::new("w:", "Clock");
        let mut host = RecordingHost::new();
        widget.register(&mut host);
        assert_eq!(host.registrations, [("Clock".to_string(), false)]);
        let value = serde_json::to_value(widget.layout(&Props::new())).unwrap();
        assert_eq!(value["component"]["id"], widget.id.as_str());
    }
}
