//! # Root Navigator
//!
//! The composition root and the public entry point. Owns the navigator
//! tree, the host, and everything that only exists once per app.
//!
//! ```text
//! Navigation
//! ├── tree: Tree                  // every navigator, root at index 0
//! ├── host: H                     // receives HostCommands
//! ├── settings: Settings          // widget prefix, ordering, defaults
//! ├── launched: watch::Sender     // one-shot "app launched" gate
//! ├── launches: u32               // AppLaunched events seen
//! └── last_seq: u64               // last processed event sequence
//! ```
//!
//! Root history holds the base route and, above it, at most one modal.
//! Overlays are tracked separately and never touch history.

use std::collections::HashSet;
use std::future::Future;

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::core::drawer;
use crate::core::error::NavigationError;
use crate::core::modal;
use crate::core::navigator::{self, Cx};
use crate::core::path;
use crate::core::registry::Route;
use crate::core::routes::RootDef;
use crate::core::stack;
use crate::core::tree::{Kind, NodeId, RootState, Tree};
use crate::core::widget::Widget;
use crate::host::event::{EventEnvelope, EventSource, HostEvent, HostEventReceiver};
use crate::host::layout::{Options, Props};
use crate::host::{Host, HostCommand, Registrar};

/// Runtime knobs, usually resolved from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Component ids starting with this prefix are never scenes.
    pub widget_prefix: String,
    /// Reject events whose sequence number is not increasing.
    pub strict_ordering: bool,
    /// Sent to the host with `setDefaultOptions` on every launch.
    pub default_options: Options,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            widget_prefix: String::from("widget-"),
            strict_ordering: true,
            default_options: Options::new(),
        }
    }
}

pub struct Navigation<H: Host> {
    tree: Tree,
    host: H,
    settings: Settings,
    launched: watch::Sender<bool>,
    launches: u32,
    last_seq: u64,
}

impl<H: Host> Navigation<H> {
    pub fn new(def: &RootDef, host: H) -> Result<Self, NavigationError> {
        Self::with_settings(def, host, Settings::default())
    }

    pub fn with_settings(def: &RootDef, host: H, settings: Settings) -> Result<Self, NavigationError> {
        let mut tree = Tree::build(def)?;
        let root = tree.root();
        navigator::listen(&mut tree, root);
        let (launched, _) = watch::channel(false);
        Ok(Self { tree, host, settings, launched, launches: 0, last_seq: 0 })
    }

    fn cx(&mut self) -> Cx<'_> {
        Cx { tree: &mut self.tree, host: &mut self.host }
    }

    fn root_state(&self) -> &RootState {
        match &self.tree.node(self.tree.root()).kind {
            Kind::Root(state) => state,
            _ => unreachable!("node 0 is always the root"),
        }
    }

    fn root_state_mut(&mut self) -> &mut RootState {
        let root = self.tree.root();
        match &mut self.tree.node_mut(root).kind {
            Kind::Root(state) => state,
            _ => unreachable!("node 0 is always the root"),
        }
    }

    fn check_launched(&self, operation: &str) {
        if !self.is_launched() {
            warn!("'{}' issued before the host reported launch", operation);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Root history: the base route, then the modal if one is shown.
    pub fn history(&self) -> &[String] {
        self.tree.node(self.tree.root()).history.entries()
    }

    /// History of the navigator with the given namespaced id.
    pub fn history_of(&self, navigator_id: &str) -> Option<&[String]> {
        self.tree.find(navigator_id).map(|node| self.tree.node(node).history.entries())
    }

    pub fn last_visible(&self) -> Option<&str> {
        self.root_state().last_visible.as_deref()
    }

    /// Ids of the presented overlays, in presentation order.
    pub fn active_overlays(&self) -> Vec<&str> {
        self.root_state()
            .overlays
            .iter()
            .map(|node| self.tree.node(*node).id.as_str())
            .collect()
    }

    fn active_modal_node(&self) -> Option<NodeId> {
        let root = self.tree.root();
        let node = self.tree.child(root, self.tree.node(root).history.top()?)?;
        matches!(self.tree.node(node).kind, Kind::Modal).then_some(node)
    }

    pub fn active_modal(&self) -> Option<&str> {
        self.active_modal_node().map(|node| self.tree.node(node).id.as_str())
    }

    /// The innermost drawer on the active branch.
    fn active_drawer(&self) -> Result<NodeId, NavigationError> {
        let mut current = Some(self.tree.active_leaf());
        while let Some(node) = current {
            if matches!(self.tree.node(node).kind, Kind::Drawer(_)) {
                return Ok(node);
            }
            current = self.tree.node(node).parent;
        }
        Err(NavigationError::InvalidConfiguration("no drawer on the active branch".into()))
    }

    pub fn is_drawer_visible(&self) -> bool {
        self.active_drawer().is_ok_and(|node| drawer::is_visible(&self.tree, node))
    }

    pub fn is_launched(&self) -> bool {
        *self.launched.borrow()
    }

    /// Resolves once the host reports its first launch. Resolves
    /// immediately when that already happened.
    pub fn launched(&self) -> impl Future<Output = Result<(), NavigationError>> + use<H> {
        let mut rx = self.launched.subscribe();
        async move {
            rx.wait_for(|launched| *launched)
                .await
                .map(|_| ())
                .map_err(|_| NavigationError::ChannelClosed)
        }
    }

    /// A scene is a real screen: not a widget, not an overlay.
    pub fn is_scene(&self, component_id: &str) -> bool {
        !component_id.starts_with(&self.settings.widget_prefix)
            && !self.tree.overlay_ids().any(|id| id == component_id)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Presents the initial route.
    pub fn mount(&mut self, props: &Props) -> Result<(), NavigationError> {
        self.check_launched("mount");
        let root = self.tree.root();
        navigator::mount(&mut self.cx(), root, props)
    }

    /// Navigates to a slash-delimited path from the root.
    pub fn navigate(&mut self, path: &str, props: &Props) -> Result<(), NavigationError> {
        self.check_launched("navigate");
        let root = self.tree.root();
        navigator::validate_path(&self.tree, root, path)?;
        let (key, rest) = navigator::resolve_path(&self.tree, root, path)?;
        let target = self.tree.child(root, key);
        let from_id = self.last_visible().map(str::to_string);
        info!("Navigate to '{}'", path);

        if let Some(overlay) = target.filter(|node| matches!(self.tree.node(*node).kind, Kind::Overlay(_))) {
            return self.show_overlay(overlay, props);
        }

        let mut base = self.tree.node(root).history.top().map(str::to_string);
        if base.as_deref() != Some(key) {
            if let Some(modal) = self.active_modal_node() {
                info!("Dismissing '{}' before presenting '{}'", self.tree.node(modal).label(), key);
                modal::unmount(&mut self.cx(), modal);
                self.tree.node_mut(root).history.pop();
                base = self.tree.node(root).history.top().map(str::to_string);
            }
        }

        if base.as_deref() != Some(key) {
            let is_modal = target.is_some_and(|node| matches!(self.tree.node(node).kind, Kind::Modal));
            let mut cx = self.cx();
            if is_modal {
                cx.tree.node_mut(root).history.push(key);
            } else {
                if let Some(previous) = &base {
                    navigator::unmount_route(&mut cx, root, previous, from_id.as_deref());
                }
                cx.tree.node_mut(root).history.reset(key);
            }
            navigator::mount_route(&mut cx, root, key, props)?;
        } else if rest.is_none() {
            if let Some(Route::Screen(screen)) = self.tree.node(root).routes.get(key) {
                let id = screen.id.clone();
                self.cx().execute(HostCommand::UpdateProps { id, props: props.clone() });
            }
        }

        match (rest, target) {
            (Some(rest), Some(child)) => navigator::navigate(&mut self.cx(), child, rest, props, from_id.as_deref()),
            _ => Ok(()),
        }
    }

    fn show_overlay(&mut self, overlay: NodeId, props: &Props) -> Result<(), NavigationError> {
        if self.root_state().overlays.contains(&overlay) {
            debug!("Overlay '{}' is already shown", self.tree.node(overlay).label());
            return Ok(());
        }
        self.root_state_mut().overlays.push(overlay);
        modal::show_overlay(&mut self.cx(), overlay, props);
        Ok(())
    }

    /// Goes back from the active route. A modal with nothing left to pop
    /// is dismissed. Returns false when nothing could go back.
    pub fn go_back(&mut self) -> bool {
        let root = self.tree.root();
        let Some(active) = self.tree.node(root).history.top().map(str::to_string) else {
            return false;
        };
        let from_id = self.last_visible().map(str::to_string);

        match navigator::route_go_back(&mut self.cx(), root, &active, from_id.as_deref()) {
            Ok(()) => true,
            Err(err) if err.is_no_back_route() => {
                if self.active_modal_node().is_some() {
                    self.dismiss_modal().is_ok()
                } else {
                    debug!("Nothing to go back to: {}", err);
                    false
                }
            }
            Err(err) => {
                warn!("Go back failed: {}", err);
                false
            }
        }
    }

    pub fn dismiss_modal(&mut self) -> Result<(), NavigationError> {
        let modal = self.active_modal_node().ok_or(NavigationError::NoModalToDismiss)?;
        modal::unmount(&mut self.cx(), modal);
        let root = self.tree.root();
        let popped = self.tree.node_mut(root).history.pop();
        info!("Dismissed modal {:?}", popped);
        Ok(())
    }

    /// Asks the host to close every modal, ours or not.
    pub fn dismiss_all_modals(&mut self) {
        if let Some(modal) = self.active_modal_node() {
            modal::release(&mut self.tree, modal);
            let root = self.tree.root();
            self.tree.node_mut(root).history.pop();
        }
        info!("Dismissing all modals");
        self.cx().execute(HostCommand::DismissAllModals);
    }

    /// Dismisses a presented overlay by its route key.
    pub fn dismiss_overlay(&mut self, key: &str) -> Result<(), NavigationError> {
        let root = self.tree.root();
        let overlay = self
            .tree
            .child(root, key)
            .filter(|node| matches!(self.tree.node(*node).kind, Kind::Overlay(_)))
            .ok_or_else(|| NavigationError::UnknownRoute(key.to_string()))?;

        if !self.root_state().overlays.contains(&overlay) {
            debug!("Overlay '{}' is not shown", key);
            return Ok(());
        }
        self.root_state_mut().overlays.retain(|node| *node != overlay);
        modal::dismiss_overlay(&mut self.cx(), overlay);
        Ok(())
    }

    /// The host removed an overlay on its own. Only that overlay is
    /// forgotten; the others stay active.
    pub fn on_overlay_dismissed(&mut self, component_id: &str) {
        let Some(overlay) = self
            .root_state()
            .overlays
            .iter()
            .copied()
            .find(|node| self.tree.node(*node).id == component_id)
        else {
            return;
        };
        self.root_state_mut().overlays.retain(|node| *node != overlay);
        self.tree.node_mut(overlay).mounted = false;
        debug!("Overlay '{}' dismissed by the host", component_id);
    }

    /// Pops the innermost stack on the active branch to its first screen.
    pub fn pop_to_root(&mut self) -> Result<(), NavigationError> {
        let leaf = self.tree.active_leaf();
        let from_id = self.last_visible().map(str::to_string);
        match self.tree.node(leaf).kind {
            Kind::Stack | Kind::Modal | Kind::Drawer(_) => {
                stack::pop_to_root(&mut self.cx(), leaf, from_id.as_deref())
            }
            _ => Err(NavigationError::NoBackRoute { navigator: self.tree.node(leaf).label().to_string() }),
        }
    }

    pub fn open_drawer(&mut self) -> Result<(), NavigationError> {
        let node = self.active_drawer()?;
        drawer::open(&mut self.cx(), node)
    }

    pub fn close_drawer(&mut self) -> Result<(), NavigationError> {
        let node = self.active_drawer()?;
        drawer::close(&mut self.cx(), node)
    }

    pub fn toggle_drawer(&mut self) -> Result<(), NavigationError> {
        let node = self.active_drawer()?;
        drawer::toggle(&mut self.cx(), node)
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Registers every distinct screen name, drawer content and overlays
    /// included, once.
    pub fn register_components(&self, registrar: &mut dyn Registrar, wrapped: bool) -> usize {
        let mut seen = HashSet::new();
        for screen in self.tree.screens() {
            if seen.insert(screen.name.as_str()) {
                registrar.register(&screen.name, wrapped);
            }
        }
        debug!("Registered {} components", seen.len());
        seen.len()
    }

    /// Creates a widget whose appear events never count as scenes.
    pub fn create_widget(&self, name: &str) -> Widget {
        Widget::new(&self.settings.widget_prefix, name)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Processes one sequenced host event.
    pub fn dispatch(&mut self, envelope: EventEnvelope) -> Result<(), NavigationError> {
        let EventEnvelope { seq, event } = envelope;
        if seq <= self.last_seq {
            if self.settings.strict_ordering {
                warn!("Rejecting stale event #{} {:?}", seq, event);
                return Err(NavigationError::StaleEvent { seq, last: self.last_seq });
            }
            warn!("Processing out-of-order event #{} (last #{})", seq, self.last_seq);
        }
        self.last_seq = self.last_seq.max(seq);
        debug!("Dispatching event #{} {:?}", seq, event);
        self.notify(&event);
        Ok(())
    }

    /// Delivers an event to every subscriber, without sequence checks.
    pub fn notify(&mut self, event: &HostEvent) {
        let kind = event.kind();
        let root = self.tree.root();
        for node in self.tree.bus.subscribers(kind) {
            // An earlier handler may have released this subscription.
            if !self.tree.bus.is_subscribed(kind, node) {
                continue;
            }
            if node == root {
                self.on_root_event(event);
            } else {
                navigator::handle_event(&mut self.cx(), node, event);
            }
        }
    }

    fn on_root_event(&mut self, event: &HostEvent) {
        match event {
            HostEvent::AppLaunched => self.on_launched(),
            HostEvent::ComponentDidAppear { component_id } => {
                if self.is_scene(component_id) {
                    self.root_state_mut().last_visible = Some(component_id.clone());
                }
            }
            HostEvent::ComponentDidDisappear { component_id } => self.on_overlay_dismissed(component_id),
            HostEvent::ModalDismissed { component_id, modals_dismissed } => {
                self.on_modal_dismissed(component_id, *modals_dismissed);
            }
            HostEvent::BottomTabSelected { .. } => {}
        }
    }

    fn on_launched(&mut self) {
        self.launches += 1;
        if !self.settings.default_options.is_empty() {
            let options = self.settings.default_options.clone();
            self.cx().execute(HostCommand::SetDefaultOptions { options });
        }
        if self.launches == 1 {
            info!("Host launched");
            self.launched.send_replace(true);
        } else {
            info!("Host relaunched (#{}), remounting", self.launches);
            self.remount();
        }
    }

    fn on_modal_dismissed(&mut self, component_id: &str, modals_dismissed: u32) {
        let Some(modal) = self.active_modal_node() else {
            debug!("Ignoring dismissal of '{}': no modal is active", component_id);
            return;
        };
        let modal_id = &self.tree.node(modal).id;
        if component_id != modal_id && !path::is_within(modal_id, component_id) {
            debug!("Ignoring dismissal of '{}': active modal is '{}'", component_id, modal_id);
            return;
        }
        modal::release(&mut self.tree, modal);
        let root = self.tree.root();
        self.tree.node_mut(root).history.pop();
        info!("Host dismissed {} modal(s) from '{}'", modals_dismissed, component_id);
    }

    /// Presents every route in root history and every active overlay again,
    /// after the host rebuilt its UI from scratch.
    pub fn remount(&mut self) {
        let root = self.tree.root();
        let keys = self.tree.node(root).history.entries().to_vec();
        for key in &keys {
            if let Some(child) = self.tree.child(root, key) {
                navigator::teardown(&mut self.tree, child);
            }
        }
        let mut cx = self.cx();
        for key in &keys {
            if let Err(err) = navigator::mount_route(&mut cx, root, key, &Props::new()) {
                warn!("Failed to remount '{}': {}", key, err);
            }
        }
        let overlays = self.root_state().overlays.clone();
        for overlay in overlays {
            modal::show_overlay(&mut self.cx(), overlay, &Props::new());
        }
    }

    /// Dispatches every event already queued on `rx`. Stale events are
    /// logged and skipped. Returns how many were processed.
    pub fn drain(&mut self, rx: &mut HostEventReceiver) -> usize {
        let mut processed = 0;
        while let Some(envelope) = rx.try_recv() {
            match self.dispatch(envelope) {
                Ok(()) => processed += 1,
                Err(err) => warn!("Dropped event: {}", err),
            }
        }
        processed
    }

    /// Dispatches events until the source is exhausted.
    pub async fn pump(&mut self, source: &mut dyn EventSource) -> usize {
        let mut processed = 0;
        while let Some(envelope) = source.next_event().await {
            match self.dispatch(envelope) {
                Ok(()) => processed += 1,
                Err(err) => warn!("Dropped event: {}", err),
            }
        }
        processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::host::event::EventKind;
    use crate::test_support::{app_routes, launched, props};

    #[test]
    fn test_mount_presents_initial_route() {
        let nav = launched();
        assert_eq!(nav.history(), ["main"]);
        assert_eq!(nav.history_of("main").unwrap(), ["A"]);
        assert!(matches!(nav.host().last(), Some(HostCommand::SetRoot { .. })));
    }

    #[test]
    fn test_scene_excludes_widgets_and_overlays() {
        let mut nav = launched();
        let widget = nav.create_widget("Spinner");
        nav.notify(&HostEvent::appeared("main/A"));
        nav.notify(&HostEvent::appeared(&widget.id));
        nav.notify(&HostEvent::appeared("toast"));
        assert_eq!(nav.last_visible(), Some("main/A"));
    }

    #[test]
    fn test_switching_base_route_replaces_history() {
        let mut nav = launched();
        nav.navigate("tabs/settings/Profile", &Props::new()).unwrap();
        assert_eq!(nav.history(), ["tabs"]);
        assert_eq!(nav.history_of("tabs/settings").unwrap(), ["Settings", "Profile"]);
        assert!(!nav.tree().node(nav.tree().find("main").unwrap()).mounted);
    }

    #[test]
    fn test_modal_stacks_above_base_route() {
        let mut nav = launched();
        nav.navigate("auth/Signup", &props(1)).unwrap();
        assert_eq!(nav.history(), ["main", "auth"]);
        assert_eq!(nav.active_modal(), Some("auth"));
        assert_eq!(nav.history_of("auth").unwrap(), ["Login", "Signup"]);
        assert!(nav.tree().node(nav.tree().find("main").unwrap()).mounted);
    }

    #[test]
    fn test_navigating_to_base_under_modal_only_dismisses() {
        let mut nav = launched();
        nav.navigate("auth", &Props::new()).unwrap();
        nav.host_mut().take();
        nav.navigate("main/B", &Props::new()).unwrap();
        assert_eq!(nav.history(), ["main"]);
        let commands = nav.host_mut().take();
        assert_eq!(commands[0], HostCommand::DismissModal { id: "auth/Login".into() });
        assert!(matches!(commands[1], HostCommand::Push { .. }));
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_go_back_dismisses_modal_at_its_root() {
        let mut nav = launched();
        nav.navigate("auth", &Props::new()).unwrap();
        assert!(nav.go_back());
        assert_eq!(nav.history(), ["main"]);
        assert_eq!(nav.active_modal(), None);
        assert!(!nav.go_back());
    }

    #[test]
    fn test_dismiss_all_modals() {
        let mut nav = launched();
        nav.navigate("auth", &Props::new()).unwrap();
        nav.dismiss_all_modals();
        assert_eq!(nav.history(), ["main"]);
        assert_eq!(nav.host().last(), Some(&HostCommand::DismissAllModals));
    }

    #[test]
    fn test_modal_dismissed_for_other_id_is_ignored() {
        let mut nav = launched();
        nav.navigate("auth", &Props::new()).unwrap();
        nav.notify(&HostEvent::ModalDismissed { component_id: "main/A".into(), modals_dismissed: 1 });
        assert_eq!(nav.active_modal(), Some("auth"));
        nav.notify(&HostEvent::ModalDismissed { component_id: "auth/Login".into(), modals_dismissed: 1 });
        assert_eq!(nav.active_modal(), None);
    }

    #[test]
    fn test_overlay_does_not_touch_history() {
        let mut nav = launched();
        nav.navigate("toast", &Props::new()).unwrap();
        nav.navigate("toast", &Props::new()).unwrap();
        assert_eq!(nav.history(), ["main"]);
        assert_eq!(nav.active_overlays(), ["toast"]);
        nav.dismiss_overlay("toast").unwrap();
        assert!(nav.active_overlays().is_empty());
        assert_eq!(nav.host().last(), Some(&HostCommand::DismissOverlay { id: "toast".into() }));
        assert!(nav.dismiss_overlay("main").is_err());
    }

    #[test]
    fn test_pop_to_root_on_active_stack() {
        let mut nav = launched();
        nav.navigate("main/B", &Props::new()).unwrap();
        nav.navigate("main/C", &Props::new()).unwrap();
        nav.pop_to_root().unwrap();
        assert_eq!(nav.history_of("main").unwrap(), ["A"]);
        assert!(matches!(nav.host().last(), Some(HostCommand::PopToRoot { .. })));
    }

    #[test]
    fn test_drawer_requests_require_a_drawer() {
        let mut nav = launched();
        assert!(nav.open_drawer().is_err());
        nav.navigate("app", &Props::new()).unwrap();
        nav.open_drawer().unwrap();
        assert!(!nav.is_drawer_visible());
        nav.notify(&HostEvent::appeared("app/menu"));
        assert!(nav.is_drawer_visible());
    }

    #[test]
    fn test_relaunch_remounts_and_sends_defaults() {
        let settings = Settings {
            default_options: serde_json::json!({"topBar": {"visible": false}})
                .as_object()
                .cloned()
                .unwrap(),
            ..Settings::default()
        };
        let mut nav = Navigation::with_settings(&app_routes(), RecordingHost::new(), settings).unwrap();
        nav.notify(&HostEvent::AppLaunched);
        nav.mount(&Props::new()).unwrap();
        nav.navigate("toast", &Props::new()).unwrap();
        nav.host_mut().take();

        nav.notify(&HostEvent::AppLaunched);
        let commands = nav.host_mut().take();
        assert!(matches!(commands[0], HostCommand::SetDefaultOptions { .. }));
        assert!(matches!(commands[1], HostCommand::SetRoot { .. }));
        assert!(matches!(commands[2], HostCommand::ShowOverlay { .. }));
    }

    #[test]
    fn test_relaunch_remounts_base_and_modal() {
        let mut nav = launched();
        nav.navigate("auth/Signup", &Props::new()).unwrap();
        nav.host_mut().take();

        nav.notify(&HostEvent::AppLaunched);
        let commands = nav.host_mut().take();
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], HostCommand::SetRoot { .. }));
        assert!(matches!(commands[1], HostCommand::ShowModal { .. }));
        assert_eq!(nav.history(), ["main", "auth"]);
        assert_eq!(nav.history_of("auth").unwrap(), ["Login"]);
        assert_eq!(nav.active_modal(), Some("auth"));
    }

    #[test]
    fn test_relaunch_tears_down_stale_descendants() {
        let mut nav = launched();
        nav.navigate("onboarding/steps/Step2", &Props::new()).unwrap();
        nav.navigate("auth", &Props::new()).unwrap();
        let steps = nav.tree().find("onboarding/steps").unwrap();
        assert!(nav.tree().bus.is_subscribed(EventKind::ComponentDidAppear, steps));

        nav.notify(&HostEvent::AppLaunched);
        assert_eq!(nav.history_of("onboarding").unwrap(), ["Welcome"]);
        assert!(!nav.tree().node(steps).mounted);
        assert!(!nav.tree().bus.is_subscribed(EventKind::ComponentDidAppear, steps));
        let auth = nav.tree().find("auth").unwrap();
        assert!(nav.tree().bus.is_subscribed(EventKind::ComponentDidAppear, auth));
    }

    #[test]
    fn test_register_components_once_per_name() {
        let nav = launched();
        let mut host = RecordingHost::new();
        let count = nav.register_components(&mut host, true);
        assert_eq!(count, host.registrations.len());
        assert!(host.registrations.contains(&("Menu".to_string(), true)));
        assert!(host.registrations.contains(&("Toast".to_string(), true)));
        let names: HashSet<_> = host.registrations.iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), host.registrations.len());
    }
}
