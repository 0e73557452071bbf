//! A single stackable screen: surface, element state, wiring, lifecycle.

use std::collections::HashMap;
use std::mem;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
};

use super::components::{NodeKind, Surface};
use super::element::Element;
use super::signal::{Signal, SignalHook, SignalHooks};
use super::wiring::{
    ButtonBinding, EventBinding, EventRemap, HandlerRef, InputEvent, InputKind, ResolvedAction,
    ResolvedBinding, Selector, SharedHandler, resolve_bindings,
};
use crate::presentation::commands::Command;

/// Custom frame renderer; receives the time elapsed since the last frame.
pub type RenderFn = Box<dyn FnMut(&mut Surface, Rect, &mut Buffer, Duration)>;

/// Per-tick callback for screens that animate or poll.
pub type TickFn = Box<dyn FnMut(&mut Surface, Duration) -> Option<Command>>;

/// A named, full-viewport unit of UI managed by the stack.
///
/// Screens are built once via [`ScreenBuilder`] and prepared lazily the
/// first time they are shown: preparation resolves declared wiring into
/// direct handler references, auto-wires tab and list selection, and fires
/// the one-time `Init` signal.
pub struct Screen {
    id: &'static str,
    surface: Surface,
    element: Element,
    hooks: SignalHooks,
    declared_events: Vec<EventBinding>,
    declared_buttons: Vec<ButtonBinding>,
    methods: HashMap<&'static str, SharedHandler>,
    resolved: Vec<ResolvedBinding>,
    prepared: bool,
    render_fn: Option<RenderFn>,
    tick_fn: Option<TickFn>,
    pending_render: Duration,
}

impl Screen {
    /// Starts building a screen with the given id.
    #[must_use]
    pub fn builder(id: &'static str) -> ScreenBuilder {
        ScreenBuilder::new(id)
    }

    /// Stable screen id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Borrows the element state.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Mutably borrows the element state.
    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// Borrows the surface.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutably borrows the surface.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Whether one-time preparation has run.
    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// One-time setup; later calls are no-ops.
    ///
    /// Resolves declared wiring (remapping touch gestures when the terminal
    /// lacks touch reporting), auto-wires tab and list selection, selects
    /// the first tab of every group, and fires `Init`.
    pub fn prepare(&mut self, touch_support: bool, remap: &EventRemap, viewport: Size) {
        if self.prepared {
            return;
        }
        self.prepared = true;

        let declared = mem::take(&mut self.declared_events);
        let buttons = mem::take(&mut self.declared_buttons);
        self.resolved =
            resolve_bindings(&declared, &buttons, &self.methods, touch_support, remap);

        let activate = if touch_support {
            InputKind::Tap
        } else {
            InputKind::Click
        };
        let has_tabs = self
            .surface
            .iter()
            .any(|(_, n)| matches!(n.kind, NodeKind::Tab { .. }));
        if has_tabs {
            self.resolved.push(ResolvedBinding {
                kind: activate,
                selector: Selector::Root,
                action: ResolvedAction::SelectTab,
            });
            self.resolved.push(ResolvedBinding {
                kind: InputKind::Press,
                selector: Selector::Root,
                action: ResolvedAction::SelectTab,
            });
            let first_tabs: Vec<usize> = {
                let mut seen = Vec::new();
                let mut firsts = Vec::new();
                for (i, node) in self.surface.iter() {
                    if let NodeKind::Tab { group, .. } = node.kind {
                        if !seen.contains(&group) {
                            seen.push(group);
                            firsts.push(i);
                        }
                    }
                }
                firsts
            };
            for index in first_tabs {
                self.surface.select_tab(index);
            }
        }

        let has_items = self
            .surface
            .iter()
            .any(|(_, n)| matches!(n.kind, NodeKind::Item { .. }));
        if has_items {
            self.resolved.push(ResolvedBinding {
                kind: activate,
                selector: Selector::Root,
                action: ResolvedAction::SelectItem,
            });
            self.resolved.push(ResolvedBinding {
                kind: InputKind::Press,
                selector: Selector::Root,
                action: ResolvedAction::SelectItem,
            });
        }

        tracing::debug!(screen = self.id, bindings = self.resolved.len(), "screen prepared");
        self.hooks.fire(Signal::Init, &mut self.surface, viewport);
    }

    /// Fires a lifecycle signal's hooks.
    pub fn fire(&mut self, signal: Signal, viewport: Size) {
        self.hooks.fire(signal, &mut self.surface, viewport);
    }

    /// Routes an input event through focus handling and resolved wiring.
    pub fn dispatch(&mut self, event: &InputEvent) -> Vec<Command> {
        match event {
            InputEvent::Key(key) => self.dispatch_key(*key),
            InputEvent::Pointer { kind, position } => self.dispatch_pointer(*kind, *position),
        }
    }

    fn dispatch_key(&mut self, key: crossterm::event::KeyEvent) -> Vec<Command> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        match key.code {
            KeyCode::Tab => {
                self.surface.focus_next();
                Vec::new()
            }
            KeyCode::BackTab => {
                self.surface.focus_prev();
                Vec::new()
            }
            KeyCode::Enter => self.press_focused(),
            KeyCode::Char(c) => {
                if let Some(field) = self.surface.focused_field_mut() {
                    field.input_char(c);
                }
                Vec::new()
            }
            KeyCode::Backspace => {
                if let Some(field) = self.surface.focused_field_mut() {
                    field.backspace();
                }
                Vec::new()
            }
            KeyCode::Left => {
                if let Some(field) = self.surface.focused_field_mut() {
                    field.move_left();
                }
                Vec::new()
            }
            KeyCode::Right => {
                if let Some(field) = self.surface.focused_field_mut() {
                    field.move_right();
                }
                Vec::new()
            }
            KeyCode::Up => {
                if self.surface.focused_field_mut().is_none() {
                    self.surface.scroll_pane(-1);
                }
                Vec::new()
            }
            KeyCode::Down => {
                if self.surface.focused_field_mut().is_none() {
                    self.surface.scroll_pane(1);
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Synthesizes a press on the focused node, as Enter does.
    fn press_focused(&mut self) -> Vec<Command> {
        let Some(index) = self.surface.focus() else {
            return Vec::new();
        };
        let node = match self.surface.node(index) {
            Some(n) => n,
            None => return Vec::new(),
        };
        if matches!(node.kind, NodeKind::Field(_)) {
            self.surface.focus_next();
            return Vec::new();
        }
        let area = node.area;
        let position = Position::new(
            area.x + area.width / 2,
            area.y + area.height / 2,
        );
        self.dispatch_pointer(InputKind::Press, position)
    }

    fn dispatch_pointer(&mut self, kind: InputKind, position: Position) -> Vec<Command> {
        let hit = self.surface.node_at(position);

        if matches!(kind, InputKind::Click | InputKind::Tap | InputKind::Press) {
            if let Some(index) = hit {
                if self.surface.node(index).is_some_and(super::components::Node::is_focusable)
                {
                    self.surface.set_focus(index);
                }
            }
        }

        let matching: Vec<ResolvedBinding> = self
            .resolved
            .iter()
            .filter(|b| {
                b.kind == kind
                    && match b.selector {
                        Selector::Root => true,
                        selector => {
                            hit.is_some_and(|index| selector.matches(&self.surface, index))
                        }
                    }
            })
            .cloned()
            .collect();

        let event = InputEvent::Pointer { kind, position };
        let mut commands = Vec::new();
        for binding in matching {
            match binding.action {
                ResolvedAction::Handler(handler) => {
                    if let Some(command) = (handler.borrow_mut())(&mut self.surface, &event) {
                        commands.push(command);
                    }
                }
                ResolvedAction::SelectTab => {
                    if let Some(index) = hit {
                        if matches!(
                            self.surface.node(index).map(|n| &n.kind),
                            Some(NodeKind::Tab { .. })
                        ) {
                            self.surface.select_tab(index);
                        }
                    }
                }
                ResolvedAction::SelectItem => {
                    if let Some(index) = hit {
                        if matches!(
                            self.surface.node(index).map(|n| &n.kind),
                            Some(NodeKind::Item { .. })
                        ) {
                            self.surface.select_item(index);
                        }
                    }
                }
            }
        }
        commands
    }

    /// Advances screen-local animation and polling.
    pub fn tick(&mut self, dt: Duration) -> Option<Command> {
        self.pending_render = self.pending_render.saturating_add(dt);
        let tick_fn = self.tick_fn.as_mut()?;
        tick_fn(&mut self.surface, dt)
    }

    /// Renders the screen body into `area`.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let elapsed = mem::take(&mut self.pending_render);
        if let Some(render_fn) = self.render_fn.as_mut() {
            render_fn(&mut self.surface, area, buf, elapsed);
        } else {
            self.surface.render(area, buf);
        }
    }
}

/// Builds a [`Screen`]: surface nodes, lifecycle hooks, wiring, methods.
pub struct ScreenBuilder {
    id: &'static str,
    surface: Surface,
    hooks: SignalHooks,
    events: Vec<EventBinding>,
    buttons: Vec<ButtonBinding>,
    methods: HashMap<&'static str, SharedHandler>,
    render_fn: Option<RenderFn>,
    tick_fn: Option<TickFn>,
}

impl ScreenBuilder {
    /// Starts an empty builder for the given screen id.
    #[must_use]
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            surface: Surface::new(),
            hooks: SignalHooks::default(),
            events: Vec::new(),
            buttons: Vec::new(),
            methods: HashMap::new(),
            render_fn: None,
            tick_fn: None,
        }
    }

    /// Supplies the component tree.
    #[must_use]
    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    /// Registers a lifecycle hook.
    #[must_use]
    pub fn on<F>(mut self, signal: Signal, hook: F) -> Self
    where
        F: FnMut(&mut Surface, Size) + 'static,
    {
        self.hooks.on(signal, Box::new(hook) as SignalHook);
        self
    }

    /// Declares an input binding.
    #[must_use]
    pub fn event(mut self, kind: InputKind, selector: Selector, handler: HandlerRef) -> Self {
        self.events.push(EventBinding {
            kind,
            selector,
            handler,
        });
        self
    }

    /// Declares a button: matching nodes run the handler on press.
    #[must_use]
    pub fn button(mut self, selector: Selector, handler: HandlerRef) -> Self {
        self.buttons.push(ButtonBinding { selector, handler });
        self
    }

    /// Registers a named handler that bindings can reference.
    #[must_use]
    pub fn method<F>(mut self, name: &'static str, handler: F) -> Self
    where
        F: FnMut(&mut Surface, &InputEvent) -> Option<Command> + 'static,
    {
        self.methods.insert(
            name,
            std::rc::Rc::new(std::cell::RefCell::new(Box::new(handler) as _)),
        );
        self
    }

    /// Replaces the default surface renderer.
    #[must_use]
    pub fn render_with<F>(mut self, render: F) -> Self
    where
        F: FnMut(&mut Surface, Rect, &mut Buffer, Duration) + 'static,
    {
        self.render_fn = Some(Box::new(render));
        self
    }

    /// Installs a per-tick callback.
    #[must_use]
    pub fn tick_with<F>(mut self, tick: F) -> Self
    where
        F: FnMut(&mut Surface, Duration) -> Option<Command> + 'static,
    {
        self.tick_fn = Some(Box::new(tick));
        self
    }

    /// Finishes the screen; it starts hidden and unprepared.
    #[must_use]
    pub fn build(self) -> Screen {
        Screen {
            id: self.id,
            surface: self.surface,
            element: Element::new(),
            hooks: self.hooks,
            declared_events: self.events,
            declared_buttons: self.buttons,
            methods: self.methods,
            resolved: Vec::new(),
            prepared: false,
            pending_render: Duration::ZERO,
            render_fn: self.render_fn,
            tick_fn: self.tick_fn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view::components::Node;
    use crate::presentation::view::wiring::bound;
    use std::cell::RefCell;
    use std::rc::Rc;

    const VIEWPORT: Size = Size {
        width: 40,
        height: 12,
    };

    fn render_once(screen: &mut Screen) {
        let area = Rect::new(0, 0, VIEWPORT.width, VIEWPORT.height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
    }

    #[test]
    fn test_prepare_runs_once() {
        let fired = Rc::new(RefCell::new(0));
        let counter = fired.clone();
        let mut screen = Screen::builder("demo")
            .on(Signal::Init, move |_, _| *counter.borrow_mut() += 1)
            .build();

        let remap = EventRemap::default();
        screen.prepare(false, &remap, VIEWPORT);
        screen.prepare(false, &remap, VIEWPORT);
        assert_eq!(*fired.borrow(), 1);
        assert!(screen.is_prepared());
    }

    #[test]
    fn test_click_on_button_runs_handler() {
        let mut surface = Surface::new();
        surface.add(Node::button("Go").with_id("go"));
        let mut screen = Screen::builder("demo")
            .surface(surface)
            .button(Selector::Id("go"), bound(|_, _| Some(Command::Quit)))
            .build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);
        render_once(&mut screen);

        let area = screen.surface().node(0).unwrap().area;
        let commands = screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Press,
            position: Position::new(area.x + 1, area.y + 1),
        });
        assert!(matches!(commands.as_slice(), [Command::Quit]));
    }

    #[test]
    fn test_named_method_binding() {
        let mut surface = Surface::new();
        surface.add(Node::button("Back").with_id("back"));
        let mut screen = Screen::builder("demo")
            .surface(surface)
            .method("go_back", |_, _| Some(Command::ConcealPanel))
            .event(
                InputKind::Click,
                Selector::Id("back"),
                HandlerRef::Named("go_back"),
            )
            .build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);
        render_once(&mut screen);

        let area = screen.surface().node(0).unwrap().area;
        let commands = screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Click,
            position: Position::new(area.x, area.y),
        });
        assert!(matches!(commands.as_slice(), [Command::ConcealPanel]));
    }

    #[test]
    fn test_touch_binding_remapped_without_touch_support() {
        let log = Rc::new(RefCell::new(0));
        let hits = log.clone();
        let mut surface = Surface::new();
        surface.add(Node::label("anywhere"));
        let mut screen = Screen::builder("demo")
            .surface(surface)
            .event(
                InputKind::Tap,
                Selector::Root,
                bound(move |_, _| {
                    *hits.borrow_mut() += 1;
                    None
                }),
            )
            .build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);

        // The terminal reports clicks, not taps.
        screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Click,
            position: Position::new(0, 0),
        });
        assert_eq!(*log.borrow(), 1);

        screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Tap,
            position: Position::new(0, 0),
        });
        assert_eq!(*log.borrow(), 1);
    }

    #[test]
    fn test_tabs_auto_wired_and_first_selected() {
        let mut surface = Surface::new();
        surface.add(Node::tab("info", "faq", "FAQ"));
        surface.add(Node::tab("info", "terms", "Terms"));
        surface.add(Node::pane("info", "faq", "faq"));
        surface.add(Node::pane("info", "terms", "terms"));
        let mut screen = Screen::builder("about").surface(surface).build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);

        assert_eq!(screen.surface().selected_tab("info"), Some("faq"));
        assert!(screen.surface().node(3).unwrap().hidden);

        render_once(&mut screen);
        let terms_area = screen.surface().node(1).unwrap().area;
        screen.dispatch(&InputEvent::Pointer {
            kind: InputKind::Click,
            position: Position::new(terms_area.x, terms_area.y),
        });
        assert_eq!(screen.surface().selected_tab("info"), Some("terms"));
        assert!(!screen.surface().node(3).unwrap().hidden);
    }

    #[test]
    fn test_enter_presses_focused_button() {
        let mut surface = Surface::new();
        surface.add(Node::button("Go").with_id("go"));
        let mut screen = Screen::builder("demo")
            .surface(surface)
            .button(Selector::Id("go"), bound(|_, _| Some(Command::Quit)))
            .build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);
        render_once(&mut screen);

        screen.surface_mut().focus_next();
        let commands = screen.dispatch(&InputEvent::Key(crossterm::event::KeyEvent::new(
            KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        )));
        assert!(matches!(commands.as_slice(), [Command::Quit]));
    }

    #[test]
    fn test_typing_lands_in_focused_field() {
        let mut surface = Surface::new();
        surface.add(Node::field(crate::presentation::widgets::TextInput::new("User")).with_id("user"));
        let mut screen = Screen::builder("signin").surface(surface).build();
        screen.prepare(false, &EventRemap::default(), VIEWPORT);

        screen.surface_mut().focus_next();
        for c in ['h', 'i'] {
            screen.dispatch(&InputEvent::Key(crossterm::event::KeyEvent::new(
                KeyCode::Char(c),
                crossterm::event::KeyModifiers::NONE,
            )));
        }
        assert_eq!(screen.surface().field_value("user"), Some("hi"));
    }
}
