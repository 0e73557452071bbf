//! Declarative input wiring for screens.
//!
//! Screens declare `(input kind, selector, handler)` triples up front; the
//! stack resolves them into direct handler references when the screen is
//! prepared, remapping touch-style inputs to their pointer equivalents on
//! terminals without touch reporting.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crossterm::event::KeyEvent;
use ratatui::layout::Position;

use super::components::Surface;
use crate::presentation::commands::Command;

/// Input gestures a binding can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Finger contact began.
    TouchStart,
    /// Quick touch with no drag.
    Tap,
    /// Press on a focusable node (mouse up over the same node, or Enter).
    Press,
    /// Horizontal drag to the left.
    SwipeLeft,
    /// Horizontal drag to the right.
    SwipeRight,
    /// Mouse button went down.
    MouseDown,
    /// Mouse button released over the node it went down on.
    Click,
}

/// A raw input delivered to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A positioned gesture.
    Pointer {
        /// Gesture kind, already remapped for the terminal's capabilities.
        kind: InputKind,
        /// Cell the gesture landed on, in viewport coordinates.
        position: Position,
    },
    /// A key press.
    Key(KeyEvent),
}

/// Addresses nodes within a screen's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// The node with this id.
    Id(&'static str),
    /// Any node carrying this class.
    Class(&'static str),
    /// The node at this index in the surface.
    Node(usize),
    /// The whole screen area.
    Root,
}

impl Selector {
    /// Returns whether the node at `index` in `surface` matches.
    #[must_use]
    pub fn matches(&self, surface: &Surface, index: usize) -> bool {
        match *self {
            Self::Id(id) => surface.node(index).is_some_and(|n| n.id == Some(id)),
            Self::Class(class) => surface
                .node(index)
                .is_some_and(|n| n.class == Some(class)),
            Self::Node(i) => i == index,
            Self::Root => true,
        }
    }
}

/// An input handler; may emit a [`Command`] for the app to execute.
pub type HandlerFn = Box<dyn FnMut(&mut Surface, &InputEvent) -> Option<Command>>;

/// A handler shared between its declaration site and the resolved wiring.
pub type SharedHandler = Rc<RefCell<HandlerFn>>;

/// Wraps a closure as a directly-bound handler reference.
pub fn bound<F>(handler: F) -> HandlerRef
where
    F: FnMut(&mut Surface, &InputEvent) -> Option<Command> + 'static,
{
    HandlerRef::Bound(Rc::new(RefCell::new(Box::new(handler))))
}

/// How a binding names its handler.
#[derive(Clone)]
pub enum HandlerRef {
    /// The handler itself.
    Bound(SharedHandler),
    /// A method name, resolved against the screen's method table at
    /// preparation time.
    Named(&'static str),
}

/// A declared `(kind, selector, handler)` triple.
pub struct EventBinding {
    /// Gesture kind as declared; may be remapped during resolution.
    pub kind: InputKind,
    /// Which nodes the binding covers.
    pub selector: Selector,
    /// Handler to run.
    pub handler: HandlerRef,
}

/// A declared button: pressing any matching node runs the handler.
pub struct ButtonBinding {
    /// Which nodes act as the button.
    pub selector: Selector,
    /// Handler to run on press.
    pub handler: HandlerRef,
}

/// What a resolved binding does when it matches.
#[derive(Clone)]
pub enum ResolvedAction {
    /// Run a handler.
    Handler(SharedHandler),
    /// Activate the matched tab and show its pane.
    SelectTab,
    /// Mark the matched list item selected.
    SelectItem,
}

/// A binding with its handler reference resolved and its gesture remapped.
#[derive(Clone)]
pub struct ResolvedBinding {
    /// Gesture kind after remapping.
    pub kind: InputKind,
    /// Which nodes the binding covers.
    pub selector: Selector,
    /// Action to take.
    pub action: ResolvedAction,
}

/// Substitution table applied to declared touch gestures on terminals
/// without touch reporting.
#[derive(Debug, Clone)]
pub struct EventRemap {
    table: Vec<(InputKind, InputKind)>,
}

impl Default for EventRemap {
    fn default() -> Self {
        Self {
            table: vec![
                (InputKind::TouchStart, InputKind::MouseDown),
                (InputKind::Tap, InputKind::Click),
            ],
        }
    }
}

impl EventRemap {
    /// Creates a remap from explicit substitution pairs.
    #[must_use]
    pub fn new(table: Vec<(InputKind, InputKind)>) -> Self {
        Self { table }
    }

    /// Returns the substitute for `kind`, or `kind` itself if unmapped.
    #[must_use]
    pub fn resolve(&self, kind: InputKind) -> InputKind {
        self.table
            .iter()
            .find(|(from, _)| *from == kind)
            .map_or(kind, |(_, to)| *to)
    }
}

/// Resolves declared bindings against a method table.
///
/// Named references that match no method are dropped with an error log;
/// wiring mistakes surface at preparation time rather than on first input.
pub fn resolve_bindings(
    declared: &[EventBinding],
    buttons: &[ButtonBinding],
    methods: &HashMap<&'static str, SharedHandler>,
    touch_support: bool,
    remap: &EventRemap,
) -> Vec<ResolvedBinding> {
    let mut resolved = Vec::with_capacity(declared.len() + buttons.len());

    let resolve_ref = |handler: &HandlerRef| -> Option<SharedHandler> {
        match handler {
            HandlerRef::Bound(shared) => Some(shared.clone()),
            HandlerRef::Named(name) => {
                let found = methods.get(name).cloned();
                if found.is_none() {
                    tracing::error!(method = name, "no such handler method; binding dropped");
                }
                found
            }
        }
    };

    for binding in declared {
        let Some(shared) = resolve_ref(&binding.handler) else {
            continue;
        };
        let kind = if touch_support {
            binding.kind
        } else {
            remap.resolve(binding.kind)
        };
        resolved.push(ResolvedBinding {
            kind,
            selector: binding.selector,
            action: ResolvedAction::Handler(shared),
        });
    }

    for button in buttons {
        let Some(shared) = resolve_ref(&button.handler) else {
            continue;
        };
        resolved.push(ResolvedBinding {
            kind: InputKind::Press,
            selector: button.selector,
            action: ResolvedAction::Handler(shared),
        });
    }

    resolved
}
