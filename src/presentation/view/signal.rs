//! Screen lifecycle signals.

use ratatui::layout::Size;

use super::components::Surface;

/// Lifecycle signals fired by the view stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Fired exactly once, before the screen is shown for the first time.
    Init,
    /// Fired before the screen is shown and when the viewport is resized.
    Layout,
    /// Fired after the screen becomes visible.
    Visible,
    /// Fired after the screen becomes hidden.
    Hidden,
}

/// A lifecycle hook; receives the screen's surface and the viewport size.
pub type SignalHook = Box<dyn FnMut(&mut Surface, Size)>;

/// Typed hook table supplied at screen construction.
#[derive(Default)]
pub struct SignalHooks {
    init: Vec<SignalHook>,
    layout: Vec<SignalHook>,
    visible: Vec<SignalHook>,
    hidden: Vec<SignalHook>,
}

impl SignalHooks {
    /// Registers a hook for the given signal.
    pub fn on(&mut self, signal: Signal, hook: SignalHook) {
        match signal {
            Signal::Init => self.init.push(hook),
            Signal::Layout => self.layout.push(hook),
            Signal::Visible => self.visible.push(hook),
            Signal::Hidden => self.hidden.push(hook),
        }
    }

    /// Fires every hook registered for the signal, in registration order.
    pub fn fire(&mut self, signal: Signal, surface: &mut Surface, viewport: Size) {
        let hooks = match signal {
            Signal::Init => &mut self.init,
            Signal::Layout => &mut self.layout,
            Signal::Visible => &mut self.visible,
            Signal::Hidden => &mut self.hidden,
        };
        for hook in hooks {
            hook(surface, viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_hooks_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = SignalHooks::default();

        for tag in ["first", "second"] {
            let log = log.clone();
            hooks.on(Signal::Layout, Box::new(move |_, _| log.borrow_mut().push(tag)));
        }

        let mut surface = Surface::new();
        hooks.fire(Signal::Layout, &mut surface, Size::new(80, 24));
        hooks.fire(Signal::Init, &mut surface, Size::new(80, 24));

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }
}
