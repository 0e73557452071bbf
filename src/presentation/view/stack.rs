//! The screen stack: registry, current pointer, transitions, z-order.

use std::collections::VecDeque;
use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::{Color, Modifier, Style},
};

use super::element::Offset;
use super::screen::Screen;
use super::signal::Signal;
use super::transition::{
    Slide, TransitionClock, entrance_offset, exit_offset, lerp_offset, panel_offset,
};
use super::wiring::{EventRemap, InputEvent, InputKind};
use crate::presentation::commands::Command;

/// Why a requested transition was not started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionRejection {
    /// A transition is already running.
    #[error("a transition is already in progress")]
    Busy,
    /// The target screen is already current.
    #[error("screen is already current")]
    AlreadyCurrent,
    /// No screen with that id is registered.
    #[error("unknown screen: {0}")]
    UnknownScreen(String),
    /// `conceal_panel` was called with no panel open.
    #[error("no panel is open")]
    NoActivePanel,
    /// A panel reveal needs a current screen to slide aside.
    #[error("no current screen to reveal a panel under")]
    NoCurrentScreen,
}

/// Notifications emitted by the stack as transitions progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    /// A show or reveal committed; the named screen is now current.
    Committed {
        /// The screen that became current.
        screen: &'static str,
    },
    /// A panel reveal or conceal finished; the current screen is unchanged.
    TransitionDone,
}

enum TransitionKind {
    /// Incoming slides in over the outgoing screen.
    Entrance {
        incoming: usize,
        outgoing: Option<usize>,
    },
    /// Outgoing slides away, exposing the incoming screen beneath.
    Exit { outgoing: usize, incoming: usize },
    /// The covered screen slides partially aside, exposing a panel.
    PanelOut { panel: usize, covered: usize },
    /// The covered screen slides back over the panel.
    PanelIn { panel: usize, covered: usize },
}

struct ActiveTransition {
    kind: TransitionKind,
    clock: TransitionClock,
    from: Offset,
    to: Offset,
}

impl ActiveTransition {
    fn moving(&self) -> usize {
        match self.kind {
            TransitionKind::Entrance { incoming, .. } => incoming,
            TransitionKind::Exit { outgoing, .. } => outgoing,
            TransitionKind::PanelOut { covered, .. }
            | TransitionKind::PanelIn { covered, .. } => covered,
        }
    }
}

struct PanelState {
    panel: usize,
    covered: usize,
}

/// Owns every screen and drives navigation between them.
///
/// One stack exists per app; screens never reach around it to find each
/// other. Input is suppressed while a transition is running, animated
/// moves are advanced from the app's animation tick, and completed moves
/// surface as [`StackEvent`]s for the app loop to react to.
pub struct ViewStack {
    screens: Vec<Screen>,
    current: Option<usize>,
    in_transition: bool,
    z_top: i32,
    z_bottom: i32,
    viewport: Size,
    touch_support: bool,
    remap: EventRemap,
    active: Option<ActiveTransition>,
    panel: Option<PanelState>,
    events: VecDeque<StackEvent>,
}

impl ViewStack {
    /// Creates an empty stack for the given viewport.
    #[must_use]
    pub fn new(viewport: Size, touch_support: bool) -> Self {
        Self {
            screens: Vec::new(),
            current: None,
            in_transition: false,
            z_top: 0,
            z_bottom: 0,
            viewport,
            touch_support,
            remap: EventRemap::default(),
            active: None,
            panel: None,
            events: VecDeque::new(),
        }
    }

    /// Replaces the touch-gesture substitution table.
    pub fn set_remap(&mut self, remap: EventRemap) {
        self.remap = remap;
    }

    /// Registers a screen. Ids are expected to be unique.
    pub fn register(&mut self, screen: Screen) {
        debug_assert!(
            self.index_of(screen.id()).is_none(),
            "duplicate screen id {}",
            screen.id()
        );
        self.screens.push(screen);
    }

    /// Id of the current screen, if any.
    #[must_use]
    pub fn current_id(&self) -> Option<&'static str> {
        self.current.map(|i| self.screens[i].id())
    }

    /// Whether an animated transition is running.
    #[must_use]
    pub fn is_in_transition(&self) -> bool {
        self.in_transition
    }

    /// Whether a panel is fully open.
    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    /// Borrows a screen by id.
    #[must_use]
    pub fn screen(&self, id: &str) -> Option<&Screen> {
        self.index_of(id).map(|i| &self.screens[i])
    }

    /// Mutably borrows a screen by id.
    pub fn screen_mut(&mut self, id: &str) -> Option<&mut Screen> {
        self.index_of(id).map(|i| &mut self.screens[i])
    }

    /// Takes the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<StackEvent> {
        self.events.drain(..).collect()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.screens.iter().position(|s| s.id() == id)
    }

    fn next_z(&mut self) -> i32 {
        self.z_top += 1;
        self.z_top
    }

    fn last_z(&mut self) -> i32 {
        self.z_bottom -= 1;
        self.z_bottom
    }

    fn lookup(&self, id: &str) -> Result<usize, TransitionRejection> {
        self.index_of(id)
            .ok_or_else(|| TransitionRejection::UnknownScreen(id.to_owned()))
    }

    /// Prepares a screen if needed (fires `Init` on first display).
    fn stage(&mut self, index: usize) {
        let viewport = self.viewport;
        let screen = &mut self.screens[index];
        screen.prepare(self.touch_support, &self.remap, viewport);
    }

    /// Fires `Visible` then `Layout`, as a screen comes on stage.
    fn fire_shown(&mut self, index: usize) {
        let viewport = self.viewport;
        self.screens[index].fire(Signal::Visible, viewport);
        self.screens[index].fire(Signal::Layout, viewport);
    }

    /// Hides a screen: focus is dropped and scroll rewound so the screen
    /// comes back pristine on its next show.
    fn hide_screen(&mut self, index: usize) {
        let viewport = self.viewport;
        let screen = &mut self.screens[index];
        screen.surface_mut().blur();
        screen.surface_mut().reset_scroll();
        screen.element_mut().hidden = true;
        screen.fire(Signal::Hidden, viewport);
    }

    /// Makes a screen current, bringing it in over the previous one.
    ///
    /// With an animation the screen slides in from offscreen and the
    /// previous screen is hidden when the slide commits; without one the
    /// swap is immediate.
    pub fn show(
        &mut self,
        id: &str,
        anim: Option<Slide>,
    ) -> Result<(), TransitionRejection> {
        if self.in_transition || self.panel.is_some() {
            return Err(TransitionRejection::Busy);
        }
        let index = self.lookup(id)?;
        if self.current == Some(index) {
            return Err(TransitionRejection::AlreadyCurrent);
        }

        self.stage(index);
        let z = self.next_z();
        let viewport = self.viewport;
        tracing::debug!(screen = id, anim = ?anim.map(|a| a.to_string()), "show");

        match anim {
            None => {
                let outgoing = self.current;
                {
                    let screen = &mut self.screens[index];
                    let element = screen.element_mut();
                    element.hidden = false;
                    element.offset = Offset::ZERO;
                    element.z = z;
                }
                self.fire_shown(index);
                if let Some(out) = outgoing {
                    self.hide_screen(out);
                }
                self.current = Some(index);
                let screen = self.screens[index].id();
                self.events.push_back(StackEvent::Committed { screen });
            }
            Some(slide) => {
                let from = entrance_offset(slide, viewport);
                {
                    let screen = &mut self.screens[index];
                    let element = screen.element_mut();
                    element.hidden = false;
                    element.opacity = 0.0;
                    element.offset = from;
                    element.z = z;
                }
                self.fire_shown(index);
                self.in_transition = true;
                self.active = Some(ActiveTransition {
                    kind: TransitionKind::Entrance {
                        incoming: index,
                        outgoing: self.current,
                    },
                    clock: TransitionClock::new(),
                    from,
                    to: Offset::ZERO,
                });
            }
        }
        Ok(())
    }

    /// Makes a screen current by sliding the present one away, exposing
    /// the new screen beneath it. Falls back to [`Self::show`] when no
    /// screen is current.
    pub fn reveal(
        &mut self,
        id: &str,
        anim: Option<Slide>,
    ) -> Result<(), TransitionRejection> {
        if self.in_transition || self.panel.is_some() {
            return Err(TransitionRejection::Busy);
        }
        let Some(outgoing) = self.current else {
            return self.show(id, anim);
        };
        let index = self.lookup(id)?;
        if outgoing == index {
            return Err(TransitionRejection::AlreadyCurrent);
        }

        self.stage(index);
        let z = self.last_z();
        let viewport = self.viewport;
        tracing::debug!(screen = id, anim = ?anim.map(|a| a.to_string()), "reveal");

        // The departing screen moves above everything for its slide out.
        let top = self.next_z();
        self.screens[outgoing].element_mut().z = top;
        {
            let screen = &mut self.screens[index];
            let element = screen.element_mut();
            element.hidden = false;
            element.offset = Offset::ZERO;
            element.z = z;
        }
        self.fire_shown(index);

        match anim {
            None => {
                self.hide_screen(outgoing);
                self.current = Some(index);
                let screen = self.screens[index].id();
                self.events.push_back(StackEvent::Committed { screen });
            }
            Some(slide) => {
                self.in_transition = true;
                self.active = Some(ActiveTransition {
                    kind: TransitionKind::Exit {
                        outgoing,
                        incoming: index,
                    },
                    clock: TransitionClock::new(),
                    from: Offset::ZERO,
                    to: exit_offset(slide, viewport),
                });
            }
        }
        Ok(())
    }

    /// Opens a drawer panel: the current screen slides partially aside to
    /// expose the panel beneath it, and stays current.
    pub fn reveal_panel(&mut self, id: &str, anim: Slide) -> Result<(), TransitionRejection> {
        if self.in_transition || self.panel.is_some() {
            return Err(TransitionRejection::Busy);
        }
        let Some(covered) = self.current else {
            return Err(TransitionRejection::NoCurrentScreen);
        };
        let index = self.lookup(id)?;
        if covered == index {
            return Err(TransitionRejection::AlreadyCurrent);
        }

        self.stage(index);
        let z = self.last_z();
        tracing::debug!(screen = id, anim = %anim, "reveal panel");

        {
            let screen = &mut self.screens[index];
            let element = screen.element_mut();
            element.hidden = false;
            element.offset = Offset::ZERO;
            element.z = z;
        }
        self.fire_shown(index);

        self.in_transition = true;
        self.active = Some(ActiveTransition {
            kind: TransitionKind::PanelOut {
                panel: index,
                covered,
            },
            clock: TransitionClock::new(),
            from: Offset::ZERO,
            to: panel_offset(anim, self.viewport),
        });
        Ok(())
    }

    /// Closes the open panel: the covered screen slides back into place.
    pub fn conceal_panel(&mut self) -> Result<(), TransitionRejection> {
        if self.in_transition {
            return Err(TransitionRejection::Busy);
        }
        let Some(state) = self.panel.take() else {
            return Err(TransitionRejection::NoActivePanel);
        };
        tracing::debug!("conceal panel");

        let from = self.screens[state.covered].element().offset;
        self.in_transition = true;
        self.active = Some(ActiveTransition {
            kind: TransitionKind::PanelIn {
                panel: state.panel,
                covered: state.covered,
            },
            clock: TransitionClock::new(),
            from,
            to: Offset::ZERO,
        });
        Ok(())
    }

    /// Hides a screen immediately, with no animation.
    pub fn hide(&mut self, id: &str) -> Result<(), TransitionRejection> {
        if self.in_transition {
            return Err(TransitionRejection::Busy);
        }
        let index = self.lookup(id)?;
        self.hide_screen(index);
        if self.current == Some(index) {
            self.current = None;
        }
        Ok(())
    }

    /// Records a new viewport size and re-fires `Layout` on live screens.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        for i in 0..self.screens.len() {
            if self.screens[i].is_prepared() && !self.screens[i].element().hidden {
                self.screens[i].fire(Signal::Layout, viewport);
            }
        }
    }

    /// Advances the active transition and every visible screen's own tick.
    pub fn tick(&mut self, dt: Duration) -> Vec<Command> {
        if let Some(active) = self.active.as_mut() {
            active.clock.advance(dt);
            let alpha = active.clock.alpha();
            let offset = lerp_offset(active.from, active.to, alpha);
            let moving = active.moving();
            self.screens[moving].element_mut().offset = offset;

            if let TransitionKind::Entrance { incoming, .. } = &active.kind {
                self.screens[*incoming].element_mut().opacity = alpha;
            }

            if let TransitionKind::PanelOut { covered, .. } = &active.kind {
                if active.clock.is_animating() {
                    let element = self.screens[*covered].element_mut();
                    element.shadow = true;
                    element.obstructed = true;
                }
            }

            if active.clock.is_complete() {
                self.commit();
            }
        }

        let mut commands = Vec::new();
        for screen in &mut self.screens {
            if !screen.element().hidden {
                if let Some(command) = screen.tick(dt) {
                    commands.push(command);
                }
            }
        }
        commands
    }

    fn commit(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let viewport = self.viewport;
        self.in_transition = false;

        match active.kind {
            TransitionKind::Entrance { incoming, outgoing } => {
                {
                    let element = self.screens[incoming].element_mut();
                    element.offset = Offset::ZERO;
                    element.opacity = 1.0;
                }
                if let Some(out) = outgoing {
                    self.hide_screen(out);
                }
                self.current = Some(incoming);
                let screen = self.screens[incoming].id();
                self.events.push_back(StackEvent::Committed { screen });
            }
            TransitionKind::Exit { outgoing, incoming } => {
                self.hide_screen(outgoing);
                self.screens[outgoing].element_mut().offset = Offset::ZERO;
                self.current = Some(incoming);
                let screen = self.screens[incoming].id();
                self.events.push_back(StackEvent::Committed { screen });
            }
            TransitionKind::PanelOut { panel, covered } => {
                self.panel = Some(PanelState { panel, covered });
                self.events.push_back(StackEvent::TransitionDone);
            }
            TransitionKind::PanelIn { panel, covered } => {
                self.screens[covered].element_mut().reset();
                self.screens[covered].element_mut().hidden = false;
                self.hide_screen(panel);
                self.screens[panel].element_mut().reset();
                // The covered screen is whole again; let it re-announce.
                self.screens[covered].fire(Signal::Visible, viewport);
                self.screens[covered].fire(Signal::Layout, viewport);
                self.events.push_back(StackEvent::TransitionDone);
            }
        }
    }

    /// Routes input to the right screen, honoring panel obstruction.
    ///
    /// Input is dropped entirely while a transition is running. With a
    /// panel open, activating the obstructed (covered) screen closes the
    /// panel; everything else goes to the panel itself.
    pub fn dispatch(&mut self, event: &InputEvent) -> Vec<Command> {
        if self.in_transition {
            return Vec::new();
        }

        if let Some(state) = &self.panel {
            let covered = state.covered;
            let panel = state.panel;

            match event {
                InputEvent::Key(key)
                    if key.code == crossterm::event::KeyCode::Esc
                        && key.kind == crossterm::event::KeyEventKind::Press =>
                {
                    let _ = self.conceal_panel();
                    return Vec::new();
                }
                InputEvent::Key(_) => {
                    return self.screens[panel].dispatch(event);
                }
                InputEvent::Pointer { kind, position } => {
                    let activate = if self.touch_support {
                        InputKind::Tap
                    } else {
                        InputKind::Click
                    };
                    let offset = self.screens[covered].element().offset;
                    if self.hits_screen(covered, *position) {
                        // The covered screen is obstructed; activating it
                        // closes the panel instead of reaching its wiring.
                        if *kind == activate
                            || (offset.dx > 0 && *kind == InputKind::SwipeLeft)
                            || (offset.dx < 0 && *kind == InputKind::SwipeRight)
                        {
                            let _ = self.conceal_panel();
                        }
                        return Vec::new();
                    }
                    if (offset.dx > 0 && *kind == InputKind::SwipeLeft)
                        || (offset.dx < 0 && *kind == InputKind::SwipeRight)
                    {
                        let _ = self.conceal_panel();
                        return Vec::new();
                    }
                    return self.dispatch_to(panel, *kind, *position);
                }
            }
        }

        let Some(current) = self.current else {
            return Vec::new();
        };
        match event {
            InputEvent::Pointer { kind, position } => {
                self.dispatch_to(current, *kind, *position)
            }
            InputEvent::Key(_) => self.screens[current].dispatch(event),
        }
    }

    /// Translates a viewport position into a screen's local space and
    /// dispatches there.
    fn dispatch_to(&mut self, index: usize, kind: InputKind, position: Position) -> Vec<Command> {
        let offset = self.screens[index].element().offset;
        let local_x = i32::from(position.x) - offset.dx;
        let local_y = i32::from(position.y) - offset.dy;
        let (Ok(x), Ok(y)) = (u16::try_from(local_x), u16::try_from(local_y)) else {
            return Vec::new();
        };
        self.screens[index].dispatch(&InputEvent::Pointer {
            kind,
            position: Position::new(x, y),
        })
    }

    /// Whether a viewport position lands on a screen's translated area.
    fn hits_screen(&self, index: usize, position: Position) -> bool {
        let offset = self.screens[index].element().offset;
        let x = i32::from(position.x) - offset.dx;
        let y = i32::from(position.y) - offset.dy;
        x >= 0
            && y >= 0
            && x < i32::from(self.viewport.width)
            && y < i32::from(self.viewport.height)
    }

    /// Renders every visible screen in z-order, applying translation,
    /// panel shadow, and obstruction dimming.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let mut order: Vec<usize> = (0..self.screens.len())
            .filter(|&i| !self.screens[i].element().hidden)
            .collect();
        order.sort_by_key(|&i| self.screens[i].element().z);

        for index in order {
            let element = self.screens[index].element().clone();
            let faded = element.opacity < 1.0;
            if element.offset.is_zero() && !element.shadow && !element.obstructed && !faded {
                self.screens[index].render(area, buf);
                continue;
            }

            let mut scratch = Buffer::empty(area);
            self.screens[index].render(area, &mut scratch);
            blit(&scratch, buf, area, element.offset, element.obstructed || faded);

            if element.shadow {
                shade_edge(buf, area, element.offset);
            }
        }
    }
}

/// Copies `src` into `dst` translated by `offset`, clipping to `area`.
fn blit(src: &Buffer, dst: &mut Buffer, area: Rect, offset: Offset, dim: bool) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let tx = i32::from(x) + offset.dx;
            let ty = i32::from(y) + offset.dy;
            let (Ok(tx), Ok(ty)) = (u16::try_from(tx), u16::try_from(ty)) else {
                continue;
            };
            if tx < area.left() || tx >= area.right() || ty < area.top() || ty >= area.bottom()
            {
                continue;
            }
            let cell = src[(x, y)].clone();
            dst[(tx, ty)] = cell;
            if dim {
                dst[(tx, ty)].set_style(Style::default().add_modifier(Modifier::DIM));
            }
        }
    }
}

/// Darkens the edge of a translated screen facing the exposed panel.
fn shade_edge(buf: &mut Buffer, area: Rect, offset: Offset) {
    let shadow = Style::default().bg(Color::DarkGray);
    if offset.dx > 0 {
        let x = u16::try_from(i32::from(area.left()) + offset.dx).unwrap_or(area.left());
        if x < area.right() {
            for y in area.top()..area.bottom() {
                buf[(x, y)].set_style(shadow);
            }
        }
    } else if offset.dx < 0 {
        let x = i32::from(area.right()) - 1 + offset.dx;
        if let Ok(x) = u16::try_from(x) {
            if x >= area.left() && x < area.right() {
                for y in area.top()..area.bottom() {
                    buf[(x, y)].set_style(shadow);
                }
            }
        }
    } else if offset.dy != 0 {
        let y = if offset.dy > 0 {
            i32::from(area.top()) + offset.dy
        } else {
            i32::from(area.bottom()) - 1 + offset.dy
        };
        if let Ok(y) = u16::try_from(y) {
            if y >= area.top() && y < area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)].set_style(shadow);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view::components::{Node, Surface};
    use crate::presentation::view::transition::{TRANSITION_DEFER, TRANSITION_DURATION};
    use std::cell::RefCell;
    use std::rc::Rc;

    const VIEWPORT: Size = Size {
        width: 80,
        height: 24,
    };

    /// One tick long enough to finish any transition.
    fn settle() -> Duration {
        TRANSITION_DEFER + TRANSITION_DURATION + Duration::from_millis(10)
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn logged_screen(id: &'static str, log: &Log) -> Screen {
        let mut builder = Screen::builder(id);
        for (signal, tag) in [
            (Signal::Init, "init"),
            (Signal::Layout, "layout"),
            (Signal::Visible, "visible"),
            (Signal::Hidden, "hidden"),
        ] {
            let log = log.clone();
            builder = builder.on(signal, move |_, _| {
                log.borrow_mut().push(format!("{id}:{tag}"));
            });
        }
        builder.build()
    }

    fn stack_with(ids: &[&'static str], log: &Log) -> ViewStack {
        let mut stack = ViewStack::new(VIEWPORT, false);
        for id in ids {
            stack.register(logged_screen(id, log));
        }
        stack
    }

    #[test]
    fn test_instant_show_fires_lifecycle_in_order() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home"], &log);
        stack.show("home", None).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["home:init", "home:visible", "home:layout"]
        );
        assert_eq!(stack.current_id(), Some("home"));
        assert_eq!(
            stack.drain_events(),
            vec![StackEvent::Committed { screen: "home" }]
        );
    }

    #[test]
    fn test_init_fires_once_across_repeat_shows() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["a", "b"], &log);
        stack.show("a", None).unwrap();
        stack.show("b", None).unwrap();
        stack.show("a", None).unwrap();

        let inits = log
            .borrow()
            .iter()
            .filter(|e| e.as_str() == "a:init")
            .count();
        assert_eq!(inits, 1);
    }

    #[test]
    fn test_animated_show_starts_offscreen_and_commits() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["splash", "signin"], &log);
        stack.show("splash", None).unwrap();
        stack.drain_events();

        stack.show("signin", Some(Slide::Up)).unwrap();
        assert!(stack.is_in_transition());
        // Slide-up enters from below: positive viewport height.
        assert_eq!(
            stack.screen("signin").unwrap().element().offset,
            Offset::new(0, 24)
        );
        // The incoming screen announces itself up front, but the current
        // pointer only moves once the slide commits.
        assert!(log.borrow().contains(&"signin:visible".to_owned()));
        assert_eq!(stack.current_id(), Some("splash"));

        stack.tick(settle());
        assert!(!stack.is_in_transition());
        assert_eq!(stack.current_id(), Some("signin"));
        assert!(stack.screen("splash").unwrap().element().hidden);
        assert_eq!(
            stack.screen("signin").unwrap().element().offset,
            Offset::ZERO
        );
        assert!(log.borrow().contains(&"splash:hidden".to_owned()));
        assert_eq!(
            stack.drain_events(),
            vec![StackEvent::Committed { screen: "signin" }]
        );
    }

    #[test]
    fn test_animated_show_slide_down_enters_from_above() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["a"], &log);
        stack.show("a", Some(Slide::Down)).unwrap();
        assert_eq!(
            stack.screen("a").unwrap().element().offset,
            Offset::new(0, -24)
        );
    }

    #[test]
    fn test_transitions_reject_while_busy() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["a", "b", "c"], &log);
        stack.show("a", None).unwrap();
        stack.show("b", Some(Slide::Left)).unwrap();
        let fired = log.borrow().len();

        assert_eq!(stack.show("c", None), Err(TransitionRejection::Busy));
        assert_eq!(
            stack.reveal("c", None),
            Err(TransitionRejection::Busy)
        );
        assert_eq!(
            stack.reveal_panel("c", Slide::Left),
            Err(TransitionRejection::Busy)
        );
        assert_eq!(stack.conceal_panel(), Err(TransitionRejection::Busy));
        assert_eq!(
            log.borrow().len(),
            fired,
            "rejected requests must fire no signals"
        );

        stack.tick(settle());
        stack.show("c", None).unwrap();
    }

    #[test]
    fn test_show_current_screen_is_rejected() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["a"], &log);
        stack.show("a", None).unwrap();
        assert_eq!(
            stack.show("a", None),
            Err(TransitionRejection::AlreadyCurrent)
        );
    }

    #[test]
    fn test_unknown_screen_is_rejected() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&[], &log);
        assert!(matches!(
            stack.show("ghost", None),
            Err(TransitionRejection::UnknownScreen(_))
        ));
    }

    #[test]
    fn test_later_screens_stack_higher() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["a", "b"], &log);
        stack.show("a", None).unwrap();
        stack.show("b", None).unwrap();
        let za = stack.screen("a").unwrap().element().z;
        let zb = stack.screen("b").unwrap().element().z;
        assert!(zb > za);
    }

    #[test]
    fn test_reveal_places_incoming_beneath_and_slides_current_away() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home", "signin"], &log);
        stack.show("home", None).unwrap();
        stack.reveal("signin", Some(Slide::Down)).unwrap();

        let z_home = stack.screen("home").unwrap().element().z;
        let z_signin = stack.screen("signin").unwrap().element().z;
        assert!(z_signin < z_home);
        assert!(!stack.screen("signin").unwrap().element().hidden);

        stack.tick(settle());
        assert_eq!(stack.current_id(), Some("signin"));
        assert!(stack.screen("home").unwrap().element().hidden);
        // The slid-away screen's translation is cleared for its next show.
        assert_eq!(
            stack.screen("home").unwrap().element().offset,
            Offset::ZERO
        );
    }

    #[test]
    fn test_reveal_without_current_falls_back_to_show() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["signin"], &log);
        stack.reveal("signin", Some(Slide::Up)).unwrap();
        assert_eq!(
            stack.screen("signin").unwrap().element().offset,
            Offset::new(0, 24)
        );
        stack.tick(settle());
        assert_eq!(stack.current_id(), Some("signin"));
    }

    #[test]
    fn test_panel_reveal_keeps_current_and_marks_obstruction() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home", "menu"], &log);
        stack.show("home", None).unwrap();
        stack.drain_events();

        stack.reveal_panel("menu", Slide::Left).unwrap();
        assert!(stack.is_in_transition());

        stack.tick(settle());
        assert!(!stack.is_in_transition());
        assert!(stack.is_panel_open());
        // Current is unchanged; the covered screen slid partially aside.
        assert_eq!(stack.current_id(), Some("home"));
        let home = stack.screen("home").unwrap().element();
        assert_eq!(home.offset, Offset::new(68, 0));
        assert!(home.shadow);
        assert!(home.obstructed);
        assert_eq!(stack.drain_events(), vec![StackEvent::TransitionDone]);
    }

    #[test]
    fn test_panel_reveal_requires_current_screen() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["menu"], &log);
        assert_eq!(
            stack.reveal_panel("menu", Slide::Left),
            Err(TransitionRejection::NoCurrentScreen)
        );
    }

    #[test]
    fn test_conceal_panel_restores_covered_screen() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home", "menu"], &log);
        stack.show("home", None).unwrap();
        stack.reveal_panel("menu", Slide::Left).unwrap();
        stack.tick(settle());
        stack.drain_events();

        stack.conceal_panel().unwrap();
        stack.tick(settle());

        assert!(!stack.is_panel_open());
        let home = stack.screen("home").unwrap().element();
        assert!(!home.hidden);
        assert!(home.offset.is_zero());
        assert!(!home.shadow);
        assert!(!home.obstructed);
        assert!(stack.screen("menu").unwrap().element().hidden);
        assert!(log.borrow().contains(&"menu:hidden".to_owned()));
        assert_eq!(stack.drain_events(), vec![StackEvent::TransitionDone]);
    }

    #[test]
    fn test_conceal_without_panel_is_rejected() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home"], &log);
        stack.show("home", None).unwrap();
        assert_eq!(
            stack.conceal_panel(),
            Err(TransitionRejection::NoActivePanel)
        );
    }

    #[test]
    fn test_input_suppressed_during_transition() {
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let mut surface = Surface::new();
        surface.add(Node::button("Go").with_id("go"));
        let screen = Screen::builder("a")
            .surface(surface)
            .button(
                crate::presentation::view::wiring::Selector::Id("go"),
                crate::presentation::view::wiring::bound(move |_, _| {
                    *counter.borrow_mut() += 1;
                    None
                }),
            )
            .build();

        let mut stack = ViewStack::new(VIEWPORT, false);
        stack.register(screen);
        stack.register(Screen::builder("b").build());
        stack.show("a", None).unwrap();

        let area = Rect::new(0, 0, VIEWPORT.width, VIEWPORT.height);
        let mut buf = Buffer::empty(area);
        stack.render(area, &mut buf);
        let target = stack.screen("a").unwrap().surface().node(0).unwrap().area;
        let press = InputEvent::Pointer {
            kind: InputKind::Press,
            position: Position::new(target.x + 1, target.y + 1),
        };

        stack.dispatch(&press);
        assert_eq!(*hits.borrow(), 1);

        stack.show("b", Some(Slide::Up)).unwrap();
        stack.dispatch(&press);
        assert_eq!(*hits.borrow(), 1, "input must be dropped mid-transition");
    }

    #[test]
    fn test_click_on_covered_screen_closes_panel() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home", "menu"], &log);
        stack.show("home", None).unwrap();
        stack.reveal_panel("menu", Slide::Left).unwrap();
        stack.tick(settle());

        // Offset is (68, 0); x=70 lands on the covered screen's sliver.
        stack.dispatch(&InputEvent::Pointer {
            kind: InputKind::Click,
            position: Position::new(70, 5),
        });
        assert!(stack.is_in_transition());
        stack.tick(settle());
        assert!(!stack.is_panel_open());
    }

    #[test]
    fn test_swipe_closes_panel() {
        let log: Log = Rc::default();
        let mut stack = stack_with(&["home", "menu"], &log);
        stack.show("home", None).unwrap();
        stack.reveal_panel("menu", Slide::Left).unwrap();
        stack.tick(settle());

        // Covered screen moved right, so a leftward swipe pushes it back.
        stack.dispatch(&InputEvent::Pointer {
            kind: InputKind::SwipeLeft,
            position: Position::new(10, 5),
        });
        assert!(stack.is_in_transition());
    }

    #[test]
    fn test_render_translates_moved_screen() {
        let mut surface = Surface::new();
        surface.add(Node::label("XYZ"));
        let screen = Screen::builder("a").surface(surface).build();
        let mut stack = ViewStack::new(
            Size {
                width: 10,
                height: 3,
            },
            false,
        );
        stack.register(screen);
        stack.show("a", None).unwrap();
        stack.screen_mut("a").unwrap().element_mut().offset = Offset::new(3, 0);

        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        stack.render(area, &mut buf);
        assert_eq!(buf[(3, 0)].symbol(), "X");
        assert_eq!(buf[(4, 0)].symbol(), "Y");
    }
}
