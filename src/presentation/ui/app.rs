//! Main application orchestrator.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::layout::Size;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::{SigninRequest, SigninResponse};
use crate::application::use_cases::{RestoreSessionUseCase, SigninUseCase};
use crate::domain::entities::{MemberStatus, Session};
use crate::domain::errors::ApiError;
use crate::domain::notification::{Notification, NotificationLevel};
use crate::domain::ports::MemberPort;
use crate::infrastructure::config::AppConfig;
use crate::presentation::commands::Command;
use crate::presentation::events::{GestureRecognizer, is_quit_event};
use crate::presentation::ui::{about_screen, home_screen, menu_panel, signin_screen, splash_screen};
use crate::presentation::view::{Slide, StackEvent, TransitionRejection, ViewStack};
use crate::presentation::widgets::NotificationPopup;

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Debug)]
enum Action {
    SessionRestored(Option<Session>),
    SigninSucceeded(SigninResponse),
    SigninFailed(ApiError),
    StatusLoaded(MemberStatus),
    StatusFailed(ApiError),
}

/// Owns the screen stack and drives the whole application.
pub struct App {
    stack: ViewStack,
    signin_use_case: SigninUseCase,
    restore_use_case: RestoreSessionUseCase,
    member_port: Arc<dyn MemberPort>,
    recognizer: GestureRecognizer,
    session: Option<Session>,
    notification: Option<Notification>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Commands that arrived while the stack was busy; replayed as
    /// transitions finish.
    pending: VecDeque<Command>,
    signin_in_flight: bool,
    splash_finished: bool,
    restored: Option<Option<Session>>,
    forgot_password_url: String,
    website_url: String,
    running: bool,
}

impl App {
    /// Wires the app together from its ports and configuration.
    #[must_use]
    pub fn new(
        config: &AppConfig,
        signin_port: Arc<dyn crate::domain::ports::SigninPort>,
        member_port: Arc<dyn MemberPort>,
        session_store: Arc<dyn crate::domain::ports::SessionStorePort>,
    ) -> Self {
        let signin_use_case = SigninUseCase::new(signin_port, session_store.clone());
        let restore_use_case = RestoreSessionUseCase::new(session_store);
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            stack: ViewStack::new(Size::new(0, 0), config.touch_support()),
            signin_use_case,
            restore_use_case,
            member_port,
            recognizer: GestureRecognizer::new(config.touch_support()),
            session: None,
            notification: None,
            action_tx,
            action_rx,
            pending: VecDeque::new(),
            signin_in_flight: false,
            splash_finished: false,
            restored: None,
            forgot_password_url: config.forgot_password_url().to_owned(),
            website_url: config.website_url().to_owned(),
            running: true,
        }
    }

    /// Runs the app until quit.
    ///
    /// # Errors
    /// Returns an error if terminal drawing fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.stack.resize(size);

        self.stack.register(splash_screen::build());
        self.stack.register(signin_screen::build(
            self.forgot_password_url.clone(),
            self.website_url.clone(),
        ));
        self.stack.register(home_screen::build());
        self.stack.register(menu_panel::build());
        self.stack.register(about_screen::build(self.website_url.clone()));

        if let Err(e) = self.stack.show(splash_screen::SCREEN_ID, None) {
            error!(error = %e, "failed to show splash screen");
        }

        let restore = self.restore_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let session = restore.execute().await;
            let _ = tx.send(Action::SessionRestored(session));
        });

        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                _ = animation_interval.tick() => {
                    let commands = self.stack.tick(ANIMATION_TICK_RATE);
                    for command in commands {
                        self.execute(command);
                    }
                    self.handle_stack_events();
                    if self.notification.as_ref().is_some_and(Notification::is_expired) {
                        self.notification = None;
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    self.handle_terminal_event(&event);
                }
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("application exiting");
        Ok(())
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        if let Event::Resize(width, height) = event {
            self.stack.resize(Size::new(*width, *height));
            return;
        }
        if let Event::Key(key) = event {
            if is_quit_event(key) {
                self.running = false;
                return;
            }
        }
        for input in self.recognizer.recognize(event) {
            let commands = self.stack.dispatch(&input);
            for command in commands {
                self.execute(command);
            }
        }
    }

    fn handle_stack_events(&mut self) {
        for event in self.stack.drain_events() {
            debug!(event = ?event, "stack event");
            match event {
                StackEvent::Committed { .. } | StackEvent::TransitionDone => {
                    if let Some(command) = self.pending.pop_front() {
                        self.execute(command);
                    }
                }
            }
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Show { screen, anim } => {
                if self.stack.is_panel_open() {
                    self.pending.push_back(Command::Show { screen, anim });
                    let _ = self.stack.conceal_panel();
                    return;
                }
                match self.stack.show(screen, anim) {
                    Ok(()) | Err(TransitionRejection::AlreadyCurrent) => {}
                    Err(TransitionRejection::Busy) => {
                        self.pending.push_back(Command::Show { screen, anim });
                    }
                    Err(e) => warn!(screen, error = %e, "show rejected"),
                }
            }
            Command::Reveal { screen, anim } => {
                if self.stack.is_panel_open() {
                    self.pending.push_back(Command::Reveal { screen, anim });
                    let _ = self.stack.conceal_panel();
                    return;
                }
                match self.stack.reveal(screen, anim) {
                    Ok(()) | Err(TransitionRejection::AlreadyCurrent) => {}
                    Err(TransitionRejection::Busy) => {
                        self.pending.push_back(Command::Reveal { screen, anim });
                    }
                    Err(e) => warn!(screen, error = %e, "reveal rejected"),
                }
            }
            Command::RevealPanel { screen, anim } => {
                if let Err(e) = self.stack.reveal_panel(screen, anim) {
                    warn!(screen, error = %e, "panel reveal rejected");
                }
            }
            Command::ConcealPanel => {
                if let Err(e) = self.stack.conceal_panel() {
                    debug!(error = %e, "conceal ignored");
                }
            }
            Command::OpenExternal(url) => {
                info!(url = %url, "opening in system browser");
                if let Err(e) = opener::open(&url) {
                    warn!(error = %e, "could not open browser");
                    self.notification = Some(Notification::new(
                        NotificationLevel::Error,
                        "Error",
                        format!("Could not open {url}"),
                    ));
                }
            }
            Command::Notify(notification) => {
                self.notification = Some(notification);
            }
            Command::SubmitSignin(credentials) => {
                if self.signin_in_flight {
                    debug!("sign-in already in flight, ignoring repeat submit");
                    return;
                }
                self.signin_in_flight = true;
                info!(username = %credentials.username(), "submitting sign-in");
                let use_case = self.signin_use_case.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = use_case.execute(SigninRequest::new(credentials)).await;
                    let _ = match result {
                        Ok(response) => tx.send(Action::SigninSucceeded(response)),
                        Err(e) => tx.send(Action::SigninFailed(e)),
                    };
                });
            }
            Command::RefreshStatus => self.spawn_status_fetch(),
            Command::SignOut => {
                info!("signing out");
                self.session = None;
                let use_case = self.signin_use_case.clone();
                tokio::spawn(async move {
                    if let Err(e) = use_case.sign_out().await {
                        warn!(error = %e, "failed to clear stored session");
                    }
                });
                self.execute(Command::Reveal {
                    screen: signin_screen::SCREEN_ID,
                    anim: Some(Slide::Down),
                });
            }
            Command::SplashFinished => {
                self.splash_finished = true;
                self.maybe_leave_splash();
            }
            Command::Quit => {
                self.running = false;
            }
        }
    }

    /// Moves on from the splash once both the intro animation and the
    /// session restore have finished.
    fn maybe_leave_splash(&mut self) {
        if !self.splash_finished {
            return;
        }
        let Some(restored) = self.restored.take() else {
            return;
        };
        match restored {
            Some(session) => {
                info!(member_id = %session.member_id(), "resuming session");
                if let Some(screen) = self.stack.screen_mut(home_screen::SCREEN_ID) {
                    home_screen::apply_session(screen.surface_mut(), &session);
                }
                self.session = Some(session);
                self.spawn_status_fetch();
                self.execute(Command::Show {
                    screen: home_screen::SCREEN_ID,
                    anim: Some(Slide::Up),
                });
            }
            None => {
                self.execute(Command::Show {
                    screen: signin_screen::SCREEN_ID,
                    anim: Some(Slide::Up),
                });
            }
        }
    }

    fn spawn_status_fetch(&mut self) {
        let Some(session) = self.session.clone() else {
            debug!("no session, skipping status fetch");
            return;
        };
        let port = self.member_port.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let _ = match port.fetch_status(&session).await {
                Ok(status) => tx.send(Action::StatusLoaded(status)),
                Err(e) => tx.send(Action::StatusFailed(e)),
            };
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SessionRestored(session) => {
                self.restored = Some(session);
                self.maybe_leave_splash();
            }
            Action::SigninSucceeded(response) => {
                self.signin_in_flight = false;
                info!(
                    display_name = %response.session.display_name(),
                    persisted = response.session_persisted,
                    "sign-in succeeded"
                );
                if let Some(screen) = self.stack.screen_mut(home_screen::SCREEN_ID) {
                    home_screen::apply_session(screen.surface_mut(), &response.session);
                }
                self.notification = Some(Notification::new(
                    NotificationLevel::Info,
                    "Welcome",
                    format!("Signed in as {}", response.session.display_name()),
                ));
                self.session = Some(response.session);
                self.spawn_status_fetch();
                self.execute(Command::Show {
                    screen: home_screen::SCREEN_ID,
                    anim: Some(Slide::Up),
                });
            }
            Action::SigninFailed(e) => {
                self.signin_in_flight = false;
                warn!(error = %e, "sign-in failed");
                if let Some(screen) = self.stack.screen_mut(signin_screen::SCREEN_ID) {
                    signin_screen::clear_password(screen.surface_mut());
                }
                self.notification = Some(Notification::new(
                    NotificationLevel::Error,
                    "Sign-in failed",
                    e.to_string(),
                ));
            }
            Action::StatusLoaded(status) => {
                if let Some(screen) = self.stack.screen_mut(home_screen::SCREEN_ID) {
                    home_screen::apply_status(screen.surface_mut(), &status);
                }
            }
            Action::StatusFailed(e) => {
                warn!(error = %e, "status fetch failed");
                self.notification = Some(Notification::alert(
                    "Could not refresh your balance. Press Refresh to try again.",
                ));
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.stack.render(area, frame.buffer_mut());

        if let Some(notification) = self.notification.as_mut() {
            notification.mark_displayed();
            let popup_area = NotificationPopup::area(area);
            frame.render_widget(NotificationPopup::new(notification), popup_area);
        }
    }
}
