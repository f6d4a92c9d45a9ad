mod app;
mod auth;
mod behavior;
mod constants;
mod creature;
mod engine;
mod events;
mod input;
mod lang;
mod limiter;
mod scheduler;
mod store;
mod theme;
mod ui;

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use glutin::prelude::*;
use glutin::surface::WindowSurface;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

use auth::{AuthCompletion, AuthKind, AuthRequest, AuthSession, ProviderError, RestProvider};
use behavior::BehaviorMachine;
use engine::{CompanionEngine, FormBounds};
use events::{EventQueue, FormEvent};
use input::InputState;
use lang::Translations;
use limiter::AttemptLimiter;
use scheduler::{AnimationClock, TaskScheduler};
use store::AttemptStore;
use theme::Settings;
use ui::{AuthMode, AuthUiState, Banner, BannerKind, UiActions};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

struct App {
    state: Option<AppState>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,

    // Companion simulation
    clock: AnimationClock,
    scheduler: TaskScheduler,
    machine: BehaviorMachine,
    engine: CompanionEngine,
    form_events: EventQueue,
    form_bounds: Option<FormBounds>,

    // Auth
    session: AuthSession,
    limiter: AttemptLimiter,

    // UI state
    ui_state: AuthUiState,
    settings: Settings,

    // Input state
    input: InputState,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let settings = Settings::default();

        // Create window and GL context
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = app::create_window(event_loop, settings.theme);

        let mut rng = rand::thread_rng();

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
            clock: AnimationClock::new(),
            scheduler: TaskScheduler::new(),
            machine: BehaviorMachine::new(),
            engine: CompanionEngine::new(&mut rng),
            form_events: EventQueue::new(),
            form_bounds: None,
            session: AuthSession::spawn(RestProvider::from_env()),
            limiter: AttemptLimiter::new(AttemptStore::open_default()),
            ui_state: AuthUiState::new(),
            settings,
            input: InputState::new(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        // Let egui handle the event first
        let _consumed = state.egui_glow.on_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = state.window.inner_size();
                state.input.set_pointer_px(
                    position.x as f32,
                    position.y as f32,
                    size.width as f32,
                    size.height as f32,
                );
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    fn update_and_render(&mut self) {
        let now = self.clock.elapsed();
        let mut rng = rand::thread_rng();

        // Finished identity round trips
        while let Some(completion) = self.session.poll() {
            self.handle_auth_completion(completion);
        }

        // Fire due behavior timers
        for task in self.scheduler.fire_due(now) {
            self.machine.handle_task(task, now, &mut self.scheduler);
        }

        // Apply the previous frame's form events
        for event in self.form_events.drain() {
            self.machine.handle_event(event, now, &mut self.scheduler);
        }

        // Advance the companions
        self.engine.update(
            now,
            self.machine.celebration_elapsed(now),
            self.machine.behavior(),
            self.form_bounds,
            self.input.pointer,
            &mut rng,
        );

        // Run the UI
        let mut actions = UiActions::default();
        let mut measured_bounds = None;
        let mut theme_changed = false;
        let behavior = self.machine.behavior();
        let configured = self.session.is_configured();
        let loading = self.session.is_loading();
        let now_ms = epoch_ms();

        let engine = &self.engine;
        let ui_state = &mut self.ui_state;
        let settings = &mut self.settings;
        let form_events = &mut self.form_events;

        self.egui_glow.run(&self.window, |ctx| {
            ui::draw_companions(ctx, &engine.creatures, behavior, now, settings.theme);
            measured_bounds = ui::draw_auth_card(
                ctx,
                ui_state,
                *settings,
                configured,
                loading,
                now_ms,
                form_events,
                &mut actions,
            );
            theme_changed |= ui::draw_settings_bar(ctx, settings);
        });

        if theme_changed {
            ui::style::apply(&self.egui_glow.egui_ctx, self.settings.theme);
        }

        // The card rect is derived state, remeasured every frame
        if measured_bounds.is_some() {
            self.form_bounds = measured_bounds;
        }

        if actions.submit_requested {
            self.handle_submit();
        }

        // Render
        let backdrop = ui::style::backdrop_color(self.settings.theme);
        unsafe {
            use glow::HasContext;
            self.gl.clear_color(
                backdrop.r() as f32 / 255.0,
                backdrop.g() as f32 / 255.0,
                backdrop.b() as f32 / 255.0,
                1.0,
            );
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        // Paint egui (companions + card)
        self.egui_glow.paint(&self.window);

        // Swap buffers
        self.gl_surface.swap_buffers(&self.gl_context).unwrap();
    }

    /// Handle a validated submit for the current mode
    fn handle_submit(&mut self) {
        let t = self.settings.language.strings();

        if !self.session.is_configured() {
            self.ui_state.banner = Some(Banner {
                kind: BannerKind::Warning,
                title: t.warning.to_string(),
                body: t.not_configured.to_string(),
            });
            return;
        }

        let email = self.ui_state.email.trim().to_string();

        match self.ui_state.mode {
            AuthMode::Login => {
                // Consult the limiter before hitting the identity service
                let status = self.limiter.check_rate_limit(&email);
                if !status.allowed {
                    if status.lockout_seconds > 0 {
                        self.ui_state.set_lockout(status.lockout_seconds, epoch_ms());
                    }
                    self.ui_state.banner = Some(Banner {
                        kind: BannerKind::Error,
                        title: t.error.to_string(),
                        body: t.account_locked.to_string(),
                    });
                    return;
                }
                self.session.submit(AuthRequest::SignIn {
                    email,
                    password: self.ui_state.password.clone(),
                });
            }
            AuthMode::Signup => {
                let full_name = self.ui_state.full_name.trim();
                self.session.submit(AuthRequest::SignUp {
                    email,
                    password: self.ui_state.password.clone(),
                    full_name: (!full_name.is_empty()).then(|| full_name.to_string()),
                });
            }
            AuthMode::ForgotPassword => {
                self.session.submit(AuthRequest::ResetPassword { email });
            }
        }
    }

    /// React to a finished identity round trip
    fn handle_auth_completion(&mut self, completion: AuthCompletion) {
        let t = self.settings.language.strings();

        match (completion.kind, completion.result) {
            (AuthKind::SignIn, Ok(())) => {
                self.limiter.clear_attempts(&completion.email);
                self.ui_state.lockout_until_ms = None;
                self.ui_state.password.clear();
                self.ui_state.banner = Some(Banner {
                    kind: BannerKind::Info,
                    title: t.welcome_back.to_string(),
                    body: t.login_success.to_string(),
                });
                self.form_events.push(FormEvent::SubmitSucceeded);
            }
            (AuthKind::SignIn, Err(err)) => {
                let outcome = self.limiter.record_failed_attempt(&completion.email);
                if outcome.locked {
                    self.ui_state.set_lockout(outcome.lockout_seconds, epoch_ms());
                    self.ui_state.banner = Some(Banner {
                        kind: BannerKind::Error,
                        title: t.login_error.to_string(),
                        body: t.account_locked.to_string(),
                    });
                } else {
                    let status = self.limiter.check_rate_limit(&completion.email);
                    self.ui_state.banner = Some(Banner {
                        kind: BannerKind::Error,
                        title: t.login_error.to_string(),
                        body: format!(
                            "{} ({})",
                            provider_error_text(&err, t),
                            t.attempts_remaining_text(status.remaining_attempts)
                        ),
                    });
                }
            }
            (AuthKind::SignUp, Ok(())) => {
                self.ui_state.set_mode(AuthMode::Login);
                self.ui_state.banner = Some(Banner {
                    kind: BannerKind::Info,
                    title: t.account_created.to_string(),
                    body: t.check_email_confirm.to_string(),
                });
            }
            (AuthKind::SignUp, Err(err)) => {
                self.ui_state.banner = Some(Banner {
                    kind: BannerKind::Error,
                    title: t.signup_error.to_string(),
                    body: provider_error_text(&err, t),
                });
            }
            (AuthKind::ResetPassword, Ok(())) => {
                self.ui_state.set_mode(AuthMode::Login);
                self.ui_state.banner = Some(Banner {
                    kind: BannerKind::Info,
                    title: t.reset_sent.to_string(),
                    body: t.check_email_reset.to_string(),
                });
            }
            (AuthKind::ResetPassword, Err(err)) => {
                self.ui_state.banner = Some(Banner {
                    kind: BannerKind::Error,
                    title: t.error.to_string(),
                    body: provider_error_text(&err, t),
                });
            }
        }
    }
}

/// User-facing text for a provider error; the two pattern-matched cases get
/// translated messages, everything else passes through verbatim
fn provider_error_text(err: &ProviderError, t: &Translations) -> String {
    match err {
        ProviderError::InvalidCredentials => t.invalid_credentials.to_string(),
        ProviderError::AlreadyRegistered => t.already_registered.to_string(),
        ProviderError::NotConfigured => t.not_configured.to_string(),
        ProviderError::Service(message) => message.clone(),
    }
}
