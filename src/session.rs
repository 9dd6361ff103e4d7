//! Engine session: one render task driven by a command channel.
//!
//! DESIGN
//! ======
//! [`spawn_session`] starts a task that owns the engine and every timer.
//! The task runs a `select!` loop over three sources:
//! - commands from the UI side, dispatched in arrival order;
//! - the frame interval, which renders and broadcasts dirty state;
//! - the visibility debounce deadline, when one is pending.
//!
//! LIFECYCLE
//! =========
//! 1. `AwaitingInit`: commands other than `init` are queued (bounded FIFO,
//!    oldest dropped on overflow).
//! 2. `init` → validate → claim surface → load background → build engine →
//!    `initComplete` → replay queued commands → `Ready`.
//! 3. A later `init` tears the running engine down and builds a new one.
//! 4. Closing the command channel ends the loop; dropping the engine
//!    releases its surface.
//!
//! Init failures are reported as `error` events and leave the session
//! waiting for another `init`. A failed background load is reported but the
//! engine is still built, without a background.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::VecDeque;
use std::sync::Arc;

use messages::{Command, ErrorCode, Event};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;
use viewport::{Engine, EngineInit};

use crate::assets::AssetLoader;
use crate::bridge::Bridge;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::surface::{BoxedSurface, SurfaceProvider};

// =============================================================================
// HANDLE
// =============================================================================

/// UI-side ends of a running session.
pub struct SessionHandle {
    session_id: Uuid,
    commands: Option<mpsc::Sender<Command>>,
    events: mpsc::Receiver<Event>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// # Errors
    ///
    /// Returns [`BridgeError::ChannelClosed`] after [`Self::close`] or once
    /// the session task has exited.
    #[cfg(test)]
    pub async fn send(&self, command: Command) -> Result<(), BridgeError> {
        let Some(commands) = &self.commands else {
            return Err(BridgeError::ChannelClosed);
        };
        commands.send(command).await.map_err(|_| BridgeError::ChannelClosed)
    }

    /// Next event, or `None` once the session has exited and drained.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Take the command sender out of the handle. The channel closes once
    /// the taken sender is dropped.
    pub fn take_sender(&mut self) -> Option<mpsc::Sender<Command>> {
        self.commands.take()
    }

    /// Close the command channel. Events already produced stay readable.
    #[cfg(test)]
    pub fn close(&mut self) {
        self.commands = None;
    }

    /// Close both channels and wait for the task to finish.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Task`] if the session task panicked.
    pub async fn join(self) -> Result<(), BridgeError> {
        let Self { commands, events, task, .. } = self;
        drop(commands);
        drop(events);
        task.await?;
        Ok(())
    }
}

/// Start a session task on the current runtime.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidConfig`] if `config` does not validate.
pub fn spawn_session(
    config: BridgeConfig,
    surfaces: Arc<dyn SurfaceProvider>,
    assets: Arc<dyn AssetLoader>,
) -> Result<SessionHandle, BridgeError> {
    config.validate()?;
    let (command_tx, command_rx) = mpsc::channel(config.channel_capacity);
    let (event_tx, event_rx) = mpsc::channel(config.channel_capacity);
    let session_id = Uuid::new_v4();

    let session = Session {
        id: session_id,
        config,
        surfaces,
        assets,
        events: event_tx,
        phase: Phase::AwaitingInit { pending: VecDeque::new() },
    };
    let task = tokio::spawn(session.run(command_rx));

    Ok(SessionHandle { session_id, commands: Some(command_tx), events: event_rx, task })
}

// =============================================================================
// SESSION
// =============================================================================

enum Phase {
    AwaitingInit { pending: VecDeque<Command> },
    Ready(Box<Bridge<BoxedSurface>>),
}

struct Session {
    id: Uuid,
    config: BridgeConfig,
    surfaces: Arc<dyn SurfaceProvider>,
    assets: Arc<dyn AssetLoader>,
    events: mpsc::Sender<Event>,
    phase: Phase,
}

impl Session {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        info!(session_id = %self.id, "session: started");
        let mut frames = time::interval(self.config.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let ready = matches!(self.phase, Phase::Ready(_));
            let deadline = self.visibility_deadline();

            let step = tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    self.dispatch(command, &mut frames).await
                }
                now = frames.tick(), if ready => self.on_frame(now).await,
                () = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_visibility_deadline().await
                }
            };
            if let Err(e) = step {
                debug!(session_id = %self.id, error = %e, "session: event receiver gone");
                break;
            }
        }

        info!(session_id = %self.id, "session: closed");
    }

    async fn dispatch(&mut self, command: Command, frames: &mut Interval) -> Result<(), BridgeError> {
        if matches!(command, Command::Init { .. }) {
            return self.init(command, frames).await;
        }
        match &mut self.phase {
            Phase::AwaitingInit { pending } => {
                if pending.len() >= self.config.pending_capacity {
                    if let Some(dropped) = pending.pop_front() {
                        warn!(session_id = %self.id, kind = dropped.kind(), "session: pending queue full, dropped oldest");
                    }
                }
                pending.push_back(command);
                Ok(())
            }
            Phase::Ready(bridge) => {
                let events = bridge.handle(command, Instant::now());
                self.emit(events).await
            }
        }
    }

    async fn init(&mut self, command: Command, frames: &mut Interval) -> Result<(), BridgeError> {
        let Command::Init { canvas_handle, image_path, data, brush_size, scale_factor, viewport } = command else {
            return Ok(());
        };
        let (Some(handle), Some(path), Some(viewport)) = (canvas_handle, image_path, viewport) else {
            warn!(session_id = %self.id, "session: init missing canvasHandle, imagePath or viewport");
            let event = Event::error(ErrorCode::InvalidInit, "init requires canvasHandle, imagePath and viewport");
            return self.emit(vec![event]).await;
        };

        // A new init always starts from scratch; the old surface is released here.
        let pending = match std::mem::replace(&mut self.phase, Phase::AwaitingInit { pending: VecDeque::new() }) {
            Phase::AwaitingInit { pending } => pending,
            Phase::Ready(_) => {
                info!(session_id = %self.id, "session: re-init, replacing engine");
                VecDeque::new()
            }
        };

        let surface = match self.surfaces.claim(&handle) {
            Ok(surface) => surface,
            Err(e) => {
                self.phase = Phase::AwaitingInit { pending };
                return self.fail_init(&e).await;
            }
        };

        let background = match self.assets.load_background(&path).await {
            Ok(texture) => Some(texture),
            Err(e) => {
                warn!(session_id = %self.id, path = %path, error = %e, "session: background load failed, continuing without it");
                self.emit(vec![Event::error(ErrorCode::BackgroundLoadFailed, e.to_string())]).await?;
                None
            }
        };

        let init = EngineInit {
            viewport: &viewport,
            data: &data,
            brush_size,
            scale_factor,
            background: background.as_ref(),
        };
        let engine = match Engine::new(surface, init) {
            Ok(engine) => engine,
            Err(e) => {
                self.phase = Phase::AwaitingInit { pending };
                return self.fail_init(&BridgeError::from(e)).await;
            }
        };

        let mut bridge = Bridge::new(engine, &self.config);
        info!(
            session_id = %self.id,
            handle = %handle,
            markers = bridge.engine().core.index().len(),
            replayed = pending.len(),
            "session: init complete"
        );

        let mut events = vec![bridge.init_complete()];
        let now = Instant::now();
        for command in pending {
            events.extend(bridge.handle(command, now));
        }
        self.phase = Phase::Ready(Box::new(bridge));
        frames.reset_immediately();
        self.emit(events).await
    }

    async fn fail_init(&mut self, err: &BridgeError) -> Result<(), BridgeError> {
        warn!(session_id = %self.id, error = %err, "session: init failed");
        let code = err.code().unwrap_or(ErrorCode::InvalidInit);
        self.emit(vec![Event::error(code, err.to_string())]).await
    }

    async fn on_frame(&mut self, now: Instant) -> Result<(), BridgeError> {
        let Phase::Ready(bridge) = &mut self.phase else {
            return Ok(());
        };
        let events = bridge.on_frame(now);
        self.emit(events).await
    }

    async fn on_visibility_deadline(&mut self) -> Result<(), BridgeError> {
        let Phase::Ready(bridge) = &mut self.phase else {
            return Ok(());
        };
        let events = bridge.on_visibility_deadline(Instant::now());
        self.emit(events).await
    }

    fn visibility_deadline(&self) -> Option<Instant> {
        match &self.phase {
            Phase::Ready(bridge) => bridge.visibility_deadline(),
            Phase::AwaitingInit { .. } => None,
        }
    }

    async fn emit(&mut self, events: Vec<Event>) -> Result<(), BridgeError> {
        for event in events {
            self.events.send(event).await.map_err(|_| BridgeError::ChannelClosed)?;
        }
        Ok(())
    }
}
