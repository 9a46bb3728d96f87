//! Fixed-rate frame loop
//!
//! [`FrameDriver`] owns the frame buffer, the asset stream and the
//! [`Session`]. Each frame it waits for the frame gate, clears the buffer,
//! samples the buttons, steps the session once and then streams the
//! session's draw requests from flash before committing the buffer to the
//! display.
//!
//! Asset errors stop at this layer. A busy flash chip is retried a few
//! times within the frame and otherwise skipped until the state asks again
//! next frame; a missing or truncated asset drops that one draw. The frame
//! is still committed.

use crate::assets::{AssetDirectory, AssetError};
use crate::display::{Blitter, Display, FrameBuffer};
use crate::entity::MechTable;
use crate::input::{ButtonSource, InputState};
use crate::state::{DrawList, DrawRequest, GameState, Session};
use crate::stream::{AssetStream, FlashDevice};

/// Millisecond time source
pub trait Clock {
    /// Monotonic milliseconds; wraps around
    fn now_ms(&self) -> u32;

    /// Yield while waiting for the next frame (sleep, or just spin)
    fn idle(&mut self);
}

/// Frame loop settings
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DriverConfig {
    /// Frames per second
    pub frame_rate: u8,
    /// Clear the frame buffer once it has been committed
    pub clear_after_commit: bool,
    /// Extra attempts for a draw that hits a busy flash chip
    pub busy_retries: u8,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            clear_after_commit: true,
            busy_retries: 2,
        }
    }
}

impl DriverConfig {
    /// Whole milliseconds per frame (never zero)
    pub fn frame_interval_ms(&self) -> u32 {
        1000 / u32::from(self.frame_rate.max(1))
    }
}

/// Gate that opens once per frame interval
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FrameTimer {
    interval_ms: u32,
    next_due_ms: u32,
    lateness_ms: u32,
}

/// `a` is at or after `b`, allowing for wraparound
#[inline]
fn reached(a: u32, b: u32) -> bool {
    a.wrapping_sub(b) as i32 >= 0
}

impl FrameTimer {
    /// First frame is due at `now_ms`
    pub const fn new(interval_ms: u32, now_ms: u32) -> Self {
        Self {
            interval_ms,
            next_due_ms: now_ms,
            lateness_ms: 0,
        }
    }

    #[inline]
    pub const fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[inline]
    pub const fn next_due_ms(&self) -> u32 {
        self.next_due_ms
    }

    /// How far past its due time the last frame started
    #[inline]
    pub const fn lateness_ms(&self) -> u32 {
        self.lateness_ms
    }

    /// Whether a frame may start at `now_ms`; fires at most once per due time
    ///
    /// Missed frames are not made up: if the following due time has already
    /// passed, the schedule restarts one interval from `now_ms`.
    pub fn ready(&mut self, now_ms: u32) -> bool {
        if !reached(now_ms, self.next_due_ms) {
            return false;
        }
        self.lateness_ms = now_ms.wrapping_sub(self.next_due_ms);
        let next = self.next_due_ms.wrapping_add(self.interval_ms);
        self.next_due_ms = if reached(now_ms, next) {
            now_ms.wrapping_add(self.interval_ms)
        } else {
            next
        };
        true
    }
}

/// What one frame did
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct FrameReport {
    /// State after the session stepped
    pub state: GameState,
    /// Draw requests streamed in full
    pub drawn: u8,
    /// Draw requests dropped on a stream error
    pub failed: u8,
    /// Draw requests skipped because the chip stayed busy
    pub deferred: u8,
    /// The frame started without waiting at the gate
    pub late: bool,
}

enum DrawOutcome {
    Drawn,
    Failed,
    Deferred,
}

/// Stream one request, retrying while the chip is busy
fn draw_request<F: FlashDevice>(
    blitter: &mut Blitter,
    target: &mut FrameBuffer,
    stream: &mut AssetStream<F>,
    request: &DrawRequest,
    retries: u8,
) -> DrawOutcome {
    let mut attempts = 0;
    loop {
        let result = blitter.draw_bitmap(target, stream, request.x, request.y, &request.asset, request.frame, request.mode);
        match result {
            Ok(()) => return DrawOutcome::Drawn,
            Err(e) if e.is_retryable() && attempts < retries => attempts += 1,
            Err(e) if e.is_retryable() => {
                log::warn!("deferring draw at {:#08x}: {}", request.asset.offset, e);
                return DrawOutcome::Deferred;
            }
            Err(e) => {
                log::warn!("dropping draw at {:#08x}: {}", request.asset.offset, e);
                return DrawOutcome::Failed;
            }
        }
    }
}

/// Owns the hardware and runs the game one frame at a time
pub struct FrameDriver<C, B, D, F>
where
    C: Clock,
    B: ButtonSource,
    D: Display,
    F: FlashDevice,
{
    config: DriverConfig,
    directory: AssetDirectory,
    clock: C,
    buttons: B,
    display: D,
    stream: AssetStream<F>,
    timer: FrameTimer,
    input: InputState,
    session: Session,
    draws: DrawList,
    frame: FrameBuffer,
    blitter: Blitter,
}

impl<C, B, D, F> FrameDriver<C, B, D, F>
where
    C: Clock,
    B: ButtonSource,
    D: Display,
    F: FlashDevice,
{
    /// Validate the asset table and set up the loop
    ///
    /// Fails if any asset lies outside its bank; nothing is drawn in that
    /// case.
    pub fn new(
        config: DriverConfig,
        directory: AssetDirectory,
        clock: C,
        buttons: B,
        display: D,
        flash: F,
        table: MechTable,
    ) -> Result<Self, AssetError> {
        if let Err(e) = directory.validate() {
            log::error!("asset table rejected: {}", e);
            return Err(e);
        }
        let timer = FrameTimer::new(config.frame_interval_ms(), clock.now_ms());
        log::info!(
            "frame driver ready: {} assets, {} fps",
            directory.len(),
            config.frame_rate
        );
        Ok(Self {
            config,
            directory,
            clock,
            buttons,
            display,
            stream: AssetStream::new(flash),
            timer,
            input: InputState::new(),
            session: Session::new(table),
            draws: DrawList::new(),
            frame: FrameBuffer::new(),
            blitter: Blitter::new(),
        })
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn directory(&self) -> &AssetDirectory {
        &self.directory
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// The asset stream, e.g. for loading and storing the save record
    pub fn stream_mut(&mut self) -> &mut AssetStream<F> {
        &mut self.stream
    }

    /// Block at the frame gate; returns true if no wait was needed and the
    /// frame started past its due time
    fn wait_for_frame(&mut self) -> bool {
        let mut waited = false;
        while !self.timer.ready(self.clock.now_ms()) {
            self.clock.idle();
            waited = true;
        }
        let late = !waited && self.timer.lateness_ms() > 0;
        if late {
            log::debug!("frame {} late by {} ms", self.session.frame(), self.timer.lateness_ms());
        }
        late
    }

    /// Run exactly one frame
    pub fn run_frame(&mut self) -> FrameReport {
        let late = self.wait_for_frame();

        self.frame.clear();
        self.input.update(self.buttons.poll());

        self.draws.clear();
        self.session.step(&self.input, &mut self.draws);

        let mut report = FrameReport {
            state: self.session.state(),
            late,
            ..FrameReport::default()
        };
        for request in self.draws.iter() {
            let outcome = draw_request(
                &mut self.blitter,
                &mut self.frame,
                &mut self.stream,
                request,
                self.config.busy_retries,
            );
            match outcome {
                DrawOutcome::Drawn => report.drawn += 1,
                DrawOutcome::Failed => report.failed += 1,
                DrawOutcome::Deferred => report.deferred += 1,
            }
        }

        self.display.commit(&self.frame);
        if self.config.clear_after_commit {
            self.frame.clear();
            self.blitter.clear();
        }
        report
    }

    /// Run frames forever
    pub fn run(&mut self) -> ! {
        loop {
            self.run_frame();
        }
    }
}
