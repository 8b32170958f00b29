//! App - owns the tone engine, the audio stream and the UI loop
//!
//! Everything runs on the main (control) thread except the cpal callback.
//! Each loop iteration pumps the producer once, drains the scope tap, redraws
//! when a frame is due and handles at most one key press.

use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use cpal::traits::StreamTrait;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use keytone::{sequencing::notes::octave_of, Producer, ToneEngine};
use ratatui::DefaultTerminal;
use rtrb::RingBuffer as ScopeRing;
use tracing::{info, warn};

use super::{
    audio::AudioDevice,
    keymap::{action_for, KeyAction, MAX_OCTAVE, MIN_OCTAVE},
    ui::{self, SpectrumAnalyzer, UiState},
};

/// Samples kept for the oscilloscope and the FFT
const SCOPE_LEN: usize = 2048;
/// Capacity of the audio → UI tap, in samples
const SCOPE_RING_LEN: usize = SCOPE_LEN * 8;
/// How long one iteration waits for input. Must stay well below one period.
const POLL_INTERVAL: Duration = Duration::from_millis(1);
/// ~60fps
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    // Declared first so it is dropped first: callbacks stop before the
    // producer side of the ring goes away.
    stream: cpal::Stream,
    producer: Producer,
    scope_rx: rtrb::Consumer<f32>,
    scope: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    device_name: String,
    note: u8,
    octave: u8,
    should_quit: bool,
}

impl App {
    /// Open the default device, build the engine, prefill the ring and start
    /// the stream.
    pub fn new(period_frames: usize, buffer_periods: usize, note: u8) -> EyreResult<Self> {
        let device = AudioDevice::open_default()?;
        let settings = device.settings(period_frames, buffer_periods);

        let engine = ToneEngine::new(settings)
            .wrap_err("invalid stream settings")?
            .with_note(note);
        let (mut producer, consumer) = engine.split();

        // Some hosts start calling back as soon as the stream is built.
        producer.prime().wrap_err("failed to prefill ring buffer")?;

        let (scope_tx, scope_rx) = ScopeRing::<f32>::new(SCOPE_RING_LEN);
        let stream = device.build_stream(&settings, consumer, scope_tx)?;
        stream.play().wrap_err("failed to start output stream")?;

        info!(
            note,
            frequency = producer.frequency(),
            capacity = producer.ring().capacity(),
            "stream started"
        );

        Ok(Self {
            stream,
            spectrum: SpectrumAnalyzer::new(SCOPE_LEN, settings.sample_rate as f32),
            producer,
            scope_rx,
            scope: vec![0.0; SCOPE_LEN],
            device_name: device.name().to_owned(),
            note,
            octave: octave_of(note).min(MAX_OCTAVE),
            should_quit: false,
        })
    }

    /// Run until the user quits, then stop the stream.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let mut last_draw: Option<Instant> = None;

        while !self.should_quit {
            if let Err(err) = self.producer.pump() {
                warn!(%err, "producer cycle dropped");
            }

            self.poll_scope();

            if last_draw.map_or(true, |t| t.elapsed() >= FRAME_INTERVAL) {
                self.spectrum.update(&self.scope);
                let state = self.ui_state();
                terminal.draw(|frame| ui::render(frame, &state, &self.scope, &self.spectrum))?;
                last_draw = Some(Instant::now());
            }

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Pull everything the callback has tapped, keeping the newest SCOPE_LEN.
    fn poll_scope(&mut self) {
        let available = self.scope_rx.slots();
        if available == 0 {
            return;
        }
        let Ok(chunk) = self.scope_rx.read_chunk(available) else {
            return;
        };
        let (first, second) = chunk.as_slices();
        let incoming = first.len() + second.len();
        if incoming >= SCOPE_LEN {
            let skip = incoming - SCOPE_LEN;
            let tail = first.iter().chain(second).skip(skip);
            for (dst, &s) in self.scope.iter_mut().zip(tail) {
                *dst = s;
            }
        } else {
            self.scope.rotate_left(incoming);
            let start = SCOPE_LEN - incoming;
            for (dst, &s) in self.scope[start..].iter_mut().zip(first.iter().chain(second)) {
                *dst = s;
            }
        }
        chunk.commit_all();
    }

    fn handle_key(&mut self, code: KeyCode) {
        let action = match code {
            KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Char(c) => action_for(c, self.octave),
            _ => None,
        };

        match action {
            Some(KeyAction::Note(note)) => {
                self.note = note;
                self.producer.set_note(note);
            }
            Some(KeyAction::OctaveDown) => {
                self.octave = self.octave.saturating_sub(1).max(MIN_OCTAVE);
            }
            Some(KeyAction::OctaveUp) => {
                self.octave = (self.octave + 1).min(MAX_OCTAVE);
            }
            Some(KeyAction::Reset) => self.reset(),
            Some(KeyAction::Quit) => self.should_quit = true,
            None => {}
        }
    }

    /// Pause the callback, clear and refill the ring, resume.
    fn reset(&mut self) {
        // Resetting with callbacks still arriving would race the consumer.
        if !pause(&self.stream, "reset skipped") {
            return;
        }
        self.producer.reset();
        if let Err(err) = self.producer.prime() {
            warn!(%err, "refill after reset failed");
        }
        if let Err(err) = self.stream.play() {
            warn!(%err, "failed to resume stream after reset");
        }
        info!("ring buffer reset");
    }

    fn shutdown(self) {
        let Self {
            stream, producer, ..
        } = self;
        pause(&stream, "dropping it while running");
        drop(stream);

        let stats = producer.stats().snapshot();
        info!(
            underruns = stats.underruns,
            skipped_cycles = stats.skipped_cycles,
            frames_produced = stats.frames_produced,
            frames_consumed = stats.frames_consumed,
            "stream stopped"
        );
    }

    fn ui_state(&self) -> UiState<'_> {
        let ring = self.producer.ring();
        UiState {
            device_name: &self.device_name,
            settings: self.producer.settings(),
            note: self.note,
            frequency: self.producer.frequency(),
            octave: self.octave,
            buffered: ring.available(),
            capacity: ring.capacity(),
            stats: self.producer.stats().snapshot(),
        }
    }
}

/// Pause `stream`, logging a failure together with what happens next.
/// Returns whether the callbacks are stopped.
fn pause(stream: &impl StreamTrait, consequence: &str) -> bool {
    match stream.pause() {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "stream cannot be paused, {consequence}");
            false
        }
    }
}
