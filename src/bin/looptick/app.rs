//! App - wires the looper to the terminal and the audio device

use std::io::stdout;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;

use looptick::{
    clock::MonotonicClock, config::LoopConfig, drums::KitPlayer, runtime::Looper,
    sequencing::DrumSlot,
};

use super::audio::{self, AudioOutput, Scope};
use super::pad::{PadAction, TerminalPad};
use super::ui::{self, PadDisplay, View};

/// Longest wait for input per frame
const INPUT_POLL: Duration = Duration::from_millis(1);
/// Minimum time between redraws (~60fps)
const DRAW_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    config: LoopConfig,
}

/// Everything the frame loop mutates
struct Session {
    looper: Looper,
    pad: TerminalPad,
    player: KitPlayer,
    display: PadDisplay,
    scope: Scope,
    audio: AudioOutput,
}

impl App {
    pub fn new(config: LoopConfig) -> Self {
        Self { config }
    }

    /// Start audio, take over the terminal and loop until quit
    pub fn run(self) -> EyreResult<()> {
        let (audio, trigger_tx, scope) = audio::start(&self.config)?;

        let release_events = supports_keyboard_enhancement().unwrap_or(false);
        log::info!(
            "{} pads, split at {}, key releases {}",
            self.config.num_pads,
            self.config.split,
            if release_events { "reported" } else { "not reported, toggle mode" }
        );

        let mut session = Session {
            looper: Looper::new(&self.config),
            pad: TerminalPad::new(self.config.num_pads, release_events),
            player: KitPlayer::new(trigger_tx),
            display: PadDisplay::new(
                self.config.num_pads,
                Duration::from_millis(self.config.led_hold_ms),
            ),
            scope,
            audio,
        };

        let mut terminal = ratatui::init();
        with_teardown(
            || {
                if release_events {
                    execute!(
                        stdout(),
                        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                    )
                    .wrap_err("failed to enable key release events")?;
                }
                self.event_loop(&mut terminal, &mut session)
            },
            || {
                if release_events {
                    let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
                }
                ratatui::restore();
            },
        )
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, session: &mut Session) -> EyreResult<()> {
        let clock = MonotonicClock::new();
        let mut last_draw: Option<Instant> = None;

        loop {
            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    match session.pad.handle_key(key) {
                        PadAction::Quit => break,
                        PadAction::ToggleMute(slot) => toggle_mute(&mut session.player, slot),
                        PadAction::Reset => {
                            log::info!("resetting all beats");
                            session.looper.sequencer_mut().reset();
                            session.pad.reset();
                            session.player.silence();
                        }
                        PadAction::None => {}
                    }
                }
            }

            session.looper.frame(
                &clock,
                &mut session.pad,
                &mut session.player,
                &mut session.display,
            );
            session.scope.poll();

            if last_draw.map_or(true, |at| at.elapsed() >= DRAW_INTERVAL) {
                terminal.draw(|frame| ui::render(frame, &self.view(session)))?;
                last_draw = Some(Instant::now());
            }
        }

        log::info!("quit after {} dropped drum triggers", session.player.dropped());
        Ok(())
    }

    fn view<'a>(&self, session: &'a Session) -> View<'a> {
        View {
            display: &session.display,
            beats: session.looper.sequencer().scheduler().beats(),
            editing: session.looper.sequencer().session().bound_pad(),
            split: self.config.split,
            muted: [
                session.player.is_muted(DrumSlot(0)),
                session.player.is_muted(DrumSlot(1)),
            ],
            dropped: session.player.dropped(),
            scope: session.scope.samples(),
            sample_rate: session.audio.sample_rate,
            release_events: session.pad.release_events(),
        }
    }
}

/// Run `body`, then `teardown` whether or not `body` failed
fn with_teardown<T>(
    body: impl FnOnce() -> EyreResult<T>,
    teardown: impl FnOnce(),
) -> EyreResult<T> {
    let result = body();
    teardown();
    result
}

fn toggle_mute(player: &mut KitPlayer, slot: DrumSlot) {
    player.toggle_mute(slot);
    log::info!(
        "drum slot {} {}",
        slot.index(),
        if player.is_muted(slot) { "muted" } else { "live" }
    );
}
