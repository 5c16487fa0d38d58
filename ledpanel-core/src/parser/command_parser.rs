//! Byte-at-a-time command parser
//!
//! The parser has two phases selected by whether the strip length has been
//! configured:
//!
//! - Uninitialized: only `I` (followed by a 4-digit length) and `V` are
//!   understood. Every other byte is dropped without output.
//! - Initialized: `I`, `P`, `S` and `W` read a 4-digit parameter, `P` and
//!   `S` then read a 6-digit color. `L` latches and `V` reports the build.
//!   An unknown command byte is dropped.
//!
//! Any error produces one [`Diagnostic`] and returns the parser to
//! [`ParseState::AwaitingCommand`]. An `I` arriving while a command is in
//! progress aborts that command.

use ledpanel_protocol::command::INIT;
use ledpanel_protocol::hex::{accumulate_color, accumulate_u16};
use ledpanel_protocol::{BuildInfo, Command, Diagnostic, COLOR_DIGITS, NUM_PARAM_DIGITS};

use super::state::ParseState;
use crate::config::PanelConfig;
use crate::traits::{Clock, PixelStrip};

/// Command parser bound to a strip and a clock
pub struct CommandParser<S, C> {
    strip: S,
    clock: C,
    state: ParseState,
    initialized: bool,
    latch_timeout_ms: u32,
    /// Time of the last transmitted frame; `None` until the first latch
    last_latch_ms: Option<u32>,
    build: BuildInfo,
}

impl<S: PixelStrip, C: Clock> CommandParser<S, C> {
    /// Create a new parser
    pub fn new(strip: S, clock: C, config: &PanelConfig) -> Self {
        Self {
            strip,
            clock,
            state: ParseState::AwaitingCommand,
            initialized: false,
            latch_timeout_ms: config.latch.timeout_ms,
            last_latch_ms: None,
            build: config.build,
        }
    }

    /// Check if the strip length has been configured
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current parser state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Get access to the underlying strip
    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Get mutable access to the underlying strip
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    /// Feed a single received byte to the parser
    ///
    /// Returns the diagnostic line to report on the status channel, if the
    /// byte produced one.
    pub fn feed(&mut self, byte: u8) -> Option<Diagnostic> {
        if byte == INIT && !self.state.is_idle() {
            self.reset();
            return None;
        }

        match self.state {
            ParseState::AwaitingCommand => self.start_command(byte),
            ParseState::AwaitingParam {
                command,
                value,
                pos,
            } => self.feed_param(command, value, pos, byte),
            ParseState::AwaitingColor {
                command,
                param,
                color,
                pos,
            } => self.feed_color(command, param, color, pos, byte),
        }
    }

    /// Feed a slice of bytes, reporting every diagnostic through `report`
    pub fn feed_bytes(&mut self, bytes: &[u8], mut report: impl FnMut(Diagnostic)) {
        for &byte in bytes {
            if let Some(diag) = self.feed(byte) {
                report(diag);
            }
        }
    }

    fn reset(&mut self) {
        self.state = ParseState::AwaitingCommand;
    }

    fn start_command(&mut self, byte: u8) -> Option<Diagnostic> {
        let command = Command::from_byte(byte)?;

        if !self.initialized {
            return match command {
                Command::Init => {
                    self.state = ParseState::param(command);
                    None
                }
                Command::Version => Some(Diagnostic::Version(self.build)),
                _ => None,
            };
        }

        match command {
            Command::Init | Command::Pixel | Command::Shade | Command::RawFrame => {
                self.state = ParseState::param(command);
                None
            }
            Command::LatchFrame => self.latch(),
            Command::Version => Some(Diagnostic::Version(self.build)),
        }
    }

    fn feed_param(&mut self, command: Command, value: u16, pos: u8, byte: u8) -> Option<Diagnostic> {
        let value = accumulate_u16(value, byte, pos);
        let pos = pos + 1;
        if pos < NUM_PARAM_DIGITS {
            self.state = ParseState::AwaitingParam {
                command,
                value,
                pos,
            };
            return None;
        }

        if !self.initialized {
            return Some(self.configure_length(value));
        }

        let pixels = self.strip.pixel_count();
        if value > pixels {
            self.reset();
            return Some(Diagnostic::ParamExceedsLength {
                param: value,
                command: command.to_byte(),
            });
        }

        match command {
            Command::Shade | Command::Pixel => {
                self.state = ParseState::color(command, value);
                None
            }
            Command::RawFrame => {
                self.reset();
                Some(Diagnostic::RawFrameStub)
            }
            Command::Init => {
                // Re-init acknowledges without resizing
                self.reset();
                Some(Diagnostic::InitDone { pixels })
            }
            Command::LatchFrame | Command::Version => {
                self.reset();
                Some(Diagnostic::UnknownCommand {
                    command: command.to_byte(),
                })
            }
        }
    }

    fn feed_color(
        &mut self,
        command: Command,
        param: u16,
        color: u32,
        pos: u8,
        byte: u8,
    ) -> Option<Diagnostic> {
        // Checked once, on the first color digit
        if command == Command::Pixel && pos == 0 && param == self.strip.pixel_count() {
            self.reset();
            return Some(Diagnostic::PixelEqualsLength { param });
        }

        let color = accumulate_color(color, byte, pos);
        let pos = pos + 1;
        if pos < COLOR_DIGITS {
            self.state = ParseState::AwaitingColor {
                command,
                param,
                color,
                pos,
            };
            return None;
        }

        match command {
            Command::Shade => {
                for index in 0..param {
                    self.strip.set_pixel(index, color);
                }
                self.latch()
            }
            Command::Pixel => {
                self.strip.set_pixel(param, color);
                self.reset();
                None
            }
            _ => {
                self.reset();
                Some(Diagnostic::UnknownCommand {
                    command: command.to_byte(),
                })
            }
        }
    }

    fn configure_length(&mut self, length: u16) -> Diagnostic {
        self.reset();
        self.strip.set_length(length);

        let pixels = self.strip.pixel_count();
        if pixels != 0 {
            self.initialized = true;
            Diagnostic::InitOk { pixels }
        } else {
            Diagnostic::InitFailed
        }
    }

    /// Transmit the frame unless the previous latch was too recent
    fn latch(&mut self) -> Option<Diagnostic> {
        self.reset();

        let now = self.clock.now_millis();
        let allowed = match self.last_latch_ms {
            Some(last) => now.wrapping_sub(last) > self.latch_timeout_ms,
            None => true,
        };

        if allowed {
            self.strip.show();
            self.last_latch_ms = Some(now);
            None
        } else {
            Some(Diagnostic::LatchTooSoon)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use heapless::Vec;

    const CAPACITY: usize = 64;

    /// Mock strip recording buffer writes and transmits
    struct MockStrip {
        pixels: Vec<u32, CAPACITY>,
        shows: u32,
        resizes: u32,
        writes: u32,
    }

    impl MockStrip {
        fn new() -> Self {
            Self {
                pixels: Vec::new(),
                shows: 0,
                resizes: 0,
                writes: 0,
            }
        }
    }

    impl PixelStrip for MockStrip {
        fn set_length(&mut self, length: u16) {
            self.resizes += 1;
            self.pixels.clear();
            if self.pixels.resize(length as usize, 0).is_err() {
                self.pixels.clear();
            }
        }

        fn pixel_count(&self) -> u16 {
            self.pixels.len() as u16
        }

        fn set_pixel(&mut self, index: u16, color: u32) {
            self.writes += 1;
            if let Some(pixel) = self.pixels.get_mut(index as usize) {
                *pixel = color;
            }
        }

        fn show(&mut self) {
            self.shows += 1;
        }
    }

    /// Mock clock driven by the test
    struct MockClock<'a>(&'a Cell<u32>);

    impl Clock for MockClock<'_> {
        fn now_millis(&self) -> u32 {
            self.0.get()
        }
    }

    const BUILD: BuildInfo = BuildInfo::new("ledpanel", "2024-03-01", "0.1.0");

    fn parser(now: &Cell<u32>) -> CommandParser<MockStrip, MockClock<'_>> {
        let config = PanelConfig::new().with_build(BUILD);
        CommandParser::new(MockStrip::new(), MockClock(now), &config)
    }

    fn feed_all<S: PixelStrip, C: Clock>(
        parser: &mut CommandParser<S, C>,
        bytes: &[u8],
    ) -> Vec<Diagnostic, 16> {
        let mut out = Vec::new();
        parser.feed_bytes(bytes, |diag| {
            out.push(diag).unwrap();
        });
        out
    }

    fn initialized(now: &Cell<u32>) -> CommandParser<MockStrip, MockClock<'_>> {
        let mut p = parser(now);
        assert_eq!(
            &feed_all(&mut p, b"I0010")[..],
            &[Diagnostic::InitOk { pixels: 16 }]
        );
        p
    }

    #[test]
    fn test_noise_ignored_before_init() {
        let now = Cell::new(0);
        let mut p = parser(&now);

        let out = feed_all(&mut p, b"SPLW0123ffS0003ff0000P0001123456Lxyz\n");
        assert!(out.is_empty());
        assert!(!p.is_initialized());
        assert!(p.state().is_idle());
        assert_eq!(p.strip().resizes, 0);
        assert_eq!(p.strip().writes, 0);
        assert_eq!(p.strip().shows, 0);
    }

    #[test]
    fn test_init_success() {
        let now = Cell::new(0);
        let p = initialized(&now);
        assert!(p.is_initialized());
        assert_eq!(p.strip().pixel_count(), 16);
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_init_zero_fails() {
        let now = Cell::new(0);
        let mut p = parser(&now);

        let out = feed_all(&mut p, b"I0000");
        assert_eq!(&out[..], &[Diagnostic::InitFailed]);
        assert!(!p.is_initialized());
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_init_beyond_capacity_fails() {
        let now = Cell::new(0);
        let mut p = parser(&now);

        // 0x100 pixels do not fit the mock's 64-pixel buffer
        let out = feed_all(&mut p, b"I0100");
        assert_eq!(&out[..], &[Diagnostic::InitFailed]);
        assert!(!p.is_initialized());

        // A later valid INIT still works
        let out = feed_all(&mut p, b"I0020");
        assert_eq!(&out[..], &[Diagnostic::InitOk { pixels: 0x20 }]);
        assert!(p.is_initialized());
    }

    #[test]
    fn test_version_before_init() {
        let now = Cell::new(0);
        let mut p = parser(&now);

        let out = feed_all(&mut p, b"V");
        assert_eq!(&out[..], &[Diagnostic::Version(BUILD)]);
        assert!(!p.is_initialized());
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_version_after_init() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"V");
        assert_eq!(&out[..], &[Diagnostic::Version(BUILD)]);
    }

    #[test]
    fn test_init_byte_aborts_pending_init() {
        let now = Cell::new(0);
        let mut p = parser(&now);

        // Second I aborts, the trailing digits are noise
        let out = feed_all(&mut p, b"I00I0010");
        assert!(out.is_empty());
        assert!(!p.is_initialized());
        assert!(p.state().is_idle());

        let out = feed_all(&mut p, b"I0010");
        assert_eq!(&out[..], &[Diagnostic::InitOk { pixels: 16 }]);
    }

    #[test]
    fn test_init_byte_aborts_pending_shade() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"S0003ff0I");
        assert!(out.is_empty());
        assert!(p.state().is_idle());
        assert_eq!(p.strip().writes, 0);
        assert_eq!(p.strip().shows, 0);
    }

    #[test]
    fn test_shade_fills_and_latches() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"S0003ff0000");
        assert!(out.is_empty());
        assert_eq!(&p.strip().pixels[..4], &[0xFF0000, 0xFF0000, 0xFF0000, 0]);
        assert_eq!(p.strip().shows, 1);
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_shade_whole_strip() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"S0010ABCDEF");
        assert!(out.is_empty());
        assert!(p.strip().pixels.iter().all(|&c| c == 0xABCDEF));
        assert_eq!(p.strip().writes, 16);
    }

    #[test]
    fn test_param_exceeds_length() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"S0011ff0000");
        assert_eq!(
            &out[..],
            &[Diagnostic::ParamExceedsLength {
                param: 0x11,
                command: b'S'
            }]
        );
        assert_eq!(p.strip().writes, 0);
        assert_eq!(p.strip().shows, 0);
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_pixel_sets_without_latch() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"P000500ff00");
        assert!(out.is_empty());
        assert_eq!(p.strip().pixels[5], 0x00FF00);
        assert_eq!(p.strip().writes, 1);
        assert_eq!(p.strip().shows, 0);
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_pixel_last_index() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"P000F0000ff");
        assert!(out.is_empty());
        assert_eq!(p.strip().pixels[15], 0x0000FF);
    }

    #[test]
    fn test_pixel_equals_length_rejected() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        // Reported on the first color digit, the rest is dropped as noise
        let mut out = feed_all(&mut p, b"P0010");
        assert!(out.is_empty());
        out = feed_all(&mut p, b"f");
        assert_eq!(&out[..], &[Diagnostic::PixelEqualsLength { param: 16 }]);
        assert!(p.state().is_idle());

        let out = feed_all(&mut p, b"f0000");
        assert!(out.is_empty());
        assert_eq!(p.strip().writes, 0);
        assert!(p.strip().pixels.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_malformed_digits_decode_as_zero() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"P00x3zz00ff");
        assert!(out.is_empty());
        assert_eq!(p.strip().pixels[3], 0x0000FF);
    }

    #[test]
    fn test_latch_rate_limited() {
        let now = Cell::new(1000);
        let mut p = initialized(&now);

        assert!(feed_all(&mut p, b"L").is_empty());
        assert_eq!(p.strip().shows, 1);

        now.set(1005);
        assert_eq!(&feed_all(&mut p, b"L")[..], &[Diagnostic::LatchTooSoon]);
        assert_eq!(p.strip().shows, 1);

        // Exactly the timeout is still too soon
        now.set(1010);
        assert_eq!(&feed_all(&mut p, b"L")[..], &[Diagnostic::LatchTooSoon]);

        now.set(1011);
        assert!(feed_all(&mut p, b"L").is_empty());
        assert_eq!(p.strip().shows, 2);
    }

    #[test]
    fn test_first_latch_at_time_zero() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        assert!(feed_all(&mut p, b"L").is_empty());
        assert_eq!(p.strip().shows, 1);
    }

    #[test]
    fn test_latch_across_clock_wrap() {
        let now = Cell::new(u32::MAX - 2);
        let mut p = initialized(&now);

        assert!(feed_all(&mut p, b"L").is_empty());
        now.set(20);
        assert!(feed_all(&mut p, b"L").is_empty());
        assert_eq!(p.strip().shows, 2);
    }

    #[test]
    fn test_shade_latch_too_soon_still_paints() {
        let now = Cell::new(100);
        let mut p = initialized(&now);

        feed_all(&mut p, b"L");
        now.set(105);
        let out = feed_all(&mut p, b"S0002123456");
        assert_eq!(&out[..], &[Diagnostic::LatchTooSoon]);
        assert_eq!(&p.strip().pixels[..2], &[0x123456, 0x123456]);
        assert_eq!(p.strip().shows, 1);
        assert!(p.state().is_idle());
    }

    #[test]
    fn test_latch_ignored_before_init() {
        let now = Cell::new(0);
        let mut p = parser(&now);

        assert!(feed_all(&mut p, b"L").is_empty());
        assert_eq!(p.strip().shows, 0);
    }

    #[test]
    fn test_reinit_does_not_resize() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"I0008");
        assert_eq!(&out[..], &[Diagnostic::InitDone { pixels: 16 }]);
        assert_eq!(p.strip().pixel_count(), 16);
        assert_eq!(p.strip().resizes, 1);
    }

    #[test]
    fn test_reinit_larger_than_strip() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"I0020");
        assert_eq!(
            &out[..],
            &[Diagnostic::ParamExceedsLength {
                param: 0x20,
                command: b'I'
            }]
        );
        assert_eq!(p.strip().pixel_count(), 16);
    }

    #[test]
    fn test_raw_frame_stub() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"W0002");
        assert_eq!(&out[..], &[Diagnostic::RawFrameStub]);
        assert!(p.state().is_idle());

        // Payload digits are dropped, the next command is decoded normally
        let out = feed_all(&mut p, b"ff000000ff00L");
        assert!(out.is_empty());
        assert_eq!(p.strip().writes, 0);
        assert_eq!(p.strip().shows, 1);
    }

    #[test]
    fn test_unknown_byte_resets_silently() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        let out = feed_all(&mut p, b"Qx\r\n");
        assert!(out.is_empty());
        assert!(p.state().is_idle());

        let out = feed_all(&mut p, b"P0001abcdef");
        assert!(out.is_empty());
        assert_eq!(p.strip().pixels[1], 0xABCDEF);
    }

    #[test]
    fn test_state_tracks_progress() {
        let now = Cell::new(0);
        let mut p = initialized(&now);

        feed_all(&mut p, b"S00");
        assert_eq!(
            p.state(),
            ParseState::AwaitingParam {
                command: Command::Shade,
                value: 0,
                pos: 2
            }
        );

        feed_all(&mut p, b"03ff");
        assert_eq!(
            p.state(),
            ParseState::AwaitingColor {
                command: Command::Shade,
                param: 3,
                color: 0xFF,
                pos: 2
            }
        );
    }
}
