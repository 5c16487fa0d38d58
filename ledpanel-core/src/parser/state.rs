//! Parser state definition

use ledpanel_protocol::Command;

/// Position of the parser within the current command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseState {
    /// Waiting for a command byte
    #[default]
    AwaitingCommand,
    /// Reading the 4-digit numeric parameter
    AwaitingParam {
        command: Command,
        /// Value accumulated so far
        value: u16,
        /// Digits consumed (0..4)
        pos: u8,
    },
    /// Reading the 6-digit color after a complete numeric parameter
    AwaitingColor {
        command: Command,
        /// Completed numeric parameter (count or index)
        param: u16,
        /// Color accumulated so far
        color: u32,
        /// Digits consumed (0..6)
        pos: u8,
    },
}

impl ParseState {
    /// Check if no command is in progress
    pub fn is_idle(&self) -> bool {
        matches!(self, ParseState::AwaitingCommand)
    }

    /// Command currently being parsed, if any
    pub fn command(&self) -> Option<Command> {
        match *self {
            ParseState::AwaitingCommand => None,
            ParseState::AwaitingParam { command, .. }
            | ParseState::AwaitingColor { command, .. } => Some(command),
        }
    }

    /// Start reading the numeric parameter of `command`
    pub fn param(command: Command) -> Self {
        ParseState::AwaitingParam {
            command,
            value: 0,
            pos: 0,
        }
    }

    /// Start reading the color of `command`
    pub fn color(command: Command, param: u16) -> Self {
        ParseState::AwaitingColor {
            command,
            param,
            color: 0,
            pos: 0,
        }
    }
}
