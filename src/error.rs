use std::fmt;
use std::io;

#[derive(Debug)]
pub enum GameError {
    /// A transition named a state that does not exist or was never registered.
    UnknownState(String),
    TerminalTooSmall {
        need_w: u16,
        need_h: u16,
        got_w: u16,
        got_h: u16,
    },
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownState(name) => write!(f, "unknown state: {name}"),
            Self::TerminalTooSmall {
                need_w,
                need_h,
                got_w,
                got_h,
            } => write!(
                f,
                "terminal too small: need {need_w}x{need_h}, got {got_w}x{got_h}"
            ),
            Self::Io(e) => write!(f, "terminal i/o: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
