#[derive(Debug)]
pub enum FluxError {
    X11(X11Error),
}

#[derive(Debug)]
pub enum X11Error {
    ConnectError(x11rb::errors::ConnectError),
    ConnectionError(x11rb::errors::ConnectionError),
    ReplyError(x11rb::errors::ReplyError),
    ReplyOrIdError(x11rb::errors::ReplyOrIdError),
    HotkeyTaken(String),
    NoKeycode(String),
}

#[derive(Debug)]
pub enum ConfigError {
    ParseError(ron::error::SpannedError),
    UnknownKey(String),
    OutOfRange {
        field: String,
        value: u32,
        max: u32,
    },
    InvalidZone {
        name: String,
        reason: String,
    },
    InvalidButton(u8),
}

impl std::fmt::Display for FluxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X11(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for FluxError {}

impl std::fmt::Display for X11Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectError(err) => write!(f, "{}", err),
            Self::ConnectionError(err) => write!(f, "{}", err),
            Self::ReplyError(err) => write!(f, "{}", err),
            Self::ReplyOrIdError(err) => write!(f, "{}", err),
            Self::HotkeyTaken(combo) => write!(
                f,
                "hotkey {} is already grabbed by another program or the window manager",
                combo
            ),
            Self::NoKeycode(key) => write!(f, "no keycode is mapped to key {}", key),
        }
    }
}

impl std::error::Error for X11Error {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseError(err) => write!(f, "Failed to parse RON config: {}", err),
            Self::UnknownKey(key) => write!(f, "Unknown key: {}", key),
            Self::OutOfRange { field, value, max } => {
                write!(f, "{} = {} is out of range (0-{})", field, value, max)
            }
            Self::InvalidZone { name, reason } => write!(f, "Invalid zone '{}': {}", name, reason),
            Self::InvalidButton(button) => {
                write!(f, "Invalid drag button {}: expected 1-5", button)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl<T: Into<X11Error>> From<T> for FluxError {
    fn from(value: T) -> Self {
        Self::X11(value.into())
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(value: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(value)
    }
}

impl From<x11rb::errors::ConnectError> for X11Error {
    fn from(value: x11rb::errors::ConnectError) -> Self {
        X11Error::ConnectError(value)
    }
}

impl From<x11rb::errors::ConnectionError> for X11Error {
    fn from(value: x11rb::errors::ConnectionError) -> Self {
        X11Error::ConnectionError(value)
    }
}

impl From<x11rb::errors::ReplyError> for X11Error {
    fn from(value: x11rb::errors::ReplyError) -> Self {
        X11Error::ReplyError(value)
    }
}

impl From<x11rb::errors::ReplyOrIdError> for X11Error {
    fn from(value: x11rb::errors::ReplyOrIdError) -> Self {
        X11Error::ReplyOrIdError(value)
    }
}
