use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Events delivered to the UI thread. The control socket speaks their text form,
/// one per line: `progress <value>`, `animate <value> [seconds]`, `limit <value>`, `reload`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SetProgress(f64),
    AnimateProgress {
        progress: f64,
        duration: Option<Duration>,
    },
    SetLimit(f64),
    ConfigReload,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
    #[error("Unexpected argument: {0}")]
    Unexpected(String),
}

fn parse_number(arg: Option<&str>, name: &'static str) -> Result<f64, CommandError> {
    let arg = arg.ok_or(CommandError::MissingValue(name))?;
    arg.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber(arg.to_string()))
}

pub fn parse_duration(seconds: &str) -> Result<Duration, CommandError> {
    seconds
        .parse::<f64>()
        .ok()
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .ok_or_else(|| CommandError::InvalidDuration(seconds.to_string()))
}

impl FromStr for AppEvent {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(CommandError::Empty)?;

        let event = match command.to_ascii_lowercase().as_str() {
            "progress" => AppEvent::SetProgress(parse_number(words.next(), "progress")?),
            "animate" => AppEvent::AnimateProgress {
                progress: parse_number(words.next(), "animate")?,
                duration: words.next().map(parse_duration).transpose()?,
            },
            "limit" => AppEvent::SetLimit(parse_number(words.next(), "limit")?),
            "reload" => AppEvent::ConfigReload,
            _ => return Err(CommandError::Unknown(command.to_string())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Unexpected(extra.to_string())),
            None => Ok(event),
        }
    }
}

impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetProgress(progress) => write!(f, "progress {}", progress),
            Self::AnimateProgress {
                progress,
                duration: Some(duration),
            } => write!(f, "animate {} {}", progress, duration.as_secs_f64()),
            Self::AnimateProgress {
                progress,
                duration: None,
            } => write!(f, "animate {}", progress),
            Self::SetLimit(limit) => write!(f, "limit {}", limit),
            Self::ConfigReload => write!(f, "reload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("progress 0.4", AppEvent::SetProgress(0.4)),
            ("  PROGRESS   1.5 ", AppEvent::SetProgress(1.5)),
            (
                "animate 0.7",
                AppEvent::AnimateProgress {
                    progress: 0.7,
                    duration: None,
                },
            ),
            (
                "animate 0.7 1.5",
                AppEvent::AnimateProgress {
                    progress: 0.7,
                    duration: Some(Duration::from_millis(1500)),
                },
            ),
            ("limit -0.1", AppEvent::SetLimit(-0.1)),
            ("reload", AppEvent::ConfigReload),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<AppEvent>(), Ok(expected), "parsing {line:?}");
        }
    }

    #[test]
    fn test_command_errors() {
        let cases = vec![
            ("", CommandError::Empty),
            ("spin 3", CommandError::Unknown("spin".to_string())),
            ("progress", CommandError::MissingValue("progress")),
            ("progress abc", CommandError::InvalidNumber("abc".to_string())),
            ("progress NaN", CommandError::InvalidNumber("NaN".to_string())),
            ("animate 0.5 -1", CommandError::InvalidDuration("-1".to_string())),
            ("reload now", CommandError::Unexpected("now".to_string())),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<AppEvent>(), Err(expected), "parsing {line:?}");
        }
    }

    #[test]
    fn test_display_is_parseable() {
        let event = AppEvent::AnimateProgress {
            progress: 0.25,
            duration: Some(Duration::from_millis(750)),
        };
        assert_eq!(event.to_string(), "animate 0.25 0.75");
        assert_eq!(event.to_string().parse::<AppEvent>(), Ok(event));
    }
}
