use serde::Deserialize;

/// One control message per line from the external controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    /// Replace the active note set wholesale. An empty or missing
    /// frequency list is equivalent to `Stop`.
    Play {
        #[serde(default)]
        frequencies: Vec<f32>,
    },
    /// Silence everything.
    Stop,
}

impl Command {
    /// Parse a single protocol line.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_frequencies() {
        let command = Command::parse(r#"{"command": "play", "frequencies": [440.0, 523.25]}"#);
        match command.unwrap() {
            Command::Play { frequencies } => assert_eq!(frequencies, vec![440.0, 523.25]),
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn play_without_frequencies_defaults_to_empty() {
        let command = Command::parse(r#"{"command": "play"}"#);
        match command.unwrap() {
            Command::Play { frequencies } => assert!(frequencies.is_empty()),
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn parses_stop() {
        assert!(matches!(
            Command::parse(r#"{"command": "stop"}"#).unwrap(),
            Command::Stop
        ));
    }

    #[test]
    fn rejects_unknown_commands_and_garbage() {
        assert!(Command::parse(r#"{"command": "detonate"}"#).is_err());
        assert!(Command::parse("not json at all").is_err());
        assert!(Command::parse("").is_err());
    }
}
