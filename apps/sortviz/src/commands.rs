//! Line commands accepted by `sortviz interactive`.

use shared::{error::CommandParseError, protocol::PlaybackCommand};

pub const HELP: &str = "\
commands:
  start | play          start or resume auto-play (restarts when finished)
  pause                 pause auto-play
  step | next           apply one step of a started or paused run
  reset                 stop and reload the current input
  speed <1-100>         set playback speed
  algo <name>           bubble, selection, insertion, quick, merge
  load [a, b, c]        load comma separated integers (random when empty)
  view                  print the current view
  quit                  exit
  {\"type\": ...}         any JSON encoded command";

/// One line may expand to several commands; `reset` also reloads the input.
pub fn parse_line(line: &str) -> Result<Vec<PlaybackCommand>, CommandParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandParseError::Empty);
    }
    if line.starts_with('{') {
        let command = serde_json::from_str(line)
            .map_err(|err| CommandParseError::Json(err.to_string()))?;
        return Ok(vec![command]);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let commands = match verb.to_ascii_lowercase().as_str() {
        "start" | "play" | "run" => vec![PlaybackCommand::Start],
        "pause" => vec![PlaybackCommand::Pause],
        "step" | "next" => vec![PlaybackCommand::Step],
        "reset" => vec![PlaybackCommand::Reset, PlaybackCommand::Reload],
        "view" => vec![PlaybackCommand::View],
        "speed" => {
            if rest.is_empty() {
                return Err(CommandParseError::MissingArgument { verb: "speed" });
            }
            let speed = rest
                .parse()
                .map_err(|_| CommandParseError::InvalidSpeed(rest.to_string()))?;
            vec![PlaybackCommand::SetSpeed { speed }]
        }
        "algo" | "algorithm" => {
            if rest.is_empty() {
                return Err(CommandParseError::MissingArgument { verb: "algo" });
            }
            vec![PlaybackCommand::SelectAlgorithm {
                method: rest.parse()?,
            }]
        }
        "load" => vec![PlaybackCommand::LoadInput {
            text: (!rest.is_empty()).then(|| rest.to_string()),
        }],
        "random" => vec![PlaybackCommand::LoadInput { text: None }],
        other => return Err(CommandParseError::UnknownVerb(other.to_string())),
    };
    Ok(commands)
}
