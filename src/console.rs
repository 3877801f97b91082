use crate::control_system::Command;
use crate::data_structures::Direction;
use crate::error::CommandError;

pub const HELP: &str = "\
Commands:
  toggle                      start or stop the simulation
  start | stop                start or stop explicitly
  reset                       stop and return to north/green, all lights red
  green <direction> <secs>    set green duration for north|east|south|west
  green all <secs>            set one green duration for every direction
  status                      print the current state as JSON
  help                        show this list
  quit                        exit";

/// What the operator asked for on one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    Send(Command),
    Status,
    Help,
    Quit,
    Nothing,
}

pub fn parse_console_line(line: &str) -> Result<ConsoleAction, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ConsoleAction::Nothing);
    };
    let action = match verb.to_ascii_lowercase().as_str() {
        "toggle" | "t" => ConsoleAction::Send(Command::Toggle),
        "start" => ConsoleAction::Send(Command::Start),
        "stop" => ConsoleAction::Send(Command::Stop),
        "reset" => ConsoleAction::Send(Command::Reset),
        "status" | "s" => ConsoleAction::Status,
        "help" | "h" | "?" => ConsoleAction::Help,
        "quit" | "exit" | "q" => ConsoleAction::Quit,
        "green" | "g" => {
            let target = words.next().ok_or(CommandError::MissingArgument("direction"))?;
            // Seconds are passed through raw, the store normalizes bad input.
            let seconds = words.next().ok_or(CommandError::MissingArgument("seconds"))?;
            if target.eq_ignore_ascii_case("all") {
                ConsoleAction::Send(Command::SetAllGreenDurations(seconds.to_string()))
            } else {
                let direction: Direction = target.parse()?;
                ConsoleAction::Send(Command::SetGreenDuration(direction, seconds.to_string()))
            }
        }
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(action)
}
