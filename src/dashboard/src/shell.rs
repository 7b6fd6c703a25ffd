use std::str::FromStr;

use map_view::{LayerId, MapEvent, ScreenPoint};
use parkwatch_core::VesselQuery;
use snafu::{OptionExt, ResultExt};

use crate::error::{
    CommandError,
    command_error::{InvalidNumberSnafu, InvalidValueSnafu, MissingArgumentSnafu, UnknownSnafu},
};

/// One line of operator input.
///
/// ```text
/// move <x> <y> | leave | click <x> <y> | close [session] | layer <id> on|off
/// refresh | health | search [name=..] [type=..] [country=..] [max=..] | quit
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Map(MapEvent),
    Refresh,
    Health,
    Search(VesselQuery),
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let Some(command) = args.next() else {
            return UnknownSnafu { command: "" }.fail();
        };

        let command = match command {
            "move" => Command::Map(MapEvent::PointerMove(point("move", &mut args)?)),
            "leave" => Command::Map(MapEvent::PointerLeave),
            "click" => Command::Map(MapEvent::Click(point("click", &mut args)?)),
            "close" => match args.next() {
                Some(id) => Command::Map(MapEvent::PopupCloseButton(id.parse().ok().context(
                    InvalidValueSnafu {
                        argument: "session",
                        value: id,
                    },
                )?)),
                None => Command::Map(MapEvent::ClosePopup),
            },
            "layer" => {
                let id = args.next().context(MissingArgumentSnafu {
                    command: "layer",
                    argument: "id",
                })?;
                let layer: LayerId = id.parse().ok().context(InvalidValueSnafu {
                    argument: "id",
                    value: id,
                })?;
                let visible = match args.next() {
                    Some("on") => true,
                    Some("off") => false,
                    Some(v) => {
                        return InvalidValueSnafu {
                            argument: "visibility",
                            value: v,
                        }
                        .fail();
                    }
                    None => {
                        return MissingArgumentSnafu {
                            command: "layer",
                            argument: "visibility",
                        }
                        .fail();
                    }
                };
                Command::Map(MapEvent::SetLayerVisibility(layer, visible))
            }
            "refresh" => Command::Refresh,
            "health" => Command::Health,
            "search" => Command::Search(query(args)?),
            "quit" | "exit" => Command::Quit,
            other => return UnknownSnafu { command: other }.fail(),
        };

        Ok(command)
    }
}

fn point<'a>(
    command: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
) -> Result<ScreenPoint, CommandError> {
    let x = args.next().context(MissingArgumentSnafu {
        command,
        argument: "x",
    })?;
    let y = args.next().context(MissingArgumentSnafu {
        command,
        argument: "y",
    })?;

    Ok(ScreenPoint::new(number(x)?, number(y)?))
}

fn number(value: &str) -> Result<f64, CommandError> {
    value.parse().context(InvalidNumberSnafu { value })
}

fn query<'a>(args: impl Iterator<Item = &'a str>) -> Result<VesselQuery, CommandError> {
    let mut query = VesselQuery::default();

    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            return InvalidValueSnafu {
                argument: "search",
                value: arg,
            }
            .fail();
        };

        match key {
            "name" => query.name = Some(value.to_string()),
            "type" => query.vessel_type = Some(value.to_string()),
            "country" => query.country_iso = Some(value.to_string()),
            "max" => {
                query.max_results = Some(value.parse().ok().context(InvalidValueSnafu {
                    argument: "max",
                    value,
                })?)
            }
            _ => {
                return InvalidValueSnafu {
                    argument: "search",
                    value: arg,
                }
                .fail();
            }
        }
    }

    Ok(query)
}
