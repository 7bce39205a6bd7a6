//! Line-oriented console commands.

/// Usage line for `add`.
pub const ADD_USAGE: &str =
    "Usage: add <address> or add <address>;<parking_spaces>;<monthly_rent>";
/// Usage line for `get`.
pub const GET_USAGE: &str = "Usage: get <id>";
/// Usage line for `search`.
pub const SEARCH_USAGE: &str = "Usage: search <query>";
/// Usage line for `update`.
pub const UPDATE_USAGE: &str = "Usage: update <id> <new_address> [parking_spaces monthly_rent]";
/// Usage line for `delete`.
pub const DELETE_USAGE: &str = "Usage: delete <id>";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Free-text building description, parsed later.
    Add(String),
    /// Print every stored building.
    List,
    /// Show the building with this id.
    Get(String),
    /// Find buildings whose address contains the query.
    Search(String),
    /// Replace the address and optionally the parking of a stored building.
    Update {
        id: String,
        address: String,
        parking: Option<(i32, f64)>,
    },
    /// Remove the building with this id.
    Delete(String),
    /// List buildings on Tverskaya street with their parking revenue.
    Tverskaya,
    /// Print the command reference.
    Help,
    /// End the session.
    Exit,
    /// A known command missing its arguments.
    Usage(&'static str),
    /// Anything not recognised.
    Unknown,
}

impl Command {
    /// Parse a single input line.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(head, tail)| (head, tail.trim()));

        match word {
            "list" if rest.is_empty() => Self::List,
            "tverskaya" if rest.is_empty() => Self::Tverskaya,
            "help" if rest.is_empty() => Self::Help,
            "exit" if rest.is_empty() => Self::Exit,
            "add" => with_argument(rest, ADD_USAGE, Self::Add),
            "get" => with_argument(rest, GET_USAGE, Self::Get),
            "search" => with_argument(rest, SEARCH_USAGE, Self::Search),
            "delete" => with_argument(rest, DELETE_USAGE, Self::Delete),
            "update" => parse_update(rest),
            _ => Self::Unknown,
        }
    }
}

fn with_argument(rest: &str, usage: &'static str, build: fn(String) -> Command) -> Command {
    if rest.is_empty() {
        Command::Usage(usage)
    } else {
        build(rest.to_owned())
    }
}

fn parse_update(rest: &str) -> Command {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let Some((id, tail)) = tokens.split_first() else {
        return Command::Usage(UPDATE_USAGE);
    };

    let (address_tokens, parking) = match tail {
        [address @ .., raw_spaces, raw_rent] if !address.is_empty() => {
            match (raw_spaces.parse::<i32>(), raw_rent.parse::<f64>()) {
                (Ok(spaces), Ok(rent)) => (address, Some((spaces, rent))),
                _ => (tail, None),
            }
        }
        _ => (tail, None),
    };

    if address_tokens.is_empty() {
        return Command::Usage(UPDATE_USAGE);
    }
    Command::Update {
        id: (*id).to_owned(),
        address: address_tokens.join(" "),
        parking,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("list", Command::List)]
    #[case("  exit  ", Command::Exit)]
    #[case("help", Command::Help)]
    #[case("tverskaya", Command::Tverskaya)]
    #[case("get abc", Command::Get("abc".to_owned()))]
    #[case("delete abc", Command::Delete("abc".to_owned()))]
    #[case("search тверская", Command::Search("тверская".to_owned()))]
    #[case(
        "add \"Тверская ул., 25\";100;5000.0",
        Command::Add("\"Тверская ул., 25\";100;5000.0".to_owned())
    )]
    #[case("get", Command::Usage(GET_USAGE))]
    #[case("add   ", Command::Usage(ADD_USAGE))]
    #[case("list all", Command::Unknown)]
    #[case("remove abc", Command::Unknown)]
    #[case("", Command::Unknown)]
    fn parses_simple_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line), expected);
    }

    #[rstest]
    fn update_keeps_spaces_in_the_address() {
        assert_eq!(
            Command::parse("update abc123 \"Новый адрес, 10\""),
            Command::Update {
                id: "abc123".to_owned(),
                address: "\"Новый адрес, 10\"".to_owned(),
                parking: None,
            }
        );
    }

    #[rstest]
    fn update_takes_a_trailing_numeric_pair_as_parking() {
        assert_eq!(
            Command::parse("update abc123 Новый адрес, 10 120 6000.0"),
            Command::Update {
                id: "abc123".to_owned(),
                address: "Новый адрес, 10".to_owned(),
                parking: Some((120, 6000.0)),
            }
        );
    }

    #[rstest]
    #[case("update abc 120 6000.0", "120 6000.0")]
    #[case("update abc Арбат 12 x", "Арбат 12 x")]
    fn numbers_stay_in_the_address_unless_they_form_a_parking_pair(
        #[case] line: &str,
        #[case] address: &str,
    ) {
        assert_eq!(
            Command::parse(line),
            Command::Update {
                id: "abc".to_owned(),
                address: address.to_owned(),
                parking: None,
            }
        );
    }

    #[rstest]
    #[case("update")]
    #[case("update abc")]
    fn update_needs_an_id_and_address(#[case] line: &str) {
        assert_eq!(Command::parse(line), Command::Usage(UPDATE_USAGE));
    }
}
