use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Schedule { json, .. }
        | Commands::Quote { json, .. }
        | Commands::Check { json, .. }
        | Commands::Statement { json, .. }
        | Commands::Show { json, .. }
        | Commands::Account { json, .. }
        | Commands::Health { json } => *json,
    };
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_selects_json_for_every_command() {
        let invocations: [&[&str]; 7] = [
            &["transferencias", "schedule", "--json"],
            &["transferencias", "quote", "--amount", "1", "--date", "2026-10-19", "--json"],
            &["transferencias", "check", "--json"],
            &["transferencias", "statement", "--json"],
            &["transferencias", "show", "1", "--json"],
            &["transferencias", "account", "1234567890", "--json"],
            &["transferencias", "health", "--json"],
        ];
        for args in invocations {
            let parsed = parse_from(args.iter().copied());
            assert!(parsed.is_ok(), "{args:?}");
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn text_is_the_default() {
        let parsed = parse_from(["transferencias", "statement", "--csv"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
