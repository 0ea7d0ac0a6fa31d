// Plugin registration
// Collects the checker tree and commands, and validates them once at startup.

use std::collections::HashSet;

use thiserror::Error;

use crate::commands;
use crate::utils::config::PLUGIN_ID;
use crate::utils::schema::{welcomer_structure, Structure};
use crate::{Data, Error as CommandError};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("duplicate checker id `{0}`")]
    DuplicateChecker(String),
    #[error("duplicate command name `{0}`")]
    DuplicateCommand(String),
}

/// Everything the plugin contributes to the bot
pub struct Plugin {
    pub config_id: String,
    pub checker: Structure,
    pub commands: Vec<poise::Command<Data, CommandError>>,
}

fn find_duplicate<'a>(names: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut seen = HashSet::new();
    names.into_iter().find(|name| !seen.insert(*name)).map(str::to_string)
}

pub fn register() -> Result<Plugin, RegistrationError> {
    let checker = welcomer_structure();
    if let Some(id) = find_duplicate(checker.ids()) {
        return Err(RegistrationError::DuplicateChecker(id));
    }

    let commands = vec![commands::welcome::welcome(), commands::leave::leave()];
    if let Some(name) = find_duplicate(commands.iter().map(|c| c.name.as_str())) {
        return Err(RegistrationError::DuplicateCommand(name));
    }
    for command in &commands {
        if let Some(name) = find_duplicate(command.subcommands.iter().map(|c| c.name.as_str())) {
            return Err(RegistrationError::DuplicateCommand(format!("{} {}", command.name, name)));
        }
    }

    Ok(Plugin {
        config_id: format!("{}:config", PLUGIN_ID),
        checker,
        commands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register() {
        let plugin = register().unwrap();
        assert_eq!(plugin.config_id, "ese-welcomer:config");
        assert_eq!(plugin.checker.id(), "ese-welcomer:config");

        let names: Vec<&str> = plugin.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["welcome", "leave"]);
        for command in &plugin.commands {
            let subs: Vec<&str> = command.subcommands.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(subs, vec!["test", "reload"]);
        }
    }

    #[test]
    fn test_find_duplicate() {
        assert_eq!(find_duplicate(["a", "b", "c"]), None);
        assert_eq!(find_duplicate(["a", "b", "a"]), Some("a".to_string()));
    }
}
