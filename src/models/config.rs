// Welcomer config model
// Matches the plugin's config.json structure

use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::config::{colors, titles};

/// Which greeting a command, event or builder is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingKind {
    Welcome,
    Leave,
}

impl GreetingKind {
    /// Command name and log label
    pub fn name(self) -> &'static str {
        match self {
            GreetingKind::Welcome => "welcome",
            GreetingKind::Leave => "leave",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            GreetingKind::Welcome => titles::WELCOME,
            GreetingKind::Leave => titles::LEAVE,
        }
    }

    pub fn default_color(self) -> &'static str {
        match self {
            GreetingKind::Welcome => colors::WELCOME,
            GreetingKind::Leave => colors::LEAVE,
        }
    }

    /// The config section for this kind; `None` when missing or left completely empty
    pub fn section(self, config: &WelcomerConfig) -> Option<&GreetingConfig> {
        let section = match self {
            GreetingKind::Welcome => Some(&config.welcome),
            GreetingKind::Leave => config.leave.as_ref(),
        };
        section.filter(|s| !s.is_empty())
    }
}

/// Whole plugin configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WelcomerConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub welcome: GreetingConfig,
    /// Leave messages are only sent when this section exists
    #[serde(default, deserialize_with = "lenient")]
    pub leave: Option<GreetingConfig>,
    /// Role IDs that grant the `admin` capability
    #[serde(rename = "adminRoles", default, deserialize_with = "lenient")]
    pub admin_roles: Vec<String>,
}

/// One greeting (welcome or leave)
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GreetingConfig {
    #[serde(rename = "channelId", default, deserialize_with = "lenient")]
    pub channel_id: String,
    #[serde(rename = "testTitle", default, deserialize_with = "lenient")]
    pub test_title: String,
    #[serde(rename = "messageContent", default, deserialize_with = "lenient")]
    pub message_content: String,
    #[serde(default, deserialize_with = "lenient")]
    pub embed: EmbedConfig,
}

impl GreetingConfig {
    pub fn is_empty(&self) -> bool {
        *self == GreetingConfig::default()
    }
}

/// Embed appearance
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct EmbedConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub footer: String,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "lenient")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub author: AuthorConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AuthorConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient")]
    pub url: String,
}

/// Malformed values become the type's default instead of failing the whole file.
/// The schema checker reports them separately.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_section() {
        let config: WelcomerConfig = serde_json::from_value(json!({
            "welcome": {
                "channelId": "123456789012345678",
                "testTitle": "Hi ",
                "messageContent": "there {user}",
                "embed": {
                    "color": "#00ff00",
                    "title": "Welcome to {server}",
                    "description": "",
                    "footer": "",
                    "thumbnail": "user-icon",
                    "image": "",
                    "timestamp": true,
                    "author": { "name": "{user}", "icon": "", "url": "" }
                }
            }
        }))
        .unwrap();

        assert_eq!(config.welcome.channel_id, "123456789012345678");
        assert_eq!(config.welcome.embed.color, "#00ff00");
        assert!(config.welcome.embed.timestamp);
        assert_eq!(config.welcome.embed.author.name, "{user}");
        assert!(config.leave.is_none());
        assert!(config.admin_roles.is_empty());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let config: WelcomerConfig =
            serde_json::from_value(json!({ "welcome": { "embed": {} } })).unwrap();
        assert_eq!(config.welcome, GreetingConfig::default());
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let config: WelcomerConfig = serde_json::from_value(json!({
            "welcome": {
                "channelId": 42,
                "messageContent": "hello",
                "embed": { "timestamp": "yes", "author": "nobody" }
            },
            "leave": { "testTitle": "Bye" }
        }))
        .unwrap();

        assert_eq!(config.welcome.channel_id, "");
        assert_eq!(config.welcome.message_content, "hello");
        assert!(!config.welcome.embed.timestamp);
        assert_eq!(config.welcome.embed.author, AuthorConfig::default());
        assert_eq!(config.leave.unwrap().test_title, "Bye");
    }

    #[test]
    fn test_section_by_kind() {
        let mut config = WelcomerConfig::default();
        assert!(GreetingKind::Welcome.section(&config).is_none());
        assert!(GreetingKind::Leave.section(&config).is_none());

        config.welcome.message_content = "hi".to_string();
        assert!(GreetingKind::Welcome.section(&config).is_some());

        config.leave = Some(GreetingConfig::default());
        assert!(GreetingKind::Leave.section(&config).is_none());

        config.leave = Some(GreetingConfig { test_title: "Bye".to_string(), ..Default::default() });
        assert!(GreetingKind::Leave.section(&config).is_some());
    }
}
