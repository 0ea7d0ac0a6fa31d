// Centralized configuration for ESE-Welcomer

/// Plugin identifier, used as prefix for every registered id
pub const PLUGIN_ID: &str = "ese-welcomer";

/// Default location of the plugin config file (relative to the working directory)
pub const DEFAULT_CONFIG_PATH: &str = "./plugins/ese-welcomer/config.json";

/// Default prefix for prefix commands
pub const DEFAULT_PREFIX: &str = "!";

/// Avatar size requested for the `user-icon` shortcut
pub const AVATAR_SIZE: u16 = 512;

/// Keyword resolving to the member's avatar in URL fields
pub const USER_ICON_KEYWORD: &str = "user-icon";

/// Template tokens
pub const USER_TOKEN: &str = "{user}";
pub const SERVER_TOKEN: &str = "{server}";

/// Discord embed colors
pub mod colors {
    pub const WELCOME: &str = "#ff8c00";
    pub const LEAVE: &str = "#ff0000";
}

/// Fallback embed titles
pub mod titles {
    pub const WELCOME: &str = "Welcome";
    pub const LEAVE: &str = "Goodbye";
}

/// Parse a `#rrggbb` color string into its numeric value
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8c00"), Some(0xff8c00));
        assert_eq!(parse_hex_color(" #FF0000 "), Some(0xff0000));
    }

    #[test]
    fn test_parse_invalid_color() {
        assert_eq!(parse_hex_color("ff8c00"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color(""), None);
    }
}
