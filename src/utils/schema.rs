// Config checker - declarative constraint tree for config.json

use serde_json::Value;

use crate::utils::config::PLUGIN_ID;

/// One node of the checker tree
#[derive(Debug, Clone)]
pub enum Structure {
    Object {
        id: String,
        children: Vec<Child>,
    },
    String {
        id: String,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Boolean {
        id: String,
    },
    Array {
        id: String,
        items: Box<Structure>,
    },
}

/// A keyed child of an object node
#[derive(Debug, Clone)]
pub struct Child {
    pub key: &'static str,
    pub optional: bool,
    pub checker: Structure,
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path into the config, e.g. `welcome.embed.title`
    pub path: String,
    pub checker_id: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        write!(f, "{} ({}): {}", path, self.checker_id, self.message)
    }
}

fn id(name: &str) -> String {
    format!("{}:{}", PLUGIN_ID, name)
}

impl Structure {
    pub fn object(name: &str, children: Vec<Child>) -> Self {
        Structure::Object { id: id(name), children }
    }

    pub fn string(name: &str, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Structure::String { id: id(name), min_length, max_length }
    }

    pub fn boolean(name: &str) -> Self {
        Structure::Boolean { id: id(name) }
    }

    pub fn array(name: &str, items: Structure) -> Self {
        Structure::Array { id: id(name), items: Box::new(items) }
    }

    pub fn id(&self) -> &str {
        match self {
            Structure::Object { id, .. }
            | Structure::String { id, .. }
            | Structure::Boolean { id }
            | Structure::Array { id, .. } => id,
        }
    }

    /// Every checker id in the tree, depth first
    pub fn ids(&self) -> Vec<&str> {
        let mut out = vec![self.id()];
        match self {
            Structure::Object { children, .. } => {
                for child in children {
                    out.extend(child.checker.ids());
                }
            }
            Structure::Array { items, .. } => out.extend(items.ids()),
            _ => {}
        }
        out
    }

    /// Validate a value, collecting every issue instead of stopping at the first
    pub fn check(&self, value: &Value) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        self.check_at("", value, &mut issues);
        issues
    }

    fn check_at(&self, path: &str, value: &Value, issues: &mut Vec<ValidationIssue>) {
        match self {
            Structure::Object { children, .. } => {
                let Some(map) = value.as_object() else {
                    issues.push(self.issue(path, "expected an object"));
                    return;
                };
                for child in children {
                    let child_path = if path.is_empty() {
                        child.key.to_string()
                    } else {
                        format!("{}.{}", path, child.key)
                    };
                    match map.get(child.key) {
                        Some(v) => child.checker.check_at(&child_path, v, issues),
                        None if child.optional => {}
                        None => issues.push(child.checker.issue(&child_path, "required field is missing")),
                    }
                }
            }
            Structure::String { min_length, max_length, .. } => {
                let Some(s) = value.as_str() else {
                    issues.push(self.issue(path, "expected a string"));
                    return;
                };
                let len = s.chars().count();
                if let Some(min) = min_length {
                    if len < *min {
                        issues.push(self.issue(path, format!("must be at least {} characters (got {})", min, len)));
                    }
                }
                if let Some(max) = max_length {
                    if len > *max {
                        issues.push(self.issue(path, format!("must be at most {} characters (got {})", max, len)));
                    }
                }
            }
            Structure::Boolean { .. } => {
                if !value.is_boolean() {
                    issues.push(self.issue(path, "expected a boolean"));
                }
            }
            Structure::Array { items, .. } => {
                let Some(list) = value.as_array() else {
                    issues.push(self.issue(path, "expected an array"));
                    return;
                };
                for (i, item) in list.iter().enumerate() {
                    items.check_at(&format!("{}[{}]", path, i), item, issues);
                }
            }
        }
    }

    fn issue(&self, path: &str, message: impl Into<String>) -> ValidationIssue {
        ValidationIssue {
            path: path.to_string(),
            checker_id: self.id().to_string(),
            message: message.into(),
        }
    }
}

fn required(key: &'static str, checker: Structure) -> Child {
    Child { key, optional: false, checker }
}

fn optional(key: &'static str, checker: Structure) -> Child {
    Child { key, optional: true, checker }
}

/// Shape shared by the welcome and leave sections
fn greeting_structure(section: &str) -> Structure {
    let name = |field: &str| format!("{}-{}", section, field);

    Structure::object(
        section,
        vec![
            required("channelId", Structure::string(&name("channel-id"), Some(15), None)),
            required("testTitle", Structure::string(&name("test-title"), None, Some(200))),
            required("messageContent", Structure::string(&name("content"), None, Some(2000))),
            required(
                "embed",
                Structure::object(
                    &name("embed"),
                    vec![
                        required(
                            "author",
                            Structure::object(
                                &name("author"),
                                vec![
                                    required("name", Structure::string(&name("author-name"), None, Some(256))),
                                    required("icon", Structure::string(&name("author-icon"), None, None)),
                                    required("url", Structure::string(&name("author-url"), None, None)),
                                ],
                            ),
                        ),
                        required("title", Structure::string(&name("title"), None, Some(256))),
                        required("description", Structure::string(&name("desc"), None, Some(4096))),
                        required("color", Structure::string(&name("color"), None, Some(7))),
                        required("thumbnail", Structure::string(&name("thumb"), None, None)),
                        required("image", Structure::string(&name("image"), None, None)),
                        required("footer", Structure::string(&name("footer"), None, Some(2048))),
                        required("timestamp", Structure::boolean(&name("timestamp"))),
                    ],
                ),
            ),
        ],
    )
}

/// Checker tree for the whole config file
pub fn welcomer_structure() -> Structure {
    Structure::object(
        "config",
        vec![
            required("welcome", greeting_structure("welcome")),
            optional("leave", greeting_structure("leave")),
            optional(
                "adminRoles",
                Structure::array("admin-roles", Structure::string("admin-role", Some(15), None)),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_section() -> Value {
        json!({
            "channelId": "123456789012345678",
            "testTitle": "Test: ",
            "messageContent": "Welcome {user} to {server}!",
            "embed": {
                "author": { "name": "{user}", "icon": "user-icon", "url": "" },
                "title": "Welcome!",
                "description": "Enjoy your stay, {user}",
                "color": "#ff8c00",
                "thumbnail": "user-icon",
                "image": "",
                "footer": "{server}",
                "timestamp": true
            }
        })
    }

    #[test]
    fn test_valid_config_has_no_issues() {
        let config = json!({ "welcome": valid_section(), "leave": valid_section() });
        assert!(welcomer_structure().check(&config).is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let mut section = valid_section();
        section.as_object_mut().unwrap().remove("testTitle");
        let issues = welcomer_structure().check(&json!({ "welcome": section }));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "welcome.testTitle");
        assert_eq!(issues[0].checker_id, "ese-welcomer:welcome-test-title");
    }

    #[test]
    fn test_length_constraints() {
        let mut section = valid_section();
        section["channelId"] = json!("1234");
        section["embed"]["color"] = json!("#ff8c00ff");
        section["embed"]["description"] = json!("x".repeat(4097));
        let issues = welcomer_structure().check(&json!({ "welcome": section }));

        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["welcome.channelId", "welcome.embed.description", "welcome.embed.color"]
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let mut section = valid_section();
        section["testTitle"] = json!("é".repeat(200));
        assert!(welcomer_structure().check(&json!({ "welcome": section })).is_empty());
    }

    #[test]
    fn test_wrong_types() {
        let mut section = valid_section();
        section["embed"]["timestamp"] = json!("yes");
        section["embed"]["author"] = json!("nobody");
        let issues = welcomer_structure().check(&json!({ "welcome": section }));

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path, "welcome.embed.author");
        assert_eq!(issues[0].message, "expected an object");
        assert_eq!(issues[1].path, "welcome.embed.timestamp");
        assert_eq!(issues[1].message, "expected a boolean");
    }

    #[test]
    fn test_leave_is_optional_but_checked() {
        let issues = welcomer_structure().check(&json!({ "welcome": valid_section(), "leave": {} }));
        assert!(issues.iter().all(|i| i.path.starts_with("leave.")));
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn test_admin_roles_items() {
        let config = json!({ "welcome": valid_section(), "adminRoles": ["123456789012345678", 5] });
        let issues = welcomer_structure().check(&config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "adminRoles[1]");
    }

    #[test]
    fn test_root_must_be_object() {
        let issues = welcomer_structure().check(&json!([]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].to_string(), "<root> (ese-welcomer:config): expected an object");
    }

    #[test]
    fn test_ids_are_unique() {
        let structure = welcomer_structure();
        let ids = structure.ids();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }
}
