//! Session identity and environment: user, device, working directory and
//! the `HOME`-style environment values commands read and write.

use crate::confirm::InputMode;
use std::collections::HashMap;

pub const DEFAULT_MOTD: &str = "Welcome to termish!\nType `help` to list the available commands.";

/// Settings a host chooses when it opens a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user: String,
    pub device: String,
    pub cwd: String,
    /// Directory under which each user's home lives
    pub home_root: String,
    pub motd: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            device: "termish".to_string(),
            cwd: "~".to_string(),
            home_root: "/home".to_string(),
            motd: DEFAULT_MOTD.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterpreterContext {
    pub user: String,
    pub device: String,
    pub cwd: String,
    pub env: HashMap<String, String>,
    /// Whether executed lines are echoed to the log as `> line`
    pub echo: bool,
    pub input_mode: InputMode,
    pub can_type: bool,
    pub motd: String,
    home_root: String,
}

impl InterpreterContext {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut context = Self {
            user: String::new(),
            device: config.device,
            cwd: config.cwd,
            env: HashMap::new(),
            echo: true,
            input_mode: InputMode::Command,
            can_type: true,
            motd: config.motd,
            home_root: config.home_root,
        };
        context.set_user(config.user);
        context
    }

    /// Change the user name and point `HOME` at their home directory
    pub fn set_user(&mut self, user: impl Into<String>) {
        self.user = user.into();
        let home = format!("{}/{}", self.home_root.trim_end_matches('/'), self.user);
        self.env.insert("HOME".to_string(), home);
    }

    #[must_use]
    pub fn home(&self) -> &str {
        self.env.get("HOME").map_or("/", String::as_str)
    }

    /// Resolve `target` against the working directory and move there
    pub fn change_dir(&mut self, target: Option<&str>) -> &str {
        self.cwd = match target {
            Some(target) => resolve_path(&self.cwd, self.home(), target),
            None => "~".to_string(),
        };
        &self.cwd
    }

    /// `user@device:cwd$ `
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.user, self.device, self.cwd)
    }
}

/// Resolve `target` relative to `cwd`, handling `.`, `..` and `~`. Paths
/// inside `home` come back in their `~` form.
#[must_use]
pub fn resolve_path(cwd: &str, home: &str, target: &str) -> String {
    let expand = |path: &str| -> String {
        if path == "~" {
            home.to_string()
        } else if let Some(rest) = path.strip_prefix("~/") {
            format!("{home}/{rest}")
        } else {
            path.to_string()
        }
    };

    let target = expand(target);
    let joined = if target.starts_with('/') {
        target
    } else {
        format!("{}/{target}", expand(cwd))
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }
    let absolute = format!("/{}", segments.join("/"));

    let home = home.trim_end_matches('/');
    if absolute == home {
        "~".to_string()
    } else if let Some(rest) = absolute.strip_prefix(home).filter(|rest| rest.starts_with('/')) {
        format!("~{rest}")
    } else {
        absolute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "/home/user";

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve_path("~", HOME, "docs"), "~/docs");
        assert_eq!(resolve_path("~/docs", HOME, ".."), "~");
        assert_eq!(resolve_path("~", HOME, ".."), "/home");
        assert_eq!(resolve_path("~", HOME, "../.."), "/");
        assert_eq!(resolve_path("/", HOME, ".."), "/");
        assert_eq!(resolve_path("~/a", HOME, "./b/../c"), "~/a/c");
    }

    #[test]
    fn test_resolve_absolute_and_home() {
        assert_eq!(resolve_path("~/docs", HOME, "/etc"), "/etc");
        assert_eq!(resolve_path("/etc", HOME, "~"), "~");
        assert_eq!(resolve_path("/etc", HOME, "~/src"), "~/src");
        assert_eq!(resolve_path("/etc", HOME, "/home/user/x"), "~/x");
        assert_eq!(resolve_path("/etc", HOME, "/home/username"), "/home/username");
    }

    #[test]
    fn test_set_user_updates_home() {
        let mut context = InterpreterContext::new(SessionConfig::default());
        assert_eq!(context.home(), "/home/user");

        context.set_user("ammon");
        assert_eq!(context.user, "ammon");
        assert_eq!(context.home(), "/home/ammon");
    }

    #[test]
    fn test_change_dir_and_prompt() {
        let mut context = InterpreterContext::new(SessionConfig::default());
        assert_eq!(context.change_dir(Some("projects")), "~/projects");
        assert_eq!(context.prompt(), "user@termish:~/projects$ ");
        assert_eq!(context.change_dir(None), "~");
    }
}
