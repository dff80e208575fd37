//! # Command Requests
//!
//! A [`CommandRequest`] is what a UI hands to the orchestrator: a [`CommandKind`]
//! plus a loose map of option name to [`OptionValue`]. Nothing in a request is
//! trusted. [`CommandRequest::resolve`] checks every entry against the command's
//! [`OptionSpec`] table, fills in defaults, and produces [`ResolvedOptions`],
//! which is the only thing plan construction reads.
//!
//! Keeping the map untyped at this boundary lets the CLI forward raw strings
//! (`--env foo`) and have the library reject them with
//! [`VtexDevError::InvalidOption`] before anything runs.

use crate::error::{Result, VtexDevError};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Init,
    Dev,
    Build,
    Deploy,
    Clean,
    Login,
    Link,
    Unlink,
    Status,
}

impl CommandKind {
    pub const ALL: [CommandKind; 9] = [
        CommandKind::Init,
        CommandKind::Dev,
        CommandKind::Build,
        CommandKind::Deploy,
        CommandKind::Clean,
        CommandKind::Login,
        CommandKind::Link,
        CommandKind::Unlink,
        CommandKind::Status,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Init => "init",
            CommandKind::Dev => "dev",
            CommandKind::Build => "build",
            CommandKind::Deploy => "deploy",
            CommandKind::Clean => "clean",
            CommandKind::Login => "login",
            CommandKind::Link => "link",
            CommandKind::Unlink => "unlink",
            CommandKind::Status => "status",
        }
    }

    /// The options this command accepts, with their defaults.
    pub fn option_specs(&self) -> &'static [OptionSpec] {
        match self {
            CommandKind::Init => &INIT_OPTIONS,
            CommandKind::Dev => &DEV_OPTIONS,
            CommandKind::Build => &BUILD_OPTIONS,
            CommandKind::Deploy => &DEPLOY_OPTIONS,
            CommandKind::Clean => &CLEAN_OPTIONS,
            CommandKind::Login => &LOGIN_OPTIONS,
            CommandKind::Link => &LINK_OPTIONS,
            CommandKind::Unlink => &UNLINK_OPTIONS,
            CommandKind::Status => &[],
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Boolean switch, false unless given.
    Flag,
    /// Free-form string with no default.
    Text,
    /// Like `Text`, but limited to lowercase letters, digits, `-` and `_`,
    /// starting with a letter or digit. Safe to embed in compose keys and
    /// build args.
    Name,
    /// One of a fixed set of strings.
    Choice {
        allowed: &'static [&'static str],
        default: &'static str,
    },
    /// TCP port number.
    Port { default: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Flag,
        }
    }

    const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Text,
        }
    }

    const fn name(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Name,
        }
    }

    const fn choice(
        name: &'static str,
        allowed: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            kind: OptionKind::Choice { allowed, default },
        }
    }

    const fn port(name: &'static str, default: u16) -> Self {
        Self {
            name,
            kind: OptionKind::Port { default },
        }
    }
}

pub const TEMPLATES: &[&str] = &["basic", "advanced"];
pub const ENVIRONMENTS: &[&str] = &["staging", "production"];
pub const DEFAULT_PORT: u16 = 3000;

static INIT_OPTIONS: [OptionSpec; 2] = [
    OptionSpec::choice("template", TEMPLATES, "basic"),
    OptionSpec::name("name"),
];
static DEV_OPTIONS: [OptionSpec; 2] = [
    OptionSpec::flag("detached"),
    OptionSpec::port("port", DEFAULT_PORT),
];
static BUILD_OPTIONS: [OptionSpec; 2] = [
    OptionSpec::choice("env", ENVIRONMENTS, "production"),
    OptionSpec::flag("no-cache"),
];
static DEPLOY_OPTIONS: [OptionSpec; 3] = [
    OptionSpec::choice("env", ENVIRONMENTS, "staging"),
    OptionSpec::text("workspace"),
    OptionSpec::flag("force"),
];
static CLEAN_OPTIONS: [OptionSpec; 2] = [OptionSpec::flag("all"), OptionSpec::flag("force")];
static LOGIN_OPTIONS: [OptionSpec; 1] = [OptionSpec::text("account")];
static LINK_OPTIONS: [OptionSpec; 1] = [OptionSpec::text("workspace")];
static UNLINK_OPTIONS: [OptionSpec; 1] = [OptionSpec::flag("all")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: CommandKind,
    pub options: BTreeMap<String, OptionValue>,
}

impl CommandRequest {
    pub fn new(command: CommandKind) -> Self {
        Self {
            command,
            options: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(name.to_string(), value.into());
        self
    }

    /// Sets `name` only when a value is present. Handy for optional CLI args.
    pub fn with_opt(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Validates every supplied option and fills in defaults.
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        let specs = self.command.option_specs();

        for name in self.options.keys() {
            if !specs.iter().any(|spec| spec.name == name) {
                return Err(VtexDevError::invalid_option(
                    self.command.name(),
                    name.as_str(),
                    "not a recognized option",
                ));
            }
        }

        let mut values = BTreeMap::new();
        for spec in specs {
            let given = self.options.get(spec.name);
            if let Some(value) = self.resolve_one(spec, given)? {
                values.insert(spec.name, value);
            }
        }

        Ok(ResolvedOptions {
            command: self.command,
            values,
        })
    }

    fn resolve_one(
        &self,
        spec: &OptionSpec,
        given: Option<&OptionValue>,
    ) -> Result<Option<Resolved>> {
        let invalid = |reason: String| {
            VtexDevError::invalid_option(self.command.name(), spec.name, reason)
        };

        let resolved = match (spec.kind, given) {
            (OptionKind::Flag, None) => Some(Resolved::Flag(false)),
            (OptionKind::Flag, Some(OptionValue::Bool(b))) => Some(Resolved::Flag(*b)),
            (OptionKind::Flag, Some(OptionValue::Str(s))) => {
                return Err(invalid(format!("is a flag and takes no value (got '{}')", s)))
            }

            (OptionKind::Text, None) => None,
            (OptionKind::Text, Some(OptionValue::Str(s))) => {
                if s.trim().is_empty() {
                    return Err(invalid("must not be empty".to_string()));
                }
                Some(Resolved::Text(s.clone()))
            }
            (OptionKind::Text | OptionKind::Name, Some(OptionValue::Bool(_))) => {
                return Err(invalid("expects a value".to_string()))
            }

            (OptionKind::Name, None) => None,
            (OptionKind::Name, Some(OptionValue::Str(s))) => {
                if !is_valid_name(s) {
                    return Err(invalid(format!(
                        "'{}' must use only lowercase letters, digits, '-' and '_' \
                         and start with a letter or digit",
                        s
                    )));
                }
                Some(Resolved::Text(s.clone()))
            }

            (OptionKind::Choice { default, .. }, None) => Some(Resolved::Text(default.to_string())),
            (OptionKind::Choice { allowed, .. }, Some(OptionValue::Str(s))) => {
                if !allowed.contains(&s.as_str()) {
                    return Err(invalid(format!(
                        "'{}' is not one of {}",
                        s,
                        allowed.join(", ")
                    )));
                }
                Some(Resolved::Text(s.clone()))
            }
            (OptionKind::Choice { allowed, .. }, Some(OptionValue::Bool(_))) => {
                return Err(invalid(format!("expects one of {}", allowed.join(", "))))
            }

            (OptionKind::Port { default }, None) => Some(Resolved::Port(default)),
            (OptionKind::Port { .. }, Some(OptionValue::Str(s))) => match s.parse::<u16>() {
                Ok(port) if port > 0 => Some(Resolved::Port(port)),
                _ => return Err(invalid(format!("'{}' is not a valid port", s))),
            },
            (OptionKind::Port { .. }, Some(OptionValue::Bool(_))) => {
                return Err(invalid("expects a port number".to_string()))
            }
        };

        Ok(resolved)
    }
}

/// Whether `name` is usable as a project name (see [`OptionKind::Name`]).
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    starts_ok
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Flag(bool),
    Text(String),
    Port(u16),
}

/// Validated options for one command. Every `Flag`, `Choice` and `Port` option
/// is present; `Text` options are present only when supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    command: CommandKind,
    values: BTreeMap<&'static str, Resolved>,
}

impl ResolvedOptions {
    pub fn command(&self) -> CommandKind {
        self.command
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Resolved::Flag(true)))
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Resolved::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn port(&self, name: &str) -> Option<u16> {
        match self.values.get(name) {
            Some(Resolved::Port(p)) => Some(*p),
            _ => None,
        }
    }
}
