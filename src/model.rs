use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EntryKind {
    #[default]
    Application,
    Link,
    Directory,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Application, EntryKind::Link, EntryKind::Directory];

    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Application => "Application",
            EntryKind::Link => "Link",
            EntryKind::Directory => "Directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| format!("unknown entry type '{s}'"))
    }
}

/// Field code appended to `Exec`, substituted by the launcher at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExecParam {
    #[default]
    None,
    #[serde(rename = "%f")]
    File,
    #[serde(rename = "%F")]
    Files,
    #[serde(rename = "%u")]
    Url,
    #[serde(rename = "%U")]
    Urls,
    #[serde(rename = "%i")]
    Icon,
    #[serde(rename = "%c")]
    Name,
    #[serde(rename = "%k")]
    Location,
}

impl ExecParam {
    /// Tokens in the order they are looked for when reading an `Exec` value.
    pub const PRIORITY: [ExecParam; 7] = [
        ExecParam::File,
        ExecParam::Files,
        ExecParam::Url,
        ExecParam::Urls,
        ExecParam::Icon,
        ExecParam::Name,
        ExecParam::Location,
    ];

    pub fn token(self) -> Option<&'static str> {
        match self {
            ExecParam::None => None,
            ExecParam::File => Some("%f"),
            ExecParam::Files => Some("%F"),
            ExecParam::Url => Some("%u"),
            ExecParam::Urls => Some("%U"),
            ExecParam::Icon => Some("%i"),
            ExecParam::Name => Some("%c"),
            ExecParam::Location => Some("%k"),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExecParam::None => "No parameter",
            ExecParam::File => "Single file path",
            ExecParam::Files => "Multiple file paths",
            ExecParam::Url => "Single URL",
            ExecParam::Urls => "Multiple URLs",
            ExecParam::Icon => "Icon option",
            ExecParam::Name => "Name field",
            ExecParam::Location => "Desktop file path",
        }
    }
}

impl fmt::Display for ExecParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token().unwrap_or("None"))
    }
}

impl FromStr for ExecParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "None" {
            return Ok(ExecParam::None);
        }
        ExecParam::PRIORITY
            .into_iter()
            .find(|param| param.token() == Some(s))
            .ok_or_else(|| format!("unknown exec parameter '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DesktopEntryRecord {
    pub name: String,
    pub generic_name: String,
    pub comment: String,
    pub kind: EntryKind,
    pub exec: String,
    pub exec_param: ExecParam,
    pub icon: String,
    pub startup_wm_class: String,
    pub categories: String,
    pub terminal: bool,
    pub no_display: bool,
}

/// Free-text fields of [`DesktopEntryRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    GenericName,
    Comment,
    Exec,
    Icon,
    StartupWmClass,
    Categories,
}

impl TextField {
    pub const ALL: [TextField; 7] = [
        TextField::Name,
        TextField::GenericName,
        TextField::Comment,
        TextField::Exec,
        TextField::Icon,
        TextField::StartupWmClass,
        TextField::Categories,
    ];

    /// Key used for this field in the `[Desktop Entry]` group.
    pub fn key(self) -> &'static str {
        match self {
            TextField::Name => "Name",
            TextField::GenericName => "GenericName",
            TextField::Comment => "Comment",
            TextField::Exec => "Exec",
            TextField::Icon => "Icon",
            TextField::StartupWmClass => "StartupWMClass",
            TextField::Categories => "Categories",
        }
    }
}

impl FromStr for TextField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextField::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

impl DesktopEntryRecord {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::GenericName => &self.generic_name,
            TextField::Comment => &self.comment,
            TextField::Exec => &self.exec,
            TextField::Icon => &self.icon,
            TextField::StartupWmClass => &self.startup_wm_class,
            TextField::Categories => &self.categories,
        }
    }

    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::GenericName => &mut self.generic_name,
            TextField::Comment => &mut self.comment,
            TextField::Exec => &mut self.exec,
            TextField::Icon => &mut self.icon,
            TextField::StartupWmClass => &mut self.startup_wm_class,
            TextField::Categories => &mut self.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_param_labels() {
        assert_eq!("%U".parse::<ExecParam>(), Ok(ExecParam::Urls));
        assert_eq!("None".parse::<ExecParam>(), Ok(ExecParam::None));
        assert!("%x".parse::<ExecParam>().is_err());
        assert_eq!(ExecParam::Location.to_string(), "%k");
        assert_eq!(ExecParam::None.to_string(), "None");
    }

    #[test]
    fn entry_kind_labels_are_exact() {
        assert_eq!("Link".parse::<EntryKind>(), Ok(EntryKind::Link));
        assert!("link".parse::<EntryKind>().is_err());
        assert_eq!(EntryKind::default(), EntryKind::Application);
    }

    #[test]
    fn text_field_from_key() {
        assert_eq!("startupwmclass".parse::<TextField>(), Ok(TextField::StartupWmClass));
        assert_eq!("GenericName".parse::<TextField>(), Ok(TextField::GenericName));
        assert!("Terminal".parse::<TextField>().is_err());
    }
}
