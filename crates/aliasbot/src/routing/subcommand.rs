/// Actions the alias bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Help,
    Make,
    Delete,
    List,
    Status,
    Ranking,
    /// Anything else, including the empty subcommand.
    Unknown,
}

impl Subcommand {
    pub fn from_name(name: &str) -> Self {
        match name {
            "help" => Self::Help,
            "make" => Self::Make,
            "delete" => Self::Delete,
            "list" => Self::List,
            "status" => Self::Status,
            "ranking" => Self::Ranking,
            _ => Self::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Make => "make",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Status => "status",
            Self::Ranking => "ranking",
            Self::Unknown => "",
        }
    }

    /// Argument synopsis shown in help and usage replies.
    pub fn synopsis(self) -> &'static str {
        match self {
            Self::Make => r#""<key>" "<message>""#,
            Self::Delete => r#""<key>""#,
            Self::List => r#"["<page>"]"#,
            Self::Help | Self::Status | Self::Ranking | Self::Unknown => "",
        }
    }

    /// Inclusive range of accepted argument counts.
    pub fn arity(self) -> (usize, usize) {
        match self {
            Self::Make => (2, 2),
            Self::Delete => (1, 1),
            Self::List => (0, 1),
            Self::Help | Self::Status | Self::Ranking => (0, 0),
            Self::Unknown => (0, usize::MAX),
        }
    }

    pub fn accepts(self, arg_count: usize) -> bool {
        let (min, max) = self.arity();
        (min..=max).contains(&arg_count)
    }
}
