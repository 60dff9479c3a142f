//! Command registry: the dispatch table mapping a Volatility plugin id to
//! the shape of its text output.
//!
//! Adding support for a new plugin is a one-entry change to `REGISTRY`;
//! the parser and renderer are entirely schema-driven and never branch on
//! command ids.

/// How many whitespace-delimited tokens one field consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    /// Exactly one token.
    Single,
    /// A fixed run of consecutive tokens, joined by single spaces
    /// (timestamps: "weekday month day" is a run of 3).
    Run(usize),
    /// All remaining tokens joined by single spaces. May be empty.
    /// Only valid as the last field of a layout.
    Rest,
}

impl FieldWidth {
    /// Tokens this field requires to be present for a line to parse.
    pub fn fixed_tokens(self) -> usize {
        match self {
            FieldWidth::Single => 1,
            FieldWidth::Run(n) => n,
            FieldWidth::Rest => 0,
        }
    }
}

/// One named field of a command's output layout.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: FieldWidth,
}

const fn single(name: &'static str) -> FieldSpec {
    FieldSpec { name, width: FieldWidth::Single }
}

const fn run(name: &'static str, tokens: usize) -> FieldSpec {
    FieldSpec { name, width: FieldWidth::Run(tokens) }
}

const fn rest(name: &'static str) -> FieldSpec {
    FieldSpec { name, width: FieldWidth::Rest }
}

/// The parsing contract for one supported command: lines with fewer than
/// `min_tokens` tokens are dropped, everything else maps positionally onto
/// `fields`.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Volatility plugin id, e.g. "linux.pslist.PsList".
    pub id: &'static str,
    /// Minimum token count for a line to yield a record. Always the sum of
    /// the fixed field widths; a trailing `Rest` field may come up empty.
    pub min_tokens: usize,
    pub fields: &'static [FieldSpec],
}

impl CommandSpec {
    /// Column names in layout order, shared by both render modes.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// All supported extraction commands.
pub static REGISTRY: &[CommandSpec] = &[
    CommandSpec {
        id: "banners.Banners",
        min_tokens: 1,
        fields: &[single("offset"), rest("banner")],
    },
    CommandSpec {
        id: "linux.pslist.PsList",
        min_tokens: 7,
        fields: &[
            single("pid"),
            single("tid"),
            single("ppid"),
            single("comm"),
            run("creation_time", 3),
            rest("file_output"),
        ],
    },
    CommandSpec {
        id: "linux.psaux.PsAux",
        min_tokens: 3,
        fields: &[single("pid"), single("ppid"), single("comm"), rest("args")],
    },
    CommandSpec {
        id: "linux.envars.Envars",
        min_tokens: 4,
        fields: &[
            single("pid"),
            single("ppid"),
            single("comm"),
            single("key"),
            rest("value"),
        ],
    },
    CommandSpec {
        id: "linux.ip.Addr",
        min_tokens: 9,
        fields: &[
            single("netns"),
            single("index"),
            single("interface"),
            single("mac"),
            single("promiscuous"),
            single("ip"),
            single("prefix"),
            single("scope"),
            single("state"),
        ],
    },
    CommandSpec {
        id: "linux.lsmod.Lsmod",
        min_tokens: 3,
        fields: &[single("offset"), single("name"), single("size")],
    },
    CommandSpec {
        id: "linux.bash.Bash",
        min_tokens: 5,
        fields: &[
            single("pid"),
            single("name"),
            run("command_time", 3),
            rest("command"),
        ],
    },
    CommandSpec {
        id: "linux.sockstat.Sockstat",
        min_tokens: 8,
        fields: &[
            single("pid"),
            single("family"),
            single("type"),
            single("proto"),
            single("source_addr"),
            single("source_port"),
            single("dest_addr"),
            single("dest_port"),
            rest("state"),
        ],
    },
    CommandSpec {
        id: "linux.mount.Mount",
        min_tokens: 3,
        fields: &[
            single("device"),
            single("mount_point"),
            single("fs_type"),
            rest("options"),
        ],
    },
];

/// Look up the spec for a command id. `None` means the command is not
/// supported; callers surface that to the user instead of aborting.
pub fn lookup(command_id: &str) -> Option<&'static CommandSpec> {
    REGISTRY.iter().find(|spec| spec.id == command_id)
}

/// Ids of all supported commands, in registry order.
pub fn supported_commands() -> Vec<&'static str> {
    REGISTRY.iter().map(|spec| spec.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_command() {
        let spec = lookup("linux.pslist.PsList").unwrap();
        assert_eq!(spec.min_tokens, 7);
        assert_eq!(spec.fields.len(), 6);
    }

    #[test]
    fn test_lookup_unknown_command() {
        assert!(lookup("windows.pslist.PsList").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_min_tokens_matches_fixed_widths() {
        for spec in REGISTRY {
            let fixed: usize = spec.fields.iter().map(|f| f.width.fixed_tokens()).sum();
            assert_eq!(
                spec.min_tokens, fixed,
                "{}: min_tokens {} != fixed width sum {}",
                spec.id, spec.min_tokens, fixed
            );
        }
    }

    #[test]
    fn test_rest_fields_are_last() {
        for spec in REGISTRY {
            for (i, field) in spec.fields.iter().enumerate() {
                if field.width == FieldWidth::Rest {
                    assert_eq!(i, spec.fields.len() - 1, "{}: Rest field not last", spec.id);
                }
            }
        }
    }

    #[test]
    fn test_field_names_unique_per_command() {
        for spec in REGISTRY {
            let mut names: Vec<&str> = spec.field_names().collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), spec.fields.len(), "{}: duplicate field name", spec.id);
        }
    }

    #[test]
    fn test_supported_commands_lists_registry() {
        let ids = supported_commands();
        assert!(ids.contains(&"banners.Banners"));
        assert!(ids.contains(&"linux.envars.Envars"));
        assert_eq!(ids.len(), REGISTRY.len());
    }
}
