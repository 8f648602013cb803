// src/schema.rs

//! The declarative argument schema. A command owns an ordered list of
//! [`ArgumentSpec`] nodes; each node may own named branches that activate a
//! sub-schema when the node's raw token equals the branch token. The whole
//! structure is pure data, consumed by the parser.

/// One axis of a position triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// The closed set of argument kinds, each carrying its own constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentKind {
    /// Token must be one of `allowed_values`.
    Literal { allowed_values: Vec<String> },
    /// Free text, optionally bounded in length (inclusive).
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    /// A numeric literal with optional inclusive bounds. When `allow_float`
    /// is false the value must be integral.
    Number {
        min: Option<f64>,
        max: Option<f64>,
        allow_float: bool,
    },
    /// Exactly `true` or `false`.
    Boolean,
    /// An online actor, resolved through the host directory. When
    /// `allow_self` is false the invoker may not target themselves.
    Player { allow_self: bool },
    /// A duration string, stored as milliseconds.
    Time,
    /// One component of a position, optionally accepting `~` offsets
    /// relative to the invoker's coordinate on that axis.
    PositionAxis { axis: Axis, allow_relative: bool },
}

/// A conditional sub-schema, active only when the owning spec's raw token
/// equals `token`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub token: String,
    pub children: Vec<ArgumentSpec>,
}

/// One schema node describing a single positional argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    pub name: String,
    pub kind: ArgumentKind,
    pub required: bool,
    /// Branches only ever match when the owning spec's value space is
    /// enumerable against a known token (literals in practice); a branch on
    /// any other kind is legal but inert.
    pub branches: Vec<Branch>,
}

impl ArgumentSpec {
    fn new(name: &str, kind: ArgumentKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
            branches: Vec::new(),
        }
    }

    /// A literal argument: the token must be one of `values`.
    pub fn literal(name: &str, required: bool, values: &[&str]) -> Self {
        Self::new(
            name,
            ArgumentKind::Literal {
                allowed_values: values.iter().map(|v| v.to_string()).collect(),
            },
            required,
        )
    }

    /// A free-text argument with optional inclusive length bounds.
    pub fn string(
        name: &str,
        required: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::String {
                min_length,
                max_length,
            },
            required,
        )
    }

    /// A numeric argument with optional inclusive bounds.
    pub fn number(
        name: &str,
        required: bool,
        min: Option<f64>,
        max: Option<f64>,
        allow_float: bool,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::Number {
                min,
                max,
                allow_float,
            },
            required,
        )
    }

    /// A boolean argument accepting exactly `true` or `false`.
    pub fn boolean(name: &str, required: bool) -> Self {
        Self::new(name, ArgumentKind::Boolean, required)
    }

    /// A player argument resolved against the online actor directory.
    pub fn player(name: &str, required: bool, allow_self: bool) -> Self {
        Self::new(name, ArgumentKind::Player { allow_self }, required)
    }

    /// A duration argument ("1d 2h", "30s", plain milliseconds).
    pub fn time(name: &str, required: bool) -> Self {
        Self::new(name, ArgumentKind::Time, required)
    }

    /// A position argument. Expands to three independent axis specs named
    /// `{name}X`, `{name}Y`, `{name}Z` sharing `required` and
    /// `allow_relative`; retrieve the triple with
    /// [`CommandInteraction::get_position`](crate::value::CommandInteraction::get_position).
    pub fn position(name: &str, required: bool, allow_relative: bool) -> [Self; 3] {
        [Axis::X, Axis::Y, Axis::Z].map(|axis| {
            Self::new(
                &format!("{}{}", name, axis.suffix()),
                ArgumentKind::PositionAxis {
                    axis,
                    allow_relative,
                },
                required,
            )
        })
    }

    /// Attaches a conditional sub-schema, active when this spec's raw token
    /// equals `token`.
    #[must_use]
    pub fn branch(mut self, token: &str, children: Vec<Self>) -> Self {
        self.branches.push(Branch {
            token: token.to_string(),
            children,
        });
        self
    }

    /// The child list for a raw token, if a matching branch exists.
    pub fn children_for(&self, raw_token: &str) -> Option<&[Self]> {
        self.branches
            .iter()
            .find(|b| b.token == raw_token)
            .map(|b| b.children.as_slice())
    }
}

// MARK: --- UNIT TESTS ---
