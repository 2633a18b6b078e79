use std::str::FromStr;

/// The simplification techniques, each named by a character in a [schedule](crate::config::schedule).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Technique {
    /// Unit propagation, `u`.
    Propagation,

    /// Pure literal elimination, `p`.
    Pure,

    /// Subsumption and self-subsuming resolution, `s`.
    Subsumption,

    /// Bounded variable elimination, `v`.
    Bve,

    /// Equivalence elimination, `e`.
    Equivalence,

    /// Hidden tautology elimination, `h`.
    Hte,

    /// Blocked clause elimination, `b`.
    Bce,

    /// Failed literal probing, `r`.
    Probing,

    /// Vivification, `a`.
    Vivification,

    /// Unhiding, `g`.
    Unhiding,
}

impl Technique {
    /// The technique named by `c`, if any.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'u' => Some(Self::Propagation),
            'p' => Some(Self::Pure),
            's' => Some(Self::Subsumption),
            'v' => Some(Self::Bve),
            'e' => Some(Self::Equivalence),
            'h' => Some(Self::Hte),
            'b' => Some(Self::Bce),
            'r' => Some(Self::Probing),
            'a' => Some(Self::Vivification),
            'g' => Some(Self::Unhiding),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Propagation => 'u',
            Self::Pure => 'p',
            Self::Subsumption => 's',
            Self::Bve => 'v',
            Self::Equivalence => 'e',
            Self::Hte => 'h',
            Self::Bce => 'b',
            Self::Probing => 'r',
            Self::Vivification => 'a',
            Self::Unhiding => 'g',
        }
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Propagation => write!(f, "UP"),
            Self::Pure => write!(f, "Pure"),
            Self::Subsumption => write!(f, "Subsumption"),
            Self::Bve => write!(f, "BVE"),
            Self::Equivalence => write!(f, "EE"),
            Self::Hte => write!(f, "HTE"),
            Self::Bce => write!(f, "BCE"),
            Self::Probing => write!(f, "Probing"),
            Self::Vivification => write!(f, "Vivification"),
            Self::Unhiding => write!(f, "Unhiding"),
        }
    }
}

impl FromStr for Technique {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or(()),
            _ => Err(()),
        }
    }
}
