use std::{convert::TryFrom, fmt, str::FromStr};

use crate::browser_errors::BrowserError;

/// Ranking used to select the stars listed in one star browser branch.
///
/// The catalog performs the ranking; the tree builder only preserves the order
/// it receives.
///
/// Conversions
/// -----------
/// * [`TryFrom<i32>`] from the stable integer code (`0..=3`).
/// * [`FromStr`] from the kebab-case names `"nearest"`, `"brighter"`,
///   `"brightest"` and `"with-planets"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StarBrowserKind {
    /// Closest stars to the observer
    Nearest = 0,
    /// Brightest stars by apparent magnitude seen from the observer
    Brighter = 1,
    /// Brightest stars by absolute magnitude
    Brightest = 2,
    /// Closest stars known to host planets
    WithPlanets = 3,
}

impl StarBrowserKind {
    pub const ALL: [StarBrowserKind; 4] = [
        StarBrowserKind::Nearest,
        StarBrowserKind::Brighter,
        StarBrowserKind::Brightest,
        StarBrowserKind::WithPlanets,
    ];

    /// Whether the ranking depends on the observer position.
    ///
    /// Only the absolute magnitude ranking is independent of the viewpoint.
    pub fn needs_context(self) -> bool {
        !matches!(self, StarBrowserKind::Brightest)
    }
}

impl TryFrom<i32> for StarBrowserKind {
    type Error = BrowserError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use StarBrowserKind::*;
        match value {
            0 => Ok(Nearest),
            1 => Ok(Brighter),
            2 => Ok(Brightest),
            3 => Ok(WithPlanets),
            _ => Err(BrowserError::InvalidStarBrowserKind(value.to_string())),
        }
    }
}

impl FromStr for StarBrowserKind {
    type Err = BrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use StarBrowserKind::*;
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Nearest),
            "brighter" => Ok(Brighter),
            "brightest" => Ok(Brightest),
            "with-planets" | "with_planets" => Ok(WithPlanets),
            _ => Err(BrowserError::InvalidStarBrowserKind(s.to_string())),
        }
    }
}

impl fmt::Display for StarBrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StarBrowserKind::Nearest => "nearest",
            StarBrowserKind::Brighter => "brighter",
            StarBrowserKind::Brightest => "brightest",
            StarBrowserKind::WithPlanets => "with-planets",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod test_star_browser_kind {
    use super::*;

    #[test]
    fn test_from_i32() {
        for kind in StarBrowserKind::ALL {
            assert_eq!(StarBrowserKind::try_from(kind as i32), Ok(kind));
        }
        assert_eq!(StarBrowserKind::try_from(0), Ok(StarBrowserKind::Nearest));
        assert_eq!(StarBrowserKind::try_from(1), Ok(StarBrowserKind::Brighter));
        assert_eq!(StarBrowserKind::try_from(2), Ok(StarBrowserKind::Brightest));
        assert_eq!(
            StarBrowserKind::try_from(3),
            Ok(StarBrowserKind::WithPlanets)
        );
        assert_eq!(
            StarBrowserKind::try_from(4),
            Err(BrowserError::InvalidStarBrowserKind("4".into()))
        );
    }

    #[test]
    fn test_from_str_and_display() {
        for kind in StarBrowserKind::ALL {
            assert_eq!(kind.to_string().parse::<StarBrowserKind>(), Ok(kind));
        }
        assert_eq!(
            "With_Planets".parse::<StarBrowserKind>(),
            Ok(StarBrowserKind::WithPlanets)
        );
        assert!("faintest".parse::<StarBrowserKind>().is_err());
    }

    #[test]
    fn test_needs_context() {
        assert!(StarBrowserKind::Nearest.needs_context());
        assert!(StarBrowserKind::Brighter.needs_context());
        assert!(StarBrowserKind::WithPlanets.needs_context());
        assert!(!StarBrowserKind::Brightest.needs_context());
    }
}
