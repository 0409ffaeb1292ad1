use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Tweet identifiers are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweetID(i32);

impl TweetID {
    pub fn new(id: i32) -> std::result::Result<TweetID, InvalidID> {
        if id > 0 {
            Ok(TweetID(id))
        } else {
            Err(InvalidID)
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

derive_newtype_serde!(TweetID, i32; TweetID::new, "tweet id must be a positive integer");

// "42" to TweetID
impl FromStr for TweetID {
    type Err = InvalidID;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let id = s.trim().parse::<i32>().map_err(|_| InvalidID)?;
        TweetID::new(id)
    }
}

impl fmt::Display for TweetID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Eq, Hash)]
pub struct UserID(pub i32);

derive_newtype_serde!(UserID, i32);

impl UserID {
    /// Viewer used when a request names no (parsable) user.
    pub const ANONYMOUS: UserID = UserID(0);

    pub fn parse_or_anonymous(s: Option<&str>) -> UserID {
        s.and_then(|it| it.trim().parse().ok())
            .map(UserID)
            .unwrap_or(UserID::ANONYMOUS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LikeID(pub i32);

derive_newtype_serde!(LikeID, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidID;

impl fmt::Display for InvalidID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifier must be a positive integer")
    }
}

impl std::error::Error for InvalidID {}
