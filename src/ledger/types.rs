//! Data types shared by the ledger and its collaborators.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Budget used when a competition does not carry a usable `max_score`.
pub const DEFAULT_BUDGET: u32 = 1000;

/// Feedback value sent in place of an empty string.
///
/// The backend and the results view both treat this literal as "no feedback
/// given", so it must be sent verbatim.
pub const EMPTY_FEEDBACK: &str = "empty";

/// Identifier of a participant within a competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A participant as listed in a competition snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Participation row identifier.
    pub id: ParticipantId,
    /// Account identifier, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ParticipantId>,
    /// Display name.
    pub username: String,
}

impl Participant {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            user_id: None,
            username: username.into(),
        }
    }

    /// Attach the account identifier.
    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(ParticipantId(user_id));
        self
    }

    /// Key used for ledger entries and submitted polls.
    ///
    /// Scores are addressed by account, so `user_id` wins when present.
    pub fn key(&self) -> ParticipantId {
        self.user_id.unwrap_or(self.id)
    }
}

/// Competition snapshot supplied by the competition-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Point budget each judge must distribute.
    #[serde(
        default,
        deserialize_with = "deserialize_max_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_score: Option<u32>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// Key under which the competition endpoint wraps its payload.
const WRAPPER_KEY: &str = "competitions";

impl Competition {
    /// Parse a competition document in either accepted shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value in either accepted shape.
    ///
    /// A document carrying a `competitions` key is always treated as the
    /// wrapped shape, so an invalid inner competition is an error rather
    /// than an empty bare one.
    pub fn from_value(mut value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if let Some(inner) = value
            .as_object_mut()
            .and_then(|object| object.remove(WRAPPER_KEY))
        {
            return serde_json::from_value(inner);
        }
        serde_json::from_value(value)
    }

    /// Budget for this competition: `max_score` when positive, else `default`.
    pub fn budget(&self, default: u32) -> u32 {
        match self.max_score {
            Some(max) if max > 0 => max,
            _ => default,
        }
    }
}

/// Accepts `max_score` as an integer or as a whole float such as `500.0`.
fn deserialize_max_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Float(f64),
    }

    match Option::<Number>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Number::Int(n)) => u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("max_score {n} is out of range"))),
        Some(Number::Float(f)) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Ok(Some(f as u32))
        }
        Some(Number::Float(f)) => Err(D::Error::custom(format!(
            "max_score {f} is not a whole number of points"
        ))),
    }
}

/// Who is acting in the current session.
///
/// Passed explicitly into the ledger so it knows which participant is the
/// judge and may have to be excluded from self-scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JudgeContext {
    pub user_id: Option<ParticipantId>,
}

impl JudgeContext {
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id: Some(ParticipantId(user_id)),
        }
    }

    /// A context with no logged-in judge; nobody is excluded.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Participant to leave out of the ledger under `policy`.
    pub fn excluded(&self, policy: &LedgerPolicy) -> Option<ParticipantId> {
        if policy.allow_self_scoring {
            None
        } else {
            self.user_id
        }
    }
}

/// Tunable ledger behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPolicy {
    /// Budget used when the competition has no positive `max_score`.
    pub default_budget: u32,
    /// Whether judges get an entry for themselves.
    pub allow_self_scoring: bool,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            default_budget: DEFAULT_BUDGET,
            allow_self_scoring: false,
        }
    }
}

/// Points and feedback assigned to one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub score: u32,
    #[serde(default)]
    pub feedback: String,
}

/// One participant's line in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub participant_id: ParticipantId,
    pub score: u32,
    pub feedback: String,
}

/// Finalized allocation accepted by the submission collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub polls: Vec<Poll>,
}

impl Submission {
    /// Sum of all submitted points.
    pub fn total(&self) -> u64 {
        self.polls.iter().map(|p| u64::from(p.score)).sum()
    }
}

/// Competition as listed in a judge's poll overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u64>,
}

/// Where a judge stands on a competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    /// Listed for the judge and not yet voted on.
    Pending,
    /// The judge already submitted; only results remain.
    Voted,
    /// Not listed for the judge at all.
    Unlisted,
}

impl PollStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Voted => "voted",
            Self::Unlisted => "unlisted",
        }
    }

    /// Whether the judge still has to allocate points.
    pub fn needs_poll(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The judge's competitions, split by whether a poll was submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MyPolls {
    pub voted: Vec<CompetitionSummary>,
    pub not_voted: Vec<CompetitionSummary>,
}

impl MyPolls {
    /// Status of `competition_id` for this judge.
    ///
    /// A competition listed as voted is `Voted` even if it also shows up as
    /// not voted, so a judge is never sent back to allocate twice.
    pub fn status(&self, competition_id: u64) -> PollStatus {
        if self.voted.iter().any(|c| c.id == competition_id) {
            PollStatus::Voted
        } else if self.not_voted.iter().any(|c| c.id == competition_id) {
            PollStatus::Pending
        } else {
            PollStatus::Unlisted
        }
    }

    pub fn needs_poll(&self, competition_id: u64) -> bool {
        self.status(competition_id).needs_poll()
    }
}
