use std::fmt;
use std::str::FromStr;

/// The category a mood tag belongs to. Categories never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Emotion,
    Activity,
    Context,
}

impl TagCategory {
    pub const ALL: [TagCategory; 3] = [
        TagCategory::Emotion,
        TagCategory::Activity,
        TagCategory::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Emotion => "emotion",
            TagCategory::Activity => "activity",
            TagCategory::Context => "context",
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = MoodTag> + '_ {
        MoodTag::ALL
            .into_iter()
            .filter(move |tag| tag.category() == *self)
    }
}

/// Closed vocabulary of tags the classifier may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodTag {
    Happy,
    Excited,
    Calm,
    Anxious,
    Sad,
    Angry,
    WorkActivity,
    Exercise,
    Social,
    Rest,
    Home,
    WorkLocation,
    Outside,
}

impl MoodTag {
    pub const ALL: [MoodTag; 13] = [
        MoodTag::Happy,
        MoodTag::Excited,
        MoodTag::Calm,
        MoodTag::Anxious,
        MoodTag::Sad,
        MoodTag::Angry,
        MoodTag::WorkActivity,
        MoodTag::Exercise,
        MoodTag::Social,
        MoodTag::Rest,
        MoodTag::Home,
        MoodTag::WorkLocation,
        MoodTag::Outside,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTag::Happy => "happy",
            MoodTag::Excited => "excited",
            MoodTag::Calm => "calm",
            MoodTag::Anxious => "anxious",
            MoodTag::Sad => "sad",
            MoodTag::Angry => "angry",
            MoodTag::WorkActivity => "work_activity",
            MoodTag::Exercise => "exercise",
            MoodTag::Social => "social",
            MoodTag::Rest => "rest",
            MoodTag::Home => "home",
            MoodTag::WorkLocation => "work_location",
            MoodTag::Outside => "outside",
        }
    }

    pub fn category(&self) -> TagCategory {
        match self {
            MoodTag::Happy
            | MoodTag::Excited
            | MoodTag::Calm
            | MoodTag::Anxious
            | MoodTag::Sad
            | MoodTag::Angry => TagCategory::Emotion,
            MoodTag::WorkActivity | MoodTag::Exercise | MoodTag::Social | MoodTag::Rest => {
                TagCategory::Activity
            }
            MoodTag::Home | MoodTag::WorkLocation | MoodTag::Outside => TagCategory::Context,
        }
    }

    /// Label shown on the client's tag chips.
    pub fn display_name(&self) -> &'static str {
        match self {
            MoodTag::Happy => "Happy",
            MoodTag::Excited => "Excited",
            MoodTag::Calm => "Calm",
            MoodTag::Anxious => "Anxious",
            MoodTag::Sad => "Sad",
            MoodTag::Angry => "Angry",
            MoodTag::WorkActivity => "Work",
            MoodTag::Exercise => "Exercise",
            MoodTag::Social => "Social",
            MoodTag::Rest => "Rest",
            MoodTag::Home => "At Home",
            MoodTag::WorkLocation => "At Work",
            MoodTag::Outside => "Outside",
        }
    }
}

impl FromStr for MoodTag {
    type Err = String;

    /// Exact, case-sensitive match against the wire literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("Invalid mood tag: {}", s))
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
