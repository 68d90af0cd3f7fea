//! Identifier newtypes.
//!
//! Activities are authored by hand, so ids are human-readable strings rather
//! than UUIDs. Each kind gets its own type so a target id can never be passed
//! where an object id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifies a stage within an activity's sequence.
    StageId
);
string_id!(
    /// Identifies a named camera waypoint.
    WaypointId
);
string_id!(
    /// Identifies a placement target zone.
    TargetId
);
string_id!(
    /// Identifies a draggable object.
    ObjectId
);
string_id!(
    /// Identifies an activity.
    ActivityId
);
string_id!(
    /// Identifies a voice in the synthesizer's catalog.
    VoiceId
);
