//! Typed identifier newtypes backed by UUIDs.
//!
//! Ids cross the wire as plain UUID strings inside automation definitions
//! and execution records; the newtypes exist so an `AutomationId` can never
//! be handed where an `ExecutionId` belongs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[doc = concat!("Unique identifier for ", $entity, ".")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Issue a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(AutomationId, "an automation rule");
define_id!(ExecutionId, "one recorded automation run");
define_id!(OrganizationId, "a tenant organization");
define_id!(UserId, "a user (automation author or assignee)");
