//! Opaque record identifiers.
//!
//! Ids are UUID v4 strings minted by the service. Lookups take whatever
//! string the client sent, so an id is not validated as a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

record_id! {
    /// Identifies a job tracked by the compute runner.
    JobId
}

record_id! {
    /// Identifies a finished pipeline run.
    PipelineId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct_uuids() {
        let a = JobId::generate();
        let b = JobId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a.to_string()).is_ok());
    }

    #[test]
    fn test_client_string_is_kept_verbatim() {
        let id = PipelineId::from("not a uuid".to_string());
        assert_eq!(id.to_string(), "not a uuid");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"not a uuid\"");
    }
}
