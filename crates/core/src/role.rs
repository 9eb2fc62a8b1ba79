use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FrontdeskError;

/// Principal class a tab may act as.
///
/// Roles are disjoint, not ordered: a manager holds no guest privileges and
/// vice versa. Deserialization rejects any other name, so a persisted session
/// can never carry a partial or unknown role.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Clerk,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Guest, Role::Clerk, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Clerk => "clerk",
            Role::Manager => "manager",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FrontdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Role::Guest),
            "clerk" => Ok(Role::Clerk),
            "manager" => Ok(Role::Manager),
            other => Err(FrontdeskError::validation(format!("unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&Role::Clerk).unwrap(), "\"clerk\"");
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn unknown_role_fails_to_deserialize() {
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert!(serde_json::from_str::<Role>("\"Guest\"").is_err());
        assert!("".parse::<Role>().is_err());
    }

    proptest! {
        #[test]
        fn only_the_three_names_parse(name in "[a-z]{0,10}") {
            let parsed = name.parse::<Role>();
            let known = matches!(name.as_str(), "guest" | "clerk" | "manager");
            prop_assert_eq!(parsed.is_ok(), known);
            if let Ok(role) = parsed {
                prop_assert_eq!(role.as_str(), name.as_str());
            }
        }
    }
}
