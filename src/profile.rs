use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::AppError, git::Identity};

/// Represents a Git identity stored under a profile key
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Git username (user.name)
    pub name: String,
    /// Git email address (user.email)
    pub email: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Exact, case-sensitive match against the live identity.
    pub fn matches(&self, identity: &Identity) -> bool {
        self.name == identity.name && self.email == identity.email
    }
}

/// All stored profiles keyed by profile name.
///
/// Serialized as a plain JSON object: `{"work": {"name": .., "email": ..}}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Profiles(BTreeMap<String, Profile>);

impl Profiles {
    /// Placeholder profiles written on first use.
    pub fn defaults() -> Self {
        let mut profiles = Self::default();
        profiles.upsert("work", Profile::new("Your Work Name", "you@work.com"));
        profiles.upsert(
            "personal",
            Profile::new("Your Personal Name", "you@personal.com"),
        );
        profiles
    }

    pub fn get(&self, key: &str) -> Option<&Profile> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Profile)> {
        self.0.iter()
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn upsert(&mut self, key: &str, profile: Profile) -> Option<Profile> {
        self.0.insert(key.to_string(), profile)
    }

    /// Removes `key`. Leaves the map untouched when the key is absent.
    pub fn remove(&mut self, key: &str) -> Result<Profile, AppError> {
        self.0.remove(key).ok_or_else(|| self.not_found(key))
    }

    /// Looks up `key` or reports it missing along with the valid keys.
    pub fn require(&self, key: &str) -> Result<&Profile, AppError> {
        self.0.get(key).ok_or_else(|| self.not_found(key))
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Keys of every profile matching the live identity.
    ///
    /// Duplicate (name, email) pairs are all reported.
    pub fn current_keys(&self, identity: Option<&Identity>) -> Vec<&str> {
        let Some(identity) = identity else {
            return Vec::new();
        };
        self.0
            .iter()
            .filter(|(_, profile)| profile.matches(identity))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    fn not_found(&self, key: &str) -> AppError {
        AppError::ProfileNotFound {
            name: key.to_string(),
            available: self.keys().join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profiles {
        let mut profiles = Profiles::default();
        profiles.upsert("work", Profile::new("Alice", "a@x.com"));
        profiles.upsert("home", Profile::new("Bob", "b@x.com"));
        profiles
    }

    #[test]
    fn defaults_seed_work_and_personal() {
        let profiles = Profiles::defaults();
        assert_eq!(profiles.keys(), vec!["personal", "work"]);
        assert_eq!(profiles.get("work").unwrap().email, "you@work.com");
    }

    #[test]
    fn upsert_overwrites_only_target_key() {
        let mut profiles = sample();
        let previous = profiles.upsert("work", Profile::new("Carol", "c@x.com"));

        assert_eq!(previous, Some(Profile::new("Alice", "a@x.com")));
        assert_eq!(profiles.get("work"), Some(&Profile::new("Carol", "c@x.com")));
        assert_eq!(profiles.get("home"), Some(&Profile::new("Bob", "b@x.com")));
        assert_eq!(profiles.len(), 2);
    }

    #[test]
    fn remove_missing_key_reports_not_found_and_keeps_map() {
        let mut profiles = sample();
        let before = profiles.clone();

        let err = profiles.remove("ghost").unwrap_err();
        match err {
            AppError::ProfileNotFound { name, available } => {
                assert_eq!(name, "ghost");
                assert_eq!(available, "home, work");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(profiles, before);
    }

    #[test]
    fn remove_existing_key() {
        let mut profiles = sample();
        let removed = profiles.remove("home").unwrap();
        assert_eq!(removed.name, "Bob");
        assert!(profiles.get("home").is_none());
    }

    #[test]
    fn only_exact_identity_is_current() {
        let profiles = sample();
        let live = Identity::new("Alice", "a@x.com");
        assert_eq!(profiles.current_keys(Some(&live)), vec!["work"]);

        let shouting = Identity::new("ALICE", "a@x.com");
        assert!(profiles.current_keys(Some(&shouting)).is_empty());
        assert!(profiles.current_keys(None).is_empty());
    }

    #[test]
    fn duplicate_identities_are_all_current() {
        let mut profiles = sample();
        profiles.upsert("clone", Profile::new("Alice", "a@x.com"));
        let live = Identity::new("Alice", "a@x.com");
        assert_eq!(profiles.current_keys(Some(&live)), vec!["clone", "work"]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["work"]["name"], "Alice");
        assert_eq!(json["home"]["email"], "b@x.com");
    }
}
