use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{LedgerError, Result};
use crate::models::{CreateRoommateInput, Roommate, RoommateRef};

/// Id lookup over a roster snapshot, used to resolve references in views.
pub struct RosterIndex<'a> {
    by_id: HashMap<Uuid, &'a Roommate>,
}

impl<'a> RosterIndex<'a> {
    pub fn new(roster: &'a [Roommate]) -> Self {
        Self {
            by_id: roster.iter().map(|r| (r.id, r)).collect(),
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn reference(&self, id: Uuid) -> Option<RoommateRef> {
        self.by_id.get(&id).map(|r| RoommateRef::from(*r))
    }

    pub fn name(&self, id: Uuid) -> Option<String> {
        self.by_id.get(&id).map(|r| r.name.clone())
    }
}

/// Validate input and build a new roommate.
pub fn new_roommate(input: CreateRoommateInput) -> Result<Roommate> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("name", "name is required"));
    }

    let email = input
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    Ok(Roommate {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_roommate_trims_name_and_drops_blank_email() {
        let roommate = new_roommate(CreateRoommateInput {
            name: "  Alice ".to_string(),
            email: Some("   ".to_string()),
        })
        .unwrap();

        assert_eq!(roommate.name, "Alice");
        assert!(roommate.email.is_none());
    }

    #[test]
    fn new_roommate_requires_name() {
        let err = new_roommate(CreateRoommateInput::default()).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn index_resolves_known_ids_only() {
        let alice = new_roommate(CreateRoommateInput {
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
        })
        .unwrap();
        let roster = vec![alice.clone()];
        let index = RosterIndex::new(&roster);

        assert!(index.contains(alice.id));
        assert_eq!(index.name(alice.id).as_deref(), Some("Alice"));
        assert_eq!(
            index.reference(alice.id),
            Some(RoommateRef {
                id: alice.id,
                name: "Alice".to_string()
            })
        );
        assert!(index.reference(Uuid::new_v4()).is_none());
    }
}
