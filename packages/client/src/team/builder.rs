//! Team-builder state machine.
//!
//! Member slots are arena records with stable ids; validated profiles hang
//! off the slot that produced them, so inserting or removing slots can never
//! misattribute a profile to the wrong position. Every edit bumps the slot's
//! generation, and validation results carrying a stale generation are
//! dropped (last edit wins).

use thiserror::Error;

use common::constants::PID_AUTO_VALIDATE_LEN;
use common::event::{Event, EventType};
use common::team::{MemberProfile, MemberValidation};

use crate::error::ClientError;

/// Stable identifier for a member slot, allocated at slot creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    text: String,
    profile: Option<MemberProfile>,
    generation: u64,
}

impl Slot {
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn profile(&self) -> Option<&MemberProfile> {
        self.profile.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn pid(&self) -> &str {
        self.text.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Editing,
    Submitting,
    Succeeded,
}

/// A validation the caller should run for a slot. Carries the generation the
/// request was issued under; results for older generations are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub slot: SlotId,
    pub text: String,
    pub generation: u64,
}

/// A non-empty slot cleared for submission by the synchronous checks.
#[derive(Debug, Clone)]
pub struct PendingMember {
    pub slot: SlotId,
    /// 1-based position among all slots, as shown to the user.
    pub position: usize,
    pub pid: String,
    pub generation: u64,
}

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Please enter team name")]
    MissingName,

    #[error("You cannot add yourself as a team member. You are automatically the team leader")]
    SelfMembership,

    #[error("Team must have at least {min} members")]
    TeamSize { min: u32, total: u32 },

    #[error("Please add at least one team member")]
    NoMembers,

    #[error("Please validate member at position {position} first")]
    Unvalidated { position: usize },

    #[error("Invalid member at position {position}: {reason}")]
    InvalidMember { position: usize, reason: String },

    #[error("Team is limited to {max} members including you")]
    SlotLimit { max: u32 },

    #[error("At least one member slot must remain")]
    LastSlot,

    #[error("Unknown member slot")]
    UnknownSlot,

    #[error("Not a team event")]
    NotTeamEvent,

    /// Backend rejected the creation request; message passed through.
    #[error("{0}")]
    Creation(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Whether a validation result was applied to its slot or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

pub struct TeamBuilder {
    event: Event,
    leader_pid: String,
    team_name: String,
    slots: Vec<Slot>,
    next_id: u64,
    state: BuilderState,
}

impl TeamBuilder {
    /// Starts a builder session for a team event with a single empty slot.
    pub fn new(event: Event, leader_pid: impl Into<String>) -> Result<Self, TeamError> {
        if event.event_type != EventType::Team {
            return Err(TeamError::NotTeamEvent);
        }
        let mut builder = Self {
            event,
            leader_pid: leader_pid.into(),
            team_name: String::new(),
            slots: Vec::new(),
            next_id: 0,
            state: BuilderState::Editing,
        };
        builder.push_slot();
        Ok(builder)
    }

    fn push_slot(&mut self) -> SlotId {
        let id = SlotId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            text: String::new(),
            profile: None,
            generation: 0,
        });
        id
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn leader_pid(&self) -> &str {
        &self.leader_pid
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn set_team_name(&mut self, name: impl Into<String>) {
        self.team_name = name.into();
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn slot_mut(&mut self, id: SlotId) -> Result<&mut Slot, TeamError> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TeamError::UnknownSlot)
    }

    /// Members entered so far, leader included.
    pub fn member_count(&self) -> u32 {
        self.slots.iter().filter(|s| !s.is_empty()).count() as u32 + 1
    }

    /// Appends an empty slot. The leader occupies one team place, so at most
    /// `max_team_size - 1` slots are allowed.
    pub fn add_slot(&mut self) -> Result<SlotId, TeamError> {
        let (_, max) = self.event.team_size_bounds();
        if self.slots.len() as u32 >= max.saturating_sub(1) {
            return Err(TeamError::SlotLimit { max });
        }
        Ok(self.push_slot())
    }

    /// Removes a slot and its cached profile. Other slots keep their ids and
    /// profiles.
    pub fn remove_slot(&mut self, id: SlotId) -> Result<(), TeamError> {
        if self.slots.len() <= 1 {
            return Err(TeamError::LastSlot);
        }
        let index = self
            .slots
            .iter()
            .position(|s| s.id == id)
            .ok_or(TeamError::UnknownSlot)?;
        self.slots.remove(index);
        Ok(())
    }

    /// Updates a slot's text. The cached profile survives only while the
    /// trimmed text still matches the validated PID. Returns a validation
    /// request once the text is long enough to look like a PID and no valid
    /// profile is cached for it.
    pub fn edit_slot(
        &mut self,
        id: SlotId,
        text: impl Into<String>,
    ) -> Result<Option<ValidationRequest>, TeamError> {
        let slot = self.slot_mut(id)?;
        slot.text = text.into();
        slot.generation += 1;

        if let Some(profile) = &slot.profile {
            if profile.pid != slot.pid() {
                slot.profile = None;
            }
        }

        let pid = slot.pid();
        if slot.profile.is_none() && pid.len() >= PID_AUTO_VALIDATE_LEN {
            return Ok(Some(ValidationRequest {
                slot: id,
                text: pid.to_string(),
                generation: slot.generation,
            }));
        }
        Ok(None)
    }

    /// Explicit validation trigger (field blur). Unlike [`edit_slot`] this
    /// fires for any non-empty text, regardless of length.
    ///
    /// [`edit_slot`]: TeamBuilder::edit_slot
    pub fn blur_slot(&mut self, id: SlotId) -> Result<Option<ValidationRequest>, TeamError> {
        let slot = self.slot_mut(id)?;
        if slot.is_empty() || slot.profile.is_some() {
            return Ok(None);
        }
        Ok(Some(ValidationRequest {
            slot: id,
            text: slot.pid().to_string(),
            generation: slot.generation,
        }))
    }

    /// Applies a completed validation. Results from a superseded edit (older
    /// generation) are dropped without touching the slot.
    pub fn apply_validation(
        &mut self,
        id: SlotId,
        generation: u64,
        outcome: &MemberValidation,
    ) -> Result<Applied, TeamError> {
        let slot = self.slot_mut(id)?;
        if slot.generation != generation {
            return Ok(Applied::Stale);
        }
        slot.profile = outcome.profile().cloned();
        Ok(Applied::Current)
    }

    /// Runs every client-side submission check, in the order the user sees
    /// them, without touching the network. On success returns the non-empty
    /// slots in display order.
    pub fn prepare_submission(&self) -> Result<Vec<PendingMember>, TeamError> {
        if self.team_name.trim().is_empty() {
            return Err(TeamError::MissingName);
        }
        if self.slots.iter().any(|s| s.pid() == self.leader_pid) {
            return Err(TeamError::SelfMembership);
        }

        let (min, _) = self.event.team_size_bounds();
        let total = self.member_count();
        if total < min {
            return Err(TeamError::TeamSize { min, total });
        }

        let mut members = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.is_empty() {
                continue;
            }
            let position = index + 1;
            if slot.profile.is_none() {
                return Err(TeamError::Unvalidated { position });
            }
            members.push(PendingMember {
                slot: slot.id,
                position,
                pid: slot.pid().to_string(),
                generation: slot.generation,
            });
        }

        if members.is_empty() {
            return Err(TeamError::NoMembers);
        }
        Ok(members)
    }

    pub(crate) fn mark_submitting(&mut self) {
        self.state = BuilderState::Submitting;
    }

    pub(crate) fn mark_succeeded(&mut self) {
        self.state = BuilderState::Succeeded;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.state = BuilderState::Editing;
    }

    /// Returns the builder to its initial state: empty name, one empty slot.
    pub fn reset(&mut self) {
        self.team_name.clear();
        self.slots.clear();
        self.state = BuilderState::Editing;
        self.push_slot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team_event(min: u32, max: u32) -> Event {
        Event {
            id: "ev1".into(),
            name: "Robo Race".into(),
            description: String::new(),
            event_type: EventType::Team,
            date: None,
            time: None,
            venue: None,
            amount: 0,
            max_participants: 40,
            current_participants: 0,
            min_team_size: Some(min),
            max_team_size: Some(max),
            is_active: true,
        }
    }

    fn profile(pid: &str) -> MemberProfile {
        MemberProfile {
            pid: pid.into(),
            name: "Member".into(),
            branch: "IT".into(),
            events_count: 1,
        }
    }

    fn builder(min: u32, max: u32) -> TeamBuilder {
        TeamBuilder::new(team_event(min, max), "LEADER00001").unwrap()
    }

    fn validate(b: &mut TeamBuilder, id: SlotId, pid: &str) {
        let req = b.edit_slot(id, pid).unwrap().expect("validation request");
        b.apply_validation(req.slot, req.generation, &MemberValidation::Valid(profile(pid)))
            .unwrap();
    }

    #[test]
    fn solo_events_are_rejected() {
        let mut ev = team_event(2, 5);
        ev.event_type = EventType::Solo;
        assert!(matches!(
            TeamBuilder::new(ev, "LEADER00001"),
            Err(TeamError::NotTeamEvent)
        ));
    }

    #[test]
    fn slot_count_is_bounded_by_max_team_size() {
        let mut b = builder(2, 3);
        // One slot exists; max 3 including leader leaves room for one more.
        b.add_slot().unwrap();
        assert!(matches!(b.add_slot(), Err(TeamError::SlotLimit { max: 3 })));
    }

    #[test]
    fn last_slot_cannot_be_removed() {
        let mut b = builder(2, 5);
        let only = b.slots()[0].id();
        assert!(matches!(b.remove_slot(only), Err(TeamError::LastSlot)));
    }

    #[test]
    fn short_text_does_not_trigger_validation() {
        let mut b = builder(2, 5);
        let id = b.slots()[0].id();
        assert!(b.edit_slot(id, "SHORT").unwrap().is_none());
        assert!(b.edit_slot(id, "LONGENOUGH").unwrap().is_some());
    }

    #[test]
    fn blur_triggers_validation_for_short_text() {
        let mut b = builder(2, 5);
        let id = b.slots()[0].id();
        b.edit_slot(id, "SHORT").unwrap();
        let req = b.blur_slot(id).unwrap().expect("blur request");
        assert_eq!(req.text, "SHORT");
    }

    #[test]
    fn editing_away_from_validated_pid_clears_profile() {
        let mut b = builder(2, 5);
        let id = b.slots()[0].id();
        validate(&mut b, id, "MEMBER00001");
        assert!(b.slots()[0].profile().is_some());

        b.edit_slot(id, "MEMBER0000").unwrap();
        assert!(b.slots()[0].profile().is_none());
    }

    #[test]
    fn unchanged_validated_pid_is_reused_without_new_request() {
        let mut b = builder(2, 5);
        let id = b.slots()[0].id();
        validate(&mut b, id, "MEMBER00001");

        // Re-entering the same text (e.g. whitespace padding) keeps the
        // cached profile and asks for no re-validation.
        let req = b.edit_slot(id, " MEMBER00001 ").unwrap();
        assert!(req.is_none());
        assert!(b.slots()[0].profile().is_some());
    }

    #[test]
    fn stale_generation_results_are_dropped() {
        let mut b = builder(2, 5);
        let id = b.slots()[0].id();
        let first = b.edit_slot(id, "MEMBER00001").unwrap().unwrap();
        let second = b.edit_slot(id, "MEMBER00002").unwrap().unwrap();

        // The first edit's result arrives late and must not win.
        let applied = b
            .apply_validation(id, first.generation, &MemberValidation::Valid(profile("MEMBER00001")))
            .unwrap();
        assert_eq!(applied, Applied::Stale);
        assert!(b.slots()[0].profile().is_none());

        let applied = b
            .apply_validation(id, second.generation, &MemberValidation::Valid(profile("MEMBER00002")))
            .unwrap();
        assert_eq!(applied, Applied::Current);
        assert_eq!(b.slots()[0].profile().unwrap().pid, "MEMBER00002");
    }

    #[test]
    fn removing_middle_slot_keeps_profiles_attached() {
        let mut b = builder(2, 5);
        let first = b.slots()[0].id();
        let second = b.add_slot().unwrap();
        let third = b.add_slot().unwrap();

        validate(&mut b, first, "MEMBER00001");
        validate(&mut b, second, "MEMBER00002");
        validate(&mut b, third, "MEMBER00003");

        b.remove_slot(second).unwrap();

        let pids: Vec<_> = b
            .slots()
            .iter()
            .map(|s| s.profile().unwrap().pid.clone())
            .collect();
        assert_eq!(pids, vec!["MEMBER00001", "MEMBER00003"]);
    }

    #[test]
    fn submission_requires_team_name() {
        let b = builder(2, 5);
        assert!(matches!(
            b.prepare_submission(),
            Err(TeamError::MissingName)
        ));
    }

    #[test]
    fn leader_cannot_be_a_member() {
        let mut b = builder(2, 5);
        b.set_team_name("Null Pointers");
        let id = b.slots()[0].id();
        validate(&mut b, id, "MEMBER00001");
        b.edit_slot(id, "LEADER00001").unwrap();

        // Self-membership wins even though the slot is unvalidated now.
        assert!(matches!(
            b.prepare_submission(),
            Err(TeamError::SelfMembership)
        ));
    }

    #[test]
    fn undersized_team_is_rejected_before_validation_checks() {
        let mut b = builder(3, 5);
        b.set_team_name("Null Pointers");
        let id = b.slots()[0].id();
        validate(&mut b, id, "MEMBER00001");

        // Leader + 1 member < min 3.
        assert!(matches!(
            b.prepare_submission(),
            Err(TeamError::TeamSize { min: 3, total: 2 })
        ));
    }

    #[test]
    fn empty_roster_is_rejected_even_when_min_is_one() {
        let mut b = builder(1, 5);
        b.set_team_name("Solo Squad");
        assert!(matches!(b.prepare_submission(), Err(TeamError::NoMembers)));
    }

    #[test]
    fn unvalidated_slot_is_named_by_position() {
        let mut b = builder(2, 5);
        b.set_team_name("Null Pointers");
        let first = b.slots()[0].id();
        let second = b.add_slot().unwrap();
        validate(&mut b, first, "MEMBER00001");
        b.edit_slot(second, "MEMBER002").unwrap(); // 9 chars, never validated

        assert!(matches!(
            b.prepare_submission(),
            Err(TeamError::Unvalidated { position: 2 })
        ));
    }

    #[test]
    fn successful_preparation_lists_members_in_order() {
        let mut b = builder(2, 5);
        b.set_team_name("Null Pointers");
        let first = b.slots()[0].id();
        let second = b.add_slot().unwrap();
        let third = b.add_slot().unwrap();
        validate(&mut b, first, "MEMBER00001");
        // Second slot left empty on purpose.
        let _ = second;
        validate(&mut b, third, "MEMBER00003");

        let members = b.prepare_submission().unwrap();
        let pids: Vec<_> = members.iter().map(|m| m.pid.as_str()).collect();
        assert_eq!(pids, vec!["MEMBER00001", "MEMBER00003"]);
        assert_eq!(members[1].position, 3);
    }

    #[test]
    fn reset_returns_to_single_empty_slot() {
        let mut b = builder(2, 5);
        b.set_team_name("Null Pointers");
        b.add_slot().unwrap();
        b.reset();
        assert_eq!(b.slots().len(), 1);
        assert!(b.slots()[0].is_empty());
        assert_eq!(b.team_name(), "");
        assert_eq!(b.state(), BuilderState::Editing);
    }
}
