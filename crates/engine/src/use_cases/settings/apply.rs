use terraclaim_domain::{ActorId, DomainError, RegionId};

use super::SettingsCommand;
use crate::infrastructure::TerritoryError;
use crate::messages;
use crate::stores::TerritoryState;
use crate::use_cases::Notices;

/// Applies settings commands gathered by a finished session.
pub struct ApplySettings {
    notices: Notices,
}

impl ApplySettings {
    pub fn new(notices: Notices) -> Self {
        Self { notices }
    }

    /// Apply `commands` to `region_id` on behalf of `actor`. The region may
    /// have been removed, or changed hands, while the forms were open.
    pub fn execute(
        &self,
        state: &mut TerritoryState,
        actor: &ActorId,
        region_id: &RegionId,
        commands: Vec<SettingsCommand>,
    ) -> Result<(), TerritoryError> {
        let Some(region) = state.regions.get(region_id) else {
            self.notices.send(actor, &messages::region_gone());
            return Err(DomainError::not_found("Region", region_id.as_str()).into());
        };
        if !region.is_owner(actor) {
            self.notices.send(actor, &messages::region_gone());
            return Err(DomainError::constraint(format!(
                "{actor} no longer owns {region_id}"
            ))
            .into());
        }

        for command in commands {
            match command {
                SettingsCommand::SetToggles {
                    show_visuals,
                    pvp_allowed,
                    explosions_allowed,
                } => self.set_toggles(state, actor, region_id, show_visuals, pvp_allowed, explosions_allowed),
                SettingsCommand::AddMember { name } => self.add_member(state, actor, region_id, &name),
                SettingsCommand::RemoveMember { member } => {
                    self.remove_member(state, actor, region_id, &member)
                }
            }
        }
        Ok(())
    }

    fn set_toggles(
        &self,
        state: &mut TerritoryState,
        actor: &ActorId,
        region_id: &RegionId,
        show_visuals: bool,
        pvp_allowed: bool,
        explosions_allowed: bool,
    ) {
        let Some(current) = state.regions.get(region_id) else {
            return;
        };
        let mut notes = Vec::new();
        if current.show_visuals != show_visuals {
            notes.push(messages::visuals_toggled(show_visuals));
        }
        if current.pvp_allowed != pvp_allowed {
            notes.push(messages::pvp_toggled(pvp_allowed));
        }
        if current.explosions_allowed != explosions_allowed {
            notes.push(messages::explosions_toggled(explosions_allowed));
        }
        if notes.is_empty() {
            return;
        }

        if let Some(region) = state.regions.get_mut(region_id) {
            region.show_visuals = show_visuals;
            region.pvp_allowed = pvp_allowed;
            region.explosions_allowed = explosions_allowed;
        }
        notes.push(messages::general_saved());
        self.notices.send_all(actor, &notes);
        tracing::info!(
            region_id = %region_id,
            show_visuals,
            pvp_allowed,
            explosions_allowed,
            "Region settings changed"
        );
    }

    fn add_member(&self, state: &mut TerritoryState, actor: &ActorId, region_id: &RegionId, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.notices.send(actor, &messages::member_name_missing());
            return;
        }
        let Some(target) = state.roster.find_by_name(name).cloned() else {
            self.notices.send(actor, &messages::actor_not_found(name));
            return;
        };
        if target.id == *actor {
            self.notices.send(actor, &messages::cannot_add_self());
            return;
        }
        let Some(region) = state.regions.get(region_id) else {
            return;
        };
        if region.is_member(&target.id) {
            self.notices
                .send(actor, &messages::already_member(&target.name));
            return;
        }

        let Some(region) = state.regions.get_mut(region_id) else {
            return;
        };
        match region.add_member(target.id.clone()) {
            Ok(()) => {
                let owner_name = region.owner_name.clone();
                self.notices
                    .send(actor, &messages::member_added(&target.name));
                self.notices
                    .send(&target.id, &messages::added_to_region(&owner_name));
                tracing::info!(region_id = %region_id, member_id = %target.id, "Member added");
            }
            Err(e) => {
                tracing::debug!(region_id = %region_id, error = %e, "Member not added");
                self.notices
                    .send(actor, &messages::already_member(&target.name));
            }
        }
    }

    fn remove_member(
        &self,
        state: &mut TerritoryState,
        actor: &ActorId,
        region_id: &RegionId,
        member: &ActorId,
    ) {
        let Some(region) = state.regions.get(region_id) else {
            return;
        };
        if !region.is_member(member) {
            tracing::debug!(region_id = %region_id, member_id = %member, "Member already gone");
            return;
        }
        let Some(region) = state.regions.get_mut(region_id) else {
            return;
        };
        if let Err(e) = region.remove_member(member) {
            tracing::debug!(region_id = %region_id, error = %e, "Member not removed");
            return;
        }
        let owner_name = region.owner_name.clone();

        let connected = state.roster.get(member).map(|a| a.name.clone());
        self.notices
            .send(actor, &messages::member_removed(connected.as_deref(), member));
        if connected.is_some() {
            self.notices
                .send(member, &messages::removed_from_region(&owner_name));
        }
        tracing::info!(region_id = %region_id, member_id = %member, "Member removed");
    }
}
