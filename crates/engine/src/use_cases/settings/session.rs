use std::sync::Arc;

use terraclaim_domain::ActorId;

use super::{MemberEntry, RegionSnapshot, SettingsCommand, SettingsRequest};
use crate::infrastructure::ports::{
    FormError, FormResponse, FormsPort, SelectionMenu, TextInputForm, ToggleForm,
};
use crate::messages;
use crate::use_cases::Notices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Main,
    General,
    Members,
    MemberList,
    AddMember,
    RemoveMember,
    Done,
}

/// Walks the settings forms for one actor.
///
/// A dismissed form behaves like a declined one. A form collaborator
/// failure ends the session; commands gathered before it are still returned.
pub struct SettingsSession {
    forms: Arc<dyn FormsPort>,
    notices: Notices,
}

impl SettingsSession {
    pub fn new(forms: Arc<dyn FormsPort>, notices: Notices) -> Self {
        Self { forms, notices }
    }

    pub async fn run(&self, request: SettingsRequest) -> Vec<SettingsCommand> {
        let actor = request.actor;
        let mut snapshot = request.snapshot;
        let mut commands = Vec::new();
        let mut screen = Screen::Main;

        while screen != Screen::Done {
            let next = match screen {
                Screen::Main => self.main_menu(&actor).await,
                Screen::General => self.general(&actor, &mut snapshot, &mut commands).await,
                Screen::Members => self.members_menu(&actor).await,
                Screen::MemberList => self.member_list(&actor, &snapshot).await,
                Screen::AddMember => self.add_member(&actor, &mut commands).await,
                Screen::RemoveMember => {
                    self.remove_member(&actor, &mut snapshot, &mut commands)
                        .await
                }
                Screen::Done => Ok(Screen::Done),
            };
            screen = match next {
                Ok(next) => next,
                Err(e) => {
                    tracing::warn!(
                        actor_id = %actor,
                        region_id = %request.region_id,
                        error = %e,
                        kind = "form_interaction",
                        "Settings form failed"
                    );
                    self.notices.send(&actor, &messages::menu_failed());
                    Screen::Done
                }
            };
        }

        tracing::debug!(
            actor_id = %actor,
            region_id = %request.region_id,
            commands = commands.len(),
            "Settings session finished"
        );
        commands
    }

    async fn main_menu(&self, actor: &ActorId) -> Result<Screen, FormError> {
        let menu = SelectionMenu {
            title: messages::MENU_TITLE.to_string(),
            body: messages::MENU_BODY.to_string(),
            options: vec![
                messages::MENU_GENERAL.to_string(),
                messages::MENU_MEMBERS.to_string(),
                messages::MENU_EXIT.to_string(),
            ],
        };
        Ok(match self.forms.show_selection_menu(actor, menu).await? {
            FormResponse::Submitted(0) => Screen::General,
            FormResponse::Submitted(1) => Screen::Members,
            FormResponse::Submitted(_) => {
                self.notices.send(actor, &messages::menu_exited());
                Screen::Done
            }
            FormResponse::Cancelled => {
                self.notices.send(actor, &messages::menu_cancelled());
                Screen::Done
            }
        })
    }

    async fn general(
        &self,
        actor: &ActorId,
        snapshot: &mut RegionSnapshot,
        commands: &mut Vec<SettingsCommand>,
    ) -> Result<Screen, FormError> {
        let form = ToggleForm {
            title: messages::GENERAL_TITLE.to_string(),
            toggles: vec![
                (messages::TOGGLE_VISUALS.to_string(), snapshot.show_visuals),
                (messages::TOGGLE_PVP.to_string(), snapshot.pvp_allowed),
                (
                    messages::TOGGLE_EXPLOSIONS.to_string(),
                    snapshot.explosions_allowed,
                ),
            ],
        };
        match self.forms.show_toggle_form(actor, form).await? {
            FormResponse::Submitted(values) => {
                let &[show_visuals, pvp_allowed, explosions_allowed] = values.as_slice() else {
                    return Err(FormError::InvalidResponse(format!(
                        "expected 3 toggle values, got {}",
                        values.len()
                    )));
                };
                snapshot.show_visuals = show_visuals;
                snapshot.pvp_allowed = pvp_allowed;
                snapshot.explosions_allowed = explosions_allowed;
                commands.push(SettingsCommand::SetToggles {
                    show_visuals,
                    pvp_allowed,
                    explosions_allowed,
                });
            }
            FormResponse::Cancelled => {
                self.notices.send(actor, &messages::general_cancelled());
            }
        }
        Ok(Screen::Done)
    }

    async fn members_menu(&self, actor: &ActorId) -> Result<Screen, FormError> {
        let menu = SelectionMenu {
            title: messages::MEMBERS_TITLE.to_string(),
            body: messages::MEMBERS_BODY.to_string(),
            options: vec![
                messages::MEMBERS_LIST.to_string(),
                messages::MEMBERS_ADD.to_string(),
                messages::MEMBERS_REMOVE.to_string(),
                messages::MEMBERS_BACK.to_string(),
            ],
        };
        Ok(match self.forms.show_selection_menu(actor, menu).await? {
            FormResponse::Submitted(0) => Screen::MemberList,
            FormResponse::Submitted(1) => Screen::AddMember,
            FormResponse::Submitted(2) => Screen::RemoveMember,
            FormResponse::Submitted(_) => Screen::Main,
            FormResponse::Cancelled => Screen::Done,
        })
    }

    async fn member_list(&self, actor: &ActorId, snapshot: &RegionSnapshot) -> Result<Screen, FormError> {
        if snapshot.members.is_empty() {
            self.notices.send(actor, &messages::no_members());
            return Ok(Screen::Done);
        }
        let entries: Vec<String> = snapshot
            .members
            .iter()
            .map(|member| match &member.name {
                Some(name) => messages::member_online(name),
                None => messages::member_offline(&member.id),
            })
            .collect();
        let menu = SelectionMenu {
            title: messages::MEMBER_LIST_TITLE.to_string(),
            body: messages::member_list_body(&entries),
            options: vec![
                messages::MEMBER_LIST_OK.to_string(),
                messages::MEMBER_LIST_BACK.to_string(),
            ],
        };
        Ok(match self.forms.show_selection_menu(actor, menu).await? {
            FormResponse::Submitted(1) => Screen::Members,
            _ => Screen::Done,
        })
    }

    async fn add_member(
        &self,
        actor: &ActorId,
        commands: &mut Vec<SettingsCommand>,
    ) -> Result<Screen, FormError> {
        let form = TextInputForm {
            title: messages::ADD_MEMBER_TITLE.to_string(),
            label: messages::ADD_MEMBER_LABEL.to_string(),
            placeholder: messages::ADD_MEMBER_PLACEHOLDER.to_string(),
        };
        if let FormResponse::Submitted(name) = self.forms.show_text_input_form(actor, form).await? {
            commands.push(SettingsCommand::AddMember { name });
        }
        Ok(Screen::Done)
    }

    async fn remove_member(
        &self,
        actor: &ActorId,
        snapshot: &mut RegionSnapshot,
        commands: &mut Vec<SettingsCommand>,
    ) -> Result<Screen, FormError> {
        if snapshot.members.is_empty() {
            self.notices.send(actor, &messages::no_members_to_remove());
            return Ok(Screen::Done);
        }
        let menu = SelectionMenu {
            title: messages::REMOVE_MEMBER_TITLE.to_string(),
            body: messages::REMOVE_MEMBER_BODY.to_string(),
            options: snapshot
                .members
                .iter()
                .map(|member| messages::member_button(member.name.as_deref(), &member.id))
                .collect(),
        };
        if let FormResponse::Submitted(index) = self.forms.show_selection_menu(actor, menu).await? {
            if index >= snapshot.members.len() {
                return Err(FormError::InvalidResponse(format!(
                    "member index {index} out of range"
                )));
            }
            let MemberEntry { id, .. } = snapshot.members.remove(index);
            commands.push(SettingsCommand::RemoveMember { member: id });
        }
        Ok(Screen::Done)
    }
}
