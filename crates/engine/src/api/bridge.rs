//! Host bridge adapter.
//!
//! Implements the presentation, world and forms ports by queueing
//! [`HostCommand`]s for the stdout writer. The host reports block changes
//! after the fact, so the bridge keeps a mirror of the blocks it has seen
//! to answer `block_at`; positions it never saw are unknown.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};

use terraclaim_domain::{ActorId, BlockPos, BlockType, DimensionId, ItemDescriptor, WorldPos};
use terraclaim_shared::{FormReply, FormSpec, HostCommand, HostMessage, ToggleField, WireBlockPos, WirePos};

use crate::infrastructure::ports::{
    FormError, FormResponse, FormsPort, PresentationError, PresentationPort, SelectionMenu,
    TextInputForm, ToggleForm, WorldError, WorldPort,
};

pub struct HostBridge {
    commands: mpsc::UnboundedSender<HostCommand>,
    blocks: DashMap<(DimensionId, BlockPos), BlockType>,
    pending_forms: DashMap<u64, oneshot::Sender<FormReply>>,
    next_request: AtomicU64,
}

impl HostBridge {
    pub fn new(commands: mpsc::UnboundedSender<HostCommand>) -> Self {
        Self {
            commands,
            blocks: DashMap::new(),
            pending_forms: DashMap::new(),
            next_request: AtomicU64::new(1),
        }
    }

    /// Queue a command for the host. Fails only once the writer is gone.
    pub fn emit(&self, command: HostCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Update the block mirror from a host event.
    pub fn observe(&self, message: &HostMessage) {
        match message {
            HostMessage::BlockPlaced {
                block_type,
                location,
                dimension,
                ..
            } => {
                self.blocks.insert(
                    (mirror_dimension(dimension), block_pos(*location)),
                    BlockType::new(block_type.clone()),
                );
            }
            HostMessage::BlockBroken {
                location,
                dimension,
                ..
            } => {
                self.blocks.insert(
                    (mirror_dimension(dimension), block_pos(*location)),
                    BlockType::air(),
                );
            }
            _ => {}
        }
    }

    /// Wake the session waiting on `request_id`. Returns `false` for
    /// answers nobody is waiting for.
    pub fn resolve_form(&self, request_id: u64, reply: FormReply) -> bool {
        match self.pending_forms.remove(&request_id) {
            Some((_, waiter)) => waiter.send(reply).is_ok(),
            None => {
                tracing::debug!(request_id, "Form answer without a waiting session");
                false
            }
        }
    }

    /// Drop every pending form; waiting sessions end as unavailable.
    pub fn close_forms(&self) {
        self.pending_forms.clear();
    }

    pub fn pending_forms(&self) -> usize {
        self.pending_forms.len()
    }

    async fn ask(&self, actor: &ActorId, form: FormSpec) -> Result<FormReply, FormError> {
        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending_forms.insert(request_id, tx);

        let shown = self.emit(HostCommand::ShowForm {
            request_id,
            actor_id: actor.to_string(),
            form,
        });
        if !shown {
            self.pending_forms.remove(&request_id);
            return Err(FormError::Unavailable);
        }
        tracing::debug!(request_id, actor_id = %actor, "Form shown");
        rx.await.map_err(|_| FormError::Unavailable)
    }
}

impl PresentationPort for HostBridge {
    fn send_text(&self, actor: &ActorId, message: &str) -> Result<(), PresentationError> {
        let command = HostCommand::SendText {
            actor_id: actor.to_string(),
            message: message.to_string(),
        };
        self.emit(command)
            .then_some(())
            .ok_or(PresentationError::Unavailable)
    }

    fn set_persistent_display(
        &self,
        actor: &ActorId,
        message: Option<String>,
    ) -> Result<(), PresentationError> {
        let command = HostCommand::SetActionBar {
            actor_id: actor.to_string(),
            message,
        };
        self.emit(command)
            .then_some(())
            .ok_or(PresentationError::Unavailable)
    }

    fn request_visual_points(
        &self,
        dimension: &DimensionId,
        points: &[WorldPos],
    ) -> Result<(), PresentationError> {
        let command = HostCommand::SpawnVisuals {
            dimension: dimension.to_string(),
            points: points
                .iter()
                .map(|p| WirePos {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                })
                .collect(),
        };
        self.emit(command)
            .then_some(())
            .ok_or(PresentationError::Unavailable)
    }
}

impl WorldPort for HostBridge {
    fn block_at(
        &self,
        dimension: &DimensionId,
        pos: BlockPos,
    ) -> Result<Option<BlockType>, WorldError> {
        if !dimension.is_known() {
            return Err(WorldError::UnknownDimension(dimension.to_string()));
        }
        Ok(self
            .blocks
            .get(&(dimension.clone(), pos))
            .map(|entry| entry.value().clone()))
    }

    fn set_block(
        &self,
        dimension: &DimensionId,
        pos: BlockPos,
        block: &BlockType,
    ) -> Result<(), WorldError> {
        if !dimension.is_known() {
            return Err(WorldError::UnknownDimension(dimension.to_string()));
        }
        let command = HostCommand::SetBlock {
            dimension: dimension.to_string(),
            location: WireBlockPos {
                x: pos.x,
                y: pos.y,
                z: pos.z,
            },
            block_type: block.to_string(),
        };
        if !self.emit(command) {
            return Err(WorldError::Unavailable);
        }
        self.blocks.insert((dimension.clone(), pos), block.clone());
        Ok(())
    }

    fn give_item(&self, actor: &ActorId, item: &ItemDescriptor) -> Result<(), WorldError> {
        let command = HostCommand::GiveItem {
            actor_id: actor.to_string(),
            item_type: item.item_type.to_string(),
            amount: item.amount,
        };
        self.emit(command).then_some(()).ok_or(WorldError::Unavailable)
    }

    fn restore_health(&self, actor: &ActorId) -> Result<(), WorldError> {
        let command = HostCommand::RestoreHealth {
            actor_id: actor.to_string(),
        };
        self.emit(command).then_some(()).ok_or(WorldError::Unavailable)
    }
}

#[async_trait]
impl FormsPort for HostBridge {
    async fn show_selection_menu(
        &self,
        actor: &ActorId,
        menu: SelectionMenu,
    ) -> Result<FormResponse<usize>, FormError> {
        let form = FormSpec::Menu {
            title: menu.title,
            body: menu.body,
            buttons: menu.options,
        };
        match self.ask(actor, form).await? {
            FormReply::Selection { index } => Ok(FormResponse::Submitted(index)),
            FormReply::Cancelled => Ok(FormResponse::Cancelled),
            other => Err(FormError::InvalidResponse(format!(
                "menu answered with {other:?}"
            ))),
        }
    }

    async fn show_toggle_form(
        &self,
        actor: &ActorId,
        form: ToggleForm,
    ) -> Result<FormResponse<Vec<bool>>, FormError> {
        let expected = form.toggles.len();
        let spec = FormSpec::Toggles {
            title: form.title,
            toggles: form
                .toggles
                .into_iter()
                .map(|(label, value)| ToggleField { label, value })
                .collect(),
        };
        match self.ask(actor, spec).await? {
            FormReply::Toggles { values } if values.len() == expected => {
                Ok(FormResponse::Submitted(values))
            }
            FormReply::Cancelled => Ok(FormResponse::Cancelled),
            other => Err(FormError::InvalidResponse(format!(
                "toggle form answered with {other:?}"
            ))),
        }
    }

    async fn show_text_input_form(
        &self,
        actor: &ActorId,
        form: TextInputForm,
    ) -> Result<FormResponse<String>, FormError> {
        let spec = FormSpec::TextInput {
            title: form.title,
            label: form.label,
            placeholder: form.placeholder,
        };
        match self.ask(actor, spec).await? {
            FormReply::Text { value } => Ok(FormResponse::Submitted(value)),
            FormReply::Cancelled => Ok(FormResponse::Cancelled),
            other => Err(FormError::InvalidResponse(format!(
                "text form answered with {other:?}"
            ))),
        }
    }
}

fn mirror_dimension(raw: &Option<String>) -> DimensionId {
    raw.as_deref()
        .map(DimensionId::from)
        .filter(DimensionId::is_known)
        .unwrap_or_default()
}

fn block_pos(pos: WireBlockPos) -> BlockPos {
    BlockPos::new(pos.x, pos.y, pos.z)
}
