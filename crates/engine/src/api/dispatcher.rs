//! Host message dispatch.
//!
//! Converts wire messages into engine calls, one at a time, and is the only
//! place engine errors are logged and absorbed. Nothing returned from here
//! can fail the host's tick.

use terraclaim_domain::{
    ActorId, BlockPos, BlockType, DimensionId, EntityType, ItemType, RegionId, WorldPos,
};
use terraclaim_shared::{ActorSnapshot, FormReply, HostMessage, TargetBlock, WireBlockPos, WirePos};

use crate::app::{TerritoryService, TickReport};
use crate::infrastructure::TerritoryError;
use crate::stores::ConnectedActor;
use crate::use_cases::{
    BreakInput, InspectInput, InspectOutcome, InspectTarget, PlacementInput, SettingsCommand,
    SettingsRequest,
};

/// What the caller has to do after a message was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// Nothing left to do.
    Handled,
    /// Answer a cancelable event.
    Verdict { event_id: u64, cancel: bool },
    /// Run the settings forms for this request.
    OpenSettings(SettingsRequest),
    /// Hand a form answer to whoever is waiting on it.
    FormAnswer { request_id: u64, reply: FormReply },
    Ignored,
}

pub struct Dispatcher {
    service: TerritoryService,
}

impl Dispatcher {
    pub fn new(service: TerritoryService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &TerritoryService {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut TerritoryService {
        &mut self.service
    }

    pub fn handle(&mut self, message: HostMessage) -> Dispatched {
        let dispatched = match message {
            HostMessage::BlockPlaced {
                actor,
                block_type,
                location,
                dimension,
            } => {
                let outcome = self.service.on_block_placed(PlacementInput {
                    actor: connected(actor),
                    block: BlockType::new(block_type),
                    pos: block_pos(location),
                    dimension: resolve_dimension(dimension),
                });
                tracing::debug!(?outcome, "Block placement handled");
                Dispatched::Handled
            }
            HostMessage::BlockBroken {
                actor,
                broken_type,
                location,
                dimension,
            } => {
                let outcome = self.service.on_block_broken(BreakInput {
                    actor: connected(actor),
                    broken: BlockType::new(broken_type),
                    pos: block_pos(location),
                    dimension: resolve_dimension(dimension),
                });
                tracing::debug!(?outcome, "Block break handled");
                Dispatched::Handled
            }
            HostMessage::Explosion {
                event_id,
                origin,
                dimension,
            } => {
                let cancel = self
                    .service
                    .on_explosion(world_pos(origin), &resolve_dimension(dimension));
                Dispatched::Verdict { event_id, cancel }
            }
            HostMessage::EntityInteraction {
                event_id,
                actor,
                target_type,
                target_position,
            } => {
                let actor = connected(actor);
                let cancel = self.service.on_entity_interaction(
                    &actor,
                    &EntityType::new(target_type),
                    target_position.map(world_pos),
                );
                Dispatched::Verdict { event_id, cancel }
            }
            HostMessage::BlockInteraction {
                event_id,
                actor,
                block_type,
                location,
                dimension,
            } => {
                let actor = connected(actor);
                let cancel = self.service.on_block_interaction(
                    &actor,
                    &BlockType::new(block_type),
                    block_pos(location),
                    &resolve_dimension(dimension),
                );
                Dispatched::Verdict { event_id, cancel }
            }
            HostMessage::EntityDamaged {
                damager,
                victim,
                amount,
            } => {
                let attacker = damager.map(connected);
                let victim = connected(victim);
                if let Err(e) = self
                    .service
                    .on_entity_damaged(attacker.as_ref(), &victim, amount)
                {
                    log_absorbed("entity_damaged", &e);
                }
                Dispatched::Handled
            }
            HostMessage::ItemUsed {
                actor,
                item_type,
                target,
            } => {
                let outcome = self.service.on_item_used(InspectInput {
                    actor: connected(actor),
                    item: ItemType::new(item_type),
                    target: target.map(inspect_target),
                });
                match outcome {
                    InspectOutcome::OpenSettings(request) => Dispatched::OpenSettings(request),
                    InspectOutcome::Ignored => Dispatched::Ignored,
                    _ => Dispatched::Handled,
                }
            }
            HostMessage::ActorDisconnected { actor_id } => {
                self.service.on_actor_disconnected(&ActorId::new(actor_id));
                Dispatched::Handled
            }
            HostMessage::WorldReady => {
                self.service.on_world_ready();
                Dispatched::Handled
            }
            HostMessage::Tick { tick, actors } => {
                let roster = actors.into_iter().map(connected).collect();
                let report = self.service.on_tick(tick, roster);
                log_tick(tick, report);
                // The tick already flushed.
                return Dispatched::Handled;
            }
            HostMessage::FormResponse { request_id, reply } => {
                return Dispatched::FormAnswer { request_id, reply };
            }
            HostMessage::Unknown => {
                tracing::debug!("Ignoring unknown host message");
                return Dispatched::Ignored;
            }
        };

        self.flush();
        dispatched
    }

    /// Apply the commands a finished settings session produced.
    pub fn apply_settings(
        &mut self,
        actor: &ActorId,
        region_id: &RegionId,
        commands: Vec<SettingsCommand>,
    ) {
        if commands.is_empty() {
            return;
        }
        if let Err(e) = self.service.apply_settings(actor, region_id, commands) {
            log_absorbed("apply_settings", &e);
        }
        self.flush();
    }

    pub fn shutdown(&mut self) {
        if let Err(e) = self.service.shutdown() {
            log_absorbed("shutdown", &e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.service.flush() {
            log_absorbed("flush", &e);
        }
    }
}

fn log_absorbed(operation: &'static str, error: &TerritoryError) {
    tracing::warn!(operation, kind = error.kind(), error = %error, "Absorbed engine failure");
}

fn log_tick(tick: u64, report: TickReport) {
    if let Some(migration) = &report.loaded {
        tracing::info!(
            tick,
            from_version = ?migration.from_version,
            orphaned_markers = migration.orphaned_markers.len(),
            orphaned_regions = migration.orphaned_regions.len(),
            "Initial load complete"
        );
    }
    if !report.sweep.expired.is_empty() || report.compensations_applied > 0 {
        tracing::debug!(
            tick,
            expired = report.sweep.expired.len(),
            compensations = report.compensations_applied,
            "Tick work done"
        );
    }
    for error in &report.errors {
        log_absorbed("tick", error);
    }
}

/// Unknown partitions fall back to the overworld.
fn resolve_dimension(raw: Option<String>) -> DimensionId {
    let Some(raw) = raw else {
        return DimensionId::overworld();
    };
    let dimension = DimensionId::new(raw);
    if dimension.is_known() {
        return dimension;
    }
    let error = TerritoryError::lookup(format!("unknown dimension {dimension}"));
    tracing::warn!(kind = error.kind(), error = %error, "Falling back to the overworld");
    DimensionId::overworld()
}

fn connected(snapshot: ActorSnapshot) -> ConnectedActor {
    ConnectedActor {
        id: ActorId::new(snapshot.id),
        name: snapshot.name,
        dimension: resolve_dimension(snapshot.dimension),
        position: world_pos(snapshot.position),
    }
}

fn inspect_target(target: TargetBlock) -> InspectTarget {
    InspectTarget {
        block: BlockType::new(target.block_type),
        pos: block_pos(target.location),
        dimension: resolve_dimension(target.dimension),
    }
}

fn world_pos(pos: WirePos) -> WorldPos {
    WorldPos::new(pos.x, pos.y, pos.z)
}

fn block_pos(pos: WireBlockPos) -> BlockPos {
    BlockPos::new(pos.x, pos.y, pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use terraclaim_domain::{ItemDescriptor, ProtectionSettings};

    use crate::app::Ports;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::key_value::InMemoryStore;
    use crate::infrastructure::persistence::REGIONS_KEY;
    use crate::infrastructure::ports::PersistencePort;
    use crate::messages;
    use crate::test_fixtures::{RecordingPresentation, ScriptedForms, ScriptedWorld};

    struct Harness {
        dispatcher: Dispatcher,
        presentation: Arc<RecordingPresentation>,
        world: Arc<ScriptedWorld>,
        store: Arc<InMemoryStore>,
    }

    fn harness() -> Harness {
        let presentation = Arc::new(RecordingPresentation::new());
        let world = Arc::new(ScriptedWorld::new());
        let store = Arc::new(InMemoryStore::new());
        let settings = ProtectionSettings {
            initial_load_delay_ticks: 0,
            ..ProtectionSettings::default()
        };
        let service = TerritoryService::new(
            Ports {
                persistence: store.clone(),
                presentation: presentation.clone(),
                world: world.clone(),
                forms: Arc::new(ScriptedForms::new()),
                clock: Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())),
            },
            settings,
        );
        Harness {
            dispatcher: Dispatcher::new(service),
            presentation,
            world,
            store,
        }
    }

    fn snapshot(id: &str, x: f64, z: f64) -> ActorSnapshot {
        ActorSnapshot {
            id: id.to_string(),
            name: id.to_string(),
            dimension: None,
            position: WirePos { x, y: 64.0, z },
        }
    }

    fn placed(actor: ActorSnapshot, block: &str, x: i32, z: i32) -> HostMessage {
        HostMessage::BlockPlaced {
            actor,
            block_type: block.to_string(),
            location: WireBlockPos { x, y: 64, z },
            dimension: None,
        }
    }

    fn tick(tick: u64) -> HostMessage {
        HostMessage::Tick {
            tick,
            actors: vec![snapshot("alice", 0.0, 0.0), snapshot("bob", 3.0, 3.0)],
        }
    }

    #[test]
    fn intruder_build_is_reverted_until_added_as_member() {
        let mut h = harness();
        let overworld = DimensionId::overworld();
        h.dispatcher.handle(HostMessage::WorldReady);
        h.dispatcher.handle(tick(1));

        h.dispatcher
            .handle(placed(snapshot("alice", 0.0, 0.0), "minecraft:diamond_block", 0, 0));
        let region_id = h.dispatcher.service().state().regions.all()[0].id.clone();

        h.world.put(&overworld, BlockPos::new(3, 64, 3), "minecraft:dirt");
        h.dispatcher
            .handle(placed(snapshot("bob", 3.0, 3.0), "minecraft:dirt", 3, 3));
        assert_eq!(
            h.presentation.texts_for("bob"),
            messages::place_denied("alice")
        );

        h.dispatcher.handle(tick(2));
        assert_eq!(
            h.world.block(&overworld, BlockPos::new(3, 64, 3)),
            Some(BlockType::air())
        );
        assert_eq!(
            h.world.items_given(),
            vec![(
                ActorId::from("bob"),
                ItemDescriptor::single(ItemType::from("minecraft:dirt"))
            )]
        );

        h.dispatcher.apply_settings(
            &ActorId::from("alice"),
            &region_id,
            vec![SettingsCommand::AddMember {
                name: "bob".to_string(),
            }],
        );
        h.dispatcher
            .handle(placed(snapshot("bob", 3.0, 3.0), "minecraft:dirt", 3, 3));
        h.dispatcher.handle(tick(3));

        assert_eq!(h.world.set_blocks().len(), 1);
        assert_eq!(h.world.items_given().len(), 1);
    }

    #[test]
    fn cancelable_events_get_verdicts() {
        let mut h = harness();
        h.dispatcher
            .handle(placed(snapshot("alice", 0.0, 0.0), "minecraft:diamond_block", 0, 0));

        let explosion = h.dispatcher.handle(HostMessage::Explosion {
            event_id: 7,
            origin: WirePos {
                x: 2.0,
                y: 64.0,
                z: 2.0,
            },
            dimension: None,
        });
        let chest = h.dispatcher.handle(HostMessage::BlockInteraction {
            event_id: 8,
            actor: snapshot("bob", 1.0, 1.0),
            block_type: "minecraft:chest".to_string(),
            location: WireBlockPos { x: 1, y: 64, z: 1 },
            dimension: None,
        });
        let outside = h.dispatcher.handle(HostMessage::EntityInteraction {
            event_id: 9,
            actor: snapshot("bob", 40.0, 40.0),
            target_type: "minecraft:villager".to_string(),
            target_position: None,
        });

        assert_eq!(explosion, Dispatched::Verdict { event_id: 7, cancel: true });
        assert_eq!(chest, Dispatched::Verdict { event_id: 8, cancel: true });
        assert_eq!(outside, Dispatched::Verdict { event_id: 9, cancel: false });
    }

    #[test]
    fn unknown_dimension_falls_back_to_overworld() {
        assert_eq!(
            resolve_dimension(Some("custom:moon".to_string())),
            DimensionId::overworld()
        );
        assert_eq!(
            resolve_dimension(Some(DimensionId::NETHER.to_string())),
            DimensionId::new(DimensionId::NETHER)
        );
        assert_eq!(resolve_dimension(None), DimensionId::overworld());
    }

    #[test]
    fn nothing_is_written_before_the_initial_load() {
        let mut h = harness();
        h.dispatcher
            .handle(placed(snapshot("alice", 0.0, 0.0), "minecraft:diamond_block", 0, 0));

        assert_eq!(h.store.get(REGIONS_KEY).unwrap().as_deref(), Some("[]"));

        h.dispatcher.handle(HostMessage::WorldReady);
        h.dispatcher.handle(tick(1));

        let stored = h.store.get(REGIONS_KEY).unwrap().unwrap_or_default();
        assert!(stored.contains("area_1"));
    }

    #[test]
    fn owner_using_book_on_marker_opens_settings() {
        let mut h = harness();
        h.dispatcher
            .handle(placed(snapshot("alice", 0.0, 0.0), "minecraft:diamond_block", 0, 0));

        let dispatched = h.dispatcher.handle(HostMessage::ItemUsed {
            actor: snapshot("alice", 1.0, 1.0),
            item_type: "minecraft:book".to_string(),
            target: Some(TargetBlock {
                block_type: "minecraft:diamond_block".to_string(),
                location: WireBlockPos { x: 0, y: 64, z: 0 },
                dimension: None,
            }),
        });

        let Dispatched::OpenSettings(request) = dispatched else {
            panic!("expected settings, got {dispatched:?}");
        };
        assert_eq!(request.actor, ActorId::from("alice"));
    }

    #[test]
    fn disconnect_forgets_the_actor() {
        let mut h = harness();
        h.dispatcher.handle(tick(1));
        h.dispatcher.handle(HostMessage::ActorDisconnected {
            actor_id: "bob".to_string(),
        });

        assert!(!h
            .dispatcher
            .service()
            .state()
            .roster
            .is_connected(&ActorId::from("bob")));
    }

    #[test]
    fn form_answers_are_passed_back() {
        let mut h = harness();
        let dispatched = h.dispatcher.handle(HostMessage::FormResponse {
            request_id: 4,
            reply: FormReply::Cancelled,
        });
        assert_eq!(
            dispatched,
            Dispatched::FormAnswer {
                request_id: 4,
                reply: FormReply::Cancelled
            }
        );
    }
}
