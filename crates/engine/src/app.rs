//! Application state and composition.
//!
//! [`TerritoryService`] owns every collection the engine works on and is
//! handed to the dispatcher by mutable reference. There is no global state:
//! two services over two stores are fully independent.

use std::sync::Arc;

use terraclaim_domain::{
    ActorId, BlockPos, BlockType, DimensionId, EntityType, ProtectionSettings, RegionId,
    SystemMeta, WorldPos,
};

use crate::infrastructure::persistence::{MigrationReport, TerritoryRepository};
use crate::infrastructure::ports::{
    ClockPort, FormsPort, PersistenceError, PersistencePort, PresentationPort, WorldPort,
};
use crate::infrastructure::TerritoryError;
use crate::stores::{ConnectedActor, TerritoryState};
use crate::use_cases::{
    self, ApplySettings, BreakInput, BreakOutcome, CombatOutcome, InspectInput, InspectOutcome,
    Notices, PlacementInput, PlacementOutcome, SettingsCommand, SettingsSession, SweepReport,
    TerritoryNotifier, UseCases,
};

/// External collaborators the service is built over.
pub struct Ports {
    pub persistence: Arc<dyn PersistencePort>,
    pub presentation: Arc<dyn PresentationPort>,
    pub world: Arc<dyn WorldPort>,
    pub forms: Arc<dyn FormsPort>,
    pub clock: Arc<dyn ClockPort>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// Waiting for the host to report the world ready.
    Waiting,
    Due(u64),
    Loaded,
}

/// What one tick did. Errors were absorbed; the caller logs them.
#[derive(Debug, Default)]
pub struct TickReport {
    pub compensations_applied: usize,
    pub loaded: Option<MigrationReport>,
    pub sweep: SweepReport,
    pub errors: Vec<TerritoryError>,
}

pub struct TerritoryService {
    settings: Arc<ProtectionSettings>,
    state: TerritoryState,
    meta: SystemMeta,
    load: LoadState,
    repository: Arc<TerritoryRepository>,
    use_cases: UseCases,
    notifier: TerritoryNotifier,
    session: Arc<SettingsSession>,
}

impl TerritoryService {
    /// Wire the use cases and prepare storage. A storage failure here is
    /// logged and the service starts with an empty state.
    pub fn new(ports: Ports, settings: ProtectionSettings) -> Self {
        let settings = Arc::new(settings);
        let notices = Notices::new(ports.presentation.clone());
        let repository = Arc::new(TerritoryRepository::new(
            ports.persistence.clone(),
            ports.clock.clone(),
        ));

        let next_region_id = match repository.bootstrap() {
            Ok(counter) => counter,
            Err(e) => {
                let e = TerritoryError::from(e);
                tracing::warn!(error = %e, kind = e.kind(), "Storage bootstrap failed");
                1
            }
        };

        let use_cases = UseCases {
            claim: use_cases::ClaimUseCases::new(
                use_cases::PlaceBlock::new(settings.clone(), notices.clone()),
                use_cases::BreakBlock::new(settings.clone(), notices.clone()),
            ),
            protection: use_cases::ProtectionUseCases::new(
                use_cases::InteractionGuard::new(settings.clone(), notices.clone()),
                use_cases::ExplosionGuard::new(settings.clone(), notices.clone()),
                use_cases::CombatGuard::new(ports.world.clone(), notices.clone()),
            ),
            lifecycle: use_cases::LifecycleUseCases::new(
                use_cases::CompensationRunner::new(
                    ports.world.clone(),
                    settings.clone(),
                    notices.clone(),
                ),
                use_cases::InitialLoad::new(repository.clone(), settings.clone()),
                use_cases::LifecycleSweep::new(settings.clone(), notices.clone()),
            ),
            inspect: use_cases::InspectClaim::new(settings.clone(), notices.clone()),
            apply_settings: ApplySettings::new(notices.clone()),
        };

        let notifier =
            TerritoryNotifier::new(notices.clone(), settings.notification_interval_ticks);
        let session = Arc::new(SettingsSession::new(ports.forms, notices));

        Self {
            settings,
            state: TerritoryState::new(next_region_id),
            meta: SystemMeta {
                next_region_id,
                ..SystemMeta::default()
            },
            load: LoadState::Waiting,
            repository,
            use_cases,
            notifier,
            session,
        }
    }

    pub fn settings(&self) -> &ProtectionSettings {
        &self.settings
    }

    pub fn state(&self) -> &TerritoryState {
        &self.state
    }

    pub fn meta(&self) -> &SystemMeta {
        &self.meta
    }

    pub fn is_loaded(&self) -> bool {
        self.load == LoadState::Loaded
    }

    /// Form flow for settings requests; safe to run off the event loop.
    pub fn settings_session(&self) -> Arc<SettingsSession> {
        self.session.clone()
    }

    // =========================================================================
    // Host events
    // =========================================================================

    pub fn on_block_placed(&mut self, input: PlacementInput) -> PlacementOutcome {
        self.state.roster.upsert(&input.actor);
        self.use_cases.claim.place.execute(&mut self.state, input)
    }

    pub fn on_block_broken(&mut self, input: BreakInput) -> BreakOutcome {
        self.state.roster.upsert(&input.actor);
        self.use_cases
            .claim
            .break_block
            .execute(&mut self.state, input)
    }

    /// Returns `true` when the explosion must be cancelled.
    pub fn on_explosion(&mut self, origin: WorldPos, dimension: &DimensionId) -> bool {
        self.use_cases
            .protection
            .explosion
            .execute(&self.state, origin, dimension)
    }

    /// Returns `true` when the interaction must be cancelled.
    pub fn on_entity_interaction(
        &mut self,
        actor: &ConnectedActor,
        target: &EntityType,
        target_pos: Option<WorldPos>,
    ) -> bool {
        self.state.roster.upsert(actor);
        self.use_cases
            .protection
            .interaction
            .entity(&self.state, actor, target, target_pos)
    }

    /// Returns `true` when the interaction must be cancelled.
    pub fn on_block_interaction(
        &mut self,
        actor: &ConnectedActor,
        block: &BlockType,
        pos: BlockPos,
        dimension: &DimensionId,
    ) -> bool {
        self.state.roster.upsert(actor);
        self.use_cases
            .protection
            .interaction
            .block(&self.state, actor, block, pos, dimension)
    }

    pub fn on_entity_damaged(
        &mut self,
        attacker: Option<&ConnectedActor>,
        victim: &ConnectedActor,
        amount: f64,
    ) -> Result<CombatOutcome, TerritoryError> {
        self.use_cases
            .protection
            .combat
            .execute(&self.state, attacker, victim, amount)
    }

    pub fn on_item_used(&mut self, input: InspectInput) -> InspectOutcome {
        self.state.roster.upsert(&input.actor);
        self.use_cases.inspect.execute(&self.state, input)
    }

    pub fn on_actor_disconnected(&mut self, actor: &ActorId) {
        self.notifier.forget(actor);
        self.state.roster.remove(actor);
        tracing::debug!(actor_id = %actor, "Actor disconnected");
    }

    /// Schedule the initial load. Repeated signals do not reschedule it.
    pub fn on_world_ready(&mut self) {
        if self.load == LoadState::Waiting {
            let due = self.state.current_tick + self.settings.initial_load_delay_ticks;
            self.load = LoadState::Due(due);
            tracing::info!(due_tick = due, "World ready, initial load scheduled");
        }
    }

    /// One host tick: deferred compensations, the initial load when due,
    /// the sweep, a flush of whatever changed, then boundary notifications.
    pub fn on_tick(&mut self, tick: u64, actors: Vec<ConnectedActor>) -> TickReport {
        let mut report = TickReport::default();
        self.state.current_tick = tick;
        self.state.roster.replace(actors);

        report.compensations_applied = self
            .use_cases
            .lifecycle
            .compensation
            .drain_due(&mut self.state);

        if let LoadState::Due(due) = self.load {
            if tick >= due {
                match self.load_now() {
                    Ok(migration) => report.loaded = Some(migration),
                    Err(e) => {
                        let retry = tick + self.settings.initial_load_delay_ticks.max(1);
                        self.load = LoadState::Due(retry);
                        report.errors.push(e);
                    }
                }
            }
        }

        report.sweep = self.use_cases.lifecycle.sweep.execute(&mut self.state);

        if let Err(e) = self.flush() {
            report.errors.push(e);
        }

        for actor in self.state.roster.iter() {
            let region = self
                .state
                .regions
                .find_containing(&actor.dimension, actor.position);
            self.notifier.update(&actor.id, region, tick);
        }

        report
    }

    /// Apply the outcome of a finished settings session.
    pub fn apply_settings(
        &mut self,
        actor: &ActorId,
        region_id: &RegionId,
        commands: Vec<SettingsCommand>,
    ) -> Result<(), TerritoryError> {
        self.use_cases
            .apply_settings
            .execute(&mut self.state, actor, region_id, commands)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Save every dirty document. Nothing is written before the initial
    /// load, so stored claims are never overwritten by a partial session.
    /// A failed document stays dirty and is retried on the next flush.
    pub fn flush(&mut self) -> Result<(), TerritoryError> {
        if !self.is_loaded() {
            return Ok(());
        }
        self.save(false)
    }

    /// Save everything and drop transient state.
    pub fn shutdown(&mut self) -> Result<(), TerritoryError> {
        if !self.is_loaded() {
            self.load_now()?;
        }
        let result = self.save(true);
        self.notifier.clear();
        self.state.roster.clear();
        self.state.deferred.clear();
        tracing::info!(
            regions = self.state.regions.len(),
            markers = self.state.markers.len(),
            "Territory service shut down"
        );
        result
    }

    fn load_now(&mut self) -> Result<MigrationReport, TerritoryError> {
        let report = self
            .use_cases
            .lifecycle
            .initial_load
            .execute(&mut self.state, &mut self.meta)?;
        self.load = LoadState::Loaded;
        Ok(report)
    }

    fn save(&mut self, force: bool) -> Result<(), TerritoryError> {
        let mut first_error: Option<TerritoryError> = None;
        let mut saved_any = false;
        let mut record = |result: Result<(), PersistenceError>, document: &'static str| -> bool {
            match result {
                Ok(()) => true,
                Err(e) => {
                    let e = TerritoryError::from(e);
                    tracing::warn!(document, error = %e, kind = e.kind(), "Save failed");
                    first_error.get_or_insert(e);
                    false
                }
            }
        };

        if force || self.state.regions.is_dirty() {
            if record(self.repository.save_regions(self.state.regions.all()), "regions") {
                self.state.regions.mark_clean();
                saved_any = true;
            }
        }
        if force || self.state.markers.is_dirty() {
            if record(self.repository.save_markers(self.state.markers.all()), "markers") {
                self.state.markers.mark_clean();
                saved_any = true;
            }
        }
        if force || self.state.owner_stats.is_dirty() {
            if record(
                self.repository.save_owner_stats(self.state.owner_stats.all()),
                "owner_stats",
            ) {
                self.state.owner_stats.mark_clean();
                saved_any = true;
            }
        }
        if force || saved_any {
            self.meta.region_count = self.state.regions.len() as u64;
            self.meta.marker_count = self.state.markers.len() as u64;
            self.meta.next_region_id = self.state.regions.next_id();
            record(
                self.repository
                    .save_meta(&mut self.meta, self.state.current_tick),
                "system",
            );
            tracing::debug!(tick = self.state.current_tick, "Territory state saved");
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;
    use terraclaim_domain::BlockType;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::key_value::InMemoryStore;
    use crate::infrastructure::persistence::{OWNER_STATS_KEY, REGIONS_KEY, SYSTEM_KEY};
    use crate::infrastructure::ports::MockPersistencePort;
    use crate::test_fixtures::{actor_at, RecordingPresentation, ScriptedForms, ScriptedWorld};

    fn service_over(store: Arc<dyn PersistencePort>) -> TerritoryService {
        TerritoryService::new(
            Ports {
                persistence: store,
                presentation: Arc::new(RecordingPresentation::new()),
                world: Arc::new(ScriptedWorld::new()),
                forms: Arc::new(ScriptedForms::new()),
                clock: Arc::new(FixedClock(Utc::now())),
            },
            ProtectionSettings {
                initial_load_delay_ticks: 0,
                ..ProtectionSettings::default()
            },
        )
    }

    fn claim(service: &mut TerritoryService, actor: &str, x: i32) -> PlacementOutcome {
        service.on_block_placed(PlacementInput {
            actor: actor_at(actor, WorldPos::new(f64::from(x), 64.0, 0.0)),
            block: BlockType::from("minecraft:diamond_block"),
            pos: BlockPos::new(x, 64, 0),
            dimension: DimensionId::overworld(),
        })
    }

    #[test]
    fn failed_save_stays_dirty_and_is_retried() {
        let failing = Arc::new(AtomicBool::new(false));
        let saved = Arc::new(Mutex::new(Vec::<String>::new()));
        let mut store = MockPersistencePort::new();
        store.expect_get().returning(|_| Ok(None));
        let (fail, log) = (failing.clone(), saved.clone());
        store.expect_set().returning(move |key, _| {
            if fail.load(Ordering::SeqCst) {
                return Err(PersistenceError::store("set", key, "disk full"));
            }
            log.lock().unwrap().push(key.to_string());
            Ok(())
        });
        let mut service = service_over(Arc::new(store));
        service.on_world_ready();
        assert!(service.on_tick(0, vec![]).errors.is_empty());
        assert!(service.is_loaded());

        failing.store(true, Ordering::SeqCst);
        claim(&mut service, "alice", 0);
        let err = service.flush().expect_err("store is failing");
        assert_eq!(err.kind(), "persistence");
        assert!(service.state().regions.is_dirty());

        failing.store(false, Ordering::SeqCst);
        saved.lock().unwrap().clear();
        service.flush().expect("store recovered");
        assert!(!service.state().regions.is_dirty());
        let saved = saved.lock().unwrap().clone();
        assert!(saved.contains(&REGIONS_KEY.to_string()));
        assert!(saved.contains(&SYSTEM_KEY.to_string()));
    }

    #[test]
    fn failed_initial_load_is_retried() {
        let failing = Arc::new(AtomicBool::new(true));
        let mut store = MockPersistencePort::new();
        let fail = failing.clone();
        store.expect_get().returning(move |key| {
            if fail.load(Ordering::SeqCst) {
                Err(PersistenceError::store("get", key, "unavailable"))
            } else {
                Ok(None)
            }
        });
        store.expect_set().returning(|_, _| Ok(()));
        let mut service = service_over(Arc::new(store));
        service.on_world_ready();

        let report = service.on_tick(1, vec![]);
        assert_eq!(report.errors.len(), 1);
        assert!(!service.is_loaded());

        failing.store(false, Ordering::SeqCst);
        let report = service.on_tick(2, vec![]);
        assert!(report.loaded.is_some());
        assert!(service.is_loaded());
    }

    #[test]
    fn load_waits_for_the_configured_delay() {
        let store = Arc::new(InMemoryStore::new());
        let mut service = TerritoryService::new(
            Ports {
                persistence: store,
                presentation: Arc::new(RecordingPresentation::new()),
                world: Arc::new(ScriptedWorld::new()),
                forms: Arc::new(ScriptedForms::new()),
                clock: Arc::new(FixedClock(Utc::now())),
            },
            ProtectionSettings::default(),
        );
        service.on_tick(5, vec![]);
        service.on_world_ready();
        service.on_world_ready();

        let delay = service.settings().initial_load_delay_ticks;
        assert!(service.on_tick(5 + delay - 1, vec![]).loaded.is_none());
        assert!(service.on_tick(5 + delay, vec![]).loaded.is_some());
    }

    #[test]
    fn shutdown_loads_stored_claims_before_saving() {
        let store = Arc::new(InMemoryStore::with_entries([(
            REGIONS_KEY,
            r#"[{"id":"area_4","center":{"x":0,"y":64,"z":0},"dimensionId":"minecraft:overworld","playerId":"alice","playerName":"alice"}]"#,
        )]));
        let mut service = service_over(store.clone());
        claim(&mut service, "bob", 100);

        service.shutdown().expect("shutdown");

        let stored = store.get(REGIONS_KEY).unwrap().unwrap_or_default();
        assert!(stored.contains("area_4"));
        assert!(stored.contains("area_5"));
        assert_eq!(service.meta().region_count, 2);
        assert_eq!(service.state().roster.iter().count(), 0);
    }

    #[test]
    fn session_claim_colliding_with_stored_id_is_rekeyed_on_load() {
        let backing = Arc::new(InMemoryStore::with_entries([(
            REGIONS_KEY,
            r#"[{"id":"area_1","center":{"x":500,"y":64,"z":500},"dimensionId":"minecraft:overworld","playerId":"alice","playerName":"alice"}]"#,
        )]));
        let bootstrapping = Arc::new(AtomicBool::new(true));
        let mut store = MockPersistencePort::new();
        let (during_bootstrap, reader) = (bootstrapping.clone(), backing.clone());
        store.expect_get().returning(move |key| {
            if during_bootstrap.load(Ordering::SeqCst) {
                return Err(PersistenceError::store("get", key, "unavailable"));
            }
            reader.get(key)
        });
        let writer = backing.clone();
        store.expect_set().returning(move |key, value| writer.set(key, value));

        let mut service = service_over(Arc::new(store));
        bootstrapping.store(false, Ordering::SeqCst);
        let PlacementOutcome::Claimed { region_id, .. } = claim(&mut service, "bob", 0) else {
            panic!("bob should claim");
        };
        assert_eq!(region_id.as_str(), "area_1");

        service.on_world_ready();
        assert!(service.on_tick(0, vec![]).loaded.is_some());

        let state = service.state();
        assert_eq!(state.regions.len(), 2);
        let alice_claim = RegionId::new("area_1");
        assert_eq!(
            state.regions.get(&alice_claim).map(|r| r.owner_id.as_str()),
            Some("alice")
        );
        let bob_claim = state
            .regions
            .find_containing(&DimensionId::overworld(), WorldPos::new(0.0, 64.0, 0.0))
            .map(|r| r.id.clone())
            .expect("bob's spot stays protected");
        assert_ne!(bob_claim, alice_claim);
        let bob_marker = state
            .markers
            .find_at(&DimensionId::overworld(), WorldPos::new(0.0, 64.0, 0.0))
            .expect("bob's marker");
        assert_eq!(bob_marker.region_id.as_ref(), Some(&bob_claim));
        let bob_stats = state.owner_stats.get(&ActorId::from("bob")).expect("bob stats");
        assert_eq!(bob_stats.regions_created, vec![bob_claim.clone()]);

        let outcome = service.on_block_broken(BreakInput {
            actor: actor_at("bob", WorldPos::new(0.0, 64.0, 1.0)),
            broken: BlockType::from("minecraft:diamond_block"),
            pos: BlockPos::new(0, 64, 0),
            dimension: DimensionId::overworld(),
        });
        assert!(
            matches!(&outcome, BreakOutcome::ClaimRemoved { region_id, .. } if *region_id == bob_claim)
        );
        assert!(service.state().regions.get(&alice_claim).is_some());
    }

    #[test]
    fn owner_stats_from_before_the_load_add_to_stored_totals() {
        let store = Arc::new(InMemoryStore::with_entries([(
            OWNER_STATS_KEY,
            r#"{"alice":{"totalAreas":3,"lastActivity":40,"protectionsCreated":["area_7","area_8","area_9"],"stonesPlaced":[]}}"#,
        )]));
        let mut service = TerritoryService::new(
            Ports {
                persistence: store,
                presentation: Arc::new(RecordingPresentation::new()),
                world: Arc::new(ScriptedWorld::new()),
                forms: Arc::new(ScriptedForms::new()),
                clock: Arc::new(FixedClock(Utc::now())),
            },
            ProtectionSettings {
                initial_load_delay_ticks: 1,
                ..ProtectionSettings::default()
            },
        );
        service.on_world_ready();
        claim(&mut service, "alice", 0);

        assert!(service.on_tick(1, vec![]).loaded.is_some());

        let stats = service
            .state()
            .owner_stats
            .get(&ActorId::from("alice"))
            .expect("alice stats");
        assert_eq!(stats.total_regions, 4);
        assert_eq!(stats.regions_created.len(), 4);
        assert_eq!(stats.markers_placed.len(), 1);
    }

    #[test]
    fn tick_notifies_actor_entering_a_claim() {
        let presentation = Arc::new(RecordingPresentation::new());
        let mut service = TerritoryService::new(
            Ports {
                persistence: Arc::new(InMemoryStore::new()),
                presentation: presentation.clone(),
                world: Arc::new(ScriptedWorld::new()),
                forms: Arc::new(ScriptedForms::new()),
                clock: Arc::new(FixedClock(Utc::now())),
            },
            ProtectionSettings::default(),
        );
        claim(&mut service, "alice", 0);

        service.on_tick(1, vec![actor_at("bob", WorldPos::new(2.0, 64.0, 2.0))]);

        assert_eq!(
            presentation.texts_for("bob"),
            crate::messages::welcome_visitor("alice")
        );
        assert_eq!(presentation.displays_for("bob").len(), 1);
    }
}
