use terraclaim_domain::{ActorId, DimensionId, WorldPos};

/// An actor as last reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedActor {
    pub id: ActorId,
    pub name: String,
    pub dimension: DimensionId,
    pub position: WorldPos,
}

/// Actors connected as of the latest tick, in host order.
#[derive(Debug, Default)]
pub struct ActorRoster {
    actors: Vec<ConnectedActor>,
}

impl ActorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster with the host's latest list.
    pub fn replace(&mut self, actors: Vec<ConnectedActor>) {
        self.actors = actors;
    }

    /// Refresh one actor from an event snapshot.
    pub fn upsert(&mut self, actor: &ConnectedActor) {
        match self.actors.iter_mut().find(|known| known.id == actor.id) {
            Some(known) => *known = actor.clone(),
            None => self.actors.push(actor.clone()),
        }
    }

    pub fn remove(&mut self, id: &ActorId) -> Option<ConnectedActor> {
        let index = self.actors.iter().position(|actor| actor.id == *id)?;
        Some(self.actors.remove(index))
    }

    pub fn get(&self, id: &ActorId) -> Option<&ConnectedActor> {
        self.actors.iter().find(|actor| actor.id == *id)
    }

    pub fn is_connected(&self, id: &ActorId) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive display-name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&ConnectedActor> {
        let wanted = name.to_lowercase();
        self.actors
            .iter()
            .find(|actor| actor.name.to_lowercase() == wanted)
    }

    /// Actors in `dimension` within a horizontal square of `radius` around `origin`.
    pub fn near(
        &self,
        dimension: &DimensionId,
        origin: WorldPos,
        radius: f64,
    ) -> impl Iterator<Item = &ConnectedActor> {
        let dimension = dimension.clone();
        self.actors.iter().filter(move |actor| {
            actor.dimension == dimension && actor.position.horizontal_chebyshev(origin) <= radius
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectedActor> {
        self.actors.iter()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }
}
