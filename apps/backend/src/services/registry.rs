//! Match registry: the set of live matches and the single door through which
//! every intent reaches one.
//!
//! Each match sits behind its own mutex, so intents against one match are
//! applied strictly one at a time while different matches proceed in
//! parallel. A transition is computed from the committed state, committed,
//! and only then fanned out; a rejected intent changes and broadcasts nothing.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::lifecycle::{begin_match, begin_next_round, deal, rematch};
use crate::domain::match_transition::{derive_match_transitions, MatchTransition};
use crate::domain::seats::{self, DisconnectOutcome, JoinReceipt};
use crate::domain::state::{require_seat_of, Phase};
use crate::domain::tricks::{play_card, PlayCardOutcome};
use crate::domain::truco::{accept_truco, decline_truco, request_truco};
use crate::domain::{snapshot, Card, ConnectionId, MatchSnapshot, MatchState, Mode, SeatIndex};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::services::abandonment::{self, AbandonTimer};
use crate::utils::match_code::{generate_match_code, normalize_match_code};
use crate::ws::hub::ConnectionHub;
use crate::ws::protocol::ServerMsg;

const MAX_CODE_ATTEMPTS: usize = 16;

/// Public match identifier (a short Crockford code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MatchId(String);

impl MatchId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MatchId {
    fn from(raw: String) -> Self {
        MatchId(normalize_match_code(&raw))
    }
}

impl From<&str> for MatchId {
    fn from(raw: &str) -> Self {
        MatchId(normalize_match_code(raw))
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Time a match may sit with no connected player before it is removed.
    pub abandon_grace: Duration,
    /// Fixed deal seed for reproducible shuffles; random when `None`.
    pub deal_seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            abandon_grace: Duration::from_secs(60),
            deal_seed: None,
        }
    }
}

/// One row of the lobby listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub mode: Mode,
    pub occupancy: usize,
    pub capacity: usize,
    pub phase: Phase,
}

pub(crate) struct MatchEntry {
    pub(crate) id: MatchId,
    pub(crate) state: MatchState,
    /// Bumped on every committed transition.
    pub(crate) version: u64,
    rng: ChaCha20Rng,
    pub(crate) abandon: Option<AbandonTimer>,
    pub(crate) next_generation: u64,
    /// Set once the match left the registry; late intents see "not found".
    removed: bool,
}

pub struct MatchRegistry {
    me: Weak<MatchRegistry>,
    config: RegistryConfig,
    matches: DashMap<MatchId, Arc<Mutex<MatchEntry>>>,
    /// Which match each seated connection belongs to.
    bindings: DashMap<ConnectionId, MatchId>,
    hub: Arc<ConnectionHub>,
}

impl MatchRegistry {
    pub fn new(config: RegistryConfig, hub: Arc<ConnectionHub>) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            config,
            matches: DashMap::new(),
            bindings: DashMap::new(),
            hub,
        })
    }

    pub fn hub(&self) -> &Arc<ConnectionHub> {
        &self.hub
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Match the connection is seated in, if any.
    pub fn match_of(&self, conn: ConnectionId) -> Option<MatchId> {
        self.bindings.get(&conn).map(|id| id.value().clone())
    }

    /// Open a new empty match. It is removed again if nobody takes a seat
    /// within the abandonment grace.
    pub fn create_match(&self, conn: ConnectionId, mode: Mode) -> Result<MatchId, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let id = MatchId::from(generate_match_code());
            let Entry::Vacant(slot) = self.matches.entry(id.clone()) else {
                continue;
            };
            let rng = match self.config.deal_seed {
                Some(seed) => ChaCha20Rng::seed_from_u64(seed),
                None => ChaCha20Rng::from_rng(&mut rand::rng()),
            };
            let entry = Arc::new(Mutex::new(MatchEntry {
                id: id.clone(),
                state: MatchState::new(mode),
                version: 0,
                rng,
                abandon: None,
                next_generation: 0,
                removed: false,
            }));
            slot.insert(entry.clone());

            self.sync_abandonment(&mut entry.lock());
            info!(match_id = %id, conn_id = %conn, ?mode, "[REGISTRY] match created");
            return Ok(id);
        }
        Err(AppError::internal("Could not allocate a free match code"))
    }

    pub fn join(
        &self,
        conn: ConnectionId,
        id: &MatchId,
        display_name: &str,
    ) -> Result<JoinReceipt, AppError> {
        self.require_unbound(conn)?;
        let receipt = self.apply(id, conn, "join", |state, _| seats::join(state, conn, display_name))?;
        self.bindings.insert(conn, id.clone());
        info!(match_id = %id, conn_id = %conn, seat = receipt.seat, "[REGISTRY] seat taken");
        Ok(receipt)
    }

    /// Permanent departure. An active match goes back to the lobby; an empty
    /// match is removed.
    pub fn leave(&self, conn: ConnectionId, id: &MatchId) -> Result<SeatIndex, AppError> {
        let seat = self.apply(id, conn, "leave", |state, _| seats::leave(state, conn))?;
        self.bindings.remove_if(&conn, |_, bound| bound == id);
        info!(match_id = %id, conn_id = %conn, seat, "[REGISTRY] seat vacated");
        Ok(seat)
    }

    pub fn mark_ready(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "mark_ready", |state, _| {
            Ok((seats::mark_ready(state, conn)?, ()))
        })
    }

    /// Start the match and deal the first round as one intent.
    pub fn start_match(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "start_match", |state, rng| {
            require_seat_of(state, conn)?;
            let dealing = begin_match(state)?;
            Ok((deal(&dealing, rng)?, ()))
        })
    }

    pub fn play_card(
        &self,
        conn: ConnectionId,
        id: &MatchId,
        card: Card,
    ) -> Result<PlayCardOutcome, AppError> {
        self.apply(id, conn, "play_card", |state, _| {
            let seat = require_seat_of(state, conn)?;
            play_card(state, seat, card)
        })
    }

    pub fn request_truco(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "request_truco", |state, _| {
            let seat = require_seat_of(state, conn)?;
            Ok((request_truco(state, seat)?, ()))
        })
    }

    pub fn accept_truco(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "accept_truco", |state, _| {
            let seat = require_seat_of(state, conn)?;
            Ok((accept_truco(state, seat)?, ()))
        })
    }

    pub fn decline_truco(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "decline_truco", |state, _| {
            let seat = require_seat_of(state, conn)?;
            Ok((decline_truco(state, seat)?, ()))
        })
    }

    /// Leave `RoundOver` and deal the next round as one intent.
    pub fn start_next_round(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "start_next_round", |state, rng| {
            require_seat_of(state, conn)?;
            let dealing = begin_next_round(state)?;
            Ok((deal(&dealing, rng)?, ()))
        })
    }

    pub fn rematch(&self, conn: ConnectionId, id: &MatchId) -> Result<(), AppError> {
        self.apply(id, conn, "rematch", |state, _| {
            require_seat_of(state, conn)?;
            Ok((rematch(state)?, ()))
        })
    }

    /// Bind `conn` to the disconnected seat named `display_name`.
    pub fn reconnect(
        &self,
        conn: ConnectionId,
        id: &MatchId,
        display_name: &str,
        token: Option<Uuid>,
    ) -> Result<SeatIndex, AppError> {
        self.require_unbound(conn)?;
        let seat = self.apply(id, conn, "reconnect", |state, _| {
            seats::reconnect(state, conn, display_name, token)
        })?;
        self.bindings.insert(conn, id.clone());
        info!(match_id = %id, conn_id = %conn, seat, "[REGISTRY] seat reconnected");
        Ok(seat)
    }

    /// Transport loss. Never an error: a connection that held no seat is
    /// simply forgotten.
    pub fn disconnect(&self, conn: ConnectionId) -> Option<(MatchId, DisconnectOutcome)> {
        let (_, id) = self.bindings.remove(&conn)?;
        match self.apply(&id, conn, "disconnect", |state, _| seats::disconnect(state, conn)) {
            Ok(outcome) => {
                info!(match_id = %id, conn_id = %conn, ?outcome, "[REGISTRY] connection lost");
                Some((id, outcome))
            }
            Err(err) => {
                debug!(match_id = %id, conn_id = %conn, error = %err, "[REGISTRY] disconnect ignored");
                None
            }
        }
    }

    /// Lobby listing, ordered by match id.
    pub fn list_matches(&self) -> Vec<MatchSummary> {
        let entries: Vec<Arc<Mutex<MatchEntry>>> =
            self.matches.iter().map(|e| e.value().clone()).collect();
        let mut rows: Vec<MatchSummary> = entries
            .iter()
            .filter_map(|entry| {
                let entry = entry.lock();
                (!entry.removed).then(|| MatchSummary {
                    match_id: entry.id.clone(),
                    mode: entry.state.mode,
                    occupancy: entry.state.occupancy(),
                    capacity: entry.state.seat_count(),
                    phase: entry.state.phase,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.match_id.cmp(&b.match_id));
        rows
    }

    /// Latest committed snapshot and its version, with every hand visible.
    /// Connections only ever receive `MatchSnapshot::for_viewer` of it.
    pub fn snapshot(&self, id: &MatchId) -> Result<(u64, MatchSnapshot), AppError> {
        let entry = self.lookup(id)?;
        let entry = entry.lock();
        if entry.removed {
            return Err(match_not_found(id));
        }
        Ok((entry.version, snapshot(&entry.state)))
    }

    fn lookup(&self, id: &MatchId) -> Result<Arc<Mutex<MatchEntry>>, AppError> {
        self.matches
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| match_not_found(id))
    }

    fn require_unbound(&self, conn: ConnectionId) -> Result<(), AppError> {
        match self.match_of(conn) {
            Some(bound) => Err(AppError::from(DomainError::conflict(
                ConflictKind::AlreadySeated,
                format!("Connection already holds a seat in match {bound}"),
            ))),
            None => Ok(()),
        }
    }

    /// Run one transition against the committed state of `id`, then commit
    /// and fan out. The match mutex is held throughout, which serializes
    /// intents per match and keeps broadcasts in commit order.
    fn apply<T>(
        &self,
        id: &MatchId,
        conn: ConnectionId,
        intent: &'static str,
        transition: impl FnOnce(&MatchState, &mut ChaCha20Rng) -> Result<(MatchState, T), DomainError>,
    ) -> Result<T, AppError> {
        let entry = self.lookup(id)?;
        let mut guard = entry.lock();
        if guard.removed {
            return Err(match_not_found(id));
        }

        let current = &mut *guard;
        let (next, out) = match transition(&current.state, &mut current.rng) {
            Ok(result) => result,
            Err(err) => {
                debug!(
                    match_id = %id,
                    conn_id = %conn,
                    intent,
                    error = %err,
                    "[REGISTRY] intent rejected"
                );
                return Err(err.into());
            }
        };

        self.commit(current, next);
        Ok(out)
    }

    fn commit(&self, entry: &mut MatchEntry, next: MatchState) {
        let before = std::mem::replace(&mut entry.state, next);
        entry.version += 1;

        let transitions = derive_match_transitions(&before, &entry.state);
        for transition in &transitions {
            log_transition(&entry.id, entry.version, transition);
        }

        if entry.state.occupancy() == 0 {
            self.remove_locked(entry, "empty");
            return;
        }
        self.sync_abandonment(entry);
        self.broadcast(entry, &transitions);
    }

    fn broadcast(&self, entry: &MatchEntry, transitions: &[MatchTransition]) {
        let snap = snapshot(&entry.state);
        for (seat, occupant) in entry.state.occupied() {
            if !occupant.connected {
                continue;
            }
            self.hub.send(
                occupant.conn,
                ServerMsg::MatchState {
                    match_id: entry.id.clone(),
                    version: entry.version,
                    viewer_seat: Some(seat),
                    state: snap.for_viewer(Some(seat)),
                },
            );
        }

        for transition in transitions {
            let MatchTransition::TurnBecame { seat } = transition else {
                continue;
            };
            if let Some(occupant) = entry.state.seat(*seat).filter(|s| s.connected) {
                self.hub.send(
                    occupant.conn,
                    ServerMsg::YourTurn {
                        match_id: entry.id.clone(),
                        version: entry.version,
                    },
                );
            }
        }
    }

    /// Arm the abandonment timer when nobody is connected, disarm it as soon
    /// as someone is. Called with the match mutex held.
    fn sync_abandonment(&self, entry: &mut MatchEntry) {
        let unattended = !entry.state.occupied().any(|(_, seat)| seat.connected);
        match (unattended, entry.abandon.is_some()) {
            (true, false) => {
                entry.next_generation += 1;
                let generation = entry.next_generation;
                let timer = abandonment::arm(
                    self.me.clone(),
                    entry.id.clone(),
                    generation,
                    self.config.abandon_grace,
                );
                if timer.is_some() {
                    info!(
                        match_id = %entry.id,
                        generation,
                        grace_secs = self.config.abandon_grace.as_secs(),
                        "[REGISTRY] abandonment armed"
                    );
                }
                entry.abandon = timer;
            }
            (false, true) => {
                if let Some(timer) = entry.abandon.take() {
                    timer.cancel();
                    info!(
                        match_id = %entry.id,
                        generation = timer.generation,
                        "[REGISTRY] abandonment cancelled"
                    );
                }
            }
            _ => {}
        }
    }

    /// Timer callback. Removes the match only if the timer that fired is still
    /// the armed one and the match is still unattended; a reconnect that
    /// committed first has already disarmed it.
    pub(crate) fn expire_abandoned(&self, id: &MatchId, generation: u64) -> bool {
        let Ok(entry) = self.lookup(id) else {
            return false;
        };
        let mut entry = entry.lock();
        let armed = entry.abandon.as_ref().map(|t| t.generation);
        let unattended = !entry.state.occupied().any(|(_, seat)| seat.connected);
        if entry.removed || armed != Some(generation) || !unattended {
            debug!(match_id = %id, generation, "[REGISTRY] stale abandonment timer");
            return false;
        }
        entry.abandon = None;
        self.remove_locked(&mut entry, "abandoned");
        true
    }

    fn remove_locked(&self, entry: &mut MatchEntry, reason: &'static str) {
        entry.removed = true;
        if let Some(timer) = entry.abandon.take() {
            timer.cancel();
        }
        self.matches.remove(&entry.id);
        for (_, occupant) in entry.state.occupied() {
            self.bindings.remove_if(&occupant.conn, |_, bound| *bound == entry.id);
        }
        info!(match_id = %entry.id, reason, "[REGISTRY] match removed");
    }
}

fn match_not_found(id: &MatchId) -> AppError {
    AppError::not_found(ErrorCode::MatchNotFound, format!("No match {id}"))
}

fn log_transition(id: &MatchId, version: u64, transition: &MatchTransition) {
    match transition {
        MatchTransition::TurnBecame { seat } => {
            debug!(match_id = %id, version, seat, "[REGISTRY] turn moved")
        }
        MatchTransition::MatchStarted => info!(match_id = %id, version, "[REGISTRY] match started"),
        MatchTransition::RoundEnded { round_no, winner } => {
            info!(match_id = %id, version, round_no, ?winner, "[REGISTRY] round ended")
        }
        MatchTransition::GameEnded { winner } => {
            info!(match_id = %id, version, ?winner, "[REGISTRY] game over")
        }
        MatchTransition::ReturnedToLobby => {
            info!(match_id = %id, version, "[REGISTRY] back to lobby")
        }
        MatchTransition::AllDisconnected => {
            warn!(match_id = %id, version, "[REGISTRY] every player disconnected")
        }
        MatchTransition::SomeoneReconnected => {
            info!(match_id = %id, version, "[REGISTRY] player back after full disconnect")
        }
    }
}
