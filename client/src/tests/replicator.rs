use std::time::Duration;

use vitals_shared::{DeltaBroadcastRequest, Message, Role};

use crate::AttributeReplicator;

use super::mocks::*;

const ENTITY: u32 = 0xbeef;

struct Host {
    replicator: AttributeReplicator,
    sim: MockSimulation,
    peer: MockPeer,
}

impl Host {
    fn new(role: Role) -> Self {
        let schema = test_schema();
        let mut sim = MockSimulation::new();
        sim.spawn(ENTITY, schema.supported_indices(), 100.0);
        sim.set_base_max(ENTITY, HEALTH, 100.0);

        let mut replicator = AttributeReplicator::new(schema);
        replicator
            .on_entity_registered(ENTITY, role, &sim)
            .unwrap();

        Self {
            replicator,
            sim,
            peer: MockPeer::new(),
        }
    }

    fn tick(&mut self) {
        self.replicator
            .on_update(Duration::from_secs(1), &self.sim, &mut self.peer);
    }
}

#[test]
fn owner_diff_applies_on_the_mirror() {
    let mut owner = Host::new(Role::LocallyOwned);
    let mut mirror = Host::new(Role::RemotelyMirrored);

    owner.sim.set_base(ENTITY, STRENGTH, 110.0);
    owner.sim.set_base(ENTITY, STAMINA, 60.0);
    owner.tick();

    for message in owner.peer.take_sent() {
        mirror.replicator.receive(&message, &mut mirror.sim);
    }

    assert_eq!(mirror.sim.effective(ENTITY, STRENGTH), 110.0);
    assert_eq!(mirror.sim.effective(ENTITY, STAMINA), 60.0);
}

#[test]
fn max_value_change_reaches_the_mirror() {
    let mut owner = Host::new(Role::LocallyOwned);
    let mut mirror = Host::new(Role::RemotelyMirrored);

    owner.sim.set_base_max(ENTITY, HEALTH, 150.0);
    owner.tick();

    for message in owner.peer.take_sent() {
        mirror.replicator.receive(&message, &mut mirror.sim);
    }

    assert_eq!(
        mirror.sim.writes,
        vec![AppliedWrite::Force {
            entity: ENTITY,
            index: HEALTH,
            delta: 50.0
        }]
    );
}

#[test]
fn event_delta_round_trip_decouples_from_the_snapshot() {
    // Owner takes a hit; its request is (conceptually) relayed by the
    // server as a notify that the mirror applies against its live value,
    // even though the mirror's snapshot still shows the baseline.
    let mut owner = Host::new(Role::LocallyOwned);
    let mut mirror = Host::new(Role::RemotelyMirrored);

    owner
        .replicator
        .on_attribute_event(ENTITY, -20.0, &mut owner.peer)
        .unwrap();

    let mut sent = owner.peer.take_sent();
    assert_eq!(sent.len(), 1);
    let Message::DeltaBroadcastRequest(DeltaBroadcastRequest { entity_id, delta }) =
        sent.remove(0)
    else {
        panic!("expected DeltaBroadcastRequest");
    };

    let notify = Message::DeltaBroadcastNotify(vitals_shared::DeltaBroadcastNotify {
        entity_id,
        delta,
    });
    mirror.replicator.receive(&notify, &mut mirror.sim);

    assert_eq!(mirror.sim.effective(ENTITY, HEALTH), 80.0);
    assert_eq!(
        mirror.replicator.store().get(ENTITY).unwrap().value(HEALTH),
        Some(100.0)
    );
}

#[test]
fn inbound_request_is_dropped_by_the_client() {
    let mut mirror = Host::new(Role::RemotelyMirrored);

    let request = Message::DeltaBroadcastRequest(DeltaBroadcastRequest {
        entity_id: ENTITY,
        delta: -20.0,
    });
    mirror.replicator.receive(&request, &mut mirror.sim);

    assert!(mirror.sim.writes.is_empty());
}

#[test]
fn disconnect_resets_tracking() {
    let mut owner = Host::new(Role::LocallyOwned);

    owner.replicator.on_disconnected();
    assert!(owner.replicator.store().is_empty());

    // Post-disconnect ticks are silent even though live values moved.
    owner.sim.set_base(ENTITY, SPEED, 95.0);
    owner.tick();
    assert!(owner.peer.sent.is_empty());
}
