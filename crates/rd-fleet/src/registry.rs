//! In-memory vehicle roster.

use rd_core::{Capability, GeoPoint, VehicleId};

use crate::{Vehicle, VehicleSnapshot, VehicleStatus};

/// Dense, append-only collection of vehicles indexed by [`VehicleId`].
///
/// The roster is fixed after startup: vehicles are added while loading and
/// never removed, so ids stay valid for the whole run.
#[derive(Debug, Clone, Default)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an IDLE vehicle at `position` and return its id.
    pub fn add(&mut self, name: impl Into<String>, capability: Capability, position: GeoPoint) -> VehicleId {
        let id = VehicleId(self.vehicles.len() as u32);
        self.vehicles.push(Vehicle::new(id, name, capability, position));
        id
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.index())
    }

    /// Vehicles in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Vehicle> {
        self.vehicles.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.iter().map(|v| v.id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.name == name)
    }

    pub fn count_status(&self, status: VehicleStatus) -> usize {
        self.vehicles.iter().filter(|v| v.status() == status).count()
    }

    /// Read-only view of every vehicle, for renderers.
    pub fn snapshot(&self) -> Vec<VehicleSnapshot> {
        self.vehicles.iter().map(VehicleSnapshot::of).collect()
    }
}
