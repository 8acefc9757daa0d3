// Room inventory: the seeded room catalog, per-room occupancy flags, and the
// occupancy-rate figure the pricing engine snapshots. Rooms are created once
// at seed time; rates are immutable and rooms are never deleted.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// Error types for inventory operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("unknown room: {0}")]
    NotFound(String),

    #[error("room {0} is already occupied")]
    AlreadyOccupied(String),

    #[error("room {0} is already vacant")]
    AlreadyVacant(String),

    #[error("no occupied rooms")]
    NoOccupiedRooms,
}

// Seed loading failures, reported once at startup.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("room seed parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomClass {
    Single,
    Double,
    Suite,
}

impl RoomClass {
    pub fn label(self) -> &'static str {
        match self {
            RoomClass::Single => "Single Room",
            RoomClass::Double => "Double Room",
            RoomClass::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// One room entry as it appears in the JSON seed catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSeed {
    pub id: String,
    pub class: RoomClass,
    pub rate: f64,
}

// Immutable snapshot of one room for listings and booking construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomListing {
    pub id: String,
    pub class: RoomClass,
    pub rate: f64,
}

struct Room {
    class: RoomClass,
    rate: f64,
    occupied: AtomicBool,
}

pub struct RoomInventory {
    rooms: HashMap<String, Room>,
}

// Seed catalog shipped with the binary.
pub const SAMPLE_ROOMS_PATH: &str = "samples/rooms.json";

// A small catalog for inline testing.
pub const SMALL_ROOMS_JSON: &str = r#"[
  { "id": "101", "class": "Single", "rate": 1000.0 },
  { "id": "102", "class": "Double", "rate": 1500.0 }
]"#;

impl RoomInventory {
    pub fn new(seeds: impl IntoIterator<Item = RoomSeed>) -> Self {
        let rooms = seeds
            .into_iter()
            .map(|seed| {
                let room = Room {
                    class: seed.class,
                    rate: seed.rate,
                    occupied: AtomicBool::new(false),
                };
                (seed.id, room)
            })
            .collect();

        Self { rooms }
    }

    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let seeds: Vec<RoomSeed> = serde_json::from_str(json)?;
        Ok(Self::new(seeds))
    }

    // Helper to load the seed catalog shipped under samples/.
    pub fn load_sample_rooms() -> Result<Self, SeedError> {
        Self::from_json(&std::fs::read_to_string(SAMPLE_ROOMS_PATH)?)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    // Vacant rooms only; iteration order is not part of the contract.
    pub fn available_rooms(&self) -> Vec<RoomListing> {
        self.rooms
            .iter()
            .filter(|(_, room)| !room.occupied.load(Ordering::SeqCst))
            .map(|(id, room)| RoomListing {
                id: id.clone(),
                class: room.class,
                rate: room.rate,
            })
            .collect()
    }

    // The release flow's listing; reports NoOccupiedRooms when the hotel is
    // entirely vacant.
    pub fn occupied_rooms(&self) -> Result<Vec<RoomListing>, InventoryError> {
        let occupied: Vec<RoomListing> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.occupied.load(Ordering::SeqCst))
            .map(|(id, room)| RoomListing {
                id: id.clone(),
                class: room.class,
                rate: room.rate,
            })
            .collect();

        if occupied.is_empty() {
            return Err(InventoryError::NoOccupiedRooms);
        }
        Ok(occupied)
    }

    // False for unknown ids as well as occupied rooms.
    pub fn is_available(&self, room_id: &str) -> bool {
        self.rooms
            .get(room_id)
            .map(|room| !room.occupied.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    // Unguarded flag store: callers are expected to have checked
    // availability first. Checking in an occupied room just re-asserts the
    // flag; unknown ids are ignored.
    pub fn check_in(&self, room_id: &str) {
        if let Some(room) = self.rooms.get(room_id) {
            room.occupied.store(true, Ordering::SeqCst);
            debug!(room = room_id, "room checked in");
        }
    }

    pub fn check_out(&self, room_id: &str) {
        if let Some(room) = self.rooms.get(room_id) {
            room.occupied.store(false, Ordering::SeqCst);
            debug!(room = room_id, "room checked out");
        }
    }

    // Guarded variant: the availability check and the flag flip are a single
    // compare-and-swap, so two callers can never both claim the same room.
    pub fn try_check_in(&self, room_id: &str) -> Result<(), InventoryError> {
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| InventoryError::NotFound(room_id.to_string()))?;

        room.occupied
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| InventoryError::AlreadyOccupied(room_id.to_string()))?;
        debug!(room = room_id, "room checked in");
        Ok(())
    }

    pub fn try_check_out(&self, room_id: &str) -> Result<(), InventoryError> {
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| InventoryError::NotFound(room_id.to_string()))?;

        room.occupied
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| InventoryError::AlreadyVacant(room_id.to_string()))?;
        debug!(room = room_id, "room checked out");
        Ok(())
    }

    // Occupied share as a percentage. An empty inventory reads as 0.0 by
    // convention; seeded inventories are never empty.
    pub fn occupancy_rate(&self) -> f64 {
        if self.rooms.is_empty() {
            return 0.0;
        }

        let occupied = self
            .rooms
            .values()
            .filter(|room| room.occupied.load(Ordering::SeqCst))
            .count();
        occupied as f64 / self.rooms.len() as f64 * 100.0
    }

    // The immutable base nightly rate.
    pub fn rate_of(&self, room_id: &str) -> Result<f64, InventoryError> {
        self.rooms
            .get(room_id)
            .map(|room| room.rate)
            .ok_or_else(|| InventoryError::NotFound(room_id.to_string()))
    }

    // Id/class/rate snapshot used to construct bookings.
    pub fn listing(&self, room_id: &str) -> Result<RoomListing, InventoryError> {
        self.rooms
            .get(room_id)
            .map(|room| RoomListing {
                id: room_id.to_string(),
                class: room.class,
                rate: room.rate,
            })
            .ok_or_else(|| InventoryError::NotFound(room_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> RoomInventory {
        RoomInventory::from_json(SMALL_ROOMS_JSON).expect("inline seed parses")
    }

    #[test]
    fn test_small_seed_parses() {
        let inventory = two_rooms();

        assert_eq!(inventory.len(), 2);
        assert!(inventory.is_available("101"));
        assert!(inventory.is_available("102"));
        assert_eq!(inventory.rate_of("101").unwrap(), 1000.0);
        assert_eq!(inventory.rate_of("102").unwrap(), 1500.0);

        let listing = inventory.listing("102").unwrap();
        assert_eq!(listing.class, RoomClass::Double);
    }

    #[test]
    fn test_load_sample_rooms() {
        let inventory = RoomInventory::load_sample_rooms().expect("sample catalog loads");

        assert_eq!(inventory.len(), 13);
        assert_eq!(inventory.available_rooms().len(), 13);
        assert_eq!(inventory.occupancy_rate(), 0.0);
        assert_eq!(inventory.rate_of("503").unwrap(), 4000.0);
    }

    #[test]
    fn test_availability_flips_with_occupancy() {
        let inventory = two_rooms();

        inventory.check_in("101");
        assert!(!inventory.is_available("101"));
        assert!(inventory.is_available("102"));

        inventory.check_out("101");
        assert!(inventory.is_available("101"));
    }

    #[test]
    fn test_check_in_is_idempotent() {
        let inventory = two_rooms();

        inventory.check_in("101");
        inventory.check_in("101");
        assert!(!inventory.is_available("101"));

        inventory.check_out("101");
        assert!(inventory.is_available("101"));
    }

    #[test]
    fn test_unknown_rooms() {
        let inventory = two_rooms();

        assert!(!inventory.is_available("999"));
        assert_eq!(
            inventory.rate_of("999"),
            Err(InventoryError::NotFound("999".to_string()))
        );

        // Unguarded flips ignore unknown ids entirely.
        inventory.check_in("999");
        assert_eq!(inventory.occupancy_rate(), 0.0);

        assert_eq!(
            inventory.try_check_in("999"),
            Err(InventoryError::NotFound("999".to_string()))
        );
    }

    #[test]
    fn test_try_check_in_rejects_second_claim() {
        let inventory = two_rooms();

        assert_eq!(inventory.try_check_in("101"), Ok(()));
        assert_eq!(
            inventory.try_check_in("101"),
            Err(InventoryError::AlreadyOccupied("101".to_string()))
        );
    }

    #[test]
    fn test_try_check_out_rejects_vacant_room() {
        let inventory = two_rooms();

        assert_eq!(
            inventory.try_check_out("101"),
            Err(InventoryError::AlreadyVacant("101".to_string()))
        );

        inventory.check_in("101");
        assert_eq!(inventory.try_check_out("101"), Ok(()));
        assert!(inventory.is_available("101"));
    }

    #[test]
    fn test_occupancy_rate_is_exact_share() {
        let seeds = (0..4).map(|i| RoomSeed {
            id: format!("r{i}"),
            class: RoomClass::Single,
            rate: 1000.0,
        });
        let inventory = RoomInventory::new(seeds);

        assert_eq!(inventory.occupancy_rate(), 0.0);

        inventory.check_in("r0");
        assert_eq!(inventory.occupancy_rate(), 25.0);

        inventory.check_in("r1");
        inventory.check_in("r2");
        assert_eq!(inventory.occupancy_rate(), 75.0);

        inventory.check_in("r3");
        assert_eq!(inventory.occupancy_rate(), 100.0);
    }

    #[test]
    fn test_empty_inventory_rate_is_zero() {
        let inventory = RoomInventory::new(Vec::new());
        assert_eq!(inventory.occupancy_rate(), 0.0);
    }

    #[test]
    fn test_occupied_rooms_listing() {
        let inventory = two_rooms();

        assert_eq!(
            inventory.occupied_rooms(),
            Err(InventoryError::NoOccupiedRooms)
        );

        inventory.check_in("102");
        let occupied = inventory.occupied_rooms().unwrap();
        assert_eq!(occupied.len(), 1);
        assert_eq!(occupied[0].id, "102");

        assert_eq!(inventory.available_rooms().len(), 1);
    }
}
