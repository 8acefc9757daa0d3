// Booking engine: one booking prices a room stay from the base-rate and
// occupancy snapshots captured at creation time, plus whatever services and
// discounts were attached before the total is read.

use std::fmt;

use tracing::{debug, info};

use crate::clients::ClientRef;
use crate::inventory::{InventoryError, RoomClass, RoomInventory};
use crate::services::{ServiceCatalog, ServiceKind, UnknownService};

// Each full 10 points of occupancy adds another 5% to the nightly rate.
const OCCUPANCY_BAND_PERCENT: u32 = 10;
const SURCHARGE_PER_BAND: f64 = 0.05;

pub struct Booking {
    room_id: String,
    room_class: RoomClass,
    nights: u32,
    base_rate: f64,
    service_cost: f64,
    manual_discount: f64,
    occupancy_snapshot: f64,
    client: Option<ClientRef>,
}

impl Booking {
    // Base rate and occupancy rate are snapshots: later inventory changes
    // never reprice an existing booking. Nights must be positive; the shell
    // validates its input before calling in. Loyalty accrual for the room
    // spend fires here, once, whether or not the total is ever read.
    pub fn new(
        room_id: impl Into<String>,
        room_class: RoomClass,
        nights: u32,
        base_rate: f64,
        occupancy_snapshot: f64,
        client: Option<ClientRef>,
    ) -> Self {
        let room_id = room_id.into();
        if let Some(client) = &client {
            client.add_points(base_rate * f64::from(nights));
        }
        info!(room = %room_id, nights, occupancy = occupancy_snapshot, "booking created");

        Self {
            room_id,
            room_class,
            nights,
            base_rate,
            service_cost: 0.0,
            manual_discount: 0.0,
            occupancy_snapshot,
            client,
        }
    }

    // Snapshot-taking constructor for the common path: rejects unknown and
    // occupied rooms, then captures class, rate, and occupancy from the
    // inventory as of right now. The booked room stays vacant until the
    // caller checks it in, so the snapshot excludes the booking itself.
    pub fn for_room(
        inventory: &RoomInventory,
        room_id: &str,
        nights: u32,
        client: Option<ClientRef>,
    ) -> Result<Self, InventoryError> {
        let listing = inventory.listing(room_id)?;
        if !inventory.is_available(room_id) {
            return Err(InventoryError::AlreadyOccupied(listing.id));
        }

        Ok(Self::new(
            listing.id,
            listing.class,
            nights,
            listing.rate,
            inventory.occupancy_rate(),
            client,
        ))
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn service_cost(&self) -> f64 {
        self.service_cost
    }

    // Cumulative: the same kind can be added any number of times and each
    // time adds its full price again.
    pub fn add_service(&mut self, catalog: &ServiceCatalog, kind: ServiceKind) {
        let price = catalog.price(kind);
        self.service_cost += price;
        debug!(room = %self.room_id, service = %kind, price, "service added");
    }

    // Raw-code path used by the shell; an unknown code changes nothing.
    pub fn add_service_code(
        &mut self,
        catalog: &ServiceCatalog,
        code: u8,
    ) -> Result<(), UnknownService> {
        let kind = ServiceKind::try_from(code)?;
        self.add_service(catalog, kind);
        Ok(())
    }

    // Overwrites any previously applied manual discount. Values outside
    // 0-100 are clamped so a total can never go negative.
    pub fn apply_discount(&mut self, percent: f64) {
        self.manual_discount = percent.clamp(0.0, 100.0);
    }

    // Pure and repeatable. The surcharge is a step function of the snapshot
    // (every full 10% of occupancy adds 5% to the nightly rate, not a
    // continuous ramp); services are added at face value; the manual
    // discount and then the client's loyalty discount compound on top. The
    // client discount is read from the ledger at call time, so accrual from
    // later bookings shows up in a recomputed total.
    pub fn calculate_total(&self) -> f64 {
        let bands = self.occupancy_snapshot as u32 / OCCUPANCY_BAND_PERCENT;
        let dynamic_rate = self.base_rate * (1.0 + f64::from(bands) * SURCHARGE_PER_BAND);
        let subtotal = dynamic_rate * f64::from(self.nights) + self.service_cost;
        let after_manual = subtotal * (1.0 - self.manual_discount / 100.0);
        let client_discount = self
            .client
            .as_ref()
            .map(|client| client.discount_percent())
            .unwrap_or(0);
        after_manual * (1.0 - f64::from(client_discount) / 100.0)
    }

    // Projection for printing; no state changes.
    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            room_id: self.room_id.clone(),
            room_class: self.room_class,
            nights: self.nights,
            service_cost: self.service_cost,
            total: self.calculate_total(),
            client: self
                .client
                .as_ref()
                .map(|client| (client.name().to_string(), client.points())),
        }
    }
}

// Human-readable booking summary; client name and points appear only for
// named bookings.
#[derive(Debug, Clone)]
pub struct BookingSummary {
    pub room_id: String,
    pub room_class: RoomClass,
    pub nights: u32,
    pub service_cost: f64,
    pub total: f64,
    pub client: Option<(String, u64)>,
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Room: {} ({})", self.room_id, self.room_class)?;
        writeln!(f, "Nights: {}", self.nights)?;
        writeln!(f, "Services: {:.2}", self.service_cost)?;
        write!(f, "Total: {:.2}", self.total)?;
        if let Some((name, points)) = &self.client {
            write!(f, "\nClient: {name}\nLoyalty points: {points}")?;
        }
        Ok(())
    }
}
