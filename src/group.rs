// Group booking: runs the individual booking flow once per slot, keeps the
// slots' room choices from colliding, and settles totals before any room is
// checked in.

use std::collections::HashSet;

use tracing::info;

use crate::booking::{Booking, BookingSummary};
use crate::clients::ClientRef;
use crate::inventory::{InventoryError, RoomInventory};

#[derive(Default)]
pub struct GroupBookingCoordinator {
    bookings: Vec<Booking>,
    claimed: HashSet<String>,
}

// Settled group: per-slot summaries plus the aggregate total, produced as
// the booked rooms are checked in.
#[derive(Debug, Clone)]
pub struct GroupReceipt {
    pub summaries: Vec<BookingSummary>,
    pub total: f64,
}

impl GroupBookingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    // A room claimed by an earlier slot counts as taken even though its
    // inventory flag only flips at finalize.
    pub fn is_room_free(&self, inventory: &RoomInventory, room_id: &str) -> bool {
        !self.claimed.contains(room_id) && inventory.is_available(room_id)
    }

    // Availability is re-checked at selection time, never reserved up
    // front; the second slot asking for the same room is simply rejected.
    // On success the new booking (with the occupancy snapshot of this
    // moment) is returned for service selection.
    pub fn book_slot(
        &mut self,
        inventory: &RoomInventory,
        room_id: &str,
        nights: u32,
        client: Option<ClientRef>,
    ) -> Result<&mut Booking, InventoryError> {
        if self.claimed.contains(room_id) {
            return Err(InventoryError::AlreadyOccupied(room_id.to_string()));
        }

        let booking = Booking::for_room(inventory, room_id, nights, client)?;
        self.claimed.insert(room_id.to_string());
        self.bookings.push(booking);

        let last = self.bookings.len() - 1;
        Ok(&mut self.bookings[last])
    }

    // Aggregate of the slots priced so far; pure, like calculate_total.
    pub fn group_total(&self) -> f64 {
        self.bookings.iter().map(Booking::calculate_total).sum()
    }

    // Totals and summaries are settled before any occupancy flag flips, so
    // every slot is priced at the occupancy it saw when it was constructed.
    pub fn finalize(self, inventory: &RoomInventory) -> GroupReceipt {
        let total = self.group_total();
        let summaries: Vec<BookingSummary> =
            self.bookings.iter().map(Booking::summary).collect();

        for booking in &self.bookings {
            inventory.check_in(booking.room_id());
        }
        info!(slots = summaries.len(), total, "group booking settled");

        GroupReceipt { summaries, total }
    }
}
