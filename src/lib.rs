// Hotel front-desk engine: room inventory and occupancy, client loyalty,
// and booking price computation behind the interactive console shell.

pub mod booking;
pub mod clients;
pub mod group;
pub mod inventory;
pub mod services;

// Re-export key types for convenience
pub use booking::{Booking, BookingSummary};
pub use clients::{ClientLedger, ClientRef};
pub use group::{GroupBookingCoordinator, GroupReceipt};
pub use inventory::{
    InventoryError, RoomClass, RoomInventory, RoomListing, RoomSeed, SeedError,
};
pub use services::{ServiceCatalog, ServiceKind, UnknownService};
