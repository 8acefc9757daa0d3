// Client loyalty ledger: per-client point accrual and the tiered discount
// derived from it. The ledger owns every client record; bookings hold
// reference-counted handles into it rather than the records themselves.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

// One loyalty point per this many currency units of room spend.
const SPEND_PER_POINT: f64 = 20.0;
// Each full tier of points buys another discount step, up to the cap.
const POINTS_PER_TIER: u64 = 5000;
const DISCOUNT_STEP_PERCENT: u64 = 5;
const MAX_DISCOUNT_PERCENT: u64 = 75;

#[derive(Debug, Default)]
struct ClientRecord {
    points: u64,
}

// Registry of named clients, keyed by exact name (case-sensitive, no
// normalization). Sharded map, so point accrual takes no ledger-wide lock.
#[derive(Debug, Default)]
pub struct ClientLedger {
    clients: DashMap<String, ClientRecord>,
}

impl ClientLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // An empty name is the anonymous path: no record, no loyalty tracking.
    // Otherwise hands out a handle to the existing record, creating it with
    // zero points on first sight.
    pub fn get_or_create(ledger: &Arc<ClientLedger>, name: &str) -> Option<ClientRef> {
        if name.is_empty() {
            return None;
        }

        ledger.clients.entry(name.to_string()).or_default();
        Some(ClientRef {
            name: name.to_string(),
            ledger: Arc::clone(ledger),
        })
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn points_of(&self, name: &str) -> u64 {
        self.clients.get(name).map(|rec| rec.points).unwrap_or(0)
    }

    fn add_points(&self, name: &str, amount_spent: f64) {
        let earned = (amount_spent / SPEND_PER_POINT) as u64;
        if let Some(mut rec) = self.clients.get_mut(name) {
            rec.points += earned;
            debug!(client = name, earned, total = rec.points, "loyalty points accrued");
        }
    }
}

// Handle to one client record. Cloning the handle never clones the record;
// the ledger keeps ownership for the life of the process.
#[derive(Debug, Clone)]
pub struct ClientRef {
    name: String,
    ledger: Arc<ClientLedger>,
}

impl ClientRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> u64 {
        self.ledger.points_of(&self.name)
    }

    // One point per 20 spent on the room itself; service spend never earns
    // points. Called once per booking, at booking construction.
    pub fn add_points(&self, amount_spent: f64) {
        self.ledger.add_points(&self.name, amount_spent);
    }

    // Every 5000 points buy another 5%, capped at 75% no matter how large
    // the balance grows.
    pub fn discount_percent(&self) -> u32 {
        let tiers = self.points() / POINTS_PER_TIER;
        tiers
            .saturating_mul(DISCOUNT_STEP_PERCENT)
            .min(MAX_DISCOUNT_PERCENT) as u32
    }
}
