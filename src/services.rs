// Add-on service catalog: the fixed price list a guest can attach to a
// booking, including the bundled full-meal rate.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

// Raised for service codes outside the published menu; the caller decides
// whether to skip the selection or re-prompt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown service code: {0}")]
pub struct UnknownService(pub u8);

// Discount applied when the three meals are taken as one bundle.
pub const FULL_MEAL_DISCOUNT: f64 = 0.15;

// Services offered with a booking. Discriminants match the numbered menu the
// shell prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Breakfast = 1,
    Lunch = 2,
    Dinner = 3,
    FullMeal = 4,
    Sauna = 5,
    Pool = 6,
    BathAccessories = 7,
    Laundry = 8,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 8] = [
        ServiceKind::Breakfast,
        ServiceKind::Lunch,
        ServiceKind::Dinner,
        ServiceKind::FullMeal,
        ServiceKind::Sauna,
        ServiceKind::Pool,
        ServiceKind::BathAccessories,
        ServiceKind::Laundry,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceKind::Breakfast => "Breakfast",
            ServiceKind::Lunch => "Lunch",
            ServiceKind::Dinner => "Dinner",
            ServiceKind::FullMeal => "Full meal (15% off)",
            ServiceKind::Sauna => "Sauna",
            ServiceKind::Pool => "Pool",
            ServiceKind::BathAccessories => "Bath accessories",
            ServiceKind::Laundry => "Laundry",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for ServiceKind {
    type Error = UnknownService;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ServiceKind::Breakfast),
            2 => Ok(ServiceKind::Lunch),
            3 => Ok(ServiceKind::Dinner),
            4 => Ok(ServiceKind::FullMeal),
            5 => Ok(ServiceKind::Sauna),
            6 => Ok(ServiceKind::Pool),
            7 => Ok(ServiceKind::BathAccessories),
            8 => Ok(ServiceKind::Laundry),
            other => Err(UnknownService(other)),
        }
    }
}

// Price table keyed by the closed service enum. The table is filled from an
// exhaustive match at construction, so every kind is always priced.
pub struct ServiceCatalog {
    prices: HashMap<ServiceKind, f64>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        let prices = ServiceKind::ALL
            .iter()
            .map(|&kind| {
                let price = match kind {
                    ServiceKind::Breakfast => 300.0,
                    ServiceKind::Lunch => 500.0,
                    ServiceKind::Dinner => 400.0,
                    // The bundle is the three meals at 15% off; selecting it
                    // never also applies the individual meal prices.
                    ServiceKind::FullMeal => {
                        (300.0 + 500.0 + 400.0) * (1.0 - FULL_MEAL_DISCOUNT)
                    }
                    ServiceKind::Sauna => 650.0,
                    ServiceKind::Pool => 700.0,
                    ServiceKind::BathAccessories => 340.0,
                    ServiceKind::Laundry => 1200.0,
                };
                (kind, price)
            })
            .collect();

        Self { prices }
    }

    // Pure lookup; the enum is closed and the table is exhaustive, so every
    // kind has a price.
    pub fn price(&self, kind: ServiceKind) -> f64 {
        self.prices[&kind]
    }

    // Raw-code path for callers holding an unvalidated menu number.
    pub fn price_of_code(&self, code: u8) -> Result<f64, UnknownService> {
        ServiceKind::try_from(code).map(|kind| self.price(kind))
    }

    // Menu rows in code order, for the shell's service listing.
    pub fn menu(&self) -> impl Iterator<Item = (u8, ServiceKind, f64)> + '_ {
        ServiceKind::ALL
            .iter()
            .map(move |&kind| (kind.code(), kind, self.price(kind)))
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 300.0 ; "#1 breakfast")]
    #[test_case(2, 500.0 ; "#2 lunch")]
    #[test_case(3, 400.0 ; "#3 dinner")]
    #[test_case(4, 1020.0 ; "#4 full meal bundle")]
    #[test_case(5, 650.0 ; "#5 sauna")]
    #[test_case(6, 700.0 ; "#6 pool")]
    #[test_case(7, 340.0 ; "#7 bath accessories")]
    #[test_case(8, 1200.0 ; "#8 laundry")]
    fn test_price_of_code(code: u8, expected: f64) {
        let catalog = ServiceCatalog::new();
        assert_eq!(catalog.price_of_code(code).unwrap(), expected);
    }

    #[test]
    fn test_full_meal_is_discounted_meal_sum() {
        let catalog = ServiceCatalog::new();
        let bundle = catalog.price(ServiceKind::FullMeal);

        // The bundle price is the discounted meal sum, never the plain sum.
        assert_eq!(bundle, (300.0 + 500.0 + 400.0) * (1.0 - 0.15));
        assert_eq!(bundle, 1020.0);
        assert!(bundle < 300.0 + 500.0 + 400.0);
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        let catalog = ServiceCatalog::new();

        for code in [0, 9, 42, 99, u8::MAX] {
            assert_eq!(catalog.price_of_code(code), Err(UnknownService(code)));
        }
    }

    #[test]
    fn test_every_kind_is_priced() {
        let catalog = ServiceCatalog::new();

        for kind in ServiceKind::ALL {
            assert!(catalog.price(kind) > 0.0, "{kind} has no positive price");
        }
    }

    #[test]
    fn test_menu_lists_all_codes_in_order() {
        let catalog = ServiceCatalog::new();
        let codes: Vec<u8> = catalog.menu().map(|(code, _, _)| code).collect();

        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_code_roundtrip() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::try_from(kind.code()), Ok(kind));
        }
    }
}
