//! Reservation Models

use jiff::{SignedDuration, Timestamp};

use crate::{domain::catalog::models::VariantUuid, uuids::TypedUuid};

/// How long a hold lasts after its most recent add or update.
pub const RESERVATION_TTL: SignedDuration = SignedDuration::from_hours(3);

/// Marker for the opaque shopper session a cart belongs to.
#[derive(Debug)]
pub struct CartSession;

/// Session Key
pub type SessionKey = TypedUuid<CartSession>;

/// Reservation UUID
pub type ReservationUuid = TypedUuid<Reservation>;

/// Reservation Model
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub uuid: ReservationUuid,
    pub session_key: SessionKey,
    pub variant_uuid: VariantUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub expires_at: Timestamp,
    pub is_active: bool,
}

impl Reservation {
    /// Whether this row still holds stock at `now`, regardless of whether a sweep has flipped
    /// it yet.
    #[must_use]
    pub fn holds_stock_at(&self, now: Timestamp) -> bool {
        self.is_active && self.expires_at >= now
    }
}

/// Expiry for a hold written at `now`.
#[must_use]
pub fn expires_at(now: Timestamp) -> Timestamp {
    now + RESERVATION_TTL
}

/// A variant's tracked stock together with what other sessions currently hold of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub stock: u32,
    pub reserved_by_others: u64,
}

impl StockLevel {
    /// Units this session may hold in total.
    #[must_use]
    pub fn available(&self) -> u32 {
        let reserved = u32::try_from(self.reserved_by_others).unwrap_or(u32::MAX);

        self.stock.saturating_sub(reserved)
    }

    /// Whether this session can hold `quantity` units in total.
    #[must_use]
    pub fn can_hold(&self, quantity: u64) -> bool {
        quantity <= u64::from(self.available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_is_three_hours() {
        let now: Timestamp = "2026-03-01T10:00:00Z".parse().expect("valid timestamp");
        let expected: Timestamp = "2026-03-01T13:00:00Z".parse().expect("valid timestamp");

        assert_eq!(expires_at(now), expected);
    }

    #[test]
    fn expired_rows_do_not_hold_stock_even_before_a_sweep() {
        let created: Timestamp = "2026-03-01T10:00:00Z".parse().expect("valid timestamp");

        let reservation = Reservation {
            uuid: ReservationUuid::new(),
            session_key: SessionKey::new(),
            variant_uuid: VariantUuid::new(),
            quantity: 1,
            created_at: created,
            updated_at: created,
            expires_at: expires_at(created),
            is_active: true,
        };

        assert!(reservation.holds_stock_at(created + SignedDuration::from_hours(3)));
        assert!(!reservation.holds_stock_at(created + SignedDuration::from_mins(181)));
    }

    #[test]
    fn available_subtracts_other_sessions() {
        let level = StockLevel {
            stock: 5,
            reserved_by_others: 2,
        };

        assert_eq!(level.available(), 3);
        assert!(level.can_hold(3));
        assert!(!level.can_hold(4));
    }

    #[test]
    fn available_never_goes_negative() {
        let level = StockLevel {
            stock: 2,
            reserved_by_others: u64::from(u32::MAX) + 10,
        };

        assert_eq!(level.available(), 0);
        assert!(level.can_hold(0));
        assert!(!level.can_hold(1));
    }
}
