//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

use studio_core::subscription::InitialPayment;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Map a database status ID back to the enum.
            pub fn from_id(id: StatusId) -> Option<Self> {
                $( if id == $val {
                    return Some($name::$variant);
                } )+
                None
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Booking lifecycle. There is no completed state.
    BookingStatus {
        Confirmed = 1,
        Cancelled = 2,
    }
}

define_status_enum! {
    SessionStatus {
        Scheduled = 1,
        Cancelled = 2,
    }
}

define_status_enum! {
    /// Subscription payment state.
    PaymentStatus {
        Pending = 1,
        Paid = 2,
        Failed = 3,
        Refunded = 4,
    }
}

impl From<InitialPayment> for PaymentStatus {
    fn from(value: InitialPayment) -> Self {
        match value {
            InitialPayment::Pending => PaymentStatus::Pending,
            InitialPayment::Paid => PaymentStatus::Paid,
        }
    }
}
