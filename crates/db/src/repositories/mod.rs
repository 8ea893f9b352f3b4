//! Repository layer.
//!
//! Each repository is a zero-sized struct. Read paths accept `&PgPool`;
//! methods the booking engine calls inside its transaction are generic over
//! a Postgres executor so they run on `&mut *tx` as well.

pub mod booking_repo;
pub mod class_type_repo;
pub mod client_repo;
pub mod instructor_repo;
pub mod plan_repo;
pub mod session_repo;
pub mod subscription_repo;

pub use booking_repo::BookingRepo;
pub use class_type_repo::ClassTypeRepo;
pub use client_repo::ClientRepo;
pub use instructor_repo::InstructorRepo;
pub use plan_repo::PlanRepo;
pub use session_repo::SessionRepo;
pub use subscription_repo::SubscriptionRepo;
