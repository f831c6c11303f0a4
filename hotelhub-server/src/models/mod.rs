//! Request models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod booking;
pub mod catalog;
pub mod contact;
pub mod datetime;
pub mod email;
pub mod menu;
pub mod menu_display;
pub mod occasion;
pub mod user;
pub mod validation;

pub use booking::NewBooking;
pub use catalog::{
    ensure_changes, EventPatch, NewEvent, NewService, NewTeamMember, ServicePatch,
    TeamMemberPatch,
};
pub use contact::NewContactMessage;
pub use datetime::BookingDateTime;
pub use email::Email;
pub use menu::{MenuHeadingPatch, NewDish, NewMenuHeading};
pub use menu_display::{
    MenuDisplayRequest, NewMenuDisplay, NewPackage, NewSubpackage, PackageRequest,
    SubpackageRequest,
};
pub use occasion::{NewOccasion, OccasionPatch, OccasionPricing};
pub use user::{Credentials, NewUser};
pub use validation::ValidationError;
