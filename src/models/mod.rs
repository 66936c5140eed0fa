pub mod branch;
pub mod choose_us;
pub mod colleague;
pub mod feedback;
pub mod media;
pub mod news;
pub mod user;

pub use branch::*;
pub use choose_us::*;
pub use colleague::*;
pub use feedback::*;
pub use media::*;
pub use news::*;
pub use user::*;

use crate::localization::{verify, LocalizationError};

/// Checks every content type's field table against the fields its view reads.
pub fn verify_field_tables() -> Result<(), LocalizationError> {
    verify::<News>()?;
    verify::<Colleague>()?;
    verify::<Branch>()?;
    verify::<ChooseUs>()?;
    verify::<Feedback>()?;
    Ok(())
}
