pub mod codec;
pub mod doctor;
pub mod mission;
pub mod samples;

pub use codec::{decode, decode_slice, encode, encode_pretty, DecodeError};
pub use mission::{Mission, Waypoint};
pub use samples::Sample;
