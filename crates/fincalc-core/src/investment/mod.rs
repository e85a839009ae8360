pub mod sip;

pub use sip::{calculate_sip, compute_sip, SipField, SipInput, SipOutput, SipResult, SIP_FIELDS};
