//! # UPI Payment URIs
//!
//! Builds the `upi://pay` payment-request URI embedded (as a QR code) in
//! every invoice:
//!
//! ```text
//! upi://pay?pa=<payee id>&pn=<payee name>&am=<amount>&cu=INR&tn=<note>
//! ```
//!
//! The amount is always rendered with exactly two decimals; the payee name
//! and note are percent-encoded as URI components. The payee id is a UPI
//! virtual payment address (`shop@upi`) and goes through verbatim.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::money::Money;
use crate::types::UpiProfile;

/// ISO currency code for every payment request.
pub const CURRENCY: &str = "INR";

/// Bytes that must be escaped inside a query component. Matches the
/// characters `encodeURIComponent` escapes that matter in a query string.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

/// Builds the payment-request URI for one sale total.
///
/// The caller is responsible for checking [`UpiProfile::is_complete`]
/// before billing; this function formats whatever it is given.
pub fn payment_uri(profile: &UpiProfile, amount: Money) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={}&cu={}&tn={}",
        profile.payee_id,
        utf8_percent_encode(&profile.payee_name, QUERY_COMPONENT),
        amount.to_decimal_string(),
        CURRENCY,
        utf8_percent_encode(&profile.note, QUERY_COMPONENT),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
