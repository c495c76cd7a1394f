//! The equality contract used wherever change is detected.
//!
//! Nullable values are modelled as `Option<U>`. `Option`'s `PartialEq`
//! already has the required shape (`None == None`, `None != Some(_)`,
//! otherwise compare the payloads), so [`equals`] is all the engine needs;
//! [`nullable_eq`] spells the contract out for borrowed optional values.

/// Compare two values under the change-detection contract.
#[inline]
#[must_use]
pub fn equals<T: PartialEq + ?Sized>(a: &T, b: &T) -> bool {
    a == b
}

/// Null-safe equality over borrowed optional values.
///
/// Two absent values are equal, an absent value never equals a present one,
/// and two present values defer to `PartialEq`.
#[inline]
#[must_use]
pub fn nullable_eq<T: PartialEq + ?Sized>(a: Option<&T>, b: Option<&T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
