use crate::{entities::StructuredAddress, gateways::postal::PostalCodeLookup};

/// Completes city and state from the postal code.
///
/// Values entered by the user are never replaced.
pub fn autofill_from_postal_code<L>(lookup: &L, mut addr: StructuredAddress) -> StructuredAddress
where
    L: PostalCodeLookup + ?Sized,
{
    if !addr.city.trim().is_empty() && !addr.state.trim().is_empty() {
        return addr;
    }
    let Some(area) = lookup.lookup(addr.postal_code.trim()) else {
        log::debug!("Unknown postal code '{}'", addr.postal_code);
        return addr;
    };
    if addr.city.trim().is_empty() {
        addr.city = area.city;
    }
    if addr.state.trim().is_empty() {
        addr.state = area.state;
    }
    addr
}
