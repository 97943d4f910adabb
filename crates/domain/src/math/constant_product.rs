use crate::value_objects::amount::Amount;
use rust_decimal::Decimal;

/// Calculates the spot price of token_in in terms of token_out
/// Price = reserve_out / reserve_in
///
/// Both reserves are normalized by their own decimals first, so the result
/// is in human units. Returns `None` for an empty `reserve_in` or when either
/// reserve is too large for `Decimal`.
pub fn spot_price(reserve_in: &Amount, reserve_out: &Amount) -> Option<Decimal> {
    let r_in = reserve_in.to_decimal()?;
    let r_out = reserve_out.to_decimal()?;

    if r_in.is_zero() {
        return None;
    }

    r_out.checked_div(r_in)
}
