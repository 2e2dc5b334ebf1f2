/// Address range construction, parsing and overlap.
pub mod addr;


/// Unit-carrying value parsing and formatting.
pub mod units;
