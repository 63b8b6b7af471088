pub mod numbering;
pub mod policy;
pub mod replace;

pub use numbering::{
    apply_numbering_plan, normalize_phone, NormalizedPhone, NumberingRule, LOCAL_RANGE,
    LOCAL_TRUNK_PREFIX, NATIONAL_PREFIX, NATIONAL_SUBSCRIBER_DIGITS,
};
pub use policy::{MalformedPolicy, MarkerMatch};
pub use replace::{splice_value, ReplaceMode};
