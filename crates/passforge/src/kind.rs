use serde::{Deserialize, Serialize};

/// Supported pass kinds.
///
/// Unknown kind strings deserialize as [`PassKind::Generic`]; callers
/// sending an unrecognized type get a generic-shaped document instead
/// of an error.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PassKind {
    StoreCard,
    EventTicket,
    Coupon,
    BoardingPass,
    #[default]
    #[serde(other)]
    Generic,
}

/// One of the five field groups a pass structure may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldGroup {
    Header,
    Primary,
    Secondary,
    Auxiliary,
    Back,
}

impl PassKind {
    /// JSON key of the type-specific structure inside pass.json.
    pub fn json_key(&self) -> &'static str {
        match self {
            PassKind::Generic => "generic",
            PassKind::StoreCard => "storeCard",
            PassKind::EventTicket => "eventTicket",
            PassKind::Coupon => "coupon",
            PassKind::BoardingPass => "boardingPass",
        }
    }

    /// Field groups this kind emits, iterated uniformly by the
    /// document builder. Back fields are legal for every kind.
    pub fn layout(&self) -> &'static [FieldGroup] {
        use FieldGroup::*;
        match self {
            PassKind::Generic => &[Header, Primary, Secondary, Auxiliary, Back],
            PassKind::StoreCard | PassKind::EventTicket | PassKind::BoardingPass => {
                &[Header, Primary, Secondary, Back]
            }
            PassKind::Coupon => &[Header, Primary, Back],
        }
    }

    /// Fixed transit type for boarding passes; other kinds carry none.
    pub fn transit_type(&self) -> Option<&'static str> {
        match self {
            PassKind::BoardingPass => Some("PKTransitTypeAir"),
            _ => None,
        }
    }
}
