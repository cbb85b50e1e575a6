use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transport {
    Taxi,
    Bus,
    Underground,
    Ferry,
}

impl Transport {
    pub const ALL: [Transport; 4] = [
        Transport::Taxi,
        Transport::Bus,
        Transport::Underground,
        Transport::Ferry,
    ];
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ticket {
    Taxi,
    Bus,
    Underground,
    Secret,
    Double,
}

impl Ticket {
    pub const ALL: [Ticket; 5] = [
        Ticket::Taxi,
        Ticket::Bus,
        Ticket::Underground,
        Ticket::Secret,
        Ticket::Double,
    ];

    /// Tickets a detective is allowed to carry.
    pub const DETECTIVE: [Ticket; 3] = [Ticket::Taxi, Ticket::Bus, Ticket::Underground];

    /// The ticket that pays for travelling along an edge of the given transport.
    pub const fn from_transport(transport: Transport) -> Ticket {
        match transport {
            Transport::Taxi => Ticket::Taxi,
            Transport::Bus => Ticket::Bus,
            Transport::Underground => Ticket::Underground,
            Transport::Ferry => Ticket::Secret,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Ticket::Taxi => 0,
            Ticket::Bus => 1,
            Ticket::Underground => 2,
            Ticket::Secret => 3,
            Ticket::Double => 4,
        }
    }
}

impl From<Transport> for Ticket {
    fn from(transport: Transport) -> Self {
        Ticket::from_transport(transport)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Colour {
    Black,
    Blue,
    Green,
    Red,
    White,
    Yellow,
}

impl Colour {
    pub const MR_X: Colour = Colour::Black;

    pub const DETECTIVES: [Colour; 5] = [
        Colour::Blue,
        Colour::Green,
        Colour::Red,
        Colour::White,
        Colour::Yellow,
    ];

    pub const fn is_mr_x(self) -> bool {
        matches!(self, Colour::Black)
    }

    pub const fn is_detective(self) -> bool {
        !self.is_mr_x()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_transport_maps_to_a_ticket() {
        assert_eq!(Ticket::from(Transport::Taxi), Ticket::Taxi);
        assert_eq!(Ticket::from(Transport::Bus), Ticket::Bus);
        assert_eq!(Ticket::from(Transport::Underground), Ticket::Underground);
        assert_eq!(Ticket::from(Transport::Ferry), Ticket::Secret);
    }

    #[test]
    fn ticket_indices_are_dense() {
        assert!(Ticket::iter().eq(Ticket::ALL));
        for (expected, ticket) in Ticket::iter().enumerate() {
            assert_eq!(ticket.index(), expected);
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Transport::from_str("underground").unwrap(), Transport::Underground);
        assert_eq!(Colour::from_str("Red").unwrap(), Colour::Red);
        assert_eq!(Ticket::Double.to_string(), "DOUBLE");
    }

    #[test]
    fn only_black_is_mr_x() {
        assert!(Colour::Black.is_mr_x());
        let detectives: Vec<Colour> = Colour::iter().filter(|c| c.is_detective()).collect();
        assert_eq!(detectives, Colour::DETECTIVES);
    }
}
