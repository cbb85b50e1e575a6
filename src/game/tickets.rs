use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TicketBundle {
    counts: [u32; Ticket::ALL.len()],
}

impl TicketBundle {
    pub const fn from_counts(counts: [u32; 5]) -> Self {
        Self { counts }
    }

    pub const fn zero() -> Self {
        Self {
            counts: [0; Ticket::ALL.len()],
        }
    }

    pub fn get(&self, ticket: Ticket) -> u32 {
        self.counts[ticket.index()]
    }

    pub fn has(&self, ticket: Ticket) -> bool {
        self.has_at_least(ticket, 1)
    }

    pub fn has_at_least(&self, ticket: Ticket, amount: u32) -> bool {
        self.get(ticket) >= amount
    }

    pub fn add(&mut self, ticket: Ticket, amount: u32) {
        let idx = ticket.index();
        self.counts[idx] = self.counts[idx].saturating_add(amount);
    }

    pub fn subtract(&mut self, ticket: Ticket, amount: u32) -> Result<(), TicketError> {
        let idx = ticket.index();
        if self.counts[idx] < amount {
            return Err(TicketError::Insufficient {
                ticket,
                available: self.counts[idx],
                requested: amount,
            });
        }
        self.counts[idx] -= amount;
        Ok(())
    }

    /// A copy with one `ticket` spent, floored at zero.
    pub fn after_spending(&self, ticket: Ticket) -> Self {
        let mut remaining = *self;
        let idx = ticket.index();
        remaining.counts[idx] = remaining.counts[idx].saturating_sub(1);
        remaining
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&v| v as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ticket, u32)> + '_ {
        Ticket::ALL.into_iter().zip(self.counts.iter().copied())
    }
}

impl FromIterator<(Ticket, u32)> for TicketBundle {
    fn from_iter<I: IntoIterator<Item = (Ticket, u32)>>(iter: I) -> Self {
        let mut bundle = TicketBundle::zero();
        for (ticket, amount) in iter {
            bundle.add(ticket, amount);
        }
        bundle
    }
}

impl fmt::Display for TicketBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![];
        for (ticket, amount) in self.iter() {
            if amount > 0 {
                parts.push(format!("{amount}x{ticket}"));
            }
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("insufficient {ticket} tickets: have {available}, need {requested}")]
    Insufficient {
        ticket: Ticket,
        available: u32,
        requested: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_refuses_to_go_negative() {
        let mut bundle = TicketBundle::from_counts([1, 0, 0, 0, 0]);
        assert!(bundle.subtract(Ticket::Taxi, 1).is_ok());
        assert_eq!(
            bundle.subtract(Ticket::Taxi, 1),
            Err(TicketError::Insufficient {
                ticket: Ticket::Taxi,
                available: 0,
                requested: 1,
            })
        );
        assert_eq!(bundle.get(Ticket::Taxi), 0);
    }

    #[test]
    fn spending_leaves_the_original_untouched() {
        let bundle = TicketBundle::from_counts([2, 0, 1, 1, 1]);
        let remaining = bundle.after_spending(Ticket::Taxi);
        assert_eq!(remaining.get(Ticket::Taxi), 1);
        assert_eq!(bundle.get(Ticket::Taxi), 2);
        assert_eq!(remaining.after_spending(Ticket::Bus).get(Ticket::Bus), 0);
        assert_eq!(remaining.total(), bundle.total() - 1);
    }

    #[test]
    fn collects_from_pairs() {
        let bundle: TicketBundle = [(Ticket::Bus, 2), (Ticket::Double, 1), (Ticket::Bus, 1)]
            .into_iter()
            .collect();
        assert_eq!(bundle.get(Ticket::Bus), 3);
        assert!(bundle.has(Ticket::Double));
        assert!(!bundle.has_at_least(Ticket::Double, 2));
        assert_eq!(bundle.total(), 4);
        assert_eq!(bundle.to_string(), "3xBUS, 1xDOUBLE");
    }
}
