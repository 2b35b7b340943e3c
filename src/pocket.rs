use std::fmt;

use crate::role::Role;

/// The hand of one side: captured pieces available to drop.
///
/// Capturing converts the victim to the capturer's color and adds it
/// here; dropping removes it again. Kings are never captured, so they
/// have no slot.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pocket {
    pub pawns: u8,
    pub knights: u8,
    pub bishops: u8,
    pub rooks: u8,
    pub queens: u8,
}

impl Pocket {
    pub fn new() -> Pocket {
        Pocket::default()
    }

    pub fn by_role(&self, role: Role) -> u8 {
        match role {
            Role::Pawn => self.pawns,
            Role::Knight => self.knights,
            Role::Bishop => self.bishops,
            Role::Rook => self.rooks,
            Role::Queen => self.queens,
            Role::King => 0,
        }
    }

    fn by_role_mut(&mut self, role: Role) -> Option<&mut u8> {
        match role {
            Role::Pawn => Some(&mut self.pawns),
            Role::Knight => Some(&mut self.knights),
            Role::Bishop => Some(&mut self.bishops),
            Role::Rook => Some(&mut self.rooks),
            Role::Queen => Some(&mut self.queens),
            Role::King => None,
        }
    }

    /// Adds one captured piece of the given role.
    pub fn add(&mut self, role: Role) {
        if let Some(count) = self.by_role_mut(role) {
            *count += 1;
        }
    }

    /// Removes one piece of the given role for a drop. Returns `false`
    /// when none is held, leaving the pocket unchanged.
    pub fn remove(&mut self, role: Role) -> bool {
        match self.by_role_mut(role) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn count(&self) -> usize {
        usize::from(self.pawns)
            + usize::from(self.knights)
            + usize::from(self.bishops)
            + usize::from(self.rooks)
            + usize::from(self.queens)
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for role in Role::POCKET {
            for _ in 0..self.by_role(role) {
                write!(f, "{}", role.upper_char())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("-")
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut pocket = Pocket::new();
        assert!(pocket.is_empty());

        pocket.add(Role::Knight);
        pocket.add(Role::Knight);
        pocket.add(Role::Queen);
        assert_eq!(pocket.by_role(Role::Knight), 2);
        assert_eq!(pocket.count(), 3);

        assert!(pocket.remove(Role::Knight));
        assert_eq!(pocket.by_role(Role::Knight), 1);

        assert!(!pocket.remove(Role::Rook));
        assert_eq!(pocket.count(), 2);
    }

    #[test]
    fn test_kings_have_no_slot() {
        let mut pocket = Pocket::new();
        pocket.add(Role::King);
        assert!(pocket.is_empty());
        assert!(!pocket.remove(Role::King));
    }

    #[test]
    fn test_display() {
        let mut pocket = Pocket::new();
        pocket.add(Role::Pawn);
        pocket.add(Role::Queen);
        pocket.add(Role::Rook);
        assert_eq!(pocket.to_string(), "QRP");
    }
}
