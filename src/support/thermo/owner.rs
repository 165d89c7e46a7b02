use std::{
    fmt,
    rc::{Rc, Weak},
};

use uom::si::f64::MolarMass;

/// The phase model that owns a set of standard states.
///
/// A [`StandardState`](super::StandardState) never owns its phase. It keeps an
/// [`OwnerRef`] and only asks the phase for descriptive context: the species
/// name and molecular weight at its index.
pub trait OwnerPhase {
    /// Returns the phase name.
    fn name(&self) -> &str;

    /// Returns the number of species in the phase.
    fn species_count(&self) -> usize;

    /// Returns the name of the species at `index`, if it exists.
    fn species_name(&self, index: usize) -> Option<&str>;

    /// Returns the molecular weight of the species at `index`, if it is known.
    fn molecular_weight(&self, index: usize) -> Option<MolarMass>;
}

/// A non-owning, possibly absent reference to an [`OwnerPhase`].
///
/// The owner may be missing entirely (standalone use) or may have been dropped
/// since the reference was taken. Every access goes through [`OwnerRef::get`],
/// which handles both cases by returning `None`.
#[derive(Clone, Default)]
pub struct OwnerRef(Option<Weak<dyn OwnerPhase>>);

impl OwnerRef {
    /// A reference to no owner.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    /// Takes a weak reference to `owner`.
    #[must_use]
    pub fn new<P: OwnerPhase + 'static>(owner: &Rc<P>) -> Self {
        let weak: Weak<P> = Rc::downgrade(owner);
        let weak: Weak<dyn OwnerPhase> = weak;
        Self(Some(weak))
    }

    /// Returns the owner if one was provided and it is still alive.
    #[must_use]
    pub fn get(&self) -> Option<Rc<dyn OwnerPhase>> {
        self.0.as_ref().and_then(Weak::upgrade)
    }

    /// Returns `true` if an owner was provided, whether or not it is still alive.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(owner) => f.debug_tuple("OwnerRef").field(&owner.name()).finish(),
            None if self.is_bound() => f.write_str("OwnerRef(<dropped>)"),
            None => f.write_str("OwnerRef(<none>)"),
        }
    }
}
