//! Definitions to describe Fock states of a multi-mode bosonic network and
//! ordered, truncated collections thereof.

use std::ops::Deref;
use indexmap::IndexSet;
use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ Zero, One };

/* States *********************************************************************/

/// A single Fock state of a bosonic network, labeled by the occupation number
/// of each mode.
///
/// States are immutable values: ladder-operator action always returns a new
/// state and leaves the original untouched. Two states are equal iff their
/// occupation sequences are pointwise equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FockState(Box<[usize]>);

impl FockState {
    /// Create a new state from a sequence of occupation numbers.
    pub fn new<I>(occupations: I) -> Self
    where I: IntoIterator<Item = usize>
    {
        Self(occupations.into_iter().collect())
    }

    /// Create the vacuum state of a `num_modes`-mode network.
    pub fn vacuum(num_modes: usize) -> Self {
        Self(vec![0; num_modes].into())
    }

    /// Return the number of modes.
    pub fn num_modes(&self) -> usize { self.0.len() }

    /// Return the occupation number of a single mode.
    pub fn occupation(&self, mode: usize) -> Option<usize> {
        self.0.get(mode).copied()
    }

    /// Return the total occupation number, summed over all modes.
    pub fn total_occupation(&self) -> usize { self.0.iter().sum() }

    /// Apply the bosonic annihilation operator to a single mode, giving the
    /// resulting state and the amplitude `⟨n - 1|a|n⟩ = √n`.
    ///
    /// Returns `None` if `mode` is at occupation 0 (the operator annihilates
    /// the mode vacuum) or out of range.
    pub fn annihilate(&self, mode: usize) -> Option<(Self, f64)> {
        let n: usize = self.occupation(mode)?;
        if n == 0 { return None; }
        let mut occ = self.0.clone();
        occ[mode] = n - 1;
        Some((Self(occ), (n as f64).sqrt()))
    }

    /// Apply the bosonic creation operator to a single mode, giving the
    /// resulting state and the amplitude `⟨n + 1|a†|n⟩ = √(n + 1)`.
    ///
    /// Creation is unbounded at this level; a cutoff arises only from results
    /// falling outside a truncated [`Basis`]. Returns `None` only if `mode`
    /// is out of range.
    pub fn create(&self, mode: usize) -> Option<(Self, f64)> {
        let n: usize = self.occupation(mode)?;
        let mut occ = self.0.clone();
        occ[mode] = n + 1;
        Some((Self(occ), ((n + 1) as f64).sqrt()))
    }
}

impl From<Vec<usize>> for FockState {
    fn from(occupations: Vec<usize>) -> Self { Self(occupations.into()) }
}

impl From<&[usize]> for FockState {
    fn from(occupations: &[usize]) -> Self { Self(occupations.into()) }
}

impl<const N: usize> From<[usize; N]> for FockState {
    fn from(occupations: [usize; N]) -> Self { Self(occupations.into()) }
}

impl AsRef<[usize]> for FockState {
    fn as_ref(&self) -> &[usize] { &self.0 }
}

impl Deref for FockState {
    type Target = [usize];

    fn deref(&self) -> &Self::Target { &self.0 }
}

/* Bases **********************************************************************/

/// An ordered collection of unique [`FockState`]s chosen as the truncation of
/// the full bosonic Hilbert space.
///
/// The collection fixes the row/column index space of every matrix built over
/// it. It is backed by a single [`IndexSet`], which can be accessed via
/// [`AsRef`] and [`Deref`], giving hashed state-to-index lookup; states
/// produced by operator action that are absent from the collection are
/// "leakage" and contribute nothing downstream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Basis {
    states: IndexSet<FockState>,
}

impl AsRef<IndexSet<FockState>> for Basis {
    fn as_ref(&self) -> &IndexSet<FockState> { &self.states }
}

impl Deref for Basis {
    type Target = IndexSet<FockState>;

    fn deref(&self) -> &Self::Target { &self.states }
}

impl From<Vec<FockState>> for Basis {
    fn from(states: Vec<FockState>) -> Self {
        states.into_iter().collect()
    }
}

impl FromIterator<FockState> for Basis {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = FockState>
    {
        Self { states: iter.into_iter().collect() }
    }
}

impl Basis {
    /// Create a new, empty basis.
    pub fn new() -> Self { Self::default() }

    /// Create the basis holding the vacuum and every one-photon state of a
    /// `num_modes`-mode network, in mode order after the vacuum.
    pub fn single_excitation(num_modes: usize) -> Self {
        [FockState::vacuum(num_modes)].into_iter()
            .chain(
                (0..num_modes).map(|k| {
                    FockState::new((0..num_modes).map(|j| usize::from(j == k)))
                })
            )
            .collect()
    }

    /// Create the full product basis with a per-mode occupation cutoff, with
    /// the occupation of the last mode varying fastest.
    pub fn with_cutoffs(nmax: &[usize]) -> Self {
        nmax.iter().map(|n| 0..=*n).multi_cartesian_product()
            .map(FockState::new)
            .collect()
    }

    /// Return the number of retained states.
    pub fn num_states(&self) -> usize { self.states.len() }

    /// Look up the index of a state by structural equality.
    ///
    /// `None` is an expected outcome (truncation leakage), not an error.
    pub fn get_index_of(&self, state: &FockState) -> Option<usize> {
        self.states.get_index_of(state)
    }

    /// Return the state at a given index.
    pub fn get_index(&self, index: usize) -> Option<&FockState> {
        self.states.get_index(index)
    }

    /// Get an array representation of a particular basis state.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_vector(&self, state: &FockState) -> Option<nd::Array1<C64>> {
        self.states.get_index_of(state)
            .map(|k| {
                let n = self.states.len();
                (0..n).map(|j| if j == k { C64::one() } else { C64::zero() })
                    .collect()
            })
    }

    /// Get an array representation of a particular basis state by index.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_vector_index(&self, index: usize) -> Option<nd::Array1<C64>> {
        let n = self.states.len();
        (index < n).then(|| {
            (0..n).map(|j| if j == index { C64::one() } else { C64::zero() })
                .collect()
        })
    }

    /// Get an array representation of a linear combination of basis states,
    /// with weights determined by a weighting function.
    ///
    /// The weighting function will be passed a state and its index. The array
    /// is sized to match the number of states currently in `self`.
    pub fn get_vector_weighted<F>(&self, weights: F) -> nd::Array1<C64>
    where F: Fn(&FockState, usize) -> C64
    {
        self.states.iter().enumerate()
            .map(|(index, state)| weights(state, index))
            .collect()
    }

    /// Get an array representation of the density matrix for a particular
    /// basis state.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_density(&self, state: &FockState) -> Option<nd::Array2<C64>> {
        self.get_vector(state)
            .map(|diag| nd::Array2::from_diag(&diag))
    }

    /// Get an array representation of the density matrix for a particular
    /// basis state by index.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_density_index(&self, index: usize) -> Option<nd::Array2<C64>> {
        self.get_vector_index(index)
            .map(|diag| nd::Array2::from_diag(&diag))
    }
}

#[cfg(test)]
mod test {
    use super::{ Basis, FockState };

    #[test]
    fn ladder_amplitudes() {
        let s = FockState::new([0, 3]);
        let (down, a) = s.annihilate(1).unwrap();
        assert_eq!(down, FockState::new([0, 2]));
        assert_eq!(a, 3.0_f64.sqrt());
        let (up, b) = s.create(1).unwrap();
        assert_eq!(up, FockState::new([0, 4]));
        assert_eq!(b, 4.0_f64.sqrt());
        assert!(s.annihilate(0).is_none());
        // original state untouched throughout
        assert_eq!(s, FockState::new([0, 3]));
    }

    #[test]
    fn ladder_touches_one_mode() {
        let s = FockState::new([2, 5, 1]);
        let (up, _) = s.create(1).unwrap();
        assert_eq!(up.occupation(0), Some(2));
        assert_eq!(up.occupation(1), Some(6));
        assert_eq!(up.occupation(2), Some(1));
        assert!(s.create(3).is_none());
    }

    #[test]
    fn number_composition() {
        // a† a on |n⟩ leaves the state fixed with amplitude n
        let s = FockState::new([4]);
        let (down, a) = s.annihilate(0).unwrap();
        let (back, b) = down.create(0).unwrap();
        assert_eq!(back, s);
        assert_eq!(a * b, 4.0);
    }

    #[test]
    fn single_excitation_states() {
        let basis = Basis::single_excitation(3);
        assert_eq!(basis.num_states(), 4);
        assert_eq!(basis.get_index_of(&FockState::vacuum(3)), Some(0));
        assert_eq!(basis.get_index_of(&FockState::new([0, 1, 0])), Some(2));
        assert_eq!(basis.get_index_of(&FockState::new([0, 1, 1])), None);
    }

    #[test]
    fn cutoff_basis() {
        let basis = Basis::with_cutoffs(&[1, 2]);
        assert_eq!(basis.num_states(), 6);
        assert_eq!(basis.get_index_of(&FockState::new([0, 0])), Some(0));
        assert_eq!(basis.get_index_of(&FockState::new([0, 2])), Some(2));
        assert_eq!(basis.get_index_of(&FockState::new([1, 0])), Some(3));
        assert_eq!(basis.get_index_of(&FockState::new([2, 0])), None);
    }

    #[test]
    fn basis_vectors() {
        let basis = Basis::single_excitation(2);
        let v = basis.get_vector(&FockState::new([0, 1])).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v[2].re, 1.0);
        assert_eq!(v.iter().map(|a| a.norm_sqr()).sum::<f64>(), 1.0);
        assert!(basis.get_vector_index(3).is_none());
    }
}
