//! Declarative description of a network of coupled bosonic modes.
//!
//! A [`QSystem`] bundles per-mode frequencies, pairwise couplings, and a
//! truncated Fock [`Basis`] into a single immutable specification, validated
//! once at construction. Matrices over the basis are derived on demand via
//! [`HBuilderNetwork`][crate::hamiltonian::HBuilderNetwork].

use ndarray as nd;
use num_complex::Complex64 as C64;
use thiserror::Error;
use crate::{
    hamiltonian::HBuilderNetwork,
    hilbert::Basis,
};

/// The self-energy of a single mode, in units of angular frequency.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrequencyTerm {
    /// Index of the mode.
    pub mode: usize,
    /// Mode frequency in units of angular frequency.
    pub frequency: f64,
}

impl FrequencyTerm {
    /// Create a new `FrequencyTerm`.
    pub fn new(mode: usize, frequency: f64) -> Self {
        Self { mode, frequency }
    }
}

impl From<(usize, f64)> for FrequencyTerm {
    fn from(mf: (usize, f64)) -> Self {
        let (mode, frequency) = mf;
        Self { mode, frequency }
    }
}

/// A directed hopping term `strength * a†_source a_target` between two modes,
/// with `strength` (commonly called *g*) in units of angular frequency.
///
/// A term and its [adjoint][Self::adjoint] together form a Hermitian
/// interaction; the pair can be completed automatically at assembly time (see
/// [`QSystem::new`]).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CouplingTerm {
    /// Mode receiving the excitation.
    pub source: usize,
    /// Mode losing the excitation.
    pub target: usize,
    /// Coupling strength in units of angular frequency.
    pub strength: C64,
}

impl CouplingTerm {
    /// Create a new `CouplingTerm`.
    pub fn new<T>(source: usize, target: usize, strength: T) -> Self
    where T: Into<C64>
    {
        Self { source, target, strength: strength.into() }
    }

    /// Return the Hermitian partner of `self`: transfer direction reversed
    /// and strength conjugated.
    pub fn adjoint(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            strength: self.strength.conj(),
        }
    }
}

impl<T> From<(usize, usize, T)> for CouplingTerm
where T: Into<C64>
{
    fn from(stg: (usize, usize, T)) -> Self {
        let (source, target, strength) = stg;
        Self::new(source, target, strength)
    }
}

/// Error type for invalid network specifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// A frequency term references a nonexistent mode.
    #[error("frequency term {term} references mode {mode} of a {num_modes}-mode network")]
    FrequencyModeOutOfRange { term: usize, mode: usize, num_modes: usize },

    /// A coupling term references a nonexistent mode.
    #[error("coupling term {term} references mode {mode} of a {num_modes}-mode network")]
    CouplingModeOutOfRange { term: usize, mode: usize, num_modes: usize },

    /// A basis state's length disagrees with the number of modes.
    #[error("basis state {index} has {len} occupation numbers; expected {num_modes}")]
    BasisStateLength { index: usize, len: usize, num_modes: usize },

    /// An operator matrix was requested for a nonexistent mode.
    #[error("operator matrix requested for mode {mode} of a {num_modes}-mode network")]
    OperatorModeOutOfRange { mode: usize, num_modes: usize },
}

/// A network of coupled bosonic modes over a truncated Fock basis.
///
/// The specification is immutable after construction and all derived
/// quantities are pure functions of it: repeated calls return identical
/// matrices, and a shared reference may be used freely from multiple threads.
#[derive(Clone, Debug, PartialEq)]
pub struct QSystem {
    frequencies: Vec<FrequencyTerm>,
    couplings: Vec<CouplingTerm>,
    basis: Basis,
    complete_conjugate: bool,
}

impl QSystem {
    /// Create a new `QSystem`, validating every term against the mode count.
    ///
    /// The number of modes is the length of the frequency list. With
    /// `complete_conjugate` set, the Hermitian partner of every coupling term
    /// is filled in automatically at assembly time; otherwise the coupling
    /// list is taken verbatim and the caller is responsible for supplying
    /// both directions of each interaction.
    pub fn new<F, G, B>(
        frequencies: F,
        couplings: G,
        basis: B,
        complete_conjugate: bool,
    ) -> Result<Self, NetworkError>
    where
        F: IntoIterator,
        F::Item: Into<FrequencyTerm>,
        G: IntoIterator,
        G::Item: Into<CouplingTerm>,
        B: Into<Basis>,
    {
        let frequencies: Vec<FrequencyTerm>
            = frequencies.into_iter().map(Into::into).collect();
        let couplings: Vec<CouplingTerm>
            = couplings.into_iter().map(Into::into).collect();
        let basis: Basis = basis.into();
        let num_modes = frequencies.len();
        for (term, f) in frequencies.iter().enumerate() {
            if f.mode >= num_modes {
                return Err(NetworkError::FrequencyModeOutOfRange {
                    term, mode: f.mode, num_modes });
            }
        }
        for (term, g) in couplings.iter().enumerate() {
            let mode = g.source.max(g.target);
            if mode >= num_modes {
                return Err(NetworkError::CouplingModeOutOfRange {
                    term, mode, num_modes });
            }
        }
        for (index, state) in basis.iter().enumerate() {
            if state.num_modes() != num_modes {
                return Err(NetworkError::BasisStateLength {
                    index, len: state.num_modes(), num_modes });
            }
        }
        Ok(Self { frequencies, couplings, basis, complete_conjugate })
    }

    /// Return the number of modes in the network.
    pub fn num_modes(&self) -> usize { self.frequencies.len() }

    /// Return a reference to the frequency terms.
    pub fn frequencies(&self) -> &[FrequencyTerm] { &self.frequencies }

    /// Return a reference to the coupling terms.
    pub fn couplings(&self) -> &[CouplingTerm] { &self.couplings }

    /// Return a reference to the truncated basis.
    pub fn basis(&self) -> &Basis { &self.basis }

    /// Return `true` if coupling terms are completed by their Hermitian
    /// partners at assembly time.
    pub fn complete_conjugate(&self) -> bool { self.complete_conjugate }

    /// Return a [`HBuilderNetwork`] borrowing `self`'s specification.
    pub fn builder(&self) -> HBuilderNetwork<'_> {
        HBuilderNetwork::new(
            &self.basis,
            &self.frequencies,
            &self.couplings,
            self.complete_conjugate,
        )
    }

    /// Compute the Hamiltonian matrix of the network over the truncated
    /// basis.
    ///
    /// Hermitian by construction when conjugate completion is enabled.
    pub fn hamiltonian_matrix(&self) -> nd::Array2<C64> {
        self.builder().gen_static()
    }

    /// Compute the matrix of a single mode's annihilation operator over the
    /// truncated basis.
    ///
    /// The creation operator matrix is its conjugate transpose.
    pub fn annihilation_operator_matrix(&self, mode: usize)
        -> Result<nd::Array2<C64>, NetworkError>
    {
        if mode >= self.num_modes() {
            return Err(NetworkError::OperatorModeOutOfRange {
                mode, num_modes: self.num_modes() });
        }
        Ok(self.builder().gen_annihilation(mode))
    }
}
